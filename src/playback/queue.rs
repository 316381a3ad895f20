use std::collections::VecDeque;
use std::time::Duration;

use log::{debug, warn};

use crate::config::playback::MAX_PENDING_ANIMATIONS;
use crate::error::BlitError;
use crate::game::events::Event;
use crate::playback::animation::{Animation, Pose};
use crate::playback::sink::{Frame, PresentationSink};
use crate::playback::speed::{Speed, SpeedChange};

/// FIFO of pending animations. Only the head ever plays; it is popped on the call
/// where it reaches progress 1.0 and any time left over in that call is dropped.
#[derive(Debug, Clone)]
pub struct ActionQueue {
    pending: VecDeque<Animation>,
    resting: Pose,
    snap: Option<Pose>,
    limit: usize,
}

impl ActionQueue {
    pub fn new(start: Pose) -> Self {
        Self::with_limit(start, MAX_PENDING_ANIMATIONS)
    }

    pub fn with_limit(start: Pose, limit: usize) -> Self {
        ActionQueue {
            pending: VecDeque::new(),
            resting: start,
            snap: None,
            limit,
        }
    }

    /// Queue one event. A `Reset` is never queued: it drops everything pending and
    /// schedules a snap to the restored pose.
    pub fn enqueue(&mut self, event: Event, speed: Speed) -> Result<(), BlitError> {
        if let Event::Reset {
            position,
            direction,
        } = event
        {
            let dropped = self.pending.len();
            self.pending.clear();
            self.resting = Pose::at(position, direction);
            self.snap = Some(self.resting);
            debug!("[Playback] Reset dropped {} pending animations", dropped);
            return Ok(());
        }

        if self.pending.len() >= self.limit {
            warn!(
                "[Playback] Queue full ({} pending), refusing {}",
                self.pending.len(),
                event
            );
            return Err(BlitError::QueueOverflow {
                pending: self.pending.len(),
                limit: self.limit,
            });
        }
        self.pending.push_back(Animation::new(event, speed));
        Ok(())
    }

    /// Queue events in order, stopping at the first refusal. Returns how many were
    /// admitted.
    pub fn enqueue_all<I>(&mut self, events: I, speed: Speed) -> Result<usize, BlitError>
    where
        I: IntoIterator<Item = Event>,
    {
        let mut admitted = 0;
        for event in events {
            self.enqueue(event, speed)?;
            admitted += 1;
        }
        Ok(admitted)
    }

    /// Queue the events of one run, switching speed where the script asked for it.
    /// Returns the speed in effect after the last change.
    pub fn enqueue_run(
        &mut self,
        events: Vec<Event>,
        changes: &[SpeedChange],
        speed: Speed,
    ) -> Result<Speed, BlitError> {
        let mut speed = speed;
        let mut changes = changes.iter().peekable();
        for (index, event) in events.into_iter().enumerate() {
            while let Some(change) = changes.next_if(|c| c.at <= index) {
                speed = change.speed;
            }
            self.enqueue(event, speed)?;
        }
        if let Some(last) = changes.last() {
            speed = last.speed;
        }
        Ok(speed)
    }

    /// Advance the head animation by `elapsed` and sample it. Returns `None` when
    /// idle or when `elapsed` is zero.
    pub fn advance(&mut self, elapsed: Duration) -> Option<Frame> {
        if elapsed.is_zero() {
            return None;
        }
        let head = self.pending.front_mut()?;
        head.advance(elapsed);

        let (pose, effect) = head.sample(self.resting);
        let frame = Frame {
            kind: head.event().kind(),
            progress: head.progress(),
            pose,
            effect,
            finished: head.is_finished(),
        };
        if frame.finished {
            self.resting = pose;
            self.pending.pop_front();
        }
        Some(frame)
    }

    /// One presentation tick: deliver a pending snap, then the next frame.
    pub fn tick<S>(&mut self, elapsed: Duration, sink: &mut S)
    where
        S: PresentationSink + ?Sized,
    {
        if let Some(pose) = self.take_snap() {
            sink.snap(pose);
        }
        match self.advance(elapsed) {
            Some(frame) => sink.draw(&frame),
            None if self.is_empty() => sink.idle(),
            None => {}
        }
    }

    pub fn take_snap(&mut self) -> Option<Pose> {
        self.snap.take()
    }

    #[cfg(test)]
    pub fn head(&self) -> Option<&Animation> {
        self.pending.front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Nothing left to play or snap.
    pub fn is_idle(&self) -> bool {
        self.is_empty() && self.snap.is_none()
    }

    /// Pose the agent holds between animations.
    #[cfg(test)]
    pub fn resting_pose(&self) -> Pose {
        self.resting
    }
}
