use serde::Serialize;

use crate::game::events::EventKind;
use crate::playback::animation::{Effect, Pose};

/// One drawable sample of the active animation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub kind: EventKind,
    pub progress: f64,
    pub pose: Pose,
    pub effect: Effect,
    /// Last frame of this animation; the next tick starts the following one.
    pub finished: bool,
}

/// Whatever displays a run: a terminal, a websocket client, a test recorder.
pub trait PresentationSink {
    /// Jump to `pose` without animating (after a reset).
    fn snap(&mut self, pose: Pose);

    fn draw(&mut self, frame: &Frame);

    /// Called on ticks with nothing to play.
    fn idle(&mut self) {}
}
