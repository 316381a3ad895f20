//! One animation per event.
//!
//! Poses are in cell units (column, row) with the rotation in radians, clockwise
//! from north. Interpolation is a pure function of progress except for the shake of a
//! blocked move, which is random while it plays and exact once it is over.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::time::Duration;

use rand::Rng;
use serde::Serialize;

use crate::config::playback::{BASE_STEP, JITTER_AMPLITUDE, PULSE_SPEEDUP, WIN_SWEEP_STEPS};
use crate::game::direction::Direction;
use crate::game::events::Event;
use crate::game::types::{CellId, Position};
use crate::playback::speed::Speed;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
}

impl Pose {
    pub fn at(position: Position, direction: Direction) -> Self {
        Pose {
            x: position.col as f64,
            y: position.row as f64,
            rotation: direction.angle(),
        }
    }

    /// Nearest cell.
    pub fn cell(&self) -> Position {
        Position::new(self.x.round() as i32, self.y.round() as i32)
    }

    /// Nearest cardinal heading.
    pub fn heading(&self) -> Direction {
        let quarter = (self.rotation / FRAC_PI_2).round() as i64;
        Direction::CARDINALS[quarter.rem_euclid(4) as usize]
    }
}

/// Non-positional part of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "effect")]
pub enum Effect {
    None,
    Sense {
        position: Position,
        cell: Option<CellId>,
        intensity: f64,
    },
    Mark {
        cell: CellId,
        marked: usize,
        intensity: f64,
    },
    GoalReached {
        total: usize,
        intensity: f64,
    },
    /// Fade of the whole board after a win, 0 to 1.
    Dim { amount: f64 },
}

/// Duration of `event` at speed 1.
pub fn base_duration(event: &Event) -> Duration {
    match event {
        Event::Turn { .. } | Event::Blocked { .. } => BASE_STEP,
        Event::Move { from, to } => BASE_STEP.mul_f64(from.distance_to(*to).max(1.0)),
        Event::Sense { .. } | Event::Mark { .. } | Event::GoalReached { .. } => {
            BASE_STEP.div_f64(PULSE_SPEEDUP)
        }
        Event::Win => BASE_STEP.mul_f64(WIN_SWEEP_STEPS),
        Event::Reset { .. } => Duration::ZERO,
    }
}

pub fn total_duration(event: &Event, speed: Speed) -> Duration {
    base_duration(event).div_f64(speed.value())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    event: Event,
    elapsed: Duration,
    duration: Duration,
}

impl Animation {
    /// The duration is fixed here; later speed changes do not touch it.
    pub fn new(event: Event, speed: Speed) -> Self {
        let duration = total_duration(&event, speed);
        Animation {
            event,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    #[cfg(test)]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[cfg(test)]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Progress in `[0, 1]`, exactly 1 once the full duration has elapsed.
    pub fn progress(&self) -> f64 {
        if self.elapsed >= self.duration {
            1.0
        } else {
            self.elapsed.as_secs_f64() / self.duration.as_secs_f64()
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `delta`, never past the end.
    pub(crate) fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta).min(self.duration);
    }

    /// Pose and effect at the current progress, starting from `resting`.
    pub fn sample(&self, resting: Pose) -> (Pose, Effect) {
        let p = self.progress();
        match &self.event {
            Event::Turn { from, to } => {
                let start = from.angle();
                let rotation = if p >= 1.0 {
                    to.angle()
                } else {
                    start + shortest_arc(to.angle() - start) * p
                };
                (Pose { rotation, ..resting }, Effect::None)
            }
            Event::Move { from, to } => (
                Pose {
                    x: lerp(from.col as f64, to.col as f64, p),
                    y: lerp(from.row as f64, to.row as f64, p),
                    ..resting
                },
                Effect::None,
            ),
            Event::Blocked { from, attempted } => {
                let (x, y) = (from.col as f64, from.row as f64);
                if p >= 1.0 {
                    return (Pose { x, y, ..resting }, Effect::None);
                }
                let shake = rand::rng().random_range(-JITTER_AMPLITUDE..=JITTER_AMPLITUDE);
                let dx = (attempted.col - from.col) as f64;
                let dy = (attempted.row - from.row) as f64;
                (
                    Pose {
                        x: x + shake * dx,
                        y: y + shake * dy,
                        ..resting
                    },
                    Effect::None,
                )
            }
            Event::Sense { position, cell } => (
                resting,
                Effect::Sense {
                    position: *position,
                    cell: *cell,
                    intensity: pulse(p),
                },
            ),
            Event::Mark { cell, marked, .. } => (
                resting,
                Effect::Mark {
                    cell: *cell,
                    marked: *marked,
                    intensity: pulse(p),
                },
            ),
            Event::GoalReached { total } => (
                resting,
                Effect::GoalReached {
                    total: *total,
                    intensity: pulse(p),
                },
            ),
            Event::Win => (resting, Effect::Dim { amount: p }),
            Event::Reset {
                position,
                direction,
            } => (Pose::at(*position, *direction), Effect::None),
        }
    }
}

fn lerp(a: f64, b: f64, p: f64) -> f64 {
    a + (b - a) * p
}

/// Rises from 0 to 1 at the midpoint and back to 0.
fn pulse(p: f64) -> f64 {
    4.0 * p * (1.0 - p)
}

/// Reduce an angle difference into `(-PI, PI]`.
fn shortest_arc(delta: f64) -> f64 {
    let d = delta % TAU;
    if d > PI {
        d - TAU
    } else if d <= -PI {
        d + TAU
    } else {
        d
    }
}
