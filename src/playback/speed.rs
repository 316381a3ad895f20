use serde::Serialize;

use crate::config::playback::{DEFAULT_SPEED, MAX_SPEED};
use crate::error::BlitError;

/// Playback speed multiplier, in `(0, MAX_SPEED]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Speed(f64);

impl Speed {
    pub fn new(value: f64) -> Result<Self, BlitError> {
        if value.is_finite() && value > 0.0 && value <= MAX_SPEED {
            Ok(Speed(value))
        } else {
            Err(BlitError::InvalidSpeed(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// A speed set by a script, effective from event `at` of the run onwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeedChange {
    pub at: usize,
    pub speed: Speed,
}

impl Default for Speed {
    fn default() -> Self {
        Speed(DEFAULT_SPEED)
    }
}

impl TryFrom<f64> for Speed {
    type Error = BlitError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Speed::new(value)
    }
}
