/// Playback configuration constants.
///
/// Base durations are expressed at speed 1.0; the action queue divides them by the
/// active speed multiplier.
use std::time::Duration;

/// Duration of one turn, one blocked attempt, or one cell of movement.
pub const BASE_STEP: Duration = Duration::from_secs(1);

/// Sense, mark and goal pulses run this many times faster than a step.
pub const PULSE_SPEEDUP: f64 = 5.0;

/// The win sweep lasts this many steps.
pub const WIN_SWEEP_STEPS: f64 = 30.0;

/// Maximum distance (in cells) the agent drifts from its cell while shaking.
pub const JITTER_AMPLITUDE: f64 = 0.15;

/// Speed used until a client chooses another one.
pub const DEFAULT_SPEED: f64 = 10.0;

/// Highest accepted speed multiplier. The lower bound is exclusive zero.
pub const MAX_SPEED: f64 = 100.0;

/// Upper bound on animations waiting in the queue (including the active one).
pub const MAX_PENDING_ANIMATIONS: usize = 10_000;

/// Interval between two presentation ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);
