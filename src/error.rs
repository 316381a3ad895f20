//! Error types shared by the simulation, the script interpreter and the playback queue.
//!
//! Every failure mode is a distinct variant so callers can match on the kind of
//! failure; the `Display` text is for humans only.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BlitError {
    #[error("invalid direction: {0}")]
    InvalidDirection(String),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    LevelFormat(#[from] LevelFormatError),

    #[error("animation queue overflow: {pending} animations pending (limit {limit})")]
    QueueOverflow { pending: usize, limit: usize },

    #[error("invalid speed {0}: must be greater than 0 and at most {max}", max = crate::config::playback::MAX_SPEED)]
    InvalidSpeed(f64),
}

impl BlitError {
    /// Stable machine-readable code, used by the wire protocol.
    pub fn code(&self) -> &'static str {
        match self {
            BlitError::InvalidDirection(_) => "INVALID_DIRECTION",
            BlitError::Script(_) => "SCRIPT_ERROR",
            BlitError::LevelFormat(_) => "LEVEL_FORMAT",
            BlitError::QueueOverflow { .. } => "QUEUE_OVERFLOW",
            BlitError::InvalidSpeed(_) => "INVALID_SPEED",
        }
    }

    /// Only a malformed level prevents a session from starting.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BlitError::LevelFormat(_))
    }
}

/// Failure while interpreting a user script.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScriptError {
    #[error("unbound name `{name}`")]
    UnboundName { name: String },

    #[error("invalid arguments for `{name}`: {signature}")]
    BadArguments { name: String, signature: String },

    #[error("syntax error: {message}{}", .line.map(|l| format!(" (line {l})")).unwrap_or_default())]
    Syntax { message: String, line: Option<usize> },

    #[error("script exceeded its execution budget")]
    BudgetExhausted,

    #[error("script failed: {message}")]
    Runtime { message: String },
}

/// Malformed initial layout handed over by the level loader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelFormatError {
    #[error("missing required parameter '{0}'")]
    MissingParameter(&'static str),

    #[error("parameter '{param}' is not a valid number: {value}")]
    InvalidNumber { param: &'static str, value: String },

    #[error("parameter '{param}' is not valid percent-encoding")]
    Encoding { param: String },

    #[error("unknown layout symbol '{symbol}' at offset {offset}")]
    UnknownSymbol { symbol: char, offset: usize },

    #[error("incorrect layout length: got {actual}, expected {expected}")]
    Length { expected: usize, actual: usize },

    #[error("grid must have at least one column and one row")]
    EmptyGrid,

    #[error("grid of {cols}x{rows} cells is too large")]
    TooLarge { cols: usize, rows: usize },

    #[error("start position ({col}, {row}) is outside the grid")]
    StartOutOfBounds { col: i32, row: i32 },

    #[error("start direction must be NORTH, EAST, SOUTH or WEST, got {0}")]
    InvalidStartDirection(String),
}
