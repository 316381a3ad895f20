use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::level::Level;
use crate::playback::{Frame, Pose};
use crate::script::RunSummary;

/// Messages sent by the client.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "action", content = "data")]
pub enum ClientWsMessage {
    /// Run a script against the current game state.
    Run { script: String },
    /// Change the speed of animations queued from now on.
    SetSpeed { speed: f64 },
    Reset,
    Ping,
}

/// Messages sent by the server.
#[derive(Serialize, Clone, Debug)]
#[serde(tag = "action", content = "data")]
pub enum ServerWsMessage {
    Ready {
        session_id: Uuid,
        level: Level,
        /// Per-cell colour, in grid cell order.
        tints: Vec<u32>,
        speed: f64,
    },
    Frame(Frame),
    Snap { pose: Pose },
    RunFinished(RunSummary),
    SpeedChanged { speed: f64 },
    Error { code: String, message: String },
    Pong,
}
