//! Playground: a single-player WebSocket session that runs scripts and streams their
//! playback.

pub mod messages;
pub mod session;
