// src/server/mod.rs

//! Server layer root module.
//!
//! - HTTP/WebSocket routing
//! - Playground sessions (one script runner and playback queue per connection)
//! - Error responses shared by the endpoints

pub mod playground;
pub mod router;
pub mod ws_error;
