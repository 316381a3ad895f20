/// Main configuration module.
///
/// Re-exports submodules for level loading, playback timing, script limits and the server.
pub mod game;
pub mod playback;
pub mod script;
pub mod server;
