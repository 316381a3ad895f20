/// Playground server configuration constants.
pub const BIND_ADDR: &str = "127.0.0.1";

/// TCP port of the playground server.
pub const PORT: u16 = 8080;
