//! Main entry point.
//!
//! `blit` or `blit serve` launches the HTTP server with the playground WebSocket
//! endpoint; `blit play <level-query> <script-file> [speed]` plays one script in the
//! terminal.

use actix_web::{App, HttpServer};
use log::info;

use crate::config::server::{BIND_ADDR, PORT};

pub mod config;
mod error;
mod game;
mod playback;
mod script;
mod server;
mod standalone;

const USAGE: &str = "usage: blit [serve] | blit play <level-query> <script-file> [speed]";

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable.
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("serve") => serve().await,
        Some("play") => match (args.get(1), args.get(2)) {
            (Some(level), Some(script)) => {
                standalone::run_standalone(level, script, args.get(3).map(String::as_str)).await
            }
            _ => Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, USAGE)),
        },
        Some(other) => Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("unknown command '{other}'\n{USAGE}"),
        )),
    }
}

async fn serve() -> std::io::Result<()> {
    info!("[Server] Listening on {}:{}", BIND_ADDR, PORT);
    HttpServer::new(|| {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*")),
            )
            .configure(crate::server::router::config)
    })
    .bind((BIND_ADDR, PORT))?
    .run()
    .await
}
