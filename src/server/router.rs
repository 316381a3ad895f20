//! HTTP and WebSocket routing configuration.
//!
//! The playground endpoint takes the level as its query string, e.g.
//! `/ws/play?cols=3&rows=3&pixels=--o------&startDirection=NORTH`.

use actix_web::web;

use crate::server::playground::session::ws_play;

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/ws/play").to(ws_play));
}
