/// WebSocket session for the playground.
///
/// Each connection owns its own game, script interpreter and action queue. Scripts run
/// to completion inside the actor as soon as they arrive; their events are queued and
/// streamed back one frame per tick.
use std::time::Instant;

use actix::prelude::*;
use actix_web::{http::StatusCode, web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{error, info, warn};
use uuid::Uuid;

use super::messages::{ClientWsMessage, ServerWsMessage};
use crate::config::playback::TICK_INTERVAL;
use crate::error::BlitError;
use crate::game::events::Event;
use crate::game::level::Level;
use crate::game::state::GameState;
use crate::playback::{ActionQueue, Frame, Pose, PresentationSink, Speed};
use crate::script::Interpreter;
use crate::server::ws_error::{http_error_response, ws_error_message};

pub struct PlaygroundSession {
    pub session_id: Uuid,
    level: Level,
    interpreter: Interpreter,
    queue: ActionQueue,
    speed: Speed,
    last_tick: Instant,
}

impl PlaygroundSession {
    pub fn new(level: Level) -> Self {
        let interpreter = Interpreter::new(GameState::new(&level));
        let queue = ActionQueue::new(Pose::at(level.start_position, level.start_direction));
        Self {
            session_id: Uuid::new_v4(),
            level,
            interpreter,
            queue,
            speed: Speed::default(),
            last_tick: Instant::now(),
        }
    }

    fn send(&self, ctx: &mut ws::WebsocketContext<Self>, msg: &ServerWsMessage) {
        match serde_json::to_string(msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                // Serialization error: notify client and close connection.
                error!("[Playground] Failed to serialize ServerWsMessage: {}", e);
                ctx.text(ws_error_message("INTERNAL", "Internal server error"));
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Error,
                    description: Some("Internal server error".into()),
                }));
                ctx.stop();
            }
        }
    }

    fn send_error(&self, ctx: &mut ws::WebsocketContext<Self>, err: &BlitError) {
        self.send(
            ctx,
            &ServerWsMessage::Error {
                code: err.code().to_string(),
                message: err.to_string(),
            },
        );
    }

    fn enqueue(&mut self, events: Vec<Event>, ctx: &mut ws::WebsocketContext<Self>) {
        if let Err(err) = self.queue.enqueue_all(events, self.speed) {
            warn!("[Playground] Session {}: {}", self.session_id, err);
            self.send_error(ctx, &err);
        }
    }

    fn run_script(&mut self, script: &str, ctx: &mut ws::WebsocketContext<Self>) {
        let outcome = self.interpreter.run(script);
        // events of a failed run are still played up to the failure
        let events = self.interpreter.take_events();
        let changes = self.interpreter.take_speed_changes();
        match self.queue.enqueue_run(events, &changes, self.speed) {
            Ok(speed) if speed != self.speed => {
                self.speed = speed;
                self.send(
                    ctx,
                    &ServerWsMessage::SpeedChanged {
                        speed: speed.value(),
                    },
                );
            }
            Ok(_) => {}
            Err(err) => {
                warn!("[Playground] Session {}: {}", self.session_id, err);
                self.send_error(ctx, &err);
            }
        }
        match outcome {
            Ok(summary) => self.send(ctx, &ServerWsMessage::RunFinished(summary)),
            Err(err) => self.send_error(ctx, &err),
        }
    }

    fn set_speed(&mut self, speed: f64, ctx: &mut ws::WebsocketContext<Self>) {
        match Speed::new(speed) {
            Ok(speed) => {
                self.speed = speed;
                self.send(
                    ctx,
                    &ServerWsMessage::SpeedChanged {
                        speed: speed.value(),
                    },
                );
            }
            Err(err) => self.send_error(ctx, &err),
        }
    }

    fn reset(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        self.interpreter.reset();
        let events = self.interpreter.take_events();
        self.enqueue(events, ctx);
        if self.speed != Speed::default() {
            self.speed = Speed::default();
            self.send(
                ctx,
                &ServerWsMessage::SpeedChanged {
                    speed: self.speed.value(),
                },
            );
        }
    }

    fn tick(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;

        let mut outbox = Outbox::default();
        self.queue.tick(elapsed, &mut outbox);
        for msg in &outbox.messages {
            self.send(ctx, msg);
        }
    }

    fn ready_message(&self) -> ServerWsMessage {
        let grid = &self.level.grid;
        ServerWsMessage::Ready {
            session_id: self.session_id,
            level: self.level.clone(),
            tints: grid
                .cells()
                .map(|(id, _)| grid.tint(grid.position_of(id)))
                .collect(),
            speed: self.speed.value(),
        }
    }
}

/// Collects what one tick produced, to be sent once the queue is released.
#[derive(Default)]
struct Outbox {
    messages: Vec<ServerWsMessage>,
}

impl PresentationSink for Outbox {
    fn snap(&mut self, pose: Pose) {
        self.messages.push(ServerWsMessage::Snap { pose });
    }

    fn draw(&mut self, frame: &Frame) {
        self.messages.push(ServerWsMessage::Frame(frame.clone()));
    }
}

impl Actor for PlaygroundSession {
    type Context = ws::WebsocketContext<Self>;

    /// Greets the client with the level and starts the playback ticker.
    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            "[Playground] Session {} started on a {}x{} level",
            self.session_id,
            self.level.cols(),
            self.level.rows()
        );
        let ready = self.ready_message();
        self.send(ctx, &ready);
        self.last_tick = Instant::now();
        ctx.run_interval(TICK_INTERVAL, |act, ctx| act.tick(ctx));
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!(
            "[Playground] Session {} closed with {} animations pending",
            self.session_id,
            self.queue.len()
        );
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for PlaygroundSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => match serde_json::from_str::<ClientWsMessage>(&text) {
                Ok(ClientWsMessage::Run { script }) => self.run_script(&script, ctx),
                Ok(ClientWsMessage::SetSpeed { speed }) => self.set_speed(speed, ctx),
                Ok(ClientWsMessage::Reset) => self.reset(ctx),
                Ok(ClientWsMessage::Ping) => self.send(ctx, &ServerWsMessage::Pong),
                Err(e) => {
                    warn!(
                        "[Playground] Session {}: invalid client message: {}",
                        self.session_id, e
                    );
                    ctx.text(ws_error_message("INVALID_MESSAGE", "Invalid client message"));
                }
            },
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(e) => {
                warn!("[Playground] Session {}: protocol error: {}", self.session_id, e);
                ctx.stop();
            }
            _ => (),
        }
    }
}

/// WebSocket endpoint for the playground.
///
/// The query string is the level (see `Level::from_query`); a malformed level is
/// refused with a 400 before the upgrade.
pub async fn ws_play(req: HttpRequest, stream: web::Payload) -> Result<HttpResponse, Error> {
    let level = match Level::from_query(req.query_string()) {
        Ok(level) => level,
        Err(err) => {
            warn!("[Playground] Refused connection: {}", err);
            return Ok(http_error_response(&err, StatusCode::BAD_REQUEST));
        }
    };
    ws::start(PlaygroundSession::new(level), &req, stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::Direction;
    use crate::game::types::Position;
    use std::time::Duration;

    #[test]
    fn outbox_collects_snaps_and_frames() {
        let mut queue = ActionQueue::new(Pose::at(Position::new(0, 0), Direction::North));
        queue
            .enqueue_all(
                vec![
                    Event::Turn {
                        from: Direction::North,
                        to: Direction::East,
                    },
                    Event::Reset {
                        position: Position::new(0, 0),
                        direction: Direction::North,
                    },
                    Event::Turn {
                        from: Direction::North,
                        to: Direction::West,
                    },
                ],
                Speed::default(),
            )
            .unwrap();

        let mut outbox = Outbox::default();
        queue.tick(Duration::from_secs(5), &mut outbox);
        assert!(matches!(outbox.messages[0], ServerWsMessage::Snap { .. }));
        assert!(
            matches!(&outbox.messages[1], ServerWsMessage::Frame(frame) if frame.finished)
        );
        assert_eq!(outbox.messages.len(), 2);
        assert!(queue.is_idle());
    }

    #[test]
    fn ready_message_carries_one_tint_per_cell() {
        let level = Level::from_query("cols=3&rows=2&pixels=--o%23--").unwrap();
        let session = PlaygroundSession::new(level);
        match session.ready_message() {
            ServerWsMessage::Ready { tints, speed, .. } => {
                assert_eq!(tints.len(), 6);
                assert_eq!(speed, Speed::default().value());
            }
            other => panic!("unexpected message {other:?}"),
        }
    }
}
