//! Standalone mode: run one script against a level and play it back in the terminal.

use std::io;
use std::time::Instant;

use log::{info, warn};

use crate::config::playback::TICK_INTERVAL;
use crate::error::BlitError;
use crate::game::level::Level;
use crate::game::state::GameState;
use crate::game::systems::render_status;
use crate::playback::terminal::TerminalSink;
use crate::playback::{ActionQueue, Pose, Speed};
use crate::script::{Interpreter, RunSummary};

fn invalid_input(err: BlitError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, err)
}

/// A malformed level is bad input; anything failing later is bad data.
fn io_error(err: BlitError) -> io::Error {
    if err.is_fatal() {
        invalid_input(err)
    } else {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

/// Combine the script outcome with the playback outcome. A script error wins; a
/// refused playback is still logged so neither goes unreported.
fn settle(
    outcome: Result<RunSummary, BlitError>,
    playback: Result<Speed, BlitError>,
) -> io::Result<RunSummary> {
    match (outcome, playback) {
        (Ok(summary), Ok(_)) => Ok(summary),
        (Ok(_), Err(overflow)) => Err(io_error(overflow)),
        (Err(err), Ok(_)) => Err(io_error(err)),
        (Err(err), Err(overflow)) => {
            warn!("[Standalone] {}", overflow);
            Err(io_error(err))
        }
    }
}

/// Parse an optional speed argument, falling back to the default speed.
pub fn parse_speed(raw: Option<&str>) -> io::Result<Speed> {
    let Some(raw) = raw else {
        return Ok(Speed::default());
    };
    let value: f64 = raw.trim().parse().map_err(|e| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("speed '{raw}': {e}"))
    })?;
    Speed::new(value).map_err(invalid_input)
}

pub async fn run_standalone(
    level_query: &str,
    script_path: &str,
    speed: Option<&str>,
) -> io::Result<()> {
    let level = Level::from_query(level_query).map_err(io_error)?;
    let speed = parse_speed(speed)?;
    let source = tokio::fs::read_to_string(script_path).await?;
    info!(
        "[Standalone] Playing {} on a {}x{} level at speed {}",
        script_path,
        level.cols(),
        level.rows(),
        speed.value()
    );

    let mut interpreter = Interpreter::new(GameState::new(&level));
    let outcome = interpreter.run(&source);

    let mut queue = ActionQueue::new(Pose::at(level.start_position, level.start_direction));
    let changes = interpreter.take_speed_changes();
    // the admitted prefix is still played before an overflow is reported
    let playback = queue.enqueue_run(interpreter.take_events(), &changes, speed);

    let mut sink = TerminalSink::new(&level, io::stdout());
    sink.redraw("start");
    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    let mut last = Instant::now();
    while !queue.is_idle() {
        ticker.tick().await;
        let now = Instant::now();
        queue.tick(now.duration_since(last), &mut sink);
        last = now;
    }

    let state = interpreter.state();
    println!(
        "{}",
        render_status(state.grid(), state.position(), state.direction())
    );
    let summary = settle(outcome, playback)?;
    println!("{} events, status {:?}", summary.events, summary.status);
    Ok(())
}
