//! Terminal presentation: redraws the board each time an animation finishes.

use std::io::Write;

use log::warn;

use crate::game::grid::Grid;
use crate::game::level::Level;
use crate::game::systems::{render_grid, render_status};
use crate::game::types::Cell;
use crate::playback::animation::{Effect, Pose};
use crate::playback::sink::{Frame, PresentationSink};

/// Keeps its own copy of the board, updated only from frames.
pub struct TerminalSink<W: Write> {
    board: Grid,
    pristine: Grid,
    pose: Pose,
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(level: &Level, out: W) -> Self {
        TerminalSink {
            board: level.grid.clone(),
            pristine: level.grid.clone(),
            pose: Pose::at(level.start_position, level.start_direction),
            out,
        }
    }

    pub fn redraw(&mut self, caption: &str) {
        let board = render_grid(&self.board, Some((self.pose.cell(), self.pose.heading())));
        let status = render_status(&self.board, self.pose.cell(), self.pose.heading());
        if let Err(err) = write!(self.out, "{board}{status} | {caption}\n\n") {
            warn!("[Terminal] Failed to draw: {}", err);
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PresentationSink for TerminalSink<W> {
    fn snap(&mut self, pose: Pose) {
        self.board = self.pristine.clone();
        self.pose = pose;
        self.redraw("reset");
    }

    fn draw(&mut self, frame: &Frame) {
        self.pose = frame.pose;
        if !frame.finished {
            return;
        }
        if let Effect::Mark { cell, .. } = frame.effect {
            if self.board.contains(self.board.position_of(cell)) {
                *self.board.cell_mut(cell) = Cell::Goal { marked: true };
            }
        }
        self.redraw(&format!("{:?}", frame.kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::Direction;
    use crate::game::events::Event;
    use crate::game::types::{CellId, Position};
    use crate::playback::{ActionQueue, Speed};
    use std::time::Duration;

    #[test]
    fn finished_frames_redraw_the_board() {
        let level = Level::new(2, 1, "-o", Position::new(0, 0), Direction::East).unwrap();
        let mut queue = ActionQueue::new(Pose::at(level.start_position, level.start_direction));
        queue
            .enqueue_all(
                vec![
                    Event::Move {
                        from: Position::new(0, 0),
                        to: Position::new(1, 0),
                    },
                    Event::Mark {
                        cell: CellId(1),
                        position: Position::new(1, 0),
                        marked: 1,
                    },
                ],
                Speed::default(),
            )
            .unwrap();

        let mut sink = TerminalSink::new(&level, Vec::new());
        while !queue.is_idle() {
            queue.tick(Duration::from_secs(1), &mut sink);
        }
        let text = String::from_utf8(sink.into_inner()).unwrap();
        let frames: Vec<&str> = text.split("\n\n").filter(|s| !s.is_empty()).collect();
        assert_eq!(frames.len(), 2);
        assert!(frames[0].starts_with("  =>\n"), "{text}");
        assert!(frames[1].contains("goals 1/1 | Mark"), "{text}");
    }
}
