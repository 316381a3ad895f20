//! Events emitted by the simulation.
//!
//! An event records one completed (or attempted) transition with the values captured
//! at emission time. Events are the only thing the playback queue ever sees of the
//! simulation, and they carry no rendering detail.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::direction::Direction;
use crate::game::types::{CellId, Position};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    Turn { from: Direction, to: Direction },
    Move { from: Position, to: Position },
    Blocked { from: Position, attempted: Position },
    /// `cell` is `None` when the sensed position lies outside the grid.
    Sense { position: Position, cell: Option<CellId> },
    Mark { cell: CellId, position: Position, marked: usize },
    GoalReached { total: usize },
    Win,
    Reset { position: Position, direction: Direction },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Turn,
    Move,
    Blocked,
    Sense,
    Mark,
    GoalReached,
    Win,
    Reset,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Turn { .. } => EventKind::Turn,
            Event::Move { .. } => EventKind::Move,
            Event::Blocked { .. } => EventKind::Blocked,
            Event::Sense { .. } => EventKind::Sense,
            Event::Mark { .. } => EventKind::Mark,
            Event::GoalReached { .. } => EventKind::GoalReached,
            Event::Win => EventKind::Win,
            Event::Reset { .. } => EventKind::Reset,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Turn { from, to } => write!(f, "Turn from {from} to {to}"),
            Event::Move { from, to } => write!(f, "Move from {from} to {to}"),
            Event::Blocked { from, attempted } => {
                write!(f, "Blocked at {from} trying to reach {attempted}")
            }
            Event::Sense { position, .. } => write!(f, "Sense {position}"),
            Event::Mark { position, marked, .. } => write!(f, "Mark {position} ({marked} marked)"),
            Event::GoalReached { total } => write!(f, "All {total} goals marked"),
            Event::Win => f.write_str("Win!"),
            Event::Reset { position, direction } => write!(f, "Reset to {position} facing {direction}"),
        }
    }
}
