use log::{debug, info};

use crate::game::direction::{Bearing, Direction};
use crate::game::events::Event;
use crate::game::grid::Grid;
use crate::game::level::Level;
use crate::game::systems::{mark_current_cell, move_agent, restore_start, sense_cell, turn_agent};
use crate::game::types::{Position, Status};

/// Authoritative simulation state: the grid, the agent and the events emitted since
/// the buffer was last cleared.
///
/// Every primitive is synchronous and leaves the agent inside the grid.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) grid: Grid,
    pub(crate) position: Position,
    pub(crate) direction: Direction,
    pub(crate) start_position: Position,
    pub(crate) start_direction: Direction,
    pub(crate) status: Status,
    pub(crate) in_run: bool,
    events: Vec<Event>,
}

impl GameState {
    pub fn new(level: &Level) -> Self {
        GameState {
            grid: level.grid.clone(),
            position: level.start_position,
            direction: level.start_direction,
            start_position: level.start_position,
            start_direction: level.start_direction,
            status: Status::Ready,
            in_run: false,
            events: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Concrete heading for `bearing`, always against the current heading.
    pub fn resolve(&self, bearing: impl Into<Bearing>) -> Direction {
        bearing.into().resolve(self.direction)
    }

    pub fn turn_to(&mut self, bearing: impl Into<Bearing>) {
        let target = self.resolve(bearing);
        turn_agent(self, target);
    }

    /// Walk `steps` cells (backwards when negative); returns the number of cells
    /// actually crossed before the first obstacle.
    pub fn move_by(&mut self, bearing: impl Into<Bearing>, steps: i64) -> usize {
        let target = self.resolve(bearing);
        move_agent(self, target, steps)
    }

    pub fn sense_solid(&mut self, bearing: impl Into<Bearing>) -> bool {
        let target = self.resolve(bearing);
        sense_cell(self, target).is_solid()
    }

    pub fn sense_marked(&mut self, bearing: impl Into<Bearing>) -> bool {
        let target = self.resolve(bearing);
        sense_cell(self, target).is_marked()
    }

    /// Mark the goal under the agent; returns whether anything changed.
    pub fn mark(&mut self) -> bool {
        mark_current_cell(self)
    }

    pub fn reset(&mut self) {
        restore_start(self);
        info!(
            "[Game] Reset to {} facing {}",
            self.start_position, self.start_direction
        );
    }

    /// Start a script run: the event buffer only ever holds one run.
    pub fn begin_run(&mut self) {
        self.events.clear();
        self.in_run = true;
        if self.status == Status::Ready {
            self.status = Status::Running;
        }
    }

    pub fn end_run(&mut self) {
        self.in_run = false;
        if self.status == Status::Running {
            self.status = Status::Ready;
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: Event) {
        debug!("[Game] {}", event);
        self.events.push(event);
    }
}
