//! Agent movement system.
//!
//! Turning and stepping across the grid. Walls and the grid edge stop a move; the
//! remaining steps of that call are dropped.

use crate::game::direction::Direction;
use crate::game::events::Event;
use crate::game::state::GameState;
use crate::game::types::Position;

/// Face `target`. Turning toward `HERE` keeps the current heading.
pub fn turn_agent(game_state: &mut GameState, target: Direction) {
    if !target.is_cardinal() {
        return;
    }
    let from = game_state.direction;
    game_state.direction = target;
    game_state.emit(Event::Turn { from, to: target });
}

/// Step up to `|steps|` cells toward `direction` (away from it when `steps` is negative).
/// Returns the number of cells crossed.
pub fn move_agent(game_state: &mut GameState, direction: Direction, steps: i64) -> usize {
    if !direction.is_cardinal() {
        return 0;
    }
    let (direction, steps) = if steps < 0 {
        (direction.reverse(), steps.unsigned_abs())
    } else {
        (direction, steps as u64)
    };

    let mut taken = 0;
    for _ in 0..steps {
        if !step(game_state, direction) {
            break;
        }
        taken += 1;
    }
    taken
}

/// A single cell of movement; returns false (after emitting `Blocked`) when the
/// target cell is outside the grid or solid.
fn step(game_state: &mut GameState, direction: Direction) -> bool {
    let from = game_state.position;
    let target: Position = from + direction;
    let blocked = !game_state.grid.contains(target) || game_state.grid.cell(target).is_solid();
    if blocked {
        game_state.emit(Event::Blocked {
            from,
            attempted: target,
        });
        return false;
    }
    game_state.position = target;
    game_state.emit(Event::Move { from, to: target });
    true
}
