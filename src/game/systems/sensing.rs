//! Read-only sensing of neighbouring cells.

use crate::game::direction::Direction;
use crate::game::events::Event;
use crate::game::state::GameState;
use crate::game::types::Cell;

/// Look at the cell one step toward `direction` (the agent's own cell for `HERE`).
pub fn sense_cell(game_state: &mut GameState, direction: Direction) -> Cell {
    let position = game_state.position + direction;
    let cell = game_state.grid.cell(position);
    let id = game_state.grid.id_of(position);
    game_state.emit(Event::Sense { position, cell: id });
    cell
}
