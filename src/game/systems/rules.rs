//! Goal marking, win detection and reset rules.

use log::info;

use crate::game::events::Event;
use crate::game::state::GameState;
use crate::game::types::{Cell, Status};

/// Mark the goal under the agent. Marking a non-goal or an already marked goal is a
/// no-op without event. Returns whether a goal was marked.
pub fn mark_current_cell(game_state: &mut GameState) -> bool {
    let position = game_state.position;
    let Some(id) = game_state.grid.id_of(position) else {
        return false;
    };
    let cell = game_state.grid.cell_mut(id);
    if *cell != (Cell::Goal { marked: false }) {
        return false;
    }
    *cell = Cell::Goal { marked: true };

    let marked = game_state.grid.marked_count();
    game_state.emit(Event::Mark {
        cell: id,
        position,
        marked,
    });
    apply_win_rule(game_state);
    true
}

/// Once every goal is marked, announce it and enter `Won`.
pub fn apply_win_rule(game_state: &mut GameState) {
    if game_state.status == Status::Won || !game_state.grid.all_goals_marked() {
        return;
    }
    let total = game_state.grid.goal_count();
    game_state.emit(Event::GoalReached { total });
    game_state.emit(Event::Win);
    game_state.status = Status::Won;
    info!("[Game] All {} goals marked, game won", total);
}

/// Put the agent back on its start cell, unmark every goal and leave `Won`.
pub fn restore_start(game_state: &mut GameState) {
    game_state.position = game_state.start_position;
    game_state.direction = game_state.start_direction;
    game_state.grid.clear_marks();
    game_state.status = if game_state.in_run {
        Status::Running
    } else {
        Status::Ready
    };
    game_state.emit(Event::Reset {
        position: game_state.start_position,
        direction: game_state.start_direction,
    });
}
