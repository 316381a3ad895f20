//! Text rendering of a board (terminal).
//!
//! Used by the standalone player to draw the board between animations.

use crate::game::direction::Direction;
use crate::game::grid::Grid;
use crate::game::types::{Cell, Position};

/// Draw the grid top row first, two characters per cell, with the agent on top.
pub fn render_grid(grid: &Grid, agent: Option<(Position, Direction)>) -> String {
    let mut out = String::new();
    for row in (0..grid.rows() as i32).rev() {
        for col in 0..grid.cols() as i32 {
            let position = Position::new(col, row);
            let symbol = match agent {
                Some((at, direction)) if at == position => agent_symbol(direction),
                _ => cell_symbol(grid.cell(position)),
            };
            out.push_str(symbol);
        }
        out.push('\n');
    }
    out
}

/// One-line summary of the agent and the goal counter.
pub fn render_status(grid: &Grid, position: Position, direction: Direction) -> String {
    format!(
        "Agent at {} facing {} | goals {}/{}",
        position,
        direction,
        grid.marked_count(),
        grid.goal_count()
    )
}

fn cell_symbol(cell: Cell) -> &'static str {
    match cell {
        Cell::Wall => "██",
        Cell::Floor => "  ",
        Cell::Goal { marked: false } => "()",
        Cell::Goal { marked: true } => "[]",
    }
}

fn agent_symbol(direction: Direction) -> &'static str {
    match direction {
        Direction::North => "/\\",
        Direction::East => "=>",
        Direction::South => "\\/",
        Direction::West => "<=",
        Direction::Here => "<>",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::level::Level;

    #[test]
    fn board_is_drawn_top_row_first_with_the_agent() {
        let level = Level::new(3, 2, "#-o---", Position::new(0, 0), Direction::East).unwrap();
        let text = render_grid(&level.grid, Some((Position::new(0, 0), Direction::East)));
        assert_eq!(text, "██  ()\n=>    \n");
    }

    #[test]
    fn status_line_counts_goals() {
        let level = Level::new(2, 1, "oo", Position::new(1, 0), Direction::West).unwrap();
        assert_eq!(
            render_status(&level.grid, Position::new(1, 0), Direction::West),
            "Agent at (1, 0) facing WEST | goals 0/2"
        );
    }
}
