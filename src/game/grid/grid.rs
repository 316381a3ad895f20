use serde::{Deserialize, Serialize};

use crate::game::types::{Cell, CellId, Position};

/// Rectangular cell array, stored row by row starting at the bottom row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// `cells` must hold exactly `cols * rows` entries in bottom-to-top row order;
    /// the level loader checks this before building a grid.
    pub(crate) fn from_cells(cols: usize, rows: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), cols * rows);
        Self { cols, rows, cells }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn contains(&self, position: Position) -> bool {
        position.col >= 0
            && position.row >= 0
            && (position.col as usize) < self.cols
            && (position.row as usize) < self.rows
    }

    pub fn id_of(&self, position: Position) -> Option<CellId> {
        self.contains(position)
            .then(|| CellId(position.row as usize * self.cols + position.col as usize))
    }

    pub fn position_of(&self, id: CellId) -> Position {
        Position::new((id.0 % self.cols) as i32, (id.0 / self.cols) as i32)
    }

    /// The cell at `position`; anything outside the grid reads as a wall.
    pub fn cell(&self, position: Position) -> Cell {
        self.id_of(position)
            .map(|id| self.cells[id.0])
            .unwrap_or(Cell::Wall)
    }

    pub(crate) fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.0]
    }

    pub fn cells(&self) -> impl Iterator<Item = (CellId, &Cell)> {
        self.cells.iter().enumerate().map(|(i, cell)| (CellId(i), cell))
    }

    pub fn goal_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_goal()).count()
    }

    pub fn marked_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_marked()).count()
    }

    pub fn all_goals_marked(&self) -> bool {
        self.cells.iter().filter(|c| c.is_goal()).all(|c| c.is_marked())
    }

    pub(crate) fn clear_marks(&mut self) {
        for cell in self.cells.iter_mut() {
            if let Cell::Goal { marked } = cell {
                *marked = false;
            }
        }
    }

    /// Background colour of a cell as `0xRRGGBB`, a gradient over the board.
    pub fn tint(&self, position: Position) -> u32 {
        let r = (255 - position.row * 8).clamp(0, 255) as u32;
        let g = (255 - position.col * 8).clamp(0, 255) as u32;
        let b = (position.col * 8).clamp(0, 255) as u32;
        (r << 16) | (g << 8) | b
    }
}
