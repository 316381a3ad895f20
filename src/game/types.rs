use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::game::direction::Direction;

/// Grid coordinates; row 0 is the bottom row. Out-of-grid values are legal and are
/// treated as solid walls by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub col: i32,
    pub row: i32,
}

impl Position {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn distance_to(self, other: Position) -> f64 {
        let d_col = (other.col - self.col) as f64;
        let d_row = (other.row - self.row) as f64;
        d_col.hypot(d_row)
    }
}

impl Add<Direction> for Position {
    type Output = Position;

    fn add(self, rhs: Direction) -> Self::Output {
        let (d_col, d_row) = rhs.delta();
        Position {
            col: self.col + d_col,
            row: self.row + d_row,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Stable identity of a cell: its index in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub usize);

/// Kind of a grid cell. Only the `marked` flag of a goal ever changes after loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Cell {
    Wall,
    Floor,
    Goal { marked: bool },
}

impl Cell {
    pub fn goal() -> Self {
        Cell::Goal { marked: false }
    }

    pub fn is_solid(&self) -> bool {
        matches!(self, Cell::Wall)
    }

    pub fn is_goal(&self) -> bool {
        matches!(self, Cell::Goal { .. })
    }

    pub fn is_marked(&self) -> bool {
        matches!(self, Cell::Goal { marked: true })
    }
}

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Ready,
    Running,
    Won,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adding_a_direction_moves_one_cell() {
        let origin = Position::new(2, 2);
        assert_eq!(origin + Direction::North, Position::new(2, 3));
        assert_eq!(origin + Direction::East, Position::new(3, 2));
        assert_eq!(origin + Direction::South, Position::new(2, 1));
        assert_eq!(origin + Direction::West, Position::new(1, 2));
        assert_eq!(origin + Direction::Here, origin);
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(Position::new(0, 0).distance_to(Position::new(3, 4)), 5.0);
        assert_eq!(Position::new(1, 1).distance_to(Position::new(1, 1)), 0.0);
    }

    #[test]
    fn only_walls_are_solid_and_only_goals_mark() {
        assert!(Cell::Wall.is_solid());
        assert!(!Cell::Floor.is_solid());
        assert!(!Cell::goal().is_solid());
        assert!(!Cell::goal().is_marked());
        assert!(Cell::Goal { marked: true }.is_marked());
        assert!(!Cell::Wall.is_goal());
    }
}
