//! Level loader.
//!
//! A level arrives as URL query parameters (`cols`, `rows`, `pixels`, and optionally
//! `startCol`, `startRow`, `startDirection`). The `pixels` layout is written like a
//! picture: its first line is the top row of the board.

use std::borrow::Cow;

use log::debug;
use serde::Serialize;

use crate::config::game::{
    DEFAULT_START_COL, DEFAULT_START_DIRECTION, DEFAULT_START_ROW, FLOOR_SYMBOL, GOAL_SYMBOL,
    WALL_SYMBOLS,
};
use crate::error::{BlitError, LevelFormatError};
use crate::game::direction::Direction;
use crate::game::grid::Grid;
use crate::game::types::{Cell, Position};

/// Cells are addressed with `i32` coordinates, so neither side may exceed that range.
const MAX_SIDE: usize = i32::MAX as usize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Level {
    pub grid: Grid,
    pub start_position: Position,
    pub start_direction: Direction,
}

impl Level {
    /// Build a level from a layout string of `cols * rows` symbols, top row first.
    /// Whitespace in the layout is ignored.
    pub fn new(
        cols: usize,
        rows: usize,
        layout: &str,
        start_position: Position,
        start_direction: Direction,
    ) -> Result<Self, BlitError> {
        if cols == 0 || rows == 0 {
            return Err(LevelFormatError::EmptyGrid.into());
        }
        let expected = cols
            .checked_mul(rows)
            .filter(|_| cols <= MAX_SIDE && rows <= MAX_SIDE)
            .ok_or(LevelFormatError::TooLarge { cols, rows })?;
        let symbols = parse_symbols(layout)?;
        if symbols.len() != expected {
            return Err(LevelFormatError::Length {
                expected,
                actual: symbols.len(),
            }
            .into());
        }

        let mut cells = Vec::with_capacity(expected);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(symbols[(rows - row - 1) * cols + col]);
            }
        }
        let grid = Grid::from_cells(cols, rows, cells);

        if !grid.contains(start_position) {
            return Err(LevelFormatError::StartOutOfBounds {
                col: start_position.col,
                row: start_position.row,
            }
            .into());
        }
        if !start_direction.is_cardinal() {
            return Err(LevelFormatError::InvalidStartDirection(start_direction.to_string()).into());
        }

        debug!(
            "[Level] Loaded {}x{} level with {} goals, start {} facing {}",
            cols,
            rows,
            grid.goal_count(),
            start_position,
            start_direction
        );
        Ok(Level {
            grid,
            start_position,
            start_direction,
        })
    }

    /// Build a level from a URL query string such as
    /// `cols=3&rows=2&pixels=---o--&startDirection=EAST`.
    pub fn from_query(query: &str) -> Result<Self, BlitError> {
        let params = QueryParams::parse(query)?;

        let cols = params.required_number("cols")?;
        let rows = params.required_number("rows")?;
        let layout = params
            .get("pixels")
            .ok_or(LevelFormatError::MissingParameter("pixels"))?;
        let start_col = params.optional_number("startCol")?.unwrap_or(DEFAULT_START_COL);
        let start_row = params.optional_number("startRow")?.unwrap_or(DEFAULT_START_ROW);
        let start_direction = match params.get("startDirection") {
            Some(name) => parse_start_direction(name)?,
            None => DEFAULT_START_DIRECTION,
        };

        Level::new(
            cols,
            rows,
            layout,
            Position::new(start_col, start_row),
            start_direction,
        )
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }
}

fn parse_symbols(layout: &str) -> Result<Vec<Cell>, LevelFormatError> {
    layout
        .chars()
        .filter(|c| !c.is_whitespace())
        .enumerate()
        .map(|(offset, symbol)| {
            let normalized = symbol.to_ascii_uppercase();
            if WALL_SYMBOLS.contains(&normalized) {
                Ok(Cell::Wall)
            } else if symbol == FLOOR_SYMBOL {
                Ok(Cell::Floor)
            } else if symbol.eq_ignore_ascii_case(&GOAL_SYMBOL) {
                Ok(Cell::goal())
            } else {
                Err(LevelFormatError::UnknownSymbol { symbol, offset })
            }
        })
        .collect()
}

fn parse_start_direction(name: &str) -> Result<Direction, LevelFormatError> {
    Direction::CARDINALS
        .into_iter()
        .find(|d| d.name() == name)
        .ok_or_else(|| LevelFormatError::InvalidStartDirection(name.to_string()))
}

/// Decoded `key=value` pairs of a query string; later keys win.
struct QueryParams<'a> {
    pairs: Vec<(&'a str, Cow<'a, str>)>,
}

impl<'a> QueryParams<'a> {
    fn parse(query: &'a str) -> Result<Self, LevelFormatError> {
        let mut pairs = Vec::new();
        for kv in query.trim_start_matches('?').split('&').filter(|kv| !kv.is_empty()) {
            let (key, raw) = kv.split_once('=').unwrap_or((kv, ""));
            let value = urlencoding::decode(raw).map_err(|_| LevelFormatError::Encoding {
                param: key.to_string(),
            })?;
            pairs.push((key, value));
        }
        Ok(Self { pairs })
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_ref())
    }

    fn required_number<T: std::str::FromStr>(&self, key: &'static str) -> Result<T, LevelFormatError> {
        self.optional_number(key)?
            .ok_or(LevelFormatError::MissingParameter(key))
    }

    fn optional_number<T: std::str::FromStr>(
        &self,
        key: &'static str,
    ) -> Result<Option<T>, LevelFormatError> {
        self.get(key)
            .map(|value| {
                value.trim().parse().map_err(|_| LevelFormatError::InvalidNumber {
                    param: key,
                    value: value.to_string(),
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_read_top_row_first() {
        let level = Level::new(
            3,
            2,
            "--o
             #--",
            Position::new(0, 1),
            Direction::East,
        )
        .unwrap();
        assert_eq!(level.grid.cell(Position::new(0, 0)), Cell::Wall);
        assert_eq!(level.grid.cell(Position::new(2, 1)), Cell::goal());
        assert_eq!(level.grid.cell(Position::new(2, 0)), Cell::Floor);
    }

    #[test]
    fn wrong_length_names_both_lengths() {
        let err = Level::new(3, 3, "--------", Position::new(0, 0), Direction::North).unwrap_err();
        assert_eq!(
            err,
            BlitError::LevelFormat(LevelFormatError::Length {
                expected: 9,
                actual: 8
            })
        );
        assert!(err.is_fatal());
    }

    #[test]
    fn symbols_are_case_insensitive_and_unknown_ones_fail() {
        let level = Level::new(3, 1, "wO-", Position::new(2, 0), Direction::North).unwrap();
        assert_eq!(level.grid.cell(Position::new(0, 0)), Cell::Wall);
        assert_eq!(level.grid.cell(Position::new(1, 0)), Cell::goal());

        let err = Level::new(3, 1, "-x-", Position::new(0, 0), Direction::North).unwrap_err();
        assert_eq!(
            err,
            BlitError::LevelFormat(LevelFormatError::UnknownSymbol { symbol: 'x', offset: 1 })
        );
    }

    #[test]
    fn start_must_be_inside_the_grid_and_cardinal() {
        assert!(matches!(
            Level::new(2, 2, "----", Position::new(2, 0), Direction::North),
            Err(BlitError::LevelFormat(LevelFormatError::StartOutOfBounds { col: 2, row: 0 }))
        ));
        assert!(matches!(
            Level::new(2, 2, "----", Position::new(0, 0), Direction::Here),
            Err(BlitError::LevelFormat(LevelFormatError::InvalidStartDirection(_)))
        ));
        assert_eq!(
            Level::new(0, 2, "", Position::new(0, 0), Direction::North),
            Err(BlitError::LevelFormat(LevelFormatError::EmptyGrid))
        );
    }

    #[test]
    fn query_parameters_are_decoded_with_defaults() {
        let level =
            Level::from_query("?cols=3&rows=2&pixels=--o%0A%23--&startCol=1&startDirection=WEST")
                .unwrap();
        assert_eq!(level.cols(), 3);
        assert_eq!(level.rows(), 2);
        assert_eq!(level.start_position, Position::new(1, 0));
        assert_eq!(level.start_direction, Direction::West);
        assert_eq!(level.grid.cell(Position::new(0, 0)), Cell::Wall);

        let level = Level::from_query("cols=1&rows=1&pixels=-").unwrap();
        assert_eq!(level.start_position, Position::new(0, 0));
        assert_eq!(level.start_direction, Direction::North);
    }

    #[test]
    fn query_errors_name_the_parameter() {
        assert_eq!(
            Level::from_query("rows=1&pixels=-"),
            Err(BlitError::LevelFormat(LevelFormatError::MissingParameter("cols")))
        );
        assert_eq!(
            Level::from_query("cols=1&rows=1"),
            Err(BlitError::LevelFormat(LevelFormatError::MissingParameter("pixels")))
        );
        assert_eq!(
            Level::from_query("cols=abc&rows=1&pixels=-"),
            Err(BlitError::LevelFormat(LevelFormatError::InvalidNumber {
                param: "cols",
                value: "abc".to_string()
            }))
        );
        assert!(matches!(
            Level::from_query("cols=1&rows=1&pixels=-&startDirection=LEFT"),
            Err(BlitError::LevelFormat(LevelFormatError::InvalidStartDirection(_)))
        ));
    }

    #[test]
    fn oversized_dimensions_are_rejected_before_reading_the_layout() {
        assert_eq!(
            Level::from_query("cols=4294967296&rows=4294967296&pixels=-"),
            Err(BlitError::LevelFormat(LevelFormatError::TooLarge {
                cols: 4294967296,
                rows: 4294967296
            }))
        );
        assert_eq!(
            Level::from_query("cols=2147483648&rows=1&pixels="),
            Err(BlitError::LevelFormat(LevelFormatError::TooLarge {
                cols: 2147483648,
                rows: 1
            }))
        );
        assert!(matches!(
            Level::from_query(&format!("cols={}&rows=2&pixels=", usize::MAX / 2 + 1)),
            Err(BlitError::LevelFormat(LevelFormatError::TooLarge { .. }))
        ));
    }
}
