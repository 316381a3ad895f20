//! Direction algebra.
//!
//! Absolute headings form a cyclic group of order 4 under right turns; `HERE` is the
//! degenerate zero displacement and is fixed by every turn. Relative turns are
//! expressed as a number of right turns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BlitError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    North,
    East,
    South,
    West,
    Here,
}

/// A turn relative to the current heading, as a count of right turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Turn {
    Forward = 0,
    Right = 1,
    Back = 2,
    Left = 3,
}

/// A direction as written in a script: either a fixed compass heading or a turn
/// that only becomes concrete against the agent's heading at the moment of use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bearing {
    Absolute(Direction),
    Relative(Turn),
}

impl Direction {
    /// The four cardinal headings in clockwise order starting at north.
    pub const CARDINALS: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit displacement as `(d_col, d_row)`; rows grow northwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
            Direction::Here => (0, 0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "NORTH",
            Direction::East => "EAST",
            Direction::South => "SOUTH",
            Direction::West => "WEST",
            Direction::Here => "HERE",
        }
    }

    pub fn is_cardinal(self) -> bool {
        self != Direction::Here
    }

    /// Heading reached after `right_turns` right turns (any sign, taken mod 4).
    pub fn rotate(self, right_turns: i64) -> Direction {
        match self.cardinal_index() {
            Some(index) => {
                let next = (index as i64 + right_turns).rem_euclid(4);
                Direction::CARDINALS[next as usize]
            }
            None => Direction::Here,
        }
    }

    pub fn turn(self, relative: Turn) -> Direction {
        self.rotate(relative as i64)
    }

    pub fn reverse(self) -> Direction {
        self.turn(Turn::Back)
    }

    /// Rotation in radians with north at zero, increasing clockwise.
    pub fn angle(self) -> f64 {
        let (d_col, d_row) = self.delta();
        f64::atan2(d_col as f64, d_row as f64)
    }

    fn cardinal_index(self) -> Option<usize> {
        Direction::CARDINALS.iter().position(|d| *d == self)
    }

    fn from_name(name: &str) -> Option<Direction> {
        match name {
            "NORTH" => Some(Direction::North),
            "EAST" => Some(Direction::East),
            "SOUTH" => Some(Direction::South),
            "WEST" => Some(Direction::West),
            "HERE" => Some(Direction::Here),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Turn {
    pub const ALL: [Turn; 4] = [Turn::Forward, Turn::Right, Turn::Back, Turn::Left];

    /// Reduce any number of right turns to one of the four relative turns.
    pub fn from_count(right_turns: i64) -> Turn {
        Turn::ALL[right_turns.rem_euclid(4) as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            Turn::Forward => "FORWARD",
            Turn::Right => "RIGHT",
            Turn::Back => "BACK",
            Turn::Left => "LEFT",
        }
    }

    fn from_name(name: &str) -> Option<Turn> {
        match name {
            "FORWARD" => Some(Turn::Forward),
            "RIGHT" => Some(Turn::Right),
            "BACK" => Some(Turn::Back),
            "LEFT" => Some(Turn::Left),
            _ => None,
        }
    }
}

impl Bearing {
    /// Every name a script may use as a direction.
    pub const NAMES: [&'static str; 9] = [
        "NORTH", "EAST", "SOUTH", "WEST", "HERE", "FORWARD", "RIGHT", "BACK", "LEFT",
    ];

    /// Concrete heading for this bearing given the agent's current heading.
    pub fn resolve(self, current: Direction) -> Direction {
        match self {
            Bearing::Absolute(direction) => direction,
            Bearing::Relative(turn) => current.turn(turn),
        }
    }
}

impl FromStr for Bearing {
    type Err = BlitError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Turn::from_name(name)
            .map(Bearing::Relative)
            .or_else(|| Direction::from_name(name).map(Bearing::Absolute))
            .ok_or_else(|| BlitError::InvalidDirection(name.to_string()))
    }
}

impl From<Direction> for Bearing {
    fn from(direction: Direction) -> Self {
        Bearing::Absolute(direction)
    }
}

impl From<Turn> for Bearing {
    fn from(turn: Turn) -> Self {
        Bearing::Relative(turn)
    }
}

/// Resolve a direction name against the agent's current heading.
pub fn resolve(name: &str, current: Direction) -> Result<Direction, BlitError> {
    Ok(name.parse::<Bearing>()?.resolve(current))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn four_right_turns_cycle_through_every_heading_once() {
        for start in Direction::CARDINALS {
            let mut seen = vec![start];
            let mut heading = start;
            for _ in 0..3 {
                heading = heading.turn(Turn::Right);
                assert!(!seen.contains(&heading));
                seen.push(heading);
            }
            assert_eq!(heading.turn(Turn::Right), start);
            assert_eq!(start.rotate(4), start);
        }
    }

    #[test]
    fn here_is_fixed_by_every_turn() {
        for turn in Turn::ALL {
            assert_eq!(Direction::Here.turn(turn), Direction::Here);
        }
        assert_eq!(Direction::Here.delta(), (0, 0));
    }

    #[test]
    fn relative_names_follow_the_current_heading() {
        assert_eq!(resolve("FORWARD", Direction::East).unwrap(), Direction::East);
        assert_eq!(resolve("RIGHT", Direction::East).unwrap(), Direction::South);
        assert_eq!(resolve("BACK", Direction::East).unwrap(), Direction::West);
        assert_eq!(resolve("LEFT", Direction::East).unwrap(), Direction::North);
        assert_eq!(resolve("WEST", Direction::East).unwrap(), Direction::West);
        assert_eq!(resolve("HERE", Direction::East).unwrap(), Direction::Here);
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(
            resolve("UP", Direction::North),
            Err(BlitError::InvalidDirection("UP".to_string()))
        );
        assert!(resolve("north", Direction::North).is_err());
    }

    #[test]
    fn angles_put_north_at_zero_and_turn_clockwise() {
        use std::f64::consts::{FRAC_PI_2, PI};
        assert_eq!(Direction::North.angle(), 0.0);
        assert!((Direction::East.angle() - FRAC_PI_2).abs() < 1e-12);
        assert!((Direction::South.angle() - PI).abs() < 1e-12);
        assert!((Direction::West.angle() + FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn every_script_name_parses() {
        for name in Bearing::NAMES {
            assert!(name.parse::<Bearing>().is_ok(), "{name}");
        }
    }

    proptest! {
        #[test]
        fn rotating_n_times_equals_rotating_n_mod_4(index in 0usize..4, n in -1_000i64..1_000) {
            let start = Direction::CARDINALS[index];
            prop_assert_eq!(start.rotate(n), start.rotate(n.rem_euclid(4)));
            prop_assert_eq!(start.rotate(n), start.turn(Turn::from_count(n)));
        }

        #[test]
        fn reverse_is_an_involution(index in 0usize..4) {
            let start = Direction::CARDINALS[index];
            prop_assert_eq!(start.reverse().reverse(), start);
            prop_assert_ne!(start.reverse(), start);
        }
    }
}
