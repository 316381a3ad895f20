/// Level configuration constants.
///
/// Defaults used by the level loader when the optional start parameters are absent,
/// and the symbols accepted in a level layout.
use crate::game::direction::Direction;

/// Heading of the agent when `startDirection` is not given.
pub const DEFAULT_START_DIRECTION: Direction = Direction::North;

/// Column of the agent when `startCol` is not given.
pub const DEFAULT_START_COL: i32 = 0;

/// Row of the agent when `startRow` is not given.
pub const DEFAULT_START_ROW: i32 = 0;

/// Layout symbols for a solid wall (case-insensitive).
pub const WALL_SYMBOLS: [char; 2] = ['#', 'W'];

/// Layout symbol for an empty floor cell.
pub const FLOOR_SYMBOL: char = '-';

/// Layout symbol for a goal cell (case-insensitive).
pub const GOAL_SYMBOL: char = 'o';
