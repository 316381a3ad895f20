//! Grid simulation: direction algebra, cells, level loading and the game state machine.

pub mod direction;
pub mod events;
pub mod grid;
pub mod level;
pub mod state;
pub mod systems;
pub mod types;
