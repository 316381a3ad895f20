//! Cell storage for a level: bounds, lookups and goal bookkeeping.

#[allow(clippy::module_inception)]
pub mod grid;

pub use grid::Grid;
