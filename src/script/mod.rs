//! Script interpreter.
//!
//! User scripts run in a locked-down rhai engine that only knows the agent
//! primitives, the direction names and `range(n)`.

pub mod bindings;
pub mod interpreter;

pub use interpreter::{Interpreter, RunSummary};
