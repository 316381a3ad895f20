/// Script engine limits.
///
/// Every user script runs under these budgets; exceeding any of them aborts the run.
pub const MAX_OPERATIONS: u64 = 200_000;

/// Maximum nesting of script-defined function calls.
pub const MAX_CALL_LEVELS: usize = 64;

/// Maximum expression depth at global level and inside functions.
pub const MAX_EXPR_DEPTH: usize = 64;
pub const MAX_FN_EXPR_DEPTH: usize = 32;

/// Maximum length of any string built by a script.
pub const MAX_STRING_SIZE: usize = 4_096;

/// Maximum number of elements in any array built by a script.
pub const MAX_ARRAY_SIZE: usize = 10_000;
