//! Line differ
//!
//! Aligns two line sequences by their longest common subsequence and
//! classifies every line as unchanged, added or removed. The engine is a pure
//! function: no I/O, no shared state, safe to call from any thread.

mod engine;
mod lines;
mod rows;
mod stats;
mod types;

pub use engine::{
    Algorithm, DEFAULT_MAX_TABLE_CELLS, DiffOptions, compare, compare_text, compare_with,
};
pub use lines::LineSequence;
pub(crate) use lines::is_line_break;
pub use rows::group_into_rows;
pub use stats::{Stats, calculate_stats};
pub use types::{ChangeKind, DiffRecord, DiffResult, DiffRow};
