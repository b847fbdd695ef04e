//! Plain-text rendering for the terminal.
//!
//! Everything here renders to a `String` (or implements [`Display`](std::fmt::Display))
//! so that callers decide where output goes and tests can compare it exactly.

mod history;
mod progress;
mod table;

pub use crate::history::History;
pub use crate::progress::ProgressBar;
pub use crate::table::Table;

/// Spacing between and around table columns.
pub const COLUMN_SPACE: usize = 1;
