//! CLI Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A command-line error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for command-line operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A state argument did not name a known state.
    #[display("invalid state")]
    InvalidState,
    /// An argument was well-formed for the parser but unusable.
    #[display("invalid argument: {_0}")]
    InvalidArgument(#[error(not(source))] String),
    #[display("could not load configuration")]
    Config,
    #[display("could not access the book database")]
    Tracker,
    #[display("could not write to stdout")]
    Output,
}

impl ErrorKind {
    /// Errors caused by what was typed, reported with their message only.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidState | Self::InvalidArgument(_))
    }
}
