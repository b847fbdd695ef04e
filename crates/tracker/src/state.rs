//! Book lifecycle states and listing filters.
//!
//! A book is always in exactly one [`BookState`]. Listing queries use a
//! separate [`StateFilter`] so that "show everything" is never confused with
//! a mistyped state name.

use crate::error::{Error, ErrorKind};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Lifecycle phase of a book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BookState {
    /// Currently being read. Only open books accept page increments.
    #[default]
    Open,
    /// Every page has been read.
    Finished,
    /// Queued, not started yet.
    Pending,
}
impl BookState {
    /// Integer stored in the `books.state` column.
    pub fn as_i64(&self) -> i64 {
        match self {
            Self::Open => 0,
            Self::Finished => 1,
            Self::Pending => 2,
        }
    }

    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Open),
            1 => Some(Self::Finished),
            2 => Some(Self::Pending),
            _ => None,
        }
    }

    /// Upper-case name shown in listings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Finished => "FINISHED",
            Self::Pending => "PENDING",
        }
    }
}
impl FromStr for BookState {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "open" | "o" | "0" => Self::Open,
            "finished" | "f" | "1" => Self::Finished,
            "pending" | "p" | "2" => Self::Pending,
            _ => exn::bail!(ErrorKind::InvalidState(s.to_string())),
        })
    }
}
impl Display for BookState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Which states a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateFilter {
    /// Books in every state.
    All,
    Only(BookState),
}
impl Default for StateFilter {
    fn default() -> Self {
        Self::Only(BookState::Open)
    }
}
impl From<BookState> for StateFilter {
    fn from(state: BookState) -> Self {
        Self::Only(state)
    }
}
impl FromStr for StateFilter {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "a" | "none" | "n" | "3" => Ok(Self::All),
            _ => s.parse::<BookState>().map(Self::Only),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("open", BookState::Open)]
    #[case("O", BookState::Open)]
    #[case("0", BookState::Open)]
    #[case("Finished", BookState::Finished)]
    #[case("f", BookState::Finished)]
    #[case("1", BookState::Finished)]
    #[case("PENDING", BookState::Pending)]
    #[case("p", BookState::Pending)]
    fn test_parse_state(#[case] input: &str, #[case] expected: BookState) {
        assert_eq!(input.parse::<BookState>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("3")]
    #[case("none")]
    #[case("finish")]
    #[case("opened")]
    #[case(" 2 ")]
    #[case("open ")]
    fn test_parse_state_invalid(#[case] input: &str) {
        let err = input.parse::<BookState>().unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidState(input.to_string()));
    }

    #[rstest]
    #[case("all", StateFilter::All)]
    #[case("A", StateFilter::All)]
    #[case("none", StateFilter::All)]
    #[case("3", StateFilter::All)]
    #[case("open", StateFilter::Only(BookState::Open))]
    #[case("p", StateFilter::Only(BookState::Pending))]
    fn test_parse_filter(#[case] input: &str, #[case] expected: StateFilter) {
        assert_eq!(input.parse::<StateFilter>().unwrap(), expected);
    }

    #[test]
    fn test_parse_filter_invalid() {
        assert!("everything".parse::<StateFilter>().is_err());
        assert!(" all".parse::<StateFilter>().is_err());
    }

    #[test]
    fn test_default_filter_is_open() {
        assert_eq!(StateFilter::default(), StateFilter::Only(BookState::Open));
    }

    #[rstest]
    #[case(BookState::Open)]
    #[case(BookState::Finished)]
    #[case(BookState::Pending)]
    fn test_stored_integer(#[case] state: BookState) {
        assert_eq!(BookState::from_i64(state.as_i64()), Some(state));
    }

    #[test]
    fn test_unknown_stored_integer() {
        assert_eq!(BookState::from_i64(3), None);
        assert_eq!(BookState::from_i64(-1), None);
    }
}
