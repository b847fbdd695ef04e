//! Command-line surface.
//!
//! [`Cli`] is what clap parses; [`Plan`] is the validated list of things to
//! do. Every argument is checked before the database is opened, so a typo in
//! one flag never leaves the work of an earlier flag half-applied.

use crate::error::{ErrorKind, Result};
use clap::Parser;
use exn::ResultExt;
use pirtuk_tracker::{BookState, NewBook, StateFilter};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pirtuk", version, about = "Keep track of the books you are reading")]
pub struct Cli {
    /// Add new book
    #[arg(long, num_args = 3, value_names = ["TITLE", "PAGES", "CATEGORY"], allow_negative_numbers = true)]
    pub add: Option<Vec<String>>,
    /// List books with specific state (ex: open, finished, pending, all)
    #[arg(long, value_name = "STATE")]
    pub state: Option<String>,
    /// Show progress bar
    #[arg(short = 'v')]
    pub progress: bool,
    /// List all books
    #[arg(short = 'a')]
    pub all: bool,
    /// Set state for the book (ex: open, finished, pending)
    #[arg(long = "set-state", num_args = 2, value_names = ["BOOK_ID", "STATE"], allow_negative_numbers = true)]
    pub set_state: Option<Vec<String>>,
    /// Increase the current page for the book
    #[arg(long, num_args = 2, value_names = ["BOOK_ID", "PAGES"], allow_negative_numbers = true)]
    pub inc: Option<Vec<String>>,
    /// Delete the book
    #[arg(long, value_name = "BOOK_ID", allow_negative_numbers = true)]
    pub delete: Option<String>,
    /// List books with the specific category
    #[arg(long = "cat", value_name = "CATEGORY")]
    pub category: Option<String>,
    /// Show dates and pages in which the book has been read
    #[arg(long, value_name = "BOOK_ID", allow_negative_numbers = true)]
    pub track: Option<String>,
    /// Use this database file instead of the configured one
    #[arg(long, value_name = "PATH")]
    pub database: Option<PathBuf>,
    /// Read configuration from this file (TOML, YAML or JSON)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Validated work for one invocation, run in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub add: Option<NewBook>,
    pub set_state: Option<(u32, BookState)>,
    pub inc: Option<(u32, i64)>,
    pub delete: Option<u32>,
    pub view: View,
}

/// What gets printed once every write is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Track(u32),
    List { filter: StateFilter, category: Option<String>, progress: bool },
}

impl TryFrom<&Cli> for Plan {
    type Error = crate::error::Error;
    fn try_from(cli: &Cli) -> std::result::Result<Self, Self::Error> {
        let add = match cli.add.as_deref() {
            Some([title, pages, category]) => Some(new_book(title, pages, category)?),
            _ => None,
        };
        let set_state = match cli.set_state.as_deref() {
            Some([id, state]) => Some((book_id(id)?, state.parse::<BookState>().or_raise(|| ErrorKind::InvalidState)?)),
            _ => None,
        };
        let inc = match cli.inc.as_deref() {
            Some([id, pages]) => Some((book_id(id)?, page_count(pages)?)),
            _ => None,
        };
        let delete = cli.delete.as_deref().map(book_id).transpose()?;
        let view = match cli.track.as_deref() {
            Some(id) => View::Track(book_id(id)?),
            None => View::List { filter: filter(cli)?, category: cli.category.clone(), progress: cli.progress },
        };
        Ok(Self { add, set_state, inc, delete, view })
    }
}

/// `-a` wins over `--state`; without either, only open books are listed.
fn filter(cli: &Cli) -> Result<StateFilter> {
    if cli.all {
        return Ok(StateFilter::All);
    }
    match &cli.state {
        Some(state) => state.parse::<StateFilter>().or_raise(|| ErrorKind::InvalidState),
        None => Ok(StateFilter::default()),
    }
}

/// Every BOOK_ID flag goes through here, so a malformed id always exits with status 1.
fn book_id(value: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .or_raise(|| ErrorKind::InvalidArgument(format!("BOOK_ID must be a non-negative integer, got {value:?}")))
}

fn page_count(value: &str) -> Result<i64> {
    value
        .parse::<i64>()
        .or_raise(|| ErrorKind::InvalidArgument(format!("PAGES must be an integer, got {value:?}")))
}

fn new_book(title: &str, pages: &str, category: &str) -> Result<NewBook> {
    let pages = page_count(pages)?;
    let pages = u32::try_from(pages)
        .or_raise(|| ErrorKind::InvalidArgument(format!("PAGES must be a positive integer, got {pages}")))?;
    let book = NewBook::new(title, pages, category);
    if let Err(err) = book.validate() {
        exn::bail!(ErrorKind::InvalidArgument((*err).to_string()));
    }
    Ok(book)
}
