//! SQLite store and progress rules for the pirtuk reading tracker.
//!
//! # Architecture
//! The store holds two tables:
//! - **books**: one row per tracked book with its page count, the page
//!   reached so far, a category label and its [`BookState`].
//! - **book_track**: one row per successful page increment, recording the
//!   date and the number of pages read. Rows reference their book, so a book
//!   is deleted only after its history.
//!
//! All reads and writes go through [`Repository`], obtained from a connected
//! [`Database`].

mod db;
pub mod error;
mod models;
mod repo;
mod state;

pub use crate::db::Database;
pub use crate::models::{Book, NewBook, TrackEntry};
pub use crate::repo::{Progress, Repository, SkipReason};
pub use crate::state::{BookState, StateFilter};
