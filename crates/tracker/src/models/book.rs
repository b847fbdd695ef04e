use super::{NOT_FINISHED, format_date, parse_date};
use crate::error::{Error, ErrorKind, Result};
use crate::state::BookState;
use exn::{OptionExt, ResultExt};
use time::Date;

/// A tracked book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Reused after deletion: the smallest free non-negative integer at the
    /// time the book was added.
    pub id: u32,
    pub title: String,
    pub pages: u32,
    pub current_page: u32,
    pub category: String,
    pub state: BookState,
    pub started_on: Date,
    /// `None` unless the book is [`BookState::Finished`].
    pub finished_on: Option<Date>,
}
/// A book that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub pages: u32,
    pub category: String,
}
impl NewBook {
    pub fn new(title: impl Into<String>, pages: u32, category: impl Into<String>) -> Self {
        Self { title: title.into(), pages, category: category.into() }
    }

    /// Rejects books that could never be read to completion.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            exn::bail!(ErrorKind::InvalidBook("title must not be empty"));
        }
        if self.pages == 0 {
            exn::bail!(ErrorKind::InvalidBook("page count must be positive"));
        }
        Ok(())
    }

    /// The book as it is first stored: open, nothing read yet.
    pub fn open(self, id: u32, today: Date) -> Book {
        Book {
            id,
            title: self.title,
            pages: self.pages,
            current_page: 0,
            category: self.category,
            state: BookState::Open,
            started_on: today,
            finished_on: None,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct BookRow {
    pub(crate) book_id: i64,
    pub(crate) title: String,
    pub(crate) pages: i64,
    pub(crate) current_page: i64,
    pub(crate) category: String,
    pub(crate) state: i64,
    pub(crate) start_date: String,
    pub(crate) finish_date: String,
}
impl TryFrom<&Book> for BookRow {
    type Error = Error;
    fn try_from(book: &Book) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            book_id: i64::from(book.id),
            title: book.title.clone(),
            pages: i64::from(book.pages),
            current_page: i64::from(book.current_page),
            category: book.category.clone(),
            state: book.state.as_i64(),
            start_date: format_date(book.started_on)?,
            finish_date: match book.finished_on {
                Some(date) => format_date(date)?,
                None => NOT_FINISHED.to_string(),
            },
        })
    }
}
impl TryFrom<BookRow> for Book {
    type Error = Error;
    fn try_from(row: BookRow) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            id: u32::try_from(row.book_id).or_raise(|| ErrorKind::InvalidData("book id"))?,
            title: row.title,
            pages: u32::try_from(row.pages).or_raise(|| ErrorKind::InvalidData("pages"))?,
            current_page: u32::try_from(row.current_page).or_raise(|| ErrorKind::InvalidData("current page"))?,
            category: row.category,
            state: BookState::from_i64(row.state).ok_or_raise(|| ErrorKind::InvalidData("state"))?,
            started_on: parse_date(&row.start_date, "start date")?,
            finished_on: match row.finish_date.as_str() {
                NOT_FINISHED => None,
                date => Some(parse_date(date, "finish date")?),
            },
        })
    }
}
