mod book;
mod track;

pub use self::book::{Book, NewBook};
pub(crate) use self::book::BookRow;
pub use self::track::TrackEntry;
pub(crate) use self::track::TrackRow;

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Stored in `books.finish_date` while a book is not finished.
pub(crate) const NOT_FINISHED: &str = "-";

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub(crate) fn format_date(date: Date) -> Result<String> {
    date.format(DATE_FORMAT).or_raise(|| ErrorKind::InvalidData("date"))
}

pub(crate) fn parse_date(value: &str, field: &'static str) -> Result<Date> {
    Date::parse(value, DATE_FORMAT).or_raise(|| ErrorKind::InvalidData(field))
}
