use super::parse_date;
use crate::error::{Error, ErrorKind};
use exn::ResultExt;
use time::Date;

/// Pages read in a single increment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEntry {
    pub id: u64,
    pub book_id: u32,
    pub date: Date,
    /// The increment itself, not the page reached.
    pub pages: u32,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct TrackRow {
    pub(crate) track_id: i64,
    pub(crate) date: String,
    pub(crate) pages: i64,
    pub(crate) book_id: i64,
}
impl TryFrom<TrackRow> for TrackEntry {
    type Error = Error;
    fn try_from(row: TrackRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: u64::try_from(row.track_id).or_raise(|| ErrorKind::InvalidData("track id"))?,
            book_id: u32::try_from(row.book_id).or_raise(|| ErrorKind::InvalidData("book id"))?,
            date: parse_date(&row.date, "track date")?,
            pages: u32::try_from(row.pages).or_raise(|| ErrorKind::InvalidData("track pages"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_row_to_model() {
        let row = TrackRow { track_id: 7, date: "2024-05-01".to_string(), pages: 25, book_id: 2 };
        let entry = TrackEntry::try_from(row).unwrap();
        assert_eq!(entry, TrackEntry { id: 7, book_id: 2, date: date!(2024 - 05 - 01), pages: 25 });
    }

    #[test]
    fn test_negative_pages() {
        let row = TrackRow { track_id: 1, date: "2024-05-01".to_string(), pages: -5, book_id: 2 };
        let err = TrackEntry::try_from(row).unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidData("track pages"));
    }
}
