//! Repository for books and their reading history.
//!
//! Books and track entries are tightly coupled: a track entry is only ever
//! written together with the page update it records, and a book can only be
//! deleted after its track entries. Every operation that touches more than
//! one row runs in a single transaction, which rolls back when dropped early.

use crate::Database;
use crate::error::{ErrorKind, Result};
use crate::models::{Book, BookRow, NOT_FINISHED, NewBook, TrackEntry, TrackRow, format_date};
use crate::state::{BookState, StateFilter};
use derive_more::Display;
use exn::ResultExt;
use sqlx::{SqliteConnection, SqlitePool};
use time::Date;
use tracing::instrument;

/// Result of an increment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The pages were added and a track entry written.
    Recorded {
        current_page: u32,
        /// The increment reached the last page and closed the book.
        finished: bool,
    },
    /// Nothing was written.
    Skipped(SkipReason),
}

/// Why an increment left the store untouched.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    #[display("book not found")]
    NotFound,
    /// Zero or negative page count.
    #[display("page count must be positive")]
    NonPositive,
    /// Only open books can make progress.
    #[display("book is {_0}, not OPEN")]
    NotOpen(BookState),
    /// The increment would read past the last page.
    #[display("{requested} pages would pass the last page (at {current_page} of {pages})")]
    Overflow { current_page: u32, pages: u32, requested: i64 },
}

/// Smallest non-negative id missing from `ids`, which must be sorted ascending.
pub(crate) fn find_free_id(ids: &[i64]) -> Result<u32> {
    let mut candidate: i64 = 0;
    for &id in ids {
        if id > candidate {
            break;
        }
        if id == candidate {
            candidate += 1;
        }
    }
    u32::try_from(candidate).or_raise(|| ErrorKind::InvalidData("book id"))
}

/// Repository for managing books and track entries.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}
impl From<&Database> for Repository {
    fn from(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }
}
impl Repository {
    // =========================================================================
    // Insert
    // =========================================================================

    /// Store a new open book and return it with its allocated id.
    ///
    /// The id is the smallest non-negative integer not used by any stored
    /// book, so ids of deleted books are handed out again.
    #[instrument(skip(self, book), fields(title = %book.title, pages = book.pages))]
    pub async fn add(&self, book: NewBook, today: Date) -> Result<Book> {
        book.validate()?;
        let mut tx = self.pool.begin().await.or_raise(|| ErrorKind::Database)?;
        let ids: Vec<i64> = sqlx::query_scalar(include_str!("../queries/list_book_ids.sql"))
            .fetch_all(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        let book = book.open(find_free_id(&ids)?, today);
        let row = BookRow::try_from(&book)?;
        sqlx::query(include_str!("../queries/insert_book.sql"))
            .bind(row.book_id)
            .bind(row.title)
            .bind(row.pages)
            .bind(row.current_page)
            .bind(row.category)
            .bind(row.state)
            .bind(row.start_date)
            .bind(row.finish_date)
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        tx.commit().await.or_raise(|| ErrorKind::Database)?;
        tracing::debug!(id = book.id, "added book");
        Ok(book)
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Add `pages` to a book's current page and record the increment.
    ///
    /// The page update, the track entry and (when the last page is reached)
    /// the switch to [`BookState::Finished`] are committed together. Requests
    /// that fail a precondition write nothing and report why.
    #[instrument(skip(self))]
    pub async fn inc(&self, book_id: u32, pages: i64, today: Date) -> Result<Progress> {
        let mut tx = self.pool.begin().await.or_raise(|| ErrorKind::Database)?;
        let row: Option<BookRow> = sqlx::query_as(include_str!("../queries/get_book.sql"))
            .bind(i64::from(book_id))
            .fetch_optional(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        let Some(book) = row.map(Book::try_from).transpose()? else {
            return Ok(Progress::Skipped(SkipReason::NotFound));
        };
        if pages <= 0 {
            return Ok(Progress::Skipped(SkipReason::NonPositive));
        }
        if book.state != BookState::Open {
            return Ok(Progress::Skipped(SkipReason::NotOpen(book.state)));
        }
        let reached = match i64::from(book.current_page).checked_add(pages) {
            Some(reached) if reached <= i64::from(book.pages) => reached,
            _ => {
                return Ok(Progress::Skipped(SkipReason::Overflow {
                    current_page: book.current_page,
                    pages: book.pages,
                    requested: pages,
                }));
            },
        };
        // Bounded by `book.pages`, so both fit.
        let current_page = u32::try_from(reached).or_raise(|| ErrorKind::InvalidData("current page"))?;
        let increment = u32::try_from(pages).or_raise(|| ErrorKind::InvalidData("pages"))?;

        let updated = sqlx::query(include_str!("../queries/update_current_page.sql"))
            .bind(i64::from(current_page))
            .bind(i64::from(book_id))
            .bind(BookState::Open.as_i64())
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        if updated.rows_affected() == 0 {
            return Ok(Progress::Skipped(SkipReason::NotOpen(book.state)));
        }
        sqlx::query(include_str!("../queries/insert_track.sql"))
            .bind(format_date(today)?)
            .bind(i64::from(increment))
            .bind(i64::from(book_id))
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        let finished = current_page == book.pages;
        if finished {
            Self::write_state(&mut *tx, book_id, BookState::Finished, today).await?;
        }
        tx.commit().await.or_raise(|| ErrorKind::Database)?;
        tracing::debug!(current_page, finished, "recorded progress");
        Ok(Progress::Recorded { current_page, finished })
    }

    /// Move a book to `state`.
    ///
    /// The finish date becomes `today` when `state` is
    /// [`BookState::Finished`] and is cleared otherwise. Returns `false` if no
    /// book has the given id.
    #[instrument(skip(self))]
    pub async fn set_state(&self, book_id: u32, state: BookState, today: Date) -> Result<bool> {
        let mut conn = self.pool.acquire().await.or_raise(|| ErrorKind::Database)?;
        let updated = Self::write_state(&mut *conn, book_id, state, today).await?;
        Ok(updated > 0)
    }

    async fn write_state(conn: &mut SqliteConnection, book_id: u32, state: BookState, today: Date) -> Result<u64> {
        let finish_date = match state {
            BookState::Finished => format_date(today)?,
            _ => NOT_FINISHED.to_string(),
        };
        let result = sqlx::query(include_str!("../queries/update_state.sql"))
            .bind(state.as_i64())
            .bind(finish_date)
            .bind(i64::from(book_id))
            .execute(&mut *conn)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(result.rows_affected())
    }

    // =========================================================================
    // Get/Fetch
    // =========================================================================

    pub async fn get(&self, book_id: u32) -> Result<Option<Book>> {
        let row: Option<BookRow> = sqlx::query_as(include_str!("../queries/get_book.sql"))
            .bind(i64::from(book_id))
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        row.map(Book::try_from).transpose()
    }

    // =========================================================================
    // Listing
    // =========================================================================

    /// List books matching a state filter and an optional category, ordered by id.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: StateFilter, category: Option<&str>) -> Result<Vec<Book>> {
        let query = match (filter, category) {
            (StateFilter::All, Some(category)) => {
                sqlx::query_as::<_, BookRow>(include_str!("../queries/list_books_by_category.sql")).bind(category)
            },
            (StateFilter::Only(state), Some(category)) => {
                sqlx::query_as::<_, BookRow>(include_str!("../queries/list_books_by_category_and_state.sql"))
                    .bind(category)
                    .bind(state.as_i64())
            },
            (StateFilter::All, None) => sqlx::query_as::<_, BookRow>(include_str!("../queries/list_books.sql")),
            (StateFilter::Only(state), None) => {
                sqlx::query_as::<_, BookRow>(include_str!("../queries/list_books_by_state.sql")).bind(state.as_i64())
            },
        };
        let rows: Vec<BookRow> = query.fetch_all(&self.pool).await.or_raise(|| ErrorKind::Database)?;
        rows.into_iter().map(Book::try_from).collect()
    }

    /// Reading history of a book, oldest first.
    ///
    /// Unknown books simply have no history.
    #[instrument(skip(self))]
    pub async fn tracks(&self, book_id: u32) -> Result<Vec<TrackEntry>> {
        let rows: Vec<TrackRow> = sqlx::query_as(include_str!("../queries/list_tracks.sql"))
            .bind(i64::from(book_id))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        rows.into_iter().map(TrackEntry::try_from).collect()
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Delete a book and its reading history.
    ///
    /// Returns `true` if a book was deleted, `false` if the id was not found.
    #[instrument(skip(self))]
    pub async fn delete(&self, book_id: u32) -> Result<bool> {
        let mut tx = self.pool.begin().await.or_raise(|| ErrorKind::Database)?;
        sqlx::query(include_str!("../queries/delete_tracks.sql"))
            .bind(i64::from(book_id))
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        let result = sqlx::query(include_str!("../queries/delete_book.sql"))
            .bind(i64::from(book_id))
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        tx.commit().await.or_raise(|| ErrorKind::Database)?;
        Ok(result.rows_affected() > 0)
    }
}
