use crate::COLUMN_SPACE;
use crate::progress::ProgressBar;
use pirtuk_tracker::Book;
use std::fmt::{Display, Formatter, Result as FmtResult};
use time::Date;

const HEADER: &str = "id/ title/ pages/ current_page/ category/ state/ start_date/ finish_date";
const NUMBER_WIDTH: usize = 4;
const STATE_WIDTH: usize = 8;
const DATE_WIDTH: usize = 10;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Column-aligned listing of books.
///
/// Title and category columns are as wide as their longest value plus a
/// margin on each side; the remaining columns have fixed widths. An empty
/// listing renders as nothing at all, not even the header.
pub struct Table<'a> {
    books: &'a [Book],
    progress: Option<&'a ProgressBar>,
}
impl<'a> Table<'a> {
    pub fn new(books: &'a [Book]) -> Self {
        Self { books, progress: None }
    }

    /// Print a progress bar under every row.
    pub fn with_progress(mut self, bar: &'a ProgressBar) -> Self {
        self.progress = Some(bar);
        self
    }

    fn header() -> String {
        let margin = " ".repeat(COLUMN_SPACE);
        format!("\n{BOLD} {margin} {HEADER} {RESET}\n\n")
    }

    fn row(book: &Book, title_width: usize, category_width: usize) -> String {
        let finished_on = book.finished_on.map(date).unwrap_or_else(|| "-".to_string());
        [
            cell(&book.id.to_string(), COLUMN_SPACE + NUMBER_WIDTH),
            cell(&book.title, title_width),
            cell(&book.pages.to_string(), COLUMN_SPACE + NUMBER_WIDTH),
            cell(&book.current_page.to_string(), COLUMN_SPACE + NUMBER_WIDTH),
            cell(&book.category, category_width),
            cell(book.state.as_str(), COLUMN_SPACE + STATE_WIDTH),
            cell(&date(book.started_on), COLUMN_SPACE + DATE_WIDTH),
            cell(&finished_on, COLUMN_SPACE + DATE_WIDTH),
        ]
        .join(" ")
    }
}
impl Display for Table<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.books.is_empty() {
            return Ok(());
        }
        let title_width = column_width(self.books.iter().map(|b| b.title.as_str()));
        let category_width = column_width(self.books.iter().map(|b| b.category.as_str()));
        f.write_str(&Self::header())?;
        for book in self.books {
            writeln!(f, "{}", Self::row(book, title_width, category_width))?;
            if let Some(bar) = self.progress {
                f.write_str(&bar.render(book.pages, book.current_page))?;
            }
        }
        Ok(())
    }
}

fn date(date: Date) -> String {
    date.to_string()
}

/// Longest value plus a margin on both sides.
fn column_width<'s>(values: impl Iterator<Item = &'s str>) -> usize {
    values.map(|v| v.chars().count()).max().unwrap_or(0) + 2 * COLUMN_SPACE
}

/// One leading margin, then `value` padded on the right to `width` characters.
fn cell(value: &str, width: usize) -> String {
    let padding = width.saturating_sub(value.chars().count());
    format!("{}{value}{}", " ".repeat(COLUMN_SPACE), " ".repeat(padding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pirtuk_tracker::{BookState, NewBook};
    use rstest::rstest;
    use time::macros::date;

    fn books() -> Vec<Book> {
        let mut dune = NewBook::new("Dune", 412, "scifi").open(0, date!(2024 - 01 - 02));
        dune.current_page = 100;
        let mut emma = NewBook::new("Emma", 474, "classic").open(1, date!(2024 - 01 - 03));
        emma.current_page = 474;
        emma.state = BookState::Finished;
        emma.finished_on = Some(date!(2024 - 02 - 01));
        vec![dune, emma]
    }

    #[rstest]
    #[case("7", 5, " 7    ")]
    #[case("412", 5, " 412  ")]
    #[case("123456", 5, " 123456")]
    #[case("Ünïcödé", 9, " Ünïcödé  ")]
    fn test_cell(#[case] value: &str, #[case] width: usize, #[case] expected: &str) {
        assert_eq!(cell(value, width), expected);
    }

    #[test]
    fn test_column_width() {
        assert_eq!(column_width(["Dune", "Persuasion"].into_iter()), 12);
        assert_eq!(column_width(std::iter::empty()), 2);
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(Table::new(&[]).to_string(), "");
    }

    #[test]
    fn test_header() {
        assert_eq!(
            Table::header(),
            "\n\x1b[1m   id/ title/ pages/ current_page/ category/ state/ start_date/ finish_date \x1b[0m\n\n"
        );
    }

    #[test]
    fn test_rows() {
        let books = books();
        let rendered = Table::new(&books).to_string();
        let rows: Vec<&str> = rendered.lines().skip(3).collect();
        assert_eq!(
            rows,
            vec![
                " 0      Dune    412    100    scifi      OPEN       2024-01-02   -          ",
                " 1      Emma    474    474    classic    FINISHED   2024-01-03   2024-02-01 ",
            ]
        );
    }

    #[test]
    fn test_rows_align() {
        let books = books();
        let rendered = Table::new(&books).to_string();
        let widths: Vec<usize> = rendered.lines().skip(3).map(|l| l.chars().count()).collect();
        assert_eq!(widths[0], widths[1]);
    }

    #[test]
    fn test_progress_under_each_row() {
        let books = books();
        let bar = ProgressBar::new(4, 'x');
        let rendered = Table::new(&books).with_progress(&bar).to_string();
        assert_eq!(rendered.matches("pages\n").count(), 2);
        assert!(rendered.contains(" |----| 24.3%  100/412 pages"));
        assert!(rendered.contains(" |xxxx| 100.0%  474/474 pages"));
        let dune = rendered.find(" 0      Dune").unwrap();
        let dune_bar = rendered.find("100/412").unwrap();
        let emma = rendered.find(" 1      Emma").unwrap();
        assert!(dune < dune_bar && dune_bar < emma);
    }
}
