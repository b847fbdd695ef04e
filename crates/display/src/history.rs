use pirtuk_tracker::TrackEntry;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Reading history of one book: `<date> <pages>` per line, in the given order.
pub struct History<'a>(pub &'a [TrackEntry]);

impl Display for History<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for entry in self.0 {
            writeln!(f, "{} {}", entry.date, entry.pages)?;
        }
        Ok(())
    }
}
