//! `pirtuk`: keep track of the books you are reading.
//!
//! Writes requested on the command line run first, in a fixed order (add,
//! set state, increment, delete), then either a book's reading history or a
//! listing is printed.

mod cli;
mod error;
mod logging;

use crate::cli::{Cli, Plan, View};
use crate::error::{ErrorKind, Result};
use clap::Parser;
use exn::ResultExt;
use pirtuk_config::Config;
use pirtuk_display::{History, ProgressBar, Table};
use pirtuk_tracker::{Database, Progress, Repository};
use std::io::Write;
use std::process::ExitCode;
use time::{Date, OffsetDateTime};
use tracing::{info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let plan = Plan::try_from(cli)?;
    let mut config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    if let Some(path) = &cli.database {
        config = config.with_database(path);
    }
    logging::init(&config.log);

    let path = config.ensure_database_dir().or_raise(|| ErrorKind::Config)?;
    let db = Database::connect(&path).await.or_raise(|| ErrorKind::Tracker)?;
    let result = execute(&Repository::from(&db), &plan, &config, today(), &mut std::io::stdout().lock()).await;
    db.close().await;
    result
}

/// Local calendar date, falling back to UTC when the offset is unknown.
fn today() -> Date {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()).date()
}

async fn execute(repo: &Repository, plan: &Plan, config: &Config, today: Date, out: &mut impl Write) -> Result<()> {
    if let Some(book) = &plan.add {
        let book = repo.add(book.clone(), today).await.or_raise(|| ErrorKind::Tracker)?;
        info!(id = book.id, title = %book.title, "added book");
    }
    if let Some((id, state)) = plan.set_state {
        if !repo.set_state(id, state, today).await.or_raise(|| ErrorKind::Tracker)? {
            warn!(id, "no such book, state unchanged");
        }
    }
    if let Some((id, pages)) = plan.inc {
        match repo.inc(id, pages, today).await.or_raise(|| ErrorKind::Tracker)? {
            Progress::Recorded { current_page, finished } => info!(id, current_page, finished, "recorded progress"),
            Progress::Skipped(reason) => warn!(id, pages, %reason, "increment skipped"),
        }
    }
    if let Some(id) = plan.delete {
        if !repo.delete(id).await.or_raise(|| ErrorKind::Tracker)? {
            warn!(id, "no such book, nothing deleted");
        }
    }

    match &plan.view {
        View::Track(id) => {
            let tracks = repo.tracks(*id).await.or_raise(|| ErrorKind::Tracker)?;
            write!(out, "{}", History(&tracks)).or_raise(|| ErrorKind::Output)?;
        }
        View::List { filter, category, progress } => {
            let books = repo.list(*filter, category.as_deref()).await.or_raise(|| ErrorKind::Tracker)?;
            let bar = ProgressBar::new(config.progress.width, config.progress.fill);
            let mut table = Table::new(&books);
            if *progress {
                table = table.with_progress(&bar);
            }
            write!(out, "{table}").or_raise(|| ErrorKind::Output)?;
        }
    }
    out.flush().or_raise(|| ErrorKind::Output)
}

fn report(err: &error::Error) -> ExitCode {
    if err.is_usage() {
        eprintln!("{}", **err);
    } else {
        eprintln!("{err:?}");
    }
    ExitCode::FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;
    use pirtuk_tracker::{BookState, NewBook, StateFilter};
    use time::macros::date;

    const TODAY: Date = date!(2024 - 03 - 01);

    async fn repo() -> Repository {
        let db = Database::connect_in_memory().await.unwrap();
        Repository::from(&db)
    }

    fn list(filter: StateFilter) -> View {
        View::List { filter, category: None, progress: false }
    }

    fn plan(view: View) -> Plan {
        Plan { add: None, set_state: None, inc: None, delete: None, view }
    }

    async fn output(repo: &Repository, plan: &Plan) -> String {
        let mut out = Vec::new();
        execute(repo, plan, &Config::default(), TODAY, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_empty_listing_prints_nothing() {
        let repo = repo().await;
        assert_eq!(output(&repo, &plan(list(StateFilter::default()))).await, "");
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let repo = repo().await;
        let plan = Plan { add: Some(NewBook::new("Dune", 412, "scifi")), ..plan(list(StateFilter::default())) };
        let out = output(&repo, &plan).await;
        assert!(out.contains(" 0      Dune    412    0      scifi    OPEN       2024-03-01   -"), "{out}");
    }

    #[tokio::test]
    async fn test_increment_to_the_end_finishes_the_book() {
        let repo = repo().await;
        repo.add(NewBook::new("Dune", 412, "scifi"), TODAY).await.unwrap();

        let plan = Plan { inc: Some((0, 412)), ..plan(list(StateFilter::Only(BookState::Finished))) };
        let out = output(&repo, &plan).await;
        assert!(out.contains("FINISHED"), "{out}");
        assert!(out.contains("2024-03-01   2024-03-01"), "{out}");
    }

    #[tokio::test]
    async fn test_skipped_increment_still_lists() {
        let repo = repo().await;
        repo.add(NewBook::new("Dune", 412, "scifi"), TODAY).await.unwrap();

        let plan = Plan { inc: Some((0, 500)), ..plan(list(StateFilter::default())) };
        let out = output(&repo, &plan).await;
        assert!(out.contains("412    0 "), "{out}");
        assert!(repo.tracks(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_writes_run_before_listing_in_order() {
        let repo = repo().await;
        repo.add(NewBook::new("Dune", 412, "scifi"), TODAY).await.unwrap();

        // Pending first, so the increment on the same book is skipped.
        let plan = Plan {
            set_state: Some((0, BookState::Pending)),
            inc: Some((0, 10)),
            ..plan(list(StateFilter::All))
        };
        let out = output(&repo, &plan).await;
        assert!(out.contains("PENDING"), "{out}");
        assert_eq!(repo.get(0).await.unwrap().unwrap().current_page, 0);
    }

    #[tokio::test]
    async fn test_delete_missing_book_is_not_an_error() {
        let repo = repo().await;
        let plan = Plan { delete: Some(7), ..plan(list(StateFilter::All)) };
        assert_eq!(output(&repo, &plan).await, "");
    }

    #[tokio::test]
    async fn test_track_history() {
        let repo = repo().await;
        repo.add(NewBook::new("Dune", 412, "scifi"), TODAY).await.unwrap();
        repo.inc(0, 30, date!(2024 - 03 - 01)).await.unwrap();
        repo.inc(0, 12, date!(2024 - 03 - 02)).await.unwrap();

        let out = output(&repo, &plan(View::Track(0))).await;
        assert_eq!(out, "2024-03-01 30\n2024-03-02 12\n");
    }

    #[tokio::test]
    async fn test_progress_bar_uses_config() {
        let repo = repo().await;
        repo.add(NewBook::new("Dune", 400, "scifi"), TODAY).await.unwrap();
        repo.inc(0, 100, TODAY).await.unwrap();

        let mut config = Config::default();
        config.progress.width = 4;
        config.progress.fill = '#';
        let plan = plan(View::List { filter: StateFilter::default(), category: None, progress: true });
        let mut out = Vec::new();
        execute(&repo, &plan, &config, TODAY, &mut out).await.unwrap();
        assert!(String::from_utf8(out).unwrap().contains(" |#---| 25.0%  100/400 pages"));
    }
}
