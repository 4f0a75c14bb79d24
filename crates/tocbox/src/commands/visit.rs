//! `tocbox visit` command implementation.

use std::sync::Arc;

use clap::Args;
use tocbox_nav::ScrollRestore;
use tocbox_session::FileStorage;

use super::book::{Book, BookArgs, entry_title};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the visit command.
#[derive(Args)]
pub(crate) struct VisitArgs {
    #[command(flatten)]
    book: BookArgs,

    /// Book-relative page being opened (e.g. `solver/tunnels.html`).
    page: String,
}

impl VisitArgs {
    /// Open a page in the current session: mark its entry and restore the
    /// scroll offset left by the previous page.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let book = Book::load(&self.book)?;
        let storage = Arc::new(FileStorage::new(&book.config.book_resolved.session_dir));

        let mut sidebar = book.sidebar(&self.page, storage);
        let report = sidebar.on_mount(&book.location(&self.page));

        output.highlight(report.active_path.as_str());
        match report.active {
            Some(id) => output.result(&format!("active: {}", entry_title(&sidebar, id)))?,
            None => output.warning("No sidebar entry matches this page"),
        }
        if !report.expanded.is_empty() {
            let titles: Vec<_> = report
                .expanded
                .iter()
                .map(|id| entry_title(&sidebar, *id))
                .collect();
            output.result(&format!("expanded: {}", titles.join(", ")))?;
        }
        let scroll = match report.scroll {
            ScrollRestore::Restored(offset) => format!("scroll: restored to {offset}"),
            ScrollRestore::Centered(id) => {
                format!("scroll: centered on {}", entry_title(&sidebar, id))
            }
            ScrollRestore::Unchanged => "scroll: unchanged".to_owned(),
        };
        output.result(&scroll)?;
        Ok(())
    }
}
