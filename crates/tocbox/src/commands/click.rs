//! `tocbox click` command implementation.

use std::sync::Arc;

use clap::Args;
use tocbox_nav::ClickEvent;
use tocbox_session::FileStorage;

use super::book::{Book, BookArgs, entry_title};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the click command.
#[derive(Args)]
pub(crate) struct ClickArgs {
    #[command(flatten)]
    book: BookArgs,

    /// Book-relative page the click happens on.
    page: String,

    /// Target of the clicked sidebar link, as written in the summary
    /// (e.g. `solver/tunnels.html`).
    #[arg(short, long)]
    link: String,

    /// Sidebar scroll offset at the time of the click.
    #[arg(short, long, default_value_t = 0.0)]
    offset: f64,
}

impl ClickArgs {
    /// Click a sidebar link after scrolling, persisting the offset for the
    /// next `visit`.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let book = Book::load(&self.book)?;
        let storage = Arc::new(FileStorage::new(&book.config.book_resolved.session_dir));

        let mut sidebar = book.sidebar(&self.page, storage);
        sidebar.on_mount(&book.location(&self.page));

        let id = sidebar.outline().find_target(&self.link).ok_or_else(|| {
            CliError::Validation(format!("no sidebar entry links to {}", self.link))
        })?;

        sidebar.set_scroll_top(self.offset);
        sidebar.on_click_link(&ClickEvent::link(id));

        output.success(&format!(
            "Clicked {} at scroll offset {}",
            entry_title(&sidebar, id),
            self.offset
        ));
        Ok(())
    }
}
