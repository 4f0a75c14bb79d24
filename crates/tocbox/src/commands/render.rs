//! `tocbox render` command implementation.

use std::sync::Arc;

use clap::Args;
use tocbox_nav::render;
use tocbox_session::MemoryStorage;

use super::book::{Book, BookArgs};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    book: BookArgs,

    /// Book-relative page to render the sidebar for (e.g. `level/parse.html`).
    /// Without it the static, page-independent markup is printed.
    #[arg(short, long)]
    page: Option<String>,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let book = Book::load(&self.book)?;

        let html = match &self.page {
            Some(page) => {
                let mut sidebar = book.sidebar(page, Arc::new(MemoryStorage::new()));
                let report = sidebar.on_mount(&book.location(page));
                if report.active.is_none() {
                    output.warning(&format!("No sidebar entry matches {}", report.active_path));
                }
                sidebar.to_html()
            }
            None => render(&book.toc, &book.render_options()),
        };

        output.result(&html)?;
        Ok(())
    }
}
