//! `tocbox search` command implementation.

use std::path::PathBuf;

use clap::Args;
use tocbox_config::Config;
use tocbox_embeds::SearchIndex;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the search command.
#[derive(Args)]
pub(crate) struct SearchArgs {
    /// Path to configuration file (default: auto-discover tocbox.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Search index file (overrides config).
    #[arg(short, long)]
    index: Option<PathBuf>,

    /// List every section instead of distinct pages.
    #[arg(long)]
    sections: bool,
}

impl SearchArgs {
    /// Load the generated search index and list what it covers.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let path = match self.index {
            Some(path) => path,
            None => Config::load(self.config.as_deref(), None)?
                .book_resolved
                .search_index,
        };

        let index = SearchIndex::load(&path)?;
        output.info(&format!(
            "{}: {} sections, {} pages",
            path.display(),
            index.len(),
            index.pages().len()
        ));

        if self.sections {
            for (url, doc) in index.sections() {
                let title = doc.map_or("", |d| d.title.as_str());
                output.result(&format!("{url}\t{title}"))?;
            }
        } else {
            for page in index.pages() {
                output.result(page)?;
            }
        }
        Ok(())
    }
}
