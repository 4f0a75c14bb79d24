//! `tocbox reset` command implementation.

use clap::Args;
use tocbox_session::FileStorage;

use super::book::BookArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the reset command.
#[derive(Args)]
pub(crate) struct ResetArgs {
    #[command(flatten)]
    book: BookArgs,
}

impl ResetArgs {
    /// End the browsing session, forgetting any persisted scroll offset.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.book.load_config()?;
        let storage = FileStorage::new(&config.book_resolved.session_dir);
        storage.clear();
        Output::new().info(&format!("Cleared {}", storage.path().display()));
        Ok(())
    }
}
