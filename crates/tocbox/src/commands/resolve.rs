//! `tocbox resolve` command implementation.

use clap::Args;
use tocbox_nav::resolve_active_path;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Browser location to normalize.
    location: String,
}

impl ResolveArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let path = resolve_active_path(&self.location);
        Output::new().result(path.as_str())?;
        Ok(())
    }
}
