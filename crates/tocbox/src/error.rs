//! CLI error types.

use tocbox_config::ConfigError;
use tocbox_embeds::SearchIndexError;
use tocbox_nav::SummaryError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{path}: {source}")]
    Summary {
        path: String,
        #[source]
        source: SummaryError,
    },

    #[error("{0}")]
    SearchIndex(#[from] SearchIndexError),

    #[error("{0}")]
    Validation(String),
}
