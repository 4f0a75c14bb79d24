//! Page collaborators of the tocbox sidebar.
//!
//! Neither of these talks to the sidebar directly; they share the page and
//! its theme:
//! - [`ThemeSync`]: keeps an embedded comment widget's theme in step with
//!   the book's theme
//! - [`SearchIndex`]: the generated search index document, loaded but never
//!   queried

mod search_index;
mod theme;

pub use search_index::{
    DocInfo, Document, DocumentStore, FieldOptions, IndexData, ResultsOptions, SearchIndex,
    SearchIndexError, SearchOptions,
};
pub use theme::{EmbedSettings, ThemePalette, ThemeSync, WidgetMessage, should_embed};
