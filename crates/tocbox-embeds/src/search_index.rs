//! Generated search index loading.
//!
//! The book generator writes `searchindex.js`, a script assigning an
//! elasticlunr index to `window.search`:
//!
//! ```text
//! Object.assign(window.search, {"doc_urls": [...], "index": {...}, ...});
//! ```
//!
//! and may also write the same object as plain `searchindex.json`. Both are
//! accepted. The inverted index itself is left unparsed; only the document
//! store and the options are exposed.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

static WRAPPER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^Object\.assign\(\s*window\.search\s*,\s*(.*)\)\s*;?\s*$").unwrap()
});

/// Error from loading a search index.
#[derive(Debug, thiserror::Error)]
pub enum SearchIndexError {
    /// Neither plain JSON nor the `Object.assign(window.search, ...)` script.
    #[error("search index is neither JSON nor an Object.assign(window.search, ...) script")]
    UnrecognizedFormat,
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The index object is malformed.
    #[error("invalid search index: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loaded search index document.
#[derive(Clone, Debug, Deserialize)]
pub struct SearchIndex {
    /// Section URLs (`page.html#anchor`), indexed by document id.
    pub doc_urls: Vec<String>,
    /// Index metadata and document store.
    pub index: IndexData,
    /// Result presentation options.
    pub results_options: ResultsOptions,
    /// Query options.
    pub search_options: SearchOptions,
}

/// Index metadata and document store.
#[derive(Clone, Debug, Deserialize)]
pub struct IndexData {
    /// Stored documents.
    #[serde(rename = "documentStore")]
    pub document_store: DocumentStore,
    /// Indexed fields.
    pub fields: Vec<String>,
    /// Tokenizer language.
    pub lang: String,
    /// Token pipeline stages.
    pub pipeline: Vec<String>,
    /// Field holding the document id.
    #[serde(rename = "ref")]
    pub reference: String,
    /// Index format version.
    pub version: String,
}

/// Stored documents keyed by id.
#[derive(Clone, Debug, Deserialize)]
pub struct DocumentStore {
    /// Documents by id.
    pub docs: BTreeMap<String, Document>,
    /// Token counts per field, by id.
    #[serde(rename = "docInfo", default)]
    pub doc_info: BTreeMap<String, DocInfo>,
    /// Number of documents.
    pub length: usize,
    /// Whether documents were saved with the index.
    pub save: bool,
}

/// One indexed section.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Document {
    /// Document id.
    pub id: String,
    /// Section heading.
    pub title: String,
    /// Section text.
    pub body: String,
    /// `Chapter » Section` trail.
    pub breadcrumbs: String,
}

/// Token counts of a document's fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct DocInfo {
    pub body: u32,
    pub breadcrumbs: u32,
    pub title: u32,
}

/// Result presentation options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct ResultsOptions {
    /// Maximum results shown.
    pub limit_results: usize,
    /// Words in a result teaser.
    pub teaser_word_count: usize,
}

/// Query options.
#[derive(Clone, Debug, Deserialize)]
pub struct SearchOptions {
    /// Term combination (`OR`/`AND`).
    #[serde(rename = "bool")]
    pub combine: String,
    /// Prefix expansion of query terms.
    pub expand: bool,
    /// Per-field options.
    pub fields: BTreeMap<String, FieldOptions>,
}

/// Per-field query options.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct FieldOptions {
    pub boost: f64,
}

impl SearchIndex {
    /// Parse `searchindex.js` or `searchindex.json` contents.
    ///
    /// # Errors
    ///
    /// Returns [`SearchIndexError::UnrecognizedFormat`] for any other script
    /// and [`SearchIndexError::Json`] for a malformed object.
    pub fn parse(text: &str) -> Result<Self, SearchIndexError> {
        let text = text.trim();
        let json = if text.starts_with('{') {
            text
        } else {
            WRAPPER_RE
                .captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
                .ok_or(SearchIndexError::UnrecognizedFormat)?
        };
        let index: Self = serde_json::from_str(json)?;
        if index.index.document_store.length != index.doc_urls.len() {
            tracing::warn!(
                urls = index.doc_urls.len(),
                documents = index.index.document_store.length,
                "Search index document count does not match its URLs"
            );
        }
        Ok(index)
    }

    /// Read and parse an index file.
    ///
    /// # Errors
    ///
    /// Returns [`SearchIndexError::Io`] if the file cannot be read, otherwise
    /// as [`parse`](Self::parse).
    pub fn load(path: &Path) -> Result<Self, SearchIndexError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Number of indexed sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.doc_urls.len()
    }

    /// Whether nothing was indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.doc_urls.is_empty()
    }

    /// Document with numeric id `id`.
    #[must_use]
    pub fn document(&self, id: usize) -> Option<&Document> {
        self.index.document_store.docs.get(&id.to_string())
    }

    /// Sections in id order, paired with their URL.
    pub fn sections(&self) -> impl Iterator<Item = (&str, Option<&Document>)> {
        self.doc_urls
            .iter()
            .enumerate()
            .map(|(id, url)| (url.as_str(), self.document(id)))
    }

    /// Distinct page paths, in first-occurrence order.
    #[must_use]
    pub fn pages(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.doc_urls
            .iter()
            .map(|url| url.split_once('#').map_or(url.as_str(), |(page, _)| page))
            .filter(|page| seen.insert(*page))
            .collect()
    }
}
