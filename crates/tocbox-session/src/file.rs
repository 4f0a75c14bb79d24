//! File-backed session storage.
//!
//! [`FileStorage`] keeps the whole session as one JSON object on disk:
//!
//! ```text
//! {session_dir}/
//! +-- session.json       # {"sidebar-scroll": "120", ...}
//! ```
//!
//! Every operation re-reads the file, so separate processes observe each
//! other's writes in order. A missing or corrupt file reads as an empty
//! session. Write errors are logged and swallowed; session state is optional.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::SessionStorage;

/// Filename of the session document inside the session directory.
const SESSION_FILENAME: &str = "session.json";

/// Session storage persisted as a JSON document.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStorage {
    /// Create a storage rooted at `dir`. The directory is created lazily on
    /// the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(SESSION_FILENAME),
            lock: Mutex::new(()),
        }
    }

    /// Path of the session document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// End the session by deleting the document.
    pub fn clear(&self) {
        let _guard = self.lock.lock();
        if self.path.exists()
            && let Err(e) = fs::remove_file(&self.path)
        {
            tracing::debug!(path = %self.path.display(), error = %e, "Failed to clear session");
        }
    }

    fn load(&self) -> BTreeMap<String, String> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        match serde_json::from_str(&content) {
            Ok(values) => values,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "Ignoring corrupt session file");
                BTreeMap::new()
            }
        }
    }

    fn store(&self, values: &BTreeMap<String, String>) {
        let Some(parent) = self.path.parent() else {
            return;
        };
        if let Err(e) = fs::create_dir_all(parent) {
            tracing::debug!(error = %e, "Failed to create session directory");
            return;
        }
        let json = match serde_json::to_string(values) {
            Ok(json) => json,
            Err(e) => {
                tracing::debug!(error = %e, "Failed to serialize session");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, json) {
            tracing::debug!(path = %self.path.display(), error = %e, "Failed to write session");
        }
    }

    /// Read-modify-write under the lock. The document is only written when
    /// `f` changed it, so reads of an absent key never touch the disk.
    fn update<T>(&self, f: impl FnOnce(&mut BTreeMap<String, String>) -> T) -> T {
        let _guard = self.lock.lock();
        let mut values = self.load();
        let before = values.clone();
        let result = f(&mut values);
        if values != before {
            self.store(&values);
        }
        result
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock();
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: &str) {
        self.update(|values| {
            values.insert(key.to_owned(), value.to_owned());
        });
    }

    fn remove(&self, key: &str) {
        self.update(|values| {
            values.remove(key);
        });
    }

    fn take(&self, key: &str) -> Option<String> {
        self.update(|values| values.remove(key))
    }
}
