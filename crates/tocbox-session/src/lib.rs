//! Session-scoped key-value storage for the tocbox sidebar.
//!
//! The sidebar persists a single value (its scroll offset) between page views
//! of one browsing session. This crate decouples that from where the value
//! lives:
//!
//! - [`SessionStorage`]: string key to string value, with get/set/remove
//! - [`MemoryStorage`]: in-process implementation, also the test fake
//! - [`FileStorage`]: JSON file on disk, so a session can span processes
//!
//! Writes are best effort. A storage that cannot persist a value behaves as
//! if the value was never written, which the sidebar treats as "nothing to
//! restore".
//!
//! # Example
//!
//! ```
//! use tocbox_session::{MemoryStorage, SessionStorage};
//!
//! let session = MemoryStorage::new();
//! session.set("sidebar-scroll", "120");
//! assert_eq!(session.get("sidebar-scroll").as_deref(), Some("120"));
//! session.remove("sidebar-scroll");
//! assert_eq!(session.get("sidebar-scroll"), None);
//! ```

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Key-value storage whose lifetime is a browsing session.
///
/// Keys and values are plain strings, matching what a browser's
/// `sessionStorage` offers. Implementations use interior mutability so a
/// storage can be shared behind an `Arc`.
pub trait SessionStorage: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Delete the value stored under `key`. Missing keys are ignored.
    fn remove(&self, key: &str);

    /// Read the value under `key` and delete it in the same step.
    fn take(&self, key: &str) -> Option<String> {
        let value = self.get(key);
        self.remove(key);
        value
    }
}
