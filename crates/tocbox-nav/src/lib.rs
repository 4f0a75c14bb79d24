//! Sidebar table of contents for a static documentation book.
//!
//! This crate provides:
//! - [`Toc`]/[`TreeNode`]: the book's chapter tree, fixed at build time
//! - [`parse_summary`]: chapter tree from a `SUMMARY.md` outline
//! - [`render`]: static sidebar markup
//! - [`Sidebar`]: per-page state (active entry, expanded branches, scroll
//!   continuity between pages)
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use tocbox_nav::{Sidebar, SidebarOptions, Toc, TreeNode};
//! use tocbox_session::MemoryStorage;
//!
//! let toc = Toc::new(vec![
//!     TreeNode::chapter("Solver", "solver/index.html")
//!         .with_children(vec![TreeNode::chapter("Tunnels", "solver/tunnels.html")]),
//! ]);
//! let options = SidebarOptions {
//!     path_to_root: "../".to_owned(),
//!     ..SidebarOptions::default()
//! };
//! let mut sidebar = Sidebar::new(&toc, options, Arc::new(MemoryStorage::new()));
//!
//! let report = sidebar.on_mount("https://book.example/solver/tunnels.html");
//! assert_eq!(report.expanded.len(), 1);
//! assert!(sidebar.to_html().contains("class=\"active\""));
//! ```

mod location;
mod outline;
mod render;
mod sidebar;
mod summary;
mod tree;

#[cfg(test)]
mod test_support;

pub use location::{
    INDEX_PAGE, NormalizedPath, is_external, path_to_root, resolve_active_path, resolve_link,
    rewrite_href,
};
pub use outline::{Entry, NodeId, Outline};
pub use render::{DEFAULT_IN_PROGRESS_MARKER, FoldConfig, RenderOptions, render};
pub use sidebar::{
    ClickEvent, ClickTarget, DEFAULT_SCROLL_KEY, MountReport, ScrollRestore, Sidebar,
    SidebarOptions,
};
pub use summary::{SummaryError, parse_summary};
pub use tree::{SectionNumber, Toc, TreeNode};
