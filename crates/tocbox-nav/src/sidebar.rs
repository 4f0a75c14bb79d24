//! The sidebar component for one page view.
//!
//! A [`Sidebar`] is created on every page load from the static [`Toc`], the
//! page's browsing root prefix and the session storage. It then:
//!
//! 1. rewrites every link to be root-relative (construction)
//! 2. finds the entry for the current page and expands its branch
//!    ([`Sidebar::mark_active`])
//! 3. restores the scroll offset left by the previous page, or centers the
//!    active entry ([`Sidebar::restore_scroll`])
//!
//! and afterwards reacts to clicks through [`Sidebar::on_click_link`] and
//! [`Sidebar::on_click_toggle`]. The only state outliving the page view is
//! the scroll offset written on a link click, which the next page reads once.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::sync::Arc;

use tocbox_session::SessionStorage;

use crate::location::{NormalizedPath, resolve_active_path, resolve_link, rewrite_href};
use crate::outline::{Entry, NodeId, Outline};
use crate::render::{Presentation, RenderOptions, render_outline};
use crate::tree::Toc;

/// Session key the scroll offset is stored under by default.
pub const DEFAULT_SCROLL_KEY: &str = "sidebar-scroll";

/// Per-page configuration of a [`Sidebar`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarOptions {
    /// Relative path from the current page's directory to the book root,
    /// e.g. `"../"` for `level/parse.html`.
    pub path_to_root: String,
    /// Session key holding the persisted scroll offset.
    pub scroll_key: String,
    /// Markup options.
    pub render: RenderOptions,
}

impl Default for SidebarOptions {
    fn default() -> Self {
        Self {
            path_to_root: String::new(),
            scroll_key: DEFAULT_SCROLL_KEY.to_owned(),
            render: RenderOptions::default(),
        }
    }
}

/// Element of the sidebar a click landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    /// The chapter link of an entry.
    Link(NodeId),
    /// The fold toggle of a group header.
    Toggle(NodeId),
    /// Anything else (numbering, drafts, padding).
    Other,
}

/// A click inside the sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickEvent {
    /// Clicked element.
    pub target: ClickTarget,
}

impl ClickEvent {
    /// Click on the link of `id`.
    #[must_use]
    pub fn link(id: NodeId) -> Self {
        Self {
            target: ClickTarget::Link(id),
        }
    }

    /// Click on the fold toggle of `id`.
    #[must_use]
    pub fn toggle(id: NodeId) -> Self {
        Self {
            target: ClickTarget::Toggle(id),
        }
    }
}

/// How the scroll position was set up on mount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollRestore {
    /// A persisted offset was applied.
    Restored(f64),
    /// No offset was persisted; the active entry is centered in view.
    Centered(NodeId),
    /// Nothing persisted and no active entry.
    Unchanged,
}

/// Outcome of [`Sidebar::on_mount`].
#[derive(Clone, Debug, PartialEq)]
pub struct MountReport {
    /// Normalized current page.
    pub active_path: NormalizedPath,
    /// Entry matching the current page.
    pub active: Option<NodeId>,
    /// Group headers expanded to reveal the active entry.
    pub expanded: BTreeSet<NodeId>,
    /// Scroll setup.
    pub scroll: ScrollRestore,
}

/// Sidebar navigation state for a single page view.
pub struct Sidebar {
    outline: Outline,
    hrefs: Vec<Option<String>>,
    options: SidebarOptions,
    storage: Arc<dyn SessionStorage>,
    active: Option<NodeId>,
    expanded: Vec<bool>,
    scroll_top: f64,
}

impl Sidebar {
    /// Create the sidebar for a page, rewriting links with the page's
    /// browsing root prefix.
    #[must_use]
    pub fn new(toc: &Toc, options: SidebarOptions, storage: Arc<dyn SessionStorage>) -> Self {
        let outline = Outline::new(toc);
        let hrefs = outline
            .iter()
            .map(|(_, entry)| {
                entry
                    .target_path
                    .as_deref()
                    .map(|href| rewrite_href(&options.path_to_root, href))
            })
            .collect();
        let expanded = initial_expansion(&outline, &options.render);

        Self {
            outline,
            hrefs,
            options,
            storage,
            active: None,
            expanded,
            scroll_top: 0.0,
        }
    }

    /// Flattened entries.
    #[must_use]
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// Root-relative link of an entry.
    #[must_use]
    pub fn href(&self, id: NodeId) -> Option<&str> {
        self.hrefs.get(id.0)?.as_deref()
    }

    /// Entry marked as the current page.
    #[must_use]
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    /// Whether an entry's item is expanded.
    #[must_use]
    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.get(id.0).copied().unwrap_or(false)
    }

    /// Current scroll offset of the sidebar.
    #[must_use]
    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Record that the user scrolled the sidebar.
    pub fn set_scroll_top(&mut self, offset: f64) {
        self.scroll_top = offset;
    }

    /// Mount the sidebar for the page at `location`.
    ///
    /// Resolves the active path, marks the active branch and restores the
    /// scroll position, in that order.
    pub fn on_mount(&mut self, location: &str) -> MountReport {
        let active_path = resolve_active_path(location);
        let expanded = self.mark_active(&active_path);
        let scroll = self.restore_scroll();
        MountReport {
            active_path,
            active: self.active,
            expanded,
            scroll,
        }
    }

    /// Mark the entry for `active_path` and expand every group header above
    /// it.
    ///
    /// Links are compared after resolving them against the current page, so
    /// nested pages match their root-relative links. When nothing matches
    /// and the page is a root-level index (`path_to_root` empty, path ending
    /// in `/index.html`), the first link stands in for it: the book's index
    /// page is an alias of its first chapter.
    ///
    /// Returns the expanded ancestors. Presentation state from an earlier
    /// call is reset first.
    pub fn mark_active(&mut self, active_path: &NormalizedPath) -> BTreeSet<NodeId> {
        self.active = None;
        self.expanded = initial_expansion(&self.outline, &self.options.render);

        let current = active_path.as_str();
        let matched = self
            .hrefs
            .iter()
            .position(|href| {
                href.as_deref()
                    .is_some_and(|href| resolve_link(current, href) == current)
            })
            .map(NodeId);

        let Some(active) = matched.or_else(|| self.index_alias(active_path)) else {
            tracing::debug!(path = %active_path, "No sidebar entry matches the current page");
            return BTreeSet::new();
        };

        self.active = Some(active);
        self.expanded[active.0] = true;

        let ancestors: BTreeSet<NodeId> = self.outline.ancestors(active).into_iter().collect();
        for id in &ancestors {
            self.expanded[id.0] = true;
        }

        tracing::debug!(
            path = %active_path,
            active = active.0,
            expanded = ancestors.len(),
            "Marked active sidebar entry"
        );
        ancestors
    }

    fn index_alias(&self, active_path: &NormalizedPath) -> Option<NodeId> {
        if self.options.path_to_root.is_empty() && active_path.is_index() {
            self.outline.first_link()
        } else {
            None
        }
    }

    /// Apply the scroll offset persisted by the previous page, once.
    ///
    /// The stored value is deleted as soon as it is read. Without a stored
    /// value the active entry (if any) is centered instead, which is the case
    /// after navigating with the previous/next chapter buttons.
    pub fn restore_scroll(&mut self) -> ScrollRestore {
        let stored = self
            .storage
            .take(&self.options.scroll_key)
            .filter(|value| !value.is_empty());

        if let Some(value) = stored {
            let offset = parse_offset(&value);
            self.scroll_top = offset;
            return ScrollRestore::Restored(offset);
        }

        match self.active {
            Some(id) => ScrollRestore::Centered(id),
            None => ScrollRestore::Unchanged,
        }
    }

    /// Persist the scroll offset before navigating away through a link.
    ///
    /// Clicks on anything but a link are ignored. Never blocks navigation.
    pub fn on_click_link(&self, event: &ClickEvent) {
        if matches!(event.target, ClickTarget::Link(_)) {
            self.storage
                .set(&self.options.scroll_key, &self.scroll_top.to_string());
        }
    }

    /// Flip the expansion of the group header owning the clicked toggle.
    ///
    /// Returns the new expansion state, or `None` when the click was not on
    /// a toggle of a known entry.
    pub fn on_click_toggle(&mut self, event: &ClickEvent) -> Option<bool> {
        let ClickTarget::Toggle(id) = event.target else {
            return None;
        };
        let flag = self.expanded.get_mut(id.0)?;
        *flag = !*flag;
        Some(*flag)
    }

    /// Markup with root-relative links and the current presentation state.
    #[must_use]
    pub fn to_html(&self) -> String {
        render_outline(&self.outline, self, &self.options.render)
    }
}

impl Presentation for Sidebar {
    fn href<'a>(&'a self, id: NodeId, _entry: &'a Entry) -> Option<Cow<'a, str>> {
        Sidebar::href(self, id).map(Cow::Borrowed)
    }

    fn is_active(&self, id: NodeId) -> bool {
        self.active == Some(id)
    }

    fn is_expanded(&self, id: NodeId) -> bool {
        Sidebar::is_expanded(self, id)
    }
}

fn initial_expansion(outline: &Outline, options: &RenderOptions) -> Vec<bool> {
    outline
        .iter()
        .map(|(_, entry)| options.fold.initially_expanded(entry.depth))
        .collect()
}

/// Interpret a persisted offset; unusable values scroll to the top.
fn parse_offset(value: &str) -> f64 {
    match value.trim().parse::<f64>() {
        Ok(offset) if offset.is_finite() => offset.max(0.0),
        _ => {
            tracing::warn!(value, "Ignoring unparseable sidebar scroll offset");
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::FoldConfig;
    use crate::test_support::{SAMPLE_BOOK_HTML, sample_book};
    use crate::tree::TreeNode;
    use pretty_assertions::assert_eq;
    use tocbox_session::MemoryStorage;

    const SITE: &str = "https://book.example/";

    fn sidebar_for(toc: &Toc, path_to_root: &str, storage: Arc<MemoryStorage>) -> Sidebar {
        let options = SidebarOptions {
            path_to_root: path_to_root.to_owned(),
            ..SidebarOptions::default()
        };
        Sidebar::new(toc, options, storage)
    }

    fn nested_toc() -> Toc {
        Toc::new(vec![
            TreeNode::chapter("A", "A").with_children(vec![
                TreeNode::chapter("A/B", "A/B")
                    .with_children(vec![TreeNode::chapter("A/B/C", "A/B/C")]),
            ]),
        ])
    }

    fn fold_options() -> SidebarOptions {
        SidebarOptions {
            render: RenderOptions {
                fold: FoldConfig {
                    enable: true,
                    level: 0,
                },
                ..RenderOptions::default()
            },
            ..SidebarOptions::default()
        }
    }

    #[test]
    fn test_links_rewritten_with_root_prefix() {
        let sidebar = sidebar_for(&sample_book(), "../", Arc::new(MemoryStorage::new()));

        assert_eq!(sidebar.href(NodeId(0)), Some("../introduction.html"));
        assert_eq!(sidebar.href(NodeId(3)), Some("../level/representation.html"));
        // Drafts have no link
        assert_eq!(sidebar.href(NodeId(6)), None);
    }

    #[test]
    fn test_mark_active_expands_ancestors() {
        let mut sidebar = sidebar_for(&nested_toc(), "../../", Arc::new(MemoryStorage::new()));

        let expanded = sidebar.mark_active(&resolve_active_path("https://book.example/A/B/C"));

        assert_eq!(expanded, BTreeSet::from([NodeId(0), NodeId(1)]));
        assert_eq!(sidebar.active(), Some(NodeId(2)));
        let active_count = sidebar
            .outline()
            .iter()
            .filter(|(id, _)| sidebar.is_active(*id))
            .count();
        assert_eq!(active_count, 1);
    }

    #[test]
    fn test_mark_active_nested_page() {
        let mut sidebar = sidebar_for(&sample_book(), "../", Arc::new(MemoryStorage::new()));

        let expanded =
            sidebar.mark_active(&resolve_active_path("https://book.example/solver/tunnels.html"));

        let active = sidebar.active().unwrap();
        assert_eq!(sidebar.outline().get(active).unwrap().label, "Tunnels");
        let labels: Vec<_> = expanded
            .iter()
            .map(|id| sidebar.outline().get(*id).unwrap().label.as_str())
            .collect();
        assert_eq!(labels, ["Solver", "Optimization"]);
    }

    #[test]
    fn test_mark_active_ignores_fragment() {
        let mut sidebar = sidebar_for(&sample_book(), "", Arc::new(MemoryStorage::new()));

        sidebar.mark_active(&resolve_active_path("https://book.example/design.html#goals"));

        assert_eq!(sidebar.active(), Some(NodeId(1)));
    }

    #[test]
    fn test_mark_active_directory_location() {
        let mut sidebar = sidebar_for(&sample_book(), "../", Arc::new(MemoryStorage::new()));

        sidebar.mark_active(&resolve_active_path("https://book.example/level/"));

        let active = sidebar.active().unwrap();
        assert_eq!(sidebar.outline().get(active).unwrap().label, "Levels");
    }

    #[test]
    fn test_root_index_aliases_first_chapter() {
        let mut sidebar = sidebar_for(&sample_book(), "", Arc::new(MemoryStorage::new()));

        let expanded = sidebar.mark_active(&resolve_active_path(SITE));

        assert_eq!(sidebar.active(), Some(NodeId(0)));
        assert!(expanded.is_empty());
    }

    #[test]
    fn test_index_alias_requires_empty_root_prefix() {
        let mut sidebar = sidebar_for(&sample_book(), "../", Arc::new(MemoryStorage::new()));

        sidebar.mark_active(&resolve_active_path("https://book.example/misc/index.html"));

        assert_eq!(sidebar.active(), None);
    }

    #[test]
    fn test_exact_match_wins_over_alias() {
        let toc = Toc::new(vec![
            TreeNode::chapter("Intro", "intro.html"),
            TreeNode::chapter("Home", "index.html"),
        ]);
        let mut sidebar = sidebar_for(&toc, "", Arc::new(MemoryStorage::new()));

        sidebar.mark_active(&resolve_active_path(SITE));

        assert_eq!(sidebar.active(), Some(NodeId(1)));
    }

    #[test]
    fn test_no_match_leaves_nothing_active() {
        let mut sidebar = sidebar_for(&sample_book(), "", Arc::new(MemoryStorage::new()));

        let expanded =
            sidebar.mark_active(&resolve_active_path("https://book.example/print.html"));

        assert!(expanded.is_empty());
        assert_eq!(sidebar.active(), None);
    }

    #[test]
    fn test_mark_active_resets_previous_state() {
        let mut sidebar = sidebar_for(&nested_toc(), "../../", Arc::new(MemoryStorage::new()));
        sidebar.mark_active(&resolve_active_path("https://book.example/A/B/C"));

        sidebar.mark_active(&resolve_active_path("https://book.example/elsewhere"));

        assert_eq!(sidebar.active(), None);
    }

    #[test]
    fn test_mark_active_expands_collapsed_branch() {
        let storage = Arc::new(MemoryStorage::new());
        let options = SidebarOptions {
            path_to_root: "../".to_owned(),
            ..fold_options()
        };
        let mut sidebar = Sidebar::new(&sample_book(), options, storage);
        // Every entry starts collapsed with fold level 0
        assert!(!sidebar.is_expanded(NodeId(2)));

        sidebar.mark_active(&resolve_active_path(
            "https://book.example/level/construction.html",
        ));

        assert!(sidebar.is_expanded(NodeId(2)));
        assert!(sidebar.is_expanded(NodeId(4)));
        // Unrelated branch stays collapsed
        assert!(!sidebar.is_expanded(NodeId(7)));
    }

    #[test]
    fn test_restore_scroll_applies_and_deletes_offset() {
        let storage = Arc::new(MemoryStorage::new().with_value(DEFAULT_SCROLL_KEY, "240"));
        let mut sidebar = sidebar_for(&sample_book(), "", Arc::clone(&storage));

        let first = sidebar.restore_scroll();
        let second = sidebar.restore_scroll();

        assert_eq!(first, ScrollRestore::Restored(240.0));
        assert_eq!(second, ScrollRestore::Unchanged);
        assert_eq!(storage.get(DEFAULT_SCROLL_KEY), None);
        assert!((sidebar.scroll_top() - 240.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_restore_scroll_centers_active_without_offset() {
        let mut sidebar = sidebar_for(&sample_book(), "", Arc::new(MemoryStorage::new()));
        sidebar.mark_active(&resolve_active_path("https://book.example/resources.html"));

        let scroll = sidebar.restore_scroll();

        assert_eq!(scroll, ScrollRestore::Centered(NodeId(17)));
    }

    #[test]
    fn test_restore_scroll_without_active_entry() {
        let mut sidebar = sidebar_for(&sample_book(), "", Arc::new(MemoryStorage::new()));

        assert_eq!(sidebar.restore_scroll(), ScrollRestore::Unchanged);
    }

    #[test]
    fn test_restore_scroll_empty_value_falls_back() {
        let storage = Arc::new(MemoryStorage::new().with_value(DEFAULT_SCROLL_KEY, ""));
        let mut sidebar = sidebar_for(&sample_book(), "", Arc::clone(&storage));
        sidebar.mark_active(&resolve_active_path("https://book.example/design.html"));

        assert_eq!(sidebar.restore_scroll(), ScrollRestore::Centered(NodeId(1)));
        assert!(storage.is_empty());
    }

    #[test]
    fn test_restore_scroll_garbage_value_scrolls_to_top() {
        let storage = Arc::new(MemoryStorage::new().with_value(DEFAULT_SCROLL_KEY, "abc"));
        let mut sidebar = sidebar_for(&sample_book(), "", storage);
        sidebar.set_scroll_top(50.0);

        assert_eq!(sidebar.restore_scroll(), ScrollRestore::Restored(0.0));
        assert!(sidebar.scroll_top().abs() < f64::EPSILON);
    }

    #[test]
    fn test_click_link_persists_scroll_offset() {
        let storage = Arc::new(MemoryStorage::new());
        let mut sidebar = sidebar_for(&sample_book(), "", Arc::clone(&storage));
        sidebar.set_scroll_top(120.0);

        sidebar.on_click_link(&ClickEvent::link(NodeId(3)));

        assert_eq!(storage.get(DEFAULT_SCROLL_KEY).as_deref(), Some("120"));
    }

    #[test]
    fn test_click_elsewhere_persists_nothing() {
        let storage = Arc::new(MemoryStorage::new());
        let sidebar = sidebar_for(&sample_book(), "", Arc::clone(&storage));

        sidebar.on_click_link(&ClickEvent {
            target: ClickTarget::Other,
        });
        sidebar.on_click_link(&ClickEvent::toggle(NodeId(2)));

        assert!(storage.is_empty());
    }

    #[test]
    fn test_scroll_offset_survives_navigation() {
        let storage = Arc::new(MemoryStorage::new());
        let toc = sample_book();

        // Page 1: user scrolls and clicks a sidebar link
        let mut page = sidebar_for(&toc, "", Arc::clone(&storage));
        page.on_mount("https://book.example/design.html");
        page.set_scroll_top(310.5);
        page.on_click_link(&ClickEvent::link(NodeId(11)));

        // Page 2: offset restored and consumed
        let mut next = sidebar_for(&toc, "../", Arc::clone(&storage));
        let report = next.on_mount("https://book.example/solver/tunnels.html");
        assert_eq!(report.scroll, ScrollRestore::Restored(310.5));
        assert_eq!(report.active, Some(NodeId(11)));

        // Page 3: reached through "next chapter", nothing stored
        let mut third = sidebar_for(&toc, "../", Arc::clone(&storage));
        let report = third.on_mount("https://book.example/solver/deadlocks.html");
        assert_eq!(report.scroll, ScrollRestore::Centered(NodeId(12)));
    }

    #[test]
    fn test_on_mount_report() {
        let mut sidebar = sidebar_for(&nested_toc(), "../../", Arc::new(MemoryStorage::new()));

        let report = sidebar.on_mount("https://book.example/A/B/C#top");

        assert_eq!(report.active_path.as_str(), "https://book.example/A/B/C");
        assert_eq!(report.active, Some(NodeId(2)));
        assert_eq!(report.expanded, BTreeSet::from([NodeId(0), NodeId(1)]));
        assert_eq!(report.scroll, ScrollRestore::Centered(NodeId(2)));
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut sidebar = Sidebar::new(
            &sample_book(),
            fold_options(),
            Arc::new(MemoryStorage::new()),
        );
        let before = sidebar.is_expanded(NodeId(2));

        assert_eq!(
            sidebar.on_click_toggle(&ClickEvent::toggle(NodeId(2))),
            Some(!before)
        );
        assert_eq!(
            sidebar.on_click_toggle(&ClickEvent::toggle(NodeId(2))),
            Some(before)
        );
        assert_eq!(sidebar.is_expanded(NodeId(2)), before);
    }

    #[test]
    fn test_toggle_does_not_touch_active_or_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let mut sidebar = sidebar_for(&sample_book(), "", Arc::clone(&storage));
        sidebar.mark_active(&resolve_active_path("https://book.example/design.html"));

        sidebar.on_click_toggle(&ClickEvent::toggle(NodeId(2)));

        assert_eq!(sidebar.active(), Some(NodeId(1)));
        assert!(storage.is_empty());
    }

    #[test]
    fn test_toggle_ignores_other_targets() {
        let mut sidebar = sidebar_for(&sample_book(), "", Arc::new(MemoryStorage::new()));

        assert_eq!(sidebar.on_click_toggle(&ClickEvent::link(NodeId(2))), None);
        assert_eq!(sidebar.on_click_toggle(&ClickEvent::toggle(NodeId(999))), None);
    }

    #[test]
    fn test_to_html_before_mount_matches_static_render() {
        let sidebar = sidebar_for(&sample_book(), "", Arc::new(MemoryStorage::new()));

        assert_eq!(sidebar.to_html(), SAMPLE_BOOK_HTML);
    }

    #[test]
    fn test_to_html_marks_active_link() {
        let mut sidebar = sidebar_for(&sample_book(), "../", Arc::new(MemoryStorage::new()));
        sidebar.on_mount("https://book.example/level/normalization.html");

        let html = sidebar.to_html();

        assert!(html.contains(
            "<a href=\"../level/normalization.html\" class=\"active\">\
             <strong aria-hidden=\"true\">2.3.</strong> Normalization 🚧</a>"
        ));
        assert_eq!(html.matches("class=\"active\"").count(), 1);
    }

    #[test]
    fn test_parse_offset() {
        assert!((parse_offset("12.5") - 12.5).abs() < f64::EPSILON);
        assert!(parse_offset("-4").abs() < f64::EPSILON);
        assert!(parse_offset("NaN").abs() < f64::EPSILON);
    }
}
