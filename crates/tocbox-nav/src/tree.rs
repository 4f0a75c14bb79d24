//! Static table of contents data.
//!
//! A [`Toc`] is fixed at build time: it is rendered once per page view and
//! never changes shape afterwards. Only presentation state (active and
//! expanded flags) is layered on top by [`Sidebar`](crate::Sidebar).

use std::fmt;

use serde::{Deserialize, Serialize};

/// One entry in the table of contents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Display text.
    pub label: String,
    /// Book-relative page this entry links to (e.g. `level/index.html`).
    /// `None` for draft chapters, which render as plain group headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_path: Option<String>,
    /// Nested entries, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
    /// Author flagged this chapter as unfinished.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub in_progress: bool,
    /// Unnumbered prefix or suffix chapter (e.g. an introduction).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub affix: bool,
}

impl TreeNode {
    /// Chapter linking to `target_path`.
    #[must_use]
    pub fn chapter(label: impl Into<String>, target_path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target_path: Some(target_path.into()),
            children: Vec::new(),
            in_progress: false,
            affix: false,
        }
    }

    /// Draft chapter without a page.
    #[must_use]
    pub fn draft(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target_path: None,
            children: Vec::new(),
            in_progress: false,
            affix: false,
        }
    }

    /// Mark as unnumbered prefix/suffix chapter.
    #[must_use]
    pub fn affix(mut self) -> Self {
        self.affix = true;
        self
    }

    /// Mark as unfinished.
    #[must_use]
    pub fn in_progress(mut self) -> Self {
        self.in_progress = true;
        self
    }

    /// Replace the children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    /// Whether this entry is a group header (has nested entries).
    #[must_use]
    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Ordered top-level entries of a book.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toc {
    /// Top-level entries.
    #[serde(default, rename = "chapter")]
    pub nodes: Vec<TreeNode>,
}

impl Toc {
    /// Create a table of contents from top-level entries.
    #[must_use]
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    /// Whether the book has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of entries at every depth.
    #[must_use]
    pub fn len(&self) -> usize {
        fn count(nodes: &[TreeNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.nodes)
    }
}

/// Decorative section number such as `2.1.`.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionNumber(pub Vec<u32>);

impl SectionNumber {
    /// Number of the `index`-th (1-based) child of this section.
    #[must_use]
    pub fn child(&self, index: u32) -> Self {
        let mut parts = self.0.clone();
        parts.push(index);
        Self(parts)
    }
}

impl fmt::Display for SectionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.0 {
            write!(f, "{part}.")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_builder() {
        let node = TreeNode::chapter("Design", "design.html").in_progress();

        assert_eq!(node.label, "Design");
        assert_eq!(node.target_path.as_deref(), Some("design.html"));
        assert!(node.in_progress);
        assert!(!node.affix);
        assert!(!node.is_group());
    }

    #[test]
    fn test_draft_has_no_target() {
        let node = TreeNode::draft("Actions");

        assert!(node.target_path.is_none());
    }

    #[test]
    fn test_toc_len_counts_nested() {
        let toc = Toc::new(vec![
            TreeNode::chapter("A", "a.html").with_children(vec![
                TreeNode::chapter("B", "a/b.html")
                    .with_children(vec![TreeNode::chapter("C", "a/b/c.html")]),
            ]),
            TreeNode::chapter("D", "d.html"),
        ]);

        assert_eq!(toc.len(), 4);
        assert!(!toc.is_empty());
    }

    #[test]
    fn test_section_number_display() {
        let number = SectionNumber(vec![4]).child(3).child(1);

        assert_eq!(number.to_string(), "4.3.1.");
        assert_eq!(SectionNumber::default().to_string(), "");
    }

    #[test]
    fn test_toc_deserializes_from_toml() {
        let toml = r#"
[[chapter]]
label = "Introduction"
target_path = "introduction.html"
affix = true

[[chapter]]
label = "Level"
target_path = "level/index.html"

[[chapter.children]]
label = "Normalization"
target_path = "level/normalization.html"
in_progress = true
"#;
        let toc: Toc = toml::from_str(toml).unwrap();

        assert_eq!(toc.nodes.len(), 2);
        assert!(toc.nodes[0].affix);
        assert_eq!(toc.nodes[1].children[0].label, "Normalization");
        assert!(toc.nodes[1].children[0].in_progress);
    }

    #[test]
    fn test_tree_node_serialization_skips_defaults() {
        let node = TreeNode::chapter("Guide", "guide.html");

        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["label"], "Guide");
        assert_eq!(json["target_path"], "guide.html");
        assert!(json.get("children").is_none());
        assert!(json.get("in_progress").is_none());
        assert!(json.get("affix").is_none());
    }
}
