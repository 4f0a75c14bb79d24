//! Flattened view of a [`Toc`].
//!
//! Entries are stored in a flat `Vec` in pre-order, with parent/children
//! relationships tracked by [`NodeId`]. This gives:
//! - stable identities for presentation state and click events
//! - O(d) ancestor walks where d is the entry depth
//! - document-order iteration matching the rendered links

use crate::tree::{SectionNumber, Toc, TreeNode};

/// Identity of an entry: its pre-order position in the outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

/// One flattened entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Display text.
    pub label: String,
    /// Book-relative target, `None` for drafts.
    pub target_path: Option<String>,
    /// Unfinished chapter flag.
    pub in_progress: bool,
    /// Unnumbered prefix/suffix chapter.
    pub affix: bool,
    /// Nesting depth, 0 for top-level entries.
    pub depth: usize,
    /// Decorative number, `None` for affix chapters.
    pub number: Option<SectionNumber>,
    /// Enclosing group header.
    pub parent: Option<NodeId>,
    /// Nested entries in display order.
    pub children: Vec<NodeId>,
}

impl Entry {
    /// Whether this entry heads a nested section.
    #[must_use]
    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Pre-order arena of table of contents entries.
#[derive(Clone, Debug, Default)]
pub struct Outline {
    entries: Vec<Entry>,
    roots: Vec<NodeId>,
}

impl Outline {
    /// Flatten a table of contents.
    #[must_use]
    pub fn new(toc: &Toc) -> Self {
        let mut outline = Self::default();
        let roots = outline.push_level(&toc.nodes, None, 0, &SectionNumber::default());
        outline.roots = roots;
        outline
    }

    fn push_level(
        &mut self,
        nodes: &[TreeNode],
        parent: Option<NodeId>,
        depth: usize,
        prefix: &SectionNumber,
    ) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(nodes.len());
        let mut counter = 0;
        for node in nodes {
            let number = if node.affix {
                None
            } else {
                counter += 1;
                Some(prefix.child(counter))
            };
            let id = NodeId(self.entries.len());
            self.entries.push(Entry {
                label: node.label.clone(),
                target_path: node.target_path.clone(),
                in_progress: node.in_progress,
                affix: node.affix,
                depth,
                number: number.clone(),
                parent,
                children: Vec::new(),
            });
            let child_prefix = number.unwrap_or_default();
            let children = self.push_level(&node.children, Some(id), depth + 1, &child_prefix);
            self.entries[id.0].children = children;
            ids.push(id);
        }
        ids
    }

    /// Entry by id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Entry> {
        self.entries.get(id.0)
    }

    /// Top-level entries.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the outline is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Entry)> {
        self.entries.iter().enumerate().map(|(i, e)| (NodeId(i), e))
    }

    /// Ancestors of `id`, nearest first. Excludes `id` itself.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut ancestors = Vec::new();
        let mut current = self.get(id).and_then(|e| e.parent);
        while let Some(parent) = current {
            ancestors.push(parent);
            current = self.entries[parent.0].parent;
        }
        ancestors
    }

    /// First entry that has a link target, in document order.
    #[must_use]
    pub fn first_link(&self) -> Option<NodeId> {
        self.iter()
            .find(|(_, e)| e.target_path.is_some())
            .map(|(id, _)| id)
    }

    /// Find the first entry linking to `target_path`.
    #[must_use]
    pub fn find_target(&self, target_path: &str) -> Option<NodeId> {
        self.iter()
            .find(|(_, e)| e.target_path.as_deref() == Some(target_path))
            .map(|(id, _)| id)
    }
}
