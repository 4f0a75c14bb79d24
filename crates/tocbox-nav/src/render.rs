//! Sidebar markup.
//!
//! Produces the nested ordered-list structure the book's stylesheet and
//! scripts expect:
//!
//! ```text
//! <ol class="chapter">
//!   <li class="chapter-item expanded affix "><a href="introduction.html">Intro</a></li>
//!   <li class="chapter-item expanded "><a href="level/index.html"><strong aria-hidden="true">1.</strong> Level</a></li>
//!   <li><ol class="section">...children of 1....</ol></li>
//! </ol>
//! ```
//!
//! Children follow their group header as a separate `<li>`, which is what the
//! active-path walk relies on when it expands a branch.

use std::borrow::Cow;
use std::fmt::Write;

use crate::outline::{Entry, NodeId, Outline};
use crate::tree::Toc;

/// Default marker appended to unfinished chapters.
pub const DEFAULT_IN_PROGRESS_MARKER: &str = "🚧";

/// Folding behaviour of group headers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FoldConfig {
    /// Render toggles and start deep sections collapsed.
    pub enable: bool,
    /// Entries shallower than this depth start expanded when folding.
    pub level: usize,
}

impl FoldConfig {
    /// Initial expansion of an entry at `depth`.
    #[must_use]
    pub fn initially_expanded(&self, depth: usize) -> bool {
        !self.enable || depth < self.level
    }
}

/// Options shared by static and per-page rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Folding behaviour.
    pub fold: FoldConfig,
    /// Text appended to unfinished chapter labels.
    pub in_progress_marker: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fold: FoldConfig::default(),
            in_progress_marker: DEFAULT_IN_PROGRESS_MARKER.to_owned(),
        }
    }
}

/// Per-entry presentation state consulted while rendering.
pub(crate) trait Presentation {
    /// Link target to emit, `None` renders the entry as plain text.
    fn href<'a>(&'a self, id: NodeId, entry: &'a Entry) -> Option<Cow<'a, str>>;
    /// Entry is the current page.
    fn is_active(&self, id: NodeId) -> bool;
    /// Entry's item carries the `expanded` class.
    fn is_expanded(&self, id: NodeId) -> bool;
}

/// Initial presentation: book-relative links, nothing active.
struct Initial<'a> {
    outline: &'a Outline,
    fold: FoldConfig,
}

impl Presentation for Initial<'_> {
    fn href<'a>(&'a self, _id: NodeId, entry: &'a Entry) -> Option<Cow<'a, str>> {
        entry.target_path.as_deref().map(Cow::Borrowed)
    }

    fn is_active(&self, _id: NodeId) -> bool {
        false
    }

    fn is_expanded(&self, id: NodeId) -> bool {
        self.outline
            .get(id)
            .is_some_and(|e| self.fold.initially_expanded(e.depth))
    }
}

/// Render a table of contents into sidebar markup.
///
/// This is the static projection: links stay book-relative and no entry is
/// active. Use [`Sidebar::to_html`](crate::Sidebar::to_html) for markup
/// annotated for a particular page.
#[must_use]
pub fn render(toc: &Toc, options: &RenderOptions) -> String {
    let outline = Outline::new(toc);
    let initial = Initial {
        outline: &outline,
        fold: options.fold,
    };
    render_outline(&outline, &initial, options)
}

pub(crate) fn render_outline(
    outline: &Outline,
    presentation: &impl Presentation,
    options: &RenderOptions,
) -> String {
    let mut html = String::with_capacity(outline.len() * 128);
    html.push_str("<ol class=\"chapter\">");
    write_items(&mut html, outline, outline.roots(), presentation, options);
    html.push_str("</ol>");
    html
}

fn write_items(
    html: &mut String,
    outline: &Outline,
    ids: &[NodeId],
    presentation: &impl Presentation,
    options: &RenderOptions,
) {
    for &id in ids {
        let Some(entry) = outline.get(id) else {
            continue;
        };

        html.push_str("<li class=\"chapter-item ");
        if presentation.is_expanded(id) {
            html.push_str("expanded ");
        }
        if entry.affix {
            html.push_str("affix ");
        }
        html.push_str("\">");

        if let Some(href) = presentation.href(id, entry) {
            let _ = write!(html, "<a href=\"{}\"", escape(&href));
            if presentation.is_active(id) {
                html.push_str(" class=\"active\"");
            }
            html.push('>');
            write_label(html, entry, options);
            html.push_str("</a>");
        } else {
            html.push_str("<div>");
            write_label(html, entry, options);
            html.push_str("</div>");
        }

        if options.fold.enable && entry.is_group() {
            html.push_str("<a class=\"toggle\"><div>❱</div></a>");
        }
        html.push_str("</li>");

        if entry.is_group() {
            html.push_str("<li><ol class=\"section\">");
            write_items(html, outline, &entry.children, presentation, options);
            html.push_str("</ol></li>");
        }
    }
}

fn write_label(html: &mut String, entry: &Entry, options: &RenderOptions) {
    if let Some(number) = &entry.number {
        let _ = write!(html, "<strong aria-hidden=\"true\">{number}</strong> ");
    }
    html.push_str(&escape(&entry.label));
    if entry.in_progress && !options.in_progress_marker.is_empty() {
        html.push(' ');
        html.push_str(&escape(&options.in_progress_marker));
    }
}

/// Escape HTML special characters.
fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
