//! `SUMMARY.md` outline parsing.
//!
//! The book's chapter tree is authored as a markdown outline:
//!
//! ```markdown
//! # Summary
//!
//! [Introduction](introduction.md)
//!
//! - [Levels](level/README.md)
//!   - [Parsing](level/parse.md)
//! - [Actions]()
//! ```
//!
//! - links in paragraphs outside any list are unnumbered (affix) chapters
//! - list items are numbered chapters, nested lists their children
//! - an empty destination (`[Actions]()`) is a draft without a page
//! - `.md` targets become `.html`, `README.md` becomes `index.html`
//! - a trailing in-progress marker in the title sets the unfinished flag
//!
//! Headings, rules and any other text are ignored.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use crate::location::INDEX_PAGE;
use crate::tree::{Toc, TreeNode};

/// Error from parsing a summary outline.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SummaryError {
    /// A list item does not contain a chapter link.
    #[error("line {line}: list item has no chapter link")]
    MissingLink {
        /// 1-based line of the item.
        line: usize,
    },
    /// A list item contains more than one chapter link.
    #[error("line {line}: list item has more than one chapter link")]
    ExtraLink {
        /// 1-based line of the item.
        line: usize,
    },
}

/// Parse a `SUMMARY.md` outline into a table of contents.
///
/// # Errors
///
/// Returns [`SummaryError`] when a list item has no link or several links.
pub fn parse_summary(text: &str, in_progress_marker: &str) -> Result<Toc, SummaryError> {
    // lists[0] collects top-level entries; deeper levels are pushed per list.
    let mut lists: Vec<Vec<TreeNode>> = vec![Vec::new()];
    // Open list items: their chapter (once its link closed) and source line.
    let mut items: Vec<(Option<TreeNode>, usize)> = Vec::new();
    // Link being read: destination and accumulated label.
    let mut link: Option<(String, String)> = None;
    // Links in headings are decoration, not chapters.
    let mut in_heading = false;

    for (event, range) in Parser::new(text).into_offset_iter() {
        match event {
            Event::Start(Tag::List(_)) => lists.push(Vec::new()),
            Event::End(TagEnd::List(_)) => {
                let finished = lists.pop().unwrap_or_default();
                match items.last_mut() {
                    Some((Some(parent), _)) => parent.children.extend(finished),
                    Some((None, line)) => return Err(SummaryError::MissingLink { line: *line }),
                    None => {
                        if let Some(level) = lists.last_mut() {
                            level.extend(finished);
                        }
                    }
                }
            }
            Event::Start(Tag::Item) => items.push((None, line_of(text, range.start))),
            Event::End(TagEnd::Item) => {
                let Some((chapter, line)) = items.pop() else {
                    continue;
                };
                let chapter = chapter.ok_or(SummaryError::MissingLink { line })?;
                if let Some(level) = lists.last_mut() {
                    level.push(chapter);
                }
            }
            Event::Start(Tag::Heading { .. }) => in_heading = true,
            Event::End(TagEnd::Heading(_)) => in_heading = false,
            Event::Start(Tag::Link { dest_url, .. }) if !in_heading => {
                link = Some((dest_url.into_string(), String::new()));
            }
            Event::Text(fragment) | Event::Code(fragment) => {
                if let Some((_, label)) = link.as_mut() {
                    label.push_str(&fragment);
                }
            }
            Event::End(TagEnd::Link) => {
                let Some((dest, label)) = link.take() else {
                    continue;
                };
                let chapter = chapter_from_link(&dest, &label, in_progress_marker);
                match items.last_mut() {
                    Some((slot, line)) => {
                        if slot.is_some() {
                            return Err(SummaryError::ExtraLink { line: *line });
                        }
                        *slot = Some(chapter);
                    }
                    None => lists[0].push(chapter.affix()),
                }
            }
            _ => {}
        }
    }

    let nodes = lists.into_iter().next().unwrap_or_default();
    tracing::debug!(chapters = nodes.len(), "Parsed summary");
    Ok(Toc::new(nodes))
}

fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}

fn chapter_from_link(dest: &str, label: &str, marker: &str) -> TreeNode {
    let mut label = label.trim();
    let mut in_progress = false;
    if !marker.is_empty()
        && let Some(stripped) = label.strip_suffix(marker)
    {
        label = stripped.trim_end();
        in_progress = true;
    }

    let mut chapter = if dest.is_empty() {
        TreeNode::draft(label)
    } else {
        TreeNode::chapter(label, page_target(dest))
    };
    chapter.in_progress = in_progress;
    chapter
}

/// Map a summary link destination to the rendered page path.
fn page_target(dest: &str) -> String {
    let dest = dest.strip_prefix("./").unwrap_or(dest);
    let (path, fragment) = match dest.find('#') {
        Some(i) => dest.split_at(i),
        None => (dest, ""),
    };
    let Some(stem) = path.strip_suffix(".md") else {
        return dest.to_owned();
    };
    if stem == "README" {
        return format!("{INDEX_PAGE}{fragment}");
    }
    if let Some(dir) = stem.strip_suffix("/README") {
        return format!("{dir}/{INDEX_PAGE}{fragment}");
    }
    format!("{stem}.html{fragment}")
}
