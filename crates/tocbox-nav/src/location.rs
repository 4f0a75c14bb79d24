//! Page location normalization and link resolution.
//!
//! The sidebar compares every link against the page being displayed. Both
//! sides are brought into the same shape first:
//! - the current location loses its fragment and gains `index.html` when it
//!   names a directory ([`resolve_active_path`])
//! - each link is made root-relative with the browsing root prefix
//!   ([`rewrite_href`]) and then resolved against the current page the way a
//!   browser resolves `<a href>` ([`resolve_link`])
//!
//! All functions here are total: any input produces a comparison key.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Canonical resource name appended to directory locations.
pub const INDEX_PAGE: &str = "index.html";

/// Links that must not be prefixed with the browsing root:
/// `scheme://...` or protocol-relative `//...`.
static EXTERNAL_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[a-z+]+:)?//").unwrap());

/// References that carry their own scheme (`https:`, `mailto:`).
static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*:").unwrap());

/// Current page identifier used for equality against resolved links.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NormalizedPath(String);

impl NormalizedPath {
    /// The comparison key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the key names a directory index page.
    #[must_use]
    pub fn is_index(&self) -> bool {
        self.0.ends_with("/index.html")
    }
}

impl AsRef<str> for NormalizedPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a browser location into the active page key.
///
/// Everything from the first `#` is dropped. A location ending in `/`
/// denotes a directory and is completed with [`INDEX_PAGE`].
///
/// # Example
///
/// ```
/// use tocbox_nav::resolve_active_path;
///
/// let path = resolve_active_path("https://book.example/level/#parsing");
/// assert_eq!(path.as_str(), "https://book.example/level/index.html");
/// ```
#[must_use]
pub fn resolve_active_path(location: &str) -> NormalizedPath {
    let page = location.split_once('#').map_or(location, |(page, _)| page);
    let mut path = page.to_owned();
    if path.ends_with('/') {
        path.push_str(INDEX_PAGE);
    }
    NormalizedPath(path)
}

/// Whether `href` points outside the book (absolute or protocol-relative).
#[must_use]
pub fn is_external(href: &str) -> bool {
    EXTERNAL_LINK_RE.is_match(href)
}

/// Make a book-relative link root-relative for the current page.
///
/// Empty hrefs, in-page fragments and external links are returned unchanged.
#[must_use]
pub fn rewrite_href(path_to_root: &str, href: &str) -> String {
    if href.is_empty() || href.starts_with('#') || is_external(href) {
        href.to_owned()
    } else {
        format!("{path_to_root}{href}")
    }
}

/// Browsing root prefix for a book-relative page path.
///
/// One `../` per directory level: `level/parse.html` gives `../`,
/// `introduction.html` gives the empty prefix.
#[must_use]
pub fn path_to_root(page: &str) -> String {
    let page = page.trim_start_matches('/');
    "../".repeat(page.matches('/').count())
}

/// Resolve `reference` against the page at `base`, as a browser resolves a
/// link's `href` property.
///
/// Handles absolute references, protocol-relative references, fragments,
/// root-absolute and relative paths, and removes `.`/`..` segments. Bases
/// without a scheme are treated as bare paths.
#[must_use]
pub fn resolve_link(base: &str, reference: &str) -> String {
    if SCHEME_RE.is_match(reference) {
        return reference.to_owned();
    }

    let (origin, base_path) = split_origin(base);

    if reference.starts_with("//") {
        return match base.find("://") {
            Some(i) => format!("{}{reference}", &base[..=i]),
            None => reference.to_owned(),
        };
    }

    let base_page = strip_suffix(base_path);
    if reference.is_empty() {
        return format!("{origin}{base_page}");
    }
    if reference.starts_with('#') {
        let without_fragment = base_path.split_once('#').map_or(base_path, |(p, _)| p);
        return format!("{origin}{without_fragment}{reference}");
    }

    let split = reference.find(['?', '#']).unwrap_or(reference.len());
    let (ref_path, suffix) = reference.split_at(split);
    if ref_path.is_empty() {
        return format!("{origin}{base_page}{suffix}");
    }

    let merged = if ref_path.starts_with('/') {
        ref_path.to_owned()
    } else if !origin.is_empty() && base_page.is_empty() {
        format!("/{ref_path}")
    } else {
        match base_page.rfind('/') {
            Some(i) => format!("{}{ref_path}", &base_page[..=i]),
            None => ref_path.to_owned(),
        }
    };

    format!("{origin}{}{suffix}", remove_dot_segments(&merged))
}

/// Split `scheme://authority` from the rest of a location.
fn split_origin(location: &str) -> (&str, &str) {
    let Some(i) = location.find("://") else {
        return ("", location);
    };
    let after = i + 3;
    let end = location[after..]
        .find(['/', '?', '#'])
        .map_or(location.len(), |j| after + j);
    location.split_at(end)
}

/// Drop query and fragment from a path.
fn strip_suffix(path: &str) -> &str {
    path.find(['?', '#']).map_or(path, |i| &path[..i])
}

/// Remove `.` and `..` segments from a path.
fn remove_dot_segments(path: &str) -> String {
    let absolute = path.starts_with('/');
    let body = if absolute { &path[1..] } else { path };

    let segments: Vec<&str> = body.split('/').collect();
    let last = segments.len() - 1;
    let mut out: Vec<&str> = Vec::with_capacity(segments.len());
    let mut trailing_slash = false;
    for (i, segment) in segments.into_iter().enumerate() {
        match segment {
            "." => trailing_slash = i == last,
            ".." => {
                out.pop();
                trailing_slash = i == last;
            }
            _ => out.push(segment),
        }
    }
    if trailing_slash {
        out.push("");
    }

    let joined = out.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}
