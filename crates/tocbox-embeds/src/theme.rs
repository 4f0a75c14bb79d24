//! Comment widget theme synchronization.
//!
//! The widget lives in a cross-origin frame, so the page can only steer it
//! with messages of the form `{"giscus": {"setConfig": {"theme": ...}}}`
//! posted to the widget's origin. The widget theme is derived from the book
//! theme twice: once from the document's class list when the embed script is
//! created, and again whenever the reader picks a theme from the theme list.

use std::fmt::Write;

use serde_json::{Value, json};

/// Mapping from book themes to widget themes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemePalette {
    /// Book theme names that count as light.
    pub light_themes: Vec<String>,
    /// Widget theme used with light book themes.
    pub light: String,
    /// Widget theme used otherwise.
    pub dark: String,
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self {
            light_themes: vec!["light".to_owned(), "rust".to_owned()],
            light: "light".to_owned(),
            dark: "transparent_dark".to_owned(),
        }
    }
}

impl ThemePalette {
    /// Widget theme for a document whose root element has `html_class`.
    ///
    /// Substring test: any light theme name occurring in the class string
    /// selects the light widget theme.
    #[must_use]
    pub fn widget_theme_for_document(&self, html_class: &str) -> &str {
        if self
            .light_themes
            .iter()
            .any(|name| html_class.contains(name.as_str()))
        {
            &self.light
        } else {
            &self.dark
        }
    }

    /// Widget theme for a theme picked from the theme list by its id.
    ///
    /// Exact test, unlike [`widget_theme_for_document`](Self::widget_theme_for_document).
    #[must_use]
    pub fn widget_theme_for_selection(&self, theme_id: &str) -> &str {
        if self.light_themes.iter().any(|name| name == theme_id) {
            &self.light
        } else {
            &self.dark
        }
    }
}

/// Theme change message for the widget frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetMessage {
    /// Origin the message must be posted to.
    pub target_origin: String,
    /// Widget theme to switch to.
    pub theme: String,
}

impl WidgetMessage {
    /// Message payload as posted to the frame.
    #[must_use]
    pub fn payload(&self) -> Value {
        json!({ "giscus": { "setConfig": { "theme": self.theme } } })
    }
}

/// Reacts to clicks in the book's theme list.
#[derive(Clone, Debug)]
pub struct ThemeSync {
    palette: ThemePalette,
    origin: String,
}

impl ThemeSync {
    /// Create a theme sync posting to the widget at `origin`.
    #[must_use]
    pub fn new(palette: ThemePalette, origin: impl Into<String>) -> Self {
        Self {
            palette,
            origin: origin.into(),
        }
    }

    /// Palette in use.
    #[must_use]
    pub fn palette(&self) -> &ThemePalette {
        &self.palette
    }

    /// Handle a click on an element of the theme list.
    ///
    /// Only elements whose class name is exactly `theme` are theme entries;
    /// their `id` is the theme name. Anything else yields no message.
    #[must_use]
    pub fn on_theme_click(&self, class_name: &str, id: &str) -> Option<WidgetMessage> {
        if class_name != "theme" {
            return None;
        }
        let theme = self.palette.widget_theme_for_selection(id);
        tracing::debug!(selected = id, theme, "Syncing comment widget theme");
        Some(WidgetMessage {
            target_origin: self.origin.clone(),
            theme: theme.to_owned(),
        })
    }
}

/// Whether the comment widget belongs on the page at `pathname`.
///
/// The printable single-page view carries no widget.
#[must_use]
pub fn should_embed(pathname: &str) -> bool {
    !pathname.ends_with("/print.html")
}

/// Where and how the widget script is embedded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbedSettings {
    /// Widget origin, e.g. `https://giscus.app`.
    pub origin: String,
    /// Repository holding the discussions (`owner/name`).
    pub repo: String,
    /// Repository node id.
    pub repo_id: String,
    /// Discussion category name.
    pub category: String,
    /// Discussion category id.
    pub category_id: String,
    /// Widget language.
    pub lang: String,
}

impl EmbedSettings {
    /// URL of the widget client script.
    #[must_use]
    pub fn script_src(&self) -> String {
        format!("{}/client.js", self.origin.trim_end_matches('/'))
    }

    /// `data-*` attributes of the embed script, in emission order.
    #[must_use]
    pub fn embed_attributes(&self, theme: &str) -> Vec<(&'static str, String)> {
        vec![
            ("data-repo", self.repo.clone()),
            ("data-repo-id", self.repo_id.clone()),
            ("data-category", self.category.clone()),
            ("data-category-id", self.category_id.clone()),
            ("data-mapping", "specific".to_owned()),
            ("data-reactions-enabled", "1".to_owned()),
            ("data-emit-metadata", "0".to_owned()),
            ("data-input-position", "top".to_owned()),
            ("data-theme", theme.to_owned()),
            ("data-lang", self.lang.clone()),
            ("data-loading", "lazy".to_owned()),
        ]
    }

    /// Embed `<script>` element for a page rendered with `theme`.
    #[must_use]
    pub fn script_tag(&self, theme: &str) -> String {
        let mut html = String::with_capacity(512);
        let _ = write!(
            html,
            "<script type=\"text/javascript\" src=\"{}\" async crossorigin=\"anonymous\"",
            escape(&self.script_src())
        );
        for (name, value) in self.embed_attributes(theme) {
            let _ = write!(html, " {name}=\"{}\"", escape(&value));
        }
        html.push_str("></script>");
        html
    }
}

fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
