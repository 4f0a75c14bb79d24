//! Configuration management for tocbox.
//!
//! Parses `tocbox.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `book.site_url`
//! - `session.dir`
//! - `comments.origin`
//! - `comments.repo`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the `SUMMARY.md` path.
    pub summary: Option<PathBuf>,
    /// Override the published book URL.
    pub site_url: Option<String>,
    /// Override the session storage directory.
    pub session_dir: Option<PathBuf>,
    /// Override the folding flag.
    pub fold_enable: Option<bool>,
    /// Override the folding level.
    pub fold_level: Option<usize>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "tocbox.toml";

const DEFAULT_SITE_URL: &str = "http://localhost:3000/";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Book location (paths are relative strings from TOML).
    book: BookConfigRaw,
    /// Sidebar behaviour.
    pub sidebar: SidebarConfig,
    /// Session storage location.
    session: SessionConfigRaw,
    /// Comment widget embedding (optional section).
    pub comments: Option<CommentsConfig>,
    /// Search index location.
    search: SearchConfigRaw,

    /// Resolved book configuration (set after loading).
    #[serde(skip)]
    pub book_resolved: BookConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BookConfigRaw {
    src: Option<String>,
    summary: Option<String>,
    site_url: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SessionConfigRaw {
    dir: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SearchConfigRaw {
    index: Option<String>,
}

/// Resolved book configuration with absolute paths.
#[derive(Debug, Default)]
pub struct BookConfig {
    /// The `SUMMARY.md` outline.
    pub summary: PathBuf,
    /// Published URL of the book root, always ending in `/`.
    pub site_url: String,
    /// Directory for session storage files.
    pub session_dir: PathBuf,
    /// Generated search index (`searchindex.js` or `.json`).
    pub search_index: PathBuf,
}

/// Sidebar behaviour.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SidebarConfig {
    /// Session key for the persisted scroll offset.
    pub scroll_key: String,
    /// Marker text flagging unfinished chapters.
    pub in_progress_marker: String,
    /// Folding of group headers.
    pub fold: FoldConfig,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            scroll_key: "sidebar-scroll".to_owned(),
            in_progress_marker: "🚧".to_owned(),
            fold: FoldConfig::default(),
        }
    }
}

/// Folding of group headers.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FoldConfig {
    /// Render toggles and collapse deep sections.
    pub enable: bool,
    /// Depth from which sections start collapsed.
    pub level: usize,
}

/// Comment widget configuration.
#[derive(Debug, Deserialize)]
pub struct CommentsConfig {
    /// Origin the widget runs on; theme messages are posted there.
    #[serde(default = "default_comments_origin")]
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
    #[serde(default = "default_comments_lang")]
    pub lang: String,
    /// Book theme names that count as light.
    #[serde(default = "default_light_themes")]
    pub light_themes: Vec<String>,
    /// Widget theme used with light book themes.
    #[serde(default = "default_light_theme")]
    pub light: String,
    /// Widget theme used otherwise.
    #[serde(default = "default_dark_theme")]
    pub dark: String,
}

impl CommentsConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or has invalid format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.origin, "comments.origin")?;
        require_http_url(&self.origin, "comments.origin")?;
        require_non_empty(&self.repo, "comments.repo")?;
        require_non_empty(&self.repo_id, "comments.repo_id")?;
        require_non_empty(&self.category, "comments.category")?;
        require_non_empty(&self.category_id, "comments.category_id")?;
        require_non_empty(&self.light, "comments.light")?;
        require_non_empty(&self.dark, "comments.dark")?;
        Ok(())
    }
}

fn default_comments_origin() -> String {
    "https://giscus.app".to_owned()
}

fn default_comments_lang() -> String {
    "en".to_owned()
}

fn default_light_themes() -> Vec<String> {
    vec!["light".to_owned(), "rust".to_owned()]
}

fn default_light_theme() -> String {
    "light".to_owned()
}

fn default_dark_theme() -> String {
    "transparent_dark".to_owned()
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`comments.repo`").
        field: String,
        /// Error message (e.g., "${`GISCUS_REPO`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Append the trailing `/` a site root needs for relative resolution.
fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `tocbox.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(summary) = &settings.summary {
            self.book_resolved.summary.clone_from(summary);
        }
        if let Some(site_url) = &settings.site_url {
            self.book_resolved.site_url = with_trailing_slash(site_url.clone());
        }
        if let Some(session_dir) = &settings.session_dir {
            self.book_resolved.session_dir.clone_from(session_dir);
        }
        if let Some(enable) = settings.fold_enable {
            self.sidebar.fold.enable = enable;
        }
        if let Some(level) = settings.fold_level {
            self.sidebar.fold.level = level;
        }
    }

    /// Get validated comment widget configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_comments(&self) -> Result<&CommentsConfig, ConfigError> {
        let comments = self.comments.as_ref().ok_or_else(|| {
            ConfigError::Validation("[comments] section required in config".into())
        })?;
        comments.validate()?;
        Ok(comments)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let start = std::env::current_dir().ok()?;
        Self::discover_from(&start)
    }

    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            book: BookConfigRaw::default(),
            sidebar: SidebarConfig::default(),
            session: SessionConfigRaw::default(),
            comments: None,
            search: SearchConfigRaw::default(),
            book_resolved: BookConfig {
                summary: base.join("src").join("SUMMARY.md"),
                site_url: DEFAULT_SITE_URL.to_owned(),
                session_dir: base.join(".tocbox").join("session"),
                search_index: base.join("book").join("searchindex.js"),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.sidebar.scroll_key, "sidebar.scroll_key")?;
        require_non_empty(
            &self.sidebar.in_progress_marker,
            "sidebar.in_progress_marker",
        )?;
        require_http_url(&self.book_resolved.site_url, "book.site_url")?;
        if let Some(comments) = &self.comments {
            comments.validate()?;
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.book.site_url {
            self.book.site_url = Some(expand::expand_env(url, "book.site_url")?);
        }
        if let Some(ref dir) = self.session.dir {
            self.session.dir = Some(expand::expand_env(dir, "session.dir")?);
        }
        if let Some(ref mut comments) = self.comments {
            comments.origin = expand::expand_env(&comments.origin, "comments.origin")?;
            comments.repo = expand::expand_env(&comments.repo, "comments.repo")?;
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let src = config_dir.join(self.book.src.as_deref().unwrap_or("src"));
        let summary = src.join(self.book.summary.as_deref().unwrap_or("SUMMARY.md"));
        let site_url = self
            .book
            .site_url
            .clone()
            .unwrap_or_else(|| DEFAULT_SITE_URL.to_owned());

        self.book_resolved = BookConfig {
            summary,
            site_url: with_trailing_slash(site_url),
            session_dir: config_dir.join(self.session.dir.as_deref().unwrap_or(".tocbox/session")),
            search_index: config_dir.join(
                self.search
                    .index
                    .as_deref()
                    .unwrap_or("book/searchindex.js"),
            ),
        };
    }
}
