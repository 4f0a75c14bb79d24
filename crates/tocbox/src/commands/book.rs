//! Book loading shared by the sidebar commands.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use tocbox_config::{CliSettings, Config};
use tocbox_nav::{
    FoldConfig, NodeId, RenderOptions, Sidebar, SidebarOptions, Toc, parse_summary,
    path_to_root,
};
use tocbox_session::SessionStorage;

use crate::error::CliError;

/// Options locating the book and its configuration.
#[derive(Args)]
pub(crate) struct BookArgs {
    /// Path to configuration file (default: auto-discover tocbox.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// `SUMMARY.md` outline (overrides config).
    #[arg(short, long)]
    summary: Option<PathBuf>,

    /// Published URL of the book root (overrides config).
    #[arg(long, env = "TOCBOX_SITE_URL")]
    site_url: Option<String>,

    /// Session storage directory (overrides config).
    #[arg(long)]
    session_dir: Option<PathBuf>,

    /// Render fold toggles and collapse deep sections.
    #[arg(long)]
    fold: bool,

    /// Depth from which sections start collapsed (implies --fold).
    #[arg(long)]
    fold_level: Option<usize>,
}

impl BookArgs {
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            summary: self.summary.clone(),
            site_url: self.site_url.clone(),
            session_dir: self.session_dir.clone(),
            fold_enable: (self.fold || self.fold_level.is_some()).then_some(true),
            fold_level: self.fold_level,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// A loaded book: configuration plus parsed outline.
pub(crate) struct Book {
    pub(crate) config: Config,
    pub(crate) toc: Toc,
}

impl Book {
    pub(crate) fn load(args: &BookArgs) -> Result<Self, CliError> {
        let config = args.load_config()?;
        let path = &config.book_resolved.summary;
        let text = std::fs::read_to_string(path)?;
        let toc = parse_summary(&text, &config.sidebar.in_progress_marker).map_err(|source| {
            CliError::Summary {
                path: path.display().to_string(),
                source,
            }
        })?;
        tracing::info!(path = %path.display(), entries = toc.len(), "Loaded summary");
        Ok(Self { config, toc })
    }

    pub(crate) fn render_options(&self) -> RenderOptions {
        let fold = &self.config.sidebar.fold;
        RenderOptions {
            fold: FoldConfig {
                enable: fold.enable,
                level: fold.level,
            },
            in_progress_marker: self.config.sidebar.in_progress_marker.clone(),
        }
    }

    /// Browser location of a book-relative page.
    pub(crate) fn location(&self, page: &str) -> String {
        format!(
            "{}{}",
            self.config.book_resolved.site_url,
            page.trim_start_matches('/')
        )
    }

    /// Sidebar as created by the page at `page`.
    pub(crate) fn sidebar(&self, page: &str, storage: Arc<dyn SessionStorage>) -> Sidebar {
        let options = SidebarOptions {
            path_to_root: path_to_root(page),
            scroll_key: self.config.sidebar.scroll_key.clone(),
            render: self.render_options(),
        };
        Sidebar::new(&self.toc, options, storage)
    }
}

/// Numbered title of a sidebar entry, e.g. `4.3.1. Tunnels`.
pub(crate) fn entry_title(sidebar: &Sidebar, id: NodeId) -> String {
    match sidebar.outline().get(id) {
        Some(entry) => match &entry.number {
            Some(number) => format!("{number} {}", entry.label),
            None => entry.label.clone(),
        },
        None => format!("#{}", id.0),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{book_args as args, book_dir};
    use super::*;
    use pretty_assertions::assert_eq;
    use tocbox_nav::{ClickEvent, ScrollRestore};
    use tocbox_session::FileStorage;

    #[test]
    fn test_load_book() {
        let dir = book_dir();

        let book = Book::load(&args(&dir)).unwrap();

        assert_eq!(book.toc.len(), 4);
        assert_eq!(book.location("/solver/tunnels.html"), "https://book.example/solver/tunnels.html");
        assert!(!book.render_options().fold.enable);
    }

    #[test]
    fn test_fold_level_implies_fold() {
        let dir = book_dir();
        let mut args = args(&dir);
        args.fold_level = Some(1);

        let book = Book::load(&args).unwrap();

        let fold = book.render_options().fold;
        assert!(fold.enable);
        assert_eq!(fold.level, 1);
    }

    #[test]
    fn test_invalid_summary_names_file() {
        let dir = book_dir();
        std::fs::write(dir.path().join("src").join("SUMMARY.md"), "- Solver\n").unwrap();

        let Err(err) = Book::load(&args(&dir)) else {
            panic!("expected summary error");
        };

        assert!(err.to_string().ends_with("SUMMARY.md: line 1: list item has no chapter link"));
    }

    #[test]
    fn test_session_continuity_across_page_loads() {
        let dir = book_dir();
        let book = Book::load(&args(&dir)).unwrap();
        let session_dir = &book.config.book_resolved.session_dir;

        let mut first = book.sidebar("introduction.html", Arc::new(FileStorage::new(session_dir)));
        first.on_mount(&book.location("introduction.html"));
        first.set_scroll_top(42.0);
        let tunnels = first.outline().find_target("solver/tunnels.html").unwrap();
        first.on_click_link(&ClickEvent::link(tunnels));

        let mut second = book.sidebar("solver/tunnels.html", Arc::new(FileStorage::new(session_dir)));
        let report = second.on_mount(&book.location("solver/tunnels.html"));

        assert_eq!(report.active, Some(tunnels));
        assert_eq!(report.scroll, ScrollRestore::Restored(42.0));
        assert_eq!(entry_title(&second, tunnels), "1.1. Tunnels");
        assert!(second.to_html().contains("href=\"../solver/tunnels.html\" class=\"active\""));

        let mut third = book.sidebar("solver/deadlocks.html", Arc::new(FileStorage::new(session_dir)));
        let report = third.on_mount(&book.location("solver/deadlocks.html"));
        assert!(matches!(report.scroll, ScrollRestore::Centered(_)));
    }
}
