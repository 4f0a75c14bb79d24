//! `tocbox theme` command implementation.

use std::path::PathBuf;

use clap::Args;
use tocbox_config::{CommentsConfig, Config};
use tocbox_embeds::{EmbedSettings, ThemePalette, ThemeSync, should_embed};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the theme command.
#[derive(Args)]
pub(crate) struct ThemeArgs {
    /// Path to configuration file (default: auto-discover tocbox.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Class attribute of the document's root element (e.g. `js light`).
    html_class: String,

    /// Id of a theme picked from the theme list; prints the message posted
    /// to the widget.
    #[arg(long)]
    select: Option<String>,

    /// Print the widget embed script for this page path (requires a
    /// `[comments]` section).
    #[arg(long)]
    embed: Option<String>,
}

impl ThemeArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        let (palette, origin) = match &config.comments {
            Some(comments) => (palette_from(comments), comments.origin.clone()),
            None => (ThemePalette::default(), "https://giscus.app".to_owned()),
        };
        let sync = ThemeSync::new(palette, origin);
        let theme = sync.palette().widget_theme_for_document(&self.html_class);
        output.result(theme)?;

        if let Some(id) = &self.select {
            // Theme list entries carry exactly the `theme` class
            match sync.on_theme_click("theme", id) {
                Some(message) => {
                    output.info(&format!("postMessage to {}", message.target_origin));
                    output.result(&message.payload().to_string())?;
                }
                None => output.warning("Click ignored"),
            }
        }

        if let Some(page) = &self.embed {
            if !should_embed(page) {
                output.warning(&format!("{page} carries no comment widget"));
                return Ok(());
            }
            let comments = config.require_comments()?;
            output.result(&embed_settings(comments).script_tag(theme))?;
        }
        Ok(())
    }
}

fn palette_from(comments: &CommentsConfig) -> ThemePalette {
    ThemePalette {
        light_themes: comments.light_themes.clone(),
        light: comments.light.clone(),
        dark: comments.dark.clone(),
    }
}

fn embed_settings(comments: &CommentsConfig) -> EmbedSettings {
    EmbedSettings {
        origin: comments.origin.clone(),
        repo: comments.repo.clone(),
        repo_id: comments.repo_id.clone(),
        category: comments.category.clone(),
        category_id: comments.category_id.clone(),
        lang: comments.lang.clone(),
    }
}
