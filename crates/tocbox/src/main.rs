//! tocbox CLI - sidebar table of contents for static documentation books.
//!
//! Provides commands for:
//! - `render`: Print sidebar markup, static or for one page
//! - `resolve`: Normalize a browser location into the active page key
//! - `visit` / `click` / `reset`: Walk a browsing session against the
//!   file-backed session store
//! - `theme`: Comment widget theme for a book theme
//! - `search`: Inspect the generated search index

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ClickArgs, RenderArgs, ResetArgs, ResolveArgs, SearchArgs, ThemeArgs, VisitArgs};
use output::Output;

/// tocbox - sidebar table of contents for static documentation books.
#[derive(Parser)]
#[command(name = "tocbox", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print sidebar markup.
    Render(RenderArgs),
    /// Normalize a browser location into the active page key.
    Resolve(ResolveArgs),
    /// Open a page in the current browsing session.
    Visit(VisitArgs),
    /// Click a sidebar link on a page after scrolling.
    Click(ClickArgs),
    /// End the browsing session.
    Reset(ResetArgs),
    /// Comment widget theme for a book theme.
    Theme(ThemeArgs),
    /// Inspect the generated search index.
    Search(SearchArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Resolve(args) => args.execute(),
        Commands::Visit(args) => args.execute(),
        Commands::Click(args) => args.execute(),
        Commands::Reset(args) => args.execute(),
        Commands::Theme(args) => args.execute(),
        Commands::Search(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
