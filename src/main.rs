//! mdlive - a terminal markdown editor with live preview.
//!
//! # Usage
//!
//! ```bash
//! mdlive                 # resume the stored session
//! mdlive notes.md        # seed the session from a file
//! mdlive --theme dark
//! mdlive --reset         # start over from the sample document
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use mdlive::app::App;
use mdlive::ui::style::ThemeMode;

/// A terminal markdown editor with live preview
#[derive(Parser, Debug)]
#[command(name = "mdlive", version, about, long_about = None)]
struct Cli {
    /// Markdown file whose contents seed the session (optional; the stored
    /// session is resumed otherwise)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Theme: follow the persisted preference, or force light/dark
    #[arg(long, value_enum, default_value = "auto")]
    theme: ThemeMode,

    /// Clear the stored session and start from the sample document
    #[arg(long)]
    reset: bool,

    /// Directory for session state (defaults to the platform config dir)
    #[arg(long, value_name = "DIR")]
    state_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    if let Some(ref file) = cli.file
        && !file.exists()
    {
        anyhow::bail!("File not found: {}", file.display());
    }

    App::new()
        .with_seed_file(cli.file)
        .with_theme(cli.theme)
        .with_reset_session(cli.reset)
        .with_state_dir(cli.state_dir)
        .run()
        .context("Application error")
}
