//! mp3split
//!
//! # What this program is
//! A console tool that cuts MP3 files at millisecond timestamps and lets you
//! retag the pieces afterwards.
//!
//! # Flow
//! - Check for ffmpeg (needed for exact cuts; optional)
//! - Ask for a file or folder, then timestamps per file
//! - Write `<stem>_<N>/part1.mp3 ..` and tag them from the source
//! - Optionally walk every part through the tag editor
//!
//! # Output streams
//! Prompts go to stdout. Logs (`RUST_LOG`, default `warn`) and the progress
//! bar go to stderr, so the console stays readable.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use mp3split::cli::{self, Console};
use mp3split::config::{ExportMode, Settings};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let matches = cli::build_cli().get_matches();
    let config_path = matches.get_one::<PathBuf>("config");
    let input = matches.get_one::<PathBuf>("input");

    let mut settings = Settings::load(config_path.map(PathBuf::as_path)).with_context(|| {
        match config_path {
            Some(path) => format!("failed to load config '{}'", path.display()),
            None => "failed to load config".to_string(),
        }
    })?;

    if let Some(mode) = matches.get_one::<ExportMode>("mode") {
        settings.export.mode = *mode;
    }
    settings
        .validate()
        .map_err(|e| anyhow!("invalid configuration: {e}"))?;

    tracing::debug!(?settings, "settings loaded");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    cli::run(&mut console, &settings, input.map(PathBuf::as_path))
}
