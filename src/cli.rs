use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::games::flashcard::{self, DrillConfig, INFO};

#[derive(Parser, Debug)]
#[command(name = INFO.id)]
#[command(about = INFO.description)]
#[command(version)]
pub struct Cli {
    /// Seed for the question generator, for a reproducible question order
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// The terminal belongs to the game, so logs only go to a file when asked for.
pub fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let mut terminal = ratatui::init();
    let result = flashcard::run_game(&mut terminal, DrillConfig::default(), cli.seed).await;
    ratatui::restore();
    result
}
