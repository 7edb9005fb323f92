use std::fs::File;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod game;
mod io;
mod settings;
mod ui;
mod window;

pub use config::{
    Config, DEFAULT_HIGH_SCORE_CAPACITY, MAX_GRID_SIZE, MAX_MINE_RATIO, MIN_GRID_SIZE,
    MIN_MINE_COUNT, MIN_PANE_HEIGHT, MIN_PANE_WIDTH, NAME_MAX_LEN, TITLE, TITLE_ANIM_LAST,
};

fn main() -> Result<()> {
    let config = Config::from_env();
    init_logging(&config)?;
    app::run(&config)
}

// The terminal belongs to the UI, so logs go to a file.
fn init_logging(config: &Config) -> Result<()> {
    let file = File::create(&config.log_path)
        .with_context(|| format!("creating log file {}", config.log_path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
