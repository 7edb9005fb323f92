use std::env;
use std::path::PathBuf;
use std::time::Duration;

// Shared window constants.
pub const TITLE: &str = "Minesweeper";
pub const TITLE_ANIM_LAST: u32 = 600; // cursor wraps to 0 after passing this
pub const NAME_MAX_LEN: usize = 20;
pub const MIN_GRID_SIZE: u32 = 5;
pub const MAX_GRID_SIZE: u32 = 50;
pub const MIN_MINE_COUNT: u32 = 1;
pub const MAX_MINE_RATIO: f32 = 0.25;
// Minimal pane size to fit the setup panel.
pub const MIN_PANE_WIDTH: u16 = 44;
pub const MIN_PANE_HEIGHT: u16 = 22;

pub const DEFAULT_MAX_SCORE: u32 = 100_000;
pub const DEFAULT_TICK_MS: u64 = 70;
pub const DEFAULT_HIGH_SCORE_CAPACITY: usize = 10;
pub const DEFAULT_SOCKET_PATH: &str = "/tmp/minesweeper-window.sock";
pub const DEFAULT_SETTINGS_PATH: &str = "minesweeper-settings.json";
pub const DEFAULT_LOG_PATH: &str = "minesweeper-window.log";

/// Runtime knobs, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub max_score: u32,
    pub tick_interval: Duration,
    pub socket_path: PathBuf,
    pub settings_path: PathBuf,
    pub log_path: PathBuf,
    pub high_score_capacity: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            max_score: parse_var("MINESWEEPER_MAX_SCORE").unwrap_or(DEFAULT_MAX_SCORE),
            tick_interval: Duration::from_millis(
                parse_var::<u64>("MINESWEEPER_TICK_MS")
                    .filter(|ms| *ms > 0)
                    .unwrap_or(DEFAULT_TICK_MS),
            ),
            socket_path: path_var("MINESWEEPER_SOCKET", DEFAULT_SOCKET_PATH),
            settings_path: path_var("MINESWEEPER_SETTINGS", DEFAULT_SETTINGS_PATH),
            log_path: path_var("MINESWEEPER_LOG", DEFAULT_LOG_PATH),
            high_score_capacity: parse_var("MINESWEEPER_HIGH_SCORES")
                .unwrap_or(DEFAULT_HIGH_SCORE_CAPACITY),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse::<T>().ok())
}

fn path_var(key: &str, default: &str) -> PathBuf {
    env::var(key)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}
