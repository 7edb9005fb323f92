use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::game::{Difficulty, HighScoreTable};

/// Session-wide settings store. Loaded once at startup, passed by reference
/// to every handler that reads or writes it, saved on shutdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub last_difficulty: Difficulty,
    pub last_player_name: String,
    pub high_scores: HighScoreTable,
    pub cell_draw_size: u16,
    pub use_grid_canvas: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_difficulty: Difficulty::BEGINNER,
            last_player_name: String::new(),
            high_scores: HighScoreTable::default(),
            cell_draw_size: 2,
            use_grid_canvas: false,
        }
    }
}

impl Settings {
    pub fn with_high_score_capacity(capacity: usize) -> Self {
        Self {
            high_scores: HighScoreTable::new(capacity),
            ..Self::default()
        }
    }

    /// Read `path`, falling back to `fallback` when it is missing or unreadable.
    pub fn load_or(path: impl AsRef<Path>, fallback: Settings) -> Self {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                info!(path = %path.display(), %err, "no settings file, using defaults");
                return fallback;
            }
        };
        match serde_json::from_str::<Settings>(&contents) {
            Ok(mut settings) => {
                settings.sanitize();
                settings
            }
            Err(err) => {
                // keep the unreadable file around; the fallback is saved over `path` later
                let backup = backup_path(path);
                match fs::rename(path, &backup) {
                    Ok(()) => warn!(
                        path = %path.display(),
                        backup = %backup.display(),
                        %err,
                        "failed to parse settings, moved aside and using defaults"
                    ),
                    Err(rename_err) => warn!(
                        path = %path.display(),
                        %err,
                        %rename_err,
                        "failed to parse settings and could not move it aside"
                    ),
                }
                fallback
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating settings dir {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("serializing settings")?;
        fs::write(path, json).with_context(|| format!("writing settings to {}", path.display()))?;
        Ok(())
    }

    /// Bring hand-edited values back inside the window's invariants.
    fn sanitize(&mut self) {
        self.last_player_name = crate::game::sanitize_player_name(&self.last_player_name);
        self.high_scores.normalize();
        self.last_difficulty.clamp_to_bounds();
    }
}

/// `settings.json` -> `settings.json.bak`
fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}
