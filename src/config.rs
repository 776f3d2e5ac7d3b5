use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use log::LevelFilter;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// The playing field. Fixed; not user configurable.
pub const GRID: GridSize = GridSize {
    width: 10,
    height: 10,
};

/// Period between two game ticks in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 500;

/// Number of entries kept in the leaderboard.
pub const MAX_HIGH_SCORES: usize = 5;

/// Terminal columns used to draw one grid cell.
pub const CELL_WIDTH: u16 = 2;

pub const GLYPH_SNAKE_HEAD_UP: &str = "▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";
pub const GLYPH_SNAKE_BODY: &str = "■";
pub const GLYPH_FOOD: &str = "●";

const APP_DIR_NAME: &str = "grid-snake";
const SCORE_FILE_NAME: &str = "highscores.json";
const LOG_FILE_NAME: &str = "snake.log";

const ENV_SCORES_FILE: &str = "SNAKE_SCORES_FILE";
const ENV_LOG_FILE: &str = "SNAKE_LOG_FILE";
const ENV_LOG_LEVEL: &str = "SNAKE_LOG";

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Warn;

/// Runtime settings resolved once at startup.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AppConfig {
    pub scores_path: PathBuf,
    pub log_path: PathBuf,
    pub log_level: LevelFilter,
    pub tick_interval: Duration,
}

impl AppConfig {
    /// Resolves settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Resolves settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let scores_path = lookup(ENV_SCORES_FILE)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_scores_path);

        let log_path = lookup(ENV_LOG_FILE)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| scores_path.with_file_name(LOG_FILE_NAME));

        let log_level = lookup(ENV_LOG_LEVEL)
            .and_then(|value| value.to_str().and_then(|raw| raw.trim().parse().ok()))
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            scores_path,
            log_path,
            log_level,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
        }
    }
}

/// Returns the platform-correct high-score file path.
#[must_use]
pub fn default_scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}
