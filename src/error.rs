use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while persisting the leaderboard.
///
/// Reads never produce one of these: an unreadable table degrades to an
/// empty one. Writes do, so a score is never lost silently.
#[derive(Debug, Error)]
pub enum ScoreStoreError {
    #[error("cannot create score directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("cannot write high scores to {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("cannot replace high score file {}: {source}", .path.display())]
    Replace { path: PathBuf, source: io::Error },

    #[error("cannot encode high scores: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Top-level failure reported by the `snake` binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Terminal(#[source] io::Error),

    #[error("could not read player name: {0}")]
    Prompt(#[source] io::Error),

    #[error(transparent)]
    Store(#[from] ScoreStoreError),
}
