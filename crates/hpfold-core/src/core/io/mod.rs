//! Record files produced by a run.
//!
//! Leaderboard submissions and the per-generation energy history are plain CSV so that
//! spreadsheets and plotting tools can consume them directly.

pub mod history;
pub mod leaderboard;

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Coordinate serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
