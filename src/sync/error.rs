//! Store errors.

use thiserror::Error;

use crate::game::scoreboard::ScoreboardError;

/// Errors raised by a [`MatchStore`](crate::sync::MatchStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// A path had no segments to write to.
    #[error("invalid store path: {0}")]
    InvalidPath(String),

    /// The in-memory store lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Errors from a synchronized mutation.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The edit was rejected by the scoreboard; nothing was written.
    #[error("scoreboard: {0}")]
    Scoreboard(#[from] ScoreboardError),

    /// The edit was applied locally but the store write failed.
    #[error("store: {0}")]
    Store(#[from] StoreError),
}
