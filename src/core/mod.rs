//! Core primitives.
//!
//! Player and team identifiers plus deterministic hashing. Everything in
//! here is free of I/O and allocation-light.

pub mod player;
pub mod hash;

// Re-export core types
pub use player::{Player, Team};
pub use hash::{StateHash, StateHasher, snapshot_digest};
