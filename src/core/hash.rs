//! Snapshot and State Hashing
//!
//! Deterministic SHA-256 digests used to:
//! - Recognize a store snapshot that has already been applied
//! - Compare two scoreboards for equality after replay

use sha2::{Digest, Sha256};

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for scoreboard data.
///
/// Wraps SHA-256 with fixed-width integer helpers.
/// Order of updates is critical for determinism.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for scoreboard state.
    pub fn for_scoreboard() -> Self {
        Self::new(b"ROUNDNET_SCOREBOARD_V1")
    }

    /// Create hasher for raw store snapshots.
    pub fn for_snapshot() -> Self {
        Self::new(b"ROUNDNET_SNAPSHOT_V1")
    }

    /// Update with raw bytes.
    #[inline]
    pub fn update_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Update with a length-prefixed string.
    pub fn update_str(&mut self, value: &str) {
        self.update_u32(value.len() as u32);
        self.hasher.update(value.as_bytes());
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Digest of a JSON snapshot.
///
/// `serde_json::Value` objects are ordered maps, so two snapshots with the
/// same content always serialize to the same bytes.
pub fn snapshot_digest(snapshot: &serde_json::Value) -> StateHash {
    let mut hasher = StateHasher::for_snapshot();
    hasher.update_str(&snapshot.to_string());
    hasher.finalize()
}

/// Short hex prefix of a digest for log lines.
pub fn short_hex(hash: &StateHash) -> String {
    hex::encode(&hash[..4])
}
