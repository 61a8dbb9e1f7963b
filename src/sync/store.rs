//! Match Store
//!
//! Abstraction over the real-time key/value store that holds each
//! channel's snapshot. The trait is synchronous; the core only ever needs
//! a full read and a best-effort batched write.

use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};

use crate::sync::batch::WriteBatch;
use crate::sync::error::StoreError;
use crate::sync::paths;

/// Storage for channel snapshots.
pub trait MatchStore {
    /// Read the whole snapshot of a channel.
    ///
    /// Returns `Value::Null` for a channel that has never been written.
    fn read(&self, channel: &str) -> Result<Value, StoreError>;

    /// Apply a batch of path writes.
    ///
    /// Writes are last-write-wins per path.
    fn write(&self, batch: &WriteBatch) -> Result<(), StoreError>;
}

/// In-memory store for tests and the demo binary.
///
/// Clones share the same underlying tree, so a clone handed to another
/// component observes every write.
#[derive(Clone, Default)]
pub struct MemoryStore {
    root: Arc<Mutex<Map<String, Value>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of channels with data.
    pub fn channel_count(&self) -> Result<usize, StoreError> {
        Ok(self.root.lock().map_err(|_| StoreError::Poisoned)?.len())
    }
}

impl MatchStore for MemoryStore {
    fn read(&self, channel: &str) -> Result<Value, StoreError> {
        let root = self.root.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(root
            .get(&paths::channel_root(channel))
            .cloned()
            .unwrap_or(Value::Null))
    }

    fn write(&self, batch: &WriteBatch) -> Result<(), StoreError> {
        let mut root = self.root.lock().map_err(|_| StoreError::Poisoned)?;
        for (path, value) in batch.store_paths() {
            insert_path(&mut root, &path, value.clone())?;
        }
        Ok(())
    }
}

/// Insert `value` at a slash-separated path, creating objects on the way.
fn insert_path(root: &mut Map<String, Value>, path: &str, value: Value) -> Result<(), StoreError> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let Some((last, parents)) = segments.split_last() else {
        return Err(StoreError::InvalidPath(path.to_string()));
    };

    let mut node = root;
    for segment in parents {
        let child = node
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !child.is_object() {
            *child = Value::Object(Map::new());
        }
        node = match child {
            Value::Object(map) => map,
            _ => return Err(StoreError::InvalidPath(path.to_string())),
        };
    }
    node.insert(last.to_string(), value);
    Ok(())
}
