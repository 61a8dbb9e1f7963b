//! Store Synchronization
//!
//! Everything between the deterministic `game/` core and the real-time
//! key/value store: path layout, snapshot encoding, write batches and the
//! per-channel sync handle. Transport and authentication live elsewhere.

pub mod paths;
pub mod snapshot;
pub mod batch;
pub mod store;
pub mod error;
pub mod channel;

pub use batch::WriteBatch;
pub use channel::ChannelSync;
pub use error::{StoreError, SyncError};
pub use snapshot::{rehydrate, to_snapshot};
pub use store::{MatchStore, MemoryStore};
