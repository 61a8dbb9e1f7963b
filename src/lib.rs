//! # Roundnet Scoreboard
//!
//! Deterministic scoring, serve rotation and statistics for live Roundnet
//! broadcast overlays.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   ROUNDNET SCOREBOARD                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Primitives                               │
//! │  ├── player.rs    - Team and player positions                │
//! │  └── hash.rs      - State and snapshot digests               │
//! │                                                              │
//! │  game/            - Scoring logic (deterministic)            │
//! │  ├── settings.rs  - Win score, hardcap, set mode             │
//! │  ├── events.rs    - Event log and score-edit sync            │
//! │  ├── state.rs     - Score table and serve setup              │
//! │  ├── scoring.rs   - Set winner / overtime                    │
//! │  ├── rotation.rs  - Serve and receive rotation tables        │
//! │  ├── scoreboard.rs- State + log mutation entry points        │
//! │  ├── stats.rs     - Break and sideout statistics             │
//! │  └── view.rs      - Derived overlay view                     │
//! │                                                              │
//! │  sync/            - Store adapter (non-deterministic I/O)    │
//! │  ├── paths.rs     - Channel path layout                      │
//! │  ├── snapshot.rs  - Snapshot encode / rehydrate              │
//! │  ├── batch.rs     - Per-edit write batches                   │
//! │  ├── store.rs     - Store trait + in-memory store            │
//! │  └── channel.rs   - Digest-gated channel sync                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are **100% deterministic**:
//! - Integer arithmetic only (percentages round half up)
//! - Fixed arrays and BTreeMap for ordered iteration
//! - Rotation tables built at compile time
//!
//! Given the same event log and state, every query returns identical
//! results, so the overlay can recompute on every change.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod sync;

// Re-export commonly used types
pub use core::player::{Player, Team};
pub use game::events::{Event, EventLog};
pub use game::rotation::{Phase, ServeConfiguration};
pub use game::scoreboard::{Scoreboard, ScoreboardError, ServeInfo};
pub use game::settings::{GameSettings, SetMode};
pub use game::stats::{Scope, Statistics};
pub use game::view::OverlayView;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
