//! Game Logic Module
//!
//! Scoring, rotation and statistics. 100% deterministic, no I/O.
//!
//! ## Module Structure
//!
//! - `settings`: Win score, hardcap, set mode
//! - `events`: Event log and score-edit synchronization
//! - `state`: Score table and serve configurations
//! - `scoring`: Set winner and overtime classification
//! - `rotation`: Serve/receive rotation tables
//! - `scoreboard`: State + log with mutation entry points
//! - `stats`: Break and sideout statistics
//! - `view`: Derived overlay view

pub mod settings;
pub mod events;
pub mod state;
pub mod scoring;
pub mod rotation;
pub mod scoreboard;
pub mod stats;
pub mod view;

// Re-export key types
pub use settings::{GameSettings, SetMode, SettingsError};
pub use events::{EditOutcome, Event, EventLog, ScorePoint, MAX_EVENTS};
pub use state::{ScoreboardState, SetState};
pub use scoring::{is_overtime, set_winner};
pub use rotation::{rotation_table, Phase, RotationTable, ServeConfiguration};
pub use scoreboard::{Scoreboard, ScoreboardError, ServeInfo};
pub use stats::{calculate_statistics, PlayerStats, Scope, Statistics, TeamStats};
pub use view::OverlayView;
