//! Store Paths
//!
//! Logical paths are dotted (`score.set_1.team_a.score`). On the wire they
//! live under the channel root with dots replaced by slashes:
//! `/match-{channel}/score/set_1/team_a/score`.

use crate::core::player::Team;

/// Active set number.
pub const ACTIVE_SET: &str = "active_set";

/// Ordered array of events.
pub const EVENT_HISTORY: &str = "event_history";

/// Win score setting.
pub const WIN_POINTS: &str = "game_settings.win_points";

/// Hardcap setting.
pub const HARDCAP: &str = "game_settings.hardcap";

/// Set mode setting.
pub const SET_MODE: &str = "game_settings.set_mode";

/// Score of a team in a set.
pub fn score(set: u8, team: Team) -> String {
    format!("score.set_{set}.{}.score", team.key())
}

/// Starting server of a set.
pub fn starting_server(set: u8) -> String {
    format!("score.set_{set}.starting_server")
}

/// Starting receiver of a set.
pub fn starting_receiver(set: u8) -> String {
    format!("score.set_{set}.starting_receiver")
}

/// Squad score of a team.
pub fn squad_score(team: Team) -> String {
    format!("squad_score.{}", team.key())
}

/// Root key of a channel.
pub fn channel_root(channel: &str) -> String {
    format!("match-{channel}")
}

/// Full store path for a logical path.
pub fn store_path(channel: &str, logical: &str) -> String {
    format!("/{}/{}", channel_root(channel), logical.replace('.', "/"))
}

/// Whether a logical path holds an integer value.
pub fn is_integer_field(logical: &str) -> bool {
    logical == ACTIVE_SET
        || logical == WIN_POINTS
        || logical == HARDCAP
        || logical.ends_with(".score")
        || logical.starts_with("squad_score.")
}
