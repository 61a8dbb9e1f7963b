//! Derived Overlay View
//!
//! Everything the overlay displays, recomputed from a scoreboard in one
//! pass. Callers invoke [`OverlayView::recompute`] after each state change.

use serde::{Deserialize, Serialize};

use crate::core::player::Team;
use crate::game::scoreboard::{Scoreboard, ServeInfo};
use crate::game::stats::{Scope, Statistics};

/// Display data for one set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSummary {
    /// Set number
    pub set: u8,
    /// Score of team A
    pub score_a: u32,
    /// Score of team B
    pub score_b: u32,
    /// Winner, if the set is decided
    pub winner: Option<Team>,
    /// Whether the set is in overtime
    pub overtime: bool,
}

/// Everything the overlay needs for a frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayView {
    /// Active set number
    pub active_set: u8,
    /// Sets up to and including the active set
    pub sets: Vec<SetSummary>,
    /// Sets won before the active set, team A then team B
    pub set_scores: [u8; 2],
    /// Squad scores, team A then team B
    pub squad_scores: [u32; 2],
    /// Match winner under the set mode
    pub match_winner: Option<Team>,
    /// Serve indicator, hidden when `None`
    pub serve: Option<ServeInfo>,
    /// Statistics across the whole match
    pub match_stats: Statistics,
    /// Statistics of the active set
    pub set_stats: Statistics,
}

impl OverlayView {
    /// Recompute the view from the current scoreboard.
    pub fn recompute(board: &Scoreboard) -> Self {
        let state = board.state();
        let active_set = state.active_set;

        let sets = (1..=active_set)
            .map(|set| {
                let (score_a, score_b) = state.scores(set);
                SetSummary {
                    set,
                    score_a,
                    score_b,
                    winner: state.set_winner(set),
                    overtime: state.is_overtime(set),
                }
            })
            .collect();

        Self {
            active_set,
            sets,
            set_scores: [board.set_score(Team::A), board.set_score(Team::B)],
            squad_scores: state.squad_scores,
            match_winner: board.match_winner(),
            serve: board.serve_info(),
            match_stats: board.statistics(Scope::WholeMatch),
            set_stats: board.statistics(Scope::SingleSet(active_set)),
        }
    }
}
