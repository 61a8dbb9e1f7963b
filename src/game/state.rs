//! Scoreboard State
//!
//! Score table, active set, serve configurations and settings for one
//! match. Uses fixed-size arrays indexed by set and team so iteration order
//! is always set 1..=7, team A before team B.

use serde::{Deserialize, Serialize};

use crate::core::hash::{StateHash, StateHasher};
use crate::core::player::Team;
use crate::game::rotation::ServeConfiguration;
use crate::game::scoring::{is_overtime, set_winner};
use crate::game::settings::{GameSettings, MAX_SETS};

/// Scores and serve setup of a single set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetState {
    /// Score of team A and team B
    pub scores: [u32; 2],
    /// Starting server and receiver, once chosen
    pub serve: Option<ServeConfiguration>,
}

impl SetState {
    /// Score of a team.
    #[inline]
    pub fn score(&self, team: Team) -> u32 {
        self.scores[team.index()]
    }

    /// Points played so far, saturating for out-of-range stored scores.
    #[inline]
    pub fn points_played(&self) -> u32 {
        self.scores[0].saturating_add(self.scores[1])
    }
}

/// Complete scoreboard state of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreboardState {
    /// Sets 1..=7 (index 0 is set 1)
    pub sets: [SetState; MAX_SETS as usize],

    /// Set currently being played (1..=7)
    pub active_set: u8,

    /// Squad scores of team A and team B
    pub squad_scores: [u32; 2],

    /// Scoring rules
    pub settings: GameSettings,
}

impl Default for ScoreboardState {
    fn default() -> Self {
        Self::new(GameSettings::default())
    }
}

impl ScoreboardState {
    /// Fresh state on set 1 with all scores at zero.
    pub fn new(settings: GameSettings) -> Self {
        Self {
            sets: [SetState::default(); MAX_SETS as usize],
            active_set: 1,
            squad_scores: [0; 2],
            settings,
        }
    }

    /// Whether `set` is a valid set number.
    #[inline]
    pub fn is_valid_set(set: u8) -> bool {
        (1..=MAX_SETS).contains(&set)
    }

    /// State of a set, `None` outside 1..=7.
    pub fn set(&self, set: u8) -> Option<&SetState> {
        if !Self::is_valid_set(set) {
            return None;
        }
        self.sets.get(set as usize - 1)
    }

    /// Mutable state of a set, `None` outside 1..=7.
    pub fn set_mut(&mut self, set: u8) -> Option<&mut SetState> {
        if !Self::is_valid_set(set) {
            return None;
        }
        self.sets.get_mut(set as usize - 1)
    }

    /// Score of a team in a set (0 for invalid sets).
    pub fn score(&self, set: u8, team: Team) -> u32 {
        self.set(set).map_or(0, |s| s.score(team))
    }

    /// Both scores of a set as `(team_a, team_b)`.
    pub fn scores(&self, set: u8) -> (u32, u32) {
        (self.score(set, Team::A), self.score(set, Team::B))
    }

    /// Squad score of a team.
    #[inline]
    pub fn squad_score(&self, team: Team) -> u32 {
        self.squad_scores[team.index()]
    }

    /// Serve configuration of a set.
    pub fn serve_configuration(&self, set: u8) -> Option<ServeConfiguration> {
        self.set(set).and_then(|s| s.serve)
    }

    /// Winner of a set under the current settings.
    pub fn set_winner(&self, set: u8) -> Option<Team> {
        let (a, b) = self.scores(set);
        set_winner(a, b, &self.settings)
    }

    /// Whether a set is in overtime under the current settings.
    pub fn is_overtime(&self, set: u8) -> bool {
        let (a, b) = self.scores(set);
        is_overtime(a, b, &self.settings)
    }

    /// Sets strictly before the active set won by `team`.
    pub fn set_score(&self, team: Team) -> u8 {
        (1..self.active_set)
            .filter(|set| self.set_winner(*set) == Some(team))
            .count() as u8
    }

    /// Sets won by `team` across every set with a winner.
    pub fn sets_won(&self, team: Team) -> u8 {
        (1..=MAX_SETS)
            .filter(|set| self.set_winner(*set) == Some(team))
            .count() as u8
    }

    /// First team to win the sets required by the set mode.
    pub fn match_winner(&self) -> Option<Team> {
        let needed = self.settings.set_mode.sets_to_win();
        Team::ALL.into_iter().find(|team| self.sets_won(*team) >= needed)
    }

    /// Compute hash of current state for comparison.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_scoreboard();
        hasher.update_u8(self.active_set);
        for set in &self.sets {
            hasher.update_u32(set.scores[0]);
            hasher.update_u32(set.scores[1]);
            match set.serve {
                Some(config) => {
                    hasher.update_bool(true);
                    hasher.update_u8(config.starting_server as u8);
                    hasher.update_u8(config.starting_receiver as u8);
                }
                None => hasher.update_bool(false),
            }
        }
        hasher.update_u32(self.squad_scores[0]);
        hasher.update_u32(self.squad_scores[1]);
        hasher.update_u32(self.settings.win_points);
        hasher.update_u32(self.settings.min_win_margin);
        hasher.update_u32(self.settings.hardcap);
        hasher.update_str(self.settings.set_mode.key());
        hasher.finalize()
    }
}
