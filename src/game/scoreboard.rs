//! Scoreboard
//!
//! Owns the scoreboard state and the event log together. Every mutation
//! updates both in the same call so the log never falls behind the
//! displayed scores (apart from the single-event undo rule).

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::player::{Player, Team};
use crate::game::events::{EditOutcome, Event, EventLog, ScorePoint};
use crate::game::rotation::{Phase, ServeConfiguration};
use crate::game::settings::{GameSettings, SettingsError, MAX_SETS};
use crate::game::state::ScoreboardState;
use crate::game::stats::{calculate_statistics, point_phases, Scope, Statistics};

/// Scoreboard mutation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreboardError {
    /// Set number outside 1..=7.
    #[error("invalid set number: {0}")]
    InvalidSet(u8),

    /// Server and receiver on the same team.
    #[error("invalid serve configuration: {server} cannot serve to {receiver}")]
    InvalidServeConfiguration {
        /// Requested server
        server: Player,
        /// Requested receiver
        receiver: Player,
    },

    /// Serve configuration cannot change once a set has points.
    #[error("serve configuration of set {0} is fixed once play has started")]
    ServeConfigurationLocked(u8),

    /// Settings failed validation.
    #[error("settings: {0}")]
    Settings(#[from] SettingsError),
}

/// Who serves the current point and how.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServeInfo {
    /// Serving player
    pub server: Player,
    /// Receiving player
    pub receiver: Player,
    /// Serving team
    pub team: Team,
    /// First or second serve of the turn
    pub serve_number: u8,
    /// Whether the set is in overtime
    pub is_overtime: bool,
}

/// Scoreboard state plus its event log.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scoreboard {
    state: ScoreboardState,
    log: EventLog,
}

impl Scoreboard {
    /// Create an empty scoreboard with validated settings.
    pub fn new(settings: GameSettings) -> Result<Self, ScoreboardError> {
        settings.validate()?;
        Ok(Self {
            state: ScoreboardState::new(settings),
            log: EventLog::new(),
        })
    }

    /// Reassemble a scoreboard from rehydrated parts.
    pub fn from_parts(state: ScoreboardState, log: EventLog) -> Self {
        Self { state, log }
    }

    /// Current state.
    pub fn state(&self) -> &ScoreboardState {
        &self.state
    }

    /// Event log.
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Scoring rules.
    pub fn settings(&self) -> &GameSettings {
        &self.state.settings
    }

    /// Active set number.
    pub fn active_set(&self) -> u8 {
        self.state.active_set
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append a raw event to the log.
    pub fn append_event(&mut self, event: Event) {
        self.log.append(event);
    }

    /// Set a team's score in a set.
    pub fn edit_score(&mut self, team: Team, set: u8, new_score: u32) -> Result<EditOutcome, ScoreboardError> {
        let slot = self.state.set_mut(set).ok_or(ScoreboardError::InvalidSet(set))?;
        slot.scores[team.index()] = new_score;
        let outcome = self.log.on_score_edit(team, set, new_score, false);
        debug!(%team, set, new_score, ?outcome, "score edited");
        Ok(outcome)
    }

    /// Set a team's squad score.
    pub fn edit_squad_score(&mut self, team: Team, new_score: u32) -> EditOutcome {
        self.state.squad_scores[team.index()] = new_score;
        let outcome = self.log.on_score_edit(team, self.state.active_set, new_score, true);
        debug!(%team, new_score, "squad score edited");
        outcome
    }

    /// Add one point for `team` in the active set. Saturates at `u32::MAX`.
    pub fn record_point(&mut self, team: Team) -> Result<EditOutcome, ScoreboardError> {
        let set = self.state.active_set;
        let next = self.state.score(set, team).saturating_add(1);
        self.edit_score(team, set, next)
    }

    /// Move the active set by `delta`, clamped to 1..=7.
    ///
    /// Returns the new active set. A `SetChange` is logged only when the set
    /// actually changes.
    pub fn change_set(&mut self, delta: i32) -> u8 {
        let target = (self.state.active_set as i32)
            .saturating_add(delta)
            .clamp(1, MAX_SETS as i32) as u8;
        self.switch_to(target);
        target
    }

    /// Jump to a specific set.
    pub fn go_to_set(&mut self, set: u8) -> Result<(), ScoreboardError> {
        if !ScoreboardState::is_valid_set(set) {
            return Err(ScoreboardError::InvalidSet(set));
        }
        self.switch_to(set);
        Ok(())
    }

    fn switch_to(&mut self, set: u8) {
        if set == self.state.active_set {
            return;
        }
        info!(from = self.state.active_set, to = set, "active set changed");
        self.state.active_set = set;
        self.log.append(Event::SetChange { set });
    }

    /// Start the match over.
    ///
    /// Scores, squad scores and serve configurations are cleared and play
    /// returns to set 1. The log keeps its entries; history reads start
    /// after the appended `Reset`.
    pub fn reset(&mut self) {
        let settings = self.state.settings;
        self.state = ScoreboardState::new(settings);
        self.log.append(Event::Reset);
        info!(retained_events = self.log.len(), "scoreboard reset");
    }

    /// Choose the starting server and receiver of a set.
    pub fn set_serve_configuration(
        &mut self,
        set: u8,
        config: ServeConfiguration,
    ) -> Result<(), ScoreboardError> {
        if !config.is_valid() {
            return Err(ScoreboardError::InvalidServeConfiguration {
                server: config.starting_server,
                receiver: config.starting_receiver,
            });
        }
        let slot = self.state.set_mut(set).ok_or(ScoreboardError::InvalidSet(set))?;
        if slot.serve == Some(config) {
            return Ok(());
        }
        if slot.points_played() > 0 {
            return Err(ScoreboardError::ServeConfigurationLocked(set));
        }
        slot.serve = Some(config);
        debug!(set, server = %config.starting_server, receiver = %config.starting_receiver, "serve configured");
        Ok(())
    }

    /// Change the scoring rules.
    pub fn update_settings(&mut self, settings: GameSettings) -> Result<(), ScoreboardError> {
        settings.validate()?;
        self.state.settings = settings;
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Score points of a set since the last reset.
    pub fn score_history(&self, set: u8) -> impl Iterator<Item = ScorePoint> + Clone + '_ {
        self.log.score_history(set)
    }

    /// Winner of a set.
    pub fn set_winner(&self, set: u8) -> Option<Team> {
        self.state.set_winner(set)
    }

    /// Sets won by `team` before the active set.
    pub fn set_score(&self, team: Team) -> u8 {
        self.state.set_score(team)
    }

    /// Match winner under the set mode, if decided.
    pub fn match_winner(&self) -> Option<Team> {
        self.state.match_winner()
    }

    /// Serve state for the next point of the active set.
    ///
    /// `None` when the active set has no serve configuration or the
    /// rotation cannot resolve the point.
    pub fn serve_info(&self) -> Option<ServeInfo> {
        let set = self.state.active_set;
        let table = self.state.serve_configuration(set)?.table()?;
        let point = self.state.set(set)?.points_played();
        let is_overtime = self.state.is_overtime(set);
        let phase = Phase::from_flag(is_overtime, self.state.settings.win_points);

        let server = table.server(point, phase)?;
        let receiver = table.receiver(point, phase)?;
        let serve_number = if is_overtime || point == 0 || point % 2 == 1 { 1 } else { 2 };

        Some(ServeInfo {
            server,
            receiver,
            team: server.team(),
            serve_number,
            is_overtime,
        })
    }

    /// Server of the point at `point_index` of a recorded set.
    pub fn server_at(&self, set: u8, point_index: u32) -> Option<Player> {
        let table = self.state.serve_configuration(set)?.table()?;
        table.server(point_index, self.phase_at(set, point_index))
    }

    /// Receiver of the point at `point_index` of a recorded set.
    pub fn receiver_at(&self, set: u8, point_index: u32) -> Option<Player> {
        let table = self.state.serve_configuration(set)?.table()?;
        table.receiver(point_index, self.phase_at(set, point_index))
    }

    /// Phase of a point from the running score before it.
    ///
    /// Points past the recorded history use the current score.
    fn phase_at(&self, set: u8, point_index: u32) -> Phase {
        point_phases(self.log.score_history(set), &self.state.settings)
            .find(|(index, _, _)| *index == point_index)
            .map(|(_, _, phase)| phase)
            .unwrap_or_else(|| {
                Phase::from_flag(self.state.is_overtime(set), self.state.settings.win_points)
            })
    }

    /// Break and sideout statistics for a scope.
    pub fn statistics(&self, scope: Scope) -> Statistics {
        calculate_statistics(self, scope)
    }
}
