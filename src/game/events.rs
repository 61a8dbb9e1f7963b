//! Score Events
//!
//! The event log is the historical record of a match. Score increases and
//! set navigation append; score decreases remove the increment they undo.
//! A `Reset` starts a fresh history without clearing older entries.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::player::Team;

/// Maximum number of retained events.
pub const MAX_EVENTS: usize = 200;

/// A single entry of the event log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A team's score in a set was set to `score`
    ScoreSet {
        team: Team,
        set: u8,
        score: u32,
    },

    /// A team's squad score was set to `score`
    SquadScoreSet {
        team: Team,
        score: u32,
    },

    /// The active set changed to `set`
    SetChange {
        set: u8,
    },

    /// History restarts after this entry
    Reset,
}

impl Event {
    /// The scored point, if this is a set score event.
    #[inline]
    pub fn as_point(&self) -> Option<ScorePoint> {
        match *self {
            Event::ScoreSet { team, set, score } => Some(ScorePoint { team, set, score }),
            _ => None,
        }
    }

    #[inline]
    fn is_reset(&self) -> bool {
        matches!(self, Event::Reset)
    }
}

/// A `ScoreSet` event in history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePoint {
    /// Team whose score changed
    pub team: Team,
    /// Set the score belongs to
    pub set: u8,
    /// Score after the change
    pub score: u32,
}

/// What a score edit did to the log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// A new event was appended
    Appended,
    /// One earlier increment was removed
    Removed {
        /// Score of the removed event
        score: u32,
    },
    /// A decrease found no increment to undo
    Unmatched,
}

/// Ordered, capped event log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    events: VecDeque<Event>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from stored events, keeping the newest [`MAX_EVENTS`].
    pub fn from_events(events: impl IntoIterator<Item = Event>) -> Self {
        let mut log = Self::new();
        for event in events {
            log.append(event);
        }
        log
    }

    /// Append an event, dropping the oldest entries beyond the cap.
    pub fn append(&mut self, event: Event) {
        self.events.push_back(event);
        while self.events.len() > MAX_EVENTS {
            self.events.pop_front();
        }
    }

    /// Number of retained events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate all retained events in order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Event> + ExactSizeIterator + Clone + '_ {
        self.events.iter()
    }

    /// Index of the most recent `Reset`, if any.
    pub fn last_reset(&self) -> Option<usize> {
        self.events.iter().rposition(Event::is_reset)
    }

    /// Events after the most recent `Reset`.
    pub fn since_reset(&self) -> impl DoubleEndedIterator<Item = &Event> + Clone + '_ {
        let start = self.last_reset().map_or(0, |i| i + 1);
        self.events.range(start..)
    }

    /// Score points for `set` in the current history, oldest first.
    ///
    /// The iterator is lazy and can be cloned to restart the read.
    pub fn score_history(&self, set: u8) -> impl Iterator<Item = ScorePoint> + Clone + '_ {
        self.since_reset()
            .filter_map(Event::as_point)
            .filter(move |p| p.set == set)
    }

    /// Score points for every set in the current history, oldest first.
    pub fn match_history(&self) -> impl Iterator<Item = ScorePoint> + Clone + '_ {
        self.since_reset().filter_map(Event::as_point)
    }

    /// Score recorded by the newest event matching the edit target.
    ///
    /// Defaults to 0 when no matching event is retained.
    pub fn last_recorded_score(&self, team: Team, set: u8, is_squad: bool) -> u32 {
        self.events
            .iter()
            .rev()
            .find_map(|event| match *event {
                Event::ScoreSet { team: t, set: s, score } if !is_squad && t == team && s == set => {
                    Some(score)
                }
                Event::SquadScoreSet { team: t, score } if is_squad && t == team => Some(score),
                _ => None,
            })
            .unwrap_or(0)
    }

    /// Keep the log in step with an edited score.
    ///
    /// Squad edits always append. A set score below the last recorded one
    /// removes the newest increment above the new score; exactly one event is
    /// removed however large the decrease. Anything else appends.
    pub fn on_score_edit(&mut self, team: Team, set: u8, new_score: u32, is_squad: bool) -> EditOutcome {
        let old_score = self.last_recorded_score(team, set, is_squad);

        #[cfg(feature = "debug-tracing")]
        debug!(?team, set, old_score, new_score, is_squad, len = self.len(), "score edit");

        if is_squad {
            self.append(Event::SquadScoreSet { team, score: new_score });
            return EditOutcome::Appended;
        }

        if new_score < old_score {
            let target = self.events.iter().rposition(|event| {
                matches!(*event, Event::ScoreSet { team: t, set: s, score }
                    if t == team && s == set && score > new_score)
            });
            return match target.and_then(|i| self.events.remove(i)) {
                Some(Event::ScoreSet { score, .. }) => EditOutcome::Removed { score },
                _ => {
                    debug!(?team, set, new_score, "no increment to undo");
                    EditOutcome::Unmatched
                }
            };
        }

        self.append(Event::ScoreSet { team, set, score: new_score });
        EditOutcome::Appended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(team: Team, set: u8, score: u32) -> Event {
        Event::ScoreSet { team, set, score }
    }

    #[test]
    fn test_append_caps_log() {
        let mut log = EventLog::new();
        for i in 0..250 {
            log.append(point(Team::A, 1, i));
        }
        assert_eq!(log.len(), MAX_EVENTS);
        // Oldest 50 dropped
        assert_eq!(log.iter().next(), Some(&point(Team::A, 1, 50)));
        assert_eq!(log.iter().last(), Some(&point(Team::A, 1, 249)));
    }

    #[test]
    fn test_history_starts_after_last_reset() {
        let mut log = EventLog::new();
        log.append(point(Team::A, 1, 1));
        log.append(Event::Reset);
        log.append(point(Team::B, 1, 1));
        log.append(point(Team::A, 2, 1));
        log.append(Event::Reset);
        log.append(point(Team::A, 1, 1));
        log.append(Event::SetChange { set: 2 });
        log.append(point(Team::B, 2, 1));
        log.append(point(Team::B, 1, 1));

        let history: Vec<_> = log.score_history(1).collect();
        assert_eq!(
            history,
            vec![
                ScorePoint { team: Team::A, set: 1, score: 1 },
                ScorePoint { team: Team::B, set: 1, score: 1 },
            ]
        );
        assert_eq!(log.last_reset(), Some(4));
    }

    #[test]
    fn test_history_is_restartable() {
        let log = EventLog::from_events([point(Team::A, 1, 1), point(Team::B, 1, 1)]);
        let history = log.score_history(1);
        assert_eq!(history.clone().count(), 2);
        assert_eq!(history.count(), 2);
    }

    #[test]
    fn test_increase_appends() {
        let mut log = EventLog::new();
        assert_eq!(log.on_score_edit(Team::A, 1, 1, false), EditOutcome::Appended);
        assert_eq!(log.on_score_edit(Team::A, 1, 2, false), EditOutcome::Appended);
        assert_eq!(log.last_recorded_score(Team::A, 1, false), 2);
    }

    #[test]
    fn test_decrease_removes_single_event() {
        let mut log = EventLog::new();
        for score in 1..=5 {
            log.on_score_edit(Team::A, 1, score, false);
        }
        log.on_score_edit(Team::B, 1, 1, false);

        // 5 -> 2 removes only the newest increment above 2.
        assert_eq!(
            log.on_score_edit(Team::A, 1, 2, false),
            EditOutcome::Removed { score: 5 }
        );
        assert_eq!(log.score_history(1).filter(|p| p.team == Team::A).count(), 4);
        assert_eq!(log.len(), 5);
    }

    #[test]
    fn test_equal_score_appends() {
        let mut log = EventLog::new();
        log.on_score_edit(Team::A, 2, 3, false);
        assert_eq!(log.on_score_edit(Team::A, 2, 3, false), EditOutcome::Appended);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_decrease_scans_past_reset() {
        let mut log = EventLog::new();
        log.append(point(Team::A, 1, 1));
        log.append(Event::Reset);
        assert_eq!(log.on_score_edit(Team::A, 1, 0, false), EditOutcome::Removed { score: 1 });
        assert_eq!(log.iter().collect::<Vec<_>>(), vec![&Event::Reset]);
    }

    #[test]
    fn test_decrease_only_targets_team_and_set() {
        let mut log = EventLog::new();
        log.on_score_edit(Team::A, 1, 1, false);
        log.on_score_edit(Team::B, 1, 1, false);
        log.on_score_edit(Team::A, 2, 1, false);
        log.on_score_edit(Team::A, 1, 0, false);
        assert_eq!(log.score_history(1).collect::<Vec<_>>(), vec![ScorePoint { team: Team::B, set: 1, score: 1 }]);
        assert_eq!(log.score_history(2).count(), 1);
    }

    #[test]
    fn test_squad_edits_always_append() {
        let mut log = EventLog::new();
        log.on_score_edit(Team::B, 1, 4, true);
        assert_eq!(log.on_score_edit(Team::B, 1, 2, true), EditOutcome::Appended);
        assert_eq!(log.len(), 2);
        assert_eq!(log.last_recorded_score(Team::B, 1, true), 2);
        // Squad events are not set scores.
        assert_eq!(log.last_recorded_score(Team::B, 1, false), 0);
    }

    #[test]
    fn test_event_serde_shape() {
        let json = serde_json::to_value(point(Team::A, 3, 7)).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "score_set", "team": "a", "set": 3, "score": 7 }));

        let reset: Event = serde_json::from_str(r#"{"type":"reset"}"#).unwrap();
        assert_eq!(reset, Event::Reset);
    }
}
