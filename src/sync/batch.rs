//! Write Batches
//!
//! A batch collects every path touched by one logical edit so the score
//! and the event history reach the store in a single write.

use std::collections::BTreeMap;

use serde_json::{json, Value};
use tracing::warn;

use crate::core::player::Team;
use crate::game::scoreboard::Scoreboard;
use crate::game::settings::MAX_SETS;
use crate::sync::paths;
use crate::sync::snapshot::{encode_history, encode_settings, parse_u32};

/// Values to write, keyed by logical path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteBatch {
    channel: String,
    entries: BTreeMap<String, Value>,
}

impl WriteBatch {
    /// Empty batch for a channel.
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Channel this batch targets.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Set a logical path. Later writes to the same path win.
    pub fn set(&mut self, logical: impl Into<String>, value: Value) -> &mut Self {
        self.entries.insert(logical.into(), value);
        self
    }

    /// Value queued for a logical path.
    pub fn get(&self, logical: &str) -> Option<&Value> {
        self.entries.get(logical)
    }

    /// Number of queued paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Queued values with their full store paths.
    pub fn store_paths(&self) -> impl Iterator<Item = (String, &Value)> + '_ {
        self.entries
            .iter()
            .map(move |(logical, value)| (paths::store_path(&self.channel, logical), value))
    }

    /// Queued values with their logical paths.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn with_history(mut self, board: &Scoreboard) -> Self {
        self.set(paths::EVENT_HISTORY, encode_history(board.log()));
        self
    }

    /// Score of one team in one set plus the event history.
    pub fn for_score_edit(channel: impl Into<String>, board: &Scoreboard, team: Team, set: u8) -> Self {
        let mut batch = Self::new(channel);
        batch.set(paths::score(set, team), json!(board.state().score(set, team)));
        batch.with_history(board)
    }

    /// Squad score of one team plus the event history.
    pub fn for_squad_edit(channel: impl Into<String>, board: &Scoreboard, team: Team) -> Self {
        let mut batch = Self::new(channel);
        batch.set(paths::squad_score(team), json!(board.state().squad_score(team)));
        batch.with_history(board)
    }

    /// Active set plus the event history.
    pub fn for_set_change(channel: impl Into<String>, board: &Scoreboard) -> Self {
        let mut batch = Self::new(channel);
        batch.set(paths::ACTIVE_SET, json!(board.active_set()));
        batch.with_history(board)
    }

    /// Starting server and receiver of a set.
    pub fn for_serve_configuration(channel: impl Into<String>, board: &Scoreboard, set: u8) -> Self {
        let mut batch = Self::new(channel);
        let config = board.state().serve_configuration(set);
        batch.set(
            paths::starting_server(set),
            config.map_or(Value::Null, |c| json!(c.starting_server.key())),
        );
        batch.set(
            paths::starting_receiver(set),
            config.map_or(Value::Null, |c| json!(c.starting_receiver.key())),
        );
        batch
    }

    /// Every persisted path of the scoreboard.
    pub fn full(channel: impl Into<String>, board: &Scoreboard) -> Self {
        let mut batch = Self::new(channel);
        let state = board.state();
        for set in 1..=MAX_SETS {
            for team in Team::ALL {
                batch.set(paths::score(set, team), json!(state.score(set, team)));
            }
            let config = state.serve_configuration(set);
            batch.set(
                paths::starting_server(set),
                config.map_or(Value::Null, |c| json!(c.starting_server.key())),
            );
            batch.set(
                paths::starting_receiver(set),
                config.map_or(Value::Null, |c| json!(c.starting_receiver.key())),
            );
        }
        for team in Team::ALL {
            batch.set(paths::squad_score(team), json!(state.squad_score(team)));
        }
        batch.set(paths::ACTIVE_SET, json!(state.active_set));
        let settings = encode_settings(&state.settings);
        batch.set(paths::WIN_POINTS, settings["win_points"].clone());
        batch.set(paths::HARDCAP, settings["hardcap"].clone());
        batch.set(paths::SET_MODE, settings["set_mode"].clone());
        batch.with_history(board)
    }

    /// Batch from raw text fields, e.g. values typed into an operator panel.
    ///
    /// Integer fields that fail to parse are dropped with a warning; the
    /// remaining fields are kept.
    pub fn from_raw_fields<I, K, V>(channel: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut batch = Self::new(channel);
        for (logical, raw) in fields {
            let logical = logical.into();
            let raw = raw.as_ref();
            if paths::is_integer_field(&logical) {
                match parse_u32(raw) {
                    Some(value) => {
                        batch.set(logical, json!(value));
                    }
                    None => warn!(path = %logical, raw, "dropping field with non-integer value"),
                }
            } else {
                batch.set(logical, json!(raw));
            }
        }
        batch
    }
}
