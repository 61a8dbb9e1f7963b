//! Snapshot Encoding
//!
//! Converts between the nested key/value snapshot held by the store and a
//! [`Scoreboard`]. Decoding is tolerant: missing fields fall back to
//! defaults and a malformed event history loads as an empty log.

use serde_json::{json, Map, Value};
use tracing::warn;

use crate::core::player::{Player, Team};
use crate::game::events::{Event, EventLog};
use crate::game::rotation::ServeConfiguration;
use crate::game::scoreboard::Scoreboard;
use crate::game::settings::{GameSettings, MAX_SETS};
use crate::game::state::ScoreboardState;

/// Rebuild a scoreboard from a channel snapshot.
pub fn rehydrate(snapshot: &Value) -> Scoreboard {
    let settings = decode_settings(snapshot.get("game_settings"));
    let mut state = ScoreboardState::new(settings);

    if let Some(score) = snapshot.get("score") {
        for set in 1..=MAX_SETS {
            let Some(set_value) = score.get(format!("set_{set}")) else {
                continue;
            };
            let Some(slot) = state.set_mut(set) else {
                continue;
            };
            for team in Team::ALL {
                let raw = set_value.get(team.key()).and_then(|t| t.get("score"));
                slot.scores[team.index()] = decode_u32(raw, "score").unwrap_or(0);
            }
            slot.serve = decode_serve(set_value);
        }
    }

    if let Some(squad) = snapshot.get("squad_score") {
        for team in Team::ALL {
            state.squad_scores[team.index()] = decode_u32(squad.get(team.key()), "squad_score").unwrap_or(0);
        }
    }

    if let Some(active) = decode_u32(snapshot.get("active_set"), "active_set") {
        state.active_set = active.clamp(1, MAX_SETS as u32) as u8;
    }

    let log = decode_history(snapshot.get("event_history"));
    Scoreboard::from_parts(state, log)
}

/// Encode a scoreboard as a full channel snapshot.
pub fn to_snapshot(board: &Scoreboard) -> Value {
    let state = board.state();

    let mut score = Map::new();
    for set in 1..=MAX_SETS {
        let Some(slot) = state.set(set) else {
            continue;
        };
        let mut set_value = Map::new();
        for team in Team::ALL {
            set_value.insert(team.key().to_string(), json!({ "score": slot.score(team) }));
        }
        if let Some(config) = slot.serve {
            set_value.insert("starting_server".into(), json!(config.starting_server.key()));
            set_value.insert("starting_receiver".into(), json!(config.starting_receiver.key()));
        }
        score.insert(format!("set_{set}"), Value::Object(set_value));
    }

    json!({
        "score": score,
        "squad_score": {
            "team_a": state.squad_score(Team::A),
            "team_b": state.squad_score(Team::B),
        },
        "active_set": state.active_set,
        "game_settings": encode_settings(&state.settings),
        "event_history": encode_history(board.log()),
    })
}

/// Encode the event log as a JSON array.
pub fn encode_history(log: &EventLog) -> Value {
    Value::Array(
        log.iter()
            .filter_map(|event| serde_json::to_value(event).ok())
            .collect(),
    )
}

/// Encode settings as stored under `game_settings`.
pub fn encode_settings(settings: &GameSettings) -> Value {
    json!({
        "win_points": settings.win_points,
        "hardcap": settings.hardcap,
        "set_mode": settings.set_mode.key(),
    })
}

fn decode_settings(value: Option<&Value>) -> GameSettings {
    let mut settings = GameSettings::default();
    let Some(value) = value else {
        return settings;
    };
    if let Some(win_points) = decode_u32(value.get("win_points"), "win_points") {
        settings.win_points = win_points;
    }
    if let Some(hardcap) = decode_u32(value.get("hardcap"), "hardcap") {
        settings.hardcap = hardcap;
    }
    if let Some(mode) = value.get("set_mode").and_then(Value::as_str) {
        match mode.parse() {
            Ok(mode) => settings.set_mode = mode,
            Err(e) => warn!(%e, "keeping default set mode"),
        }
    }
    match settings.validate() {
        Ok(()) => settings,
        Err(e) => {
            warn!(%e, "stored game settings failed validation, using defaults");
            GameSettings::default()
        }
    }
}

fn decode_serve(set_value: &Value) -> Option<ServeConfiguration> {
    let server = set_value
        .get("starting_server")
        .and_then(Value::as_str)
        .and_then(Player::from_key)?;
    let receiver = set_value
        .get("starting_receiver")
        .and_then(Value::as_str)
        .and_then(Player::from_key)?;
    let config = ServeConfiguration::new(server, receiver);
    if !config.is_valid() {
        warn!(%server, %receiver, "ignoring same-team serve configuration");
        return None;
    }
    Some(config)
}

fn decode_history(value: Option<&Value>) -> EventLog {
    let Some(value) = value else {
        return EventLog::new();
    };
    match serde_json::from_value::<Vec<Event>>(value.clone()) {
        Ok(events) => EventLog::from_events(events),
        Err(e) => {
            warn!(%e, "malformed event history, starting from an empty log");
            EventLog::new()
        }
    }
}

/// Read a non-negative integer stored as a number or a numeric string.
pub(crate) fn decode_u32(value: Option<&Value>, field: &str) -> Option<u32> {
    match value? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()).or_else(|| {
            warn!(field, value = %n, "dropping non-integer value");
            None
        }),
        Value::String(s) => parse_u32(s).or_else(|| {
            warn!(field, value = %s, "dropping non-integer value");
            None
        }),
        Value::Null => None,
        other => {
            warn!(field, value = %other, "dropping non-integer value");
            None
        }
    }
}

/// Parse a trimmed non-negative integer.
pub(crate) fn parse_u32(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}
