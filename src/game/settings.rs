//! Game Settings
//!
//! Win score, winning margin, hardcap and set format for a match.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Win scores with a defined overtime receiving rotation.
pub const SUPPORTED_WIN_POINTS: [u32; 2] = [15, 21];

/// Default winning margin.
pub const DEFAULT_MIN_WIN_MARGIN: u32 = 2;

/// Highest set number a match can reach.
pub const MAX_SETS: u8 = 7;

/// Set format of a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetMode {
    /// One set decides the match
    Single,
    /// First to two sets
    #[default]
    BestOf3,
    /// First to three sets
    BestOf5,
    /// First to four sets
    BestOf7,
}

impl SetMode {
    /// Number of sets a team must win to take the match.
    pub const fn sets_to_win(self) -> u8 {
        match self {
            SetMode::Single => 1,
            SetMode::BestOf3 => 2,
            SetMode::BestOf5 => 3,
            SetMode::BestOf7 => 4,
        }
    }

    /// Maximum number of sets that can be played.
    pub const fn max_sets(self) -> u8 {
        self.sets_to_win() * 2 - 1
    }

    /// Storage key.
    pub const fn key(self) -> &'static str {
        match self {
            SetMode::Single => "single",
            SetMode::BestOf3 => "best_of_3",
            SetMode::BestOf5 => "best_of_5",
            SetMode::BestOf7 => "best_of_7",
        }
    }
}

impl FromStr for SetMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" | "1" => Ok(SetMode::Single),
            "best_of_3" | "3" => Ok(SetMode::BestOf3),
            "best_of_5" | "5" => Ok(SetMode::BestOf5),
            "best_of_7" | "7" => Ok(SetMode::BestOf7),
            other => Err(SettingsError::UnknownSetMode(other.to_string())),
        }
    }
}

impl fmt::Display for SetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Settings validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// Overtime rotation is only defined for 15 and 21.
    #[error("win points {0} unsupported (expected 15 or 21)")]
    UnsupportedWinPoints(u32),

    /// Hardcap must not be lower than the win score.
    #[error("hardcap {hardcap} is below win points {win_points}")]
    HardcapBelowWinPoints {
        /// Configured win score
        win_points: u32,
        /// Configured hardcap
        hardcap: u32,
    },

    /// Margin must be at least one point.
    #[error("minimum win margin must be at least 1")]
    InvalidMargin,

    /// Unrecognized set mode string.
    #[error("unknown set mode: {0}")]
    UnknownSetMode(String),

    /// Environment value could not be parsed.
    #[error("invalid value for {key}: {value}")]
    InvalidEnvValue {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
    },
}

/// Scoring rules for a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Points needed to win a set
    pub win_points: u32,
    /// Required lead to close a set below the hardcap
    #[serde(default = "default_margin")]
    pub min_win_margin: u32,
    /// Score that ends a set regardless of margin
    pub hardcap: u32,
    /// Set format
    #[serde(default)]
    pub set_mode: SetMode,
}

fn default_margin() -> u32 {
    DEFAULT_MIN_WIN_MARGIN
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            win_points: 21,
            min_win_margin: DEFAULT_MIN_WIN_MARGIN,
            hardcap: 25,
            set_mode: SetMode::BestOf3,
        }
    }
}

impl GameSettings {
    /// Settings for a given win score and hardcap with default margin and mode.
    pub fn new(win_points: u32, hardcap: u32) -> Self {
        Self {
            win_points,
            hardcap,
            ..Self::default()
        }
    }

    /// Builder-style set mode override.
    pub fn with_set_mode(mut self, set_mode: SetMode) -> Self {
        self.set_mode = set_mode;
        self
    }

    /// Check the settings describe a match the rotation engine can follow.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !SUPPORTED_WIN_POINTS.contains(&self.win_points) {
            return Err(SettingsError::UnsupportedWinPoints(self.win_points));
        }
        if self.hardcap < self.win_points {
            return Err(SettingsError::HardcapBelowWinPoints {
                win_points: self.win_points,
                hardcap: self.hardcap,
            });
        }
        if self.min_win_margin == 0 {
            return Err(SettingsError::InvalidMargin);
        }
        Ok(())
    }

    /// Create settings from environment variables.
    ///
    /// Reads `ROUNDNET_WIN_POINTS`, `ROUNDNET_HARDCAP` and
    /// `ROUNDNET_SET_MODE`; unset variables keep their defaults.
    pub fn from_env() -> Result<Self, SettingsError> {
        let mut settings = Self::default();
        if let Ok(raw) = std::env::var("ROUNDNET_WIN_POINTS") {
            settings.win_points = parse_env_u32("ROUNDNET_WIN_POINTS", &raw)?;
        }
        if let Ok(raw) = std::env::var("ROUNDNET_HARDCAP") {
            settings.hardcap = parse_env_u32("ROUNDNET_HARDCAP", &raw)?;
        }
        if let Ok(raw) = std::env::var("ROUNDNET_SET_MODE") {
            settings.set_mode = raw.trim().parse()?;
        }
        settings.validate()?;
        Ok(settings)
    }
}

fn parse_env_u32(key: &'static str, raw: &str) -> Result<u32, SettingsError> {
    raw.trim().parse().map_err(|_| SettingsError::InvalidEnvValue {
        key,
        value: raw.to_string(),
    })
}
