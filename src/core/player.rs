//! Team and Player Identifiers
//!
//! Roundnet is played two against two. Players are addressed by court
//! position (`A1`, `A2` for team A, `B1`, `B2` for team B) and persisted
//! with the single-letter keys `a`, `b`, `c`, `d`.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// TEAM
// =============================================================================

/// One of the two competing teams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    /// Team A (players `a` and `b`)
    A,
    /// Team B (players `c` and `d`)
    B,
}

impl Team {
    /// Both teams in display order.
    pub const ALL: [Team; 2] = [Team::A, Team::B];

    /// The opposing team.
    #[inline]
    pub const fn opponent(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }

    /// Storage key fragment (`team_a` / `team_b`).
    pub const fn key(self) -> &'static str {
        match self {
            Team::A => "team_a",
            Team::B => "team_b",
        }
    }

    /// Parse a storage key fragment.
    pub fn from_key(key: &str) -> Option<Team> {
        match key {
            "team_a" | "a" => Some(Team::A),
            "team_b" | "b" => Some(Team::B),
            _ => None,
        }
    }

    /// The two players of this team, first position first.
    pub const fn players(self) -> [Player; 2] {
        match self {
            Team::A => [Player::A1, Player::A2],
            Team::B => [Player::B1, Player::B2],
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::A => f.write_str("A"),
            Team::B => f.write_str("B"),
        }
    }
}

// =============================================================================
// PLAYER
// =============================================================================

/// A player position on court.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Player {
    /// First player of team A
    #[serde(rename = "a")]
    A1 = 0,
    /// Second player of team A
    #[serde(rename = "b")]
    A2 = 1,
    /// First player of team B
    #[serde(rename = "c")]
    B1 = 2,
    /// Second player of team B
    #[serde(rename = "d")]
    B2 = 3,
}

impl Player {
    /// All four positions in storage order.
    pub const ALL: [Player; 4] = [Player::A1, Player::A2, Player::B1, Player::B2];

    /// Team this player belongs to.
    #[inline]
    pub const fn team(self) -> Team {
        match self {
            Player::A1 | Player::A2 => Team::A,
            Player::B1 | Player::B2 => Team::B,
        }
    }

    /// The teammate of this player.
    #[inline]
    pub const fn partner(self) -> Player {
        match self {
            Player::A1 => Player::A2,
            Player::A2 => Player::A1,
            Player::B1 => Player::B2,
            Player::B2 => Player::B1,
        }
    }

    /// Single-letter storage key.
    pub const fn key(self) -> &'static str {
        match self {
            Player::A1 => "a",
            Player::A2 => "b",
            Player::B1 => "c",
            Player::B2 => "d",
        }
    }

    /// Parse a single-letter storage key.
    pub fn from_key(key: &str) -> Option<Player> {
        match key {
            "a" => Some(Player::A1),
            "b" => Some(Player::A2),
            "c" => Some(Player::B1),
            "d" => Some(Player::B2),
            _ => None,
        }
    }

    /// Get player from index (0-3).
    pub fn from_index(index: u8) -> Option<Player> {
        Player::ALL.get(index as usize).copied()
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A1 => f.write_str("A1"),
            Player::A2 => f.write_str("A2"),
            Player::B1 => f.write_str("B1"),
            Player::B2 => f.write_str("B2"),
        }
    }
}
