//! Serve and Receive Rotation
//!
//! Maps a set's starting configuration and a point index to the player
//! serving and the player receiving that point.
//!
//! ## Regular play
//!
//! The opening point is a single serve. After that each server takes two
//! consecutive points before service passes on, and the receiver changes
//! every point:
//!
//! ```text
//! point     0 | 1  2 | 3  4 | 5  6 | 7  8 | ...
//! server    s | r  r | s' s'| r' r'| s  s | ...
//! receiver  r | s  s'| r  r'| s' s | r' r | ...
//! ```
//!
//! where `s`/`r` are the starting server/receiver and `'` marks the partner.
//!
//! ## Overtime
//!
//! Service moves on every point. The server phase is realigned to where
//! regular play would stand at `2 * win_points - 2` points, and receivers
//! follow one of two dedicated orders chosen by the win score.

use serde::{Deserialize, Serialize};

use crate::core::player::Player;

/// Length of the server cycle.
pub const SERVE_CYCLE: usize = 4;

/// Length of the regular receiver cycle.
pub const RECEIVE_CYCLE: usize = 8;

// =============================================================================
// SERVE CONFIGURATION
// =============================================================================

/// Starting server and receiver of a set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServeConfiguration {
    /// Player serving the opening point
    pub starting_server: Player,
    /// Player receiving the opening point
    pub starting_receiver: Player,
}

impl ServeConfiguration {
    /// Create a configuration. Validity is checked on lookup.
    pub const fn new(starting_server: Player, starting_receiver: Player) -> Self {
        Self {
            starting_server,
            starting_receiver,
        }
    }

    /// Server and receiver stand on opposite teams.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.starting_server.team() != self.starting_receiver.team()
    }

    /// Rotation table for this configuration, `None` when invalid.
    pub fn table(&self) -> Option<&'static RotationTable> {
        rotation_table(self.starting_server, self.starting_receiver)
    }

    /// All eight valid configurations.
    pub fn all() -> impl Iterator<Item = ServeConfiguration> {
        ROTATION_TABLES
            .iter()
            .map(|t| ServeConfiguration::new(t.starting_server, t.starting_receiver))
    }
}

// =============================================================================
// PHASE
// =============================================================================

/// Which rotation regime applies to a point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Double-serve turns after a single opening serve
    Regular,
    /// Single serves, realigned for the configured win score
    Overtime {
        /// Win score of the set
        win_points: u32,
    },
}

impl Phase {
    /// Phase for a point given the overtime flag.
    #[inline]
    pub fn from_flag(overtime: bool, win_points: u32) -> Self {
        if overtime {
            Phase::Overtime { win_points }
        } else {
            Phase::Regular
        }
    }

    /// Whether this is the overtime regime.
    #[inline]
    pub fn is_overtime(self) -> bool {
        matches!(self, Phase::Overtime { .. })
    }
}

// =============================================================================
// ROTATION TABLES
// =============================================================================

/// Fixed rotation for one starting configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotationTable {
    /// Player serving the opening point
    pub starting_server: Player,
    /// Player receiving the opening point
    pub starting_receiver: Player,
    /// Server cycle for both phases
    pub serve_order: [Player; SERVE_CYCLE],
    /// Receiver cycle in regular play
    pub receiving_order: [Player; RECEIVE_CYCLE],
    /// Receiver cycle in overtime for games to 15
    pub overtime_order_15: [Player; SERVE_CYCLE],
    /// Receiver cycle in overtime for games to 21
    pub overtime_order_21: [Player; SERVE_CYCLE],
}

impl RotationTable {
    /// Build the table for a server/receiver pair.
    ///
    /// The receiver of the opening point serves next, and each serve turn
    /// opens on the player who served the previous turn. In overtime every
    /// server serves to the player who serves after them.
    const fn build(s: Player, r: Player) -> Self {
        let ps = s.partner();
        let pr = r.partner();
        Self {
            starting_server: s,
            starting_receiver: r,
            serve_order: [s, r, ps, pr],
            receiving_order: [r, s, ps, r, pr, ps, s, pr],
            overtime_order_15: [s, r, ps, pr],
            overtime_order_21: [ps, pr, s, r],
        }
    }

    /// Slot of the starting server in the serve order.
    #[inline]
    pub fn server_slot(&self) -> Option<usize> {
        slot_of(&self.serve_order, self.starting_server)
    }

    /// Slot of the starting receiver in the regular receiving order.
    #[inline]
    pub fn receiver_slot(&self) -> Option<usize> {
        slot_of(&self.receiving_order, self.starting_receiver)
    }

    /// Overtime receiving order for a win score.
    pub fn overtime_order(&self, win_points: u32) -> Option<&[Player; SERVE_CYCLE]> {
        match win_points {
            15 => Some(&self.overtime_order_15),
            21 => Some(&self.overtime_order_21),
            _ => None,
        }
    }

    /// Player serving the point at `point_index`.
    pub fn server(&self, point_index: u32, phase: Phase) -> Option<Player> {
        if point_index == 0 {
            return Some(self.starting_server);
        }
        let step = match phase {
            Phase::Regular => ((point_index as usize + 1) / 2) % SERVE_CYCLE,
            Phase::Overtime { win_points } => overtime_serve_step(point_index, win_points),
        };
        let slot = self.server_slot()?;
        Some(self.serve_order[(slot + step) % SERVE_CYCLE])
    }

    /// Player receiving the point at `point_index`.
    pub fn receiver(&self, point_index: u32, phase: Phase) -> Option<Player> {
        if point_index == 0 {
            return Some(self.starting_receiver);
        }
        let slot = self.receiver_slot()?;
        match phase {
            Phase::Regular => {
                let step = point_index as usize % RECEIVE_CYCLE;
                Some(self.receiving_order[(slot + step) % RECEIVE_CYCLE])
            }
            Phase::Overtime { win_points } => {
                let order = self.overtime_order(win_points)?;
                let step = (point_index as usize - 1) % SERVE_CYCLE;
                Some(order[(slot + step) % SERVE_CYCLE])
            }
        }
    }
}

/// Server step in overtime.
///
/// `points_till_overtime = 2 * win_points - 2`. Regular play stands at
/// `floor((points_till_overtime + 1) / 2) mod 4` there; overtime then
/// advances one slot per point. Since `points_till_overtime` is even the
/// half point of the real-valued phase never carries into the sum.
fn overtime_serve_step(point_index: u32, win_points: u32) -> usize {
    let points_till_overtime = (win_points as i64) * 2 - 2;
    let base = ((points_till_overtime + 1) / 2).rem_euclid(SERVE_CYCLE as i64);
    let offset = (point_index as i64 - points_till_overtime).rem_euclid(SERVE_CYCLE as i64);
    ((base + offset) % SERVE_CYCLE as i64) as usize
}

#[inline]
fn slot_of(order: &[Player], player: Player) -> Option<usize> {
    order.iter().position(|p| *p == player)
}

/// All eight rotation tables, indexed by [`table_index`].
pub static ROTATION_TABLES: [RotationTable; 8] = [
    RotationTable::build(Player::A1, Player::B1),
    RotationTable::build(Player::A1, Player::B2),
    RotationTable::build(Player::A2, Player::B1),
    RotationTable::build(Player::A2, Player::B2),
    RotationTable::build(Player::B1, Player::A1),
    RotationTable::build(Player::B1, Player::A2),
    RotationTable::build(Player::B2, Player::A1),
    RotationTable::build(Player::B2, Player::A2),
];

/// Index of a server/receiver pair in [`ROTATION_TABLES`].
///
/// Each server has two possible receivers: the first and second player of
/// the opposing team.
#[inline]
pub fn table_index(server: Player, receiver: Player) -> Option<usize> {
    if server.team() == receiver.team() {
        return None;
    }
    let receiver_pos = receiver.index() % 2;
    Some(server.index() * 2 + receiver_pos)
}

/// Rotation table for a server/receiver pair, `None` for same-team pairs.
#[inline]
pub fn rotation_table(server: Player, receiver: Player) -> Option<&'static RotationTable> {
    table_index(server, receiver).map(|i| &ROTATION_TABLES[i])
}
