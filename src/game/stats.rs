//! Break and Sideout Statistics
//!
//! Replays the score history through the rotation engine to find who
//! served and who received each point, then counts:
//!
//! - **break**: the serving team won the point
//! - **sideout**: the receiving team won the point
//!
//! Everything here is derived on demand and never stored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::player::{Player, Team};
use crate::game::events::ScorePoint;
use crate::game::rotation::Phase;
use crate::game::scoreboard::Scoreboard;
use crate::game::scoring::is_overtime;
use crate::game::settings::GameSettings;

/// Which points to aggregate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    /// Every set since the last reset
    WholeMatch,
    /// A single set
    SingleSet(u8),
}

/// Rounded percentage of `count` over `opportunities`, 0 when there were none.
///
/// Halves round up, matching `round(100 * count / opportunities)`.
#[inline]
pub fn percentage(count: u32, opportunities: u32) -> u32 {
    if opportunities == 0 {
        return 0;
    }
    let count = count as u64;
    let opportunities = opportunities as u64;
    ((count * 200 + opportunities) / (opportunities * 2)) as u32
}

/// Team-level serving statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStats {
    /// Points won while serving
    pub breaks: u32,
    /// Points served
    pub break_opportunities: u32,
    /// `breaks` over `break_opportunities`
    pub break_percentage: u32,
}

/// Player-level serving and receiving statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Points won by the team while this player received
    pub sideouts: u32,
    /// Points received
    pub sideout_opportunities: u32,
    /// `sideouts` over `sideout_opportunities`
    pub sideout_percentage: u32,
    /// Points won while this player served
    pub breaks: u32,
    /// Points served
    pub break_opportunities: u32,
    /// `breaks` over `break_opportunities`
    pub break_percentage: u32,
}

/// Aggregated statistics for a scope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Team A then team B
    pub teams: [TeamStats; 2],
    /// Players in `Player::ALL` order
    pub players: [PlayerStats; 4],
    /// Points skipped because their set has no usable rotation
    pub unattributed_points: u32,
}

impl Statistics {
    /// Statistics of a team.
    pub fn team(&self, team: Team) -> &TeamStats {
        &self.teams[team.index()]
    }

    /// Statistics of a player.
    pub fn player(&self, player: Player) -> &PlayerStats {
        &self.players[player.index()]
    }

    /// Count one attributed point.
    fn record(&mut self, scorer: Team, server: Player, receiver: Player) {
        let serving_team = server.team();

        self.teams[serving_team.index()].break_opportunities += 1;
        self.players[server.index()].break_opportunities += 1;
        self.players[receiver.index()].sideout_opportunities += 1;

        if scorer == serving_team {
            self.teams[serving_team.index()].breaks += 1;
            self.players[server.index()].breaks += 1;
        } else {
            self.players[receiver.index()].sideouts += 1;
        }
    }

    fn fill_percentages(&mut self) {
        for team in &mut self.teams {
            team.break_percentage = percentage(team.breaks, team.break_opportunities);
        }
        for player in &mut self.players {
            player.sideout_percentage = percentage(player.sideouts, player.sideout_opportunities);
            player.break_percentage = percentage(player.breaks, player.break_opportunities);
        }
    }
}

/// Index each point of one set and derive its rotation phase.
///
/// The phase comes from the running score before the point: a point is an
/// overtime point when the score it was played at is an overtime score.
pub(crate) fn point_phases<'a, I>(
    points: I,
    settings: &'a GameSettings,
) -> impl Iterator<Item = (u32, ScorePoint, Phase)> + 'a
where
    I: Iterator<Item = ScorePoint> + 'a,
{
    let mut running = [0u32; 2];
    points.enumerate().map(move |(index, point)| {
        let overtime = is_overtime(running[0], running[1], settings);
        running[point.team.index()] = point.score;
        (index as u32, point, Phase::from_flag(overtime, settings.win_points))
    })
}

/// Compute break and sideout statistics.
pub fn calculate_statistics(board: &Scoreboard, scope: Scope) -> Statistics {
    let mut stats = Statistics::default();

    let sets: BTreeMap<u8, Vec<ScorePoint>> = match scope {
        Scope::WholeMatch => {
            let mut grouped: BTreeMap<u8, Vec<ScorePoint>> = BTreeMap::new();
            for point in board.log().match_history() {
                grouped.entry(point.set).or_default().push(point);
            }
            grouped
        }
        Scope::SingleSet(set) => BTreeMap::from([(set, board.score_history(set).collect())]),
    };

    let settings = board.settings();
    for (set, points) in sets {
        let table = board
            .state()
            .serve_configuration(set)
            .and_then(|config| config.table());

        for (index, point, phase) in point_phases(points.into_iter(), settings) {
            let attributed = table.and_then(|t| Some((t.server(index, phase)?, t.receiver(index, phase)?)));
            match attributed {
                Some((server, receiver)) => stats.record(point.team, server, receiver),
                None => stats.unattributed_points += 1,
            }
        }
    }

    stats.fill_percentages();
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rotation::ServeConfiguration;

    fn board_with(config: ServeConfiguration) -> Scoreboard {
        let mut board = Scoreboard::new(GameSettings::default()).unwrap();
        board.set_serve_configuration(1, config).unwrap();
        board
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(5, 0), 0);
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(4, 4), 100);
    }

    #[test]
    fn test_empty_set_is_all_zero() {
        let board = board_with(ServeConfiguration::new(Player::A1, Player::B1));
        let stats = board.statistics(Scope::SingleSet(1));
        assert_eq!(stats, Statistics::default());
    }

    #[test]
    fn test_break_and_sideout_attribution() {
        // A1 serves to B1 on point 0, B1 serves points 1 and 2.
        let mut board = board_with(ServeConfiguration::new(Player::A1, Player::B1));
        board.record_point(Team::A).unwrap(); // A1 breaks against B1
        board.record_point(Team::A).unwrap(); // B1 serves to A1, A1 sides out
        board.record_point(Team::B).unwrap(); // B1 serves to A2, B breaks

        let stats = board.statistics(Scope::SingleSet(1));

        assert_eq!(stats.team(Team::A).breaks, 1);
        assert_eq!(stats.team(Team::A).break_opportunities, 1);
        assert_eq!(stats.team(Team::A).break_percentage, 100);
        assert_eq!(stats.team(Team::B).breaks, 1);
        assert_eq!(stats.team(Team::B).break_opportunities, 2);
        assert_eq!(stats.team(Team::B).break_percentage, 50);

        let a1 = stats.player(Player::A1);
        assert_eq!((a1.breaks, a1.break_opportunities), (1, 1));
        assert_eq!((a1.sideouts, a1.sideout_opportunities, a1.sideout_percentage), (1, 1, 100));

        let a2 = stats.player(Player::A2);
        assert_eq!((a2.sideouts, a2.sideout_opportunities), (0, 1));

        let b1 = stats.player(Player::B1);
        assert_eq!((b1.sideouts, b1.sideout_opportunities), (0, 1));
        assert_eq!((b1.breaks, b1.break_opportunities, b1.break_percentage), (1, 2, 50));
    }

    #[test]
    fn test_sideout_opportunities_equal_points() {
        let mut board = board_with(ServeConfiguration::new(Player::B2, Player::A1));
        for i in 0..30 {
            let team = if i % 3 == 0 { Team::B } else { Team::A };
            board.record_point(team).unwrap();
        }
        let stats = board.statistics(Scope::SingleSet(1));
        let total: u32 = stats.players.iter().map(|p| p.sideout_opportunities).sum();
        assert_eq!(total, board.score_history(1).count() as u32);
        let breaks: u32 = stats.teams.iter().map(|t| t.break_opportunities).sum();
        assert_eq!(breaks, total);
    }

    #[test]
    fn test_whole_match_reindexes_each_set() {
        let mut board = board_with(ServeConfiguration::new(Player::A1, Player::B1));
        board
            .set_serve_configuration(2, ServeConfiguration::new(Player::B1, Player::A1))
            .unwrap();

        board.record_point(Team::A).unwrap();
        board.change_set(1);
        board.record_point(Team::B).unwrap();
        board.go_to_set(1).unwrap();
        board.record_point(Team::A).unwrap();

        let whole = board.statistics(Scope::WholeMatch);
        // Set 2 point 0 is served by B1 and won by B: a break for B.
        assert_eq!(whole.team(Team::B).breaks, 1);
        assert_eq!(whole.player(Player::B1).breaks, 1);
        // Set 1 points 0 and 1: A1 break, then B1 serves and A1 sides out.
        assert_eq!(whole.team(Team::A).breaks, 1);
        assert_eq!(whole.player(Player::A1).sideouts, 1);

        let set_two = board.statistics(Scope::SingleSet(2));
        assert_eq!(set_two.team(Team::B).break_opportunities, 1);
        assert_eq!(set_two.team(Team::A).break_opportunities, 0);
    }

    #[test]
    fn test_points_without_rotation_are_unattributed() {
        let mut board = Scoreboard::new(GameSettings::default()).unwrap();
        board.record_point(Team::A).unwrap();
        board.record_point(Team::B).unwrap();
        let stats = board.statistics(Scope::WholeMatch);
        assert_eq!(stats.unattributed_points, 2);
        assert_eq!(stats.team(Team::A).break_opportunities, 0);
    }

    #[test]
    fn test_history_before_reset_is_ignored() {
        let mut board = board_with(ServeConfiguration::new(Player::A1, Player::B1));
        board.record_point(Team::A).unwrap();
        board.reset();
        board
            .set_serve_configuration(1, ServeConfiguration::new(Player::A1, Player::B1))
            .unwrap();
        let stats = board.statistics(Scope::WholeMatch);
        assert_eq!(stats, Statistics::default());
    }

    #[test]
    fn test_point_phases_switch_at_overtime_score() {
        let settings = GameSettings::new(15, 17);
        let mut points = Vec::new();
        for score in 1..=14 {
            points.push(ScorePoint { team: Team::A, set: 1, score });
            points.push(ScorePoint { team: Team::B, set: 1, score });
        }
        points.push(ScorePoint { team: Team::A, set: 1, score: 15 });
        points.push(ScorePoint { team: Team::B, set: 1, score: 15 });

        let phases: Vec<Phase> = point_phases(points.into_iter(), &settings)
            .map(|(_, _, phase)| phase)
            .collect();
        // 14-14 is still regular; the point played at 15-14 is overtime.
        assert_eq!(phases[28], Phase::Regular);
        assert_eq!(phases[29], Phase::Overtime { win_points: 15 });
    }
}
