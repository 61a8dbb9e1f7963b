//! Property-Based Tests for the Scoreboard Core
//!
//! ## Properties Verified
//!
//! - Every resolved server and receiver stand on opposite teams
//! - The event log never exceeds its cap
//! - History reads start after the most recent reset
//! - Sideout opportunities sum to the points played
//! - A score edit changes the log by at most one event

use proptest::prelude::*;
use roundnet::game::events::{EventLog, MAX_EVENTS};
use roundnet::{Event, GameSettings, Phase, Player, Scope, Scoreboard, ServeConfiguration, Team};

fn arb_team() -> impl Strategy<Value = Team> {
    prop_oneof![Just(Team::A), Just(Team::B)]
}

fn arb_config() -> impl Strategy<Value = ServeConfiguration> {
    let configs: Vec<ServeConfiguration> = ServeConfiguration::all().collect();
    proptest::sample::select(configs)
}

fn arb_phase() -> impl Strategy<Value = Phase> {
    prop_oneof![
        Just(Phase::Regular),
        Just(Phase::Overtime { win_points: 15 }),
        Just(Phase::Overtime { win_points: 21 }),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        4 => (arb_team(), 1u8..=7, 0u32..30).prop_map(|(team, set, score)| Event::ScoreSet { team, set, score }),
        1 => (arb_team(), 0u32..10).prop_map(|(team, score)| Event::SquadScoreSet { team, score }),
        1 => (1u8..=7).prop_map(|set| Event::SetChange { set }),
    ]
}

fn configured_board(config: ServeConfiguration) -> Scoreboard {
    let mut board = Scoreboard::new(GameSettings::default()).unwrap();
    board.set_serve_configuration(1, config).unwrap();
    board
}

// ============================================================================
// Rotation
// ============================================================================

proptest! {
    /// Property: server and receiver are never teammates
    #[test]
    fn prop_rotation_opposite_teams(config in arb_config(), point in 0u32..500, phase in arb_phase()) {
        let table = config.table().unwrap();
        let server = table.server(point, phase).unwrap();
        let receiver = table.receiver(point, phase).unwrap();
        prop_assert_ne!(server.team(), receiver.team());
    }

    /// Property: the overtime receiver serves the next point
    #[test]
    fn prop_overtime_receiver_serves_next(config in arb_config(), point in 40u32..200, win_points in prop_oneof![Just(15u32), Just(21u32)]) {
        let table = config.table().unwrap();
        let phase = Phase::Overtime { win_points };
        prop_assert_eq!(table.receiver(point, phase), table.server(point + 1, phase));
    }

    /// Property: each player serves two consecutive points in regular play
    #[test]
    fn prop_regular_serves_pair_up(config in arb_config(), turn in 0u32..100) {
        let table = config.table().unwrap();
        let first = 2 * turn + 1;
        prop_assert_eq!(
            table.server(first, Phase::Regular),
            table.server(first + 1, Phase::Regular)
        );
    }
}

// ============================================================================
// Event Log
// ============================================================================

proptest! {
    /// Property: the log holds at most MAX_EVENTS, keeping the newest
    #[test]
    fn prop_log_capped(events in prop::collection::vec(arb_event(), 0..450)) {
        let log = EventLog::from_events(events.iter().copied());
        prop_assert_eq!(log.len(), events.len().min(MAX_EVENTS));
        prop_assert_eq!(log.iter().last(), events.last());
    }

    /// Property: history only covers events after the last reset
    #[test]
    fn prop_history_starts_after_reset(
        before in prop::collection::vec(arb_event(), 0..90),
        after in prop::collection::vec(arb_event(), 0..90),
        set in 1u8..=7,
    ) {
        let mut log = EventLog::from_events(before.iter().copied());
        log.append(Event::Reset);
        for event in &after {
            log.append(*event);
        }

        let expected: Vec<_> = after
            .iter()
            .filter_map(Event::as_point)
            .filter(|p| p.set == set)
            .collect();
        prop_assert_eq!(log.score_history(set).collect::<Vec<_>>(), expected);
    }

    /// Property: a score edit adds or removes at most one event
    #[test]
    fn prop_edit_changes_log_by_at_most_one(
        edits in prop::collection::vec((arb_team(), 1u8..=3, 0u32..25), 1..80),
    ) {
        let mut board = Scoreboard::new(GameSettings::default()).unwrap();
        for (team, set, score) in edits {
            let before = board.log().len();
            board.edit_score(team, set, score).unwrap();
            let after = board.log().len();
            prop_assert!(after.abs_diff(before) <= 1);
            prop_assert!(after <= MAX_EVENTS);
        }
    }
}

// ============================================================================
// Statistics
// ============================================================================

proptest! {
    /// Property: sideout and break opportunities both count every point once
    #[test]
    fn prop_opportunities_sum_to_points(
        config in arb_config(),
        rallies in prop::collection::vec(arb_team(), 0..60),
    ) {
        let mut board = configured_board(config);
        for team in &rallies {
            board.record_point(*team).unwrap();
        }

        let stats = board.statistics(Scope::SingleSet(1));
        let points = rallies.len() as u32;
        let sideout_total: u32 = Player::ALL.iter().map(|p| stats.player(*p).sideout_opportunities).sum();
        let serve_total: u32 = Player::ALL.iter().map(|p| stats.player(*p).break_opportunities).sum();
        let team_total: u32 = Team::ALL.iter().map(|t| stats.team(*t).break_opportunities).sum();

        prop_assert_eq!(sideout_total, points);
        prop_assert_eq!(serve_total, points);
        prop_assert_eq!(team_total, points);
        prop_assert_eq!(stats.unattributed_points, 0);

        for player in Player::ALL {
            let p = stats.player(player);
            prop_assert!(p.sideouts <= p.sideout_opportunities);
            prop_assert!(p.breaks <= p.break_opportunities);
            prop_assert!(p.sideout_percentage <= 100 && p.break_percentage <= 100);
        }
    }
}
