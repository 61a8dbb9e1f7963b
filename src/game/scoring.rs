//! Set Winner and Overtime Classification
//!
//! Pure functions over a set's two scores and the game settings.

use crate::core::player::Team;
use crate::game::settings::GameSettings;

/// Decide whether a set is complete and who won it.
///
/// Reaching the hardcap ends the set outright. Below the cap a team must
/// score past the win score with at least the minimum margin, so 21-19 in a
/// game to 21 is still open while 23-21 is closed. Equal scores at or above
/// the hardcap cannot happen in play and yield `None`.
pub fn set_winner(score_a: u32, score_b: u32, settings: &GameSettings) -> Option<Team> {
    let leader = leading_team(score_a, score_b)?;

    if score_a >= settings.hardcap || score_b >= settings.hardcap {
        return Some(leader);
    }

    let past_win = score_a > settings.win_points || score_b > settings.win_points;
    if past_win && score_a.abs_diff(score_b) >= settings.min_win_margin {
        return Some(leader);
    }

    None
}

/// Whether the set has entered overtime.
///
/// True once either team reaches the hardcap, or once the win score is
/// reached without the required margin.
pub fn is_overtime(score_a: u32, score_b: u32, settings: &GameSettings) -> bool {
    if score_a >= settings.hardcap || score_b >= settings.hardcap {
        return true;
    }
    let reached_win = score_a >= settings.win_points || score_b >= settings.win_points;
    reached_win && score_a.abs_diff(score_b) < settings.min_win_margin
}

#[inline]
fn leading_team(score_a: u32, score_b: u32) -> Option<Team> {
    match score_a.cmp(&score_b) {
        std::cmp::Ordering::Greater => Some(Team::A),
        std::cmp::Ordering::Less => Some(Team::B),
        std::cmp::Ordering::Equal => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> GameSettings {
        GameSettings::new(21, 25)
    }

    #[test]
    fn test_no_winner_without_margin() {
        assert_eq!(set_winner(21, 20, &standard()), None);
        assert_eq!(set_winner(21, 19, &standard()), None);
        assert_eq!(set_winner(20, 19, &standard()), None);
        assert_eq!(set_winner(22, 20, &standard()), Some(Team::A));
    }

    #[test]
    fn test_reaching_win_score_is_not_enough() {
        assert_eq!(set_winner(21, 0, &standard()), None);
        assert_eq!(set_winner(15, 21, &standard()), None);
        assert!(!is_overtime(21, 0, &standard()));
        assert_eq!(set_winner(22, 0, &standard()), Some(Team::A));
        assert_eq!(set_winner(0, 22, &standard()), Some(Team::B));
    }

    #[test]
    fn test_overtime_winner_with_margin() {
        assert_eq!(set_winner(23, 21, &standard()), Some(Team::A));
        assert_eq!(set_winner(22, 24, &standard()), Some(Team::B));
    }

    #[test]
    fn test_hardcap_overrides_margin() {
        assert_eq!(set_winner(25, 24, &standard()), Some(Team::A));
        assert_eq!(set_winner(24, 25, &standard()), Some(Team::B));
        assert_eq!(set_winner(25, 23, &standard()), Some(Team::A));
    }

    #[test]
    fn test_tie_at_hardcap_has_no_winner() {
        assert_eq!(set_winner(25, 25, &standard()), None);
    }

    #[test]
    fn test_overtime_detection() {
        let s = standard();
        assert!(!is_overtime(0, 0, &s));
        assert!(!is_overtime(20, 20, &s));
        assert!(is_overtime(21, 20, &s));
        assert!(is_overtime(22, 22, &s));
        assert!(!is_overtime(21, 19, &s));
        assert!(is_overtime(25, 23, &s));
    }

    #[test]
    fn test_at_most_one_winner() {
        let s = GameSettings::new(15, 17);
        for a in 0..=20 {
            for b in 0..=20 {
                if let Some(team) = set_winner(a, b, &s) {
                    let (mine, theirs) = match team {
                        Team::A => (a, b),
                        Team::B => (b, a),
                    };
                    assert!(mine > theirs);
                }
            }
        }
    }
}
