use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;

use crate::models::{Competition, LeaderboardEntry, UserStatus};

/// Builds the running daily leaderboard from a day's competitions.
///
/// Only blitzes that have concluded (`finish_at` strictly before `now`)
/// contribute; an in-progress or future blitz never feeds the running
/// totals. Status is deliberately not consulted here: a Failed blitz
/// with entries counts the same as a Finished one, matching the live
/// page. Disqualified users and entries with a zero reward sum are
/// dropped, the rest accumulate Folly Points by username.
///
/// Output is sorted descending by total; equal totals break
/// alphabetically by username.
pub fn aggregate_daily(competitions: &[Competition], now: DateTime<Utc>) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = Vec::new();
    let mut by_username: HashMap<String, usize> = HashMap::new();

    for comp in competitions.iter().filter(|c| c.finish_at < now) {
        for row in &comp.leaderboard {
            if row.user.status == UserStatus::Disqualified {
                continue;
            }
            let reward = row.total_reward();
            if reward == 0 {
                continue;
            }
            match by_username.get(&row.user.username) {
                Some(&i) => entries[i].total_points += reward,
                None => {
                    by_username.insert(row.user.username.clone(), entries.len());
                    entries.push(LeaderboardEntry {
                        username: row.user.username.clone(),
                        display_name: row.user.display_name.clone(),
                        membership_type: row.user.membership_type,
                        total_points: reward,
                    });
                }
            }
        }
    }

    entries.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then_with(|| a.username.cmp(&b.username))
    });

    debug!(
        "Aggregated {} leaderboard entries from {} competitions",
        entries.len(),
        competitions.len()
    );
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures;
    use crate::models::{CompetitionStatus, MembershipType};
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2021-12-19T00:00:00Z".parse().unwrap()
    }

    fn finished_at(offset_minutes: i64) -> (DateTime<Utc>, DateTime<Utc>) {
        let finish = now() - Duration::minutes(offset_minutes);
        (finish - Duration::minutes(10), finish)
    }

    #[test]
    fn test_empty_input_gives_empty_leaderboard() {
        assert!(aggregate_daily(&[], now()).is_empty());
    }

    #[test]
    fn test_totals_accumulate_across_windows() {
        let (start_a, finish_a) = finished_at(30);
        let (start_b, finish_b) = finished_at(20);
        let comps = vec![
            fixtures::competition(
                "a",
                CompetitionStatus::Finished,
                start_a,
                finish_a,
                vec![fixtures::entry("cakes", [10, 0, 0, 0])],
            ),
            fixtures::competition(
                "b",
                CompetitionStatus::Finished,
                start_b,
                finish_b,
                vec![fixtures::entry("cakes", [0, 5, 0, 0])],
            ),
        ];

        let board = aggregate_daily(&comps, now());
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].username, "cakes");
        assert_eq!(board[0].total_points, 15);
    }

    #[test]
    fn test_running_blitz_does_not_contribute() {
        let start = now() - Duration::minutes(5);
        let comps = vec![fixtures::competition(
            "live",
            CompetitionStatus::Started,
            start,
            start + Duration::minutes(10),
            vec![fixtures::entry("cakes", [10, 0, 0, 0])],
        )];
        assert!(aggregate_daily(&comps, now()).is_empty());
    }

    #[test]
    fn test_blitz_finishing_exactly_now_does_not_contribute() {
        let comps = vec![fixtures::competition(
            "edge",
            CompetitionStatus::Finished,
            now() - Duration::minutes(10),
            now(),
            vec![fixtures::entry("cakes", [10, 0, 0, 0])],
        )];
        assert!(aggregate_daily(&comps, now()).is_empty());
    }

    #[test]
    fn test_disqualified_users_are_excluded() {
        let (start, finish) = finished_at(30);
        let mut cheat = fixtures::entry("cheat", [20, 0, 0, 0]);
        cheat.user.status = UserStatus::Disqualified;
        let comps = vec![fixtures::competition(
            "a",
            CompetitionStatus::Finished,
            start,
            finish,
            vec![cheat, fixtures::entry("cakes", [5, 0, 0, 0])],
        )];

        let board = aggregate_daily(&comps, now());
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].username, "cakes");
    }

    #[test]
    fn test_zero_reward_entries_are_excluded() {
        let (start, finish) = finished_at(30);
        let comps = vec![fixtures::competition(
            "a",
            CompetitionStatus::Finished,
            start,
            finish,
            vec![
                fixtures::entry("nothing", [0, 0, 0, 0]),
                fixtures::entry("cakes", [1, 0, 0, 0]),
            ],
        )];

        let board = aggregate_daily(&comps, now());
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].username, "cakes");
    }

    #[test]
    fn test_failed_blitz_entries_still_count() {
        // The daily aggregate does not special-case Failed; only the
        // per-blitz results view messages the failure.
        let (start, finish) = finished_at(30);
        let comps = vec![fixtures::competition(
            "a",
            CompetitionStatus::Failed,
            start,
            finish,
            vec![fixtures::entry("cakes", [3, 0, 0, 0])],
        )];
        assert_eq!(aggregate_daily(&comps, now()).len(), 1);
    }

    #[test]
    fn test_sorted_descending_with_alphabetical_ties() {
        let (start, finish) = finished_at(30);
        let comps = vec![fixtures::competition(
            "a",
            CompetitionStatus::Finished,
            start,
            finish,
            vec![
                fixtures::entry("zed", [5, 0, 0, 0]),
                fixtures::entry("amber", [5, 0, 0, 0]),
                fixtures::entry("mia", [12, 0, 0, 0]),
            ],
        )];

        let board = aggregate_daily(&comps, now());
        let names: Vec<&str> = board.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, vec!["mia", "amber", "zed"]);
        for pair in board.windows(2) {
            assert!(pair[0].total_points >= pair[1].total_points);
        }
    }

    #[test]
    fn test_first_entry_seeds_identity() {
        let (start, finish) = finished_at(30);
        let mut first = fixtures::entry("cakes", [4, 0, 0, 0]);
        first.user.display_name = Some("Test Cakes".to_string());
        first.user.membership_type = MembershipType::Gold;
        let comps = vec![fixtures::competition(
            "a",
            CompetitionStatus::Finished,
            start,
            finish,
            vec![first, fixtures::entry("cakes", [0, 2, 0, 0])],
        )];

        let board = aggregate_daily(&comps, now());
        assert_eq!(board[0].total_points, 6);
        assert_eq!(board[0].label(), "Test Cakes");
        assert!(board[0].membership_type.is_gold());
    }
}
