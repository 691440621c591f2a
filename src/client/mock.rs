//! Offline backend producing plausible competition data, used by the
//! TUI's `--offline` mode and the integration tests. No network calls.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::client::{fixtures, CompetitionApi};
use crate::models::{
    Competition, CompetitionEntry, CompetitionStatus, MembershipType, Result, User,
};
use crate::schedule::CompetitionCalendar;

const ROSTER: [(&str, &str, bool); 6] = [
    ("cakes", "Test Cakes", true),
    ("swiftly", "Swiftly", false),
    ("keysmash", "Key Smash", false),
    ("wpmwarrior", "WPM Warrior", true),
    ("typoqueen", "Typo Queen", false),
    ("steadyhands", "Steady Hands", false),
];

/// Fixture implementation of [`CompetitionApi`]. Results are derived
/// deterministically from each window's index, so repeated fetches of
/// the same range agree with each other.
pub struct FixtureBackend {
    calendar: CompetitionCalendar,
}

impl FixtureBackend {
    pub fn new(calendar: CompetitionCalendar) -> Self {
        Self { calendar }
    }

    fn blitz_for_window(&self, index: usize, window_from: DateTime<Utc>, window_to: DateTime<Utc>, now: DateTime<Utc>) -> Competition {
        let mut rng = StdRng::seed_from_u64(index as u64);

        let status = if now >= window_to {
            // Every 20th blitz fails, exercising the failure banner.
            if index % 20 == 19 {
                CompetitionStatus::Failed
            } else {
                CompetitionStatus::Finished
            }
        } else if now >= window_from {
            CompetitionStatus::Started
        } else {
            CompetitionStatus::Draft
        };

        let mut leaderboard: Vec<CompetitionEntry> = Vec::new();
        if status == CompetitionStatus::Finished {
            // Shuffle the roster into category placings by jittered score.
            let mut placed: Vec<(usize, u64)> = ROSTER
                .iter()
                .enumerate()
                .map(|(i, _)| (i, rng.gen_range(20..220)))
                .collect();
            placed.sort_by(|a, b| b.1.cmp(&a.1));

            for (place, (roster_index, races)) in placed.iter().enumerate() {
                let (username, display, gold) = ROSTER[*roster_index];
                let rank = place as u32 + 1;
                let reward = fixtures::PRIZE_LADDER.get(place).copied().unwrap_or(0);
                let mut entry = fixtures::entry(username, [reward, reward, reward, reward]);
                entry.user.display_name = Some(display.to_string());
                if gold {
                    entry.user.membership_type = MembershipType::Gold;
                }
                entry.grind_rank = rank;
                entry.grind_score = *races;
                entry.point_rank = rank;
                entry.point_score = races * 110;
                entry.speed_rank = rank;
                entry.speed_score = rng.gen_range(60.0..160.0);
                entry.accuracy_rank = rank;
                entry.accuracy_score = rng.gen_range(88.0..100.0);
                leaderboard.push(entry);
            }
        }

        let mut comp = fixtures::competition(
            &format!("fixture-blitz-{}", index),
            status,
            window_from,
            window_to,
            leaderboard,
        );
        // Boosted multipliers on a fixed cadence: x8 hourly, x4 and x2
        // on the half-steps between.
        comp.multiplier = match index % 6 {
            5 => 8,
            2 => 4,
            1 | 4 => 2,
            _ => 1,
        };
        comp
    }
}

#[async_trait]
impl CompetitionApi for FixtureBackend {
    async fn competitions(
        &self,
        time_from: DateTime<Utc>,
        time_to: DateTime<Utc>,
    ) -> Result<Vec<Competition>> {
        let now = Utc::now();
        let comps = self
            .calendar
            .windows()
            .iter()
            .enumerate()
            .filter(|(_, w)| w.from >= time_from && w.from < time_to)
            .map(|(i, w)| self.blitz_for_window(i, w.from, w.to, now))
            .collect();
        Ok(comps)
    }

    async fn users(&self) -> Result<Vec<User>> {
        let mut rng = StdRng::seed_from_u64(u64::MAX);
        let users = ROSTER
            .iter()
            .map(|(username, display, gold)| {
                let mut user = fixtures::user(username, rng.gen_range(0..400));
                user.display_name = Some(display.to_string());
                if *gold {
                    user.membership_type = MembershipType::Gold;
                }
                user
            })
            .collect();
        Ok(users)
    }
}
