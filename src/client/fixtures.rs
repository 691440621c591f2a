//! Builders for fixture competitions and users, shared by the offline
//! backend and the test suites.

use chrono::{DateTime, Utc};

use crate::models::{
    CompUser, Competition, CompetitionEntry, CompetitionPrize, CompetitionStatus, MembershipType,
    User, UserStatus,
};

/// Standard blitz prize ladder for a x1 blitz.
pub const PRIZE_LADDER: [u64; 5] = [10, 7, 5, 3, 1];

pub fn prize_table() -> Vec<CompetitionPrize> {
    PRIZE_LADDER
        .iter()
        .enumerate()
        .map(|(i, &points)| CompetitionPrize {
            rank: i as u32 + 1,
            points,
        })
        .collect()
}

/// Leaderboard entry with the given rewards in category order
/// (grind, point, speed, accuracy). Ranks default to 1 and scores are
/// derived from the rewards; tests overwrite fields as needed.
pub fn entry(username: &str, rewards: [u64; 4]) -> CompetitionEntry {
    CompetitionEntry {
        id: format!("entry-{}", username),
        grind_rank: 1,
        grind_score: rewards[0] * 3,
        grind_reward: rewards[0],
        point_rank: 1,
        point_score: rewards[1] * 100,
        point_reward: rewards[1],
        speed_rank: 1,
        speed_score: 80.0 + rewards[2] as f64,
        speed_reward: rewards[2],
        accuracy_rank: 1,
        accuracy_score: 90.0 + rewards[3] as f64 / 2.0,
        accuracy_reward: rewards[3],
        user: CompUser {
            username: username.to_string(),
            display_name: None,
            status: UserStatus::Active,
            membership_type: MembershipType::Basic,
        },
    }
}

pub fn competition(
    id: &str,
    status: CompetitionStatus,
    start_at: DateTime<Utc>,
    finish_at: DateTime<Utc>,
    leaderboard: Vec<CompetitionEntry>,
) -> Competition {
    Competition {
        id: id.to_string(),
        status,
        multiplier: 1,
        start_at,
        finish_at,
        leaderboard,
        grind_rewards: prize_table(),
        point_rewards: prize_table(),
        speed_rewards: prize_table(),
        accuracy_rewards: prize_table(),
    }
}

pub fn user(username: &str, total_points: u64) -> User {
    User {
        id: format!("user-{}", username),
        username: username.to_string(),
        display_name: None,
        status: UserStatus::Active,
        membership_type: MembershipType::Basic,
        total_points,
    }
}
