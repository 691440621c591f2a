use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CompUser;

/// Backend lifecycle of a blitz: Draft → Started → {Finished | Failed}.
/// The client only ever consumes these states.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompetitionStatus {
    Draft,
    Started,
    Finished,
    Failed,
}

/// One row of a reward schedule table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionPrize {
    pub rank: u32,
    pub points: u64,
}

/// One user's performance across the four categories of a single blitz.
/// Ranks are 1-based, smaller is better; rewards are Folly Points.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionEntry {
    pub id: String,
    pub grind_rank: u32,
    pub grind_score: u64,
    pub grind_reward: u64,
    pub point_rank: u32,
    pub point_score: u64,
    pub point_reward: u64,
    pub speed_rank: u32,
    pub speed_score: f64,
    pub speed_reward: u64,
    pub accuracy_rank: u32,
    pub accuracy_score: f64,
    pub accuracy_reward: u64,
    pub user: CompUser,
}

impl CompetitionEntry {
    /// Folly Points this entry earned across all four categories.
    pub fn total_reward(&self) -> u64 {
        self.grind_reward + self.point_reward + self.speed_reward + self.accuracy_reward
    }
}

/// The four independently ranked and rewarded metrics within a blitz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardCategory {
    Grind,
    Point,
    Speed,
    Accuracy,
}

impl RewardCategory {
    pub const ALL: [RewardCategory; 4] = [
        RewardCategory::Grind,
        RewardCategory::Point,
        RewardCategory::Speed,
        RewardCategory::Accuracy,
    ];

    /// Section heading used on the blitz results view.
    pub fn title(&self) -> &'static str {
        match self {
            RewardCategory::Grind => "Most Races",
            RewardCategory::Point => "Most Points",
            RewardCategory::Speed => "Top Speed",
            RewardCategory::Accuracy => "Most Accurate",
        }
    }

    /// Column heading for the category's score.
    pub fn score_heading(&self) -> &'static str {
        match self {
            RewardCategory::Grind => "Races",
            RewardCategory::Point => "Points",
            RewardCategory::Speed => "Speed",
            RewardCategory::Accuracy => "Accuracy",
        }
    }

    pub fn rank(&self, entry: &CompetitionEntry) -> u32 {
        match self {
            RewardCategory::Grind => entry.grind_rank,
            RewardCategory::Point => entry.point_rank,
            RewardCategory::Speed => entry.speed_rank,
            RewardCategory::Accuracy => entry.accuracy_rank,
        }
    }

    pub fn reward(&self, entry: &CompetitionEntry) -> u64 {
        match self {
            RewardCategory::Grind => entry.grind_reward,
            RewardCategory::Point => entry.point_reward,
            RewardCategory::Speed => entry.speed_reward,
            RewardCategory::Accuracy => entry.accuracy_reward,
        }
    }

    /// Score formatted with the category's unit.
    pub fn score_text(&self, entry: &CompetitionEntry) -> String {
        match self {
            RewardCategory::Grind => format!("{}", entry.grind_score),
            RewardCategory::Point => format!("{}", entry.point_score),
            RewardCategory::Speed => format!("{:.2} WPM", entry.speed_score),
            RewardCategory::Accuracy => format!("{:.2}%", entry.accuracy_score),
        }
    }
}

/// One blitz competition as returned by the `competitions` query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    pub id: String,
    pub status: CompetitionStatus,
    pub multiplier: u32,
    pub start_at: DateTime<Utc>,
    pub finish_at: DateTime<Utc>,
    #[serde(default)]
    pub leaderboard: Vec<CompetitionEntry>,
    #[serde(default)]
    pub grind_rewards: Vec<CompetitionPrize>,
    #[serde(default)]
    pub point_rewards: Vec<CompetitionPrize>,
    #[serde(default)]
    pub speed_rewards: Vec<CompetitionPrize>,
    #[serde(default)]
    pub accuracy_rewards: Vec<CompetitionPrize>,
}

impl Competition {
    /// Multiplier is one of {1, 2, 4, 8}; anything above 1 is a boosted
    /// blitz and prize tables display points multiplied by it.
    pub fn is_boosted(&self) -> bool {
        self.multiplier > 1
    }

    pub fn has_results(&self) -> bool {
        self.status == CompetitionStatus::Finished && !self.leaderboard.is_empty()
    }

    /// A blitz appears in the results picker when it has any entries or
    /// failed outright (the failure banner is itself a result).
    pub fn is_listed(&self) -> bool {
        !self.leaderboard.is_empty() || self.status == CompetitionStatus::Failed
    }
}
