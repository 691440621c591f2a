use crate::models::{Competition, CompetitionEntry, MembershipType, RewardCategory};

/// One row of a per-blitz category table.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStanding {
    pub username: String,
    pub label: String,
    pub membership_type: MembershipType,
    pub rank: u32,
    pub score: String,
    pub reward: u64,
}

impl CategoryStanding {
    fn from_entry(entry: &CompetitionEntry, category: RewardCategory) -> Self {
        Self {
            username: entry.user.username.clone(),
            label: entry.user.label().to_string(),
            membership_type: entry.user.membership_type,
            rank: category.rank(entry),
            score: category.score_text(entry),
            reward: category.reward(entry),
        }
    }
}

/// Table for one category of a blitz: entries rewarded in that
/// category, best rank first.
pub fn category_standings(competition: &Competition, category: RewardCategory) -> Vec<CategoryStanding> {
    let mut rows: Vec<CategoryStanding> = competition
        .leaderboard
        .iter()
        .filter(|entry| category.reward(entry) > 0)
        .map(|entry| CategoryStanding::from_entry(entry, category))
        .collect();
    rows.sort_by_key(|r| r.rank);
    rows
}
