use serde::{Deserialize, Serialize};

use super::MembershipType;

/// One row of the aggregated daily leaderboard. Derived on every
/// aggregation pass, never persisted; the only mutation is adding
/// reward for a repeated username within the same pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub username: String,
    pub display_name: Option<String>,
    pub membership_type: MembershipType,
    pub total_points: u64,
}

impl LeaderboardEntry {
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}
