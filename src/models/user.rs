use serde::{Deserialize, Serialize};

/// Membership tier of a competitor on the site.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipType {
    Basic,
    Gold,
}

impl MembershipType {
    pub fn is_gold(&self) -> bool {
        matches!(self, MembershipType::Gold)
    }
}

/// Lifecycle status of a competitor. Disqualified users never score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    New,
    Active,
    Disqualified,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::New => "new",
            UserStatus::Active => "active",
            UserStatus::Disqualified => "disqualified",
        }
    }
}

/// User identity attached to a blitz leaderboard entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompUser {
    pub username: String,
    pub display_name: Option<String>,
    pub status: UserStatus,
    pub membership_type: MembershipType,
}

impl CompUser {
    /// Name shown in tables. Falls back to the username when no display
    /// name is set.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

/// Row from the global `users` query, carrying the backend-accumulated
/// point total for the whole event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub display_name: Option<String>,
    pub status: UserStatus,
    pub membership_type: MembershipType,
    pub total_points: u64,
}

impl User {
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}
