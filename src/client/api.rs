use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;

use crate::models::{Competition, Result, User};

/// The two queries the comp backend exposes.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CompetitionApi: Send + Sync {
    /// Competitions whose window falls inside `[time_from, time_to]`.
    async fn competitions(
        &self,
        time_from: DateTime<Utc>,
        time_to: DateTime<Utc>,
    ) -> Result<Vec<Competition>>;

    /// All comp users with their event-wide point totals.
    async fn users(&self) -> Result<Vec<User>>;
}

/// Configuration for the GraphQL backend client.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
}
