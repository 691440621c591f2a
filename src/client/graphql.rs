use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::info;

use crate::client::{BackendConfig, CompetitionApi};
use crate::models::{CompError, Competition, Result, User};

/// Query for competition results and reward tables between two dates.
pub const COMPETITIONS_QUERY: &str = r#"
query competitions($timeFrom: Time!, $timeTo: Time!) {
    competitions(timeRange: { timeFrom: $timeFrom, timeTo: $timeTo }) {
        id
        status
        multiplier
        startAt
        finishAt
        leaderboard {
            id
            speedRank
            speedScore
            speedReward
            accuracyRank
            accuracyScore
            accuracyReward
            grindRank
            grindScore
            grindReward
            pointRank
            pointScore
            pointReward
            user {
                username
                displayName
                status
                membershipType
            }
        }
        grindRewards {
            rank
            points
        }
        pointRewards {
            rank
            points
        }
        speedRewards {
            rank
            points
        }
        accuracyRewards {
            rank
            points
        }
    }
}
"#;

/// Query for every comp user and their event-wide point total.
pub const USERS_QUERY: &str = r#"
query users {
    users {
        id
        username
        displayName
        status
        membershipType
        totalPoints
    }
}
"#;

#[derive(Deserialize)]
struct GqlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GqlError>>,
}

#[derive(Deserialize)]
struct GqlError {
    message: String,
}

#[derive(Deserialize)]
struct CompetitionsData {
    competitions: Vec<Competition>,
}

#[derive(Deserialize)]
struct UsersData {
    users: Vec<User>,
}

/// GraphQL client for the comp backend. No retries of its own; the
/// poll cadence is the retry policy.
pub struct GqlBackend {
    http: reqwest::Client,
    endpoint: String,
}

impl GqlBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    async fn query<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?
            .error_for_status()?;

        let envelope: GqlResponse<T> = response.json().await?;
        if let Some(errors) = envelope.errors {
            let message = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            if !message.is_empty() {
                return Err(CompError::Backend { message });
            }
        }
        envelope.data.ok_or_else(|| CompError::Backend {
            message: "response missing data".to_string(),
        })
    }
}

#[async_trait]
impl CompetitionApi for GqlBackend {
    async fn competitions(
        &self,
        time_from: DateTime<Utc>,
        time_to: DateTime<Utc>,
    ) -> Result<Vec<Competition>> {
        let variables = json!({
            "timeFrom": time_from.to_rfc3339(),
            "timeTo": time_to.to_rfc3339(),
        });
        let data: CompetitionsData = self.query(COMPETITIONS_QUERY, variables).await?;
        info!(
            "Fetched {} competitions for {} to {}",
            data.competitions.len(),
            time_from,
            time_to
        );
        Ok(data.competitions)
    }

    async fn users(&self) -> Result<Vec<User>> {
        let data: UsersData = self.query(USERS_QUERY, Value::Null).await?;
        info!("Fetched {} comp users", data.users.len());
        Ok(data.users)
    }
}
