use chrono::{DateTime, Utc};
use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{CompError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub backend: BackendSettings,
    pub schedule: ScheduleSettings,
    pub polling: PollingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    pub endpoint: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSettings {
    /// Event epoch as an RFC 3339 timestamp; every day and blitz
    /// boundary is derived from it.
    pub event_start: String,
    pub days: u32,
    pub window_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingSettings {
    /// Seconds past each window boundary before re-polling, tolerating
    /// backend refresh latency.
    pub reload_skew_seconds: u64,
    /// UI countdown refresh cadence in milliseconds.
    pub tick_millis: u64,
}

impl ScheduleSettings {
    pub fn event_start_utc(&self) -> Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.event_start)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| CompError::ConfigError(format!("invalid event_start: {}", e)))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Folly Comp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                log_level: "info".to_string(),
            },
            backend: BackendSettings {
                endpoint: "https://xmaxx-api.follytimes.com/graphql".to_string(),
                timeout_seconds: 15,
            },
            schedule: ScheduleSettings {
                event_start: "2021-12-18T22:30:00+08:00".to_string(),
                days: 7,
                window_minutes: 10,
            },
            polling: PollingSettings {
                reload_skew_seconds: 60,
                tick_millis: 6000,
            },
        }
    }
}

impl Settings {
    pub fn new() -> std::result::Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("FOLLY_COMP").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.backend.endpoint.is_empty() {
            return Err("Backend endpoint must not be empty".to_string());
        }
        if self.schedule.days == 0 {
            return Err("Schedule must cover at least one day".to_string());
        }
        if self.schedule.window_minutes == 0 {
            return Err("Blitz window length must be positive".to_string());
        }
        if 24 * 60 % self.schedule.window_minutes != 0 {
            return Err(format!(
                "Blitz windows must divide the day evenly, got {} minutes",
                self.schedule.window_minutes
            ));
        }
        if self.polling.reload_skew_seconds >= u64::from(self.schedule.window_minutes) * 60 {
            return Err("Reload skew must be shorter than the blitz window".to_string());
        }
        if let Err(e) = self.schedule.event_start_utc() {
            return Err(e.to_string());
        }
        Ok(())
    }
}
