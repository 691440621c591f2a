pub mod settings;

pub use settings::{AppSettings, BackendSettings, PollingSettings, ScheduleSettings, Settings};
