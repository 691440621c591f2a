pub mod client;
pub mod config;
pub mod models;
pub mod schedule;
pub mod scoring;
pub mod service;
pub mod tui;
pub mod utils;

pub use config::Settings;
pub use models::{CompError, Result};
pub use schedule::CompetitionCalendar;
