use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Backend error: {message}")]
    Backend { message: String },

    #[error(
        "An error occurred when collecting stats. The \"would be\" results have been added onto the next blitz time."
    )]
    StatsCollectionFailed,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, CompError>;
