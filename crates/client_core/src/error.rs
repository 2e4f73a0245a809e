use thiserror::Error;

pub use shared::error::{SubmissionError, ValidationError};

/// Beacon failure. Recorded in `TrackingState`, never shown to the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackingError {
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("tracking request failed: {0}")]
    Transport(String),
    #[error("malformed tracking response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for TrackingError {
    fn from(value: reqwest::Error) -> Self {
        match value.status() {
            Some(status) => Self::Status(status.as_u16()),
            None => Self::Transport(value.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
