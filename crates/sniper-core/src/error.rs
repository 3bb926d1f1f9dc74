use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by VT Sniper.
#[derive(Error, Debug)]
pub enum SniperError {
    /// The timetable request could not be completed, or came back with a
    /// non-success status.
    #[error("Request failed: {detail}")]
    RequestFailed {
        /// HTTP status code, when the server answered at all.
        status: Option<u16>,
        detail: String,
    },

    /// The timetable response body could not be interpreted.
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),

    /// The CRN does not appear in the timetable results.
    #[error("Course not found for CRN: {0}")]
    NotFound(String),

    /// The notification provider has no credential to work with.
    #[error("Notifier unconfigured: {0}")]
    Unconfigured(String),

    /// The notification provider rejected or failed to deliver a message.
    #[error("Notification delivery failed: {0}")]
    DeliveryFailed(String),

    /// Every configured CRN failed to resolve.
    #[error("No valid CRNs to monitor")]
    NoValidTargets,

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SniperError {
    /// Build a [`SniperError::RequestFailed`] for a non-success HTTP status.
    pub fn unexpected_status(status: u16, reason: &str) -> Self {
        Self::RequestFailed {
            status: Some(status),
            detail: format!("unexpected status: {} {}", status, reason),
        }
    }
}

impl From<reqwest::Error> for SniperError {
    fn from(err: reqwest::Error) -> Self {
        SniperError::RequestFailed {
            status: err.status().map(|s| s.as_u16()),
            detail: err.to_string(),
        }
    }
}

/// Convenience alias used throughout the sniper crates.
pub type Result<T> = std::result::Result<T, SniperError>;
