//! Error types for Mtrack core operations.
//!
//! The aggregation engine never fails; these errors come from talking to the
//! remote API and from reading or writing the local session. The CLI layer
//! maps them to user-friendly messages and exit codes.

use thiserror::Error;

/// Result type alias for Mtrack operations.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Core error type for Mtrack operations.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Transport failure (DNS, connect, timeout, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// The API rejected the credentials (401/403)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success response
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Local session file could not be read or written
    #[error("Session error: {0}")]
    Session(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(String),
}

impl TrackerError {
    /// Whether this error means the stored session is no longer usable.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, TrackerError::Unauthorized(_))
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        TrackerError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for TrackerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TrackerError::Decode(err.to_string())
        } else {
            TrackerError::Network(err.to_string())
        }
    }
}
