//! Internal error types for aria2 RPC calls.
//!
//! These errors are internal to `rdt-aria2` and are mapped to
//! `DaemonError` at the port boundary.

use thiserror::Error;

/// Result type alias for aria2 operations.
pub type Aria2Result<T> = Result<T, Aria2Error>;

/// Errors related to aria2 JSON-RPC calls.
#[derive(Debug, Error)]
pub enum Aria2Error {
    /// The endpoint answered with a non-success HTTP status and no JSON-RPC body.
    #[error("aria2 endpoint returned HTTP {status}: {url}")]
    Http {
        /// HTTP status code
        status: u16,
        /// The endpoint that was called
        url: String,
    },

    /// aria2 returned a JSON-RPC error object.
    #[error("aria2 error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code
        code: i64,
        /// Error message from aria2
        message: String,
    },

    /// The response was well-formed JSON but not what the call expects.
    #[error("Invalid response from aria2: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// The call exceeded the configured timeout.
    #[error("aria2 call timed out")]
    Timeout,

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Endpoint URL parsing error.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl Aria2Error {
    /// Classify a reqwest error, separating timeouts from other failures.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err)
        }
    }
}
