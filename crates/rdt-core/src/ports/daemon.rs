//! Download daemon port.
//!
//! This port abstracts the remote daemon that performs the transfers. Adapters
//! (e.g. `rdt-aria2`) own the wire protocol; the downloader only sees these
//! types.
//!
//! # Design
//!
//! - One method per daemon operation, keyed by `JobHandle`
//! - Adapters never retry; retry policy belongs to the downloader
//! - Errors are flattened into `DaemonError` so they can be serialized

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::download::{DownloadProgress, JobHandle, JobSpec};

/// Request to submit a new job to the daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddJobRequest {
    /// Mirrors of the same resource; the downloader sends exactly one.
    pub uris: Vec<String>,
    /// Target directory.
    pub dir: String,
    /// Target file name inside `dir`.
    pub out: String,
}

impl AddJobRequest {
    /// Build the submission payload for a job spec.
    #[must_use]
    pub fn from_spec(spec: &JobSpec) -> Self {
        Self {
            uris: vec![spec.source_uri().to_string()],
            dir: spec.directory(),
            out: spec.file_name(),
        }
    }
}

/// State string reported by the daemon for a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DaemonJobState {
    Active,
    Waiting,
    Paused,
    Error,
    Complete,
    Removed,
    /// Anything this crate does not know about.
    Other(String),
}

impl DaemonJobState {
    /// Parse the daemon's status string. Unknown values are preserved.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "active" => Self::Active,
            "waiting" => Self::Waiting,
            "paused" => Self::Paused,
            "error" => Self::Error,
            "complete" => Self::Complete,
            "removed" => Self::Removed,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Waiting => "waiting",
            Self::Paused => "paused",
            Self::Error => "error",
            Self::Complete => "complete",
            Self::Removed => "removed",
            Self::Other(s) => s,
        }
    }
}

/// Status snapshot returned by a status query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaemonJobStatus {
    pub state: DaemonJobState,
    pub completed_length: u64,
    pub total_length: u64,
    pub download_speed: u64,
    /// Daemon error code, present once the job failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Daemon error text, present once the job failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl DaemonJobStatus {
    /// A status with zeroed counters and no error.
    #[must_use]
    pub const fn new(state: DaemonJobState) -> Self {
        Self {
            state,
            completed_length: 0,
            total_length: 0,
            download_speed: 0,
            error_code: None,
            error_message: None,
        }
    }

    #[must_use]
    pub const fn with_progress(mut self, completed: u64, total: u64, speed: u64) -> Self {
        self.completed_length = completed;
        self.total_length = total;
        self.download_speed = speed;
        self
    }

    #[must_use]
    pub fn with_error(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self.error_message = Some(message.into());
        self
    }

    /// True when the daemon attached a non-blank error message.
    #[must_use]
    pub fn has_error_message(&self) -> bool {
        self.error_message
            .as_deref()
            .is_some_and(|m| !m.trim().is_empty())
    }

    /// `"<code>: <message>"`, with missing parts left empty.
    #[must_use]
    pub fn error_detail(&self) -> String {
        format!(
            "{}: {}",
            self.error_code.as_deref().unwrap_or_default(),
            self.error_message.as_deref().unwrap_or_default()
        )
    }

    #[must_use]
    pub const fn progress(&self) -> DownloadProgress {
        DownloadProgress::new(
            self.completed_length,
            self.total_length,
            self.download_speed,
        )
    }
}

/// Daemon build information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaemonVersion {
    pub version: String,
    #[serde(default)]
    pub enabled_features: Vec<String>,
}

/// Errors surfaced by daemon adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum DaemonError {
    /// The request never got a response (connection refused, reset, DNS).
    #[error("Daemon unreachable: {message}")]
    Transport { message: String },

    /// The call exceeded the client timeout.
    #[error("Daemon call timed out")]
    Timeout,

    /// The daemon answered with a JSON-RPC error object.
    #[error("Daemon error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The daemon answered with something that is not a valid response.
    #[error("Invalid daemon response: {message}")]
    InvalidResponse { message: String },

    /// Client settings are unusable (bad endpoint URL, TLS setup).
    #[error("Daemon client configuration error: {message}")]
    Configuration { message: String },
}

impl DaemonError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        Self::Rpc {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for DaemonError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_response(err.to_string())
    }
}

/// Result type for daemon port operations.
pub type DaemonResult<T> = Result<T, DaemonError>;

/// Port for the remote download daemon.
///
/// Every method is a single remote call with the adapter's timeout applied.
#[async_trait]
pub trait DaemonClientPort: Send + Sync {
    /// Submit a job; returns the daemon-assigned handle.
    async fn add_job(&self, request: &AddJobRequest) -> DaemonResult<JobHandle>;

    /// Query the current status of a job.
    async fn status(&self, handle: &JobHandle) -> DaemonResult<DaemonJobStatus>;

    /// Pause an active or waiting job.
    async fn pause(&self, handle: &JobHandle) -> DaemonResult<()>;

    /// Resume a paused job.
    async fn resume(&self, handle: &JobHandle) -> DaemonResult<()>;

    /// Remove a job without waiting for the daemon to finish in-flight work.
    async fn force_remove(&self, handle: &JobHandle) -> DaemonResult<()>;

    /// Drop a finished/removed job from the daemon's result list.
    async fn remove_result(&self, handle: &JobHandle) -> DaemonResult<()>;

    /// Report the daemon version (connection check).
    async fn version(&self) -> DaemonResult<DaemonVersion>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::DaemonSettings;

    #[test]
    fn add_job_request_from_spec() {
        let spec = JobSpec::new(
            "https://example.com/file.iso",
            "/srv/dl/file.iso",
            DaemonSettings::new("http://localhost:6800/jsonrpc"),
        )
        .unwrap();

        let request = AddJobRequest::from_spec(&spec);
        assert_eq!(request.uris, vec!["https://example.com/file.iso".to_string()]);
        assert_eq!(request.dir, "/srv/dl");
        assert_eq!(request.out, "file.iso");
    }

    #[test]
    fn state_parse_round_trip() {
        for s in ["active", "waiting", "paused", "error", "complete", "removed"] {
            assert_eq!(DaemonJobState::parse(s).as_str(), s);
        }
        assert_eq!(
            DaemonJobState::parse("seeding"),
            DaemonJobState::Other("seeding".to_string())
        );
    }

    #[test]
    fn error_detail_formats_code_and_message() {
        let status = DaemonJobStatus::new(DaemonJobState::Error).with_error("9", "disk full");
        assert!(status.has_error_message());
        assert_eq!(status.error_detail(), "9: disk full");

        let bare = DaemonJobStatus::new(DaemonJobState::Error);
        assert!(!bare.has_error_message());
        assert_eq!(bare.error_detail(), ": ");
    }

    #[test]
    fn blank_error_message_is_not_an_error() {
        let status = DaemonJobStatus::new(DaemonJobState::Active).with_error("0", "  ");
        assert!(!status.has_error_message());
    }

    #[test]
    fn json_errors_become_invalid_response() {
        let err = serde_json::from_str::<DaemonVersion>("nope").unwrap_err();
        assert!(matches!(
            DaemonError::from(err),
            DaemonError::InvalidResponse { .. }
        ));
    }
}
