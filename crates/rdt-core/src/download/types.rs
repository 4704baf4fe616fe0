//! Value types shared by every download backend.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::DownloaderError;

/// Identifier assigned by the daemon when a job is accepted (an aria2 GID).
///
/// A handle that survived a client restart is only a hint: backends verify it
/// against the daemon before trusting it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobHandle(String);

impl JobHandle {
    /// Wrap a daemon-issued identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse an optional, possibly blank identifier coming from storage.
    ///
    /// Blank strings are treated as "no handle".
    #[must_use]
    pub fn from_optional(id: Option<&str>) -> Option<Self> {
        id.map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Self(s.to_string()))
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobHandle {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Connection settings for the download daemon.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DaemonSettings {
    /// JSON-RPC endpoint (e.g. `http://127.0.0.1:6800/jsonrpc`).
    pub endpoint: String,
    /// RPC secret token, if the daemon was started with `--rpc-secret`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl DaemonSettings {
    /// Create settings for an endpoint without a secret.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            secret: None,
        }
    }

    /// Set the RPC secret. Blank secrets are ignored.
    #[must_use]
    pub fn with_secret(mut self, secret: Option<String>) -> Self {
        self.secret = secret.filter(|s| !s.trim().is_empty());
        self
    }
}

// Keep the secret out of logs.
impl fmt::Debug for DaemonSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DaemonSettings")
            .field("endpoint", &self.endpoint)
            .field("secret", &self.secret.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Immutable description of one download job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    source_uri: String,
    destination: PathBuf,
    daemon: DaemonSettings,
}

impl JobSpec {
    /// Build a job spec.
    ///
    /// `destination` is the full path of the file to produce; it must end in
    /// a file name.
    pub fn new(
        source_uri: impl Into<String>,
        destination: impl Into<PathBuf>,
        daemon: DaemonSettings,
    ) -> Result<Self, DownloaderError> {
        let source_uri = source_uri.into();
        let destination = destination.into();

        if source_uri.trim().is_empty() {
            return Err(DownloaderError::invalid_spec("source URI is empty"));
        }
        if destination.file_name().is_none() {
            return Err(DownloaderError::invalid_spec(format!(
                "destination '{}' has no file name",
                destination.display()
            )));
        }

        Ok(Self {
            source_uri,
            destination,
            daemon,
        })
    }

    /// URI the daemon should fetch.
    #[must_use]
    pub fn source_uri(&self) -> &str {
        &self.source_uri
    }

    /// Full destination path.
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Directory part of the destination (empty when the path is relative and bare).
    #[must_use]
    pub fn directory(&self) -> String {
        self.destination
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// File name part of the destination.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Daemon connection settings.
    #[must_use]
    pub const fn daemon(&self) -> &DaemonSettings {
        &self.daemon
    }
}

/// Snapshot of transfer progress reported on a poll tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadProgress {
    /// Bytes written so far.
    pub bytes_done: u64,
    /// Total bytes, or 0 while the daemon does not know yet.
    pub bytes_total: u64,
    /// Current speed in bytes per second.
    pub speed: u64,
}

impl DownloadProgress {
    pub const fn new(bytes_done: u64, bytes_total: u64, speed: u64) -> Self {
        Self {
            bytes_done,
            bytes_total,
            speed,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn percent_complete(&self) -> f64 {
        if self.bytes_total == 0 {
            0.0
        } else {
            (self.bytes_done as f64 / self.bytes_total as f64) * 100.0
        }
    }
}

/// Terminal result of a job.
///
/// On the wire this is `{"ok": true}` or `{"ok": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "OutcomeWire", from = "OutcomeWire")]
pub enum DownloadOutcome {
    /// The daemon reported the job complete (or removed).
    Success,
    /// The job failed; `error` is forwarded to the job manager as-is.
    Failure {
        /// Diagnostic detail.
        error: String,
    },
}

impl DownloadOutcome {
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Error detail for failures, `None` on success.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Failure { error } => Some(error),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct OutcomeWire {
    ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<DownloadOutcome> for OutcomeWire {
    fn from(outcome: DownloadOutcome) -> Self {
        match outcome {
            DownloadOutcome::Success => Self {
                ok: true,
                error: None,
            },
            DownloadOutcome::Failure { error } => Self {
                ok: false,
                error: Some(error),
            },
        }
    }
}

impl From<OutcomeWire> for DownloadOutcome {
    fn from(wire: OutcomeWire) -> Self {
        if wire.ok {
            Self::Success
        } else {
            Self::failure(wire.error.unwrap_or_default())
        }
    }
}

/// Lifecycle state of a downloader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollState {
    /// Constructed, not started.
    Idle,
    /// `start` is verifying or submitting the job.
    Submitting,
    /// The poll timer is running.
    Polling,
    /// Finished or cancelled. Terminal.
    Completed,
}

impl PollState {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Polling => "polling",
            Self::Completed => "completed",
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for PollState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
