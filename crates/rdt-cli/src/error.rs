//! CLI-specific error types and mappings.
//!
//! Maps core errors to exit codes and user-facing messages.

use rdt_core::{DaemonError, DownloaderError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The daemon could not be reached or rejected a call.
    #[error("{0}")]
    Daemon(String),

    /// The download reached a terminal failure.
    #[error("Download failed: {0}")]
    DownloadFailed(String),

    /// Interrupted by the user.
    #[error("Download cancelled")]
    Cancelled,

    /// Argument validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to an exit code.
    ///
    /// - 1: General error
    /// - 2: Invalid arguments
    /// - 69: Daemon unavailable (`EX_UNAVAILABLE`)
    /// - 78: Configuration (`EX_CONFIG`)
    /// - 130: Interrupted
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::DownloadFailed(_) => 1,
            Self::Arguments(_) => 2,
            Self::Daemon(_) => 69,
            Self::Config(_) => 78,
            Self::Cancelled => 130,
        }
    }
}

impl From<DaemonError> for CliError {
    fn from(err: DaemonError) -> Self {
        match err {
            DaemonError::Configuration { message } => Self::Config(message),
            other => Self::Daemon(other.to_string()),
        }
    }
}

impl From<DownloaderError> for CliError {
    fn from(err: DownloaderError) -> Self {
        match err {
            DownloaderError::InvalidSpec { message } => Self::Arguments(message),
            DownloaderError::Configuration { message } => Self::Config(message),
            DownloaderError::Cancelled => Self::Cancelled,
            other @ DownloaderError::SubmissionFailed { .. } => Self::Daemon(other.to_string()),
            other => Self::DownloadFailed(other.to_string()),
        }
    }
}
