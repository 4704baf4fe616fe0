//! Downloader error types.
//!
//! Only `start` returns these; every failure after the poll timer is running
//! is reported through a `Complete` event instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ports::DaemonError;

/// Error type for downloader operations.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum DownloaderError {
    /// The job spec could not be used.
    #[error("Invalid job spec: {message}")]
    InvalidSpec {
        /// What was wrong with the spec.
        message: String,
    },

    /// The backend could not be constructed from the daemon settings.
    #[error("Backend configuration error: {message}")]
    Configuration {
        /// Detailed error message.
        message: String,
    },

    /// Every submission attempt failed; carries the last daemon error.
    #[error("Job submission failed after {attempts} attempts: {source}")]
    SubmissionFailed {
        /// Number of attempts made.
        attempts: u32,
        /// Error returned by the final attempt.
        source: DaemonError,
    },

    /// Another `start` call is still submitting this job.
    #[error("Download is already starting")]
    AlreadyStarting,

    /// The downloader already finished or was cancelled.
    #[error("Download has already completed")]
    AlreadyCompleted,

    /// `cancel` was called while the job was being submitted.
    #[error("Download cancelled")]
    Cancelled,
}

impl DownloaderError {
    pub fn invalid_spec(message: impl Into<String>) -> Self {
        Self::InvalidSpec {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the job manager may reasonably try again with a new instance.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::SubmissionFailed { .. })
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Convenience result type for downloader operations.
pub type DownloaderResult<T> = Result<T, DownloaderError>;
