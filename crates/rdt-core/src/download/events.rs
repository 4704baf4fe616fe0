//! Downloader events - what the job manager observes.

use serde::{Deserialize, Serialize};

use super::types::{DownloadOutcome, DownloadProgress, JobHandle};

/// Events raised by a downloader.
///
/// Serialized as a tagged union:
///
/// ```text
/// { "type": "progress", "handle": "...", "bytesDone": 1, "bytesTotal": 2, "speed": 3 }
/// { "type": "complete", "handle": "...", "ok": false, "error": "..." }
/// ```
///
/// For a single downloader, `Complete` is emitted at most once and nothing
/// is emitted after it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DownloaderEvent {
    /// Periodic progress while the job is active, waiting or paused.
    Progress {
        /// Job the progress belongs to.
        handle: JobHandle,
        /// Transfer counters.
        #[serde(flatten)]
        progress: DownloadProgress,
    },

    /// The job reached a terminal state.
    Complete {
        /// Job that finished.
        handle: JobHandle,
        /// Success or failure detail.
        #[serde(flatten)]
        outcome: DownloadOutcome,
    },
}

impl DownloaderEvent {
    pub const fn progress(handle: JobHandle, progress: DownloadProgress) -> Self {
        Self::Progress { handle, progress }
    }

    pub const fn complete(handle: JobHandle, outcome: DownloadOutcome) -> Self {
        Self::Complete { handle, outcome }
    }

    /// Handle of the job this event refers to.
    #[must_use]
    pub const fn handle(&self) -> &JobHandle {
        match self {
            Self::Progress { handle, .. } | Self::Complete { handle, .. } => handle,
        }
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }

    /// Outcome for `Complete` events.
    #[must_use]
    pub const fn outcome(&self) -> Option<&DownloadOutcome> {
        match self {
            Self::Complete { outcome, .. } => Some(outcome),
            Self::Progress { .. } => None,
        }
    }
}
