//! Per-tick decision logic and the tick-in-progress guard.

use std::sync::atomic::{AtomicBool, Ordering};

use rdt_core::{DaemonJobState, DaemonJobStatus, DownloadOutcome, DownloadProgress};

/// Failure text reported when the daemon cannot be queried during polling.
pub(crate) const POLL_FAILURE_MESSAGE: &str = "Lost contact with the download daemon";

/// What a single status snapshot means for the job.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PollDecision {
    /// Still running; report progress and keep polling.
    Progress(DownloadProgress),
    /// Terminal; stop polling, clean up, emit `Complete`.
    Finished(DownloadOutcome),
}

/// Classify a status snapshot.
///
/// An error message wins over whatever state the daemon reports. `removed`
/// counts as success.
pub(crate) fn classify(status: &DaemonJobStatus) -> PollDecision {
    if status.has_error_message() || status.state == DaemonJobState::Error {
        return PollDecision::Finished(DownloadOutcome::failure(status.error_detail()));
    }

    match status.state {
        DaemonJobState::Complete | DaemonJobState::Removed => {
            PollDecision::Finished(DownloadOutcome::Success)
        }
        _ => PollDecision::Progress(status.progress()),
    }
}

/// RAII claim on the "tick in progress" flag.
///
/// Only one tick can hold the guard at a time; the flag is released on drop.
#[derive(Debug)]
pub(crate) struct TickGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> TickGuard<'a> {
    /// Claim the flag, or `None` if another tick holds it.
    pub(crate) fn try_claim(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for TickGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
