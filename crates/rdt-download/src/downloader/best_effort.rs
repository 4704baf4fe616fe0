//! Best-effort daemon calls.
//!
//! Cleanup and control calls must never fail the caller. Their result is kept
//! in a [`BestEffort`] value that has to be explicitly discarded, which logs
//! the failure instead of dropping it silently.

use std::future::Future;

use rdt_core::{DaemonResult, JobHandle};
use tracing::{debug, warn};

/// Result of a daemon call whose failure is tolerated.
#[must_use = "call `discard` so failures get logged"]
#[derive(Debug)]
pub(crate) struct BestEffort {
    operation: &'static str,
    handle: JobHandle,
    result: DaemonResult<()>,
}

impl BestEffort {
    /// Await `call` and capture its result.
    pub(crate) async fn run<F>(operation: &'static str, handle: &JobHandle, call: F) -> Self
    where
        F: Future<Output = DaemonResult<()>>,
    {
        Self {
            operation,
            handle: handle.clone(),
            result: call.await,
        }
    }

    #[cfg(test)]
    pub(crate) const fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    /// Log the outcome and drop it.
    pub(crate) fn discard(self) {
        match self.result {
            Ok(()) => debug!(gid = %self.handle, operation = self.operation, "daemon call ok"),
            Err(err) => warn!(
                gid = %self.handle,
                operation = self.operation,
                error = %err,
                "best-effort daemon call failed; ignoring"
            ),
        }
    }
}
