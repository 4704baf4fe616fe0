//! Scripted daemon for downloader integration tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use rdt_core::{
    AddJobRequest, DaemonClientPort, DaemonError, DaemonJobState, DaemonJobStatus, DaemonResult,
    DaemonSettings, DaemonVersion, JobHandle, JobSpec,
};

/// Daemon fake that answers from per-method scripts and records every call.
///
/// Scripted answers are consumed in order; the last one repeats. Status
/// queries for handles marked unknown always fail like aria2 does for a GID
/// it has forgotten. Status calls can be slowed down, and the highest number
/// of status calls in flight at once is tracked.
#[derive(Default)]
pub struct ScriptedDaemon {
    submissions: Mutex<VecDeque<DaemonResult<JobHandle>>>,
    statuses: Mutex<VecDeque<DaemonResult<DaemonJobStatus>>>,
    unknown: Mutex<Vec<JobHandle>>,
    cleanup_error: Mutex<Option<DaemonError>>,
    status_delay: Option<Duration>,
    inflight: AtomicUsize,
    max_inflight: AtomicUsize,
    calls: Mutex<Vec<String>>,
}

impl ScriptedDaemon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_submissions(self, script: Vec<DaemonResult<JobHandle>>) -> Self {
        self.submissions.lock().unwrap().extend(script);
        self
    }

    pub fn with_statuses(self, script: Vec<DaemonResult<DaemonJobStatus>>) -> Self {
        self.statuses.lock().unwrap().extend(script);
        self
    }

    pub fn with_unknown_handle(self, handle: &str) -> Self {
        self.unknown.lock().unwrap().push(JobHandle::new(handle));
        self
    }

    /// Make `force_remove` and `remove_result` fail.
    pub fn with_failing_cleanup(self) -> Self {
        *self.cleanup_error.lock().unwrap() = Some(DaemonError::transport("connection refused"));
        self
    }

    /// Make every `status` call take `delay` before answering.
    pub fn with_status_delay(mut self, delay: Duration) -> Self {
        self.status_delay = Some(delay);
        self
    }

    /// Highest number of `status` calls that were running at the same time.
    pub fn max_inflight_status(&self) -> usize {
        self.max_inflight.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls whose name starts with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn next<T: Clone>(queue: &Mutex<VecDeque<T>>) -> Option<T> {
        let mut queue = queue.lock().unwrap();
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }

    fn cleanup_result(&self) -> DaemonResult<()> {
        self.cleanup_error.lock().unwrap().clone().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl DaemonClientPort for ScriptedDaemon {
    async fn add_job(&self, request: &AddJobRequest) -> DaemonResult<JobHandle> {
        self.record(format!("add_job:{}", request.out));
        Self::next(&self.submissions).unwrap_or_else(|| Ok(JobHandle::new("gid-1")))
    }

    async fn status(&self, handle: &JobHandle) -> DaemonResult<DaemonJobStatus> {
        self.record(format!("status:{handle}"));
        let running = self.inflight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_inflight.fetch_max(running, Ordering::SeqCst);
        if let Some(delay) = self.status_delay {
            tokio::time::sleep(delay).await;
        }
        self.inflight.fetch_sub(1, Ordering::SeqCst);

        if self.unknown.lock().unwrap().contains(handle) {
            return Err(DaemonError::rpc(1, format!("GID {handle} is not found")));
        }
        Self::next(&self.statuses).unwrap_or_else(|| Ok(active(0, 0)))
    }

    async fn pause(&self, handle: &JobHandle) -> DaemonResult<()> {
        self.record(format!("pause:{handle}"));
        Ok(())
    }

    async fn resume(&self, handle: &JobHandle) -> DaemonResult<()> {
        self.record(format!("resume:{handle}"));
        Ok(())
    }

    async fn force_remove(&self, handle: &JobHandle) -> DaemonResult<()> {
        self.record(format!("force_remove:{handle}"));
        self.cleanup_result()
    }

    async fn remove_result(&self, handle: &JobHandle) -> DaemonResult<()> {
        self.record(format!("remove_result:{handle}"));
        self.cleanup_result()
    }

    async fn version(&self) -> DaemonResult<DaemonVersion> {
        Ok(DaemonVersion {
            version: "1.37.0".to_string(),
            enabled_features: Vec::new(),
        })
    }
}

pub fn active(done: u64, total: u64) -> DaemonJobStatus {
    DaemonJobStatus::new(DaemonJobState::Active).with_progress(done, total, 1024)
}

pub fn spec() -> JobSpec {
    JobSpec::new(
        "https://example.com/ubuntu.iso",
        "/downloads/ubuntu.iso",
        DaemonSettings::new("http://127.0.0.1:6800/jsonrpc"),
    )
    .unwrap()
}
