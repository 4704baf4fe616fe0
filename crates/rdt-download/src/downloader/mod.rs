//! Downloader implementation.
//!
//! `Aria2Downloader` drives one daemon job through submission, polling and
//! cleanup, and reports the result through the event emitter port.
//!
//! # Concurrency Model
//!
//! - Control state (`PollState`, handle, timer token) sits behind a
//!   `std::sync::Mutex` that is never held across an `.await`
//! - Events are emitted while holding the emission gate; `cancel` closes the
//!   gate, `Complete` closes it and fires once
//! - Lock order: control → gate
//! - One poll task per successful `start`, stopped through its
//!   `CancellationToken`
//! - A tick that cannot claim the `TickGuard` is skipped

mod best_effort;
mod poller;

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::time::{Instant, MissedTickBehavior, interval_at, sleep};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use rdt_core::{
    AddJobRequest, DaemonClientPort, DownloadOutcome, DownloadProgress, DownloaderConfig,
    DownloaderError, DownloaderEvent, DownloaderEventEmitterPort, DownloaderPort,
    DownloaderResult, JobHandle, JobSpec, PollState,
};

use best_effort::BestEffort;
use poller::{POLL_FAILURE_MESSAGE, PollDecision, TickGuard, classify};

/// Mutable lifecycle state.
struct Control {
    state: PollState,
    /// Supplied at construction (unverified) or obtained by submission.
    handle: Option<JobHandle>,
    /// Token of the running poll task.
    timer: Option<CancellationToken>,
}

impl Control {
    fn stop_timer(&mut self) {
        if let Some(token) = self.timer.take() {
            token.cancel();
        }
    }
}

struct Inner {
    daemon: Arc<dyn DaemonClientPort>,
    emitter: Arc<dyn DownloaderEventEmitterPort>,
    spec: JobSpec,
    config: DownloaderConfig,
    control: Mutex<Control>,
    /// `true` while events may still be emitted.
    gate: Mutex<bool>,
    ticking: AtomicBool,
}

/// Downloader backed by an aria2 daemon.
///
/// This struct is public but the job manager should normally hold it as
/// `Arc<dyn DownloaderPort>` obtained from `build_downloader`.
pub struct Aria2Downloader {
    inner: Arc<Inner>,
}

impl Aria2Downloader {
    /// Create a downloader for `spec`.
    ///
    /// `job_id` is a handle from a previous run. It is verified by `start`
    /// and replaced with a fresh submission if the daemon no longer knows it.
    pub fn new(
        daemon: Arc<dyn DaemonClientPort>,
        emitter: Arc<dyn DownloaderEventEmitterPort>,
        spec: JobSpec,
        job_id: Option<JobHandle>,
        config: DownloaderConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                daemon,
                emitter,
                spec,
                config,
                control: Mutex::new(Control {
                    state: PollState::Idle,
                    handle: job_id,
                    timer: None,
                }),
                gate: Mutex::new(true),
                ticking: AtomicBool::new(false),
            }),
        }
    }

    /// The job this downloader was built for.
    pub fn spec(&self) -> &JobSpec {
        &self.inner.spec
    }
}

impl Drop for Aria2Downloader {
    fn drop(&mut self) {
        self.inner.control().stop_timer();
    }
}

impl Inner {
    fn control(&self) -> MutexGuard<'_, Control> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn gate(&self) -> MutexGuard<'_, bool> {
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_completed(&self) -> bool {
        self.control().state == PollState::Completed
    }

    // ------------------------------------------------------------------
    // Start
    // ------------------------------------------------------------------

    /// Check a stored handle with one status query. Drops it on failure.
    async fn verify(&self, handle: &JobHandle) -> bool {
        match self.daemon.status(handle).await {
            Ok(status) => {
                info!(gid = %handle, state = status.state.as_str(), "re-attached to existing job");
                true
            }
            Err(err) => {
                info!(gid = %handle, error = %err, "stored handle rejected; submitting again");
                let mut control = self.control();
                if control.handle.as_ref() == Some(handle) {
                    control.handle = None;
                }
                false
            }
        }
    }

    /// Submit the job, retrying with linear backoff.
    async fn submit(&self) -> DownloaderResult<JobHandle> {
        let request = AddJobRequest::from_spec(&self.spec);
        let attempts = self.config.submit_attempts;
        let mut attempt = 1;

        loop {
            if self.is_completed() {
                return Err(DownloaderError::Cancelled);
            }

            match self.daemon.add_job(&request).await {
                Ok(handle) => {
                    info!(gid = %handle, attempt, uri = self.spec.source_uri(), "job submitted");
                    return Ok(handle);
                }
                Err(source) if attempt >= attempts => {
                    warn!(attempt, error = %source, "job submission failed; giving up");
                    return Err(DownloaderError::SubmissionFailed { attempts, source });
                }
                Err(err) => {
                    let delay = self.config.backoff_after(attempt);
                    warn!(attempt, error = %err, ?delay, "job submission failed; retrying");
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Obtain a usable handle: the verified stored one, or a new submission.
    async fn acquire(&self, stored: Option<JobHandle>) -> DownloaderResult<JobHandle> {
        if let Some(handle) = stored {
            if self.verify(&handle).await {
                return Ok(handle);
            }
        }

        let handle = self.submit().await?;

        let cancelled = {
            let mut control = self.control();
            if control.state == PollState::Completed {
                true
            } else {
                control.handle = Some(handle.clone());
                false
            }
        };

        if cancelled {
            debug!(gid = %handle, "cancelled during submission; removing new job");
            self.cleanup(&handle).await;
            return Err(DownloaderError::Cancelled);
        }

        Ok(handle)
    }

    /// Undo `Submitting` after a failed start so it can be retried.
    fn abort_start(&self) {
        let mut control = self.control();
        if control.state == PollState::Submitting {
            control.state = PollState::Idle;
        }
    }

    // ------------------------------------------------------------------
    // Polling
    // ------------------------------------------------------------------

    async fn tick(&self) {
        let Some(_guard) = TickGuard::try_claim(&self.ticking) else {
            debug!("previous tick still running; skipping");
            return;
        };

        let handle = {
            let control = self.control();
            match (&control.state, &control.handle) {
                (PollState::Polling, Some(handle)) => handle.clone(),
                _ => return,
            }
        };

        match self.daemon.status(&handle).await {
            Ok(status) => match classify(&status) {
                PollDecision::Progress(progress) => {
                    debug!(
                        gid = %handle,
                        state = status.state.as_str(),
                        done = progress.bytes_done,
                        total = progress.bytes_total,
                        "poll tick"
                    );
                    self.emit_progress(&handle, progress);
                }
                PollDecision::Finished(outcome) => self.finish(&handle, outcome).await,
            },
            Err(err) => {
                warn!(gid = %handle, error = %err, "status poll failed; ending job");
                self.finish(&handle, DownloadOutcome::failure(POLL_FAILURE_MESSAGE))
                    .await;
            }
        }
    }

    fn emit_progress(&self, handle: &JobHandle, progress: DownloadProgress) {
        let gate = self.gate();
        if *gate {
            self.emitter
                .emit(DownloaderEvent::progress(handle.clone(), progress));
        }
    }

    /// Move to `Completed`. Returns `false` if something else got there first.
    fn mark_completed(&self) -> bool {
        let mut control = self.control();
        control.stop_timer();
        if control.state == PollState::Completed {
            return false;
        }
        control.state = PollState::Completed;
        true
    }

    /// Terminal path of a tick: stop, clean up, emit `Complete` once.
    async fn finish(&self, handle: &JobHandle, outcome: DownloadOutcome) {
        if !self.mark_completed() {
            debug!(gid = %handle, "already completed; dropping outcome");
            return;
        }

        self.cleanup(handle).await;

        let mut gate = self.gate();
        if std::mem::replace(&mut *gate, false) {
            match outcome.error() {
                None => info!(gid = %handle, "download complete"),
                Some(error) => info!(gid = %handle, error, "download failed"),
            }
            self.emitter
                .emit(DownloaderEvent::complete(handle.clone(), outcome));
        }
    }

    /// Remove the job and its result from the daemon, ignoring failures.
    async fn cleanup(&self, handle: &JobHandle) {
        BestEffort::run("force_remove", handle, self.daemon.force_remove(handle))
            .await
            .discard();
        BestEffort::run("remove_result", handle, self.daemon.remove_result(handle))
            .await
            .discard();
    }
}

/// Spawn the poll loop. The first tick fires one interval from now.
fn spawn_poll_loop(inner: Arc<Inner>, token: CancellationToken) {
    let period = inner.config.poll_interval;
    let first_tick = Instant::now() + period;

    tokio::spawn(async move {
        let mut ticker = interval_at(first_tick, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                () = token.cancelled() => break,
                _ = ticker.tick() => inner.tick().await,
            }
        }

        debug!("poll loop stopped");
    });
}

#[async_trait]
impl DownloaderPort for Aria2Downloader {
    async fn start(&self) -> DownloaderResult<JobHandle> {
        let stored = {
            let mut control = self.inner.control();
            match control.state {
                PollState::Polling => {
                    return control
                        .handle
                        .clone()
                        .ok_or(DownloaderError::AlreadyStarting);
                }
                PollState::Submitting => return Err(DownloaderError::AlreadyStarting),
                PollState::Completed => return Err(DownloaderError::AlreadyCompleted),
                PollState::Idle => {
                    control.state = PollState::Submitting;
                    control.handle.clone()
                }
            }
        };

        let handle = match self.inner.acquire(stored).await {
            Ok(handle) => handle,
            Err(err) => {
                self.inner.abort_start();
                return Err(err);
            }
        };

        // Give the daemon a moment before the first status query.
        sleep(self.inner.config.settle_delay).await;

        let token = {
            let mut control = self.inner.control();
            if control.state != PollState::Submitting {
                return Err(DownloaderError::Cancelled);
            }
            let token = CancellationToken::new();
            control.state = PollState::Polling;
            control.timer = Some(token.clone());
            token
        };

        spawn_poll_loop(Arc::clone(&self.inner), token);
        info!(gid = %handle, interval = ?self.inner.config.poll_interval, "polling started");

        Ok(handle)
    }

    async fn cancel(&self) {
        let target = {
            let mut control = self.inner.control();
            control.stop_timer();

            match (control.state, &control.handle) {
                (PollState::Completed, _) | (PollState::Idle, None) => return,
                _ => {}
            }

            control.state = PollState::Completed;
            *self.inner.gate() = false;
            control.handle.clone()
        };

        match target {
            Some(handle) => {
                info!(gid = %handle, "cancelling download");
                self.inner.cleanup(&handle).await;
            }
            None => debug!("cancelled before a job was submitted"),
        }
    }

    async fn pause(&self) {
        let Some(handle) = self.handle() else {
            return;
        };
        BestEffort::run("pause", &handle, self.inner.daemon.pause(&handle))
            .await
            .discard();
    }

    async fn resume(&self) {
        let Some(handle) = self.handle() else {
            return;
        };
        BestEffort::run("resume", &handle, self.inner.daemon.resume(&handle))
            .await
            .discard();
    }

    fn handle(&self) -> Option<JobHandle> {
        self.inner.control().handle.clone()
    }

    fn state(&self) -> PollState {
        self.inner.control().state
    }
}
