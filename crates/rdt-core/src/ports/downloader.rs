//! Downloader port definition.
//!
//! One implementation per backend; one instance per in-flight job. The job
//! manager only talks to this trait and to the event emitter it handed over
//! at construction.

use async_trait::async_trait;

use crate::download::{DownloaderResult, JobHandle, PollState};

/// Port for a single download job.
///
/// # Contract
///
/// - `start` is the only fallible operation. Later failures arrive as a
///   `Complete` event.
/// - `cancel`, `pause` and `resume` never fail and are no-ops without a
///   handle.
/// - After `Complete` has been emitted or `cancel` has run, no further events
///   are emitted.
///
/// # Usage
///
/// ```ignore
/// let downloader: Arc<dyn DownloaderPort> = build_downloader(kind, request, deps)?;
/// let handle = downloader.start().await?;
/// // persist `handle` so a restart can pass it back in
/// ```
#[async_trait]
pub trait DownloaderPort: Send + Sync {
    /// Submit (or re-attach to) the job and begin polling.
    async fn start(&self) -> DownloaderResult<JobHandle>;

    /// Stop polling and remove the job from the daemon.
    async fn cancel(&self);

    /// Pause the job on the daemon.
    async fn pause(&self);

    /// Resume the job on the daemon.
    async fn resume(&self);

    /// Current handle, if one has been obtained.
    fn handle(&self) -> Option<JobHandle>;

    /// Current lifecycle state.
    fn state(&self) -> PollState;
}
