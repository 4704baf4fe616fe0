//! Download domain: job descriptions, progress, outcomes and events.

mod config;
mod errors;
mod events;
mod types;

pub use config::{
    DEFAULT_BACKOFF_STEP, DEFAULT_POLL_INTERVAL, DEFAULT_SETTLE_DELAY, DEFAULT_SUBMIT_ATTEMPTS,
    DownloaderConfig,
};
pub use errors::{DownloaderError, DownloaderResult};
pub use events::DownloaderEvent;
pub use types::{DaemonSettings, DownloadOutcome, DownloadProgress, JobHandle, JobSpec, PollState};
