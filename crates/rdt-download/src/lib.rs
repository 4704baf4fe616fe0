//! Downloader state machine for rdt.
//!
//! One [`Aria2Downloader`] per in-flight job. It submits the job to the
//! daemon (verifying a stored handle first), polls its status once per
//! interval, and turns the daemon's answers into `Progress` and a single
//! `Complete` event.
//!
//! # Modules
//!
//! - `downloader` - the state machine, poll loop and best-effort cleanup
//! - `factory` - backend registry and `build_downloader`
//!
//! ```no_run
//! use std::sync::Arc;
//! use rdt_core::{ChannelDownloaderEmitter, DaemonSettings, JobSpec};
//! use rdt_download::{DownloaderDeps, DownloaderKind, DownloaderRequest, build_downloader};
//!
//! # async fn run() -> Result<(), rdt_core::DownloaderError> {
//! let spec = JobSpec::new(
//!     "https://example.com/a.iso",
//!     "/downloads/a.iso",
//!     DaemonSettings::new("http://127.0.0.1:6800/jsonrpc"),
//! )?;
//! let (emitter, mut events) = ChannelDownloaderEmitter::channel();
//! let downloader = build_downloader(
//!     DownloaderKind::Aria2,
//!     DownloaderRequest::new(spec),
//!     DownloaderDeps::new(Arc::new(emitter)),
//! )?;
//!
//! downloader.start().await?;
//! while let Some(event) = events.recv().await {
//!     if event.is_complete() {
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

// Re-export core types for convenience
pub use rdt_core::download::{
    DownloadOutcome, DownloadProgress, DownloaderConfig, DownloaderError, DownloaderEvent,
    JobHandle, JobSpec, PollState,
};
pub use rdt_core::ports::{DownloaderEventEmitterPort, DownloaderPort};

mod downloader;
mod factory;

pub use downloader::Aria2Downloader;
pub use factory::{DownloaderDeps, DownloaderKind, DownloaderRequest, build_downloader};
