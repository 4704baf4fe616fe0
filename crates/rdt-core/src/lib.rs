//! Core domain types and ports for rdt download backends.
//!
//! - [`download`] - job specs, progress, outcomes, events and timing config
//! - [`ports`] - traits implemented by daemon clients, downloaders and emitters
//!
//! This crate has no transport code; see `rdt-aria2` for the daemon client and
//! `rdt-download` for the downloader state machine.

#![deny(unused_crate_dependencies)]

pub mod download;
pub mod ports;

// Re-export commonly used types for convenience
pub use download::{
    DaemonSettings, DownloadOutcome, DownloadProgress, DownloaderConfig, DownloaderError,
    DownloaderEvent, DownloaderResult, JobHandle, JobSpec, PollState,
};
pub use ports::{
    AddJobRequest, ChannelDownloaderEmitter, DaemonClientPort, DaemonError, DaemonJobState,
    DaemonJobStatus, DaemonResult, DaemonVersion, DownloaderEventEmitterPort, DownloaderPort,
    NoopDownloaderEmitter,
};
