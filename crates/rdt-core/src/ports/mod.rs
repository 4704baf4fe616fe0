//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the download core expects from
//! infrastructure. They contain no transport details and use only domain
//! types.
//!
//! # Design Rules
//!
//! - No `reqwest` or JSON-RPC types in any signature
//! - Daemon ports are one-call-per-method; no hidden retries
//! - Emitters are synchronous and non-blocking

pub mod daemon;
pub mod downloader;
pub mod event_emitter;

pub use daemon::{
    AddJobRequest, DaemonClientPort, DaemonError, DaemonJobState, DaemonJobStatus, DaemonResult,
    DaemonVersion,
};
pub use downloader::DownloaderPort;
pub use event_emitter::{
    ChannelDownloaderEmitter, DownloaderEventEmitterPort, NoopDownloaderEmitter,
};
