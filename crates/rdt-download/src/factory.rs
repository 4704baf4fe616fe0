//! Downloader registry.
//!
//! Maps a configured backend kind to a concrete `DownloaderPort`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use rdt_aria2::{Aria2ClientConfig, DefaultAria2Client};
use rdt_core::{
    DownloaderConfig, DownloaderError, DownloaderEventEmitterPort, DownloaderPort,
    DownloaderResult, JobHandle, JobSpec,
};

use crate::downloader::Aria2Downloader;

/// Supported download backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DownloaderKind {
    /// aria2 over JSON-RPC.
    #[default]
    #[serde(rename = "aria2c", alias = "aria2")]
    Aria2,
}

impl DownloaderKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Aria2 => "aria2c",
        }
    }
}

impl fmt::Display for DownloaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DownloaderKind {
    type Err = DownloaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aria2c" | "aria2" => Ok(Self::Aria2),
            other => Err(DownloaderError::configuration(format!(
                "unknown downloader '{other}'"
            ))),
        }
    }
}

/// What the job manager wants downloaded.
#[derive(Debug, Clone)]
pub struct DownloaderRequest {
    /// Handle persisted from an earlier run, if any.
    pub job_id: Option<JobHandle>,
    pub spec: JobSpec,
}

impl DownloaderRequest {
    pub const fn new(spec: JobSpec) -> Self {
        Self { job_id: None, spec }
    }

    #[must_use]
    pub fn with_job_id(mut self, job_id: Option<JobHandle>) -> Self {
        self.job_id = job_id;
        self
    }
}

/// Dependencies shared by every downloader the job manager builds.
#[derive(Clone)]
pub struct DownloaderDeps {
    /// Port for emitting downloader events.
    pub emitter: Arc<dyn DownloaderEventEmitterPort>,
    /// Submission and polling timings.
    pub config: DownloaderConfig,
}

impl DownloaderDeps {
    pub fn new(emitter: Arc<dyn DownloaderEventEmitterPort>) -> Self {
        Self {
            emitter,
            config: DownloaderConfig::default(),
        }
    }

    #[must_use]
    pub const fn with_config(mut self, config: DownloaderConfig) -> Self {
        self.config = config;
        self
    }
}

/// Build a downloader for one job.
///
/// The daemon client is created from the job's `DaemonSettings`; nothing is
/// sent until `start` is called.
pub fn build_downloader(
    kind: DownloaderKind,
    request: DownloaderRequest,
    deps: DownloaderDeps,
) -> DownloaderResult<Arc<dyn DownloaderPort>> {
    match kind {
        DownloaderKind::Aria2 => {
            let client_config = Aria2ClientConfig::from_settings(request.spec.daemon());
            let client = DefaultAria2Client::new(&client_config)
                .map_err(|e| DownloaderError::configuration(e.to_string()))?;

            Ok(Arc::new(Aria2Downloader::new(
                Arc::new(client),
                deps.emitter,
                request.spec,
                request.job_id,
                deps.config,
            )))
        }
    }
}
