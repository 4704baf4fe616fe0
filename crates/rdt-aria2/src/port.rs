//! Port trait implementation for `Aria2Client`.
//!
//! This module implements the core-owned `DaemonClientPort` trait, converting
//! between aria2 wire types and core DTOs.

use async_trait::async_trait;
use rdt_core::{
    AddJobRequest, DaemonClientPort, DaemonError, DaemonJobState, DaemonJobStatus, DaemonResult,
    DaemonVersion, JobHandle,
};
use tracing::debug;

use crate::client::Aria2Client;
use crate::error::Aria2Error;
use crate::http::RpcBackend;
use crate::models::{Aria2Status, Aria2Version};

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `Aria2Error` to core `DaemonError`.
fn map_error(err: Aria2Error) -> DaemonError {
    match err {
        Aria2Error::Timeout => DaemonError::Timeout,
        Aria2Error::Network(e) if e.is_timeout() => DaemonError::Timeout,
        Aria2Error::Network(e) => DaemonError::transport(e.to_string()),
        Aria2Error::Http { status, url } => {
            DaemonError::transport(format!("HTTP {status} from {url}"))
        }
        Aria2Error::Rpc { code, message } => DaemonError::rpc(code, message),
        Aria2Error::InvalidResponse { message } => DaemonError::invalid_response(message),
        Aria2Error::JsonParse(e) => DaemonError::invalid_response(e.to_string()),
        Aria2Error::InvalidUrl(e) => DaemonError::configuration(e.to_string()),
    }
}

// ============================================================================
// Type Conversions
// ============================================================================

fn to_job_status(status: Aria2Status) -> DaemonJobStatus {
    DaemonJobStatus {
        state: DaemonJobState::parse(&status.status),
        completed_length: status.completed_length,
        total_length: status.total_length,
        download_speed: status.download_speed,
        error_code: status.error_code,
        error_message: status.error_message,
    }
}

fn to_version(version: Aria2Version) -> DaemonVersion {
    DaemonVersion {
        version: version.version,
        enabled_features: version.enabled_features,
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: RpcBackend> DaemonClientPort for Aria2Client<B> {
    async fn add_job(&self, request: &AddJobRequest) -> DaemonResult<JobHandle> {
        let gid = self
            .add_uri(&request.uris, &request.dir, &request.out)
            .await
            .map_err(map_error)?;

        JobHandle::from_optional(Some(&gid))
            .ok_or_else(|| DaemonError::invalid_response("aria2.addUri returned an empty GID"))
    }

    async fn status(&self, handle: &JobHandle) -> DaemonResult<DaemonJobStatus> {
        let status = self
            .tell_status(handle.as_str())
            .await
            .map_err(map_error)?;
        debug!(gid = %handle, status = %status.status, "aria2 status");
        Ok(to_job_status(status))
    }

    async fn pause(&self, handle: &JobHandle) -> DaemonResult<()> {
        Self::pause(self, handle.as_str())
            .await
            .map(drop)
            .map_err(map_error)
    }

    async fn resume(&self, handle: &JobHandle) -> DaemonResult<()> {
        self.unpause(handle.as_str())
            .await
            .map(drop)
            .map_err(map_error)
    }

    async fn force_remove(&self, handle: &JobHandle) -> DaemonResult<()> {
        Self::force_remove(self, handle.as_str())
            .await
            .map(drop)
            .map_err(map_error)
    }

    async fn remove_result(&self, handle: &JobHandle) -> DaemonResult<()> {
        self.remove_download_result(handle.as_str())
            .await
            .map(drop)
            .map_err(map_error)
    }

    async fn version(&self) -> DaemonResult<DaemonVersion> {
        self.get_version().await.map(to_version).map_err(map_error)
    }
}
