//! One-shot job control handlers.
//!
//! Unlike the downloader, these surface daemon errors directly.

use rdt_core::{DaemonClientPort, JobHandle};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::format_status;

fn handle(gid: &str) -> Result<JobHandle, CliError> {
    JobHandle::from_optional(Some(gid))
        .ok_or_else(|| CliError::Arguments("GID must not be empty".to_string()))
}

/// Print the daemon's view of a job.
pub async fn status(ctx: &CliContext, gid: &str, json: bool) -> Result<(), CliError> {
    let handle = handle(gid)?;
    let status = ctx.daemon.status(&handle).await?;

    if json {
        let text = serde_json::to_string_pretty(&status)
            .map_err(|e| CliError::Daemon(e.to_string()))?;
        println!("{text}");
    } else {
        println!("{}", format_status(handle.as_str(), &status));
    }
    Ok(())
}

pub async fn pause(ctx: &CliContext, gid: &str) -> Result<(), CliError> {
    let handle = handle(gid)?;
    ctx.daemon.pause(&handle).await?;
    println!("Paused {handle}");
    Ok(())
}

pub async fn resume(ctx: &CliContext, gid: &str) -> Result<(), CliError> {
    let handle = handle(gid)?;
    ctx.daemon.resume(&handle).await?;
    println!("Resumed {handle}");
    Ok(())
}

/// Force-remove a job, then drop its result. The second step may fail for
/// jobs that never finished; that is reported but not fatal.
pub async fn remove(ctx: &CliContext, gid: &str) -> Result<(), CliError> {
    let handle = handle(gid)?;
    ctx.daemon.force_remove(&handle).await?;
    if let Err(err) = ctx.daemon.remove_result(&handle).await {
        tracing::warn!(gid = %handle, error = %err, "could not remove download result");
    }
    println!("Removed {handle}");
    Ok(())
}
