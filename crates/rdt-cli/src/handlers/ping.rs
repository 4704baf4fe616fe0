//! Ping command handler.

use rdt_core::DaemonClientPort;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Query the daemon version to check endpoint and secret.
pub async fn execute(ctx: &CliContext) -> Result<(), CliError> {
    let version = ctx.daemon.version().await?;
    println!(
        "aria2 {} at {}",
        version.version, ctx.config.daemon.endpoint
    );
    if !version.enabled_features.is_empty() {
        println!("Features: {}", version.enabled_features.join(", "));
    }
    Ok(())
}
