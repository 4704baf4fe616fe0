//! Command handlers.
//!
//! Handlers follow the pattern `pub async fn execute(ctx: &CliContext, ...)`:
//! validate CLI input, call the daemon or downloader, format the output.

pub mod control;
pub mod download;
pub mod ping;
