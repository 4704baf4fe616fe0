//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use rdt_aria2::DEFAULT_ENDPOINT;

use crate::commands::Commands;

/// Command-line interface for driving downloads through an aria2 daemon.
#[derive(Parser)]
#[command(name = "rdt")]
#[command(about = "Run and control aria2 downloads")]
#[command(version)]
pub struct Cli {
    /// aria2 JSON-RPC endpoint
    #[arg(long = "url", env = "RDT_ARIA2_URL", default_value = DEFAULT_ENDPOINT, global = true)]
    pub url: String,

    /// aria2 RPC secret (`--rpc-secret` on the daemon)
    #[arg(long = "secret", env = "RDT_ARIA2_SECRET", hide_env_values = true, global = true)]
    pub secret: Option<String>,

    /// Downloader backend
    #[arg(long = "downloader", default_value = "aria2c", global = true)]
    pub downloader: String,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
