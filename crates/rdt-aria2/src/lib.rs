//! aria2 JSON-RPC client for rdt.
//!
//! Implements [`rdt_core::DaemonClientPort`] over HTTP. Every method is a
//! single JSON-RPC call with a hard timeout; retry policy lives in the
//! downloader.
//!
//! ```no_run
//! use rdt_aria2::{Aria2ClientConfig, DefaultAria2Client};
//! use rdt_core::DaemonClientPort;
//!
//! # async fn run() -> Result<(), rdt_core::DaemonError> {
//! let client = DefaultAria2Client::new(&Aria2ClientConfig::new().with_secret("s3cret"))?;
//! let version = client.version().await?;
//! println!("aria2 {}", version.version);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultAria2Client is used through DaemonClientPort, not its generic backend
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod port;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultAria2Client;

// Configuration
pub use config::{Aria2ClientConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
