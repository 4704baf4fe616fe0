//! CLI bootstrap - the composition root.
//!
//! The daemon client and downloader factory are wired together here. Command
//! handlers only see `CliContext`.

use std::sync::Arc;

use rdt_aria2::{Aria2ClientConfig, DefaultAria2Client};
use rdt_core::{DaemonClientPort, DaemonSettings, DownloaderConfig};
use rdt_download::DownloaderKind;

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Where the daemon listens and how to authenticate.
    pub daemon: DaemonSettings,
    /// Backend used by `download`.
    pub kind: DownloaderKind,
    /// Submission and polling timings.
    pub downloader: DownloaderConfig,
}

impl CliConfig {
    /// Build config from parsed arguments (flags already merged with env).
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let kind = cli.downloader.parse::<DownloaderKind>()?;
        Ok(Self {
            daemon: DaemonSettings::new(cli.url.clone()).with_secret(cli.secret.clone()),
            kind,
            downloader: DownloaderConfig::default(),
        })
    }
}

/// Composed context for CLI commands.
pub struct CliContext {
    pub config: CliConfig,
    /// Client for one-shot control commands.
    pub daemon: Arc<dyn DaemonClientPort>,
}

/// Wire up the daemon client. No request is sent.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let client = DefaultAria2Client::new(&Aria2ClientConfig::from_settings(&config.daemon))?;
    Ok(CliContext {
        config,
        daemon: Arc::new(client),
    })
}
