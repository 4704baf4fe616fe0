//! Commands enum.

use std::path::PathBuf;

use clap::Subcommand;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Download a URI to a path and wait until it finishes
    Download {
        /// Source URI handed to the daemon
        uri: String,
        /// Full destination path, including the file name
        path: PathBuf,
        /// GID of an earlier run to re-attach to
        #[arg(long)]
        gid: Option<String>,
    },

    /// Show the daemon's status for a job
    Status {
        /// Job GID
        gid: String,
        /// Print the status as JSON
        #[arg(long)]
        json: bool,
    },

    /// Pause a job
    Pause {
        /// Job GID
        gid: String,
    },

    /// Resume a paused job
    Resume {
        /// Job GID
        gid: String,
    },

    /// Remove a job and its result from the daemon
    Remove {
        /// Job GID
        gid: String,
    },

    /// Check that the daemon is reachable with the current settings
    Ping,
}
