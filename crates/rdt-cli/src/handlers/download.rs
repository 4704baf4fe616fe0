//! Download command handler.
//!
//! Runs a single job through the downloader and blocks until its `Complete`
//! event. Ctrl-C cancels the job and removes it from the daemon, including
//! while the job is still being submitted.

use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use rdt_core::{
    ChannelDownloaderEmitter, DownloadOutcome, DownloaderEvent, DownloaderPort, JobHandle, JobSpec,
};
use rdt_download::{DownloaderDeps, DownloaderRequest, build_downloader};
use tracing::debug;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::format_progress;

/// Arguments for the download command.
pub struct DownloadArgs {
    pub uri: String,
    pub path: PathBuf,
    pub gid: Option<String>,
}

pub async fn execute(ctx: &CliContext, args: DownloadArgs) -> Result<(), CliError> {
    let spec = JobSpec::new(args.uri, args.path, ctx.config.daemon.clone())?;
    let request = DownloaderRequest::new(spec)
        .with_job_id(args.gid.as_deref().and_then(|gid| JobHandle::from_optional(Some(gid))));

    let (emitter, mut events) = ChannelDownloaderEmitter::channel();
    let deps = DownloaderDeps::new(Arc::new(emitter)).with_config(ctx.config.downloader.clone());
    let downloader = build_downloader(ctx.config.kind, request, deps)?;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let handle = start_interruptible(downloader.as_ref(), &mut ctrl_c).await?;
    println!("Started {handle}");

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    return Err(CliError::Daemon("event stream closed".to_string()));
                };
                match event {
                    DownloaderEvent::Progress { progress, .. } => {
                        print!("\r{}", format_progress(&progress));
                        std::io::stdout().flush().ok();
                    }
                    DownloaderEvent::Complete { outcome, .. } => {
                        println!();
                        return finish(&handle, outcome);
                    }
                }
            }
            _ = &mut ctrl_c => {
                debug!(gid = %handle, "interrupted");
                println!();
                downloader.cancel().await;
                return Err(CliError::Cancelled);
            }
        }
    }
}

/// Run `start`, cancelling the downloader if `interrupt` fires first.
///
/// On interrupt the in-flight start is still driven to its end so a job it
/// already submitted gets removed.
async fn start_interruptible<I>(
    downloader: &dyn DownloaderPort,
    interrupt: &mut I,
) -> Result<JobHandle, CliError>
where
    I: Future + Unpin,
{
    let start = downloader.start();
    tokio::pin!(start);

    tokio::select! {
        result = &mut start => Ok(result?),
        _ = interrupt => {
            debug!("interrupted during submission");
            downloader.cancel().await;
            if let Err(err) = start.await {
                debug!(error = %err, "start aborted");
            }
            Err(CliError::Cancelled)
        }
    }
}

fn finish(handle: &JobHandle, outcome: DownloadOutcome) -> Result<(), CliError> {
    match outcome {
        DownloadOutcome::Success => {
            println!("Finished {handle}");
            Ok(())
        }
        DownloadOutcome::Failure { error } => Err(CliError::DownloadFailed(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use rdt_core::{DownloaderError, DownloaderResult, PollState};
    use tokio::sync::Notify;
    use tokio_test::assert_ok;

    /// Downloader whose `start` only returns once `cancel` is called.
    #[derive(Default)]
    struct BlockedStart {
        released: Notify,
        cancels: AtomicUsize,
        finished_starts: AtomicUsize,
    }

    #[async_trait]
    impl DownloaderPort for BlockedStart {
        async fn start(&self) -> DownloaderResult<JobHandle> {
            self.released.notified().await;
            self.finished_starts.fetch_add(1, Ordering::SeqCst);
            Err(DownloaderError::Cancelled)
        }

        async fn cancel(&self) {
            self.cancels.fetch_add(1, Ordering::SeqCst);
            self.released.notify_one();
        }

        async fn pause(&self) {}

        async fn resume(&self) {}

        fn handle(&self) -> Option<JobHandle> {
            None
        }

        fn state(&self) -> PollState {
            PollState::Submitting
        }
    }

    #[tokio::test]
    async fn test_interrupt_during_start_cancels() {
        let downloader = BlockedStart::default();
        let mut interrupt = std::future::ready(());

        let result = start_interruptible(&downloader, &mut interrupt).await;

        assert!(matches!(result, Err(CliError::Cancelled)));
        assert_eq!(downloader.cancels.load(Ordering::SeqCst), 1);
        assert_eq!(downloader.finished_starts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_start_without_interrupt_returns_handle() {
        struct Ready;

        #[async_trait]
        impl DownloaderPort for Ready {
            async fn start(&self) -> DownloaderResult<JobHandle> {
                Ok(JobHandle::new("g1"))
            }
            async fn cancel(&self) {}
            async fn pause(&self) {}
            async fn resume(&self) {}
            fn handle(&self) -> Option<JobHandle> {
                Some(JobHandle::new("g1"))
            }
            fn state(&self) -> PollState {
                PollState::Polling
            }
        }

        let mut interrupt = std::future::pending::<()>();
        let handle = assert_ok!(start_interruptible(&Ready, &mut interrupt).await);
        assert_eq!(handle, JobHandle::new("g1"));
    }

    #[test]
    fn test_finish_maps_failure() {
        let handle = JobHandle::new("g1");
        assert!(finish(&handle, DownloadOutcome::Success).is_ok());
        assert!(matches!(
            finish(&handle, DownloadOutcome::failure("9: disk full")),
            Err(CliError::DownloadFailed(ref e)) if e == "9: disk full"
        ));
    }
}
