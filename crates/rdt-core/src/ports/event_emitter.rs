//! Downloader event emitter port.
//!
//! This port abstracts event delivery so downloaders can notify the job
//! manager without knowing whether events end up in a channel, a log, or
//! nowhere.

use tokio::sync::mpsc;

use crate::download::DownloaderEvent;

/// Port for emitting downloader events.
///
/// Implementations must not block: `emit` is called from the poll task.
/// Handlers that want to react to `Complete` by calling back into the
/// downloader (e.g. `cancel`) should spawn that work.
pub trait DownloaderEventEmitterPort: Send + Sync {
    /// Emit an event.
    fn emit(&self, event: DownloaderEvent);

    /// Clone this emitter into a boxed trait object.
    fn clone_box(&self) -> Box<dyn DownloaderEventEmitterPort>;
}

/// A no-op emitter for callers that only care about `start`'s result.
#[derive(Debug, Clone, Default)]
pub struct NoopDownloaderEmitter;

impl NoopDownloaderEmitter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DownloaderEventEmitterPort for NoopDownloaderEmitter {
    fn emit(&self, _event: DownloaderEvent) {}

    fn clone_box(&self) -> Box<dyn DownloaderEventEmitterPort> {
        Box::new(self.clone())
    }
}

/// Emitter that forwards events into an unbounded tokio channel.
///
/// # Example
///
/// ```
/// use rdt_core::ports::ChannelDownloaderEmitter;
///
/// let (emitter, mut events) = ChannelDownloaderEmitter::channel();
/// drop(emitter);
/// assert!(events.try_recv().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ChannelDownloaderEmitter {
    tx: mpsc::UnboundedSender<DownloaderEvent>,
}

impl ChannelDownloaderEmitter {
    /// Create an emitter and the receiver the job manager reads from.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<DownloaderEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl DownloaderEventEmitterPort for ChannelDownloaderEmitter {
    fn emit(&self, event: DownloaderEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("downloader event dropped: receiver closed");
        }
    }

    fn clone_box(&self) -> Box<dyn DownloaderEventEmitterPort> {
        Box::new(self.clone())
    }
}
