//! Timing configuration for downloaders.

use std::time::Duration;

/// Submission attempts before `start` gives up.
pub const DEFAULT_SUBMIT_ATTEMPTS: u32 = 5;
/// Backoff grows by this much after every failed submission.
pub const DEFAULT_BACKOFF_STEP: Duration = Duration::from_secs(1);
/// Pause between obtaining a handle and the first poll.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(1);
/// Period of the status poll.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Timing knobs for a downloader.
///
/// The defaults match what the job manager expects; tests shrink them.
///
/// # Example
///
/// ```
/// use rdt_core::DownloaderConfig;
/// use std::time::Duration;
///
/// let config = DownloaderConfig::new()
///     .with_submit_attempts(3)
///     .with_poll_interval(Duration::from_millis(500));
/// assert_eq!(config.submit_attempts, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloaderConfig {
    /// Maximum number of `add_job` calls per `start`.
    pub submit_attempts: u32,
    /// Linear backoff unit: failed attempt `n` waits `n * backoff_step`.
    pub backoff_step: Duration,
    /// Delay after obtaining a handle, before the poll timer starts.
    pub settle_delay: Duration,
    /// Poll timer period.
    pub poll_interval: Duration,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            submit_attempts: DEFAULT_SUBMIT_ATTEMPTS,
            backoff_step: DEFAULT_BACKOFF_STEP,
            settle_delay: DEFAULT_SETTLE_DELAY,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl DownloaderConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the submission attempt bound (clamped to at least 1).
    #[must_use]
    pub fn with_submit_attempts(mut self, attempts: u32) -> Self {
        self.submit_attempts = attempts.max(1);
        self
    }

    #[must_use]
    pub const fn with_backoff_step(mut self, step: Duration) -> Self {
        self.backoff_step = step;
        self
    }

    #[must_use]
    pub const fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Set the poll period. Zero is replaced by 1ms since timers reject it.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Delay to wait after failed attempt `attempt` (1-based).
    #[must_use]
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        self.backoff_step.saturating_mul(attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DownloaderConfig::new();
        assert_eq!(config.submit_attempts, 5);
        assert_eq!(config.backoff_step, Duration::from_secs(1));
        assert_eq!(config.settle_delay, Duration::from_secs(1));
        assert_eq!(config.poll_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_backoff_is_linear() {
        let config = DownloaderConfig::new();
        assert_eq!(config.backoff_after(1), Duration::from_secs(1));
        assert_eq!(config.backoff_after(4), Duration::from_secs(4));
    }

    #[test]
    fn test_builder_clamps() {
        let config = DownloaderConfig::new()
            .with_submit_attempts(0)
            .with_poll_interval(Duration::ZERO);
        assert_eq!(config.submit_attempts, 1);
        assert!(config.poll_interval > Duration::ZERO);
    }
}
