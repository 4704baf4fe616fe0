//! Public configuration for the aria2 client.

use std::fmt;
use std::time::Duration;

use rdt_core::DaemonSettings;

/// Default aria2 RPC endpoint (`--enable-rpc` with default port).
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:6800/jsonrpc";

/// Default per-call timeout. Kept below the poll interval so a
/// hung daemon cannot stall a poll loop.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Configuration for the aria2 client.
///
/// # Example
///
/// ```
/// use rdt_aria2::Aria2ClientConfig;
/// use std::time::Duration;
///
/// let config = Aria2ClientConfig::new()
///     .with_endpoint("http://10.0.0.2:6800/jsonrpc")
///     .with_secret("s3cret")
///     .with_timeout(Duration::from_secs(2));
/// ```
#[derive(Clone)]
pub struct Aria2ClientConfig {
    /// JSON-RPC endpoint URL
    pub(crate) endpoint: String,
    /// RPC secret (sent as `token:<secret>`)
    pub(crate) secret: Option<String>,
    /// Per-call timeout
    pub(crate) timeout: Duration,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
}

impl Default for Aria2ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            secret: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("rdt-aria2/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl fmt::Debug for Aria2ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aria2ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("secret", &self.secret.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Aria2ClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from a job's daemon settings.
    #[must_use]
    pub fn from_settings(settings: &DaemonSettings) -> Self {
        Self::new()
            .with_endpoint(settings.endpoint.clone())
            .with_optional_secret(settings.secret.clone())
    }

    /// Set the JSON-RPC endpoint.
    ///
    /// Defaults to `http://127.0.0.1:6800/jsonrpc`.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the RPC secret.
    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Set an optional RPC secret. Blank values clear it.
    #[must_use]
    pub fn with_optional_secret(mut self, secret: Option<String>) -> Self {
        self.secret = secret.filter(|s| !s.trim().is_empty());
        self
    }

    /// Set the per-call timeout.
    ///
    /// Defaults to 1 second.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// The configured endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Aria2ClientConfig::new();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.user_agent.contains("rdt-aria2"));
        assert_eq!(config.timeout, Duration::from_secs(1));
        assert!(config.secret.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = Aria2ClientConfig::new()
            .with_endpoint("http://daemon:6800/jsonrpc")
            .with_user_agent("test-agent")
            .with_timeout(Duration::from_secs(3))
            .with_secret("secret");

        assert_eq!(config.endpoint(), "http://daemon:6800/jsonrpc");
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.secret, Some("secret".to_string()));
    }

    #[test]
    fn test_from_settings() {
        let settings = DaemonSettings::new("http://nas:6800/jsonrpc")
            .with_secret(Some("token".to_string()));
        let config = Aria2ClientConfig::from_settings(&settings);
        assert_eq!(config.endpoint, "http://nas:6800/jsonrpc");
        assert_eq!(config.secret, Some("token".to_string()));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_blank_secret_cleared() {
        let config = Aria2ClientConfig::new()
            .with_secret("x")
            .with_optional_secret(Some("   ".to_string()));
        assert!(config.secret.is_none());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = Aria2ClientConfig::new().with_secret("hunter2");
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
