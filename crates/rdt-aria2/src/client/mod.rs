//! aria2 client.
//!
//! Thin typed wrappers around the aria2 RPC methods used by the downloader.
//! Each method is exactly one remote call.

use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use rdt_core::{DaemonError, DaemonResult};

use crate::config::Aria2ClientConfig;
use crate::error::Aria2Result;
use crate::http::{ReqwestBackend, RpcBackend};
use crate::models::{Aria2Status, Aria2Version, STATUS_KEYS};

/// aria2 client generic over its transport.
pub struct Aria2Client<B: RpcBackend> {
    backend: B,
    secret: Option<String>,
}

/// Client wired to the reqwest transport.
pub type DefaultAria2Client = Aria2Client<ReqwestBackend>;

impl DefaultAria2Client {
    /// Build a client from configuration.
    ///
    /// Fails only when the endpoint URL is invalid or the HTTP client cannot
    /// be constructed; no request is sent.
    pub fn new(config: &Aria2ClientConfig) -> DaemonResult<Self> {
        let backend = ReqwestBackend::new(config)
            .map_err(|e| DaemonError::configuration(e.to_string()))?;
        Ok(Self::with_backend(backend, config.secret.clone()))
    }
}

impl<B: RpcBackend> Aria2Client<B> {
    /// Build a client over an arbitrary backend.
    pub(crate) const fn with_backend(backend: B, secret: Option<String>) -> Self {
        Self { backend, secret }
    }

    /// Prepend `token:<secret>` when a secret is configured.
    fn params(&self, params: Vec<Value>) -> Vec<Value> {
        match &self.secret {
            Some(secret) => {
                let mut full = Vec::with_capacity(params.len() + 1);
                full.push(Value::String(format!("token:{secret}")));
                full.extend(params);
                full
            }
            None => params,
        }
    }

    async fn invoke<T: DeserializeOwned>(&self, method: &str, params: Vec<Value>) -> Aria2Result<T> {
        let value = self.backend.call(method, self.params(params)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// `aria2.addUri` - returns the new GID.
    pub(crate) async fn add_uri(&self, uris: &[String], dir: &str, out: &str) -> Aria2Result<String> {
        let mut options = serde_json::Map::new();
        if !dir.is_empty() {
            options.insert("dir".to_string(), json!(dir));
        }
        options.insert("out".to_string(), json!(out));

        self.invoke("aria2.addUri", vec![json!(uris), Value::Object(options)])
            .await
    }

    /// `aria2.tellStatus` restricted to the fields the downloader reads.
    pub(crate) async fn tell_status(&self, gid: &str) -> Aria2Result<Aria2Status> {
        self.invoke("aria2.tellStatus", vec![json!(gid), json!(STATUS_KEYS)])
            .await
    }

    /// `aria2.pause` - returns the GID.
    pub(crate) async fn pause(&self, gid: &str) -> Aria2Result<String> {
        self.invoke("aria2.pause", vec![json!(gid)]).await
    }

    /// `aria2.unpause` - returns the GID.
    pub(crate) async fn unpause(&self, gid: &str) -> Aria2Result<String> {
        self.invoke("aria2.unpause", vec![json!(gid)]).await
    }

    /// `aria2.forceRemove` - returns the GID.
    pub(crate) async fn force_remove(&self, gid: &str) -> Aria2Result<String> {
        self.invoke("aria2.forceRemove", vec![json!(gid)]).await
    }

    /// `aria2.removeDownloadResult` - returns `"OK"`.
    pub(crate) async fn remove_download_result(&self, gid: &str) -> Aria2Result<String> {
        self.invoke("aria2.removeDownloadResult", vec![json!(gid)])
            .await
    }

    /// `aria2.getVersion`.
    pub(crate) async fn get_version(&self) -> Aria2Result<Aria2Version> {
        self.invoke("aria2.getVersion", vec![]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Aria2Error;
    use crate::http::testing::{CannedResponse, FakeBackend};

    fn client(backend: FakeBackend, secret: Option<&str>) -> Aria2Client<FakeBackend> {
        Aria2Client::with_backend(backend, secret.map(String::from))
    }

    #[tokio::test]
    async fn test_add_uri_sends_dir_and_out() {
        let backend = FakeBackend::new().with_response(
            "aria2.addUri",
            CannedResponse::Result(json!("2089b05ecca3d829")),
        );
        let client = client(backend.clone(), None);

        let gid = client
            .add_uri(&["https://example.com/a.iso".to_string()], "/dl", "a.iso")
            .await
            .unwrap();

        assert_eq!(gid, "2089b05ecca3d829");
        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].params[0], json!(["https://example.com/a.iso"]));
        assert_eq!(calls[0].params[1], json!({"dir": "/dl", "out": "a.iso"}));
    }

    #[tokio::test]
    async fn test_add_uri_omits_empty_dir() {
        let backend =
            FakeBackend::new().with_response("aria2.addUri", CannedResponse::Result(json!("g")));
        let client = client(backend.clone(), None);

        client
            .add_uri(&["https://example.com/a".to_string()], "", "a")
            .await
            .unwrap();

        assert_eq!(backend.calls()[0].params[1], json!({"out": "a"}));
    }

    #[tokio::test]
    async fn test_secret_is_prepended() {
        let backend =
            FakeBackend::new().with_response("aria2.pause", CannedResponse::Result(json!("g")));
        let client = client(backend.clone(), Some("s3cret"));

        client.pause("g").await.unwrap();

        assert_eq!(
            backend.calls()[0].params,
            vec![json!("token:s3cret"), json!("g")]
        );
    }

    #[tokio::test]
    async fn test_tell_status_requests_keys() {
        let backend = FakeBackend::new().with_response(
            "aria2.tellStatus",
            CannedResponse::Result(json!({
                "gid": "g",
                "status": "paused",
                "totalLength": "100",
                "completedLength": "40",
                "downloadSpeed": "0"
            })),
        );
        let client = client(backend.clone(), None);

        let status = client.tell_status("g").await.unwrap();

        assert_eq!(status.status, "paused");
        assert_eq!(status.completed_length, 40);
        assert_eq!(backend.calls()[0].params[1], json!(STATUS_KEYS));
    }

    #[tokio::test]
    async fn test_unexpected_result_shape_is_json_error() {
        let backend =
            FakeBackend::new().with_response("aria2.tellStatus", CannedResponse::Result(json!(42)));
        let client = client(backend, None);

        let err = client.tell_status("g").await.unwrap_err();
        assert!(matches!(err, Aria2Error::JsonParse(_)));
    }

    #[tokio::test]
    async fn test_control_calls_use_expected_methods() {
        let backend = FakeBackend::new()
            .with_response("aria2.unpause", CannedResponse::Result(json!("g")))
            .with_response("aria2.forceRemove", CannedResponse::Result(json!("g")))
            .with_response("aria2.removeDownloadResult", CannedResponse::Result(json!("OK")));
        let client = client(backend.clone(), None);

        client.unpause("g").await.unwrap();
        client.force_remove("g").await.unwrap();
        assert_eq!(client.remove_download_result("g").await.unwrap(), "OK");

        let methods: Vec<String> = backend.calls().into_iter().map(|c| c.method).collect();
        assert_eq!(
            methods,
            vec!["aria2.unpause", "aria2.forceRemove", "aria2.removeDownloadResult"]
        );
    }

    #[test]
    fn test_default_client_rejects_bad_endpoint() {
        let config = Aria2ClientConfig::new().with_endpoint("::nope::");
        let result = DefaultAria2Client::new(&config);
        assert!(matches!(result, Err(DaemonError::Configuration { .. })));
    }
}
