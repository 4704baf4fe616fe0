//! JSON-RPC transport abstraction.
//!
//! The client talks to a `RpcBackend` so tests can script daemon answers.
//! The production backend posts JSON-RPC 2.0 envelopes with reqwest and a
//! hard per-call timeout. It never retries.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::Aria2ClientConfig;
use crate::error::{Aria2Error, Aria2Result};
use crate::models::{RpcRequest, RpcResponse};

// ============================================================================
// RPC Backend Trait
// ============================================================================

/// Trait for transports that can execute one JSON-RPC call.
///
/// `params` are sent as-is; the client has already prepended the secret.
#[async_trait]
pub trait RpcBackend: Send + Sync {
    /// Execute `method` and return the `result` member of the response.
    async fn call(&self, method: &str, params: Vec<Value>) -> Aria2Result<Value>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production backend: HTTP POST to the aria2 `/jsonrpc` endpoint.
pub struct ReqwestBackend {
    client: reqwest::Client,
    endpoint: Url,
    next_id: AtomicU64,
}

impl ReqwestBackend {
    /// Create a backend for the configured endpoint.
    pub fn new(config: &Aria2ClientConfig) -> Aria2Result<Self> {
        let endpoint = Url::parse(&config.endpoint)?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            endpoint,
            next_id: AtomicU64::new(1),
        })
    }

    fn request_id(&self) -> String {
        format!("rdt-{}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

/// Turn a decoded envelope into the call result.
fn unwrap_envelope(response: RpcResponse) -> Aria2Result<Value> {
    if let Some(error) = response.error {
        return Err(Aria2Error::Rpc {
            code: error.code,
            message: error.message,
        });
    }
    response.result.ok_or_else(|| Aria2Error::InvalidResponse {
        message: "response has neither result nor error".to_string(),
    })
}

#[async_trait]
impl RpcBackend for ReqwestBackend {
    async fn call(&self, method: &str, params: Vec<Value>) -> Aria2Result<Value> {
        let request = RpcRequest::new(self.request_id(), method, &params);
        debug!(method, id = %request.id, "aria2 rpc call");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(Aria2Error::from_reqwest)?;

        let status = response.status();
        let body = response.bytes().await.map_err(Aria2Error::from_reqwest)?;

        // aria2 answers JSON-RPC errors with HTTP 400, so try the envelope first.
        match serde_json::from_slice::<RpcResponse>(&body) {
            Ok(envelope) => unwrap_envelope(envelope),
            Err(_) if !status.is_success() => Err(Aria2Error::Http {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            }),
            Err(err) => Err(err.into()),
        }
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex};

    /// Canned answer for one call.
    #[derive(Clone, Debug)]
    pub enum CannedResponse {
        Result(Value),
        RpcError { code: i64, message: String },
        Timeout,
    }

    /// A recorded call.
    #[derive(Clone, Debug, PartialEq)]
    pub struct RecordedCall {
        pub method: String,
        pub params: Vec<Value>,
    }

    /// A fake backend that answers per method and records every call.
    ///
    /// Responses queued for a method are consumed in order; the last one is
    /// repeated once the queue has a single entry left.
    #[derive(Clone, Default)]
    pub struct FakeBackend {
        responses: Arc<Mutex<HashMap<String, VecDeque<CannedResponse>>>>,
        calls: Arc<Mutex<Vec<RecordedCall>>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a response for a method.
        pub fn with_response(self, method: &str, response: CannedResponse) -> Self {
            self.responses
                .lock()
                .unwrap()
                .entry(method.to_string())
                .or_default()
                .push_back(response);
            self
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }

        fn next_response(&self, method: &str) -> Option<CannedResponse> {
            let mut responses = self.responses.lock().unwrap();
            let queue = responses.get_mut(method)?;
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        }
    }

    #[async_trait]
    impl RpcBackend for FakeBackend {
        async fn call(&self, method: &str, params: Vec<Value>) -> Aria2Result<Value> {
            self.calls.lock().unwrap().push(RecordedCall {
                method: method.to_string(),
                params,
            });

            match self.next_response(method) {
                Some(CannedResponse::Result(value)) => Ok(value),
                Some(CannedResponse::RpcError { code, message }) => {
                    Err(Aria2Error::Rpc { code, message })
                }
                Some(CannedResponse::Timeout) => Err(Aria2Error::Timeout),
                None => Err(Aria2Error::Rpc {
                    code: 1,
                    message: format!("No such method: {method}"),
                }),
            }
        }
    }
}
