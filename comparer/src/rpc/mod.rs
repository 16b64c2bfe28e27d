//! Minimal JSON-RPC client over HTTP or websocket
//!
//! One [`JsonRpcClient`] talks to one node. Building it validates the address
//! and sets up the transport for its scheme; no traffic is sent until
//! [`JsonRpcClient::call`].

pub mod types;
pub mod websocket;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use types::{RpcRequest, RpcResponse};
use websocket::WsTransport;

/// Transport options applied to every outbound RPC connection
#[derive(Debug, Clone, Default)]
pub struct RpcSettings {
    /// Skip TLS certificate and host name verification
    pub insecure: bool,
    /// Per-request timeout; `None` leaves requests unbounded
    pub timeout: Option<Duration>,
}

#[derive(Debug, Error)]
pub enum RpcClientError {
    #[error("empty endpoint address")]
    EmptyAddress,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("no known transport for URL scheme \"{0}\"")]
    UnsupportedScheme(String),

    #[error("failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("failed to set up TLS: {0}")]
    TlsSetup(String),

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("websocket error: {0}")]
    WebSocket(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP {0}")]
    Status(StatusCode),

    #[error("invalid JSON-RPC response: {0}")]
    InvalidResponse(String),

    #[error("{message} (code {code})")]
    Remote { code: i64, message: String },

    #[error("not found")]
    NoResult,

    #[error("failed to decode result: {0}")]
    Decode(#[source] serde_json::Error),
}

enum Transport {
    Http(Client),
    WebSocket(WsTransport),
}

pub struct JsonRpcClient {
    transport: Transport,
    url: Url,
    timeout: Option<Duration>,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    /// Validates `address` and prepares the transport for its scheme
    pub fn dial(address: &str, settings: &RpcSettings) -> Result<Self, RpcClientError> {
        if address.is_empty() {
            return Err(RpcClientError::EmptyAddress);
        }

        let url = Url::parse(address).map_err(|e| RpcClientError::InvalidUrl(e.to_string()))?;
        let transport = match url.scheme() {
            "http" | "https" => {
                let mut builder = Client::builder().danger_accept_invalid_certs(settings.insecure);
                if let Some(timeout) = settings.timeout {
                    builder = builder.timeout(timeout);
                }
                Transport::Http(builder.build().map_err(RpcClientError::ClientBuild)?)
            }
            "ws" | "wss" => Transport::WebSocket(WsTransport::new(url.clone(), settings)?),
            other => return Err(RpcClientError::UnsupportedScheme(other.to_string())),
        };

        Ok(Self {
            transport,
            url,
            timeout: settings.timeout,
            next_id: AtomicU64::new(1),
        })
    }

    /// Calls `method` with `params` and decodes the `result` member into `T`
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, RpcClientError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::new(id, method, params);
        debug!("RPC {} #{} -> {}", method, id, self.url);

        let rpc_response = match &self.transport {
            Transport::Http(http) => self.post(http, &request).await?,
            Transport::WebSocket(ws) => match self.timeout {
                Some(limit) => tokio::time::timeout(limit, ws.request(&request))
                    .await
                    .map_err(|_| RpcClientError::Timeout(limit))??,
                None => ws.request(&request).await?,
            },
        };

        if let Some(error) = rpc_response.error {
            return Err(RpcClientError::Remote {
                code: error.code,
                message: error.message,
            });
        }

        match rpc_response.result {
            None | Some(Value::Null) => Err(RpcClientError::NoResult),
            Some(result) => serde_json::from_value(result).map_err(RpcClientError::Decode),
        }
    }

    async fn post(
        &self,
        http: &Client,
        request: &RpcRequest<'_>,
    ) -> Result<RpcResponse, RpcClientError> {
        let response = http
            .post(self.url.clone())
            .json(request)
            .send()
            .await
            .map_err(RpcClientError::Transport)?;

        if !response.status().is_success() {
            return Err(RpcClientError::Status(response.status()));
        }

        let body = response.bytes().await.map_err(RpcClientError::Transport)?;
        serde_json::from_slice(&body).map_err(|e| RpcClientError::InvalidResponse(e.to_string()))
    }
}
