//! JSON-RPC over a websocket connection
//!
//! The connection is opened on the first call and then kept for later calls.
//! Calls are serialised on it; a failed call drops the connection so the
//! next one dials again.

use futures::{SinkExt, StreamExt};
use reqwest::Url;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{
    connect_async_tls_with_config, Connector, MaybeTlsStream, WebSocketStream,
};
use tracing::debug;

use super::types::{RpcRequest, RpcResponse};
use super::{RpcClientError, RpcSettings};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct WsTransport {
    url: Url,
    tls: Option<native_tls::TlsConnector>,
    stream: Mutex<Option<WsStream>>,
}

impl WsTransport {
    pub fn new(url: Url, settings: &RpcSettings) -> Result<Self, RpcClientError> {
        let tls = if url.scheme() == "wss" && settings.insecure {
            let connector = native_tls::TlsConnector::builder()
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true)
                .build()
                .map_err(|e| RpcClientError::TlsSetup(e.to_string()))?;
            Some(connector)
        } else {
            None
        };

        Ok(Self {
            url,
            tls,
            stream: Mutex::new(None),
        })
    }

    async fn connect(&self) -> Result<WsStream, RpcClientError> {
        debug!("Opening websocket connection to {}", self.url);
        let connector = self.tls.clone().map(Connector::NativeTls);
        let (stream, _) = connect_async_tls_with_config(self.url.as_str(), None, false, connector)
            .await
            .map_err(|e| RpcClientError::WebSocket(e.to_string()))?;
        Ok(stream)
    }

    /// Sends one request and waits for the response carrying the same id
    pub async fn request(&self, request: &RpcRequest<'_>) -> Result<RpcResponse, RpcClientError> {
        let body =
            serde_json::to_string(request).map_err(|e| RpcClientError::WebSocket(e.to_string()))?;

        let mut slot = self.stream.lock().await;
        let mut stream = match slot.take() {
            Some(stream) => stream,
            None => self.connect().await?,
        };

        let response = exchange(&mut stream, body, request.id).await?;
        *slot = Some(stream);
        Ok(response)
    }
}

async fn exchange(
    stream: &mut WsStream,
    body: String,
    id: u64,
) -> Result<RpcResponse, RpcClientError> {
    stream
        .send(Message::Text(body))
        .await
        .map_err(|e| RpcClientError::WebSocket(e.to_string()))?;

    while let Some(message) = stream.next().await {
        let payload = match message.map_err(|e| RpcClientError::WebSocket(e.to_string()))? {
            Message::Text(text) => text.into_bytes(),
            Message::Binary(bytes) => bytes,
            Message::Close(_) => break,
            _ => continue,
        };

        let response: RpcResponse = serde_json::from_slice(&payload)
            .map_err(|e| RpcClientError::InvalidResponse(e.to_string()))?;

        // Subscription notifications carry no id
        if response.id == Value::from(id) {
            return Ok(response);
        }
    }

    Err(RpcClientError::WebSocket("connection closed before response".to_string()))
}
