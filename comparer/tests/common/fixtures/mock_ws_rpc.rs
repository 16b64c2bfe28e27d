//! In-process websocket JSON-RPC node
//!
//! Answers every request with a block at a fixed height. Before each answer
//! it pushes a subscription notification, which carries no id.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_tungstenite::{accept_async, tungstenite::protocol::Message};

pub struct MockWsRpcServer {
    pub base_url: String,
    connections: Arc<AtomicUsize>,
}

impl MockWsRpcServer {
    /// Start a node that reports `number` as its latest block
    pub async fn with_latest_block(number: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("ws://{}", listener.local_addr().unwrap());
        let connections = Arc::new(AtomicUsize::new(0));

        let number = number.to_string();
        let accepted = connections.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                accepted.fetch_add(1, Ordering::SeqCst);
                let number = number.clone();
                tokio::spawn(async move {
                    let Ok(mut ws) = accept_async(stream).await else {
                        return;
                    };
                    while let Some(Ok(message)) = ws.next().await {
                        let Message::Text(text) = message else {
                            continue;
                        };
                        let request: Value = serde_json::from_str(&text).unwrap();

                        let notification = json!({
                            "jsonrpc": "2.0",
                            "method": "eth_subscription",
                            "params": {"subscription": "0x1", "result": {"number": "0x0"}}
                        });
                        let response = json!({
                            "jsonrpc": "2.0",
                            "id": request["id"],
                            "result": {"number": number, "transactions": []}
                        });
                        if ws.send(Message::Text(notification.to_string())).await.is_err()
                            || ws.send(Message::Text(response.to_string())).await.is_err()
                        {
                            return;
                        }
                    }
                });
            }
        });

        Self {
            base_url,
            connections,
        }
    }

    /// Number of websocket connections accepted so far
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}
