//! Mock JSON-RPC server for testing node interactions
//!
//! This simulates an Ethereum node's `eth_getBlockByNumber` answers without
//! requiring a real node.

use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, method},
    Mock, MockServer, ResponseTemplate,
};

/// Mock RPC server that simulates blockchain node responses
pub struct MockRpcServer {
    pub server: MockServer,
    pub base_url: String,
}

impl MockRpcServer {
    /// Create a new mock RPC server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    /// Start a server that already reports `number` as its latest block
    pub async fn with_latest_block(number: &str) -> Self {
        let rpc = Self::start().await;
        rpc.mock_latest_block(number).await;
        rpc
    }

    /// Mock a synced node answering the latest block request
    pub async fn mock_latest_block(&self, number: &str) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "jsonrpc": "2.0",
                "method": "eth_getBlockByNumber",
                "params": ["latest", false]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {
                    "number": number,
                    "hash": "0x88e96d4537bea4d9c05d12549907b32561d3bf31f45aae734cdc119f13406cb6",
                    "transactions": []
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a node answering with a JSON-RPC error object
    pub async fn mock_rpc_error(&self, code: i64, message: &str) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {
                    "code": code,
                    "message": message
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a node that has no latest block to report
    pub async fn mock_null_result(&self) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": null
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock unhealthy node (HTTP failure)
    pub async fn mock_unhealthy(&self) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&self.server)
            .await;
    }

    /// Mock a node returning a body that is not JSON-RPC
    pub async fn mock_garbage(&self) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&self.server)
            .await;
    }
}
