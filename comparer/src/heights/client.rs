//! Clients that report a node's latest block height

use async_trait::async_trait;
use serde_json::json;

use super::types::{Block, BlockHeight};
use crate::errors::ProbeError;
use crate::rpc::{JsonRpcClient, RpcSettings};

pub const LATEST_BLOCK_METHOD: &str = "eth_getBlockByNumber";

/// Source of the latest block height for one node
#[async_trait]
pub trait HeightClient: Send + Sync {
    /// Fetches the height of the node's latest block
    async fn fetch_latest(&self) -> Result<BlockHeight, ProbeError>;

    /// Address the client was configured with
    fn endpoint(&self) -> &str;
}

/// Rewrites a bare `localhost[:port]` address into an explicit `http://` URL
pub fn normalize_localhost(endpoint: &str) -> String {
    if endpoint.starts_with("localhost") {
        format!("http://{}", endpoint)
    } else {
        endpoint.to_string()
    }
}

/// [`HeightClient`] backed by a live JSON-RPC connection
pub struct RemoteHeightClient {
    rpc: JsonRpcClient,
    endpoint: String,
}

impl RemoteHeightClient {
    pub fn new(endpoint: &str, settings: &RpcSettings) -> Result<Self, ProbeError> {
        let rpc = JsonRpcClient::dial(&normalize_localhost(endpoint), settings).map_err(|e| {
            ProbeError::Connection {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            rpc,
            endpoint: endpoint.to_string(),
        })
    }

    /// Generic remote call, decoding the result into `T`
    pub async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, ProbeError> {
        self.rpc
            .call(method, params)
            .await
            .map_err(|e| ProbeError::Call {
                endpoint: self.endpoint.clone(),
                method: method.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl HeightClient for RemoteHeightClient {
    async fn fetch_latest(&self) -> Result<BlockHeight, ProbeError> {
        let block: Block = self
            .call(LATEST_BLOCK_METHOD, json!(["latest", false]))
            .await?;
        Ok(block.number)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
