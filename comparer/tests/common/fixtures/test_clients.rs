//! Height clients that answer without any network traffic

use async_trait::async_trait;
use comparer::heights::BlockHeight;
use comparer::{HeightClient, ProbeError};

/// Always reports the same height
pub struct FixedHeightClient {
    pub endpoint: String,
    pub height: BlockHeight,
}

impl FixedHeightClient {
    pub fn boxed(endpoint: &str, height: u64) -> Box<dyn HeightClient> {
        Box::new(Self {
            endpoint: endpoint.to_string(),
            height: BlockHeight::new(height),
        })
    }
}

#[async_trait]
impl HeightClient for FixedHeightClient {
    async fn fetch_latest(&self) -> Result<BlockHeight, ProbeError> {
        Ok(self.height.clone())
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Always fails the fetch
pub struct ErrorHeightClient {
    pub endpoint: String,
}

impl ErrorHeightClient {
    pub fn boxed(endpoint: &str) -> Box<dyn HeightClient> {
        Box::new(Self {
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl HeightClient for ErrorHeightClient {
    async fn fetch_latest(&self) -> Result<BlockHeight, ProbeError> {
        Err(ProbeError::Call {
            endpoint: self.endpoint.clone(),
            method: "eth_getBlockByNumber".to_string(),
            reason: "errorClient".to_string(),
        })
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
