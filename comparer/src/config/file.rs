use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Threshold as written in a config file, either `20` or `"20"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThresholdSetting {
    Number(i64),
    Text(String),
}

impl ThresholdSetting {
    pub fn into_text(self) -> String {
        match self {
            ThresholdSetting::Number(n) => n.to_string(),
            ThresholdSetting::Text(text) => text,
        }
    }
}

/// Contents of an optional TOML config file; every key may be omitted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub endpoints: Option<Vec<String>>,
    pub threshold: Option<ThresholdSetting>,
    pub insecure: Option<bool>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub rpc_timeout_seconds: Option<u64>,
}

impl FileConfig {
    pub async fn load(path: &Path) -> Result<Self> {
        debug!("Loading config file: {}", path.display());

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config {}: {}", path.display(), e))?;

        toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config {}: {}", path.display(), e))
    }
}
