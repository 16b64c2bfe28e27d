pub mod file;

use anyhow::Result;
use serde::Serialize;
use std::time::Duration;

pub use file::{FileConfig, ThresholdSetting};

use crate::cli::Cli;
use crate::constants::{comparison, rpc, server};
use crate::errors::{ComparerError, ErrorList, ProbeError};
use crate::heights::{RemoteHeightClient, Threshold};
use crate::rpc::RpcSettings;

/// Startup configuration after merging the command line over the config file
///
/// The threshold stays in text form; the comparator validates it together
/// with the endpoints so every problem is reported at once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub endpoint1: String,
    pub endpoint2: String,
    pub threshold: String,
    pub insecure: bool,
    pub host: String,
    pub port: u16,
    pub rpc_timeout_seconds: u64,
}

impl Config {
    /// Loads the file named by `--config`, if any, and resolves against it
    pub async fn from_cli(cli: Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path).await?,
            None => FileConfig::default(),
        };
        Self::resolve(cli, file)
    }

    pub fn resolve(cli: Cli, file: FileConfig) -> Result<Self> {
        let endpoints: Vec<String> = match (cli.endpoint1, cli.endpoint2) {
            (Some(endpoint1), Some(endpoint2)) => vec![endpoint1, endpoint2],
            (None, None) => file.endpoints.unwrap_or_default(),
            _ => Vec::new(),
        };
        let threshold = cli
            .threshold
            .or_else(|| file.threshold.map(ThresholdSetting::into_text))
            .unwrap_or_else(|| comparison::DEFAULT_THRESHOLD.to_string());

        let [endpoint1, endpoint2]: [String; comparison::ENDPOINT_COUNT] =
            match endpoints.try_into() {
                Ok(pair) => pair,
                Err(endpoints) => return Err(Self::misconfigured(&endpoints, &threshold).into()),
            };

        Ok(Self {
            endpoint1,
            endpoint2,
            threshold,
            insecure: cli.insecure || file.insecure.unwrap_or(false),
            host: cli
                .host
                .or(file.host)
                .unwrap_or_else(|| server::DEFAULT_HOST.to_string()),
            port: cli.port.or(file.port).unwrap_or(server::DEFAULT_PORT),
            rpc_timeout_seconds: cli
                .rpc_timeout_seconds
                .or(file.rpc_timeout_seconds)
                .unwrap_or(rpc::DEFAULT_TIMEOUT_SECONDS),
        })
    }

    /// Reports the endpoint count together with whatever else is wrong
    fn misconfigured(endpoints: &[String], threshold: &str) -> ComparerError {
        let mut errors = ErrorList::new();
        errors.push(ProbeError::EndpointCount {
            expected: comparison::ENDPOINT_COUNT,
            found: endpoints.len(),
        });
        for endpoint in endpoints {
            errors.collect(RemoteHeightClient::new(endpoint, &RpcSettings::default()));
        }
        errors.collect(Threshold::parse(threshold));
        ComparerError::Configuration(errors)
    }

    pub fn rpc_settings(&self) -> RpcSettings {
        RpcSettings {
            insecure: self.insecure,
            timeout: (self.rpc_timeout_seconds > 0)
                .then(|| Duration::from_secs(self.rpc_timeout_seconds)),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_with_endpoints() -> Cli {
        Cli {
            endpoint1: Some("http://10.180.0.2:8545".to_string()),
            endpoint2: Some("localhost:8545".to_string()),
            ..Cli::default()
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let config = Config::resolve(cli_with_endpoints(), FileConfig::default()).unwrap();

        assert_eq!(config.endpoint1, "http://10.180.0.2:8545");
        assert_eq!(config.endpoint2, "localhost:8545");
        assert_eq!(config.threshold, "20");
        assert!(!config.insecure);
        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
        assert_eq!(config.rpc_settings().timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_resolve_cli_overrides_file() {
        let cli = Cli {
            threshold: Some("3".to_string()),
            port: Some(9100),
            ..cli_with_endpoints()
        };
        let file = FileConfig {
            endpoints: Some(vec!["http://x".to_string(), "http://y".to_string()]),
            threshold: Some(ThresholdSetting::Number(50)),
            insecure: Some(true),
            host: Some("127.0.0.1".to_string()),
            port: Some(9000),
            rpc_timeout_seconds: Some(0),
        };

        let config = Config::resolve(cli, file).unwrap();

        assert_eq!(config.endpoint1, "http://10.180.0.2:8545");
        assert_eq!(config.threshold, "3");
        assert!(config.insecure);
        assert_eq!(config.listen_addr(), "127.0.0.1:9100");
        assert_eq!(config.rpc_settings().timeout, None);
        assert!(config.rpc_settings().insecure);
    }

    #[test]
    fn test_resolve_endpoints_from_file() {
        let file = FileConfig {
            endpoints: Some(vec!["http://x".to_string(), "http://y".to_string()]),
            threshold: Some(ThresholdSetting::Text("7".to_string())),
            ..FileConfig::default()
        };

        let config = Config::resolve(Cli::default(), file).unwrap();

        assert_eq!(config.endpoint1, "http://x");
        assert_eq!(config.endpoint2, "http://y");
        assert_eq!(config.threshold, "7");
    }

    #[test]
    fn test_resolve_wrong_endpoint_count() {
        let one = Cli {
            endpoint1: Some("http://x".to_string()),
            ..Cli::default()
        };
        assert!(Config::resolve(one, FileConfig::default()).is_err());

        assert!(Config::resolve(Cli::default(), FileConfig::default()).is_err());

        let three = FileConfig {
            endpoints: Some(vec![
                "http://x".to_string(),
                "http://y".to_string(),
                "http://z".to_string(),
            ]),
            ..FileConfig::default()
        };
        let err = Config::resolve(Cli::default(), three).unwrap_err();
        assert!(err.to_string().contains("correct number of command line arguments"));
        assert!(err.to_string().contains("(3 given, 2 expected)"));
    }

    #[test]
    fn test_resolve_wrong_endpoint_count_reports_bad_threshold() {
        let cli = Cli {
            endpoint1: Some("http://10.180.0.2:8545".to_string()),
            threshold: Some("ninja".to_string()),
            ..Cli::default()
        };

        let err = Config::resolve(cli, FileConfig::default()).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("correct number of command line arguments"));
        assert!(message.contains("invalid threshold 'ninja'"));
        let err = err.downcast::<ComparerError>().unwrap();
        assert!(matches!(err, ComparerError::Configuration(_)));
        assert_eq!(err.errors().len(), 2);
    }

    #[test]
    fn test_resolve_wrong_endpoint_count_reports_bad_endpoints() {
        let file = FileConfig {
            endpoints: Some(vec!["12gibberish".to_string()]),
            ..FileConfig::default()
        };

        let err = Config::resolve(Cli::default(), file).unwrap_err();

        let err = err.downcast::<ComparerError>().unwrap();
        assert_eq!(err.errors().len(), 2);
        assert!(err.to_string().contains("12gibberish"));
    }
}
