//! Compares the latest block heights of two nodes against a threshold

use num_bigint::BigUint;
use tracing::{error, info, warn};

use super::client::{HeightClient, RemoteHeightClient};
use super::types::{BlockHeight, ComparisonResult, EndpointHeight, HealthOutcome, Threshold};
use crate::errors::{ComparerError, ErrorList};
use crate::rpc::RpcSettings;

/// Result of one completed comparison
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub outcome: HealthOutcome,
    pub result: ComparisonResult,
}

/// Answers whether two nodes' block heights are within tolerance
///
/// The threshold and both clients are fixed at construction; every call to
/// [`HeightComparator::evaluate`] is an independent read.
pub struct HeightComparator {
    threshold: Threshold,
    client1: Box<dyn HeightClient>,
    client2: Box<dyn HeightClient>,
}

impl HeightComparator {
    /// Builds both RPC clients and parses the threshold
    ///
    /// Every problem found is reported in one configuration error.
    pub fn new(
        endpoint1: &str,
        endpoint2: &str,
        threshold: &str,
        settings: &RpcSettings,
    ) -> Result<Self, ComparerError> {
        let mut errors = ErrorList::new();
        let threshold = errors.collect(Threshold::parse(threshold));
        let client1 = errors.collect(RemoteHeightClient::new(endpoint1, settings));
        let client2 = errors.collect(RemoteHeightClient::new(endpoint2, settings));

        match (threshold, client1, client2) {
            (Some(threshold), Some(client1), Some(client2)) => Ok(Self::from_clients(
                Box::new(client1),
                Box::new(client2),
                threshold,
            )),
            _ => Err(ComparerError::Configuration(errors)),
        }
    }

    pub fn from_clients(
        client1: Box<dyn HeightClient>,
        client2: Box<dyn HeightClient>,
        threshold: Threshold,
    ) -> Self {
        Self {
            threshold,
            client1,
            client2,
        }
    }

    pub fn threshold(&self) -> &Threshold {
        &self.threshold
    }

    pub fn endpoints(&self) -> [&str; 2] {
        [self.client1.endpoint(), self.client2.endpoint()]
    }

    /// Fetches both heights and classifies their difference
    ///
    /// Fails with [`ComparerError::Upstream`] carrying every fetch error when
    /// either node cannot report a height.
    pub async fn evaluate(&self) -> Result<Evaluation, ComparerError> {
        let (latest1, latest2) =
            tokio::join!(self.client1.fetch_latest(), self.client2.fetch_latest());

        let (latest1, latest2) = match (latest1, latest2) {
            (Ok(latest1), Ok(latest2)) => (latest1, latest2),
            (latest1, latest2) => {
                let errors = ErrorList::combine([latest1.err(), latest2.err()])
                    .unwrap_or_default();
                warn!("Failed to fetch latest block heights: {}", errors);
                return Err(ComparerError::Upstream(errors));
            }
        };

        let difference = latest1.difference(&latest2);
        let outcome = self.threshold.classify(&difference);
        let result = self.build_result(latest1, latest2, &difference);
        log_result(&result, outcome);

        Ok(Evaluation { outcome, result })
    }

    pub fn build_result(
        &self,
        latest1: BlockHeight,
        latest2: BlockHeight,
        difference: &BigUint,
    ) -> ComparisonResult {
        ComparisonResult {
            difference: difference.to_string(),
            threshold: self.threshold.to_string(),
            endpoints: vec![
                EndpointHeight {
                    url: self.client1.endpoint().to_string(),
                    number: latest1,
                },
                EndpointHeight {
                    url: self.client2.endpoint().to_string(),
                    number: latest2,
                },
            ],
        }
    }
}

fn log_result(result: &ComparisonResult, outcome: HealthOutcome) {
    match serde_json::to_string(result) {
        Ok(json) => info!(
            difference = %result.difference,
            threshold = %result.threshold,
            healthy = outcome.is_healthy(),
            "{}",
            json
        ),
        Err(e) => error!("Unable to serialize comparison result to JSON: {}", e),
    }
}
