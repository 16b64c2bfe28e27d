//! Block height values and comparison result structures

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ProbeError;

/// Latest block height reported by a node, decoded from a JSON-RPC quantity
///
/// Quantities are `0x`-prefixed hex with no leading zeros (`0x0`, `0x1a`).
/// Heights are unbounded, so they are kept as big integers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct BlockHeight(BigUint);

impl BlockHeight {
    pub fn new(value: impl Into<BigUint>) -> Self {
        Self(value.into())
    }

    pub fn from_hex(text: &str) -> Result<Self, String> {
        if text.is_empty() {
            return Err("empty hex string".to_string());
        }
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .ok_or_else(|| format!("hex string '{}' without 0x prefix", text))?;
        if digits.is_empty() {
            return Err("hex string \"0x\"".to_string());
        }
        if digits.len() > 1 && digits.starts_with('0') {
            return Err(format!("hex number '{}' with leading zero digits", text));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("invalid hex string '{}'", text));
        }
        BigUint::parse_bytes(digits.as_bytes(), 16)
            .map(Self)
            .ok_or_else(|| format!("invalid hex string '{}'", text))
    }

    /// Absolute distance between two heights
    pub fn difference(&self, other: &BlockHeight) -> BigUint {
        if self.0 >= other.0 {
            &self.0 - &other.0
        } else {
            &other.0 - &self.0
        }
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl Serialize for BlockHeight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BlockHeight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        BlockHeight::from_hex(&text).map_err(de::Error::custom)
    }
}

/// Largest tolerated difference between the two heights
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Threshold(BigUint);

impl Threshold {
    pub fn new(value: impl Into<BigUint>) -> Self {
        Self(value.into())
    }

    /// Parses a non-negative base-10 integer made only of ASCII digits
    pub fn parse(text: &str) -> Result<Self, ProbeError> {
        let invalid = |reason: &str| ProbeError::InvalidThreshold {
            value: text.to_string(),
            reason: reason.to_string(),
        };

        if text.is_empty() {
            return Err(invalid("must not be empty"));
        }
        if let Some(rest) = text.strip_prefix('-') {
            if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid("must not be negative"));
            }
        }
        if !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("not a base-10 integer"));
        }

        BigUint::from_str(text)
            .map(Self)
            .map_err(|e| invalid(&e.to_string()))
    }

    /// Inclusive: a difference equal to the threshold is still healthy
    pub fn classify(&self, difference: &BigUint) -> HealthOutcome {
        if difference > &self.0 {
            HealthOutcome::ThresholdExceeded
        } else {
            HealthOutcome::Healthy
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Verdict for one comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthOutcome {
    Healthy,
    ThresholdExceeded,
}

impl HealthOutcome {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthOutcome::Healthy)
    }
}

/// Block object returned by `eth_getBlockByNumber`; only the height is read
#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    pub number: BlockHeight,
}

/// One node's address and the height it reported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointHeight {
    pub url: String,
    pub number: BlockHeight,
}

/// Diagnostic payload returned for every completed comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub difference: String,
    pub threshold: String,
    pub endpoints: Vec<EndpointHeight>,
}
