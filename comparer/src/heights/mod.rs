//! Block height comparison
//!
//! This module fetches the latest block from two nodes and checks that their
//! heights are within a configured distance of each other.

pub mod client;
pub mod comparator;
pub mod types;

pub use client::{HeightClient, RemoteHeightClient};
pub use comparator::{Evaluation, HeightComparator};
pub use types::{BlockHeight, ComparisonResult, EndpointHeight, HealthOutcome, Threshold};
