pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod heights;
pub mod rpc;
pub mod web;

// Re-export commonly used types
pub use cli::Cli;
pub use config::Config;
pub use errors::{ComparerError, ErrorList, ProbeError};
pub use heights::{HeightClient, HeightComparator, RemoteHeightClient};
pub use rpc::RpcSettings;
