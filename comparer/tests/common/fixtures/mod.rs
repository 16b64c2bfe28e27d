//! This module provides reusable test utilities:
//! - Mock JSON-RPC node servers over HTTP and websocket
//! - In-process height clients with fixed or failing answers

// Not every test binary uses every fixture
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mock_rpc;
pub mod mock_ws_rpc;
pub mod test_clients;

// Re-export commonly used items
pub use mock_rpc::MockRpcServer;
pub use mock_ws_rpc::MockWsRpcServer;
pub use test_clients::{ErrorHeightClient, FixedHeightClient};
