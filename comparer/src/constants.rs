//! Default configuration values

/// Listen address defaults
pub mod server {
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8080;

    /// Route polled by load balancers and monitors
    pub const HEIGHTS_ROUTE: &str = "/heights";
}

/// Comparison defaults
pub mod comparison {
    /// Tolerated block difference when none is configured
    pub const DEFAULT_THRESHOLD: &str = "20";

    /// Number of nodes compared
    pub const ENDPOINT_COUNT: usize = 2;
}

/// Outbound RPC defaults
pub mod rpc {
    /// Request timeout in seconds; 0 disables the timeout
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
}
