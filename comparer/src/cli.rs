//! Command line arguments

use clap::Parser;
use std::path::PathBuf;

/// Compares the latest block heights of two Ethereum JSON-RPC nodes
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "comparer")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    comparer http://10.180.0.2:8545 http://172.16.0.2:8545
    comparer -t 5 --insecure https://node-a:8545 localhost:8545
    comparer --config comparer.toml

GET /heights answers 200 when the heights are within the threshold, 500 when
they are not, and 502 when either node cannot be reached."#)]
pub struct Cli {
    /// RPC address of the first node
    pub endpoint1: Option<String>,

    /// RPC address of the second node
    pub endpoint2: Option<String>,

    /// Difference in the block height before returning error [default: 20]
    #[arg(short, long, allow_hyphen_values = true)]
    pub threshold: Option<String>,

    /// Skip verification of the server's certificate chain and host name (useful for self-signed certs)
    #[arg(long, default_value_t = false)]
    pub insecure: bool,

    /// Bind address [default: 0.0.0.0]
    #[arg(short = 'H', long, env = "COMPARER_HOST")]
    pub host: Option<String>,

    /// Listen port [default: 8080]
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Timeout for each RPC request in seconds, 0 to disable [default: 10]
    #[arg(long)]
    pub rpc_timeout_seconds: Option<u64>,

    /// TOML configuration file; command line values take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
