// File: comparer/src/main.rs
use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use comparer::web::start_web_server;
use comparer::{Cli, ComparerError, Config, HeightComparator};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("comparer=info".parse()?)
        .add_directive("tower_http=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?)
        .add_directive("tungstenite=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let config = match Config::from_cli(cli).await {
        Ok(config) => config,
        Err(e) => {
            if let Some(e) = e.downcast_ref::<ComparerError>() {
                log_configuration_errors(e);
            }
            return Err(e);
        }
    };

    let comparator = match HeightComparator::new(
        &config.endpoint1,
        &config.endpoint2,
        &config.threshold,
        &config.rpc_settings(),
    ) {
        Ok(comparator) => Arc::new(comparator),
        Err(e) => {
            log_configuration_errors(&e);
            return Err(e.into());
        }
    };

    if config.insecure {
        info!("TLS certificate verification disabled for RPC connections");
    }
    info!(
        "Comparing block heights from {} and {}, erroring when difference is greater than {}",
        config.endpoint1,
        config.endpoint2,
        comparator.threshold()
    );

    start_web_server(&config, comparator).await?;

    Ok(())
}

fn log_configuration_errors(e: &ComparerError) {
    for cause in e.errors().iter() {
        error!("Invalid configuration: {}", cause);
    }
}
