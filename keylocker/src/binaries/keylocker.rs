use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use keylocker::{ApiServer, NodeConfig};
use keylocker_registry::SharedRegistry;
use keylocker_utils::logging;
use tokio::select;
use tokio::signal;
use tokio::task::spawn;
use tracing::{info, warn};

#[derive(Parser, Debug)]
struct Cli {
    /// Path to the node configuration file.
    #[clap(long, default_value = "keylocker.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    let config = NodeConfig::read(&cli.config)
        .await
        .with_context(|| format!("could not read node config {:?}", cli.config))?;

    // the one-time deployment step; every serving path runs it
    let registry = SharedRegistry::new();
    registry.initialize()?;
    info!(address = %config.api.address, "key locker ready");

    let api = ApiServer::builder().registry(registry).build();

    select! {
        r = spawn(api.serve(config.api.address)) => r??,
        _ = signal::ctrl_c() => {
            warn!("received ctrl-c; shutting down");
        }
    }

    Ok(())
}
