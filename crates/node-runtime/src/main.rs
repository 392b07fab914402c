//! # Ticket-Chain Node Runtime
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG`, default `info`)
//! 2. Load configuration (defaults, `TC_CONFIG` file, `TC_*` overrides)
//! 3. Wire the node container
//! 4. Start the mempool loops and the golden ticket miner
//! 5. Run until Ctrl+C, then shut down

use anyhow::{Context, Result};
use node_runtime::{NodeConfig, NodeRuntime};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let config = NodeConfig::load().context("Failed to load node configuration")?;
    let runtime = NodeRuntime::new(config).context("Failed to initialize node")?;
    runtime.start().await;

    info!("Node is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await;

    Ok(())
}
