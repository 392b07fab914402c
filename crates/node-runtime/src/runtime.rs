//! # Node Runtime
//!
//! Owns the container and the golden ticket miner and drives their
//! lifecycle.
//!
//! ## Startup Sequence
//!
//! 1. Schedule the mempool's bundling loop (after its startup delay)
//! 2. Start the golden ticket miner, if enabled
//! 3. Start the relay and status reporters

use crate::container::{ConfigError, NodeConfig, NodeContainer};
use crate::miner::GoldenTicketMiner;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tc_02_mempool::PeerNetwork;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

const STATUS_INTERVAL: Duration = Duration::from_secs(30);

/// The node runtime orchestrating the subsystems.
pub struct NodeRuntime {
    container: Arc<NodeContainer>,
    miner: Arc<GoldenTicketMiner>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl NodeRuntime {
    pub fn new(config: NodeConfig) -> Result<Self, ConfigError> {
        info!("Creating Ticket-Chain node runtime");
        Ok(Self::with_container(NodeContainer::new(config)?))
    }

    pub fn with_container(container: NodeContainer) -> Self {
        let container = Arc::new(container);
        let miner = Arc::new(GoldenTicketMiner::new(
            container.chain.clone(),
            container.mempool.clone(),
            container.wallet.clone(),
            container.voter.clone(),
            container.crypto.clone(),
            container.config.golden_ticket.solver_attempts,
        ));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            container,
            miner,
            shutdown_tx,
            shutdown_rx,
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Start the node runtime.
    pub async fn start(&self) {
        let config = &self.container.config;
        info!("===========================================");
        info!("  Ticket-Chain Node Runtime v{}", env!("CARGO_PKG_VERSION"));
        info!("  Mode: {:?}", config.mempool.node_mode);
        info!("===========================================");

        self.container.mempool.initialize();

        if config.mining.enabled {
            self.miner.start();
        } else {
            info!("Golden ticket mining disabled");
        }

        let mut tasks = self.tasks.lock();
        tasks.push(self.spawn_relay_reporter());
        tasks.push(self.spawn_status_reporter());

        info!("Endpoint: {}:{}", config.network.host, config.network.port);
        info!("Configured peers: {}", config.network.peers.len());
    }

    fn spawn_relay_reporter(&self) -> JoinHandle<()> {
        let mut relay = self.container.network.subscribe_relay();
        let network = self.container.network.clone();
        let mut shutdown = self.shutdown_rx.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown.changed() => break,
                    received = relay.recv() => match received {
                        Ok(tx) => debug!(
                            "Relaying transaction {} to {} peers",
                            tx.sig,
                            network.connected_peer_count()
                        ),
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            debug!("Relay reporter skipped {} transactions", skipped);
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                }
            }
        })
    }

    fn spawn_status_reporter(&self) -> JoinHandle<()> {
        let container = self.container.clone();
        let mut shutdown = self.shutdown_rx.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(STATUS_INTERVAL);
            loop {
                tokio::select! {
                    _ = shutdown.changed() => break,
                    _ = ticker.tick() => {
                        let status = container.mempool.status();
                        info!(
                            "Height {} | {} transactions ({} bytes) | {} blocks queued | {} downloads | fees needed {}",
                            container.chain.height(),
                            status.transactions,
                            status.transaction_bytes,
                            status.blocks,
                            status.downloads,
                            status.bundling_fees_needed
                        );
                    }
                }
            }
        })
    }

    /// Shutdown the node gracefully.
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }
        self.miner.stop();
        self.container.mempool.shutdown();

        let tasks: Vec<_> = self.tasks.lock().drain(..).collect();
        for task in tasks {
            let _ = task.await;
        }

        info!("Shutdown complete");
    }

    pub fn container(&self) -> Arc<NodeContainer> {
        Arc::clone(&self.container)
    }

    pub fn miner(&self) -> Arc<GoldenTicketMiner> {
        Arc::clone(&self.miner)
    }
}
