//! # Node Container
//!
//! Builds every adapter and the mempool in dependency order:
//!
//! ```text
//! Level 0: crypto, wallet, voter, time
//! Level 1: chain, peer registry, block fetcher
//! Level 2: block builder, input validator
//! Level 3: mempool (tc-02)
//! ```
//!
//! The golden ticket miner is started separately by the runtime and only
//! borrows from this container.

use crate::adapters::{
    ChainBlockBuilder, ChainFeeOracle, ChainInputValidator, HttpBlockFetcher, InMemoryChain, LocalWallet,
    PeerRegistry, SyncMonitor, TargetVoter,
};
use crate::container::config::{ConfigError, NodeConfig};
use std::sync::Arc;
use std::time::Duration;
use tc_01_golden_ticket::{Ed25519SolutionCrypto, SolutionCrypto};
use tc_02_mempool::{
    BlockFetcher, FlatFeeStrategy, Mempool, MempoolPorts, SystemTimeSource, TimeSource, Wallet,
};
use tracing::info;

/// Everything one node runs on.
pub struct NodeContainer {
    /// Node configuration (immutable after initialization).
    pub config: NodeConfig,
    pub chain: Arc<InMemoryChain>,
    pub network: Arc<PeerRegistry>,
    pub wallet: Arc<LocalWallet>,
    pub voter: Arc<TargetVoter>,
    pub monitor: Arc<SyncMonitor>,
    pub crypto: Arc<dyn SolutionCrypto>,
    pub mempool: Arc<Mempool>,
}

impl NodeContainer {
    /// Wires the node with HTTP block downloads and the system clock.
    pub fn new(config: NodeConfig) -> Result<Self, ConfigError> {
        let timeout = Duration::from_millis(config.mempool.download_timeout_ms);
        let fetcher = HttpBlockFetcher::new(timeout).map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Self::with_parts(config, Arc::new(fetcher), Arc::new(SystemTimeSource))
    }

    /// Wires the node around the given block fetcher and clock.
    pub fn with_parts(
        config: NodeConfig,
        fetcher: Arc<dyn BlockFetcher>,
        time: Arc<dyn TimeSource>,
    ) -> Result<Self, ConfigError> {
        info!("Initializing Ticket-Chain node container");

        let crypto: Arc<dyn SolutionCrypto> = Arc::new(Ed25519SolutionCrypto);
        let wallet = Arc::new(
            LocalWallet::from_config(config.wallet.private_key.as_deref())
                .map_err(|e| ConfigError::InvalidKey(e.to_string()))?,
        );
        let voter = Arc::new(TargetVoter::new(
            config.voting.target_difficulty,
            config.voting.target_paysplit,
        ));
        let monitor = Arc::new(SyncMonitor::default());
        info!("  Wallet: {}", wallet.public_key());

        let chain = Arc::new(InMemoryChain::new(config.golden_ticket.clone(), crypto.clone()));
        let network = Arc::new(PeerRegistry::new(
            config.local_endpoint(),
            config.network.peers.clone(),
            config.network.relay_capacity,
        ));
        info!("  Configured peers: {}", config.network.peers.len());

        let builder = Arc::new(ChainBlockBuilder::new(
            config.golden_ticket.clone(),
            config.genesis.clone(),
            time.clone(),
        ));
        let validator = Arc::new(ChainInputValidator::new(chain.clone(), crypto.clone()));

        let ports = MempoolPorts {
            chain_reader: chain.clone(),
            chain_writer: chain.clone(),
            validator,
            network: network.clone(),
            fetcher,
            builder,
            wallet: wallet.clone(),
            voter: voter.clone(),
            fee_oracle: Arc::new(ChainFeeOracle),
            fee_strategy: Arc::new(FlatFeeStrategy),
            monitor: monitor.clone(),
            time,
        };
        let mempool = Mempool::new(config.mempool.clone(), ports);

        Ok(Self {
            config,
            chain,
            network,
            wallet,
            voter,
            monitor,
            crypto,
            mempool,
        })
    }
}
