//! Node construction and polling helpers shared by the scenarios.

use async_trait::async_trait;
use node_runtime::adapters::InMemoryChain;
use node_runtime::{GoldenTicketMiner, NodeConfig, NodeContainer};
use shared_types::{ChainBlock, PeerInfo};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tc_02_mempool::{BlockFetcher, ChainReader, MempoolConfig, MempoolError, Result, SystemTimeSource};

/// Config of a test node with fast loops and a fixed key.
pub fn node_config(seed: u8, port: u16) -> NodeConfig {
    let mut config = NodeConfig::default();
    config.mempool = MempoolConfig::for_testing();
    config.network.port = port;
    config.wallet.private_key = Some(format!("{:02x}", seed).repeat(32));
    config
}

/// A node with HTTP downloads; for scenarios that never fetch.
pub fn node(seed: u8, port: u16) -> NodeContainer {
    NodeContainer::new(node_config(seed, port)).expect("node container")
}

/// A node that downloads blocks from in-process peers.
pub fn node_with_peers(seed: u8, port: u16, fetcher: PeerChainFetcher) -> NodeContainer {
    NodeContainer::with_parts(node_config(seed, port), Arc::new(fetcher), Arc::new(SystemTimeSource))
        .expect("node container")
}

/// A miner over the node's own chain, wallet and mempool.
pub fn miner(node: &NodeContainer) -> Arc<GoldenTicketMiner> {
    Arc::new(GoldenTicketMiner::new(
        node.chain.clone(),
        node.mempool.clone(),
        node.wallet.clone(),
        node.voter.clone(),
        node.crypto.clone(),
        node.config.golden_ticket.solver_attempts,
    ))
}

/// Polls `condition` every 10ms, failing after 5s.
pub async fn wait_until(what: &str, condition: impl Fn() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(tokio::time::Instant::now() < deadline, "timed out waiting for {}", what);
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Waits until `node`'s chain reaches `height` and returns the tip.
pub async fn wait_for_height(node: &NodeContainer, height: u64) -> ChainBlock {
    wait_until(&format!("height {}", height), || node.chain.height() >= height).await;
    node.chain.latest_block().expect("tip")
}

/// Serves blocks straight out of other nodes' chains, keyed by port.
#[derive(Default)]
pub struct PeerChainFetcher {
    peers: HashMap<u16, Arc<InMemoryChain>>,
}

impl PeerChainFetcher {
    pub fn with_peer(mut self, peer: &PeerInfo, chain: Arc<InMemoryChain>) -> Self {
        self.peers.insert(peer.port, chain);
        self
    }
}

#[async_trait]
impl BlockFetcher for PeerChainFetcher {
    async fn fetch_block(&self, peer: &PeerInfo, hash: &str, max_bytes: u64) -> Result<Vec<u8>> {
        let chain = self
            .peers
            .get(&peer.port)
            .ok_or_else(|| MempoolError::Network(format!("unknown peer {}", peer.port)))?;
        let block = chain
            .block_body(hash)
            .ok_or_else(|| MempoolError::Network(format!("404 for block {}", hash)))?;
        let bytes = serde_json::to_vec(&block).map_err(|e| MempoolError::Network(e.to_string()))?;
        if bytes.len() as u64 > max_bytes {
            return Err(MempoolError::DownloadTooLarge {
                size: bytes.len() as u64,
                cap: max_bytes,
            });
        }
        Ok(bytes)
    }
}
