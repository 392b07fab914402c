//! # Peer Network Adapters
//!
//! - [`PeerRegistry`]: peer bookkeeping and transaction relay fan-out
//! - [`HttpBlockFetcher`]: block download over HTTP

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{PeerInfo, PendingTransaction};
use std::collections::HashSet;
use std::time::Duration;
use tc_02_mempool::{BlockFetcher, MempoolError, PeerNetwork, Result};
use tokio::sync::broadcast;
use tracing::debug;

/// Known and connected peers.
///
/// Relayed transactions go out on a broadcast channel; the transport
/// subscribes with [`PeerRegistry::subscribe_relay`].
pub struct PeerRegistry {
    configured: Vec<PeerInfo>,
    local: PeerInfo,
    connected: RwLock<HashSet<PeerInfo>>,
    relay: broadcast::Sender<PendingTransaction>,
}

impl PeerRegistry {
    pub fn new(local: PeerInfo, configured: Vec<PeerInfo>, relay_capacity: usize) -> Self {
        let (relay, _) = broadcast::channel(relay_capacity.max(1));
        Self {
            configured,
            local,
            connected: RwLock::new(HashSet::new()),
            relay,
        }
    }

    pub fn connect(&self, peer: PeerInfo) {
        debug!("[node] Peer connected: {}:{}", peer.host, peer.port);
        self.connected.write().insert(peer);
    }

    pub fn disconnect(&self, peer: &PeerInfo) {
        if self.connected.write().remove(peer) {
            debug!("[node] Peer disconnected: {}:{}", peer.host, peer.port);
        }
    }

    pub fn subscribe_relay(&self) -> broadcast::Receiver<PendingTransaction> {
        self.relay.subscribe()
    }
}

#[async_trait]
impl PeerNetwork for PeerRegistry {
    async fn propagate_transaction(&self, tx: &PendingTransaction) -> Result<()> {
        if self.relay.send(tx.clone()).is_err() {
            debug!("[node] No relay subscribers for transaction {}", tx.sig);
        }
        Ok(())
    }

    fn connected_peer_count(&self) -> usize {
        self.connected.read().len()
    }

    fn configured_peers(&self) -> Vec<PeerInfo> {
        self.configured.clone()
    }

    fn local_endpoint(&self) -> Option<PeerInfo> {
        Some(self.local.clone())
    }
}

/// Downloads blocks from `GET /blocks/{hash}` on the peer.
///
/// The body is streamed and abandoned as soon as it exceeds the caller's
/// byte limit, whether or not the peer declared a length.
pub struct HttpBlockFetcher {
    client: reqwest::Client,
}

impl HttpBlockFetcher {
    pub fn new(timeout: Duration) -> std::result::Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl BlockFetcher for HttpBlockFetcher {
    async fn fetch_block(&self, peer: &PeerInfo, hash: &str, max_bytes: u64) -> Result<Vec<u8>> {
        let url = peer.block_url(hash);
        debug!("[node] Fetching block {} from {}", hash, url);

        let mut response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| network_error(&url, e))?;

        if let Some(declared) = response.content_length() {
            if declared > max_bytes {
                return Err(MempoolError::DownloadTooLarge {
                    size: declared,
                    cap: max_bytes,
                });
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| network_error(&url, e))? {
            let size = (body.len() + chunk.len()) as u64;
            if size > max_bytes {
                return Err(MempoolError::DownloadTooLarge { size, cap: max_bytes });
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

fn network_error(url: &str, e: reqwest::Error) -> MempoolError {
    MempoolError::Network(format!("{}: {}", url, e))
}
