//! Outbound (Driven) ports for the Mempool subsystem.
//!
//! Collaborators the pool depends on. Slow or I/O bound calls are async;
//! everything consulted inside a bundling decision is synchronous.

use crate::domain::Result;
use async_trait::async_trait;
use shared_types::{
    CandidateBlock, ChainBlock, Decimal8, PeerInfo, PendingBlock, PendingTransaction, PublicKey,
    Timestamp, Vote,
};

/// Read access to the indexed chain.
pub trait ChainReader: Send + Sync {
    /// Latest indexed block, if any.
    fn latest_block(&self) -> Option<ChainBlock>;

    /// Whether a block with this hash is indexed.
    fn is_hash_indexed(&self, hash: &str) -> bool;

    /// Number of indexed blocks.
    fn indexed_block_count(&self) -> usize;
}

/// Chain application.
#[async_trait]
pub trait ChainWriter: Send + Sync {
    /// Applies a block. `force` skips re-validation for blocks this node
    /// built. Returns whether the block was committed and may be purged.
    async fn add_block_to_blockchain(&self, block: PendingBlock, force: bool) -> Result<bool>;
}

/// Input validation for admitted transactions.
#[async_trait]
pub trait TransactionValidator: Send + Sync {
    /// `Ok` when the transaction's inputs are spendable.
    async fn validate_inputs(&self, tx: &PendingTransaction) -> Result<()>;
}

/// Peer networking.
#[async_trait]
pub trait PeerNetwork: Send + Sync {
    /// Relays a transaction to peers.
    async fn propagate_transaction(&self, tx: &PendingTransaction) -> Result<()>;

    /// Currently connected peers (inbound and outbound).
    fn connected_peer_count(&self) -> usize;

    /// Peers this node is configured to dial.
    fn configured_peers(&self) -> Vec<PeerInfo>;

    /// This node's own server endpoint, if it runs one.
    fn local_endpoint(&self) -> Option<PeerInfo>;
}

/// Single-attempt block retrieval.
#[async_trait]
pub trait BlockFetcher: Send + Sync {
    /// Raw block bytes for `hash` from `peer`.
    ///
    /// A payload longer than `max_bytes` fails with
    /// [`MempoolError::DownloadTooLarge`](crate::MempoolError::DownloadTooLarge)
    /// before more than `max_bytes` of it are buffered.
    async fn fetch_block(&self, peer: &PeerInfo, hash: &str, max_bytes: u64) -> Result<Vec<u8>>;
}

/// Final block construction.
#[async_trait]
pub trait BlockBuilder: Send + Sync {
    /// Turns a candidate on top of `prevblk` into a finished block.
    async fn bundle_block(&self, candidate: CandidateBlock, prevblk: &ChainBlock) -> Result<PendingBlock>;
}

/// The node's own wallet.
pub trait Wallet: Send + Sync {
    fn public_key(&self) -> PublicKey;

    /// Fee-capture transaction paying `amount` to this wallet.
    fn create_fee_transaction(&self, amount: Decimal8) -> Result<PendingTransaction>;
}

/// The node's paysplit preference.
pub trait PaysplitVoter: Send + Sync {
    fn paysplit_vote(&self, current: Decimal8) -> Vote;
}

/// Creator-side fee figures for a candidate block.
pub trait FeeOracle: Send + Sync {
    /// Usable fees the creator may claim beyond the burn fee; negative when
    /// the candidate does not cover it.
    fn creator_surplus(&self, candidate: &CandidateBlock, prevblk: &ChainBlock, now: Timestamp) -> Decimal8;
}

/// Node readiness (e.g. not mid-sync).
pub trait ReadinessMonitor: Send + Sync {
    fn ready_to_bundle(&self) -> bool;
}

/// Time source for consistent timestamp handling.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Returns the current timestamp in milliseconds.
    fn now(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Mock time source for testing.
#[cfg(test)]
pub struct MockTimeSource {
    time: std::sync::atomic::AtomicU64,
}

#[cfg(test)]
impl MockTimeSource {
    pub fn new(initial: Timestamp) -> Self {
        Self {
            time: std::sync::atomic::AtomicU64::new(initial),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.time.fetch_add(ms, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn set(&self, time: Timestamp) {
        self.time.store(time, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.time.load(std::sync::atomic::Ordering::SeqCst)
    }
}
