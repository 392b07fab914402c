//! Mempool-local entities and configuration.

use serde::Deserialize;
use shared_types::{BlockHash, Decimal8, PeerInfo};

/// An in-flight block fetch. At most one exists per hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadTask {
    pub peer: PeerInfo,
    pub block_hash: BlockHash,
}

/// Participation class of the node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeMode {
    /// Stores and validates the full chain.
    #[default]
    Full,
    /// Lightweight client; never bundles before holding a block.
    Light,
}

/// Outcome of one bundling tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BundleDecision {
    /// Readiness monitor says the node is mid-sync.
    NotReady,
    /// Fees still short by this amount.
    FeesInsufficient(Decimal8),
    /// Queued fees overflowed when summed; the tick was skipped.
    FeeOverflow,
    /// Free block refused because the node has peers.
    FreeBlockRefused,
    /// Past genesis with neither a golden ticket nor a normal transaction.
    NothingToBundle,
    /// Light client without any indexed block.
    LightClientWithoutChain,
    /// A block is still waiting in the queue.
    BlocksQueued,
    /// Configured to bundle only on a golden ticket and none is queued.
    AwaitingGoldenTicket,
    /// Another assembly is in progress.
    AlreadyCreating,
    /// Assembly was attempted but the builder failed.
    BuildFailed(String),
    /// A block was assembled and queued.
    Bundled(BlockHash),
}

impl BundleDecision {
    pub fn is_bundled(&self) -> bool {
        matches!(self, Self::Bundled(_))
    }
}

/// Point-in-time view of the pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MempoolStatus {
    pub transactions: usize,
    pub normal_transactions: usize,
    pub blocks: usize,
    pub downloads: usize,
    pub transaction_bytes: u64,
    pub block_bytes: u64,
    pub bundling_fees_needed: Decimal8,
    pub bundling: bool,
}

/// Mempool configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MempoolConfig {
    /// Byte cap over queued transactions.
    pub transaction_size_cap: u64,
    /// Byte cap over queued blocks.
    pub block_size_cap: u64,
    /// Byte cap over the in-flight download payload.
    pub download_size_cap: u64,
    /// Maximum queued download tasks.
    pub max_queued_downloads: usize,
    /// Block-apply drain period (milliseconds).
    pub processing_speed_ms: u64,
    /// Download drain period (milliseconds).
    pub downloading_speed_ms: u64,
    /// Bundling check period (milliseconds).
    pub bundling_speed_ms: u64,
    /// Timeout of a single block fetch (milliseconds).
    pub download_timeout_ms: u64,
    /// Delay before the bundling loop starts (milliseconds).
    pub startup_delay_ms: u64,
    /// Participation class.
    pub node_mode: NodeMode,
    /// Bundle only when a golden ticket is queued (or the chain is empty).
    pub require_golden_ticket: bool,
}

impl Default for MempoolConfig {
    fn default() -> Self {
        Self {
            transaction_size_cap: 1_024_000_000,
            block_size_cap: 1_024_000_000,
            download_size_cap: 512_000_000,
            max_queued_downloads: 1024,
            processing_speed_ms: 50,
            downloading_speed_ms: 300,
            bundling_speed_ms: 400,
            download_timeout_ms: 5_000,
            startup_delay_ms: 1_000,
            node_mode: NodeMode::Full,
            require_golden_ticket: false,
        }
    }
}

impl MempoolConfig {
    /// Creates a config with fast loops for testing.
    pub fn for_testing() -> Self {
        Self {
            processing_speed_ms: 5,
            downloading_speed_ms: 5,
            bundling_speed_ms: 10,
            download_timeout_ms: 200,
            startup_delay_ms: 0,
            ..Default::default()
        }
    }

    /// Bundling period, never faster than the processing loop.
    pub fn effective_bundling_speed_ms(&self) -> u64 {
        if self.bundling_speed_ms < self.processing_speed_ms {
            self.processing_speed_ms + 100
        } else {
            self.bundling_speed_ms
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_caps() {
        let config = MempoolConfig::default();
        assert_eq!(config.transaction_size_cap, 1_024_000_000);
        assert_eq!(config.download_size_cap, 512_000_000);
        assert_eq!(config.effective_bundling_speed_ms(), 400);
    }

    #[test]
    fn test_bundling_never_outpaces_processing() {
        let config = MempoolConfig {
            bundling_speed_ms: 10,
            processing_speed_ms: 50,
            ..Default::default()
        };
        assert_eq!(config.effective_bundling_speed_ms(), 150);
    }

    #[test]
    fn test_config_from_json() {
        let config: MempoolConfig =
            serde_json::from_str(r#"{ "node_mode": "light", "block_size_cap": 10 }"#).unwrap();
        assert_eq!(config.node_mode, NodeMode::Light);
        assert_eq!(config.block_size_cap, 10);
        assert_eq!(config.processing_speed_ms, 50);
    }
}
