//! # Mempool Subsystem
//!
//! **Subsystem ID:** tc-02
//!
//! ## Purpose
//!
//! Holds everything a node has heard about but not yet committed: pending
//! transactions, candidate blocks waiting for the chain, and blocks still
//! to be downloaded from peers. Decides on a timer whether enough fees
//! have accumulated to bundle a block of its own.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | No duplicate transaction signatures | `domain/pool.rs` - `check_admissible()` |
//! | Byte caps on transactions, blocks, downloads | `domain/pool.rs` - `insert_transaction()`, `add_block()`; downloads via `BlockFetcher::fetch_block(max_bytes)` |
//! | One golden ticket per chain tip | `domain/pool.rs` - `arbitrate_golden_ticket()` |
//! | One download task per hash | `domain/pool.rs` - `enqueue_download()` |
//! | Blocks leave the queue only after commit | `service.rs` - `process_tick()` |
//! | At most one loop body in flight per loop | `domain/guards.rs` - `LoopGuard` |
//!
//! ## Control Loops
//!
//! ```text
//! fetch_block ──► [downloads] ──download tick──► add_block ──► [blocks]
//!                                                                 │
//!          bundling tick ──► bundle_block ──► add_block ──────────┤
//!                                                                 ▼
//!                                            process tick ──► chain ──► clear_mempool
//! ```
//!
//! ## Outbound Dependencies
//!
//! | Port | Purpose |
//! |------|---------|
//! | `ChainReader` / `ChainWriter` | Latest block, hash index, block commit |
//! | `TransactionValidator` | Input validation of admitted transactions |
//! | `PeerNetwork` | Relay, peer counts, configured peers |
//! | `BlockFetcher` | Block download from a peer |
//! | `BlockBuilder` | Finalizes an assembled candidate |
//! | `Wallet` | Node key, fee-capture transactions |
//! | `PaysplitVoter` / `FeeOracle` | Vote and creator surplus for assembly |
//! | `ReadinessMonitor` | Mid-sync gate for bundling |

pub mod domain;
mod metrics;
pub mod ports;
pub mod service;

pub use domain::{
    BundleDecision, DownloadTask, FlatFeeStrategy, MempoolConfig, MempoolError, MempoolStatus,
    NodeMode, PoolState, Result, UsableFeeStrategy,
};
pub use metrics::Metrics;
pub use ports::{
    BlockBuilder, BlockFetcher, ChainReader, ChainWriter, FeeOracle, MempoolApi, PaysplitVoter,
    PeerNetwork, ReadinessMonitor, SystemTimeSource, TimeSource, TransactionValidator, Wallet,
};
pub use service::{Mempool, MempoolPorts};
