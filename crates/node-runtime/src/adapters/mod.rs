//! # Subsystem Adapters
//!
//! Outbound port implementations that connect the mempool (tc-02) and the
//! golden ticket lottery (tc-01) to this node.
//!
//! | Adapter | Implements |
//! |---------|------------|
//! | [`InMemoryChain`] | `ChainReader`, `ChainWriter` |
//! | [`ChainBlockBuilder`] | `BlockBuilder` |
//! | [`ChainInputValidator`] | `TransactionValidator` |
//! | [`PeerRegistry`] | `PeerNetwork` |
//! | [`HttpBlockFetcher`] | `BlockFetcher` |
//! | [`LocalWallet`] | `Wallet` |
//! | [`TargetVoter`] | `PaysplitVoter`, `DifficultyVoter` |
//! | [`ChainFeeOracle`] | `FeeOracle` |
//! | [`SyncMonitor`] | `ReadinessMonitor` |

pub mod builder;
pub mod chain;
pub mod network;
pub mod policy;
pub mod validator;
pub mod wallet;

pub use builder::{compute_block_hash, derive_parameters, BlockParameters, ChainBlockBuilder};
pub use chain::InMemoryChain;
pub use network::{HttpBlockFetcher, PeerRegistry};
pub use policy::{ChainFeeOracle, SyncMonitor, TargetVoter};
pub use validator::ChainInputValidator;
pub use wallet::LocalWallet;
