//! # Node Runtime Library
//!
//! Wires the mempool (tc-02) and the golden ticket lottery (tc-01) into a
//! runnable node. The main entry point is the `main.rs` binary.
//!
//! ## Modular Structure
//!
//! - `adapters/` - Port implementations: chain, builder, wallet, network
//! - `container/` - Configuration and dependency wiring
//! - `miner` - Golden ticket search on every new tip
//! - `runtime` - Startup and shutdown

pub mod adapters;
pub mod container;
pub mod miner;
pub mod runtime;

pub use container::{ConfigError, NodeConfig, NodeContainer};
pub use miner::GoldenTicketMiner;
pub use runtime::NodeRuntime;
