//! # Node Container
//!
//! Holds the chain, the mempool and their adapters, wired once at startup.

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, NodeConfig};
pub use subsystems::NodeContainer;
