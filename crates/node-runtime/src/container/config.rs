//! # Node Configuration
//!
//! Unified configuration for the subsystems and runtime parameters.
//!
//! ## Sources (later wins)
//!
//! 1. Built-in defaults
//! 2. JSON file named by `TC_CONFIG`
//! 3. `TC_*` environment overrides

use serde::Deserialize;
use shared_types::{Decimal8, PeerInfo};
use std::path::{Path, PathBuf};
use tc_01_golden_ticket::GoldenTicketConfig;
use tc_02_mempool::{MempoolConfig, NodeMode};
use thiserror::Error;

/// Environment variable naming the JSON config file.
pub const CONFIG_PATH_ENV: &str = "TC_CONFIG";

/// Complete node configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Network configuration.
    pub network: NetworkConfig,
    /// Mempool configuration.
    pub mempool: MempoolConfig,
    /// Golden ticket lottery configuration.
    pub golden_ticket: GoldenTicketConfig,
    /// Parameters of the first block.
    pub genesis: GenesisParams,
    /// Voting targets.
    pub voting: VotingConfig,
    /// Wallet configuration.
    pub wallet: WalletConfig,
    /// Golden ticket mining.
    pub mining: MiningConfig,
}

impl NodeConfig {
    /// Loads defaults, then the `TC_CONFIG` file, then `TC_*` overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Reads a JSON config file. Missing sections take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Applies `TC_*` overrides read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(host) = lookup("TC_HOST") {
            self.network.host = host;
        }
        if let Some(port) = lookup("TC_PORT") {
            self.network.port = parse_env("TC_PORT", &port)?;
        }
        if let Some(key) = lookup("TC_PRIVATE_KEY") {
            self.wallet.private_key = Some(key);
        }
        if let Some(mode) = lookup("TC_NODE_MODE") {
            self.mempool.node_mode = match mode.to_ascii_lowercase().as_str() {
                "full" => NodeMode::Full,
                "light" => NodeMode::Light,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        name: "TC_NODE_MODE",
                        value: mode,
                    })
                }
            };
        }
        if let Some(mining) = lookup("TC_MINING") {
            self.mining.enabled = parse_env("TC_MINING", &mining)?;
        }
        Ok(())
    }

    /// This node as a peer record.
    pub fn local_endpoint(&self) -> PeerInfo {
        PeerInfo {
            host: self.network.host.clone(),
            port: self.network.port,
            publickey: String::new(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidEnv {
        name,
        value: value.to_string(),
    })
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Cannot read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for [`NodeConfig`].
    #[error("Cannot parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    /// An environment override has an unusable value.
    #[error("Invalid value {value:?} for {name}")]
    InvalidEnv { name: &'static str, value: String },

    /// The wallet key is not a 32-byte hex seed.
    #[error("Invalid wallet key: {0}")]
    InvalidKey(String),

    /// The block download client could not be built.
    #[error("Cannot build HTTP client: {0}")]
    HttpClient(String),
}

/// Network configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Host this node serves blocks on.
    pub host: String,
    /// Port this node serves blocks on.
    pub port: u16,
    /// Peers to connect to at startup.
    pub peers: Vec<PeerInfo>,
    /// Capacity of the transaction relay channel.
    pub relay_capacity: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 12101,
            peers: Vec::new(),
            relay_capacity: 1024,
        }
    }
}

/// Header values of the first block.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenesisParams {
    pub difficulty: Decimal8,
    pub paysplit: Decimal8,
    pub burn_fee: Decimal8,
    /// Burn fee decay per millisecond.
    pub fee_step: Decimal8,
    pub treasury: Decimal8,
}

impl Default for GenesisParams {
    fn default() -> Self {
        Self {
            difficulty: Decimal8::ZERO,
            paysplit: Decimal8::from_raw(50_000_000),
            burn_fee: Decimal8::from_int(2),
            fee_step: Decimal8::from_raw(16_500),
            treasury: Decimal8::from_int(2_868_100_000),
        }
    }
}

/// Values the node votes toward.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VotingConfig {
    pub target_difficulty: Decimal8,
    pub target_paysplit: Decimal8,
}

impl Default for VotingConfig {
    fn default() -> Self {
        Self {
            target_difficulty: Decimal8::ZERO,
            target_paysplit: Decimal8::from_raw(50_000_000),
        }
    }
}

/// Wallet configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Hex Ed25519 seed; a fresh key is generated when absent.
    pub private_key: Option<String>,
}

/// Golden ticket mining configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    /// Search for golden tickets on every new tip.
    pub enabled: bool,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
