//! Error types for the golden ticket subsystem

use shared_types::DecimalError;
use thiserror::Error;

/// Result type alias for golden ticket operations
pub type Result<T> = std::result::Result<T, GoldenTicketError>;

/// Reasons a golden ticket cannot be created or does not validate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoldenTicketError {
    /// Previous or current block was not supplied
    #[error("Missing block")]
    MissingBlock,

    /// Previous or current block is not well formed
    #[error("Invalid block: {0}")]
    InvalidBlock(String),

    /// Block carries no solution
    #[error("Missing solution")]
    MissingSolution,

    /// Solution payload could not be parsed
    #[error("Malformed solution: {0}")]
    Malformed(String),

    /// Integer difficulty: hash suffix does not match the previous block hash
    #[error("Hash suffix mismatch: need last {digits} digits of {target}")]
    HashMismatch {
        /// Number of trailing hex digits compared
        digits: usize,
        /// Hash being solved
        target: String,
    },

    /// Fractional difficulty: hash digit below the required bucket
    #[error("Hash not low enough for difficulty {0}")]
    DifficultyNotMet(String),

    /// Signature does not match the signature source
    #[error("Invalid solution signature")]
    InvalidSignature,

    /// Paysplit vote differs from the previous block's vote
    #[error("Paysplit vote mismatch: expected {expected}, got {actual}")]
    PaysplitVoteMismatch {
        /// Vote recorded on the previous block
        expected: i8,
        /// Vote carried by the solution
        actual: i8,
    },

    /// Miner share differs from the recomputed value
    #[error("Miner share mismatch: expected {expected}, got {actual}")]
    MinerShareMismatch {
        /// Recomputed share
        expected: String,
        /// Share carried by the solution
        actual: String,
    },

    /// Node share differs from the recomputed value
    #[error("Node share mismatch: expected {expected}, got {actual}")]
    NodeShareMismatch {
        /// Recomputed share
        expected: String,
        /// Share carried by the solution
        actual: String,
    },

    /// Treasury differs from the monetary policy
    #[error("Treasury invalid: expected {expected}, got {actual}")]
    TreasuryMismatch {
        /// Policy treasury
        expected: String,
        /// Block treasury
        actual: String,
    },

    /// Coinbase differs from the monetary policy
    #[error("Coinbase invalid: expected {expected}, got {actual}")]
    CoinbaseMismatch {
        /// Policy coinbase
        expected: String,
        /// Block coinbase
        actual: String,
    },

    /// Decimal arithmetic failed
    #[error("Decimal error: {0}")]
    Decimal(#[from] DecimalError),

    /// Signing backend failed
    #[error("Crypto error: {0}")]
    Crypto(String),
}

impl From<shared_crypto::CryptoError> for GoldenTicketError {
    fn from(err: shared_crypto::CryptoError) -> Self {
        Self::Crypto(err.to_string())
    }
}
