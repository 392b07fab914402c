//! Mempool error types.
//!
//! Every variant is a reason an item was not admitted or a step was
//! skipped. None of them is fatal to the node.

use shared_types::{BlockHash, EntityError, Signature};
use thiserror::Error;

/// Result type alias for mempool operations.
pub type Result<T> = std::result::Result<T, MempoolError>;

/// Mempool error type.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MempoolError {
    /// Transaction with this signature is already queued.
    #[error("Duplicate transaction: {0}")]
    DuplicateTransaction(Signature),

    /// Transaction failed the structural checks.
    #[error("Malformed transaction: {0}")]
    MalformedTransaction(String),

    /// Admitting the transaction would exceed the byte cap.
    #[error("Transaction pool full: {current} + {size} > {cap} bytes")]
    TransactionPoolFull { current: u64, size: u64, cap: u64 },

    /// A same-tip golden ticket is already queued and wins arbitration.
    #[error("Golden ticket outbid by queued ticket {0}")]
    GoldenTicketOutbid(Signature),

    /// External input validation rejected the transaction.
    #[error("Transaction validation failed: {0}")]
    ValidationFailed(String),

    /// Block with this hash is already queued.
    #[error("Duplicate block: {0}")]
    DuplicateBlock(BlockHash),

    /// Block failed the structural checks.
    #[error("Invalid block: {0}")]
    InvalidBlock(String),

    /// Admitting the block would exceed the byte cap.
    #[error("Block queue full: {current} + {size} > {cap} bytes")]
    BlockQueueFull { current: u64, size: u64, cap: u64 },

    /// Download queue is at its task limit.
    #[error("Download queue full at {capacity} tasks")]
    DownloadQueueFull { capacity: usize },

    /// Fetched payload exceeds the download byte cap.
    #[error("Download too large: {size} > {cap} bytes")]
    DownloadTooLarge { size: u64, cap: u64 },

    /// Payload could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] EntityError),

    /// Queued fees do not sum within the decimal range.
    #[error("Fee sum overflow")]
    FeeOverflow,

    /// Peer transport failed or timed out.
    #[error("Network error: {0}")]
    Network(String),

    /// Chain collaborator failed.
    #[error("Chain error: {0}")]
    Chain(String),

    /// Block builder failed.
    #[error("Block builder error: {0}")]
    Builder(String),

    /// Wallet could not produce a transaction.
    #[error("Wallet error: {0}")]
    Wallet(String),
}
