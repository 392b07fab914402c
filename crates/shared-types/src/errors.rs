//! # Error Types
//!
//! Errors raised while decoding shared entities.

use thiserror::Error;

/// Errors decoding pool and chain records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    /// JSON payload could not be decoded.
    #[error("Decode failed: {0}")]
    Decode(String),

    /// Vote outside `-1 | 0 | 1`.
    #[error("Invalid vote: {0} (expected -1, 0 or 1)")]
    InvalidVote(i8),
}
