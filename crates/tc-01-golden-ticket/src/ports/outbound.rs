//! Outbound ports (driven side - SPI)

use crate::error::Result;
use shared_types::{Decimal8, Vote};

/// Port: hashing and signing for solutions
///
/// All inputs and outputs are hex strings, matching how solutions travel.
pub trait SolutionCrypto: Send + Sync {
    /// Lowercase hex digest of `data`
    fn hash(&self, data: &str) -> String;

    /// Sign `message` with a hex-encoded private key
    fn sign(&self, message: &str, private_key: &str) -> Result<String>;

    /// Verify a hex signature over `message` by a hex public key
    fn verify(&self, message: &str, signature: &str, public_key: &str) -> bool;
}

/// Port: the node's difficulty preference
pub trait DifficultyVoter: Send + Sync {
    /// Vote on the difficulty given its current value
    fn difficulty_vote(&self, current: Decimal8) -> Vote;
}
