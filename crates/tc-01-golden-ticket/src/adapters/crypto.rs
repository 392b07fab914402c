//! SHA-256 / Ed25519 implementation of [`SolutionCrypto`]

use crate::error::Result;
use crate::ports::SolutionCrypto;
use shared_crypto::{sha256_hex, verify_hex, Ed25519KeyPair};

/// Solution crypto backed by `shared-crypto`
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519SolutionCrypto;

impl SolutionCrypto for Ed25519SolutionCrypto {
    fn hash(&self, data: &str) -> String {
        sha256_hex(data.as_bytes())
    }

    fn sign(&self, message: &str, private_key: &str) -> Result<String> {
        let keypair = Ed25519KeyPair::from_hex_seed(private_key)?;
        Ok(keypair.sign(message.as_bytes()).to_hex())
    }

    fn verify(&self, message: &str, signature: &str, public_key: &str) -> bool {
        verify_hex(public_key, message.as_bytes(), signature).is_ok()
    }
}
