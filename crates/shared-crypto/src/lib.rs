//! # Shared Crypto - Hashing and Signatures
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256 | Golden ticket difficulty hashes |
//! | `signatures` | Ed25519 | Solution and transaction signing |
//!
//! Keys, digests and signatures cross crate boundaries as lowercase hex
//! strings, so every primitive here has a hex-facing entry point.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod signatures;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{sha256, sha256_hex, Sha256Hasher};
pub use signatures::{verify_hex, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
