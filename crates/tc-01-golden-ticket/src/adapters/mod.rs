//! Adapters for outbound ports

pub mod crypto;

pub use crypto::Ed25519SolutionCrypto;
