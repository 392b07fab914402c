//! # Ticket-Chain - Golden Ticket Lottery (Subsystem 01)
//!
//! **Bounded Context:** Proof-of-solution & payout selection
//!
//! ## Purpose
//!
//! A golden ticket is a signed proof that its holder found a nonce whose
//! hash meets the difficulty of the latest block. This crate:
//! - Creates and signs solutions, splitting block revenue between the
//!   solver (`miner_share`) and a drawn contender (`node_share`)
//! - Validates solutions: difficulty, signature, paysplit vote, shares
//! - Applies the voted difficulty/paysplit adjustments
//! - Computes the per-block emission (treasury and coinbase)
//! - Draws the node-share recipient from the contender set
//!
//! ## Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Adapters: Ed25519SolutionCrypto                    │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Ports: SolutionCrypto, DifficultyVoter             │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain: difficulty, policy, ticket, lottery        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Critical Invariants
//!
//! 1. **Exact Shares**: `miner_share + node_share == total_revenue`
//! 2. **Stable Signature Source**: creator and validator sign/verify the
//!    same bytes
//! 3. **Immutability**: a solution is never changed after it is signed

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod solver;

mod config;
mod error;

pub use config::GoldenTicketConfig;
pub use error::{GoldenTicketError, Result};

pub use adapters::Ed25519SolutionCrypto;
pub use domain::{
    calculate_difficulty, calculate_monetary_policy, calculate_paysplit, calculate_shares,
    find_winners, meets_difficulty, validate_monetary_policy, validate_solution, GoldenTicket,
    MonetaryPolicy, RevenueShares,
};
pub use ports::{DifficultyVoter, SolutionCrypto};
pub use solver::GoldenTicketSolver;

/// Default divisor of the treasury emitted per block
pub const DEFAULT_GENESIS_PERIOD: u64 = 10_000;
