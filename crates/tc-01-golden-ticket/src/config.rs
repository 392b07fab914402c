//! Configuration types for the golden ticket lottery

use serde::Deserialize;
use shared_types::Decimal8;

/// Lottery and policy parameters
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GoldenTicketConfig {
    /// Divisor applied to the treasury to get each block's coinbase
    pub genesis_period: u64,

    /// Difficulty change per non-zero vote
    pub difficulty_step: Decimal8,

    /// Paysplit change per non-zero vote
    pub paysplit_step: Decimal8,

    /// Random nonces tried per solver search before giving up
    pub solver_attempts: u64,
}

impl Default for GoldenTicketConfig {
    fn default() -> Self {
        Self {
            genesis_period: crate::DEFAULT_GENESIS_PERIOD,
            difficulty_step: Decimal8::from_raw(1_000_000),
            paysplit_step: Decimal8::from_raw(10_000),
            solver_attempts: 100_000,
        }
    }
}
