//! Voted parameter adjustment and the emission schedule

use crate::error::{GoldenTicketError, Result};
use shared_types::{BlockHeader, Decimal8, Vote};

/// Treasury and coinbase for the block after a given one
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonetaryPolicy {
    pub treasury: Decimal8,
    pub coinbase: Decimal8,
}

/// Moves `current` one `step` in the direction of `vote`.
pub fn apply_vote(current: Decimal8, vote: Vote, step: Decimal8) -> Decimal8 {
    match vote {
        Vote::Decrease => current - step,
        Vote::Hold => current,
        Vote::Increase => current + step,
    }
}

/// Difficulty of the next block given the previous block's difficulty.
pub fn calculate_difficulty(prev_difficulty: Decimal8, vote: Vote, step: Decimal8) -> Decimal8 {
    apply_vote(prev_difficulty, vote, step)
}

/// Paysplit of the next block given the previous block's paysplit.
pub fn calculate_paysplit(prev_paysplit: Decimal8, vote: Vote, step: Decimal8) -> Decimal8 {
    apply_vote(prev_paysplit, vote, step)
}

/// Emission for the block after `prev`.
///
/// Reclaimed value refills the treasury, then `1/genesis_period` of it is
/// coined.
pub fn calculate_monetary_policy(prev: &BlockHeader, genesis_period: u64) -> Result<MonetaryPolicy> {
    let replenished = prev.treasury + prev.reclaimed;
    let coinbase = replenished.checked_div_int(genesis_period)?;
    Ok(MonetaryPolicy {
        treasury: replenished - coinbase,
        coinbase,
    })
}

/// Checks a block's adjusted treasury and coinbase against the policy.
pub fn validate_monetary_policy(
    treasury: Decimal8,
    coinbase: Decimal8,
    prev: &BlockHeader,
    genesis_period: u64,
) -> Result<()> {
    let expected = calculate_monetary_policy(prev, genesis_period)?;
    if expected.treasury != treasury {
        return Err(GoldenTicketError::TreasuryMismatch {
            expected: expected.treasury.to_string(),
            actual: treasury.to_string(),
        });
    }
    if expected.coinbase != coinbase {
        return Err(GoldenTicketError::CoinbaseMismatch {
            expected: expected.coinbase.to_string(),
            actual: coinbase.to_string(),
        });
    }
    Ok(())
}
