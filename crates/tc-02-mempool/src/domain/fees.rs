//! Fee-market arithmetic.

use shared_types::{BlockHeader, Decimal8, PendingTransaction, PublicKey, Timestamp};

/// Burn fee still required `now`, decaying linearly since `latest`.
///
/// `max(0, burn_fee - fee_step * elapsed_ms)`.
pub fn fees_needed(latest: &BlockHeader, now: Timestamp) -> Decimal8 {
    let elapsed = i64::try_from(now.saturating_sub(latest.timestamp)).unwrap_or(i64::MAX);
    match latest.fee_step.checked_mul(Decimal8::from_int(elapsed)) {
        Some(decay) => (latest.burn_fee - decay).max_zero(),
        None => Decimal8::ZERO,
    }
}

/// Shortfall before a block can be bundled; `<= 0` means bundle.
pub fn bundling_fees_needed(needed: Decimal8, available: Decimal8) -> Decimal8 {
    needed - available.max_zero()
}

/// Fee of a transaction usable by a given block creator.
pub trait UsableFeeStrategy: Send + Sync {
    /// Fee `tx` contributes if `viewer` creates the block.
    fn usable_fee(&self, tx: &PendingTransaction, viewer: &PublicKey) -> Decimal8;
}

/// Every transaction contributes its full fee to any creator.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatFeeStrategy;

impl UsableFeeStrategy for FlatFeeStrategy {
    fn usable_fee(&self, tx: &PendingTransaction, _viewer: &PublicKey) -> Decimal8 {
        tx.fee
    }
}
