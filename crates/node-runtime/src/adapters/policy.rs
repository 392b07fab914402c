//! Node-local policy: voting targets, creator surplus and sync readiness.

use shared_types::{CandidateBlock, ChainBlock, Decimal8, Timestamp, Vote};
use std::sync::atomic::{AtomicBool, Ordering};
use tc_01_golden_ticket::DifficultyVoter;
use tc_02_mempool::domain::fees_needed;
use tc_02_mempool::{FeeOracle, PaysplitVoter, ReadinessMonitor};

/// Votes every parameter toward a configured target.
#[derive(Clone, Copy, Debug)]
pub struct TargetVoter {
    target_difficulty: Decimal8,
    target_paysplit: Decimal8,
}

impl TargetVoter {
    pub fn new(target_difficulty: Decimal8, target_paysplit: Decimal8) -> Self {
        Self {
            target_difficulty,
            target_paysplit,
        }
    }

    fn toward(current: Decimal8, target: Decimal8) -> Vote {
        match current.cmp(&target) {
            std::cmp::Ordering::Greater => Vote::Decrease,
            std::cmp::Ordering::Less => Vote::Increase,
            std::cmp::Ordering::Equal => Vote::Hold,
        }
    }
}

impl DifficultyVoter for TargetVoter {
    fn difficulty_vote(&self, current: Decimal8) -> Vote {
        Self::toward(current, self.target_difficulty)
    }
}

impl PaysplitVoter for TargetVoter {
    fn paysplit_vote(&self, current: Decimal8) -> Vote {
        Self::toward(current, self.target_paysplit)
    }
}

/// Creator surplus is whatever the candidate's fees exceed the burn fee by.
///
/// Fees that overflow when summed leave no surplus to capture.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChainFeeOracle;

impl FeeOracle for ChainFeeOracle {
    fn creator_surplus(&self, candidate: &CandidateBlock, prevblk: &ChainBlock, now: Timestamp) -> Decimal8 {
        let needed = if prevblk.hash().is_empty() {
            Decimal8::ZERO
        } else {
            fees_needed(&prevblk.header, now)
        };
        Decimal8::checked_sum(candidate.transactions.iter().map(|tx| tx.fee))
            .and_then(|fees| fees.checked_sub(needed))
            .unwrap_or(Decimal8::ZERO)
    }
}

/// Tracks whether the node is still catching up with its peers.
#[derive(Debug, Default)]
pub struct SyncMonitor {
    syncing: AtomicBool,
}

impl SyncMonitor {
    pub fn set_syncing(&self, syncing: bool) {
        self.syncing.store(syncing, Ordering::SeqCst);
    }

    pub fn is_syncing(&self) -> bool {
        self.syncing.load(Ordering::SeqCst)
    }
}

impl ReadinessMonitor for SyncMonitor {
    fn ready_to_bundle(&self) -> bool {
        !self.is_syncing()
    }
}
