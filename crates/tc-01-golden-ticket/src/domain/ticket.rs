//! Golden ticket creation and validation

use super::difficulty::{check_difficulty, DifficultyCheck};
use super::lottery;
use super::policy;
use crate::config::GoldenTicketConfig;
use crate::error::{GoldenTicketError, Result};
use crate::ports::{DifficultyVoter, SolutionCrypto};
use shared_types::{
    BlockHeader, ChainBlock, Decimal8, DecimalError, PendingBlock, PublicKey, Slip, Solution,
};
use tracing::{debug, warn};

/// Revenue a solution distributes, split between solver and node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevenueShares {
    pub total: Decimal8,
    pub miner: Decimal8,
    pub node: Decimal8,
}

/// Revenue released by solving `block`.
///
/// Burn fee plus the surplus the creator did not capture plus coinbase,
/// with the miner taking `paysplit` of it.
pub fn calculate_shares(block: &ChainBlock) -> Result<RevenueShares> {
    let fees = &block.fees;
    let total = fees
        .fees_needed
        .checked_add(fees.total_surplus)
        .and_then(|v| v.checked_add(block.header.coinbase))
        .and_then(|v| v.checked_sub(fees.creator_surplus))
        .ok_or(DecimalError::Overflow)?;
    let miner = total
        .checked_mul(block.header.paysplit)
        .ok_or(DecimalError::Overflow)?;
    let node = total.checked_sub(miner).ok_or(DecimalError::Overflow)?;
    Ok(RevenueShares { total, miner, node })
}

/// A golden ticket wrapping one solution
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GoldenTicket {
    pub solution: Solution,
}

impl GoldenTicket {
    pub fn new(solution: Solution) -> Self {
        Self { solution }
    }

    /// Parses a solution payload.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map(Self::new)
            .map_err(|e| GoldenTicketError::Malformed(e.to_string()))
    }

    /// Builds and signs a solution for `block_to_solve`.
    ///
    /// The caller has already found `random` such that the solution hash
    /// meets the block's difficulty.
    pub fn create_solution(
        block_to_solve: &ChainBlock,
        pubkey: &str,
        private_key: &str,
        random: &str,
        voter: &dyn DifficultyVoter,
        crypto: &dyn SolutionCrypto,
    ) -> Result<Self> {
        let shares = calculate_shares(block_to_solve)?;
        let header = &block_to_solve.header;

        let mut solution = Solution {
            target: header.hash.clone(),
            difficulty: header.difficulty,
            difficulty_vote: voter.difficulty_vote(header.difficulty),
            paysplit: header.paysplit,
            paysplit_vote: header.paysplit_vote,
            pubkey: pubkey.to_string(),
            random: random.to_string(),
            miner_share: shares.miner,
            node_share: shares.node,
            sig: String::new(),
        };
        solution.sig = crypto.sign(&solution.signature_source(), private_key)?;

        debug!(
            "[tc-01] Created solution for block {} (miner {}, node {})",
            header.id, solution.miner_share, solution.node_share
        );
        Ok(Self::new(solution))
    }

    /// Difficulty of the block this ticket produces.
    pub fn calculate_difficulty(&self, prev: &BlockHeader, config: &GoldenTicketConfig) -> Decimal8 {
        policy::calculate_difficulty(prev.difficulty, self.solution.difficulty_vote, config.difficulty_step)
    }

    /// Paysplit of the block this ticket produces.
    pub fn calculate_paysplit(&self, prev: &BlockHeader, config: &GoldenTicketConfig) -> Decimal8 {
        policy::calculate_paysplit(prev.paysplit, self.solution.paysplit_vote, config.paysplit_step)
    }

    /// Validates this ticket as the solution to `prevblk`, carried by `thisblk`.
    pub fn validate(
        &self,
        prevblk: Option<&ChainBlock>,
        thisblk: Option<&PendingBlock>,
        crypto: &dyn SolutionCrypto,
    ) -> Result<()> {
        validate_solution(Some(&self.solution), prevblk, thisblk, crypto)
    }

    /// Payout slips: solver first, drawn contender second.
    pub fn find_winners(&self, block_to_solve: &ChainBlock) -> [Slip; 2] {
        lottery::find_winners(&self.solution, &block_to_solve.contenders)
    }

    /// Solver's public key.
    pub fn solver(&self) -> &PublicKey {
        &self.solution.pubkey
    }
}

/// Full golden ticket validation.
///
/// Order of checks: inputs present, difficulty, signature, paysplit vote,
/// and the revenue shares when `prevblk` is the first block of the chain.
pub fn validate_solution(
    solution: Option<&Solution>,
    prevblk: Option<&ChainBlock>,
    thisblk: Option<&PendingBlock>,
    crypto: &dyn SolutionCrypto,
) -> Result<()> {
    let (prevblk, thisblk) = match (prevblk, thisblk) {
        (Some(prev), Some(this)) => (prev, this),
        _ => return Err(GoldenTicketError::MissingBlock),
    };
    if prevblk.hash().is_empty() {
        return Err(GoldenTicketError::InvalidBlock("previous block has no hash".into()));
    }
    if !thisblk.is_well_formed() {
        return Err(GoldenTicketError::InvalidBlock(format!(
            "block {} is malformed",
            thisblk.hash()
        )));
    }
    let solution = solution.ok_or(GoldenTicketError::MissingSolution)?;

    let hash_value = crypto.hash(&format!("{}{}", solution.pubkey, solution.random));
    let difficulty = prevblk.header.difficulty;
    match check_difficulty(&hash_value, prevblk.hash(), solution.pubkey.len(), difficulty) {
        DifficultyCheck::Met => {}
        DifficultyCheck::SuffixMismatch => {
            warn!("[tc-01] Golden ticket does not validate: hash suffix mismatch");
            return Err(GoldenTicketError::HashMismatch {
                digits: difficulty.floor_int().max(0) as usize,
                target: prevblk.hash().to_string(),
            });
        }
        DifficultyCheck::BelowThreshold => {
            warn!("[tc-01] Golden ticket invalid: hash not low enough");
            return Err(GoldenTicketError::DifficultyNotMet(difficulty.to_string()));
        }
    }

    if !crypto.verify(&solution.signature_source(), &solution.sig, &solution.pubkey) {
        warn!("[tc-01] Golden ticket signature does not validate");
        return Err(GoldenTicketError::InvalidSignature);
    }

    if solution.paysplit_vote != prevblk.header.paysplit_vote {
        warn!("[tc-01] Paysplit vote does not match previous block");
        return Err(GoldenTicketError::PaysplitVoteMismatch {
            expected: prevblk.header.paysplit_vote.as_i8(),
            actual: solution.paysplit_vote.as_i8(),
        });
    }

    // Shares are only recomputable here for the block after the first one.
    if prevblk.is_first() {
        let shares = calculate_shares(prevblk)?;
        if shares.miner != solution.miner_share {
            warn!(
                "[tc-01] Miner share {} should be {}",
                solution.miner_share, shares.miner
            );
            return Err(GoldenTicketError::MinerShareMismatch {
                expected: shares.miner.to_string(),
                actual: solution.miner_share.to_string(),
            });
        }
        if shares.node != solution.node_share {
            warn!(
                "[tc-01] Node share {} should be {}",
                solution.node_share, shares.node
            );
            return Err(GoldenTicketError::NodeShareMismatch {
                expected: shares.node.to_string(),
                actual: solution.node_share.to_string(),
            });
        }
    }

    Ok(())
}
