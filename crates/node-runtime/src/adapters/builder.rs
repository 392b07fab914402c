//! # Block Builder Adapter
//!
//! Finalizes a [`CandidateBlock`] from the mempool into a prevalidated
//! [`PendingBlock`]: header parameters, emission and hash.
//!
//! [`derive_parameters`] is shared with the chain, which recomputes the same
//! values when it validates a block it did not build.

use crate::container::config::GenesisParams;
use async_trait::async_trait;
use shared_crypto::Sha256Hasher;
use shared_types::{
    BlockHash, BlockHeader, CandidateBlock, ChainBlock, Decimal8, PendingBlock, PendingTransaction,
    Solution,
};
use std::sync::Arc;
use tc_01_golden_ticket::{calculate_monetary_policy, GoldenTicket, GoldenTicketConfig};
use tc_02_mempool::{BlockBuilder, MempoolError, Result, TimeSource};

/// Header values that follow from the previous block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockParameters {
    pub difficulty: Decimal8,
    pub paysplit: Decimal8,
    pub treasury: Decimal8,
    pub coinbase: Decimal8,
    pub reclaimed: Decimal8,
}

/// Parameters of the block after `prev`, optionally carrying `ticket`.
///
/// A ticket applies its difficulty and paysplit votes. Without one the
/// previous coinbase goes unclaimed and is returned to the treasury.
pub fn derive_parameters(
    prev: &BlockHeader,
    ticket: Option<&Solution>,
    config: &GoldenTicketConfig,
) -> tc_01_golden_ticket::Result<BlockParameters> {
    let policy = calculate_monetary_policy(prev, config.genesis_period)?;
    let (difficulty, paysplit, reclaimed) = match ticket {
        Some(solution) => {
            let ticket = GoldenTicket::new(solution.clone());
            (
                ticket.calculate_difficulty(prev, config),
                ticket.calculate_paysplit(prev, config),
                Decimal8::ZERO,
            )
        }
        None => (prev.difficulty, prev.paysplit, prev.coinbase),
    };
    Ok(BlockParameters {
        difficulty,
        paysplit,
        treasury: policy.treasury,
        coinbase: policy.coinbase,
        reclaimed,
    })
}

/// SHA-256 over every header field except the hash, then the transaction
/// signatures in block order.
pub fn compute_block_hash(header: &BlockHeader, transactions: &[PendingTransaction]) -> BlockHash {
    let mut hasher = Sha256Hasher::new();
    let fields = format!(
        "{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}",
        header.id,
        header.prevhash,
        header.timestamp,
        header.creator,
        header.difficulty,
        header.paysplit,
        header.paysplit_vote,
        header.burn_fee,
        header.fee_step,
        header.treasury,
        header.coinbase,
        header.reclaimed,
    );
    hasher.update(fields.as_bytes());
    for tx in transactions {
        hasher.update(b"|").update(tx.sig.as_bytes());
    }
    hasher.finalize_hex()
}

/// Builds blocks on top of the in-memory chain.
pub struct ChainBlockBuilder {
    golden_ticket: GoldenTicketConfig,
    genesis: GenesisParams,
    time: Arc<dyn TimeSource>,
}

impl ChainBlockBuilder {
    pub fn new(golden_ticket: GoldenTicketConfig, genesis: GenesisParams, time: Arc<dyn TimeSource>) -> Self {
        Self {
            golden_ticket,
            genesis,
            time,
        }
    }

    fn next_header(&self, candidate: &CandidateBlock, prevblk: &ChainBlock) -> Result<BlockHeader> {
        let timestamp = self.time.now();
        if prevblk.hash().is_empty() {
            return Ok(BlockHeader {
                id: 1,
                timestamp,
                creator: candidate.creator.clone(),
                difficulty: self.genesis.difficulty,
                paysplit: self.genesis.paysplit,
                paysplit_vote: candidate.paysplit_vote,
                burn_fee: self.genesis.burn_fee,
                fee_step: self.genesis.fee_step,
                treasury: self.genesis.treasury,
                ..Default::default()
            });
        }

        let prev = &prevblk.header;
        let ticket = candidate
            .transactions
            .iter()
            .filter_map(|tx| tx.golden_ticket.as_ref())
            .find(|solution| solution.target == prev.hash);
        let params = derive_parameters(prev, ticket, &self.golden_ticket)
            .map_err(|e| MempoolError::Builder(e.to_string()))?;

        Ok(BlockHeader {
            id: prev.id + 1,
            hash: BlockHash::new(),
            prevhash: prev.hash.clone(),
            timestamp,
            creator: candidate.creator.clone(),
            difficulty: params.difficulty,
            paysplit: params.paysplit,
            paysplit_vote: candidate.paysplit_vote,
            burn_fee: prev.burn_fee,
            fee_step: prev.fee_step,
            treasury: params.treasury,
            coinbase: params.coinbase,
            reclaimed: params.reclaimed,
        })
    }
}

#[async_trait]
impl BlockBuilder for ChainBlockBuilder {
    async fn bundle_block(&self, candidate: CandidateBlock, prevblk: &ChainBlock) -> Result<PendingBlock> {
        let mut header = self.next_header(&candidate, prevblk)?;
        header.hash = compute_block_hash(&header, &candidate.transactions);

        let mut block = PendingBlock::new(header, candidate.transactions);
        block.prevalidated = true;
        tracing::debug!(
            "[node] Built block #{} {} ({} bytes)",
            block.header.id,
            block.hash(),
            block.size
        );
        Ok(block)
    }
}
