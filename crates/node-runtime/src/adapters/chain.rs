//! # In-Memory Chain Adapter
//!
//! Implements the mempool's `ChainReader` and `ChainWriter` ports over a
//! single in-memory longest chain.
//!
//! ## Commit Rules
//!
//! A block must extend the current tip. Unless `force` is set, it is also
//! checked for:
//!
//! - id and hash consistency
//! - golden ticket validity against the previous block
//! - difficulty, paysplit and reclaimed values derived from the previous block
//! - treasury and coinbase per the monetary policy
//!
//! Indexing derives the block's [`BlockFees`] and contender set. Every new
//! tip is published on a broadcast channel for the golden ticket miner.

use crate::adapters::builder::{compute_block_hash, derive_parameters};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{BlockFees, BlockHash, ChainBlock, Decimal8, PendingBlock, PublicKey};
use std::collections::HashMap;
use std::sync::Arc;
use tc_01_golden_ticket::{validate_monetary_policy, validate_solution, GoldenTicketConfig, SolutionCrypto};
use tc_02_mempool::domain::fees_needed;
use tc_02_mempool::{ChainReader, ChainWriter, MempoolError, Result};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

const TIP_CHANNEL_CAPACITY: usize = 16;

#[derive(Default)]
struct ChainIndex {
    blocks: HashMap<BlockHash, ChainBlock>,
    /// Full blocks, served to peers that download them.
    bodies: HashMap<BlockHash, PendingBlock>,
    longest_chain: Vec<BlockHash>,
}

impl ChainIndex {
    fn tip(&self) -> Option<&ChainBlock> {
        self.longest_chain.last().and_then(|hash| self.blocks.get(hash))
    }
}

/// Single-chain block index.
pub struct InMemoryChain {
    index: RwLock<ChainIndex>,
    golden_ticket: GoldenTicketConfig,
    crypto: Arc<dyn SolutionCrypto>,
    tips: broadcast::Sender<ChainBlock>,
}

impl InMemoryChain {
    pub fn new(golden_ticket: GoldenTicketConfig, crypto: Arc<dyn SolutionCrypto>) -> Self {
        let (tips, _) = broadcast::channel(TIP_CHANNEL_CAPACITY);
        Self {
            index: RwLock::new(ChainIndex::default()),
            golden_ticket,
            crypto,
            tips,
        }
    }

    /// Receives every block that becomes the tip.
    pub fn subscribe_tips(&self) -> broadcast::Receiver<ChainBlock> {
        self.tips.subscribe()
    }

    pub fn block(&self, hash: &str) -> Option<ChainBlock> {
        self.index.read().blocks.get(hash).cloned()
    }

    /// Full block with its transactions, as committed.
    pub fn block_body(&self, hash: &str) -> Option<PendingBlock> {
        self.index.read().bodies.get(hash).cloned()
    }

    /// Height of the tip (0 when empty).
    pub fn height(&self) -> u64 {
        self.index.read().tip().map_or(0, ChainBlock::id)
    }

    fn validate(&self, block: &PendingBlock, prev: Option<&ChainBlock>) -> std::result::Result<(), String> {
        let header = &block.header;
        let expected_hash = compute_block_hash(header, &block.transactions);
        if header.hash != expected_hash {
            return Err(format!("hash {} should be {}", header.hash, expected_hash));
        }

        let Some(prev) = prev else {
            if header.id != 1 {
                return Err(format!("first block has id {}", header.id));
            }
            if block.golden_ticket().is_some() {
                return Err("first block carries a golden ticket".into());
            }
            return Ok(());
        };

        if header.id != prev.id() + 1 {
            return Err(format!("id {} does not follow {}", header.id, prev.id()));
        }
        if header.burn_fee != prev.header.burn_fee || header.fee_step != prev.header.fee_step {
            return Err("burn fee parameters changed".into());
        }

        let ticket = block.golden_ticket();
        if let Some(solution) = ticket {
            if solution.target != prev.header.hash {
                return Err(format!("golden ticket targets {}", solution.target));
            }
            validate_solution(Some(solution), Some(prev), Some(block), self.crypto.as_ref())
                .map_err(|e| e.to_string())?;
        }

        validate_monetary_policy(
            header.treasury,
            header.coinbase,
            &prev.header,
            self.golden_ticket.genesis_period,
        )
        .map_err(|e| e.to_string())?;

        let params = derive_parameters(&prev.header, ticket, &self.golden_ticket).map_err(|e| e.to_string())?;
        if header.difficulty != params.difficulty {
            return Err(format!("difficulty {} should be {}", header.difficulty, params.difficulty));
        }
        if header.paysplit != params.paysplit {
            return Err(format!("paysplit {} should be {}", header.paysplit, params.paysplit));
        }
        if header.reclaimed != params.reclaimed {
            return Err(format!("reclaimed {} should be {}", header.reclaimed, params.reclaimed));
        }
        Ok(())
    }

    fn index_block(block: &PendingBlock, prev: Option<&ChainBlock>) -> std::result::Result<ChainBlock, String> {
        let needed = prev.map_or(Decimal8::ZERO, |p| fees_needed(&p.header, block.header.timestamp));
        let total = Decimal8::checked_sum(block.transactions.iter().map(|tx| tx.fee))
            .ok_or("transaction fees overflow")?;
        let creator_surplus = Decimal8::checked_sum(block.transactions.iter().filter_map(|tx| tx.fee_capture))
            .ok_or("fee captures overflow")?;
        let total_surplus = total.checked_sub(needed).ok_or("fee surplus overflows")?;

        let mut contenders: Vec<PublicKey> = Vec::new();
        for tx in &block.transactions {
            if tx.is_golden_ticket() || tx.is_fee_capture() || contenders.contains(&tx.from) {
                continue;
            }
            contenders.push(tx.from.clone());
        }
        if contenders.is_empty() {
            contenders.push(block.header.creator.clone());
        }

        Ok(ChainBlock {
            header: block.header.clone(),
            fees: BlockFees {
                fees_needed: needed,
                creator_surplus,
                total_surplus: total_surplus.max_zero(),
            },
            contenders,
        })
    }
}

impl ChainReader for InMemoryChain {
    fn latest_block(&self) -> Option<ChainBlock> {
        self.index.read().tip().cloned()
    }

    fn is_hash_indexed(&self, hash: &str) -> bool {
        self.index.read().blocks.contains_key(hash)
    }

    fn indexed_block_count(&self) -> usize {
        self.index.read().blocks.len()
    }
}

#[async_trait]
impl ChainWriter for InMemoryChain {
    async fn add_block_to_blockchain(&self, block: PendingBlock, force: bool) -> Result<bool> {
        let indexed = {
            let mut index = self.index.write();
            if index.blocks.contains_key(block.hash()) {
                debug!("[node] Block {} already indexed", block.hash());
                return Ok(true);
            }

            let prev = index.tip().cloned();
            let extends_tip = match &prev {
                Some(tip) => block.header.prevhash == tip.header.hash,
                None => block.header.prevhash.is_empty(),
            };
            if !extends_tip {
                return Err(MempoolError::Chain(format!(
                    "block {} does not extend the tip",
                    block.hash()
                )));
            }

            if !force {
                if let Err(reason) = self.validate(&block, prev.as_ref()) {
                    warn!("[node] Rejected block #{} {}: {}", block.header.id, block.hash(), reason);
                    return Ok(false);
                }
            }

            let indexed = match Self::index_block(&block, prev.as_ref()) {
                Ok(indexed) => indexed,
                Err(reason) => {
                    warn!("[node] Cannot index block #{} {}: {}", block.header.id, block.hash(), reason);
                    return Ok(false);
                }
            };
            index.longest_chain.push(indexed.header.hash.clone());
            index.blocks.insert(indexed.header.hash.clone(), indexed.clone());
            index.bodies.insert(indexed.header.hash.clone(), block.clone());
            indexed
        };

        info!(
            "[node] Indexed block #{} {} ({} transactions, creator surplus {})",
            indexed.id(),
            indexed.hash(),
            block.transactions.len(),
            indexed.fees.creator_surplus
        );
        let _ = self.tips.send(indexed);
        Ok(true)
    }
}
