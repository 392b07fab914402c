//! Golden ticket search
//!
//! Tries random nonces until `hash(pubkey ‖ random)` meets the difficulty
//! of the block being solved. CPU bound; callers run it on a blocking
//! thread.

use crate::domain::meets_difficulty;
use crate::ports::SolutionCrypto;
use rand::Rng;
use shared_types::ChainBlock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Random-nonce solver for golden tickets
pub struct GoldenTicketSolver {
    crypto: Arc<dyn SolutionCrypto>,
    max_attempts: u64,
}

impl GoldenTicketSolver {
    /// Create a solver trying at most `max_attempts` nonces per search
    pub fn new(crypto: Arc<dyn SolutionCrypto>, max_attempts: u64) -> Self {
        Self {
            crypto,
            max_attempts,
        }
    }

    /// Search for a nonce solving `block` for `pubkey`.
    ///
    /// Returns `None` after `max_attempts` misses or once `cancel` is set.
    #[tracing::instrument(skip(self, block, cancel), fields(block = block.id()))]
    pub fn search(&self, block: &ChainBlock, pubkey: &str, cancel: &AtomicBool) -> Option<String> {
        let mut rng = rand::thread_rng();
        let difficulty = block.header.difficulty;

        for attempt in 0..self.max_attempts {
            // Check every 1000 iterations to reduce contention
            if attempt % 1000 == 0 && cancel.load(Ordering::Relaxed) {
                tracing::debug!("[tc-01] Solver cancelled after {} attempts", attempt);
                return None;
            }

            let random = rng.gen::<u64>().to_string();
            let hash_value = self.crypto.hash(&format!("{}{}", pubkey, random));
            if meets_difficulty(&hash_value, block.hash(), pubkey.len(), difficulty) {
                tracing::info!("[tc-01] Golden ticket found for block {} after {} attempts", block.id(), attempt + 1);
                return Some(random);
            }
        }

        tracing::debug!("[tc-01] No golden ticket in {} attempts", self.max_attempts);
        None
    }
}
