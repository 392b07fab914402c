//! Transaction input validation against the in-memory chain.

use crate::adapters::chain::InMemoryChain;
use async_trait::async_trait;
use shared_types::PendingTransaction;
use std::sync::Arc;
use tc_01_golden_ticket::SolutionCrypto;
use tc_02_mempool::{ChainReader, MempoolError, Result, TransactionValidator};

/// Checks fees and golden ticket signatures.
///
/// Slip-level input checks belong to the UTXO layer, which this node does
/// not carry.
pub struct ChainInputValidator {
    chain: Arc<InMemoryChain>,
    crypto: Arc<dyn SolutionCrypto>,
}

impl ChainInputValidator {
    pub fn new(chain: Arc<InMemoryChain>, crypto: Arc<dyn SolutionCrypto>) -> Self {
        Self { chain, crypto }
    }
}

#[async_trait]
impl TransactionValidator for ChainInputValidator {
    async fn validate_inputs(&self, tx: &PendingTransaction) -> Result<()> {
        if tx.fee.is_negative() {
            return Err(MempoolError::ValidationFailed(format!("negative fee {}", tx.fee)));
        }
        if tx.fee_capture.is_some_and(|amount| amount.is_negative()) {
            return Err(MempoolError::ValidationFailed("negative fee capture".into()));
        }

        if let Some(solution) = &tx.golden_ticket {
            if !self.chain.is_hash_indexed(&solution.target) {
                return Err(MempoolError::ValidationFailed(format!(
                    "golden ticket targets unknown block {}",
                    solution.target
                )));
            }
            if !self
                .crypto
                .verify(&solution.signature_source(), &solution.sig, &solution.pubkey)
            {
                return Err(MempoolError::ValidationFailed("golden ticket signature".into()));
            }
        }
        Ok(())
    }
}
