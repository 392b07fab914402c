//! # Inbound Port - MempoolApi
//!
//! Primary driving port exposing the admission engine to the rest of the
//! node: network handlers, the local wallet, the chain (on reorgs) and the
//! golden ticket miner.

use crate::domain::Result;
use async_trait::async_trait;
use shared_types::{Decimal8, PeerInfo, PendingBlock, PendingTransaction, Vote};

/// Primary API for the Mempool subsystem.
///
/// # Example
///
/// ```rust,ignore
/// use tc_02_mempool::ports::MempoolApi;
///
/// async fn on_transaction(mempool: &impl MempoolApi, json: &[u8]) {
///     // Rejections are expected and carry no consequence for the caller.
///     let _ = mempool.import_transaction(json).await;
/// }
/// ```
#[async_trait]
pub trait MempoolApi: Send + Sync {
    /// Admits a transaction, relaying it after validation when
    /// `relay_on_validate` is set and its fee alone cannot trigger bundling.
    ///
    /// # Errors
    /// - `DuplicateTransaction`, `MalformedTransaction`, `TransactionPoolFull`
    /// - `GoldenTicketOutbid`: a better same-tip ticket is queued
    /// - `ValidationFailed`: inputs rejected
    async fn add_transaction(&self, tx: PendingTransaction, relay_on_validate: bool) -> Result<()>;

    /// Queues a block for application.
    fn add_block(&self, block: PendingBlock) -> Result<()>;

    /// Decodes and admits a transaction.
    async fn import_transaction(&self, json: &[u8]) -> Result<()>;

    /// Decodes and queues a block.
    fn import_block(&self, json: &[u8]) -> Result<()>;

    /// Schedules a block download unless it is queued or already indexed.
    fn fetch_block(&self, peer: PeerInfo, hash: &str);

    /// Stages a transaction orphaned by a reorganization.
    fn recover_transaction(&self, tx: PendingTransaction);

    /// Re-admits staged transactions without relaying them.
    async fn reinsert_recovered_transactions(&self);

    /// Usable fees of queued transactions compatible with `vote`.
    fn usable_transaction_fees(&self, vote: Vote) -> Result<Decimal8>;

    /// Shortfall computed by the last bundling tick.
    fn bundling_fees_needed(&self) -> Decimal8;
}
