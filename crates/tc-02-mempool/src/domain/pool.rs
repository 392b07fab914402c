//! # Pool State - Queues and Byte Accounting
//!
//! The synchronous core of the mempool. One instance per node, always
//! behind the service's mutex; every method runs to completion under it.
//!
//! ## Data Structures
//!
//! - `transactions`: insertion-ordered, unique by signature (`signatures`)
//! - `blocks`: FIFO, unique by hash
//! - `downloads`: FIFO, unique by hash
//! - `recovered`: staging list filled during reorganizations
//!
//! ## Invariants Enforced
//!
//! - No two queued transactions share a signature
//! - Queued bytes never exceed the transaction/block/download caps
//! - At most one queued golden ticket per chain tip (`arbitrate_golden_ticket`)

use super::entities::DownloadTask;
use super::errors::{MempoolError, Result};
use shared_types::{
    Decimal8, PendingBlock, PendingTransaction, PublicKey, Signature, Vote,
};
use std::collections::{HashSet, VecDeque};

/// Result of golden ticket arbitration for an incoming ticket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TicketArbitration {
    /// No same-tip ticket is queued; admission continues normally.
    Vacant,
    /// Incoming ticket took the resident's slot.
    Replaced { evicted: Signature },
    /// Resident ticket wins; incoming is dropped.
    Outbid { resident: Signature },
}

/// Queues and counters of the mempool.
#[derive(Debug)]
pub struct PoolState {
    transactions: Vec<PendingTransaction>,
    signatures: HashSet<Signature>,
    blocks: VecDeque<PendingBlock>,
    downloads: VecDeque<DownloadTask>,
    recovered: Vec<PendingTransaction>,
    transaction_size_current: u64,
    block_size_current: u64,
    bundling_fees_needed: Decimal8,
}

impl Default for PoolState {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolState {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            signatures: HashSet::new(),
            blocks: VecDeque::new(),
            downloads: VecDeque::new(),
            recovered: Vec::new(),
            transaction_size_current: 0,
            block_size_current: 0,
            bundling_fees_needed: -Decimal8::ONE,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn transactions(&self) -> &[PendingTransaction] {
        &self.transactions
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn download_count(&self) -> usize {
        self.downloads.len()
    }

    pub fn recovered_count(&self) -> usize {
        self.recovered.len()
    }

    pub fn transaction_size_current(&self) -> u64 {
        self.transaction_size_current
    }

    pub fn block_size_current(&self) -> u64 {
        self.block_size_current
    }

    pub fn bundling_fees_needed(&self) -> Decimal8 {
        self.bundling_fees_needed
    }

    pub fn set_bundling_fees_needed(&mut self, value: Decimal8) {
        self.bundling_fees_needed = value;
    }

    pub fn contains_transaction(&self, sig: &str) -> bool {
        self.signatures.contains(sig)
    }

    pub fn contains_block(&self, hash: &str) -> bool {
        self.blocks.iter().any(|b| b.hash() == hash)
    }

    pub fn contains_download(&self, hash: &str) -> bool {
        self.downloads.iter().any(|d| d.block_hash == hash)
    }

    pub fn contains_golden_ticket(&self) -> bool {
        self.transactions.iter().any(PendingTransaction::is_golden_ticket)
    }

    /// Number of queued transactions that are not golden tickets.
    pub fn normal_transaction_count(&self) -> usize {
        self.transactions.iter().filter(|tx| !tx.is_golden_ticket()).count()
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Checks duplicate, malformed and cap conditions without mutating.
    pub fn check_admissible(&self, tx: &PendingTransaction, cap: u64) -> Result<()> {
        if self.contains_transaction(&tx.sig) {
            return Err(MempoolError::DuplicateTransaction(tx.sig.clone()));
        }
        if !tx.is_well_formed() {
            return Err(MempoolError::MalformedTransaction(tx.sig.clone()));
        }
        if self.transaction_size_current.saturating_add(tx.size) > cap {
            return Err(MempoolError::TransactionPoolFull {
                current: self.transaction_size_current,
                size: tx.size,
                cap,
            });
        }
        Ok(())
    }

    /// Enqueues a transaction after re-checking admissibility.
    pub fn insert_transaction(&mut self, tx: PendingTransaction, cap: u64) -> Result<()> {
        self.check_admissible(&tx, cap)?;
        self.transaction_size_current += tx.size;
        self.signatures.insert(tx.sig.clone());
        self.transactions.push(tx);
        Ok(())
    }

    /// Removes a transaction by signature. Returns whether one was removed.
    pub fn remove_transaction(&mut self, sig: &str) -> bool {
        self.remove_where(|tx| tx.sig == sig) > 0
    }

    /// Removes every queued golden ticket.
    pub fn remove_golden_ticket(&mut self) -> usize {
        self.remove_where(PendingTransaction::is_golden_ticket)
    }

    /// Removes every queued fee-capture transaction.
    pub fn remove_fee_transactions(&mut self) -> usize {
        self.remove_where(PendingTransaction::is_fee_capture)
    }

    fn remove_where(&mut self, mut predicate: impl FnMut(&PendingTransaction) -> bool) -> usize {
        let before = self.transactions.len();
        let mut freed = 0;
        let signatures = &mut self.signatures;
        self.transactions.retain(|tx| {
            if predicate(tx) {
                freed += tx.size;
                signatures.remove(&tx.sig);
                false
            } else {
                true
            }
        });
        self.transaction_size_current = self.transaction_size_current.saturating_sub(freed);
        before - self.transactions.len()
    }

    /// Resolves an incoming golden ticket against the queued ones.
    ///
    /// Tickets whose target is not `latest_hash` are evicted first. If a
    /// ticket for `latest_hash` remains, the incoming one replaces it in
    /// place when its usable fee is strictly greater, or when the resident
    /// is not ours and the incoming one is.
    pub fn arbitrate_golden_ticket(
        &mut self,
        incoming: &PendingTransaction,
        latest_hash: &str,
        self_key: &PublicKey,
        cap: u64,
        usable_fee: impl Fn(&PendingTransaction) -> Decimal8,
    ) -> Result<TicketArbitration> {
        self.remove_where(|tx| {
            tx.golden_ticket_target()
                .map_or(false, |target| target != latest_hash)
        });

        let Some(index) = self
            .transactions
            .iter()
            .position(|tx| tx.golden_ticket_target() == Some(latest_hash))
        else {
            return Ok(TicketArbitration::Vacant);
        };

        let resident = &self.transactions[index];
        let outbids = usable_fee(incoming) > usable_fee(resident);
        let self_priority = resident.from != *self_key && incoming.from == *self_key;
        if !(outbids || self_priority) {
            return Ok(TicketArbitration::Outbid {
                resident: resident.sig.clone(),
            });
        }

        let resized = self.transaction_size_current - resident.size + incoming.size;
        if resized > cap {
            return Err(MempoolError::TransactionPoolFull {
                current: self.transaction_size_current - resident.size,
                size: incoming.size,
                cap,
            });
        }

        let evicted = std::mem::replace(&mut self.transactions[index], incoming.clone());
        self.signatures.remove(&evicted.sig);
        self.signatures.insert(incoming.sig.clone());
        self.transaction_size_current = resized;
        Ok(TicketArbitration::Replaced { evicted: evicted.sig })
    }

    /// Sum of usable fees of transactions compatible with `vote`.
    pub fn usable_fees(&self, vote: Vote, usable_fee: impl Fn(&PendingTransaction) -> Decimal8) -> Result<Decimal8> {
        Decimal8::checked_sum(
            self.transactions
                .iter()
                .filter(|tx| vote.admits(tx.paysplit_preference))
                .map(usable_fee),
        )
        .ok_or(MempoolError::FeeOverflow)
    }

    /// Transactions eligible for a block on top of `prevhash` voting `vote`.
    ///
    /// Skips golden tickets for other targets and transactions whose
    /// paysplit preference opposes the vote.
    pub fn transactions_for_block(&self, prevhash: &str, vote: Vote) -> Vec<PendingTransaction> {
        self.transactions
            .iter()
            .filter(|tx| tx.golden_ticket_target().map_or(true, |target| target == prevhash))
            .filter(|tx| vote.admits(tx.paysplit_preference))
            .cloned()
            .collect()
    }

    // =========================================================================
    // Blocks
    // =========================================================================

    /// Appends a block to the FIFO.
    pub fn add_block(&mut self, block: PendingBlock, cap: u64) -> Result<()> {
        if !block.is_well_formed() {
            return Err(MempoolError::InvalidBlock(block.hash().to_string()));
        }
        if self.block_size_current.saturating_add(block.size) > cap {
            return Err(MempoolError::BlockQueueFull {
                current: self.block_size_current,
                size: block.size,
                cap,
            });
        }
        if self.contains_block(block.hash()) {
            return Err(MempoolError::DuplicateBlock(block.hash().to_string()));
        }
        self.block_size_current += block.size;
        self.blocks.push_back(block);
        Ok(())
    }

    /// Removes a block by hash. Returns whether one was removed.
    pub fn remove_block(&mut self, hash: &str) -> bool {
        let before = self.blocks.len();
        let mut freed = 0;
        self.blocks.retain(|b| {
            if b.hash() == hash {
                freed += b.size;
                false
            } else {
                true
            }
        });
        self.block_size_current = self.block_size_current.saturating_sub(freed);
        before != self.blocks.len()
    }

    /// Head of the block FIFO.
    pub fn front_block(&self) -> Option<&PendingBlock> {
        self.blocks.front()
    }

    /// Removes `block` and every transaction it contains.
    pub fn clear_block(&mut self, block: &PendingBlock) {
        let contained: HashSet<&str> = block.transactions.iter().map(|tx| tx.sig.as_str()).collect();
        self.remove_where(|tx| contained.contains(tx.sig.as_str()));
        self.remove_block(block.hash());
    }

    // =========================================================================
    // Downloads
    // =========================================================================

    /// Queues a download unless one for the same hash is queued.
    ///
    /// Returns `Ok(false)` for the duplicate no-op.
    pub fn enqueue_download(&mut self, task: DownloadTask, max_queued: usize) -> Result<bool> {
        if self.contains_download(&task.block_hash) {
            return Ok(false);
        }
        if self.downloads.len() >= max_queued {
            return Err(MempoolError::DownloadQueueFull {
                capacity: max_queued,
            });
        }
        self.downloads.push_back(task);
        Ok(true)
    }

    pub fn next_download(&self) -> Option<&DownloadTask> {
        self.downloads.front()
    }

    /// Drops the task for `hash`; the single exit for every fetch outcome.
    pub fn finish_download(&mut self, hash: &str) {
        self.downloads.retain(|d| d.block_hash != hash);
    }

    // =========================================================================
    // Reorganization
    // =========================================================================

    pub fn recover(&mut self, tx: PendingTransaction) {
        self.recovered.push(tx);
    }

    /// Empties the staging list.
    pub fn take_recovered(&mut self) -> Vec<PendingTransaction> {
        std::mem::take(&mut self.recovered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shared_types::{BlockHeader, PeerInfo, Solution};

    const CAP: u64 = 1_000_000;

    fn d(s: &str) -> Decimal8 {
        s.parse().unwrap()
    }

    fn tx(sig: &str, fee: &str) -> PendingTransaction {
        PendingTransaction::new(sig, "alice", d(fee))
    }

    fn ticket(sig: &str, from: &str, target: &str, fee: &str) -> PendingTransaction {
        PendingTransaction::new(sig, from, d(fee)).with_golden_ticket(Solution {
            target: target.into(),
            ..Default::default()
        })
    }

    fn block(hash: &str, txs: Vec<PendingTransaction>) -> PendingBlock {
        PendingBlock::new(
            BlockHeader {
                hash: hash.into(),
                ..Default::default()
            },
            txs,
        )
    }

    fn fee(tx: &PendingTransaction) -> Decimal8 {
        tx.fee
    }

    fn me() -> PublicKey {
        "me".to_string()
    }

    // =========================================================================
    // Transaction admission
    // =========================================================================

    #[test]
    fn test_insert_tracks_size() {
        let mut pool = PoolState::new();
        let t = tx("a", "1");
        let size = t.size;
        pool.insert_transaction(t, CAP).unwrap();

        assert_eq!(pool.transaction_count(), 1);
        assert_eq!(pool.transaction_size_current(), size);
        assert!(pool.contains_transaction("a"));
    }

    #[test]
    fn test_duplicate_signature_rejected() {
        let mut pool = PoolState::new();
        pool.insert_transaction(tx("a", "1"), CAP).unwrap();
        assert_eq!(
            pool.insert_transaction(tx("a", "2"), CAP),
            Err(MempoolError::DuplicateTransaction("a".into()))
        );
        assert_eq!(pool.transaction_count(), 1);
    }

    #[test]
    fn test_over_cap_leaves_state_unchanged() {
        let mut pool = PoolState::new();
        let first = tx("a", "1");
        let cap = first.size + 10;
        pool.insert_transaction(first, cap).unwrap();
        let before = pool.transaction_size_current();

        let result = pool.insert_transaction(tx("b", "1"), cap);
        assert!(matches!(result, Err(MempoolError::TransactionPoolFull { .. })));
        assert_eq!(pool.transaction_count(), 1);
        assert_eq!(pool.transaction_size_current(), before);
        assert!(!pool.contains_transaction("b"));
    }

    #[test]
    fn test_malformed_rejected() {
        let mut pool = PoolState::new();
        assert!(matches!(
            pool.insert_transaction(tx("", "1"), CAP),
            Err(MempoolError::MalformedTransaction(_))
        ));
    }

    #[test]
    fn test_removals_are_idempotent() {
        let mut pool = PoolState::new();
        pool.insert_transaction(tx("a", "1"), CAP).unwrap();
        pool.insert_transaction(tx("f", "0").with_fee_capture(d("1")), CAP).unwrap();
        pool.insert_transaction(ticket("g", "bob", "tip", "0"), CAP).unwrap();

        assert!(pool.remove_transaction("a"));
        assert!(!pool.remove_transaction("a"));
        assert_eq!(pool.remove_fee_transactions(), 1);
        assert_eq!(pool.remove_fee_transactions(), 0);
        assert_eq!(pool.remove_golden_ticket(), 1);
        assert_eq!(pool.remove_golden_ticket(), 0);
        assert_eq!(pool.transaction_size_current(), 0);
        assert_eq!(pool.transaction_count(), 0);
    }

    // =========================================================================
    // Golden ticket arbitration
    // =========================================================================

    #[test]
    fn test_arbitration_vacant_without_same_tip_ticket() {
        let mut pool = PoolState::new();
        let incoming = ticket("new", "bob", "tip", "1");
        assert_eq!(
            pool.arbitrate_golden_ticket(&incoming, "tip", &me(), CAP, fee),
            Ok(TicketArbitration::Vacant)
        );
    }

    #[test]
    fn test_arbitration_evicts_stale_first() {
        let mut pool = PoolState::new();
        pool.insert_transaction(ticket("old", "bob", "stale", "100"), CAP).unwrap();
        pool.insert_transaction(tx("n", "1"), CAP).unwrap();

        let incoming = ticket("new", "bob", "tip", "1");
        let result = pool.arbitrate_golden_ticket(&incoming, "tip", &me(), CAP, fee);

        assert_eq!(result, Ok(TicketArbitration::Vacant));
        assert!(!pool.contains_transaction("old"));
        assert!(pool.contains_transaction("n"));
    }

    #[test]
    fn test_arbitration_higher_fee_replaces_in_place() {
        let mut pool = PoolState::new();
        pool.insert_transaction(tx("n", "1"), CAP).unwrap();
        pool.insert_transaction(ticket("res", "bob", "tip", "1"), CAP).unwrap();

        let incoming = ticket("new", "carol", "tip", "2");
        let result = pool.arbitrate_golden_ticket(&incoming, "tip", &me(), CAP, fee);

        assert_eq!(result, Ok(TicketArbitration::Replaced { evicted: "res".into() }));
        assert_eq!(pool.transactions()[1].sig, "new");
        assert!(!pool.contains_transaction("res"));
        let expected: u64 = pool.transactions().iter().map(|t| t.size).sum();
        assert_eq!(pool.transaction_size_current(), expected);
    }

    #[test]
    fn test_arbitration_equal_fee_outbid() {
        let mut pool = PoolState::new();
        pool.insert_transaction(ticket("res", "bob", "tip", "2"), CAP).unwrap();

        let incoming = ticket("new", "carol", "tip", "2");
        assert_eq!(
            pool.arbitrate_golden_ticket(&incoming, "tip", &me(), CAP, fee),
            Ok(TicketArbitration::Outbid { resident: "res".into() })
        );
        assert!(pool.contains_transaction("res"));
    }

    #[test]
    fn test_arbitration_self_priority() {
        let mut pool = PoolState::new();
        pool.insert_transaction(ticket("res", "bob", "tip", "5"), CAP).unwrap();

        let ours = ticket("ours", "me", "tip", "0");
        assert_eq!(
            pool.arbitrate_golden_ticket(&ours, "tip", &me(), CAP, fee),
            Ok(TicketArbitration::Replaced { evicted: "res".into() })
        );

        // Our resident ticket is not displaced by a cheaper foreign one.
        let foreign = ticket("foreign", "bob", "tip", "0");
        assert!(matches!(
            pool.arbitrate_golden_ticket(&foreign, "tip", &me(), CAP, fee),
            Ok(TicketArbitration::Outbid { .. })
        ));
    }

    // =========================================================================
    // Fee accounting and block selection
    // =========================================================================

    #[test]
    fn test_usable_fees_by_vote() {
        let mut pool = PoolState::new();
        pool.insert_transaction(tx("a", "1").with_paysplit_preference(Vote::Decrease), CAP).unwrap();
        pool.insert_transaction(tx("b", "2"), CAP).unwrap();
        pool.insert_transaction(tx("c", "4").with_paysplit_preference(Vote::Increase), CAP).unwrap();

        assert_eq!(pool.usable_fees(Vote::Hold, fee), Ok(d("7")));
        assert_eq!(pool.usable_fees(Vote::Decrease, fee), Ok(d("3")));
        assert_eq!(pool.usable_fees(Vote::Increase, fee), Ok(d("6")));
    }

    #[test]
    fn test_usable_fees_overflow_is_an_error() {
        let mut pool = PoolState::new();
        pool.insert_transaction(tx("a", "1"), CAP).unwrap();
        pool.insert_transaction(tx("b", "1"), CAP).unwrap();

        let inflated = |_: &PendingTransaction| Decimal8::from_raw(i128::MAX / 2 + 1);
        assert_eq!(pool.usable_fees(Vote::Hold, inflated), Err(MempoolError::FeeOverflow));
    }

    #[test]
    fn test_fee_beyond_supply_rejected() {
        let mut pool = PoolState::new();
        let whale = PendingTransaction::new("w", "alice", Decimal8::from_raw(i128::MAX));
        assert_eq!(
            pool.insert_transaction(whale, CAP),
            Err(MempoolError::MalformedTransaction("w".into()))
        );
        assert_eq!(pool.transaction_count(), 0);
    }

    #[test]
    fn test_transactions_for_block_filters() {
        let mut pool = PoolState::new();
        pool.insert_transaction(tx("a", "1"), CAP).unwrap();
        pool.insert_transaction(ticket("gt-old", "bob", "old", "0"), CAP).unwrap();
        pool.insert_transaction(ticket("gt-tip", "bob", "tip", "0"), CAP).unwrap();
        pool.insert_transaction(tx("up", "1").with_paysplit_preference(Vote::Increase), CAP).unwrap();

        let sigs: Vec<String> = pool
            .transactions_for_block("tip", Vote::Decrease)
            .into_iter()
            .map(|t| t.sig)
            .collect();
        assert_eq!(sigs, vec!["a".to_string(), "gt-tip".to_string()]);
    }

    #[test]
    fn test_counts() {
        let mut pool = PoolState::new();
        assert!(!pool.contains_golden_ticket());
        pool.insert_transaction(ticket("g", "bob", "tip", "0"), CAP).unwrap();
        pool.insert_transaction(tx("a", "1"), CAP).unwrap();
        assert!(pool.contains_golden_ticket());
        assert_eq!(pool.normal_transaction_count(), 1);
    }

    // =========================================================================
    // Blocks and downloads
    // =========================================================================

    #[test]
    fn test_block_fifo_and_duplicates() {
        let mut pool = PoolState::new();
        pool.add_block(block("b1", vec![tx("a", "1")]), CAP).unwrap();
        pool.add_block(block("b2", vec![tx("b", "1")]), CAP).unwrap();

        assert_eq!(pool.front_block().map(|b| b.hash()), Some("b1"));
        assert_eq!(
            pool.add_block(block("b1", vec![tx("a", "1")]), CAP),
            Err(MempoolError::DuplicateBlock("b1".into()))
        );
        assert!(matches!(
            pool.add_block(block("", vec![]), CAP),
            Err(MempoolError::InvalidBlock(_))
        ));
    }

    #[test]
    fn test_block_over_cap() {
        let mut pool = PoolState::new();
        let b = block("b1", vec![tx("a", "1")]);
        let cap = b.size - 1;
        assert!(matches!(pool.add_block(b, cap), Err(MempoolError::BlockQueueFull { .. })));
        assert_eq!(pool.block_count(), 0);
        assert_eq!(pool.block_size_current(), 0);
    }

    #[test]
    fn test_clear_block_removes_block_and_its_transactions() {
        let mut pool = PoolState::new();
        pool.insert_transaction(tx("a", "1"), CAP).unwrap();
        pool.insert_transaction(tx("b", "1"), CAP).unwrap();
        let committed = block("b1", vec![tx("a", "1")]);
        pool.add_block(committed.clone(), CAP).unwrap();

        pool.clear_block(&committed);

        assert_eq!(pool.block_count(), 0);
        assert_eq!(pool.block_size_current(), 0);
        assert!(!pool.contains_transaction("a"));
        assert!(pool.contains_transaction("b"));
    }

    #[test]
    fn test_download_dedup() {
        let mut pool = PoolState::new();
        let task = DownloadTask {
            peer: PeerInfo::default(),
            block_hash: "h".into(),
        };
        assert_eq!(pool.enqueue_download(task.clone(), 10), Ok(true));
        assert_eq!(pool.enqueue_download(task, 10), Ok(false));
        assert_eq!(pool.download_count(), 1);

        pool.finish_download("h");
        assert_eq!(pool.download_count(), 0);
    }

    #[test]
    fn test_download_queue_limit() {
        let mut pool = PoolState::new();
        let task = |h: &str| DownloadTask {
            peer: PeerInfo::default(),
            block_hash: h.into(),
        };
        pool.enqueue_download(task("1"), 1).unwrap();
        assert_eq!(
            pool.enqueue_download(task("2"), 1),
            Err(MempoolError::DownloadQueueFull { capacity: 1 })
        );
    }

    #[test]
    fn test_recovered_staging() {
        let mut pool = PoolState::new();
        pool.recover(tx("a", "1"));
        pool.recover(tx("b", "1"));
        assert_eq!(pool.recovered_count(), 2);
        assert_eq!(pool.take_recovered().len(), 2);
        assert_eq!(pool.recovered_count(), 0);
    }

    #[test]
    fn test_initial_bundling_fees_needed() {
        assert_eq!(PoolState::new().bundling_fees_needed(), d("-1"));
    }

    proptest! {
        #[test]
        fn prop_readmitting_same_signature_adds_at_most_one(sigs in proptest::collection::vec("[a-d]", 1..20)) {
            let mut pool = PoolState::new();
            for sig in &sigs {
                let _ = pool.insert_transaction(tx(sig, "1"), CAP);
            }
            let unique: HashSet<&String> = sigs.iter().collect();
            prop_assert_eq!(pool.transaction_count(), unique.len());
            let total: u64 = pool.transactions().iter().map(|t| t.size).sum();
            prop_assert_eq!(pool.transaction_size_current(), total);
        }

        #[test]
        fn prop_one_ticket_per_tip(fees in proptest::collection::vec(0i64..5, 1..10)) {
            let mut pool = PoolState::new();
            for (i, f) in fees.iter().enumerate() {
                let incoming = ticket(&format!("gt{i}"), "bob", "tip", &f.to_string());
                if let Ok(TicketArbitration::Vacant) =
                    pool.arbitrate_golden_ticket(&incoming, "tip", &me(), CAP, fee)
                {
                    pool.insert_transaction(incoming, CAP).unwrap();
                }
            }
            let on_tip = pool
                .transactions()
                .iter()
                .filter(|t| t.golden_ticket_target() == Some("tip"))
                .count();
            prop_assert_eq!(on_tip, 1);
        }
    }
}
