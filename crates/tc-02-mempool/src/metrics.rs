//! Metrics collection for the mempool subsystem

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for the mempool
#[derive(Debug, Default)]
pub struct Metrics {
    /// Transactions enqueued
    pub transactions_admitted: AtomicU64,

    /// Transactions dropped (duplicate, oversize, malformed, invalid, outbid)
    pub transactions_rejected: AtomicU64,

    /// Golden tickets that replaced a queued one
    pub golden_tickets_replaced: AtomicU64,

    /// Blocks queued for application
    pub blocks_queued: AtomicU64,

    /// Blocks committed to the chain
    pub blocks_applied: AtomicU64,

    /// Chain application attempts that left the block queued
    pub block_apply_failures: AtomicU64,

    /// Downloads that failed, timed out or returned an unusable block
    pub downloads_failed: AtomicU64,

    /// Blocks this node assembled
    pub blocks_bundled: AtomicU64,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_transaction_admitted(&self) {
        self.transactions_admitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transaction_rejected(&self) {
        self.transactions_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_golden_ticket_replaced(&self) {
        self.golden_tickets_replaced.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_block_queued(&self) {
        self.blocks_queued.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of one chain application
    pub fn record_block_apply(&self, committed: bool) {
        if committed {
            self.blocks_applied.fetch_add(1, Ordering::Relaxed);
        } else {
            self.block_apply_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_download_failed(&self) {
        self.downloads_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_block_bundled(&self) {
        self.blocks_bundled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_transactions_admitted(&self) -> u64 {
        self.transactions_admitted.load(Ordering::Relaxed)
    }

    pub fn get_transactions_rejected(&self) -> u64 {
        self.transactions_rejected.load(Ordering::Relaxed)
    }

    pub fn get_blocks_applied(&self) -> u64 {
        self.blocks_applied.load(Ordering::Relaxed)
    }

    pub fn get_blocks_bundled(&self) -> u64 {
        self.blocks_bundled.load(Ordering::Relaxed)
    }

    pub fn get_downloads_failed(&self) -> u64 {
        self.downloads_failed.load(Ordering::Relaxed)
    }

    /// Share of admission attempts that were accepted
    pub fn get_admission_ratio(&self) -> f64 {
        let admitted = self.get_transactions_admitted();
        let total = admitted + self.get_transactions_rejected();
        if total == 0 {
            return 0.0;
        }
        admitted as f64 / total as f64
    }
}
