//! Mempool service: admission, queues and the three control loops.
//!
//! The service owns a [`PoolState`] behind a mutex and drives it from three
//! periodic tasks:
//!
//! - **processing**: hands the head of the block FIFO to the chain
//! - **downloading**: fetches one queued block per tick from its peer
//! - **bundling**: decides whether to assemble a block this tick
//!
//! Processing and downloading are lazy: they are spawned when work arrives
//! and stop themselves once their queue drains. Bundling runs from
//! [`Mempool::start_bundling`] until [`Mempool::stop_bundling`].
//!
//! The state mutex is never held across an `.await`.

use crate::domain::{
    bundling_fees_needed, fees_needed, BundleDecision, DownloadTask, LoopGuards, MempoolConfig,
    MempoolError, MempoolStatus, NodeMode, PoolState, Result, TicketArbitration, UsableFeeStrategy,
};
use crate::metrics::Metrics;
use crate::ports::{
    BlockBuilder, BlockFetcher, ChainReader, ChainWriter, FeeOracle, MempoolApi, PaysplitVoter,
    PeerNetwork, ReadinessMonitor, TimeSource, TransactionValidator, Wallet,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{
    BlockHash, CandidateBlock, ChainBlock, Decimal8, PeerInfo, PendingBlock, PendingTransaction, PublicKey,
    Signature, Vote,
};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Collaborators the mempool calls into.
#[derive(Clone)]
pub struct MempoolPorts {
    pub chain_reader: Arc<dyn ChainReader>,
    pub chain_writer: Arc<dyn ChainWriter>,
    pub validator: Arc<dyn TransactionValidator>,
    pub network: Arc<dyn PeerNetwork>,
    pub fetcher: Arc<dyn BlockFetcher>,
    pub builder: Arc<dyn BlockBuilder>,
    pub wallet: Arc<dyn Wallet>,
    pub voter: Arc<dyn PaysplitVoter>,
    pub fee_oracle: Arc<dyn FeeOracle>,
    pub fee_strategy: Arc<dyn UsableFeeStrategy>,
    pub monitor: Arc<dyn ReadinessMonitor>,
    pub time: Arc<dyn TimeSource>,
}

/// The two self-stopping loops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DrainLoop {
    Downloading,
    Processing,
}

impl DrainLoop {
    fn is_drained(self, state: &PoolState) -> bool {
        match self {
            Self::Downloading => state.download_count() == 0,
            Self::Processing => state.block_count() == 0,
        }
    }
}

type TimerSlot = Mutex<Option<JoinHandle<()>>>;

#[derive(Default)]
struct LoopTimers {
    downloading: TimerSlot,
    processing: TimerSlot,
    bundling: TimerSlot,
}

impl LoopTimers {
    fn drain_slot(&self, which: DrainLoop) -> &TimerSlot {
        match which {
            DrainLoop::Downloading => &self.downloading,
            DrainLoop::Processing => &self.processing,
        }
    }
}

/// The mempool of one node.
pub struct Mempool {
    config: MempoolConfig,
    ports: MempoolPorts,
    state: Mutex<PoolState>,
    guards: LoopGuards,
    timers: LoopTimers,
    metrics: Metrics,
    /// Handle the loops hold so a dropped mempool stops them.
    weak_self: Weak<Mempool>,
}

impl Mempool {
    /// Create a new mempool.
    pub fn new(config: MempoolConfig, ports: MempoolPorts) -> Arc<Self> {
        info!("[tc-02] Initializing Mempool");
        info!("  Node mode: {:?}", config.node_mode);
        info!("  Transaction cap: {} bytes", config.transaction_size_cap);
        info!("  Block cap: {} bytes", config.block_size_cap);

        Arc::new_cyclic(|weak| Self {
            config,
            ports,
            state: Mutex::new(PoolState::new()),
            guards: LoopGuards::default(),
            timers: LoopTimers::default(),
            metrics: Metrics::new(),
            weak_self: weak.clone(),
        })
    }

    pub fn config(&self) -> &MempoolConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Snapshot of queue sizes and flags.
    pub fn status(&self) -> MempoolStatus {
        let state = self.state.lock();
        MempoolStatus {
            transactions: state.transaction_count(),
            normal_transactions: state.normal_transaction_count(),
            blocks: state.block_count(),
            downloads: state.download_count(),
            transaction_bytes: state.transaction_size_current(),
            block_bytes: state.block_size_current(),
            bundling_fees_needed: state.bundling_fees_needed(),
            bundling: self.guards.bundling.is_held(),
        }
    }

    /// Queued transactions in insertion order.
    pub fn transactions(&self) -> Vec<PendingTransaction> {
        self.state.lock().transactions().to_vec()
    }

    pub fn contains_transaction(&self, sig: &str) -> bool {
        self.state.lock().contains_transaction(sig)
    }

    pub fn contains_block(&self, hash: &str) -> bool {
        self.state.lock().contains_block(hash)
    }

    fn self_key(&self) -> PublicKey {
        self.ports.wallet.public_key()
    }

    fn usable_fee(&self, tx: &PendingTransaction, viewer: &PublicKey) -> Decimal8 {
        self.ports.fee_strategy.usable_fee(tx, viewer)
    }

    // =========================================================================
    // Transaction admission
    // =========================================================================

    /// Admits a transaction, relaying it when it would help close the
    /// current fee shortfall.
    pub async fn add_transaction(&self, tx: PendingTransaction, relay_on_validate: bool) -> Result<()> {
        let sig = tx.sig.clone();
        let outcome = self.admit_transaction(tx, relay_on_validate).await;
        match &outcome {
            Ok(()) => debug!("[tc-02] Transaction {} admitted", sig),
            Err(e) => {
                self.metrics.record_transaction_rejected();
                debug!("[tc-02] Transaction {} rejected: {}", sig, e);
            }
        }
        outcome
    }

    async fn admit_transaction(&self, tx: PendingTransaction, relay_on_validate: bool) -> Result<()> {
        let me = self.self_key();
        let cap = self.config.transaction_size_cap;

        {
            let latest_hash = self.latest_hash();
            let mut state = self.state.lock();
            state.check_admissible(&tx, cap)?;
            if self.settle_golden_ticket(&mut state, &tx, &latest_hash, &me)? {
                return Ok(());
            }
        }

        self.ports
            .validator
            .validate_inputs(&tx)
            .await
            .map_err(|e| MempoolError::ValidationFailed(e.to_string()))?;

        // A same-tip ticket may have been queued while the validator ran.
        let fee = self.usable_fee(&tx, &me);
        let latest_hash = self.latest_hash();
        let relay = {
            let mut state = self.state.lock();
            state.check_admissible(&tx, cap)?;
            if self.settle_golden_ticket(&mut state, &tx, &latest_hash, &me)? {
                return Ok(());
            }
            let relay = relay_on_validate && state.bundling_fees_needed() > fee;
            state.insert_transaction(tx.clone(), cap)?;
            relay
        };
        self.metrics.record_transaction_admitted();

        if relay {
            if let Err(e) = self.ports.network.propagate_transaction(&tx).await {
                warn!("[tc-02] Relay of transaction {} failed: {}", tx.sig, e);
            }
        }
        Ok(())
    }

    fn latest_hash(&self) -> BlockHash {
        self.ports
            .chain_reader
            .latest_block()
            .map(|blk| blk.header.hash)
            .unwrap_or_default()
    }

    /// Arbitrates `tx` against queued golden tickets when it is one.
    ///
    /// Returns `true` when `tx` took a resident ticket's slot and needs no
    /// further insert.
    fn settle_golden_ticket(
        &self,
        state: &mut PoolState,
        tx: &PendingTransaction,
        latest_hash: &str,
        me: &PublicKey,
    ) -> Result<bool> {
        if !tx.is_golden_ticket() {
            return Ok(false);
        }
        let cap = self.config.transaction_size_cap;
        match state.arbitrate_golden_ticket(tx, latest_hash, me, cap, |t| self.usable_fee(t, me))? {
            TicketArbitration::Vacant => Ok(false),
            TicketArbitration::Replaced { evicted } => {
                info!("[tc-02] Golden ticket {} replaced queued ticket {}", tx.sig, evicted);
                self.metrics.record_golden_ticket_replaced();
                Ok(true)
            }
            TicketArbitration::Outbid { resident } => Err(MempoolError::GoldenTicketOutbid(resident)),
        }
    }

    /// Decodes a transaction from JSON and admits it with relaying enabled.
    pub async fn import_transaction(&self, json: &[u8]) -> Result<()> {
        let tx = PendingTransaction::from_json(json)?;
        self.add_transaction(tx, true).await
    }

    pub fn remove_transaction(&self, sig: &str) -> bool {
        self.state.lock().remove_transaction(sig)
    }

    /// Drops every queued golden ticket.
    pub fn remove_golden_ticket(&self) -> usize {
        self.state.lock().remove_golden_ticket()
    }

    /// Drops every queued fee-capture transaction.
    pub fn remove_fee_transactions(&self) -> usize {
        self.state.lock().remove_fee_transactions()
    }

    /// Sum of usable fees of queued transactions compatible with `vote`.
    pub fn usable_transaction_fees(&self, vote: Vote) -> Result<Decimal8> {
        let me = self.self_key();
        self.state.lock().usable_fees(vote, |tx| self.usable_fee(tx, &me))
    }

    /// Shortfall computed by the last bundling tick (negative: surplus).
    pub fn bundling_fees_needed(&self) -> Decimal8 {
        self.state.lock().bundling_fees_needed()
    }

    // =========================================================================
    // Block queue
    // =========================================================================

    /// Queues a block for application.
    pub fn add_block(&self, block: PendingBlock) -> Result<()> {
        let hash = block.hash().to_string();
        self.state.lock().add_block(block, self.config.block_size_cap)?;
        self.metrics.record_block_queued();
        debug!("[tc-02] Block {} queued", hash);
        Ok(())
    }

    /// Decodes a block from JSON, queues it and kicks processing.
    pub fn import_block(&self, json: &[u8]) -> Result<()> {
        let block = PendingBlock::from_json(json)?;
        self.add_block(block)?;
        self.process_blocks();
        Ok(())
    }

    pub fn remove_block(&self, hash: &str) -> bool {
        self.state.lock().remove_block(hash)
    }

    /// Removes a committed block and the transactions it carried.
    pub fn clear_mempool(&self, block: &PendingBlock) {
        let _clearing = self.guards.clearing.try_acquire();
        self.state.lock().clear_block(block);
        debug!(
            "[tc-02] Cleared block {} ({} transactions)",
            block.hash(),
            block.transactions.len()
        );
    }

    /// Starts the processing loop if blocks are queued and it is idle.
    pub fn process_blocks(&self) {
        if self.guards.processing.is_held() || self.state.lock().block_count() == 0 {
            return;
        }
        self.ensure_drain_loop(DrainLoop::Processing);
    }

    async fn process_tick(&self) {
        if self.guards.clearing.is_held() {
            return;
        }
        let Some(_processing) = self.guards.processing.try_acquire() else {
            return;
        };
        let head = self.state.lock().front_block().cloned();
        let Some(block) = head else {
            return;
        };

        let force = block.prevalidated;
        match self
            .ports
            .chain_writer
            .add_block_to_blockchain(block.clone(), force)
            .await
        {
            Ok(true) => {
                self.metrics.record_block_apply(true);
                info!("[tc-02] Block #{} {} added to chain", block.header.id, block.hash());
                self.clear_mempool(&block);
            }
            Ok(false) => {
                self.metrics.record_block_apply(false);
                warn!("[tc-02] Chain refused block {}; left at head of queue", block.hash());
            }
            Err(e) => {
                self.metrics.record_block_apply(false);
                warn!("[tc-02] Failed to apply block {}: {}", block.hash(), e);
            }
        }
    }

    // =========================================================================
    // Downloads
    // =========================================================================

    /// Queues a fetch of `hash` from `peer`.
    ///
    /// No-op when the hash is already indexed or a fetch for it is queued.
    pub fn fetch_block(&self, peer: PeerInfo, hash: &str) {
        if self.ports.chain_reader.is_hash_indexed(hash) {
            debug!("[tc-02] Block {} already indexed; not fetching", hash);
            return;
        }
        let task = DownloadTask {
            peer,
            block_hash: hash.to_string(),
        };
        let queued = self
            .state
            .lock()
            .enqueue_download(task, self.config.max_queued_downloads);
        match queued {
            Ok(true) => {
                debug!("[tc-02] Queued download of block {}", hash);
                self.ensure_drain_loop(DrainLoop::Downloading);
            }
            Ok(false) => debug!("[tc-02] Download of block {} already queued", hash),
            Err(e) => warn!("[tc-02] Dropped download of block {}: {}", hash, e),
        }
    }

    async fn download_tick(&self) {
        let Some(_downloading) = self.guards.downloading.try_acquire() else {
            return;
        };
        let next = {
            let state = self.state.lock();
            if state.block_size_current() > self.config.block_size_cap {
                return;
            }
            state.next_download().cloned()
        };
        let Some(task) = next else {
            return;
        };

        let timeout = Duration::from_millis(self.config.download_timeout_ms);
        let fetched = tokio::time::timeout(
            timeout,
            self.ports
                .fetcher
                .fetch_block(&task.peer, &task.block_hash, self.config.download_size_cap),
        )
        .await;
        self.state.lock().finish_download(&task.block_hash);

        let outcome = match fetched {
            Ok(Ok(bytes)) => self.accept_download(&task, &bytes),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(MempoolError::Network(format!(
                "timed out after {}ms",
                self.config.download_timeout_ms
            ))),
        };
        if let Err(e) = outcome {
            self.metrics.record_download_failed();
            warn!(
                "[tc-02] Download of block {} from {}:{} failed: {}",
                task.block_hash, task.peer.host, task.peer.port, e
            );
        }
    }

    fn accept_download(&self, task: &DownloadTask, bytes: &[u8]) -> Result<()> {
        let size = bytes.len() as u64;
        let cap = self.config.download_size_cap;
        if size > cap {
            return Err(MempoolError::DownloadTooLarge { size, cap });
        }
        let mut block = PendingBlock::from_json(bytes)?;
        if block.hash() != task.block_hash {
            return Err(MempoolError::InvalidBlock(format!(
                "requested {}, received {}",
                task.block_hash,
                block.hash()
            )));
        }
        block.originating_peer = Some(task.peer.publickey.clone());
        self.add_block(block)?;
        self.process_blocks();
        Ok(())
    }

    /// Spawns `which` unless it is already running.
    ///
    /// The loop clears its own slot, under the slot lock, once its queue
    /// is empty, so work enqueued before this call is always picked up.
    fn ensure_drain_loop(&self, which: DrainLoop) {
        let mut slot = self.timers.drain_slot(which).lock();
        if slot.is_some() {
            return;
        }
        let period = Duration::from_millis(match which {
            DrainLoop::Downloading => self.config.downloading_speed_ms,
            DrainLoop::Processing => self.config.processing_speed_ms,
        });
        let weak = self.weak_self.clone();
        *slot = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(this) = weak.upgrade() else {
                    break;
                };
                match which {
                    DrainLoop::Downloading => this.download_tick().await,
                    DrainLoop::Processing => this.process_tick().await,
                }
                let mut slot = this.timers.drain_slot(which).lock();
                if which.is_drained(&this.state.lock()) {
                    *slot = None;
                    debug!("[tc-02] {:?} loop drained", which);
                    break;
                }
            }
        }));
    }

    // =========================================================================
    // Bundling
    // =========================================================================

    /// Runs the bundling gates once and bundles if they all pass.
    pub async fn try_to_bundle_block(&self) -> BundleDecision {
        if !self.ports.monitor.ready_to_bundle() {
            return BundleDecision::NotReady;
        }

        let (latest, vote) = match self.ports.chain_reader.latest_block() {
            Some(blk) => {
                let vote = self.ports.voter.paysplit_vote(blk.header.paysplit);
                (blk, vote)
            }
            None => (ChainBlock::genesis_placeholder(), Vote::Hold),
        };

        let me = self.self_key();
        let needed = fees_needed(&latest.header, self.ports.time.now());
        let gates = {
            let mut state = self.state.lock();
            state.usable_fees(vote, |tx| self.usable_fee(tx, &me)).map(|available| {
                let shortfall = bundling_fees_needed(needed, available);
                state.set_bundling_fees_needed(shortfall);
                (
                    shortfall,
                    state.normal_transaction_count(),
                    state.contains_golden_ticket(),
                    state.block_count(),
                )
            })
        };
        let (shortfall, normal, has_ticket, queued_blocks) = match gates {
            Ok(gates) => gates,
            Err(e) => {
                warn!("[tc-02] Skipping bundling tick: {}", e);
                return BundleDecision::FeeOverflow;
            }
        };

        if shortfall > Decimal8::ZERO {
            return BundleDecision::FeesInsufficient(shortfall);
        }
        if normal == 0 && !self.free_block_allowed() {
            return BundleDecision::FreeBlockRefused;
        }
        if !has_ticket && latest.id() != 0 && normal == 0 {
            return BundleDecision::NothingToBundle;
        }

        let indexed = self.ports.chain_reader.indexed_block_count();
        if self.config.node_mode == NodeMode::Light && indexed == 0 {
            return BundleDecision::LightClientWithoutChain;
        }
        if queued_blocks > 0 {
            return BundleDecision::BlocksQueued;
        }
        if self.config.require_golden_ticket && !has_ticket && indexed > 0 {
            return BundleDecision::AwaitingGoldenTicket;
        }

        self.bundle_block(&latest).await
    }

    /// Free blocks are only produced by a node that is alone.
    ///
    /// A configured peer list consisting solely of this node's own host
    /// counts as alone.
    fn free_block_allowed(&self) -> bool {
        let peers = self.ports.network.configured_peers();
        if !peers.is_empty() {
            let only_self = match self.ports.network.local_endpoint() {
                Some(local) => peers.len() == 1 && peers[0].host == local.host,
                None => false,
            };
            if !only_self {
                return false;
            }
        }
        self.ports.network.connected_peer_count() == 0
    }

    /// Assembles a block on top of `prevblk` and queues it.
    pub async fn bundle_block(&self, prevblk: &ChainBlock) -> BundleDecision {
        let Some(_creating) = self.guards.creating.try_acquire() else {
            return BundleDecision::AlreadyCreating;
        };

        let vote = self.ports.voter.paysplit_vote(prevblk.header.paysplit);
        let transactions = self.state.lock().transactions_for_block(prevblk.hash(), vote);
        let mut candidate = CandidateBlock {
            creator: self.self_key(),
            prevhash: prevblk.hash().to_string(),
            paysplit_vote: vote,
            transactions,
        };
        info!(
            "[tc-02] Bundling block on #{} with {} transactions (vote {})",
            prevblk.id(),
            candidate.transactions.len(),
            vote
        );

        let surplus = self
            .ports
            .fee_oracle
            .creator_surplus(&candidate, prevblk, self.ports.time.now());
        if !surplus.is_negative() {
            match self.ports.wallet.create_fee_transaction(surplus) {
                Ok(fee_tx) => candidate.transactions.push(fee_tx),
                Err(e) => return BundleDecision::BuildFailed(e.to_string()),
            }
        }

        let block = match self.ports.builder.bundle_block(candidate, prevblk).await {
            Ok(block) => block,
            Err(e) => {
                warn!("[tc-02] Block assembly failed: {}", e);
                return BundleDecision::BuildFailed(e.to_string());
            }
        };
        let hash = block.hash().to_string();
        if let Err(e) = self.add_block(block) {
            warn!("[tc-02] Assembled block {} not queued: {}", hash, e);
            return BundleDecision::BuildFailed(e.to_string());
        }
        self.metrics.record_block_bundled();
        self.process_blocks();
        BundleDecision::Bundled(hash)
    }

    /// Schedules the bundling loop after the startup delay.
    ///
    /// Light nodes never bundle on their own.
    pub fn initialize(&self) {
        if self.config.node_mode == NodeMode::Light {
            info!("[tc-02] Light node; bundling loop not scheduled");
            return;
        }
        let weak = self.weak_self.clone();
        let delay = Duration::from_millis(self.config.startup_delay_ms);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(this) = weak.upgrade() {
                this.start_bundling();
            }
        });
    }

    /// Starts the bundling loop. No-op if it is already running.
    pub fn start_bundling(&self) {
        if !self.guards.bundling.raise() {
            return;
        }
        let period = Duration::from_millis(self.config.effective_bundling_speed_ms());
        info!("[tc-02] Starting bundling loop ({}ms)", period.as_millis());

        let weak = self.weak_self.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let Some(this) = weak.upgrade() else {
                    break;
                };
                let decision = this.try_to_bundle_block().await;
                debug!("[tc-02] Bundling tick: {:?}", decision);
            }
        });
        *self.timers.bundling.lock() = Some(handle);
    }

    /// Stops the bundling loop.
    pub fn stop_bundling(&self) {
        if let Some(handle) = self.timers.bundling.lock().take() {
            handle.abort();
            info!("[tc-02] Stopped bundling loop");
        }
        self.guards.bundling.lower();
    }

    pub fn is_bundling(&self) -> bool {
        self.guards.bundling.is_held()
    }

    /// Stops every loop.
    pub fn shutdown(&self) {
        self.stop_bundling();
        for slot in [&self.timers.downloading, &self.timers.processing] {
            if let Some(handle) = slot.lock().take() {
                handle.abort();
            }
        }
    }

    // =========================================================================
    // Reorganization
    // =========================================================================

    /// Stages a transaction from a block that left the longest chain.
    pub fn recover_transaction(&self, tx: PendingTransaction) {
        if !tx.is_well_formed() {
            debug!("[tc-02] Ignoring malformed recovered transaction {}", tx.sig);
            return;
        }
        self.state.lock().recover(tx);
    }

    /// Re-admits staged transactions without relaying them.
    ///
    /// Golden tickets and fee-capture transactions are dropped; they are
    /// bound to the block they came from.
    pub async fn reinsert_recovered_transactions(&self) {
        let recovered = self.state.lock().take_recovered();
        let total = recovered.len();
        let mut reinserted = 0;
        for tx in recovered {
            if tx.is_golden_ticket() || tx.is_fee_capture() {
                continue;
            }
            if self.add_transaction(tx, false).await.is_ok() {
                reinserted += 1;
            }
        }
        if total > 0 {
            info!("[tc-02] Reinserted {}/{} recovered transactions", reinserted, total);
        }
    }

    /// Signatures of queued transactions, for diagnostics.
    pub fn signatures(&self) -> Vec<Signature> {
        self.state
            .lock()
            .transactions()
            .iter()
            .map(|tx| tx.sig.clone())
            .collect()
    }
}

impl Drop for Mempool {
    fn drop(&mut self) {
        for slot in [
            &mut self.timers.downloading,
            &mut self.timers.processing,
            &mut self.timers.bundling,
        ] {
            if let Some(handle) = slot.get_mut().take() {
                handle.abort();
            }
        }
    }
}

#[async_trait]
impl MempoolApi for Mempool {
    async fn add_transaction(&self, tx: PendingTransaction, relay_on_validate: bool) -> Result<()> {
        Mempool::add_transaction(self, tx, relay_on_validate).await
    }

    fn add_block(&self, block: PendingBlock) -> Result<()> {
        Mempool::add_block(self, block)
    }

    async fn import_transaction(&self, json: &[u8]) -> Result<()> {
        Mempool::import_transaction(self, json).await
    }

    fn import_block(&self, json: &[u8]) -> Result<()> {
        Mempool::import_block(self, json)
    }

    fn fetch_block(&self, peer: PeerInfo, hash: &str) {
        Mempool::fetch_block(self, peer, hash)
    }

    fn recover_transaction(&self, tx: PendingTransaction) {
        Mempool::recover_transaction(self, tx)
    }

    async fn reinsert_recovered_transactions(&self) {
        Mempool::reinsert_recovered_transactions(self).await
    }

    fn usable_transaction_fees(&self, vote: Vote) -> Result<Decimal8> {
        Mempool::usable_transaction_fees(self, vote)
    }

    fn bundling_fees_needed(&self) -> Decimal8 {
        Mempool::bundling_fees_needed(self)
    }
}
