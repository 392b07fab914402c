//! # Golden Ticket Miner
//!
//! Searches for a golden ticket on every new chain tip and submits the
//! solution to the mempool as a transaction.
//!
//! A new tip cancels the search on the previous one. A solution found for a
//! block that is no longer the tip is dropped.

use crate::adapters::{InMemoryChain, LocalWallet, TargetVoter};
use parking_lot::Mutex;
use shared_types::{ChainBlock, Signature};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tc_01_golden_ticket::{GoldenTicket, GoldenTicketSolver, SolutionCrypto};
use tc_02_mempool::{ChainReader, Mempool, Wallet};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Background golden ticket search.
pub struct GoldenTicketMiner {
    chain: Arc<InMemoryChain>,
    mempool: Arc<Mempool>,
    wallet: Arc<LocalWallet>,
    voter: Arc<TargetVoter>,
    crypto: Arc<dyn SolutionCrypto>,
    solver: Arc<GoldenTicketSolver>,
    is_active: AtomicBool,
    mining_handle: Mutex<Option<JoinHandle<()>>>,
    /// Cancel flag of the search in flight.
    current: Mutex<Option<Arc<AtomicBool>>>,
}

impl GoldenTicketMiner {
    pub fn new(
        chain: Arc<InMemoryChain>,
        mempool: Arc<Mempool>,
        wallet: Arc<LocalWallet>,
        voter: Arc<TargetVoter>,
        crypto: Arc<dyn SolutionCrypto>,
        solver_attempts: u64,
    ) -> Self {
        let solver = Arc::new(GoldenTicketSolver::new(crypto.clone(), solver_attempts));
        Self {
            chain,
            mempool,
            wallet,
            voter,
            crypto,
            solver,
            is_active: AtomicBool::new(false),
            mining_handle: Mutex::new(None),
            current: Mutex::new(None),
        }
    }

    /// Starts following the chain tip. No-op if already running.
    pub fn start(self: &Arc<Self>) {
        if self.is_active.swap(true, Ordering::SeqCst) {
            return;
        }
        info!("[tc-01] Starting golden ticket miner");

        let mut tips = self.chain.subscribe_tips();
        let this = Arc::clone(self);
        let handle = tokio::spawn(async move {
            loop {
                match tips.recv().await {
                    Ok(block) => {
                        let cancel = this.replace_search();
                        let miner = Arc::clone(&this);
                        tokio::spawn(async move {
                            miner.solve_block(block, cancel).await;
                        });
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        debug!("[tc-01] Miner skipped {} stale tips", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            info!("[tc-01] Golden ticket miner stopped");
        });
        *self.mining_handle.lock() = Some(handle);
    }

    /// Stops following the tip and cancels the search in flight.
    pub fn stop(&self) {
        self.is_active.store(false, Ordering::SeqCst);
        if let Some(cancel) = self.current.lock().take() {
            cancel.store(true, Ordering::Relaxed);
        }
        if let Some(handle) = self.mining_handle.lock().take() {
            handle.abort();
            info!("[tc-01] Mining task aborted");
        }
    }

    pub fn is_active(&self) -> bool {
        self.is_active.load(Ordering::SeqCst)
    }

    fn replace_search(&self) -> Arc<AtomicBool> {
        let cancel = Arc::new(AtomicBool::new(false));
        if let Some(previous) = self.current.lock().replace(cancel.clone()) {
            previous.store(true, Ordering::Relaxed);
        }
        cancel
    }

    /// Solves `block` and queues the ticket. Returns the ticket
    /// transaction's signature when the mempool accepted it.
    pub async fn solve_block(&self, block: ChainBlock, cancel: Arc<AtomicBool>) -> Option<Signature> {
        let pubkey = self.wallet.public_key();
        let random = {
            let solver = Arc::clone(&self.solver);
            let block = block.clone();
            let pubkey = pubkey.clone();
            let cancel = cancel.clone();
            tokio::task::spawn_blocking(move || solver.search(&block, &pubkey, &cancel))
                .await
                .ok()
                .flatten()?
        };

        let tip = self.chain.latest_block().map(|tip| tip.header.hash);
        if cancel.load(Ordering::Relaxed) || tip.as_deref() != Some(block.hash()) {
            debug!("[tc-01] Dropping solution for stale block {}", block.id());
            return None;
        }

        let ticket = match GoldenTicket::create_solution(
            &block,
            &pubkey,
            &self.wallet.private_key_hex(),
            &random,
            self.voter.as_ref(),
            self.crypto.as_ref(),
        ) {
            Ok(ticket) => ticket,
            Err(e) => {
                warn!("[tc-01] Cannot create solution for block {}: {}", block.id(), e);
                return None;
            }
        };

        let tx = self.wallet.create_golden_ticket_transaction(ticket.solution);
        let sig = tx.sig.clone();
        match self.mempool.add_transaction(tx, true).await {
            Ok(()) => {
                info!("[tc-01] Submitted golden ticket for block {}", block.id());
                Some(sig)
            }
            Err(e) => {
                debug!("[tc-01] Golden ticket for block {} not admitted: {}", block.id(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ChainBlockBuilder;
    use crate::container::{NodeConfig, NodeContainer};
    use shared_types::CandidateBlock;
    use std::time::Duration;
    use tc_02_mempool::{BlockBuilder, ChainWriter, MempoolConfig, SystemTimeSource};

    fn container() -> NodeContainer {
        let mut config = NodeConfig::default();
        config.mempool = MempoolConfig::for_testing();
        NodeContainer::new(config).unwrap()
    }

    fn miner(container: &NodeContainer) -> Arc<GoldenTicketMiner> {
        Arc::new(GoldenTicketMiner::new(
            container.chain.clone(),
            container.mempool.clone(),
            container.wallet.clone(),
            container.voter.clone(),
            container.crypto.clone(),
            1_000,
        ))
    }

    async fn commit_first_block(container: &NodeContainer) -> ChainBlock {
        let builder = ChainBlockBuilder::new(
            container.config.golden_ticket.clone(),
            container.config.genesis.clone(),
            Arc::new(SystemTimeSource),
        );
        let candidate = CandidateBlock {
            creator: container.wallet.public_key(),
            ..Default::default()
        };
        let block = builder
            .bundle_block(candidate, &ChainBlock::genesis_placeholder())
            .await
            .unwrap();
        container.chain.add_block_to_blockchain(block, false).await.unwrap();
        container.chain.latest_block().unwrap()
    }

    #[tokio::test]
    async fn test_solution_queued_for_tip() {
        let container = container();
        let miner = miner(&container);
        let tip = commit_first_block(&container).await;

        let sig = miner
            .solve_block(tip.clone(), Arc::new(AtomicBool::new(false)))
            .await
            .unwrap();

        assert!(container.mempool.contains_transaction(&sig));
        let queued = container.mempool.transactions();
        assert_eq!(queued[0].golden_ticket_target(), Some(tip.hash()));
    }

    #[tokio::test]
    async fn test_cancelled_search_submits_nothing() {
        let container = container();
        let miner = miner(&container);
        let tip = commit_first_block(&container).await;

        let result = miner.solve_block(tip, Arc::new(AtomicBool::new(true))).await;

        assert!(result.is_none());
        assert_eq!(container.mempool.status().transactions, 0);
    }

    #[tokio::test]
    async fn test_stale_block_dropped() {
        let container = container();
        let miner = miner(&container);
        commit_first_block(&container).await;

        let mut stale = container.chain.latest_block().unwrap();
        stale.header.hash = "gone".into();

        assert!(miner.solve_block(stale, Arc::new(AtomicBool::new(false))).await.is_none());
    }

    #[tokio::test]
    async fn test_running_miner_follows_new_tips() {
        let container = container();
        let miner = miner(&container);
        miner.start();
        assert!(miner.is_active());

        let tip = commit_first_block(&container).await;

        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while container.mempool.status().transactions == 0 {
            assert!(tokio::time::Instant::now() < deadline, "no golden ticket queued");
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(container.mempool.transactions()[0].golden_ticket_target(), Some(tip.hash()));

        miner.stop();
        assert!(!miner.is_active());
    }
}
