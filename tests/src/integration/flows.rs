//! # Single-Node Flows
//!
//! One node bundling on its own chain:
//!
//! 1. **Empty chain**: the first block is bundled without fees
//! 2. **Golden ticket**: the miner's solution rides in the next block
//! 3. **Fee market**: bundling waits until fees cover the burn fee
//! 4. **Reorganization**: recovered transactions are re-admitted

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{miner, node, node_config, wait_for_height, wait_until};
    use node_runtime::adapters::LocalWallet;
    use node_runtime::NodeContainer;
    use shared_crypto::Ed25519KeyPair;
    use shared_types::{ChainBlock, Decimal8, Vote};
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tc_02_mempool::{BundleDecision, ChainReader};

    fn d(s: &str) -> Decimal8 {
        s.parse().unwrap()
    }

    fn user() -> LocalWallet {
        LocalWallet::new(Ed25519KeyPair::from_seed([0xEE; 32]))
    }

    async fn bundle_first_block(node: &NodeContainer) -> ChainBlock {
        let decision = node.mempool.try_to_bundle_block().await;
        assert!(matches!(decision, BundleDecision::Bundled(_)), "got {:?}", decision);
        wait_for_height(node, 1).await
    }

    /// Block 1, then block 2 carrying a golden ticket and one user payment.
    async fn bundle_ticket_block(node: &NodeContainer, user: &LocalWallet) -> ChainBlock {
        let first = bundle_first_block(node).await;
        miner(node)
            .solve_block(first, Arc::new(AtomicBool::new(false)))
            .await
            .expect("golden ticket");
        node.mempool
            .add_transaction(user.create_transaction(d("5"), Vote::Hold), false)
            .await
            .unwrap();

        let decision = node.mempool.try_to_bundle_block().await;
        assert!(matches!(decision, BundleDecision::Bundled(_)), "got {:?}", decision);
        wait_for_height(node, 2).await
    }

    // =========================================================================
    // EMPTY CHAIN
    // =========================================================================

    #[tokio::test]
    async fn test_first_block_bundled_on_empty_chain() {
        let node = node(1, 20001);

        let tip = bundle_first_block(&node).await;

        assert_eq!(tip.header.treasury, node.config.genesis.treasury);
        assert!(tip.is_first());
        wait_until("block queue drained", || node.mempool.status().blocks == 0).await;

        let body = node.chain.block_body(tip.hash()).unwrap();
        assert_eq!(body.transactions.len(), 1);
        assert!(body.transactions[0].is_fee_capture());
    }

    #[tokio::test]
    async fn test_running_node_bundles_by_itself() {
        let node = node(2, 20002);
        node.mempool.initialize();

        let tip = wait_for_height(&node, 1).await;

        assert_eq!(tip.id(), 1);
        assert!(node.mempool.is_bundling());
        node.mempool.shutdown();
    }

    // =========================================================================
    // GOLDEN TICKET
    // =========================================================================

    #[tokio::test]
    async fn test_golden_ticket_carried_into_next_block() {
        let node = node(3, 20003);
        let user = user();

        let tip = bundle_ticket_block(&node, &user).await;

        let body = node.chain.block_body(tip.hash()).unwrap();
        assert!(body.golden_ticket().is_some());
        assert_eq!(tip.header.reclaimed, Decimal8::ZERO);
        assert_eq!(tip.contenders, vec![tc_02_mempool::Wallet::public_key(&user)]);
        assert!(tip.fees.creator_surplus > Decimal8::ZERO);
        wait_until("mempool cleared", || node.mempool.status().transactions == 0).await;
    }

    #[tokio::test]
    async fn test_running_miner_feeds_bundler() {
        let node = node(4, 20004);
        let miner = miner(&node);
        miner.start();

        bundle_first_block(&node).await;
        wait_until("golden ticket queued", || node.mempool.status().transactions == 1).await;
        node.mempool
            .add_transaction(user().create_transaction(d("5"), Vote::Hold), false)
            .await
            .unwrap();
        node.mempool.try_to_bundle_block().await;

        let tip = wait_for_height(&node, 2).await;
        assert_eq!(tip.header.reclaimed, Decimal8::ZERO);
        miner.stop();
    }

    // =========================================================================
    // FEE MARKET
    // =========================================================================

    #[tokio::test]
    async fn test_small_fee_does_not_bundle() {
        let node = node(5, 20005);
        bundle_first_block(&node).await;

        node.mempool
            .add_transaction(user().create_transaction(d("0.00001"), Vote::Hold), false)
            .await
            .unwrap();

        let decision = node.mempool.try_to_bundle_block().await;
        assert!(matches!(decision, BundleDecision::FeesInsufficient(_)), "got {:?}", decision);
        assert!(node.mempool.bundling_fees_needed() > Decimal8::ZERO);
    }

    #[tokio::test]
    async fn test_required_golden_ticket_gates_bundling() {
        let mut config = node_config(6, 20006);
        config.mempool.require_golden_ticket = true;
        let node = NodeContainer::new(config).unwrap();
        bundle_first_block(&node).await;

        node.mempool
            .add_transaction(user().create_transaction(d("5"), Vote::Hold), false)
            .await
            .unwrap();

        let decision = node.mempool.try_to_bundle_block().await;
        assert_eq!(decision, BundleDecision::AwaitingGoldenTicket);
    }

    #[tokio::test]
    async fn test_syncing_node_does_not_bundle() {
        let node = node(7, 20007);
        node.monitor.set_syncing(true);

        assert_eq!(node.mempool.try_to_bundle_block().await, BundleDecision::NotReady);
        assert!(node.chain.latest_block().is_none());
    }

    // =========================================================================
    // REORGANIZATION
    // =========================================================================

    #[tokio::test]
    async fn test_recovered_transactions_reinserted() {
        let node = node(8, 20008);
        let user = user();
        let tip = bundle_ticket_block(&node, &user).await;
        wait_until("mempool cleared", || node.mempool.status().transactions == 0).await;

        for tx in node.chain.block_body(tip.hash()).unwrap().transactions {
            node.mempool.recover_transaction(tx);
        }
        node.mempool.reinsert_recovered_transactions().await;

        let queued = node.mempool.transactions();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].fee, d("5"));
        assert!(!queued[0].is_golden_ticket());
        assert!(!queued[0].is_fee_capture());
    }
}
