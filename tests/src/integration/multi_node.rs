//! # Multi-Node Flows
//!
//! Node A produces blocks; node B receives them and validates them in
//! full, since B did not build them:
//!
//! - as JSON pushed to `import_block`
//! - as downloads queued with `fetch_block`

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{
        miner, node, node_with_peers, wait_for_height, wait_until, PeerChainFetcher,
    };
    use node_runtime::adapters::LocalWallet;
    use node_runtime::NodeContainer;
    use shared_crypto::Ed25519KeyPair;
    use shared_types::{ChainBlock, Vote};
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tc_02_mempool::ChainReader;

    /// Node A with block 1 and block 2, the latter carrying a golden ticket.
    async fn producer() -> (NodeContainer, Vec<ChainBlock>) {
        let a = node(0xA1, 21001);
        assert!(a.mempool.try_to_bundle_block().await.is_bundled());
        let first = wait_for_height(&a, 1).await;

        miner(&a)
            .solve_block(first.clone(), Arc::new(AtomicBool::new(false)))
            .await
            .expect("golden ticket");
        let user = LocalWallet::new(Ed25519KeyPair::from_seed([0xEE; 32]));
        a.mempool
            .add_transaction(user.create_transaction("4".parse().unwrap(), Vote::Hold), false)
            .await
            .unwrap();
        assert!(a.mempool.try_to_bundle_block().await.is_bundled());
        let second = wait_for_height(&a, 2).await;

        (a, vec![first, second])
    }

    fn block_json(node: &NodeContainer, block: &ChainBlock) -> Vec<u8> {
        serde_json::to_vec(&node.chain.block_body(block.hash()).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_peer_imports_and_validates_blocks() {
        let (a, blocks) = producer().await;
        let b = node(0xB1, 21002);

        for block in &blocks {
            b.mempool.import_block(&block_json(&a, block)).unwrap();
        }

        let tip = wait_for_height(&b, 2).await;
        assert_eq!(tip.hash(), blocks[1].hash());
        assert_eq!(tip.fees, blocks[1].fees);
        assert_eq!(tip.contenders, blocks[1].contenders);
        wait_until("block queue drained", || b.mempool.status().blocks == 0).await;
    }

    #[tokio::test]
    async fn test_tampered_block_stays_queued() {
        let (a, blocks) = producer().await;
        let b = node(0xB2, 21003);
        b.mempool.import_block(&block_json(&a, &blocks[0])).unwrap();
        wait_for_height(&b, 1).await;

        let mut tampered: serde_json::Value =
            serde_json::from_slice(&block_json(&a, &blocks[1])).unwrap();
        tampered["header"]["coinbase"] = serde_json::json!("1000.00000000");
        b.mempool
            .import_block(&serde_json::to_vec(&tampered).unwrap())
            .unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        assert_eq!(b.chain.height(), 1);
        assert_eq!(b.mempool.status().blocks, 1);
        b.mempool.shutdown();
    }

    #[tokio::test]
    async fn test_blocks_downloaded_from_peer() {
        let (a, blocks) = producer().await;
        let peer = a.config.local_endpoint();
        let fetcher = PeerChainFetcher::default().with_peer(&peer, a.chain.clone());
        let b = node_with_peers(0xB3, 21004, fetcher);

        b.mempool.fetch_block(peer.clone(), blocks[0].hash());
        wait_for_height(&b, 1).await;
        b.mempool.fetch_block(peer.clone(), blocks[1].hash());
        let tip = wait_for_height(&b, 2).await;

        assert_eq!(tip.hash(), blocks[1].hash());
        assert_eq!(b.mempool.metrics().get_downloads_failed(), 0);
    }

    #[tokio::test]
    async fn test_download_of_unknown_block_fails_quietly() {
        let (a, _) = producer().await;
        let peer = a.config.local_endpoint();
        let fetcher = PeerChainFetcher::default().with_peer(&peer, a.chain.clone());
        let b = node_with_peers(0xB4, 21005, fetcher);

        b.mempool.fetch_block(peer, "no-such-block");

        wait_until("download attempted", || b.mempool.metrics().get_downloads_failed() == 1).await;
        wait_until("download queue drained", || b.mempool.status().downloads == 0).await;
        assert!(b.chain.latest_block().is_none());
    }
}
