//! # Ticket-Chain Subsystem Benchmarks
//!
//! | Subsystem | Operation | Target |
//! |-----------|-----------|--------|
//! | tc-01 Golden Ticket | Solver search, difficulty 1 | < 1ms |
//! | tc-01 Golden Ticket | Winner selection | O(1) in contenders |
//! | tc-02 Mempool | Transaction admission | < 50µs per tx |
//! | tc-02 Mempool | Usable fee sum | O(n) in queued txs |

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use shared_types::{BlockHeader, ChainBlock, Decimal8, PendingTransaction, Solution, Vote};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tc_01_golden_ticket::{calculate_monetary_policy, find_winners, Ed25519SolutionCrypto, GoldenTicketSolver};
use tc_tests::integration::fixtures::node;

fn block(difficulty: &str) -> ChainBlock {
    ChainBlock {
        header: BlockHeader {
            id: 10,
            hash: "3f".repeat(32),
            difficulty: difficulty.parse().unwrap(),
            treasury: Decimal8::from_int(2_868_100_000),
            coinbase: Decimal8::from_int(100),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn transactions(count: usize) -> Vec<PendingTransaction> {
    (0..count)
        .map(|i| PendingTransaction::new(format!("sig-{}", i), format!("sender-{}", i % 17), Decimal8::ONE))
        .collect()
}

// ============================================================================
// TC-01: Golden Ticket
// ============================================================================

fn bench_solver_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("tc-01-golden-ticket");
    let solver = GoldenTicketSolver::new(Arc::new(Ed25519SolutionCrypto), 100_000);
    let pubkey = "ab".repeat(32);
    let cancel = AtomicBool::new(false);

    for difficulty in ["0", "1"] {
        let target = block(difficulty);
        group.bench_with_input(BenchmarkId::new("solver_search", difficulty), &target, |b, target| {
            b.iter(|| black_box(solver.search(target, &pubkey, &cancel)))
        });
    }

    let prev = block("1").header;
    group.bench_function("monetary_policy", |b| {
        b.iter(|| black_box(calculate_monetary_policy(&prev, 10_000)))
    });

    let solution = Solution {
        sig: "9c".repeat(64),
        ..Default::default()
    };
    for size in [10, 1_000, 100_000] {
        let contenders: Vec<String> = (0..size).map(|i| format!("contender-{}", i)).collect();
        group.bench_with_input(BenchmarkId::new("find_winners", size), &contenders, |b, contenders| {
            b.iter(|| black_box(find_winners(&solution, contenders)))
        });
    }

    group.finish();
}

// ============================================================================
// TC-02: Mempool
// ============================================================================

fn bench_transaction_admission(c: &mut Criterion) {
    let mut group = c.benchmark_group("tc-02-mempool");
    let runtime = tokio::runtime::Runtime::new().unwrap();

    for size in [100, 1_000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("admit", size), &size, |b, &size| {
            b.iter_batched(
                || (node(1, 30001), transactions(size)),
                |(node, txs)| {
                    runtime.block_on(async {
                        for tx in txs {
                            node.mempool.add_transaction(tx, false).await.unwrap();
                        }
                    })
                },
                BatchSize::SmallInput,
            )
        });
    }

    let queued = node(2, 30002);
    runtime.block_on(async {
        for tx in transactions(5_000) {
            queued.mempool.add_transaction(tx, false).await.unwrap();
        }
    });
    group.bench_function("usable_fees_5000", |b| {
        b.iter(|| black_box(queued.mempool.usable_transaction_fees(Vote::Hold)))
    });

    group.finish();
}

criterion_group!(benches, bench_solver_search, bench_transaction_admission);
criterion_main!(benches);
