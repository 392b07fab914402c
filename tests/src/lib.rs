//! # Ticket-Chain Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks for tc-01 and tc-02
//! └── src/integration/  # Whole-node scenarios
//!     ├── fixtures.rs   # Node construction and polling helpers
//!     ├── flows.rs      # Single node: bundle, mine, reinsert
//!     └── multi_node.rs # Block exchange between two nodes
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p tc-tests
//! cargo bench -p tc-tests
//! ```

pub mod integration;
