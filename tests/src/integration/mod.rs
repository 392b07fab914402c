//! Cross-crate integration scenarios.

pub mod fixtures;
mod flows;
mod multi_node;
