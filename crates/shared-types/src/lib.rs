//! # Shared Types Crate
//!
//! Entities shared by the golden ticket lottery, the mempool and the node
//! runtime, and the fixed-point decimal all monetary values are computed in.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: pool, chain and lottery records are defined
//!   here once and passed by value between crates.
//! - **Exact Arithmetic**: fees, shares and policy values are `Decimal8`,
//!   never floating point.

pub mod decimal;
pub mod entities;
pub mod errors;

pub use decimal::{Decimal8, DecimalError, DECIMAL_PLACES, MAX_WHOLE_UNITS, SCALE};
pub use entities::*;
pub use errors::*;
