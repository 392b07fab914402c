//! Domain layer for the Mempool subsystem.
//!
//! Contains the pool state, fee arithmetic, loop latches and errors.
//! Nothing here performs I/O or spawns tasks.

pub mod entities;
pub mod errors;
pub mod fees;
pub mod guards;
pub mod pool;

pub use entities::*;
pub use errors::*;
pub use fees::*;
pub use guards::*;
pub use pool::*;
