//! Ports for the Mempool subsystem (Hexagonal Architecture).
//!
//! - `inbound`: API exposed to node components (driving ports)
//! - `outbound`: collaborators the mempool calls into (driven ports)

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
