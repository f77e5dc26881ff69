//! # Ports Layer
//!
//! Outbound trait for the consumed ledger surface.

mod outbound;

pub use outbound::LedgerClient;
