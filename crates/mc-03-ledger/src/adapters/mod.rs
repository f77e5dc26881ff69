//! # Adapters Layer
//!
//! Reference implementations of the ledger port.

mod memory_ledger;

pub use memory_ledger::InMemoryLedger;
