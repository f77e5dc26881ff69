//! # MC-03 Ledger
//!
//! The authoritative, append-only, role-gated custody ledger surface.
//!
//! ## Role in System
//!
//! - **Ground Truth**: the ordered event history on the ledger is sufficient
//!   to rebuild any index record; the index mirror is only a cache.
//! - **Correctness Backstop**: every precondition (role gate, ownership,
//!   unique batch id, strict status path) is re-evaluated by the ledger at
//!   submission time. Of two concurrent submitters for the same batch, at
//!   most one submission lands; the loser sees `Unauthorized` or
//!   `IllegalTransition` and must not auto-retry.
//! - **At-Most-Once Writer**: `LedgerWriter` submits exactly one transition
//!   per call and never resubmits; retry policy belongs to the caller.
//!
//! ## Module Structure
//!
//! ```text
//! mc-03-ledger/
//! ├── domain/      # history invariants, event replay
//! ├── ports/       # LedgerClient outbound port
//! ├── service/     # LedgerWriter, HistoryReader
//! └── adapters/    # in-memory reference ledger
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryLedger;
pub use domain::{invariant_created_first, invariant_ordered, replay, ReplayedState};
pub use ports::LedgerClient;
pub use service::{HistoryReader, LedgerWriter};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
