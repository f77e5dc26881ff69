//! # MC-04 Index Mirror
//!
//! Denormalized, rebuildable cache of batch state for fast querying.
//!
//! ## Role in System
//!
//! - **Cache, Never Truth**: every record cross-references a ledger batch
//!   id, and the ledger history is sufficient to rebuild any record. A lost
//!   or stale record is repaired from the ledger, never the other way.
//! - **Degraded Ordering, Never Data Loss**: when an adapter cannot serve
//!   creation-time ordering natively, queries fall back to an unordered
//!   fetch plus a client-side sort, and log the fallback.
//!
//! ## Module Structure
//!
//! ```text
//! mc-04-index-mirror/
//! ├── ports.rs     # IndexStore port, BatchFilter
//! └── adapters/    # in-memory index
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod ports;

pub use adapters::InMemoryIndex;
pub use ports::{BatchFilter, IndexStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
