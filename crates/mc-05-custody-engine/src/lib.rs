//! # MC-05 Custody Engine
//!
//! The custody state machine: validates a requested transition, writes the
//! ledger, mirrors the index, and resolves partial failure.
//!
//! ## Role in System
//!
//! This is the single place enforcing "ledger authoritative, index
//! rebuildable" across two independently failing stores, without a
//! two-phase-commit coordinator:
//!
//! - A ledger failure aborts the request with **no** index write; nothing
//!   advanced, so the whole request is safe to retry.
//! - An index failure after ledger confirmation yields a
//!   `PartiallyCommitted` outcome: the transition is already effective, the
//!   mirror is repaired later from the ledger history, and the ledger step
//!   is never retried.
//!
//! ## Control Flow
//!
//! ```text
//! [UI / collaborator]
//!         │
//!         ▼
//! [Custody Engine (05)] ──▶ [Role Authority (02)]
//!         │                 [Ledger Writer  (03)]   ledger first,
//!         │                 [Index Mirror   (04)]   index second
//!         └───────────────▶ [History Reader (03)]   read-repair
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod engine;
pub mod repair;

pub use domain::{CommitState, CreationOutcome, NewBatch, TransitionOutcome, VerifiedBatch};
pub use engine::CustodyEngine;
pub use repair::repair_pass;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
