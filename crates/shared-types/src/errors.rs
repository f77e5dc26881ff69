//! # Error Types
//!
//! The custody error taxonomy shared across subsystems.
//!
//! `PartiallyCommitted` is deliberately absent: a ledger write that lands
//! while the index upsert fails is a degraded success, reported on the
//! transition outcome, never as an error.

use crate::value_objects::{BatchStatus, TransitionType};
use thiserror::Error;

/// Errors that can occur across the custody subsystem.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CustodyError {
    /// Requested transition is not the unique legal successor.
    #[error("Illegal transition: {requested} is not valid from {from}")]
    IllegalTransition {
        /// Current batch status.
        from: BatchStatus,
        /// Transition that was requested.
        requested: TransitionType,
    },

    /// Actor's role or ownership does not satisfy the transition gate.
    #[error("Unauthorized: {actor} does not satisfy {required}")]
    Unauthorized {
        /// Actor that attempted the operation.
        actor: String,
        /// Role or ownership requirement that was not met.
        required: String,
    },

    /// Ledger submission was rejected or timed out; no state advanced,
    /// so the whole request is safe to retry.
    #[error("Ledger submission unconfirmed: {0}")]
    Unconfirmed(String),

    /// Batch or pointer absent from the queried store.
    #[error("Not found: {0}")]
    NotFound(String),

    /// QR payload could not be decoded into an identity token.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Batch id already exists on the ledger.
    #[error("Duplicate batch id: {0}")]
    DuplicateBatch(String),

    /// Underlying store failed.
    #[error("Store error: {0}")]
    Store(String),
}
