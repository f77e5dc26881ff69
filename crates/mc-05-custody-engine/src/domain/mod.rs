//! # Domain Module
//!
//! Inputs and outcomes of custody operations.

use mc_01_identity_codec::QrToken;
use shared_types::{Batch, CustodyEvent, LedgerReceipt};

/// Request to mint a new batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewBatch {
    /// Manufacturer-assigned, globally unique batch id.
    pub batch_id: String,
    /// Drug name.
    pub drug_name: String,
    /// Expiry date.
    pub expiry: String,
}

/// How far a transition committed across the two stores.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitState {
    /// Ledger and index both updated.
    Committed,
    /// Ledger advanced but the index upsert failed. The transition is
    /// effective; the mirror is repaired later from the ledger history.
    /// Never resolved by retrying the ledger step.
    PartiallyCommitted,
}

/// Result of a committed custody transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// Ledger receipt for the submission.
    pub receipt: LedgerReceipt,
    /// Batch view after the transition.
    pub batch: Batch,
    /// Commit state across ledger and index.
    pub commit: CommitState,
}

impl TransitionOutcome {
    /// Whether both stores reflect the transition.
    pub fn is_fully_committed(&self) -> bool {
        self.commit == CommitState::Committed
    }
}

/// Result of minting a batch, including its one-time identity token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreationOutcome {
    /// Ledger receipt for the Created event.
    pub receipt: LedgerReceipt,
    /// The freshly minted batch view.
    pub batch: Batch,
    /// QR identity token, generated exactly once here.
    pub token: QrToken,
    /// Commit state across ledger and index.
    pub commit: CommitState,
}

/// Result of resolving a scanned token against ledger and index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedBatch {
    /// Current batch view.
    pub batch: Batch,
    /// Full custody history, oldest first.
    pub history: Vec<CustodyEvent>,
    /// Whether the token arrived through the legacy bare path.
    pub via_legacy_token: bool,
}
