//! # Ledger Writer
//!
//! Submits a single custody transition and returns the receipt.

use crate::ports::LedgerClient;
use shared_types::{CustodyError, Identity, LedgerReceipt, Pointer, TransitionType};
use std::sync::Arc;
use tracing::info;

/// At-most-once transition writer.
///
/// One call maps to one ledger submission; this service never resubmits.
/// Not resubmitting an already-confirmed transition is the caller's
/// responsibility, and `Unconfirmed` failures leave no ledger state behind,
/// so the whole request is safe for the caller to retry.
pub struct LedgerWriter<C: LedgerClient> {
    client: Arc<C>,
}

impl<C: LedgerClient> LedgerWriter<C> {
    /// Create a writer over a ledger client.
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Submit one custody transition.
    pub async fn submit_transition(
        &self,
        batch_id: &str,
        transition: TransitionType,
        actor: &Identity,
        pointer: &Pointer,
    ) -> Result<LedgerReceipt, CustodyError> {
        let receipt = match transition {
            TransitionType::Create => self.client.create_batch(batch_id, pointer, actor).await?,
            other => {
                // Receives take custody for the actor; handoffs keep the
                // current owner on record until the receive lands.
                self.client
                    .transfer_batch(batch_id, other, actor, pointer, actor)
                    .await?
            }
        };
        info!(
            batch_id,
            %transition,
            actor = %actor,
            tx_ref = %receipt.tx_ref,
            "ledger transition confirmed"
        );
        Ok(receipt)
    }

    /// Anchor a prescription file pointer on the ledger.
    pub async fn anchor_prescription(
        &self,
        batch_id: &str,
        pointer: &Pointer,
        actor: &Identity,
    ) -> Result<LedgerReceipt, CustodyError> {
        let receipt = self
            .client
            .add_prescription_pointer(batch_id, pointer, actor)
            .await?;
        info!(batch_id, tx_ref = %receipt.tx_ref, "prescription pointer anchored");
        Ok(receipt)
    }
}
