//! # Read-Repair
//!
//! Rebuilds index records from the ledger's authoritative history. The
//! repair pass is idempotent and never touches the ledger; scheduling its
//! cadence is a deployment concern.

use crate::engine::CustodyEngine;
use mc_02_role_authority::PermissionStore;
use mc_03_ledger::{replay, LedgerClient};
use mc_04_index_mirror::IndexStore;
use shared_types::{Batch, CustodyError};
use tracing::{debug, info};

impl<C, I, P> CustodyEngine<C, I, P>
where
    C: LedgerClient,
    I: IndexStore,
    P: PermissionStore,
{
    /// Load the current batch view, preferring the index and falling back
    /// to ledger reconstruction on a miss. The ledger is ground truth; the
    /// index is a cache.
    pub(crate) async fn load_view(&self, batch_id: &str) -> Result<Batch, CustodyError> {
        match self.index.get_by_batch_id(batch_id).await {
            Ok(batch) => Ok(batch),
            Err(CustodyError::NotFound(_)) => {
                debug!(batch_id, "index miss; reconstructing from ledger");
                self.read_repair(batch_id).await
            }
            Err(other) => Err(other),
        }
    }

    /// Rebuild the index record for a batch from its event history.
    ///
    /// Status, ownership, and creation time come from replaying the
    /// ledger events. Off-chain metadata (drug name, expiry, tx ref,
    /// prescription pointer) is kept from any existing record, since the
    /// ledger never carried it. Repairing an already-consistent record is
    /// a no-op upsert.
    pub async fn read_repair(&self, batch_id: &str) -> Result<Batch, CustodyError> {
        let events = self.history.get_history(batch_id).await?;
        let state = replay(&events)?;

        let existing = match self.index.get(&state.pointer).await {
            Ok(batch) => Some(batch),
            Err(CustodyError::NotFound(_)) => None,
            Err(other) => return Err(other),
        };

        let batch = Batch {
            batch_id: batch_id.to_string(),
            pointer: state.pointer,
            drug_name: existing
                .as_ref()
                .map(|b| b.drug_name.clone())
                .unwrap_or_default(),
            expiry: existing
                .as_ref()
                .map(|b| b.expiry.clone())
                .unwrap_or_default(),
            manufacturer: state.manufacturer,
            current_owner_role: state.current_owner_role,
            current_owner: state.current_owner,
            status: state.status,
            ledger_tx_ref: existing.as_ref().and_then(|b| b.ledger_tx_ref.clone()),
            prescription_pointer: existing.and_then(|b| b.prescription_pointer),
            created_at: state.created_at,
        };

        self.index.upsert(&batch).await?;
        info!(batch_id, status = %batch.status, "index record rebuilt from ledger");
        Ok(batch)
    }
}

/// Repair a set of batch ids in one pass, returning the ids that failed.
///
/// Convenience for an external scheduler; each repair is independent and
/// idempotent, so a failed id can simply be retried on the next pass.
pub async fn repair_pass<C, I, P>(
    engine: &CustodyEngine<C, I, P>,
    batch_ids: &[String],
) -> Vec<(String, CustodyError)>
where
    C: LedgerClient,
    I: IndexStore,
    P: PermissionStore,
{
    let mut failures = Vec::new();
    for batch_id in batch_ids {
        if let Err(err) = engine.read_repair(batch_id).await {
            failures.push((batch_id.clone(), err));
        }
    }
    failures
}
