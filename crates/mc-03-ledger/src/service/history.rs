//! # History Reader
//!
//! Reconstructs a batch's full event history from the ledger. Used for
//! display and for index read-repair.

use crate::domain::{invariant_created_first, invariant_ordered, replay, ReplayedState};
use crate::ports::LedgerClient;
use shared_types::{CustodyError, CustodyEvent};
use std::sync::Arc;
use tracing::debug;

/// Read-only history service over the ledger port.
pub struct HistoryReader<C: LedgerClient> {
    client: Arc<C>,
}

impl<C: LedgerClient> HistoryReader<C> {
    /// Create a reader over a ledger client.
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Full event history for a batch, oldest first.
    ///
    /// Events are ordered by ledger sequence. An unknown batch id yields
    /// `NotFound`; a history whose head is not the unique Created event is
    /// reported as a store corruption, never silently repaired.
    pub async fn get_history(&self, batch_id: &str) -> Result<Vec<CustodyEvent>, CustodyError> {
        let mut events = self.client.get_events(batch_id).await?;
        if events.is_empty() {
            return Err(CustodyError::NotFound(batch_id.to_string()));
        }
        events.sort_unstable_by_key(|e| e.sequence);
        if !invariant_ordered(&events) {
            return Err(CustodyError::Store(format!(
                "corrupt history for {batch_id}: duplicate sequence number"
            )));
        }
        invariant_created_first(&events)?;
        debug!(batch_id, events = events.len(), "history read");
        Ok(events)
    }

    /// Replay the history into the batch's current ledger-derived state.
    pub async fn rebuild(&self, batch_id: &str) -> Result<ReplayedState, CustodyError> {
        let events = self.get_history(batch_id).await?;
        replay(&events)
    }
}
