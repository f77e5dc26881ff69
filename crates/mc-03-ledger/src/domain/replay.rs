//! # Event Replay
//!
//! Pure reconstruction of a batch's current state from its ordered event
//! history. Read-repair rebuilds index records through this path; the
//! ledger history alone decides status and ownership.

use crate::domain::invariants::invariant_created_first;
use shared_types::{BatchStatus, CustodyError, CustodyEvent, Identity, Pointer, Role};

/// Batch state derived purely from the ledger history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayedState {
    /// Status after the last event.
    pub status: BatchStatus,
    /// Actor of the most recent Created/Received event.
    pub current_owner: Identity,
    /// Role of the current owner.
    pub current_owner_role: Role,
    /// Minting manufacturer (actor of the Created event).
    pub manufacturer: Identity,
    /// Off-chain pointer carried by the events.
    pub pointer: Pointer,
    /// Timestamp of the Created event.
    pub created_at: u64,
}

/// Replay an ordered history into the resulting batch state.
///
/// Fails with `Store` when the history violates the custody path: a
/// non-Created head, a second Created event, an event after the terminal
/// status, or an event kind that does not match the unique legal successor.
pub fn replay(events: &[CustodyEvent]) -> Result<ReplayedState, CustodyError> {
    invariant_created_first(events)?;
    let created = &events[0];

    let mut state = ReplayedState {
        status: BatchStatus::Created,
        current_owner: created.actor.clone(),
        current_owner_role: Role::Manufacturer,
        manufacturer: created.actor.clone(),
        pointer: created.pointer.clone(),
        created_at: created.timestamp,
    };

    for event in &events[1..] {
        let transition = state.status.next_transition().ok_or_else(|| {
            CustodyError::Store(format!(
                "corrupt history: event {:?} after terminal status",
                event.event_type
            ))
        })?;
        if event.event_type != transition.event_type() {
            return Err(CustodyError::Store(format!(
                "corrupt history: {:?} event where {} was expected",
                event.event_type, transition
            )));
        }

        state.status = transition.resulting_status();
        if transition.transfers_ownership() {
            state.current_owner = event.actor.clone();
            state.current_owner_role = match state.status {
                BatchStatus::ReceivedByDistributor => Role::Distributor,
                BatchStatus::ReceivedByPharmacy => Role::Pharmacy,
                _ => state.current_owner_role,
            };
        }
    }

    Ok(state)
}
