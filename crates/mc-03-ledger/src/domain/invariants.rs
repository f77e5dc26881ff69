//! # History Invariants
//!
//! Structural rules every batch history must satisfy.

use shared_types::{CustodyError, CustodyEvent, CustodyEventType};

/// Invariant: history is non-empty and its first event is the unique
/// Created event.
pub fn invariant_created_first(events: &[CustodyEvent]) -> Result<(), CustodyError> {
    let first = events
        .first()
        .ok_or_else(|| CustodyError::Store("empty history".to_string()))?;
    if first.event_type != CustodyEventType::Created {
        return Err(CustodyError::Store(
            "corrupt history: first event is not Created".to_string(),
        ));
    }
    if events[1..]
        .iter()
        .any(|e| e.event_type == CustodyEventType::Created)
    {
        return Err(CustodyError::Store(
            "corrupt history: duplicate Created event".to_string(),
        ));
    }
    Ok(())
}

/// Invariant: ledger sequence numbers are strictly increasing.
pub fn invariant_ordered(events: &[CustodyEvent]) -> bool {
    events.windows(2).all(|w| w[0].sequence < w[1].sequence)
}
