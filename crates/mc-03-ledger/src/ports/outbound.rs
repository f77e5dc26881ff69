//! # Outbound Ports
//!
//! The ledger surface consumed by the custody subsystem. Every call that
//! writes re-evaluates its own preconditions at submission time; callers
//! validate first for fast failure, but the ledger's check is the one that
//! counts.

use async_trait::async_trait;
use shared_types::{CustodyError, CustodyEvent, Identity, LedgerReceipt, Pointer, Role, TransitionType};

/// Ledger contract surface - outbound port.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Mint a new batch. Manufacturer-gated; batch ids are unique forever.
    async fn create_batch(
        &self,
        batch_id: &str,
        pointer: &Pointer,
        actor: &Identity,
    ) -> Result<LedgerReceipt, CustodyError>;

    /// Advance a batch one step along the custody path.
    ///
    /// The ledger re-checks that `transition` is the unique legal successor
    /// of the batch's current status and that `actor` satisfies the
    /// transition's role or ownership gate.
    async fn transfer_batch(
        &self,
        batch_id: &str,
        transition: TransitionType,
        to: &Identity,
        pointer: &Pointer,
        actor: &Identity,
    ) -> Result<LedgerReceipt, CustodyError>;

    /// Anchor a prescription file pointer to a batch. Pharmacy-gated.
    async fn add_prescription_pointer(
        &self,
        batch_id: &str,
        pointer: &Pointer,
        actor: &Identity,
    ) -> Result<LedgerReceipt, CustodyError>;

    /// Ordered event history for a batch (oldest first).
    async fn get_events(&self, batch_id: &str) -> Result<Vec<CustodyEvent>, CustodyError>;

    /// Check role membership.
    async fn has_role(&self, role: Role, identity: &Identity) -> Result<bool, CustodyError>;

    /// Grant a role. Admin-gated.
    async fn grant_role(
        &self,
        role: Role,
        identity: &Identity,
        granted_by: &Identity,
    ) -> Result<LedgerReceipt, CustodyError>;
}
