//! # Outbound Ports
//!
//! Trait for the authoritative permission store (the ledger's role surface).

use async_trait::async_trait;
use shared_types::{CustodyError, Identity, LedgerReceipt, Role};

/// Authoritative role store - outbound port.
///
/// Implementations compare identities case-insensitively; `Identity`
/// equality already normalizes, and stores key on the normalized form.
#[async_trait]
pub trait PermissionStore: Send + Sync {
    /// Check whether an identity holds a role.
    async fn has_role(&self, role: Role, identity: &Identity) -> Result<bool, CustodyError>;

    /// Grant a role. Admin-gated at the store; not required to be
    /// idempotent — the caller short-circuits grants that are already held.
    async fn grant_role(
        &self,
        role: Role,
        identity: &Identity,
        granted_by: &Identity,
    ) -> Result<LedgerReceipt, CustodyError>;
}
