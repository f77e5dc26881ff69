//! # Role Authority Service
//!
//! Explicit per-call role checks and idempotent grants.

use crate::ports::PermissionStore;
use shared_types::{CustodyError, Identity, LedgerReceipt, Role};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of a grant request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GrantOutcome {
    /// Identity already held the role; no ledger write happened.
    AlreadyGranted,
    /// Role was granted.
    Granted {
        /// Receipt for the grant write.
        receipt: LedgerReceipt,
        /// Whether the post-grant read observed the new role. An
        /// unconfirmed read is advisory only: ledger finality can lag the
        /// write.
        confirmed: bool,
    },
}

/// Role membership service over the authoritative permission store.
///
/// Holds no cache: every check is a store call. Callers wanting a cache
/// must layer an explicitly invalidated one on top.
pub struct RoleAuthority<P: PermissionStore> {
    store: Arc<P>,
}

impl<P: PermissionStore> RoleAuthority<P> {
    /// Create an authority over a permission store.
    pub fn new(store: Arc<P>) -> Self {
        Self { store }
    }

    /// Check whether an identity holds a role.
    pub async fn has_role(&self, identity: &Identity, role: Role) -> Result<bool, CustodyError> {
        let held = self.store.has_role(role, identity).await?;
        debug!(identity = %identity, %role, held, "role check");
        Ok(held)
    }

    /// Grant a role idempotently.
    ///
    /// Returns `AlreadyGranted` without touching the ledger when the
    /// identity already holds the role. Otherwise grants and performs one
    /// read-after-write confirmation; an unconfirmed read is reported on
    /// the outcome and logged, never escalated to an error.
    pub async fn grant_role(
        &self,
        identity: &Identity,
        role: Role,
        granted_by: &Identity,
    ) -> Result<GrantOutcome, CustodyError> {
        if self.store.has_role(role, identity).await? {
            debug!(identity = %identity, %role, "grant skipped: already held");
            return Ok(GrantOutcome::AlreadyGranted);
        }

        let receipt = self.store.grant_role(role, identity, granted_by).await?;
        info!(identity = %identity, %role, tx_ref = %receipt.tx_ref, "role granted");

        let confirmed = self.store.has_role(role, identity).await?;
        if !confirmed {
            warn!(
                identity = %identity,
                %role,
                "post-grant read did not observe the role yet; finality may lag"
            );
        }

        Ok(GrantOutcome::Granted { receipt, confirmed })
    }
}
