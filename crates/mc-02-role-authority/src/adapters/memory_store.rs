//! # In-Memory Permission Store
//!
//! Reference `PermissionStore` for tests and local runs. Supports a
//! finality-lag mode where the first read after a grant does not observe
//! it, mimicking a ledger whose reads trail confirmed writes.

use crate::ports::PermissionStore;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{now_unix, CustodyError, Identity, LedgerReceipt, Role};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// In-memory implementation of `PermissionStore`.
pub struct InMemoryPermissionStore {
    grants: RwLock<HashMap<String, HashSet<Role>>>,
    /// Grants whose first read should still miss (finality lag simulation).
    lagged: RwLock<HashSet<(String, Role)>>,
    finality_lag: AtomicBool,
    writes: AtomicU64,
    admin: Identity,
}

impl InMemoryPermissionStore {
    /// Create a store whose deploying admin holds the Admin role.
    pub fn new(admin: Identity) -> Self {
        let mut grants = HashMap::new();
        grants.insert(
            admin.normalized(),
            HashSet::from([Role::Admin]),
        );
        Self {
            grants: RwLock::new(grants),
            lagged: RwLock::new(HashSet::new()),
            finality_lag: AtomicBool::new(false),
            writes: AtomicU64::new(0),
            admin,
        }
    }

    /// When enabled, the first `has_role` after each grant returns false.
    pub fn set_finality_lag(&self, lag: bool) {
        self.finality_lag.store(lag, Ordering::SeqCst);
    }

    /// Number of grant writes performed.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    fn holds(&self, role: Role, identity: &Identity) -> bool {
        self.grants
            .read()
            .get(&identity.normalized())
            .is_some_and(|roles| roles.contains(&role))
    }
}

#[async_trait]
impl PermissionStore for InMemoryPermissionStore {
    async fn has_role(&self, role: Role, identity: &Identity) -> Result<bool, CustodyError> {
        let key = (identity.normalized(), role);
        if self.lagged.write().remove(&key) {
            // One stale read, then the grant becomes visible.
            return Ok(false);
        }
        Ok(self.holds(role, identity))
    }

    async fn grant_role(
        &self,
        role: Role,
        identity: &Identity,
        granted_by: &Identity,
    ) -> Result<LedgerReceipt, CustodyError> {
        if granted_by != &self.admin && !self.holds(Role::Admin, granted_by) {
            return Err(CustodyError::Unauthorized {
                actor: granted_by.to_string(),
                required: "admin role".to_string(),
            });
        }

        self.grants
            .write()
            .entry(identity.normalized())
            .or_default()
            .insert(role);
        let write_no = self.writes.fetch_add(1, Ordering::SeqCst) + 1;

        if self.finality_lag.load(Ordering::SeqCst) {
            self.lagged.write().insert((identity.normalized(), role));
        }

        Ok(LedgerReceipt {
            tx_ref: format!("0xgrant{write_no:08x}"),
            confirmed_at: now_unix(),
        })
    }
}
