//! # In-Memory Reference Ledger
//!
//! Reference `LedgerClient` implementing the contract's submission-time
//! preconditions: role gates per transition, unique batch ids, and the
//! strict status path. Each precondition check and the event append happen
//! under one write lock, so of two concurrent submitters for the same
//! batch at most one lands.
//!
//! Also implements the role authority's `PermissionStore`, since the real
//! contract carries both surfaces.

use crate::ports::LedgerClient;
use async_trait::async_trait;
use mc_02_role_authority::PermissionStore;
use parking_lot::RwLock;
use shared_types::{
    now_unix, BatchStatus, CustodyError, CustodyEvent, Identity, LedgerReceipt, Pointer, Role,
    TransitionType,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::warn;

struct BatchRecord {
    status: BatchStatus,
    owner: Identity,
    events: Vec<CustodyEvent>,
    prescription: Option<Pointer>,
}

/// In-memory implementation of `LedgerClient` for tests and local runs.
pub struct InMemoryLedger {
    batches: RwLock<HashMap<String, BatchRecord>>,
    grants: RwLock<HashMap<String, HashSet<Role>>>,
    sequence: AtomicU64,
    fail_submissions: AtomicBool,
    admin: Identity,
}

impl InMemoryLedger {
    /// Create a ledger whose deploying admin holds the Admin role.
    pub fn new(admin: Identity) -> Self {
        let mut grants = HashMap::new();
        grants.insert(admin.normalized(), HashSet::from([Role::Admin]));
        Self {
            batches: RwLock::new(HashMap::new()),
            grants: RwLock::new(grants),
            sequence: AtomicU64::new(0),
            fail_submissions: AtomicBool::new(false),
            admin,
        }
    }

    /// When enabled, every submission is rejected as unconfirmed and no
    /// state advances. Used to exercise the safe-retry path.
    pub fn set_fail_submissions(&self, fail: bool) {
        self.fail_submissions.store(fail, Ordering::SeqCst);
    }

    /// Prescription pointer anchored to a batch, if any.
    pub fn prescription_pointer(&self, batch_id: &str) -> Option<Pointer> {
        self.batches
            .read()
            .get(batch_id)
            .and_then(|r| r.prescription.clone())
    }

    fn holds_role(&self, role: Role, identity: &Identity) -> bool {
        self.grants
            .read()
            .get(&identity.normalized())
            .is_some_and(|roles| roles.contains(&role))
    }

    fn reject_if_down(&self) -> Result<(), CustodyError> {
        if self.fail_submissions.load(Ordering::SeqCst) {
            return Err(CustodyError::Unconfirmed(
                "submission timed out".to_string(),
            ));
        }
        Ok(())
    }

    fn next_receipt(&self) -> LedgerReceipt {
        LedgerReceipt {
            tx_ref: format!("0x{}", hex::encode(uuid::Uuid::new_v4().as_bytes())),
            confirmed_at: now_unix(),
        }
    }
}

#[async_trait]
impl LedgerClient for InMemoryLedger {
    async fn create_batch(
        &self,
        batch_id: &str,
        pointer: &Pointer,
        actor: &Identity,
    ) -> Result<LedgerReceipt, CustodyError> {
        self.reject_if_down()?;
        if !self.holds_role(Role::Manufacturer, actor) {
            return Err(CustodyError::Unauthorized {
                actor: actor.to_string(),
                required: "manufacturer role".to_string(),
            });
        }

        let mut batches = self.batches.write();
        if batches.contains_key(batch_id) {
            return Err(CustodyError::DuplicateBatch(batch_id.to_string()));
        }

        let event = CustodyEvent {
            event_type: TransitionType::Create.event_type(),
            actor: actor.clone(),
            timestamp: now_unix(),
            pointer: pointer.clone(),
            sequence: self.sequence.fetch_add(1, Ordering::SeqCst),
        };
        batches.insert(
            batch_id.to_string(),
            BatchRecord {
                status: BatchStatus::Created,
                owner: actor.clone(),
                events: vec![event],
                prescription: None,
            },
        );
        Ok(self.next_receipt())
    }

    async fn transfer_batch(
        &self,
        batch_id: &str,
        transition: TransitionType,
        to: &Identity,
        pointer: &Pointer,
        actor: &Identity,
    ) -> Result<LedgerReceipt, CustodyError> {
        self.reject_if_down()?;

        // Role gate is checked before taking the batch lock; grants never
        // change mid-submission in this adapter.
        if let Some(role) = transition.required_role() {
            if !self.holds_role(role, actor) {
                return Err(CustodyError::Unauthorized {
                    actor: actor.to_string(),
                    required: format!("{role} role"),
                });
            }
        }

        let mut batches = self.batches.write();
        let record = batches
            .get_mut(batch_id)
            .ok_or_else(|| CustodyError::NotFound(batch_id.to_string()))?;

        // Submission-time re-check: the unique legal successor, evaluated
        // against the status as of this lock acquisition. A concurrent
        // winner changes the status before the loser gets here.
        if record.status.next_transition() != Some(transition) {
            warn!(
                batch_id,
                status = %record.status,
                requested = %transition,
                "transition rejected at submission time"
            );
            return Err(CustodyError::IllegalTransition {
                from: record.status,
                requested: transition,
            });
        }

        if transition.required_role().is_none() && &record.owner != actor {
            return Err(CustodyError::Unauthorized {
                actor: actor.to_string(),
                required: "current ownership".to_string(),
            });
        }

        record.events.push(CustodyEvent {
            event_type: transition.event_type(),
            actor: actor.clone(),
            timestamp: now_unix(),
            pointer: pointer.clone(),
            sequence: self.sequence.fetch_add(1, Ordering::SeqCst),
        });
        record.status = transition.resulting_status();
        if transition.transfers_ownership() {
            record.owner = to.clone();
        }
        Ok(self.next_receipt())
    }

    async fn add_prescription_pointer(
        &self,
        batch_id: &str,
        pointer: &Pointer,
        actor: &Identity,
    ) -> Result<LedgerReceipt, CustodyError> {
        self.reject_if_down()?;
        if !self.holds_role(Role::Pharmacy, actor) {
            return Err(CustodyError::Unauthorized {
                actor: actor.to_string(),
                required: "pharmacy role".to_string(),
            });
        }
        let mut batches = self.batches.write();
        let record = batches
            .get_mut(batch_id)
            .ok_or_else(|| CustodyError::NotFound(batch_id.to_string()))?;
        record.prescription = Some(pointer.clone());
        Ok(self.next_receipt())
    }

    async fn get_events(&self, batch_id: &str) -> Result<Vec<CustodyEvent>, CustodyError> {
        Ok(self
            .batches
            .read()
            .get(batch_id)
            .map(|r| r.events.clone())
            .unwrap_or_default())
    }

    async fn has_role(&self, role: Role, identity: &Identity) -> Result<bool, CustodyError> {
        Ok(self.holds_role(role, identity))
    }

    async fn grant_role(
        &self,
        role: Role,
        identity: &Identity,
        granted_by: &Identity,
    ) -> Result<LedgerReceipt, CustodyError> {
        self.reject_if_down()?;
        if !self.holds_role(Role::Admin, granted_by) {
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
        Ok(self.next_receipt())
    }
}

#[async_trait]
impl PermissionStore for InMemoryLedger {
    async fn has_role(&self, role: Role, identity: &Identity) -> Result<bool, CustodyError> {
        LedgerClient::has_role(self, role, identity).await
    }

    async fn grant_role(
        &self,
        role: Role,
        identity: &Identity,
        granted_by: &Identity,
    ) -> Result<LedgerReceipt, CustodyError> {
        LedgerClient::grant_role(self, role, identity, granted_by).await
    }
}
