//! # Custody Engine
//!
//! Orchestrates custody transitions over the role authority, ledger
//! writer, and index mirror.

use crate::domain::{CommitState, CreationOutcome, NewBatch, TransitionOutcome, VerifiedBatch};
use mc_01_identity_codec::{ChainProfile, DecodedToken, QrToken};
use mc_02_role_authority::{GrantOutcome, PermissionStore, RoleAuthority};
use mc_03_ledger::{HistoryReader, LedgerClient, LedgerWriter};
use mc_04_index_mirror::{BatchFilter, IndexStore};
use shared_types::{
    AccountStatus, Batch, BatchStatus, CustodyError, CustodyEvent, Identity, Pointer, Role,
    TransitionType, UserRecord,
};
use std::sync::Arc;
use tracing::warn;

/// The custody state machine.
///
/// Holds no lock across the two external calls; the ledger's own
/// submission-time re-check is the concurrency backstop.
pub struct CustodyEngine<C, I, P>
where
    C: LedgerClient,
    I: IndexStore,
    P: PermissionStore,
{
    pub(crate) writer: LedgerWriter<C>,
    pub(crate) history: HistoryReader<C>,
    pub(crate) roles: RoleAuthority<P>,
    pub(crate) index: Arc<I>,
    profile: ChainProfile,
}

impl<C, I, P> CustodyEngine<C, I, P>
where
    C: LedgerClient,
    I: IndexStore,
    P: PermissionStore,
{
    /// Wire an engine over its collaborators.
    pub fn new(
        ledger: Arc<C>,
        index: Arc<I>,
        permissions: Arc<P>,
        profile: ChainProfile,
    ) -> Self {
        Self {
            writer: LedgerWriter::new(ledger.clone()),
            history: HistoryReader::new(ledger),
            roles: RoleAuthority::new(permissions),
            index,
            profile,
        }
    }

    /// Mint a new batch and generate its identity token.
    ///
    /// Ledger first, index second: a ledger failure aborts with no index
    /// write; an index failure yields a `PartiallyCommitted` creation.
    pub async fn create_batch(
        &self,
        new: NewBatch,
        actor: &Identity,
    ) -> Result<CreationOutcome, CustodyError> {
        if !self.roles.has_role(actor, Role::Manufacturer).await? {
            return Err(CustodyError::Unauthorized {
                actor: actor.to_string(),
                required: "manufacturer role".to_string(),
            });
        }

        let pointer = Pointer::generate();
        let receipt = self
            .writer
            .submit_transition(&new.batch_id, TransitionType::Create, actor, &pointer)
            .await?;

        let batch = Batch {
            batch_id: new.batch_id,
            pointer,
            drug_name: new.drug_name,
            expiry: new.expiry,
            manufacturer: actor.clone(),
            current_owner_role: Role::Manufacturer,
            current_owner: actor.clone(),
            status: BatchStatus::Created,
            ledger_tx_ref: Some(receipt.tx_ref.clone()),
            prescription_pointer: None,
            created_at: receipt.confirmed_at,
        };
        let commit = self.upsert_mirror(&batch).await;
        let token = QrToken::encode(&batch.batch_id, &self.profile);

        Ok(CreationOutcome {
            receipt,
            batch,
            token,
            commit,
        })
    }

    /// Advance a batch one step along the custody path.
    ///
    /// Validation order: unique legal successor, then actor gate, then the
    /// ledger submission (which re-checks both), then the index mirror.
    pub async fn request_transition(
        &self,
        batch_id: &str,
        transition: TransitionType,
        actor: &Identity,
    ) -> Result<TransitionOutcome, CustodyError> {
        let view = self.load_view(batch_id).await?;

        if view.status.next_transition() != Some(transition) {
            return Err(CustodyError::IllegalTransition {
                from: view.status,
                requested: transition,
            });
        }

        match transition.required_role() {
            Some(role) => {
                if !self.roles.has_role(actor, role).await? {
                    return Err(CustodyError::Unauthorized {
                        actor: actor.to_string(),
                        required: format!("{role} role"),
                    });
                }
            }
            None => {
                if &view.current_owner != actor {
                    return Err(CustodyError::Unauthorized {
                        actor: actor.to_string(),
                        required: "current ownership".to_string(),
                    });
                }
            }
        }

        // Ledger write. On failure we abort here: no index mutation may
        // mask a ledger failure.
        let receipt = self
            .writer
            .submit_transition(batch_id, transition, actor, &view.pointer)
            .await?;

        let mut batch = view;
        batch.status = transition.resulting_status();
        batch.ledger_tx_ref = Some(receipt.tx_ref.clone());
        if transition.transfers_ownership() {
            batch.current_owner = actor.clone();
            batch.current_owner_role = match batch.status {
                BatchStatus::ReceivedByDistributor => Role::Distributor,
                BatchStatus::ReceivedByPharmacy => Role::Pharmacy,
                _ => batch.current_owner_role,
            };
        }

        let commit = self.upsert_mirror(&batch).await;
        Ok(TransitionOutcome {
            receipt,
            batch,
            commit,
        })
    }

    /// Anchor a prescription file pointer to a batch.
    ///
    /// Gated on the pharmacy role and current ownership; the file itself
    /// lives in external storage, only the opaque pointer is anchored.
    pub async fn attach_prescription(
        &self,
        batch_id: &str,
        prescription: Pointer,
        actor: &Identity,
    ) -> Result<TransitionOutcome, CustodyError> {
        let view = self.load_view(batch_id).await?;

        if !self.roles.has_role(actor, Role::Pharmacy).await? {
            return Err(CustodyError::Unauthorized {
                actor: actor.to_string(),
                required: "pharmacy role".to_string(),
            });
        }
        if &view.current_owner != actor {
            return Err(CustodyError::Unauthorized {
                actor: actor.to_string(),
                required: "current ownership".to_string(),
            });
        }

        let receipt = self
            .writer
            .anchor_prescription(batch_id, &prescription, actor)
            .await?;

        let mut batch = view;
        batch.prescription_pointer = Some(prescription);
        batch.ledger_tx_ref = Some(receipt.tx_ref.clone());
        let commit = self.upsert_mirror(&batch).await;

        Ok(TransitionOutcome {
            receipt,
            batch,
            commit,
        })
    }

    /// Resolve a decoded QR token to the batch view and full history.
    pub async fn verify(&self, token: &DecodedToken) -> Result<VerifiedBatch, CustodyError> {
        let batch_id = token.batch_id();
        let batch = self.load_view(batch_id).await?;
        let history = self.history.get_history(batch_id).await?;
        Ok(VerifiedBatch {
            batch,
            history,
            via_legacy_token: token.is_legacy(),
        })
    }

    /// Approve an account: grant its on-ledger role idempotently and flip
    /// the users-collection row to Active.
    pub async fn approve_account(
        &self,
        wallet: &Identity,
        role: Role,
        admin: &Identity,
    ) -> Result<GrantOutcome, CustodyError> {
        let outcome = self.roles.grant_role(wallet, role, admin).await?;
        self.index
            .put_user(&UserRecord {
                wallet: wallet.clone(),
                role,
                status: AccountStatus::Active,
            })
            .await?;
        Ok(outcome)
    }

    /// Full custody history for display, oldest first.
    pub async fn get_history(&self, batch_id: &str) -> Result<Vec<CustodyEvent>, CustodyError> {
        self.history.get_history(batch_id).await
    }

    /// Query the index mirror.
    pub async fn query(&self, filter: &BatchFilter) -> Result<Vec<Batch>, CustodyError> {
        self.index.query(filter).await
    }

    /// Deployment profile used for token generation.
    pub fn profile(&self) -> &ChainProfile {
        &self.profile
    }

    /// Mirror a batch view into the index, downgrading failure to a
    /// partial commit. The ledger has already advanced at every call site,
    /// so this must never error and must never re-submit the ledger step.
    pub(crate) async fn upsert_mirror(&self, batch: &Batch) -> CommitState {
        match self.index.upsert(batch).await {
            Ok(()) => CommitState::Committed,
            Err(err) => {
                warn!(
                    batch_id = %batch.batch_id,
                    %err,
                    "index upsert failed after ledger commit; pending read-repair"
                );
                CommitState::PartiallyCommitted
            }
        }
    }
}
