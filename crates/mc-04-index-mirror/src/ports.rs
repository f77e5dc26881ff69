//! # Ports Layer
//!
//! The off-chain index surface: a batches collection keyed by pointer and
//! a users collection keyed by wallet.

use async_trait::async_trait;
use shared_types::{Batch, BatchStatus, CustodyError, Identity, Pointer, UserRecord};

/// Equality filter over the batches collection.
///
/// All set fields must match. Ordering of results is best-effort
/// creation-time.
#[derive(Clone, Debug, Default)]
pub struct BatchFilter {
    /// Match on current owner identity.
    pub owner: Option<Identity>,
    /// Match on status.
    pub status: Option<BatchStatus>,
    /// Match on minting manufacturer.
    pub manufacturer: Option<Identity>,
}

impl BatchFilter {
    /// Filter by current owner.
    pub fn by_owner(owner: Identity) -> Self {
        Self {
            owner: Some(owner),
            ..Self::default()
        }
    }

    /// Filter by status.
    pub fn by_status(status: BatchStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Filter by manufacturer.
    pub fn by_manufacturer(manufacturer: Identity) -> Self {
        Self {
            manufacturer: Some(manufacturer),
            ..Self::default()
        }
    }

    /// Whether a batch satisfies every set field.
    pub fn matches(&self, batch: &Batch) -> bool {
        self.owner
            .as_ref()
            .is_none_or(|o| &batch.current_owner == o)
            && self.status.is_none_or(|s| batch.status == s)
            && self
                .manufacturer
                .as_ref()
                .is_none_or(|m| &batch.manufacturer == m)
    }
}

/// Off-chain index - port.
#[async_trait]
pub trait IndexStore: Send + Sync {
    /// Insert or update the record at the batch's pointer.
    async fn upsert(&self, batch: &Batch) -> Result<(), CustodyError>;

    /// Fetch by pointer.
    async fn get(&self, pointer: &Pointer) -> Result<Batch, CustodyError>;

    /// Fetch by batch id.
    async fn get_by_batch_id(&self, batch_id: &str) -> Result<Batch, CustodyError>;

    /// Equality query with best-effort creation-time ordering.
    async fn query(&self, filter: &BatchFilter) -> Result<Vec<Batch>, CustodyError>;

    /// Insert or update a users-collection row.
    async fn put_user(&self, user: &UserRecord) -> Result<(), CustodyError>;

    /// Fetch a users-collection row by wallet.
    async fn get_user(&self, wallet: &Identity) -> Result<UserRecord, CustodyError>;
}
