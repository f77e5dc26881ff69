//! # Domain Entities
//!
//! Core entities for the batch custody ledger.
//!
//! A `Batch` is the denormalized index view; the ordered `CustodyEvent`
//! sequence on the ledger is the ground truth it can always be rebuilt from.

use crate::value_objects::{AccountStatus, BatchStatus, CustodyEventType, Role};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Wallet identity of an actor.
///
/// Addresses are case-insensitive: equality, hashing, and ordering compare
/// the lowercased form, while `Display` and serialization preserve the
/// original spelling.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Wrap a raw wallet address.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The address as originally supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used for comparisons and store keys.
    pub fn normalized(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Identity {}

impl Hash for Identity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
    }
}

impl PartialOrd for Identity {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identity {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.normalized().cmp(&other.normalized())
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Off-chain index key for a batch record.
///
/// Opaque to the ledger: events embed it only so an index record can be
/// cross-referenced and rebuilt.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pointer(String);

impl Pointer {
    /// Wrap an existing pointer key.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Generate a fresh pointer key.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Pointer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One append-only ledger event in a batch's custody history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodyEvent {
    /// Event kind.
    pub event_type: CustodyEventType,
    /// Actor who submitted the transition.
    pub actor: Identity,
    /// Unix timestamp assigned at confirmation.
    pub timestamp: u64,
    /// Off-chain pointer carried for index cross-reference.
    pub pointer: Pointer,
    /// Ledger-assigned sequence number; history is ordered by it.
    pub sequence: u64,
}

/// Receipt for one confirmed ledger submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerReceipt {
    /// Transaction reference on the ledger.
    pub tx_ref: String,
    /// Unix timestamp of confirmation.
    pub confirmed_at: u64,
}

/// Denormalized batch record held by the index mirror.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// Globally unique, immutable, manufacturer-assigned identifier.
    pub batch_id: String,
    /// Index record key; embedded in every ledger event for this batch.
    pub pointer: Pointer,
    /// Drug name.
    pub drug_name: String,
    /// Expiry date as supplied by the manufacturer.
    pub expiry: String,
    /// Minting manufacturer.
    pub manufacturer: Identity,
    /// Role of the current owner.
    pub current_owner_role: Role,
    /// Actor of the most recent Created/Received event.
    pub current_owner: Identity,
    /// Current custody status.
    pub status: BatchStatus,
    /// Most recent ledger transaction reference mirrored into the index.
    pub ledger_tx_ref: Option<String>,
    /// Anchored prescription file pointer, once a pharmacy attaches one.
    pub prescription_pointer: Option<Pointer>,
    /// Unix timestamp of batch creation.
    pub created_at: u64,
}

/// Off-chain users-collection row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Wallet identity.
    pub wallet: Identity,
    /// Declared role.
    pub role: Role,
    /// Account lifecycle status.
    pub status: AccountStatus,
}

/// Current unix time in seconds.
pub fn now_unix() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
