//! # Domain Value Objects
//!
//! Immutable value types for the batch custody ledger: roles, statuses,
//! transitions, and event kinds.

use serde::{Deserialize, Serialize};

/// On-ledger roles recognized by the permission store.
///
/// Consumers hold no on-ledger role: consumer accounts are auto-approved
/// off-chain and never appear in a role grant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Creates batches and initiates the first handoff.
    Manufacturer,
    /// Receives batches from manufacturers, ships to pharmacies.
    Distributor,
    /// Receives batches from distributors, dispenses to consumers.
    Pharmacy,
    /// Grants roles; never owns a batch.
    Admin,
}

impl Role {
    /// Role name as stored in the users collection.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manufacturer => "manufacturer",
            Role::Distributor => "distributor",
            Role::Pharmacy => "pharmacy",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Batch custody status machine.
///
/// The path is fixed and monotonic: no skips, no reversals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchStatus {
    /// Minted by a manufacturer; manufacturer still owns it.
    Created,
    /// Manufacturer handed off; distributor has not yet confirmed receipt.
    InTransitToDistributor,
    /// Distributor confirmed receipt and now owns the batch.
    ReceivedByDistributor,
    /// Distributor handed off; pharmacy has not yet confirmed receipt.
    InTransitToPharmacy,
    /// Pharmacy confirmed receipt and now owns the batch.
    ReceivedByPharmacy,
    /// Dispensed to a consumer. Terminal; retained for audit.
    Dispensed,
}

impl BatchStatus {
    /// The unique legal successor status, if any.
    pub fn successor(&self) -> Option<BatchStatus> {
        match self {
            BatchStatus::Created => Some(BatchStatus::InTransitToDistributor),
            BatchStatus::InTransitToDistributor => Some(BatchStatus::ReceivedByDistributor),
            BatchStatus::ReceivedByDistributor => Some(BatchStatus::InTransitToPharmacy),
            BatchStatus::InTransitToPharmacy => Some(BatchStatus::ReceivedByPharmacy),
            BatchStatus::ReceivedByPharmacy => Some(BatchStatus::Dispensed),
            BatchStatus::Dispensed => None,
        }
    }

    /// The unique legal transition out of this status, if any.
    pub fn next_transition(&self) -> Option<TransitionType> {
        match self {
            BatchStatus::Created => Some(TransitionType::ShipToDistributor),
            BatchStatus::InTransitToDistributor => Some(TransitionType::ReceiveByDistributor),
            BatchStatus::ReceivedByDistributor => Some(TransitionType::ShipToPharmacy),
            BatchStatus::InTransitToPharmacy => Some(TransitionType::ReceiveByPharmacy),
            BatchStatus::ReceivedByPharmacy => Some(TransitionType::Dispense),
            BatchStatus::Dispensed => None,
        }
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BatchStatus::Dispensed)
    }
}

impl std::fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BatchStatus::Created => "Created",
            BatchStatus::InTransitToDistributor => "InTransitToDistributor",
            BatchStatus::ReceivedByDistributor => "ReceivedByDistributor",
            BatchStatus::InTransitToPharmacy => "InTransitToPharmacy",
            BatchStatus::ReceivedByPharmacy => "ReceivedByPharmacy",
            BatchStatus::Dispensed => "Dispensed",
        };
        f.write_str(s)
    }
}

/// Requestable custody transitions.
///
/// `Create` is only valid for a batch id the ledger has never seen; every
/// other transition must be the unique legal successor of the batch's
/// current status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionType {
    /// Mint a new batch (manufacturer only).
    Create,
    /// Manufacturer hands the batch to a distributor.
    ShipToDistributor,
    /// Distributor confirms receipt.
    ReceiveByDistributor,
    /// Distributor hands the batch to a pharmacy.
    ShipToPharmacy,
    /// Pharmacy confirms receipt.
    ReceiveByPharmacy,
    /// Pharmacy dispenses to a consumer (terminal).
    Dispense,
}

impl TransitionType {
    /// Status the batch holds after this transition commits.
    pub fn resulting_status(&self) -> BatchStatus {
        match self {
            TransitionType::Create => BatchStatus::Created,
            TransitionType::ShipToDistributor => BatchStatus::InTransitToDistributor,
            TransitionType::ReceiveByDistributor => BatchStatus::ReceivedByDistributor,
            TransitionType::ShipToPharmacy => BatchStatus::InTransitToPharmacy,
            TransitionType::ReceiveByPharmacy => BatchStatus::ReceivedByPharmacy,
            TransitionType::Dispense => BatchStatus::Dispensed,
        }
    }

    /// Role the actor must hold, or `None` when the transition is gated on
    /// current ownership instead (the in-transit handoffs).
    pub fn required_role(&self) -> Option<Role> {
        match self {
            TransitionType::Create => Some(Role::Manufacturer),
            TransitionType::ShipToDistributor => None,
            TransitionType::ReceiveByDistributor => Some(Role::Distributor),
            TransitionType::ShipToPharmacy => None,
            TransitionType::ReceiveByPharmacy => Some(Role::Pharmacy),
            TransitionType::Dispense => Some(Role::Pharmacy),
        }
    }

    /// Event kind this transition appends to the ledger.
    pub fn event_type(&self) -> CustodyEventType {
        match self {
            TransitionType::Create => CustodyEventType::Created,
            TransitionType::ShipToDistributor | TransitionType::ShipToPharmacy => {
                CustodyEventType::TransferInitiated
            }
            TransitionType::ReceiveByDistributor | TransitionType::ReceiveByPharmacy => {
                CustodyEventType::Received
            }
            TransitionType::Dispense => CustodyEventType::Dispensed,
        }
    }

    /// Whether this transition changes the batch owner to the actor.
    ///
    /// Owner tracks the most recent Created/Received event; in-transit
    /// handoffs and dispensing leave ownership with the last confirmed
    /// holder.
    pub fn transfers_ownership(&self) -> bool {
        matches!(
            self,
            TransitionType::Create
                | TransitionType::ReceiveByDistributor
                | TransitionType::ReceiveByPharmacy
        )
    }
}

impl std::fmt::Display for TransitionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TransitionType::Create => "Create",
            TransitionType::ShipToDistributor => "ShipToDistributor",
            TransitionType::ReceiveByDistributor => "ReceiveByDistributor",
            TransitionType::ShipToPharmacy => "ShipToPharmacy",
            TransitionType::ReceiveByPharmacy => "ReceiveByPharmacy",
            TransitionType::Dispense => "Dispense",
        };
        f.write_str(s)
    }
}

/// Event kinds recorded on the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustodyEventType {
    /// Batch minted.
    Created,
    /// Current owner initiated a handoff.
    TransferInitiated,
    /// Receiving party confirmed custody.
    Received,
    /// Pharmacy dispensed to a consumer.
    Dispensed,
}

/// Off-chain account lifecycle.
///
/// Non-consumer registrations start Pending until an admin approves them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    /// Awaiting admin approval.
    Pending,
    /// Approved and usable.
    Active,
}
