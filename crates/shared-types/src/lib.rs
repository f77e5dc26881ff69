//! # Shared Types Crate
//!
//! This crate contains all domain entities, value objects, and the custody
//! error taxonomy shared across Medi-Chain subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Ledger Authoritative**: Entities carry the ledger cross-references
//!   (batch id, tx ref, event sequence) needed to rebuild any index record
//!   from the event history alone.
//! - **No Ambient State**: Role membership and batch status are always read
//!   from a store; nothing in this crate caches either.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use value_objects::*;
