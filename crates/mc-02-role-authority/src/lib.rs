//! # MC-02 Role Authority
//!
//! Role membership checks and idempotent grants against the authoritative
//! permission store.
//!
//! ## Purpose
//!
//! Every custody transition is role-gated. This crate answers "does this
//! identity hold this role" with an explicit store call per check — there is
//! no ambient caching — and performs grants idempotently with a
//! read-after-write confirmation that is advisory, never blocking.
//!
//! ## Module Structure
//!
//! ```text
//! mc-02-role-authority/
//! ├── ports.rs       # PermissionStore outbound port
//! ├── authority.rs   # RoleAuthority service
//! └── adapters/      # In-memory permission store
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod authority;
pub mod ports;

pub use adapters::InMemoryPermissionStore;
pub use authority::{GrantOutcome, RoleAuthority};
pub use ports::PermissionStore;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
