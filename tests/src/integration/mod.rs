//! # Integration Tests
//!
//! Cross-subsystem scenarios: engine + ledger + index + role authority
//! wired the way a deployment wires them, with the in-memory reference
//! adapters standing in for the chain and the document store.

pub mod custody_flows;
pub mod partial_commit;
pub mod verification;

#[cfg(test)]
pub(crate) mod fixtures;
