//! # Adapters Layer
//!
//! Reference implementations of the permission store port.

mod memory_store;

pub use memory_store::InMemoryPermissionStore;
