//! # Adapters Layer
//!
//! Reference implementations of the index port.

mod memory_index;

pub use memory_index::InMemoryIndex;
