//! # Domain Module
//!
//! History invariants and pure event replay.

pub mod invariants;
pub mod replay;

pub use invariants::*;
pub use replay::*;
