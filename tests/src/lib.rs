//! # Medi-Chain Test Suite
//!
//! Unified test crate for cross-subsystem custody scenarios.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── custody_flows.rs   # creation, role gates, full lifecycle
//!     ├── concurrency.rs     # concurrent submitters, ledger backstop
//!     ├── partial_commit.rs  # index outages, read-repair
//!     └── verification.rs    # QR tokens, grants, degraded queries
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p mc-tests
//!
//! # By category
//! cargo test -p mc-tests integration::custody_flows::
//! cargo test -p mc-tests integration::concurrency::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
