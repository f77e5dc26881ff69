//! # Chain Profile
//!
//! Deployment coordinates stamped into every encoded token.

use serde::{Deserialize, Serialize};

/// Chain and contract coordinates of the ledger deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainProfile {
    /// Human-readable chain name.
    pub chain: String,
    /// Numeric chain id.
    pub chain_id: u64,
    /// Ledger contract address.
    pub contract: String,
}

impl ChainProfile {
    /// Build a profile for an arbitrary deployment.
    pub fn new(chain: impl Into<String>, chain_id: u64, contract: impl Into<String>) -> Self {
        Self {
            chain: chain.into(),
            chain_id,
            contract: contract.into(),
        }
    }
}

impl Default for ChainProfile {
    /// The reference testnet deployment.
    fn default() -> Self {
        Self::new(
            "sepolia",
            11_155_111,
            "0x0000000000000000000000000000000000000000",
        )
    }
}
