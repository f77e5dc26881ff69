//! # Identity Tokens
//!
//! The structured QR token and the tagged decode result.

use crate::profile::ChainProfile;
use serde::{Deserialize, Serialize};
use shared_types::CustodyError;

/// Structured QR identity token.
///
/// Generated exactly once, at batch creation. The off-chain pointer is
/// deliberately not part of the token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrToken {
    /// Chain name.
    pub chain: String,
    /// Numeric chain id.
    #[serde(rename = "chainId")]
    pub chain_id: u64,
    /// Ledger contract address.
    pub contract: String,
    /// Batch identifier the token resolves to.
    #[serde(rename = "batchId")]
    pub batch_id: String,
}

impl QrToken {
    /// Encode a batch id under a deployment profile.
    pub fn encode(batch_id: impl Into<String>, profile: &ChainProfile) -> Self {
        Self {
            chain: profile.chain.clone(),
            chain_id: profile.chain_id,
            contract: profile.contract.clone(),
            batch_id: batch_id.into(),
        }
    }

    /// Render the JSON wire form.
    pub fn to_json(&self) -> Result<String, CustodyError> {
        serde_json::to_string(self).map_err(|e| CustodyError::InvalidToken(e.to_string()))
    }
}

/// Tagged result of decoding a scanned payload.
///
/// Legacy bare-batchId payloads are surfaced explicitly so callers can
/// treat them differently from structured tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodedToken {
    /// Well-formed JSON token.
    Structured(QrToken),
    /// Bare non-JSON string carrying a recognizable batch marker.
    LegacyBare(String),
}

impl DecodedToken {
    /// Batch id the token resolves to.
    ///
    /// For the legacy path the entire raw payload stands in as the batch
    /// identifier, matching the historical scanner behavior.
    pub fn batch_id(&self) -> &str {
        match self {
            DecodedToken::Structured(token) => &token.batch_id,
            DecodedToken::LegacyBare(raw) => raw,
        }
    }

    /// Whether this came through the legacy path.
    pub fn is_legacy(&self) -> bool {
        matches!(self, DecodedToken::LegacyBare(_))
    }
}
