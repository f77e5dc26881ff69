//! # Token Decoding
//!
//! Parses scanned payloads into the tagged `DecodedToken` variant.

use crate::token::{DecodedToken, QrToken};
use shared_types::CustodyError;
use tracing::{debug, warn};

/// Decode a scanned payload.
///
/// JSON payloads must match the token shape and carry a non-empty
/// `batchId`; a JSON payload without one is rejected rather than falling
/// through to the legacy path. Non-JSON payloads are accepted only when
/// they contain a recognizable batch marker (`batchId` or `BATCH`), and
/// are returned tagged as `LegacyBare`.
pub fn decode(raw: &str) -> Result<DecodedToken, CustodyError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CustodyError::InvalidToken("empty payload".to_string()));
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => {
            let token: QrToken = serde_json::from_value(value)
                .map_err(|e| CustodyError::InvalidToken(format!("malformed token: {e}")))?;
            if token.batch_id.is_empty() {
                return Err(CustodyError::InvalidToken("missing batchId".to_string()));
            }
            debug!(batch_id = %token.batch_id, "decoded structured token");
            Ok(DecodedToken::Structured(token))
        }
        Err(_) => {
            // Historical scanner heuristic; origin unconfirmed, kept as-is.
            if trimmed.contains("batchId") || trimmed.contains("BATCH") {
                warn!(payload = %trimmed, "accepted legacy bare token");
                Ok(DecodedToken::LegacyBare(trimmed.to_string()))
            } else {
                Err(CustodyError::InvalidToken(
                    "payload is neither a token nor a legacy batch marker".to_string(),
                ))
            }
        }
    }
}

/// Decode one camera frame, if any.
///
/// Single blocking call for an external polling loop; the codec never owns
/// a capture loop or callback chain. Frames that do not decode yield
/// `None`.
pub fn decode_frame(frame: Option<&str>) -> Option<DecodedToken> {
    decode(frame?).ok()
}
