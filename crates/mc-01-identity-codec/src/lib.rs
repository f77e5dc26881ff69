//! # MC-01 Identity Codec
//!
//! QR identity token encoding and decoding for batch verification.
//!
//! ## Purpose
//!
//! A batch's printable identity is a compact JSON token naming the chain,
//! the ledger contract, and the batch id. The token never embeds the
//! off-chain pointer: holders resolve the pointer by querying the index
//! mirror on `batchId`.
//!
//! ## Wire Format
//!
//! ```json
//! {"chain":"sepolia","chainId":11155111,"contract":"0x...","batchId":"B-1"}
//! ```
//!
//! A payload missing `batchId` is rejected. Bare non-JSON strings are
//! accepted only through the tagged legacy path, never coerced silently.
//!
//! ## Module Structure
//!
//! ```text
//! mc-01-identity-codec/
//! ├── profile.rs    # ChainProfile deployment config
//! ├── token.rs      # QrToken, DecodedToken
//! └── decode.rs     # decode / decode_frame
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod decode;
mod profile;
mod token;

pub use decode::{decode, decode_frame};
pub use profile::ChainProfile;
pub use token::{DecodedToken, QrToken};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
