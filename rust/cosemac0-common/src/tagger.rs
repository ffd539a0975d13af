// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Pluggable MAC strategies.
//!
//! Implementations receive the encoded `MAC_structure` bytes and never see the
//! envelope itself. Calls are synchronous; a strategy that needs cancellation
//! or timeouts has to provide them itself.

use crate::error::TaggerError;
use crate::labels::CoseAlgorithm;

/// Produces MAC tags.
pub trait Tagger {
    /// Algorithm written into the protected `alg` header.
    fn algorithm(&self) -> CoseAlgorithm;

    fn create_tag(&self, to_be_maced: &[u8]) -> Result<Vec<u8>, TaggerError>;
}

/// Checks MAC tags.
///
/// Contract:
/// - Return `Ok(())` when `tag` is valid for `to_be_maced`.
/// - Return `Err(TaggerError::TagMismatch)` when it is not.
/// - Return `Err(TaggerError::Message(..))` for any other failure (bad key, unsupported algorithm).
pub trait TagVerifier {
    fn algorithm(&self) -> CoseAlgorithm;

    fn verify_tag(&self, to_be_maced: &[u8], tag: &[u8]) -> Result<(), TaggerError>;
}
