// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! CBOR codecs for COSE_Mac0 messages, COSE header maps and COSE_Key public keys.
//!
//! The MAC algorithm itself is not implemented here; callers plug one in through
//! the [`Tagger`] / [`TagVerifier`] traits.

mod cbor;

pub mod error;
pub mod headers;
pub mod key;
pub mod labels;
pub mod mac0;
pub mod tagger;

pub use error::{CoseError, Stage, TaggerError};
pub use headers::Headers;
pub use key::{CoseKey, Curve, KeyType};
pub use labels::{CoseAlgorithm, HeaderLabel};
pub use mac0::{build_to_be_maced, CoseMac0, COSE_MAC0_TAG, MAC_STRUCTURE_CONTEXT_MAC0};
pub use tagger::{TagVerifier, Tagger};
