// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! High-level COSE_Mac0 facade.
//!
//! This crate is the primary Rust entry point for creating and verifying
//! COSE_Mac0 messages. The codecs live in `cosemac0-common`; MAC algorithms are
//! supplied by the caller (see `cosemac0-hmac`).

// Internal implementation modules.
mod mac0_verifier;
mod reader;

// Public API organization (lib.rs is a publisher).
mod api;
mod validation_result;
mod verify_options;

pub use cosemac0_common::{
    build_to_be_maced, CoseAlgorithm, CoseError, CoseKey, CoseMac0, Curve, HeaderLabel, Headers, KeyType, Stage,
    TagVerifier, Tagger, TaggerError,
};
pub use reader::DEFAULT_MAX_MAC0_LEN;
pub use validation_result::{FailureCode, ValidationFailure, ValidationResult, VerifiedMac0};
pub use verify_options::VerifyOptions;

pub use api::{
    create_mac0,
    encode_mac0,
    parse_mac0,
    parse_mac0_from_reader,
    parse_mac0_from_reader_with_max_len,
    verify_mac0,
    verify_parsed_mac0,
    write_mac0,
};
