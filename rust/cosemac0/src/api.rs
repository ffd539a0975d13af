// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::io::{Read, Write};

use cosemac0_common::{CoseError, CoseMac0, TagVerifier, Tagger};

use crate::{mac0_verifier, ValidationResult, VerifyOptions};

/// Parse a COSE_Mac0 structure from its CBOR encoding.
pub fn parse_mac0(input: &[u8]) -> Result<CoseMac0, CoseError> {
    CoseMac0::from_slice(input)
}

/// Parse a COSE_Mac0 structure from an input stream of at most
/// [`DEFAULT_MAX_MAC0_LEN`](crate::DEFAULT_MAX_MAC0_LEN) bytes.
pub fn parse_mac0_from_reader(reader: impl Read) -> Result<CoseMac0, CoseError> {
    parse_mac0_from_reader_with_max_len(reader, crate::reader::DEFAULT_MAX_MAC0_LEN)
}

/// Parse a COSE_Mac0 structure from an input stream, enforcing a maximum size.
pub fn parse_mac0_from_reader_with_max_len(reader: impl Read, max_len: usize) -> Result<CoseMac0, CoseError> {
    let bytes = crate::reader::read_to_end_bounded(reader, max_len)?;
    CoseMac0::from_slice(&bytes)
}

/// Create a COSE_Mac0 over `payload`; see [`CoseMac0::create`].
pub fn create_mac0(
    payload: &[u8],
    external_aad: &[u8],
    detach: bool,
    tagger: &dyn Tagger,
) -> Result<CoseMac0, CoseError> {
    CoseMac0::create(payload, external_aad, detach, tagger)
}

/// Encode a COSE_Mac0 as an untagged CBOR array.
pub fn encode_mac0(msg: &CoseMac0) -> Result<Vec<u8>, CoseError> {
    msg.to_vec()
}

/// Encode a COSE_Mac0 into an output stream.
pub fn write_mac0(msg: &CoseMac0, writer: impl Write) -> Result<(), CoseError> {
    msg.write_to(writer)
}

/// Verify a COSE_Mac0 tag.
pub fn verify_mac0(
    validator_name: &str,
    cose_mac0: &[u8],
    verifier: &dyn TagVerifier,
    options: &VerifyOptions,
) -> ValidationResult {
    mac0_verifier::verify_mac0(validator_name, cose_mac0, verifier, options)
}

pub fn verify_parsed_mac0(
    validator_name: &str,
    parsed: &CoseMac0,
    verifier: &dyn TagVerifier,
    options: &VerifyOptions,
) -> ValidationResult {
    mac0_verifier::verify_parsed_mac0(validator_name, parsed, verifier, options)
}
