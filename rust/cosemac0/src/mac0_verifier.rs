// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE_Mac0 tag verification.
//!
//! Verification flow:
//! - Parse the COSE_Mac0 bytes.
//! - Resolve the `alg` header (protected first, then unprotected).
//! - Optionally enforce the expected algorithm.
//! - Rebuild the `MAC_structure` from the protected bytes, AAD and payload.
//! - Hand it to the caller's `TagVerifier`.
//!
//! For detached payloads, callers must provide the payload in `VerifyOptions`.

use cosemac0_common::{CoseAlgorithm, CoseMac0, TagVerifier, TaggerError};

use crate::validation_result::{FailureCode, ValidationFailure, ValidationResult, VerifiedMac0};
use crate::verify_options::VerifyOptions;

pub(crate) fn verify_mac0(
    validator_name: &str,
    input: &[u8],
    verifier: &dyn TagVerifier,
    options: &VerifyOptions,
) -> ValidationResult {
    match CoseMac0::from_slice(input) {
        Ok(parsed) => verify_parsed_mac0(validator_name, &parsed, verifier, options),
        Err(e) => failed(
            validator_name,
            ValidationFailure::from_cose_error(FailureCode::CoseParseError, &e),
        ),
    }
}

pub(crate) fn verify_parsed_mac0(
    validator_name: &str,
    parsed: &CoseMac0,
    verifier: &dyn TagVerifier,
    options: &VerifyOptions,
) -> ValidationResult {
    match check(parsed, verifier, options) {
        Ok(verified) => {
            log::debug!(
                "{validator_name}: COSE_Mac0 verified (alg {}, detached {})",
                verified.algorithm.id(),
                verified.detached
            );
            ValidationResult::verified(validator_name, verified)
        }
        Err(failure) => failed(validator_name, failure),
    }
}

fn check(parsed: &CoseMac0, verifier: &dyn TagVerifier, options: &VerifyOptions) -> Result<VerifiedMac0, ValidationFailure> {
    let alg = cose_alg(parsed)?;

    // Catch alg confusion before any MAC is computed.
    if let Some(expected) = options.expected_alg {
        if expected != alg {
            return Err(ValidationFailure::new(
                FailureCode::AlgMismatch,
                format!("alg header mismatch: expected {expected:?}, got {alg:?}"),
            ));
        }
    }
    if verifier.algorithm() != alg {
        return Err(ValidationFailure::new(
            FailureCode::AlgMismatch,
            format!("verifier algorithm {:?} does not match alg header {alg:?}", verifier.algorithm()),
        ));
    }

    let to_be_maced = parsed
        .to_be_maced(options.external_payload.as_deref(), &options.external_aad)
        .map_err(|e| ValidationFailure::from_cose_error(FailureCode::MacStructureError, &e))?;

    verifier.verify_tag(&to_be_maced, &parsed.tag).map_err(|e| match e {
        TaggerError::TagMismatch => ValidationFailure::new(FailureCode::TagMismatch, "MAC tag did not verify"),
        other => ValidationFailure::new(FailureCode::TaggerError, other.to_string()),
    })?;

    Ok(VerifiedMac0 {
        algorithm: alg,
        detached: parsed.payload.is_none(),
    })
}

fn cose_alg(parsed: &CoseMac0) -> Result<CoseAlgorithm, ValidationFailure> {
    parsed
        .algorithm()
        .map_err(|e| ValidationFailure::from_cose_error(FailureCode::MissingOrInvalidAlg, &e))?
        .ok_or_else(|| ValidationFailure::new(FailureCode::MissingOrInvalidAlg, "missing alg header"))
}

fn failed(validator_name: &str, failure: ValidationFailure) -> ValidationResult {
    log::debug!("{validator_name}: {failure}");
    ValidationResult::failed(validator_name, failure)
}
