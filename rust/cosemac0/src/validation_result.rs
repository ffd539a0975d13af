// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Outcome of COSE_Mac0 verification.
//!
//! Verification stops at the first failing check, so a result carries at most
//! one failure. A successful result records what was verified.

use std::fmt;

use cosemac0_common::{CoseAlgorithm, CoseError, Stage};

/// Machine-readable reason a COSE_Mac0 failed verification.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FailureCode {
    /// The envelope could not be decoded.
    CoseParseError,
    /// No `alg` header, or the protected headers could not be decoded.
    MissingOrInvalidAlg,
    /// The `alg` header differs from the expected or the verifier's algorithm.
    AlgMismatch,
    /// The `MAC_structure` could not be built (e.g. detached payload not supplied).
    MacStructureError,
    TagMismatch,
    /// The verification strategy itself failed.
    TaggerError,
}

impl FailureCode {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureCode::CoseParseError => "COSE_PARSE_ERROR",
            FailureCode::MissingOrInvalidAlg => "MISSING_OR_INVALID_ALG",
            FailureCode::AlgMismatch => "ALG_MISMATCH",
            FailureCode::MacStructureError => "MAC_STRUCTURE_ERROR",
            FailureCode::TagMismatch => "TAG_MISMATCH",
            FailureCode::TaggerError => "TAGGER_ERROR",
        }
    }
}

impl fmt::Display for FailureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub code: FailureCode,
    /// Codec that rejected the input, when the failure came from decoding or
    /// from building the `MAC_structure`.
    pub stage: Option<Stage>,
    pub message: String,
}

impl ValidationFailure {
    pub(crate) fn new(code: FailureCode, message: impl Into<String>) -> Self {
        ValidationFailure {
            code,
            stage: None,
            message: message.into(),
        }
    }

    pub(crate) fn from_cose_error(code: FailureCode, err: &CoseError) -> Self {
        ValidationFailure {
            code,
            stage: err.stage(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// What a successful verification established.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VerifiedMac0 {
    pub algorithm: CoseAlgorithm,
    /// The payload was supplied out of band rather than carried in the envelope.
    pub detached: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub validator_name: String,
    pub outcome: Result<VerifiedMac0, ValidationFailure>,
}

impl ValidationResult {
    pub(crate) fn verified(validator_name: &str, verified: VerifiedMac0) -> Self {
        ValidationResult {
            validator_name: validator_name.to_string(),
            outcome: Ok(verified),
        }
    }

    pub(crate) fn failed(validator_name: &str, failure: ValidationFailure) -> Self {
        ValidationResult {
            validator_name: validator_name.to_string(),
            outcome: Err(failure),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn failure(&self) -> Option<&ValidationFailure> {
        self.outcome.as_ref().err()
    }

    pub fn failure_code(&self) -> Option<FailureCode> {
        self.failure().map(|f| f.code)
    }
}
