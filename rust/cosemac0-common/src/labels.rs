// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Header labels and algorithm identifiers (IANA COSE registries).

use std::fmt;

/// A COSE header parameter label.
///
/// The set is open: labels this crate does not interpret are still valid
/// values (for instance inside the `crit` list).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeaderLabel(pub i64);

impl HeaderLabel {
    /// `alg`
    pub const ALG: HeaderLabel = HeaderLabel(1);
    /// `crit`
    pub const CRIT: HeaderLabel = HeaderLabel(2);
    /// `x5chain` (RFC 9360)
    pub const X5CHAIN: HeaderLabel = HeaderLabel(25);

    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for HeaderLabel {
    fn from(v: i64) -> Self {
        HeaderLabel(v)
    }
}

impl fmt::Display for HeaderLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// COSE algorithm identifiers.
///
/// Identifier 0 is reserved and never appears on the wire; an absent
/// algorithm is modelled as `Option::None` instead.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CoseAlgorithm {
    /// ECDSA w/ SHA-256.
    ES256,
    /// ECDSA w/ SHA-384.
    ES384,
    /// ECDSA w/ SHA-512.
    ES512,
    /// EdDSA.
    EdDSA,
    /// HMAC w/ SHA-256 truncated to 64 bits.
    HMAC256_64,
    /// HMAC w/ SHA-256.
    HMAC256,
    /// HMAC w/ SHA-384.
    HMAC384,
    /// HMAC w/ SHA-512.
    HMAC512,
    /// Any other registered or private-use identifier.
    Other(i64),
}

impl CoseAlgorithm {
    pub const RESERVED: i64 = 0;

    pub fn id(self) -> i64 {
        match self {
            CoseAlgorithm::ES256 => -7,
            CoseAlgorithm::ES384 => -35,
            CoseAlgorithm::ES512 => -36,
            CoseAlgorithm::EdDSA => -8,
            CoseAlgorithm::HMAC256_64 => 4,
            CoseAlgorithm::HMAC256 => 5,
            CoseAlgorithm::HMAC384 => 6,
            CoseAlgorithm::HMAC512 => 7,
            CoseAlgorithm::Other(v) => v,
        }
    }

    /// Maps a wire identifier to an algorithm; the reserved value maps to `None`.
    pub fn from_id(id: i64) -> Option<Self> {
        let alg = match id {
            Self::RESERVED => return None,
            -7 => CoseAlgorithm::ES256,
            -35 => CoseAlgorithm::ES384,
            -36 => CoseAlgorithm::ES512,
            -8 => CoseAlgorithm::EdDSA,
            4 => CoseAlgorithm::HMAC256_64,
            5 => CoseAlgorithm::HMAC256,
            6 => CoseAlgorithm::HMAC384,
            7 => CoseAlgorithm::HMAC512,
            other => CoseAlgorithm::Other(other),
        };
        Some(alg)
    }

    pub fn is_mac(self) -> bool {
        matches!(
            self,
            CoseAlgorithm::HMAC256_64 | CoseAlgorithm::HMAC256 | CoseAlgorithm::HMAC384 | CoseAlgorithm::HMAC512
        )
    }
}
