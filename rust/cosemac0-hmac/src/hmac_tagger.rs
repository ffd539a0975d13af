// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! HMAC tag creation and verification.
//!
//! Supported COSE algorithms:
//! - `HMAC256_64`: HMAC w/ SHA-256, tag truncated to the leftmost 8 bytes
//! - `HMAC256`, `HMAC384`, `HMAC512`: full-length HMAC w/ SHA-2
//!
//! Verification compares in constant time and requires the tag to have
//! exactly the algorithm's length.

use cosemac0_common::{CoseAlgorithm, TagVerifier, Tagger, TaggerError};
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

const HMAC256_64_TAG_LEN: usize = 8;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum HmacKeyError {
    #[error("algorithm {0} is not an HMAC algorithm")]
    UnsupportedAlgorithm(i64),

    #[error("HMAC key must not be empty")]
    EmptyKey,
}

/// HMAC strategy bound to one algorithm and one key.
#[derive(Clone)]
pub struct HmacTagger {
    alg: CoseAlgorithm,
    key: Vec<u8>,
}

impl std::fmt::Debug for HmacTagger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacTagger")
            .field("alg", &self.alg)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl HmacTagger {
    pub fn new(alg: CoseAlgorithm, key: impl Into<Vec<u8>>) -> Result<Self, HmacKeyError> {
        if !alg.is_mac() {
            return Err(HmacKeyError::UnsupportedAlgorithm(alg.id()));
        }
        let key = key.into();
        if key.is_empty() {
            return Err(HmacKeyError::EmptyKey);
        }
        Ok(Self { alg, key })
    }

    pub fn hmac256(key: impl Into<Vec<u8>>) -> Result<Self, HmacKeyError> {
        Self::new(CoseAlgorithm::HMAC256, key)
    }

    /// Length in bytes of the tags this strategy produces.
    pub fn tag_len(&self) -> usize {
        match self.alg {
            CoseAlgorithm::HMAC256_64 => HMAC256_64_TAG_LEN,
            CoseAlgorithm::HMAC384 => 48,
            CoseAlgorithm::HMAC512 => 64,
            _ => 32,
        }
    }

    fn full_tag(&self, data: &[u8]) -> Result<Vec<u8>, TaggerError> {
        match self.alg {
            CoseAlgorithm::HMAC256_64 | CoseAlgorithm::HMAC256 => mac_sha256(&self.key, data),
            CoseAlgorithm::HMAC384 => mac_sha384(&self.key, data),
            CoseAlgorithm::HMAC512 => mac_sha512(&self.key, data),
            other => Err(TaggerError::Message(format!("unsupported HMAC alg: {}", other.id()))),
        }
    }
}

impl Tagger for HmacTagger {
    fn algorithm(&self) -> CoseAlgorithm {
        self.alg
    }

    fn create_tag(&self, to_be_maced: &[u8]) -> Result<Vec<u8>, TaggerError> {
        let mut tag = self.full_tag(to_be_maced)?;
        tag.truncate(self.tag_len());
        Ok(tag)
    }
}

impl TagVerifier for HmacTagger {
    fn algorithm(&self) -> CoseAlgorithm {
        self.alg
    }

    fn verify_tag(&self, to_be_maced: &[u8], tag: &[u8]) -> Result<(), TaggerError> {
        if tag.len() != self.tag_len() {
            log::debug!("HMAC tag length {} != expected {}", tag.len(), self.tag_len());
            return Err(TaggerError::TagMismatch);
        }
        match self.alg {
            CoseAlgorithm::HMAC256_64 => verify_sha256_truncated(&self.key, to_be_maced, tag),
            CoseAlgorithm::HMAC256 => verify_sha256(&self.key, to_be_maced, tag),
            CoseAlgorithm::HMAC384 => verify_sha384(&self.key, to_be_maced, tag),
            CoseAlgorithm::HMAC512 => verify_sha512(&self.key, to_be_maced, tag),
            other => Err(TaggerError::Message(format!("unsupported HMAC alg: {}", other.id()))),
        }
    }
}

fn key_error(e: hmac::digest::InvalidLength) -> TaggerError {
    TaggerError::Message(format!("invalid HMAC key: {e}"))
}

fn mac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, TaggerError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).map_err(key_error)?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn mac_sha384(key: &[u8], data: &[u8]) -> Result<Vec<u8>, TaggerError> {
    let mut mac = Hmac::<Sha384>::new_from_slice(key).map_err(key_error)?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn mac_sha512(key: &[u8], data: &[u8]) -> Result<Vec<u8>, TaggerError> {
    let mut mac = Hmac::<Sha512>::new_from_slice(key).map_err(key_error)?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn verify_sha256_truncated(key: &[u8], data: &[u8], tag: &[u8]) -> Result<(), TaggerError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).map_err(key_error)?;
    mac.update(data);
    mac.verify_truncated_left(tag).map_err(|_| TaggerError::TagMismatch)
}

fn verify_sha256(key: &[u8], data: &[u8], tag: &[u8]) -> Result<(), TaggerError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).map_err(key_error)?;
    mac.update(data);
    mac.verify_slice(tag).map_err(|_| TaggerError::TagMismatch)
}

fn verify_sha384(key: &[u8], data: &[u8], tag: &[u8]) -> Result<(), TaggerError> {
    let mut mac = Hmac::<Sha384>::new_from_slice(key).map_err(key_error)?;
    mac.update(data);
    mac.verify_slice(tag).map_err(|_| TaggerError::TagMismatch)
}

fn verify_sha512(key: &[u8], data: &[u8], tag: &[u8]) -> Result<(), TaggerError> {
    let mut mac = Hmac::<Sha512>::new_from_slice(key).map_err(key_error)?;
    mac.update(data);
    mac.verify_slice(tag).map_err(|_| TaggerError::TagMismatch)
}
