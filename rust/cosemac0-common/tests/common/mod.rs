// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared helpers for `cosemac0-common` integration tests.

#![allow(dead_code)]

use cosemac0_common::{CoseAlgorithm, TagVerifier, Tagger, TaggerError};
use hmac::{Hmac, Mac};
use sha2::Sha256;

pub(crate) fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).unwrap();
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// HMAC-SHA256 strategy keyed with `key`.
pub(crate) struct TestHmac {
    pub(crate) key: Vec<u8>,
}

impl TestHmac {
    pub(crate) fn new(key: &[u8]) -> Self {
        Self { key: key.to_vec() }
    }
}

impl Tagger for TestHmac {
    fn algorithm(&self) -> CoseAlgorithm {
        CoseAlgorithm::HMAC256
    }

    fn create_tag(&self, to_be_maced: &[u8]) -> Result<Vec<u8>, TaggerError> {
        Ok(hmac_sha256(&self.key, to_be_maced))
    }
}

impl TagVerifier for TestHmac {
    fn algorithm(&self) -> CoseAlgorithm {
        CoseAlgorithm::HMAC256
    }

    fn verify_tag(&self, to_be_maced: &[u8], tag: &[u8]) -> Result<(), TaggerError> {
        let mut mac = Hmac::<Sha256>::new_from_slice(&self.key).map_err(|e| TaggerError::Message(e.to_string()))?;
        mac.update(to_be_maced);
        mac.verify_slice(tag).map_err(|_| TaggerError::TagMismatch)
    }
}

/// A tagger whose MAC backend always fails.
pub(crate) struct FailingTagger;

impl Tagger for FailingTagger {
    fn algorithm(&self) -> CoseAlgorithm {
        CoseAlgorithm::HMAC512
    }

    fn create_tag(&self, _to_be_maced: &[u8]) -> Result<Vec<u8>, TaggerError> {
        Err(TaggerError::Message("hardware token unavailable".to_string()))
    }
}

/// A writer that always fails.
pub(crate) struct ErrorWriter;

impl std::io::Write for ErrorWriter {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Records every `write` call separately.
#[derive(Default)]
pub(crate) struct ChunkWriter {
    pub(crate) chunks: Vec<Vec<u8>>,
}

impl std::io::Write for ChunkWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.chunks.push(buf.to_vec());
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Payload element of a hand-built COSE_Mac0.
pub(crate) enum TestPayload<'a> {
    Bytes(&'a [u8]),
    Nil,
    Text(&'a str),
}

/// Builds `[protected, {}, payload, tag]` without going through the crate's encoder.
pub(crate) fn encode_mac0(protected: &[u8], payload: TestPayload<'_>, tag: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut enc = minicbor::Encoder::new(&mut out);
    enc.array(4).unwrap();
    enc.bytes(protected).unwrap();
    enc.map(0).unwrap();
    match payload {
        TestPayload::Bytes(b) => {
            enc.bytes(b).unwrap();
        }
        TestPayload::Nil => {
            enc.null().unwrap();
        }
        TestPayload::Text(s) => {
            enc.str(s).unwrap();
        }
    }
    enc.bytes(tag).unwrap();
    out
}
