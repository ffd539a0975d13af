// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared helpers for `cosemac0` integration tests.

#![allow(dead_code)]

use cosemac0::{CoseAlgorithm, TagVerifier, TaggerError};

/// A `Read` implementation that always fails.
pub(crate) struct ErrorReader {
    pub(crate) err: &'static str,
}

impl std::io::Read for ErrorReader {
    fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, self.err))
    }
}

/// A verifier whose backend is broken.
pub(crate) struct BrokenVerifier;

impl TagVerifier for BrokenVerifier {
    fn algorithm(&self) -> CoseAlgorithm {
        CoseAlgorithm::HMAC256
    }

    fn verify_tag(&self, _to_be_maced: &[u8], _tag: &[u8]) -> Result<(), TaggerError> {
        Err(TaggerError::Message("key handle expired".to_string()))
    }
}

/// Builds `[protected, {}, payload, tag]` by hand.
pub(crate) fn encode_mac0(protected: &[u8], payload: Option<&[u8]>, tag: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut enc = minicbor::Encoder::new(&mut out);
    enc.array(4).unwrap();
    enc.bytes(protected).unwrap();
    enc.map(0).unwrap();
    match payload {
        Some(p) => {
            enc.bytes(p).unwrap();
        }
        None => {
            enc.null().unwrap();
        }
    }
    enc.bytes(tag).unwrap();
    out
}
