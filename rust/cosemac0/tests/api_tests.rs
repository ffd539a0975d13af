// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Facade API tests: creation, encoding and reader-based parsing.

mod common;

use common::*;
use cosemac0::{
    create_mac0, encode_mac0, parse_mac0, parse_mac0_from_reader, parse_mac0_from_reader_with_max_len, write_mac0,
    CoseError, Stage, Tagger,
};
use cosemac0_hmac::HmacTagger;
use hmac::{Hmac, Mac};
use sha2::Sha256;

#[test]
fn create_encode_parse_recovers_payload_and_alg() {
    let tagger = HmacTagger::hmac256(b"key".to_vec()).unwrap();
    let mac = create_mac0(b"payload", b"aad", false, &tagger).unwrap();
    let bytes = encode_mac0(&mac).unwrap();

    let parsed = parse_mac0(&bytes).unwrap();
    assert_eq!(parsed.payload.as_deref(), Some(b"payload".as_slice()));
    assert_eq!(
        parsed.protected_headers().unwrap().algorithm,
        Some(Tagger::algorithm(&tagger))
    );

    let tbm = parsed.to_be_maced(None, b"aad").unwrap();
    let mut expected = Hmac::<Sha256>::new_from_slice(b"key").unwrap();
    expected.update(&tbm);
    assert_eq!(parsed.tag, expected.finalize().into_bytes().to_vec());
}

#[test]
fn detached_payload_survives_encode_and_parse() {
    let tagger = HmacTagger::hmac256(b"key".to_vec()).unwrap();
    let mac = create_mac0(b"payload", b"aad", true, &tagger).unwrap();
    let parsed = parse_mac0(&encode_mac0(&mac).unwrap()).unwrap();
    assert_eq!(parsed.payload, None);
}

#[test]
fn parse_from_reader_matches_parse() {
    let tagger = HmacTagger::hmac256(b"key".to_vec()).unwrap();
    let mac = create_mac0(b"payload", b"", false, &tagger).unwrap();

    let mut bytes = Vec::new();
    write_mac0(&mac, &mut bytes).unwrap();

    let parsed = parse_mac0_from_reader(std::io::Cursor::new(bytes.clone())).unwrap();
    assert_eq!(parsed, parse_mac0(&bytes).unwrap());
}

#[test]
fn parse_from_reader_enforces_max_len() {
    let msg = encode_mac0_bytes();

    let ok = parse_mac0_from_reader_with_max_len(msg.as_slice(), msg.len());
    assert!(ok.is_ok());

    let err = parse_mac0_from_reader_with_max_len(msg.as_slice(), msg.len() - 1).unwrap_err();
    match err {
        CoseError::Format { stage, message } => {
            assert_eq!(stage, Stage::Mac0);
            assert!(message.contains("maximum length"), "message was: {message}");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn parse_from_reader_propagates_io_errors() {
    let err = parse_mac0_from_reader(ErrorReader { err: "disk on fire" }).unwrap_err();
    match err {
        CoseError::Io { stage, source } => {
            assert_eq!(stage, Stage::Mac0);
            assert_eq!(source.to_string(), "disk on fire");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn parse_reports_format_errors() {
    let err = parse_mac0(&[0x83, 0x40, 0xa0, 0x40]).unwrap_err();
    assert!(err.is_format());
    assert!(err.to_string().contains("COSE_Mac0"), "err was: {err}");
}

fn encode_mac0_bytes() -> Vec<u8> {
    common::encode_mac0(&[0xa1, 0x01, 0x05], Some(b"payload".as_slice()), &[0u8; 32])
}
