// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE_Key codec for the public part of OKP and EC2 keys.
//!
//! ```text
//! COSE_Key = {
//!     ? 1  => int,   ; kty
//!     ? -1 => int,   ; crv
//!     ? -2 => bstr,  ; x
//!     ? -3 => bstr,  ; y
//!     * label => values
//! }
//! ```
//!
//! Decoding is lenient about key metadata: an unknown `kty` or `crv` becomes
//! `None` so that the coordinates can still be extracted.

use minicbor::encode::write::Writer;
use minicbor::encode::{self, Write};
use minicbor::{Decoder, Encoder};

use crate::cbor::{is_bytes, is_int, is_map, read_bytes, read_label, Remaining};
use crate::error::{CoseError, DecodeResultExt, Stage, write_error};

const STAGE: Stage = Stage::Key;

const LABEL_KTY: i64 = 1;
const LABEL_CRV: i64 = -1;
const LABEL_X: i64 = -2;
const LABEL_Y: i64 = -3;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Octet key pair.
    Okp,
    /// Elliptic curve key with x and y coordinates.
    Ec2,
}

impl KeyType {
    pub fn id(self) -> i64 {
        match self {
            KeyType::Okp => 1,
            KeyType::Ec2 => 2,
        }
    }

    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(KeyType::Okp),
            2 => Some(KeyType::Ec2),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Curve {
    P256,
    P384,
    P521,
    X25519,
    X448,
    Ed25519,
    Ed448,
}

impl Curve {
    pub fn id(self) -> i64 {
        match self {
            Curve::P256 => 1,
            Curve::P384 => 2,
            Curve::P521 => 3,
            Curve::X25519 => 4,
            Curve::X448 => 5,
            Curve::Ed25519 => 6,
            Curve::Ed448 => 7,
        }
    }

    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(Curve::P256),
            2 => Some(Curve::P384),
            3 => Some(Curve::P521),
            4 => Some(Curve::X25519),
            5 => Some(Curve::X448),
            6 => Some(Curve::Ed25519),
            7 => Some(Curve::Ed448),
            _ => None,
        }
    }
}

/// Public COSE key. Empty coordinates are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoseKey {
    pub key_type: Option<KeyType>,
    pub curve: Option<Curve>,
    pub x: Vec<u8>,
    pub y: Vec<u8>,
}

impl CoseKey {
    fn field_count(&self) -> u64 {
        u64::from(self.key_type.is_some())
            + u64::from(self.curve.is_some())
            + u64::from(!self.x.is_empty())
            + u64::from(!self.y.is_empty())
    }

    pub fn decode(dec: &mut Decoder<'_>) -> Result<Self, CoseError> {
        if !is_map(dec.datatype().or_format(STAGE, "failed to read map")?) {
            return Err(CoseError::format(STAGE, "expected a map"));
        }
        let len = dec.map().or_format(STAGE, "failed to read map")?;

        let mut key = CoseKey::default();
        let mut entries = Remaining::new(len);
        while entries.next(dec).or_format(STAGE, "failed to read map entry")? {
            match read_label(dec).or_format(STAGE, "failed to read key label")? {
                Some(LABEL_KTY) => key.key_type = read_code(dec, "kty")?.and_then(KeyType::from_id),
                Some(LABEL_CRV) => key.curve = read_code(dec, "crv")?.and_then(Curve::from_id),
                Some(LABEL_X) => key.x = read_coordinate(dec, "x")?,
                Some(LABEL_Y) => key.y = read_coordinate(dec, "y")?,
                other => {
                    log::trace!("skipping key label {other:?}");
                    dec.skip().or_format(STAGE, "failed to skip unknown key value")?;
                }
            }
        }

        Ok(key)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, CoseError> {
        let mut dec = Decoder::new(bytes);
        let key = Self::decode(&mut dec)?;
        if dec.position() != bytes.len() {
            return Err(CoseError::format(STAGE, "trailing bytes after COSE_Key"));
        }
        Ok(key)
    }

    pub fn encode<W: Write>(&self, enc: &mut Encoder<W>) -> Result<(), encode::Error<W::Error>> {
        enc.map(self.field_count())?;
        if let Some(kty) = self.key_type {
            enc.i64(LABEL_KTY)?.i64(kty.id())?;
        }
        if let Some(crv) = self.curve {
            enc.i64(LABEL_CRV)?.i64(crv.id())?;
        }
        if !self.x.is_empty() {
            enc.i64(LABEL_X)?.bytes(&self.x)?;
        }
        if !self.y.is_empty() {
            enc.i64(LABEL_Y)?.bytes(&self.y)?;
        }
        Ok(())
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, CoseError> {
        let mut out = Vec::new();
        self.encode(&mut Encoder::new(&mut out))
            .map_err(|e| CoseError::encode(STAGE, e))?;
        Ok(out)
    }

    /// Streams the encoding into `writer`.
    pub fn write_to<W: std::io::Write>(&self, writer: W) -> Result<(), CoseError> {
        self.encode(&mut Encoder::new(Writer::new(writer)))
            .map_err(|e| write_error(STAGE, e))
    }
}

/// Reads a kty/crv code. Values that are not integers in `i64` range are
/// skipped and reported as `None`.
fn read_code(dec: &mut Decoder<'_>, what: &str) -> Result<Option<i64>, CoseError> {
    let t = dec.datatype().or_format(STAGE, what)?;
    if is_int(t) {
        let int = dec.int().or_format(STAGE, what)?;
        if let Ok(v) = i64::try_from(int) {
            return Ok(Some(v));
        }
    } else {
        dec.skip().or_format(STAGE, what)?;
    }
    log::debug!("unrecognized {what} value in COSE_Key");
    Ok(None)
}

fn read_coordinate(dec: &mut Decoder<'_>, what: &str) -> Result<Vec<u8>, CoseError> {
    if !is_bytes(dec.datatype().or_format(STAGE, what)?) {
        return Err(CoseError::format(STAGE, format!("{what} coordinate must be a bstr")));
    }
    read_bytes(dec).or_format(STAGE, what)
}
