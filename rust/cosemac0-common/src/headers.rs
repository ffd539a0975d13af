// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE header map codec (`alg`, `crit`, `x5chain`).
//!
//! ```text
//! header_map = {
//!     ? 1  => int,                 ; alg
//!     ? 2  => [+ label],           ; crit
//!     ? 25 => COSE_X509,           ; x5chain: bstr / [2* bstr]
//!     * label => values            ; skipped
//! }
//! ```
//!
//! Encoding writes only the fields that are set, always in the order
//! `alg`, `crit`, `x5chain`, and never produces indefinite-length items.

use minicbor::encode::write::Writer;
use minicbor::encode::{self, Write};
use minicbor::{Decoder, Encoder};

use crate::cbor::{capacity_hint, is_array, is_bytes, is_int, is_map, read_bytes, read_label, Remaining};
use crate::error::{CoseError, DecodeResultExt, Stage, write_error};
use crate::labels::{CoseAlgorithm, HeaderLabel};

const STAGE: Stage = Stage::HeaderMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    pub algorithm: Option<CoseAlgorithm>,
    /// Labels the recipient must understand. Empty means absent.
    pub critical: Vec<HeaderLabel>,
    /// DER certificates, leaf first. Empty means absent.
    pub x5chain: Vec<Vec<u8>>,
}

impl Headers {
    pub fn with_algorithm(alg: CoseAlgorithm) -> Self {
        Headers {
            algorithm: Some(alg),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.present_algorithm().is_none() && self.critical.is_empty() && self.x5chain.is_empty()
    }

    fn present_algorithm(&self) -> Option<CoseAlgorithm> {
        self.algorithm.filter(|a| a.id() != CoseAlgorithm::RESERVED)
    }

    fn field_count(&self) -> u64 {
        u64::from(self.present_algorithm().is_some())
            + u64::from(!self.critical.is_empty())
            + u64::from(!self.x5chain.is_empty())
    }

    /// Decodes a header map from the current decoder position.
    ///
    /// Unknown labels are skipped. A repeated label overwrites the earlier value.
    pub fn decode(dec: &mut Decoder<'_>) -> Result<Self, CoseError> {
        if !is_map(dec.datatype().or_format(STAGE, "failed to read map")?) {
            return Err(CoseError::format(STAGE, "expected a map"));
        }
        let len = dec.map().or_format(STAGE, "failed to read map")?;

        let mut headers = Headers::default();
        let mut entries = Remaining::new(len);
        while entries.next(dec).or_format(STAGE, "failed to read map entry")? {
            let label = read_label(dec).or_format(STAGE, "failed to read header label")?;
            match label.map(HeaderLabel) {
                Some(HeaderLabel::ALG) => headers.algorithm = read_algorithm(dec)?,
                Some(HeaderLabel::CRIT) => headers.critical = read_critical(dec)?,
                Some(HeaderLabel::X5CHAIN) => headers.x5chain = read_x5chain(dec)?,
                other => {
                    log::trace!("skipping header label {other:?}");
                    dec.skip().or_format(STAGE, "failed to skip unknown header value")?;
                }
            }
        }

        Ok(headers)
    }

    /// Decodes a standalone header map, rejecting trailing bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CoseError> {
        let mut dec = Decoder::new(bytes);
        let headers = Self::decode(&mut dec)?;
        if dec.position() != bytes.len() {
            return Err(CoseError::format(STAGE, "trailing bytes after header map"));
        }
        Ok(headers)
    }

    pub fn encode<W: Write>(&self, enc: &mut Encoder<W>) -> Result<(), encode::Error<W::Error>> {
        // Definite-length map: the count has to be known before any entry.
        enc.map(self.field_count())?;

        if let Some(alg) = self.present_algorithm() {
            enc.i64(HeaderLabel::ALG.value())?.i64(alg.id())?;
        }

        if !self.critical.is_empty() {
            enc.i64(HeaderLabel::CRIT.value())?;
            enc.array(self.critical.len() as u64)?;
            for label in &self.critical {
                enc.i64(label.value())?;
            }
        }

        match self.x5chain.as_slice() {
            [] => {}
            [leaf] => {
                enc.i64(HeaderLabel::X5CHAIN.value())?.bytes(leaf)?;
            }
            chain => {
                enc.i64(HeaderLabel::X5CHAIN.value())?;
                enc.array(chain.len() as u64)?;
                for cert in chain {
                    enc.bytes(cert)?;
                }
            }
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

fn read_algorithm(dec: &mut Decoder<'_>) -> Result<Option<CoseAlgorithm>, CoseError> {
    let v = dec.i64().or_format(STAGE, "failed to read alg (int)")?;
    Ok(CoseAlgorithm::from_id(v))
}

fn read_critical(dec: &mut Decoder<'_>) -> Result<Vec<HeaderLabel>, CoseError> {
    let len = dec.array().or_format(STAGE, "failed to read crit (array)")?;
    let mut out = Vec::with_capacity(capacity_hint(len));
    let mut items = Remaining::new(len);
    while items.next(dec).or_format(STAGE, "failed to read crit entry")? {
        if !is_int(dec.datatype().or_format(STAGE, "failed to read crit entry")?) {
            return Err(CoseError::format(STAGE, "crit entries must be integer labels"));
        }
        let label = dec.i64().or_format(STAGE, "failed to read crit label")?;
        out.push(HeaderLabel(label));
    }
    Ok(out)
}

fn read_x5chain(dec: &mut Decoder<'_>) -> Result<Vec<Vec<u8>>, CoseError> {
    let t = dec.datatype().or_format(STAGE, "failed to read x5chain")?;
    if is_bytes(t) {
        let cert = read_bytes(dec).or_format(STAGE, "failed to read x5chain certificate")?;
        return Ok(vec![cert]);
    }
    if !is_array(t) {
        return Err(CoseError::format(STAGE, "x5chain must be a bstr or an array of bstr"));
    }

    let len = dec.array().or_format(STAGE, "failed to read x5chain (array)")?;
    let mut chain = Vec::with_capacity(capacity_hint(len));
    let mut items = Remaining::new(len);
    while items.next(dec).or_format(STAGE, "failed to read x5chain entry")? {
        if !is_bytes(dec.datatype().or_format(STAGE, "failed to read x5chain entry")?) {
            return Err(CoseError::format(STAGE, "x5chain must be a bstr or an array of bstr"));
        }
        chain.push(read_bytes(dec).or_format(STAGE, "failed to read x5chain certificate")?);
    }
    Ok(chain)
}
