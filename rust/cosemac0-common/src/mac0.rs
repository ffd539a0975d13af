// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE_Mac0 envelope codec and `MAC_structure` construction (RFC 9052 §6).
//!
//! ```text
//! COSE_Mac0 = [ protected : bstr,
//!               unprotected : header_map,
//!               payload : bstr / nil,
//!               tag : bstr ]
//!
//! MAC_structure = [ context : "MAC0",
//!                   protected : bstr,
//!                   external_aad : bstr,
//!                   payload : bstr ]
//! ```
//!
//! The protected headers are kept as the exact bytes received so that
//! verification never depends on re-encoding them.

use minicbor::data::{Tag, Type};
use minicbor::encode::write::Writer;
use minicbor::encode::{self, Write};
use minicbor::{Decoder, Encoder};

use crate::cbor::{is_bytes, is_map, read_bytes};
use crate::error::{CoseError, DecodeResultExt, Stage, TaggerError, write_error};
use crate::headers::Headers;
use crate::labels::CoseAlgorithm;
use crate::tagger::{TagVerifier, Tagger};

/// CBOR tag number for COSE_Mac0.
pub const COSE_MAC0_TAG: u64 = 17;

/// Context string of the `MAC_structure` for COSE_Mac0.
pub const MAC_STRUCTURE_CONTEXT_MAC0: &str = "MAC0";

const STAGE: Stage = Stage::Mac0;

/// Encodes the `MAC_structure` bytes that a MAC algorithm runs over.
///
/// The output only depends on the inputs, so the tagging side and the
/// verifying side produce identical bytes. `protected` must be non-empty and
/// `payload` must be present; a detached payload has to be passed in here.
pub fn build_to_be_maced(
    protected: &[u8],
    payload: Option<&[u8]>,
    external_aad: &[u8],
) -> Result<Vec<u8>, CoseError> {
    if protected.is_empty() {
        return Err(CoseError::format(Stage::MacStructure, "protected headers are empty"));
    }
    let payload = payload.ok_or_else(|| CoseError::format(Stage::MacStructure, "payload is absent"))?;

    let mut out = Vec::with_capacity(16 + protected.len() + external_aad.len() + payload.len());
    {
        let mut enc = Encoder::new(&mut out);
        enc.array(4)
            .and_then(|e| e.str(MAC_STRUCTURE_CONTEXT_MAC0))
            .and_then(|e| e.bytes(protected))
            .and_then(|e| e.bytes(external_aad))
            .and_then(|e| e.bytes(payload))
            .map_err(|e| CoseError::encode(Stage::MacStructure, e))?;
    }
    Ok(out)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoseMac0 {
    /// Encoded protected header map, as carried in the envelope.
    pub protected: Vec<u8>,
    pub unprotected: Headers,
    /// `None` represents a detached payload (`nil` on the wire).
    pub payload: Option<Vec<u8>>,
    pub tag: Vec<u8>,
}

impl CoseMac0 {
    /// Creates a COSE_Mac0 over `payload`.
    ///
    /// The protected headers carry only the tagger's algorithm. With `detach`
    /// set the payload is still MACed but left out of the returned envelope;
    /// it has to be supplied again at verification time.
    pub fn create(payload: &[u8], external_aad: &[u8], detach: bool, tagger: &dyn Tagger) -> Result<Self, CoseError> {
        let alg = tagger.algorithm();
        let protected = Headers::with_algorithm(alg).to_vec()?;
        let to_be_maced = build_to_be_maced(&protected, Some(payload), external_aad)?;
        let tag = tagger.create_tag(&to_be_maced)?;

        log::debug!("created COSE_Mac0 (alg {}, detached {detach}, tag {} bytes)", alg.id(), tag.len());

        Ok(CoseMac0 {
            protected,
            unprotected: Headers::default(),
            payload: if detach { None } else { Some(payload.to_vec()) },
            tag,
        })
    }

    /// Parses the protected header bytes.
    pub fn protected_headers(&self) -> Result<Headers, CoseError> {
        Headers::from_slice(&self.protected)
    }

    /// The `alg` header, looked up in the protected headers first.
    pub fn algorithm(&self) -> Result<Option<CoseAlgorithm>, CoseError> {
        Ok(self.protected_headers()?.algorithm.or(self.unprotected.algorithm))
    }

    /// Builds the `MAC_structure` for this message.
    ///
    /// `external_payload` takes precedence over the embedded payload; one of
    /// the two must be present.
    pub fn to_be_maced(&self, external_payload: Option<&[u8]>, external_aad: &[u8]) -> Result<Vec<u8>, CoseError> {
        let payload = external_payload.or(self.payload.as_deref());
        build_to_be_maced(&self.protected, payload, external_aad)
    }

    /// Recomputes the `MAC_structure` and checks the tag with `verifier`.
    pub fn verify_tag(
        &self,
        external_payload: Option<&[u8]>,
        external_aad: &[u8],
        verifier: &dyn TagVerifier,
    ) -> Result<(), CoseError> {
        let alg = self
            .algorithm()?
            .ok_or_else(|| CoseError::format(STAGE, "missing alg header"))?;
        if alg != verifier.algorithm() {
            return Err(TaggerError::Message(format!(
                "alg header {} does not match verifier algorithm {}",
                alg.id(),
                verifier.algorithm().id()
            ))
            .into());
        }

        let to_be_maced = self.to_be_maced(external_payload, external_aad)?;
        verifier.verify_tag(&to_be_maced, &self.tag)?;
        Ok(())
    }

    /// Decodes a COSE_Mac0, optionally preceded by CBOR tag 17.
    ///
    /// The tag is not checked here.
    pub fn decode(dec: &mut Decoder<'_>) -> Result<Self, CoseError> {
        if matches!(dec.datatype().or_format(STAGE, "failed to read item")?, Type::Tag) {
            let tag = dec.tag().or_format(STAGE, "failed to read CBOR tag")?;
            if tag != Tag::new(COSE_MAC0_TAG) {
                return Err(CoseError::format(
                    STAGE,
                    "unexpected CBOR tag (expected COSE_Mac0 tag 17 or no tag)",
                ));
            }
        }

        let len = dec
            .array()
            .or_format(STAGE, "top-level item is not an array")?
            .ok_or_else(|| CoseError::format(STAGE, "indefinite-length arrays are not supported"))?;
        if len != 4 {
            return Err(CoseError::format(STAGE, format!("array length was {len}, expected 4")));
        }

        if !is_bytes(dec.datatype().or_format(STAGE, "failed to read protected headers")?) {
            return Err(CoseError::format(STAGE, "protected headers are not a bstr"));
        }
        let protected = read_bytes(dec).or_format(STAGE, "failed to read protected headers (bstr)")?;

        if !is_map(dec.datatype().or_format(STAGE, "failed to read unprotected headers")?) {
            return Err(CoseError::format(STAGE, "unprotected headers are not a map"));
        }
        let unprotected = Headers::decode(dec)?;

        let payload = match dec.datatype().or_format(STAGE, "failed to read payload")? {
            Type::Null => {
                dec.null().or_format(STAGE, "failed to read payload (nil)")?;
                None
            }
            t if is_bytes(t) => Some(read_bytes(dec).or_format(STAGE, "failed to read payload (bstr)")?),
            _ => return Err(CoseError::format(STAGE, "payload is neither a bstr nor nil")),
        };

        if !is_bytes(dec.datatype().or_format(STAGE, "failed to read tag")?) {
            return Err(CoseError::format(STAGE, "tag is not a bstr"));
        }
        let tag = read_bytes(dec).or_format(STAGE, "failed to read tag (bstr)")?;

        Ok(CoseMac0 {
            protected,
            unprotected,
            payload,
            tag,
        })
    }

    /// Decodes a COSE_Mac0, rejecting trailing bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CoseError> {
        if bytes.is_empty() {
            return Err(CoseError::format(STAGE, "empty input"));
        }
        let mut dec = Decoder::new(bytes);
        let mac0 = Self::decode(&mut dec)?;
        if dec.position() != bytes.len() {
            return Err(CoseError::format(STAGE, "trailing bytes after COSE_Mac0"));
        }
        Ok(mac0)
    }

    /// Writes the untagged four-element array. A detached payload is `nil`,
    /// never an empty bstr.
    pub fn encode<W: Write>(&self, enc: &mut Encoder<W>) -> Result<(), encode::Error<W::Error>> {
        enc.array(4)?.bytes(&self.protected)?;
        self.unprotected.encode(enc)?;
        match &self.payload {
            Some(p) => enc.bytes(p)?,
            None => enc.null()?,
        };
        enc.bytes(&self.tag)?;
        Ok(())
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, CoseError> {
        let mut out = Vec::new();
        self.encode(&mut Encoder::new(&mut out))
            .map_err(|e| CoseError::encode(STAGE, e))?;
        Ok(out)
    }

    /// Like [`CoseMac0::to_vec`], prefixed with CBOR tag 17.
    pub fn to_tagged_vec(&self) -> Result<Vec<u8>, CoseError> {
        let mut out = Vec::new();
        let mut enc = Encoder::new(&mut out);
        enc.tag(Tag::new(COSE_MAC0_TAG))
            .map_err(|e| CoseError::encode(STAGE, e))?;
        self.encode(&mut enc).map_err(|e| CoseError::encode(STAGE, e))?;
        Ok(out)
    }

    /// Streams the encoding into `writer`.
    pub fn write_to<W: std::io::Write>(&self, writer: W) -> Result<(), CoseError> {
        self.encode(&mut Encoder::new(Writer::new(writer)))
            .map_err(|e| write_error(STAGE, e))
    }
}
