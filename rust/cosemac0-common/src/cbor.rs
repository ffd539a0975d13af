// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Small helpers over `minicbor` shared by the codecs.

use minicbor::data::Type;
use minicbor::decode;
use minicbor::Decoder;

/// Upper bound for capacity reserved from a declared (untrusted) length.
const MAX_PREALLOC: u64 = 64;

pub(crate) fn capacity_hint(len: Option<u64>) -> usize {
    len.map_or(0, |n| n.min(MAX_PREALLOC) as usize)
}

pub(crate) fn is_int(t: Type) -> bool {
    matches!(
        t,
        Type::U8 | Type::U16 | Type::U32 | Type::U64 | Type::I8 | Type::I16 | Type::I32 | Type::I64 | Type::Int
    )
}

/// Counts down the entries of a definite or indefinite array/map.
pub(crate) struct Remaining(Option<u64>);

impl Remaining {
    pub(crate) fn new(len: Option<u64>) -> Self {
        Remaining(len)
    }

    /// Returns `true` if another entry follows. For indefinite containers the
    /// terminating `break` is consumed.
    pub(crate) fn next(&mut self, dec: &mut Decoder<'_>) -> Result<bool, decode::Error> {
        match &mut self.0 {
            Some(0) => Ok(false),
            Some(n) => {
                *n -= 1;
                Ok(true)
            }
            None => {
                if matches!(dec.datatype()?, Type::Break) {
                    dec.set_position(dec.position() + 1);
                    Ok(false)
                } else {
                    Ok(true)
                }
            }
        }
    }
}

/// Reads an integer map key. Returns `None` (with the key consumed) for text
/// keys and integers outside `i64`, which callers treat as unknown labels.
pub(crate) fn read_label(dec: &mut Decoder<'_>) -> Result<Option<i64>, decode::Error> {
    let t = dec.datatype()?;
    if is_int(t) {
        let int = dec.int()?;
        return Ok(i64::try_from(int).ok());
    }
    dec.skip()?;
    Ok(None)
}

/// Reads a definite or indefinite byte string.
pub(crate) fn read_bytes(dec: &mut Decoder<'_>) -> Result<Vec<u8>, decode::Error> {
    if matches!(dec.datatype()?, Type::BytesIndef) {
        let mut out = Vec::new();
        for chunk in dec.bytes_iter()? {
            out.extend_from_slice(chunk?);
        }
        return Ok(out);
    }
    Ok(dec.bytes()?.to_vec())
}

pub(crate) fn is_bytes(t: Type) -> bool {
    matches!(t, Type::Bytes | Type::BytesIndef)
}

pub(crate) fn is_array(t: Type) -> bool {
    matches!(t, Type::Array | Type::ArrayIndef)
}

pub(crate) fn is_map(t: Type) -> bool {
    matches!(t, Type::Map | Type::MapIndef)
}
