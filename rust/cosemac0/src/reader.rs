// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Bounded reads of COSE_Mac0 input streams.

use std::io::Read;

use cosemac0_common::{CoseError, Stage};

/// Default upper bound for reader-based parsing (16 MiB).
pub const DEFAULT_MAX_MAC0_LEN: usize = 16 * 1024 * 1024;

/// Reads the whole stream, failing once more than `max_len` bytes arrive.
pub(crate) fn read_to_end_bounded(reader: impl Read, max_len: usize) -> Result<Vec<u8>, CoseError> {
    let mut buf = Vec::new();
    reader
        .take((max_len as u64).saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|e| CoseError::io(Stage::Mac0, e))?;

    if buf.len() > max_len {
        return Err(CoseError::format(
            Stage::Mac0,
            format!("input exceeds maximum length of {max_len} bytes"),
        ));
    }
    Ok(buf)
}
