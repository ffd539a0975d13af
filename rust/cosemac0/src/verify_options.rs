// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::CoseAlgorithm;

#[derive(Debug, Default, Clone)]
pub struct VerifyOptions {
    /// External payload bytes.
    ///
    /// Required for detached-payload messages. When set it is used instead of
    /// any embedded payload.
    pub external_payload: Option<Vec<u8>>,
    /// Externally supplied additional authenticated data. Empty by default.
    pub external_aad: Vec<u8>,
    /// If set, verification fails unless the COSE `alg` header equals this value.
    pub expected_alg: Option<CoseAlgorithm>,
}
