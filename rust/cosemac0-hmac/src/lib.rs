// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! HMAC tagging strategies for COSE_Mac0.

pub mod hmac_tagger;

pub use hmac_tagger::{HmacKeyError, HmacTagger};
