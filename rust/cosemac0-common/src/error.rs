// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types shared by the header, key and MAC0 codecs.

use std::fmt;

/// Which codec was running when an error was raised.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Protected or unprotected header map.
    HeaderMap,
    /// COSE_Key map.
    Key,
    /// COSE_Mac0 envelope.
    Mac0,
    /// The `MAC_structure` fed to the MAC algorithm.
    MacStructure,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::HeaderMap => "header map",
            Stage::Key => "COSE_Key",
            Stage::Mac0 => "COSE_Mac0",
            Stage::MacStructure => "MAC_structure",
        };
        f.write_str(s)
    }
}

/// Error raised by a tagging or tag verification strategy.
#[derive(thiserror::Error, Debug)]
pub enum TaggerError {
    #[error("{0}")]
    Message(String),

    #[error("tag mismatch")]
    TagMismatch,
}

#[derive(thiserror::Error, Debug)]
pub enum CoseError {
    /// Malformed, truncated or semantically invalid input.
    #[error("malformed {stage}: {message}")]
    Format { stage: Stage, message: String },

    /// The CBOR encoder failed while writing into a buffer.
    #[error("failed to encode {stage}: {message}")]
    Encode { stage: Stage, message: String },

    /// Propagated from a caller-supplied reader or writer.
    #[error("i/o error on {stage}: {source}")]
    Io {
        stage: Stage,
        #[source]
        source: std::io::Error,
    },

    #[error("tagger failed: {0}")]
    Tagger(#[from] TaggerError),
}

impl CoseError {
    pub fn format(stage: Stage, message: impl Into<String>) -> Self {
        CoseError::Format {
            stage,
            message: message.into(),
        }
    }

    pub fn encode(stage: Stage, err: impl fmt::Display) -> Self {
        CoseError::Encode {
            stage,
            message: err.to_string(),
        }
    }

    pub fn io(stage: Stage, source: std::io::Error) -> Self {
        CoseError::Io { stage, source }
    }

    /// Returns the stage for codec errors, `None` for tagger errors.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            CoseError::Format { stage, .. } | CoseError::Encode { stage, .. } | CoseError::Io { stage, .. } => {
                Some(*stage)
            }
            CoseError::Tagger(_) => None,
        }
    }

    pub fn is_format(&self) -> bool {
        matches!(self, CoseError::Format { .. })
    }
}

/// Attaches a stage and a short description to primitive decoder errors.
pub(crate) trait DecodeResultExt<T> {
    fn or_format(self, stage: Stage, what: &str) -> Result<T, CoseError>;
}

impl<T> DecodeResultExt<T> for Result<T, minicbor::decode::Error> {
    fn or_format(self, stage: Stage, what: &str) -> Result<T, CoseError> {
        self.map_err(|e| CoseError::format(stage, format!("{what}: {e}")))
    }
}

/// Maps a failure of an encoder writing into a caller's `std::io::Write`.
/// Writer failures keep their `io::ErrorKind`; anything else is an encode error.
pub(crate) fn write_error(stage: Stage, err: minicbor::encode::Error<std::io::Error>) -> CoseError {
    use std::error::Error as _;

    if err.is_write() {
        if let Some(io) = err.source().and_then(|s| s.downcast_ref::<std::io::Error>()) {
            return CoseError::io(stage, std::io::Error::new(io.kind(), io.to_string()));
        }
    }
    CoseError::encode(stage, err)
}
