//! Error types for Bitcoin address derivation.

use std::fmt;

/// Errors returned by Bitcoin address derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The index is in the hardened range.
    HardenedIndexUnsupported(u32),
    /// Batch request exceeds the per-batch limit.
    BatchTooLarge {
        /// Requested number of addresses.
        requested: u32,
        /// Maximum allowed per batch.
        max: u32,
    },
    /// The configured extended key could not be normalized or parsed.
    InvalidBtcExtendedKey(hdwatch::Error),
    /// Bech32 encoding of the witness program failed.
    AddressEncoding(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HardenedIndexUnsupported(i) => {
                write!(f, "index {i} is hardened and cannot be derived from an xpub")
            }
            Self::BatchTooLarge { requested, max } => {
                write!(f, "batch of {requested} exceeds the limit of {max} addresses")
            }
            Self::InvalidBtcExtendedKey(e) => write!(f, "invalid BTC extended key: {e}"),
            Self::AddressEncoding(msg) => write!(f, "address encoding error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidBtcExtendedKey(e) => Some(e),
            Self::HardenedIndexUnsupported(_) | Self::BatchTooLarge { .. } | Self::AddressEncoding(_) => {
                None
            }
        }
    }
}

impl From<hdwatch::Error> for Error {
    fn from(err: hdwatch::Error) -> Self {
        match err {
            hdwatch::Error::HardenedIndexUnsupported(i) => Self::HardenedIndexUnsupported(i),
            hdwatch::Error::BatchTooLarge { requested, max } => Self::BatchTooLarge { requested, max },
            other => Self::InvalidBtcExtendedKey(other),
        }
    }
}

impl From<bech32::segwit::EncodeError> for Error {
    fn from(err: bech32::segwit::EncodeError) -> Self {
        Self::AddressEncoding(err.to_string())
    }
}
