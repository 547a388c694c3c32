//! Error types for Ethereum address derivation.

use core::fmt;

/// Errors returned by Ethereum address derivation.
///
/// Anything that is not a precondition failure collapses into
/// [`Error::InvalidXpubConfiguration`]; callers should show no address.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The key does not start with `xpub`.
    InvalidPrefix,
    /// The index is in the hardened range.
    HardenedIndexUnsupported(u32),
    /// Batch request exceeds the per-batch limit.
    BatchTooLarge {
        /// Requested number of addresses.
        requested: u32,
        /// Maximum allowed per batch.
        max: u32,
    },
    /// The configured extended key could not be used.
    InvalidXpubConfiguration(hdwatch::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPrefix => write!(f, "extended key must start with \"xpub\""),
            Self::HardenedIndexUnsupported(i) => {
                write!(f, "index {i} is hardened and cannot be derived from an xpub")
            }
            Self::BatchTooLarge { requested, max } => {
                write!(f, "batch of {requested} exceeds the limit of {max} addresses")
            }
            Self::InvalidXpubConfiguration(e) => write!(f, "invalid xpub configuration: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidXpubConfiguration(e) => Some(e),
            Self::InvalidPrefix | Self::HardenedIndexUnsupported(_) | Self::BatchTooLarge { .. } => {
                None
            }
        }
    }
}

impl From<hdwatch::Error> for Error {
    fn from(err: hdwatch::Error) -> Self {
        match err {
            hdwatch::Error::InvalidPrefix => Self::InvalidPrefix,
            hdwatch::Error::HardenedIndexUnsupported(i) => Self::HardenedIndexUnsupported(i),
            hdwatch::Error::BatchTooLarge { requested, max } => Self::BatchTooLarge { requested, max },
            other => Self::InvalidXpubConfiguration(other),
        }
    }
}
