//! Error types for key decoding, normalization and derivation.

use core::fmt;

/// Errors that can occur while decoding or deriving from an extended key.
///
/// No variant carries key material; only lengths, indices and the offending
/// character are reported.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A character outside the base58 alphabet was found.
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character in the input.
        index: usize,
    },
    /// Decoded data is too short or too long to be an extended key.
    MalformedExtendedKey {
        /// Number of bytes that were decoded.
        len: usize,
    },
    /// Base58Check checksum does not match the payload.
    InvalidChecksum,
    /// The key does not start with a recognized family marker.
    InvalidPrefix,
    /// Version bytes are not a canonical public key version.
    UnsupportedVersion([u8; 4]),
    /// Requested index is in the hardened range.
    HardenedIndexUnsupported(u32),
    /// The encoded public key is not a valid secp256k1 point.
    InvalidPublicKey,
    /// Derivation produced an invalid key for this index.
    InvalidChildKey(u32),
    /// Key is already at the maximum depth of 255.
    MaxDepthExceeded,
    /// Key string is empty.
    EmptyKey,
    /// Key string length is outside the accepted range.
    InvalidLength {
        /// Minimum accepted length.
        min: usize,
        /// Maximum accepted length.
        max: usize,
        /// Actual length.
        actual: usize,
    },
    /// Batch request exceeds the per-batch limit.
    BatchTooLarge {
        /// Requested number of addresses.
        requested: u32,
        /// Maximum allowed per batch.
        max: u32,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter { character, index } => {
                write!(f, "invalid base58 character {character:?} at position {index}")
            }
            Self::MalformedExtendedKey { len } => {
                write!(f, "malformed extended key: {len} bytes decoded, expected 82")
            }
            Self::InvalidChecksum => write!(f, "invalid checksum"),
            Self::InvalidPrefix => write!(f, "unrecognized extended key prefix"),
            Self::UnsupportedVersion(v) => {
                write!(f, "unsupported version bytes {}", hex::encode(v))
            }
            Self::HardenedIndexUnsupported(i) => {
                write!(f, "index {i} requires hardened derivation, which needs a private key")
            }
            Self::InvalidPublicKey => write!(f, "invalid public key"),
            Self::InvalidChildKey(i) => write!(f, "index {i} yields an invalid child key"),
            Self::MaxDepthExceeded => write!(f, "maximum derivation depth exceeded"),
            Self::EmptyKey => write!(f, "extended key is empty"),
            Self::InvalidLength { min, max, actual } => {
                write!(f, "extended key length {actual} is outside {min}..={max}")
            }
            Self::BatchTooLarge { requested, max } => {
                write!(f, "batch of {requested} exceeds the limit of {max} addresses")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A convenient Result type alias for hdwatch operations.
pub type Result<T> = core::result::Result<T, Error>;
