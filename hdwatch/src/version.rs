//! Extended public key version families and normalization.
//!
//! Wallets export account keys with different version bytes depending on the
//! script type they intend (`xpub` for legacy, `ypub` for nested SegWit,
//! `zpub` for native SegWit). The key material is identical, so derivation
//! only ever needs the canonical encoding of each network.

use std::borrow::Cow;
use std::fmt;

use tracing::debug;

use crate::base58;
use crate::error::{Error, Result};
use crate::hash::checksum;
use crate::xpub::{ENCODED_LEN, PAYLOAD_LEN, check_encoded_len};

/// Shortest key string accepted by [`validate_format`].
pub const MIN_KEY_LEN: usize = 100;
/// Longest key string accepted by [`validate_format`].
pub const MAX_KEY_LEN: usize = 120;

/// Bitcoin-style network a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Network {
    /// Mainnet.
    #[default]
    Mainnet,
    /// Testnet.
    Testnet,
}

impl Network {
    /// Network name.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }

    /// Bech32 human-readable part for SegWit addresses.
    #[inline]
    pub const fn bech32_hrp(self) -> &'static str {
        match self {
            Self::Mainnet => "bc",
            Self::Testnet => "tb",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Recognized extended public key version families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum KeyVersion {
    /// Mainnet canonical (BIP-32).
    Xpub,
    /// Mainnet P2WPKH-in-P2SH (BIP-49).
    Ypub,
    /// Mainnet P2WPKH (BIP-84).
    Zpub,
    /// Testnet canonical.
    Tpub,
    /// Testnet P2WPKH-in-P2SH.
    Upub,
    /// Testnet P2WPKH.
    Vpub,
}

impl KeyVersion {
    /// Every recognized family.
    pub const ALL: [Self; 6] = [
        Self::Xpub,
        Self::Ypub,
        Self::Zpub,
        Self::Tpub,
        Self::Upub,
        Self::Vpub,
    ];

    /// The four version bytes.
    pub const fn bytes(self) -> [u8; 4] {
        match self {
            Self::Xpub => [0x04, 0x88, 0xB2, 0x1E],
            Self::Ypub => [0x04, 0x9D, 0x7C, 0xB2],
            Self::Zpub => [0x04, 0xB2, 0x47, 0x46],
            Self::Tpub => [0x04, 0x35, 0x87, 0xCF],
            Self::Upub => [0x04, 0x4A, 0x52, 0x62],
            Self::Vpub => [0x04, 0x5F, 0x1C, 0xF6],
        }
    }

    /// Textual prefix of a base58 key in this family.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Xpub => "xpub",
            Self::Ypub => "ypub",
            Self::Zpub => "zpub",
            Self::Tpub => "tpub",
            Self::Upub => "upub",
            Self::Vpub => "vpub",
        }
    }

    /// Network of this family.
    pub const fn network(self) -> Network {
        match self {
            Self::Xpub | Self::Ypub | Self::Zpub => Network::Mainnet,
            Self::Tpub | Self::Upub | Self::Vpub => Network::Testnet,
        }
    }

    /// The canonical family of the same network.
    pub const fn canonical(self) -> Self {
        match self.network() {
            Network::Mainnet => Self::Xpub,
            Network::Testnet => Self::Tpub,
        }
    }

    /// Whether this is the canonical family of its network.
    pub const fn is_canonical(self) -> bool {
        matches!(self, Self::Xpub | Self::Tpub)
    }

    /// Look up the family for four version bytes.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.bytes() == bytes)
    }

    /// Detect the family from the textual prefix, without decoding.
    ///
    /// Case-sensitive: `XPUB...` is not recognized.
    pub fn detect(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| key.starts_with(v.prefix()))
    }
}

impl fmt::Display for KeyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Rewrite an extended public key to the canonical encoding of its network.
///
/// Canonical keys are returned borrowed without decoding. Alternate families
/// get canonical version bytes and a recomputed checksum; the checksum covers
/// the version bytes, so it cannot be carried over. Keys with unknown version
/// bytes are passed through unchanged and fail later, at parse time.
pub fn normalize(key: &str) -> Result<Cow<'_, str>> {
    if KeyVersion::detect(key).is_some_and(KeyVersion::is_canonical) {
        return Ok(Cow::Borrowed(key));
    }

    check_encoded_len(key)?;
    let mut data = base58::decode(key)?;
    if data.len() < 4 {
        return Err(Error::MalformedExtendedKey { len: data.len() });
    }

    let version = match KeyVersion::from_bytes(&data[..4]) {
        Some(v) if !v.is_canonical() => v,
        _ => {
            debug!("version bytes not an alternate family, passing key through");
            return Ok(Cow::Borrowed(key));
        }
    };

    if data.len() != ENCODED_LEN {
        return Err(Error::MalformedExtendedKey { len: data.len() });
    }

    let (payload, check) = data.split_at_mut(PAYLOAD_LEN);
    if check != checksum(payload) {
        return Err(Error::InvalidChecksum);
    }

    let canonical = version.canonical();
    payload[..4].copy_from_slice(&canonical.bytes());
    check.copy_from_slice(&checksum(payload));

    debug!(from = %version, to = %canonical, "normalized extended key");
    Ok(Cow::Owned(base58::encode(&data)))
}

/// Check the shape of a user-supplied key string before it is stored.
///
/// This is a cheap syntactic check, applied in order: non-empty, a
/// plausible length, the base58 alphabet, then a recognized prefix. Checksum and curve point are
/// verified only when the key is parsed.
pub fn validate_format(key: &str) -> Result<KeyVersion> {
    if key.trim().is_empty() {
        return Err(Error::EmptyKey);
    }

    let len = key.chars().count();
    if !(MIN_KEY_LEN..=MAX_KEY_LEN).contains(&len) {
        return Err(Error::InvalidLength {
            min: MIN_KEY_LEN,
            max: MAX_KEY_LEN,
            actual: len,
        });
    }

    if let Some((index, character)) = key.char_indices().find(|&(_, c)| !base58::is_base58_char(c)) {
        return Err(Error::InvalidCharacter { character, index });
    }

    KeyVersion::detect(key).ok_or(Error::InvalidPrefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xpub::MAX_ENCODED_CHARS;

    // BIP-84 account 0 of "abandon abandon ... about".
    const ZPUB: &str = "zpub6rFR7y4Q2AijBEqTUquhVz398htDFrtymD9xYYfG1m4wAcvPhXNfE3EfH1r1ADqtfSdVCToUG868RvUUkgDKf31mGDtKsAYz2oz2AGutZYs";
    // BIP-32 test vector 1, chain m.
    const XPUB: &str = "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8";

    fn reencode_as(key: &str, version: KeyVersion) -> String {
        let mut payload = base58::check_decode(key).unwrap();
        payload[..4].copy_from_slice(&version.bytes());
        base58::check_encode(&payload)
    }

    mod version_tests {
        use super::*;

        #[test]
        fn test_prefix_matches_encoding() {
            for version in KeyVersion::ALL {
                let key = reencode_as(XPUB, version);
                assert!(key.starts_with(version.prefix()), "{version}: {key}");
                assert_eq!(KeyVersion::detect(&key), Some(version));
            }
        }

        #[test]
        fn test_canonical_mapping() {
            assert_eq!(KeyVersion::Zpub.canonical(), KeyVersion::Xpub);
            assert_eq!(KeyVersion::Ypub.canonical(), KeyVersion::Xpub);
            assert_eq!(KeyVersion::Vpub.canonical(), KeyVersion::Tpub);
            assert_eq!(KeyVersion::Tpub.network(), Network::Testnet);
        }

        #[test]
        fn test_detect_is_case_sensitive() {
            assert_eq!(KeyVersion::detect("XPUB661My"), None);
            assert_eq!(KeyVersion::detect("notakey"), None);
        }
    }

    mod normalize_tests {
        use super::*;

        #[test]
        fn test_canonical_is_borrowed() {
            let out = normalize(XPUB).unwrap();
            assert!(matches!(out, Cow::Borrowed(_)));
            assert_eq!(out, XPUB);
        }

        #[test]
        fn test_zpub_becomes_xpub() {
            let out = normalize(ZPUB).unwrap();
            assert!(out.starts_with("xpub"));
            // Valid Base58Check with the same key material.
            let before = base58::check_decode(ZPUB).unwrap();
            let after = base58::check_decode(&out).unwrap();
            assert_eq!(after[..4], KeyVersion::Xpub.bytes());
            assert_eq!(before[4..], after[4..]);
        }

        #[test]
        fn test_idempotent() {
            let once = normalize(ZPUB).unwrap().into_owned();
            let twice = normalize(&once).unwrap();
            assert_eq!(once, twice);
        }

        #[test]
        fn test_testnet_alternates() {
            let vpub = reencode_as(XPUB, KeyVersion::Vpub);
            let out = normalize(&vpub).unwrap();
            assert!(out.starts_with("tpub"));
            assert_eq!(out, reencode_as(XPUB, KeyVersion::Tpub));
        }

        #[test]
        fn test_ypub_roundtrips_to_original_xpub() {
            let ypub = reencode_as(XPUB, KeyVersion::Ypub);
            assert_eq!(normalize(&ypub).unwrap(), XPUB);
        }

        #[test]
        fn test_unknown_version_passes_through() {
            let payload = [0x01, 0x02, 0x03, 0x04, 0x05];
            let key = base58::encode(&payload);
            assert_eq!(normalize(&key).unwrap(), key);
            assert_eq!(normalize("notakey").unwrap(), "notakey");
        }

        #[test]
        fn test_too_short() {
            assert_eq!(normalize("2g"), Err(Error::MalformedExtendedKey { len: 1 }));
            assert_eq!(normalize(""), Err(Error::MalformedExtendedKey { len: 0 }));
        }

        #[test]
        fn test_invalid_character() {
            assert!(matches!(
                normalize("zpub0"),
                Err(Error::InvalidCharacter { character: '0', .. })
            ));
        }

        #[test]
        fn test_truncated_alternate() {
            let mut payload = base58::check_decode(ZPUB).unwrap();
            payload.truncate(40);
            let key = base58::encode(&payload);
            assert_eq!(normalize(&key), Err(Error::MalformedExtendedKey { len: 40 }));
        }

        #[test]
        fn test_overlong_input_rejected() {
            let key = format!("{ZPUB}{}", "z".repeat(1000));
            assert_eq!(
                normalize(&key),
                Err(Error::InvalidLength {
                    min: 1,
                    max: MAX_ENCODED_CHARS,
                    actual: key.len()
                })
            );
        }

        #[test]
        fn test_corrupted_alternate_checksum() {
            let mut data = base58::decode(ZPUB).unwrap();
            data[50] ^= 0x01;
            let key = base58::encode(&data);
            assert_eq!(normalize(&key), Err(Error::InvalidChecksum));
        }
    }

    mod validate_tests {
        use super::*;

        #[test]
        fn test_valid_keys() {
            assert_eq!(validate_format(XPUB), Ok(KeyVersion::Xpub));
            assert_eq!(validate_format(ZPUB), Ok(KeyVersion::Zpub));
        }

        #[test]
        fn test_empty() {
            assert_eq!(validate_format(""), Err(Error::EmptyKey));
            assert_eq!(validate_format("   "), Err(Error::EmptyKey));
        }

        #[test]
        fn test_prefix() {
            let key = format!("Q{}", &XPUB[1..]);
            assert_eq!(validate_format(&key), Err(Error::InvalidPrefix));
        }

        #[test]
        fn test_check_order() {
            // Length before alphabet and prefix.
            assert!(matches!(validate_format("notakey"), Err(Error::InvalidLength { actual: 7, .. })));
            // Alphabet before prefix.
            let key = format!("0{}", &XPUB[1..]);
            assert_eq!(
                validate_format(&key),
                Err(Error::InvalidCharacter {
                    character: '0',
                    index: 0
                })
            );
        }

        #[test]
        fn test_length() {
            assert_eq!(
                validate_format("xpub1234"),
                Err(Error::InvalidLength {
                    min: MIN_KEY_LEN,
                    max: MAX_KEY_LEN,
                    actual: 8
                })
            );
        }

        #[test]
        fn test_alphabet() {
            let key = format!("{}0", &XPUB[..110]);
            assert_eq!(
                validate_format(&key),
                Err(Error::InvalidCharacter {
                    character: '0',
                    index: 110
                })
            );
        }
    }
}
