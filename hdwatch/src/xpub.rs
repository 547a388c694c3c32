//! BIP-32 extended public keys.
//!
//! Parsing, serialization and non-hardened child derivation. There is no
//! private key anywhere in this module, so hardened indices are rejected.

use core::fmt;
use core::str::FromStr;

use hmac::{Hmac, Mac};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{NonZeroScalar, ProjectivePoint, PublicKey};
use sha2::Sha512;

use crate::base58;
use crate::error::{Error, Result};
use crate::hash::{checksum, hash160};
use crate::types::HARDENED_OFFSET;
use crate::version::{KeyVersion, Network};

type HmacSha512 = Hmac<Sha512>;

/// Serialized key length without checksum.
pub const PAYLOAD_LEN: usize = 78;
/// Serialized key length with the 4-byte checksum.
pub const ENCODED_LEN: usize = PAYLOAD_LEN + 4;
/// Longest base58 string an [`ENCODED_LEN`]-byte key can encode to.
pub const MAX_ENCODED_CHARS: usize = 112;

/// BIP-32 extended public key in a canonical (`xpub`/`tpub`) encoding.
///
/// Keys in an alternate encoding must go through
/// [`normalize`](crate::normalize) first.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedPublicKey {
    version: KeyVersion,
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_number: u32,
    chain_code: [u8; 32],
    public_key: PublicKey,
}

/// A derived child public key and its chain code.
///
/// Computed fresh for every request and never cached.
#[derive(Clone, PartialEq, Eq)]
pub struct ChildPublicKey {
    public_key: PublicKey,
    chain_code: [u8; 32],
}

impl ExtendedPublicKey {
    /// Parse a Base58Check-encoded canonical extended public key.
    pub fn from_base58(key: &str) -> Result<Self> {
        check_encoded_len(key)?;
        let data = base58::decode(key)?;
        if data.len() != ENCODED_LEN {
            return Err(Error::MalformedExtendedKey { len: data.len() });
        }

        let (payload, check) = data.split_at(PAYLOAD_LEN);
        if *check != checksum(payload) {
            return Err(Error::InvalidChecksum);
        }

        Self::from_payload(payload)
    }

    fn from_payload(payload: &[u8]) -> Result<Self> {
        let mut version_bytes = [0u8; 4];
        version_bytes.copy_from_slice(&payload[0..4]);
        let version = KeyVersion::from_bytes(&version_bytes)
            .filter(|v| v.is_canonical())
            .ok_or(Error::UnsupportedVersion(version_bytes))?;

        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&payload[5..9]);

        let child_number = u32::from_be_bytes([payload[9], payload[10], payload[11], payload[12]]);

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&payload[13..45]);

        // Only SEC1 compressed points are valid in the key field.
        if !matches!(payload[45], 0x02 | 0x03) {
            return Err(Error::InvalidPublicKey);
        }
        let public_key =
            PublicKey::from_sec1_bytes(&payload[45..78]).map_err(|_| Error::InvalidPublicKey)?;

        Ok(Self {
            version,
            depth: payload[4],
            parent_fingerprint,
            child_number,
            chain_code,
            public_key,
        })
    }

    /// Serialize to Base58Check with a freshly computed checksum.
    pub fn to_base58(&self) -> String {
        let mut data = [0u8; PAYLOAD_LEN];
        data[0..4].copy_from_slice(&self.version.bytes());
        data[4] = self.depth;
        data[5..9].copy_from_slice(&self.parent_fingerprint);
        data[9..13].copy_from_slice(&self.child_number.to_be_bytes());
        data[13..45].copy_from_slice(&self.chain_code);
        data[45..78].copy_from_slice(&self.public_key_bytes());

        base58::check_encode(&data)
    }

    /// Derive the non-hardened child at `index`.
    ///
    /// Fails with [`Error::InvalidChildKey`] for the (astronomically rare)
    /// indices where BIP-32 says to skip to the next index.
    pub fn derive_child(&self, index: u32) -> Result<Self> {
        if index >= HARDENED_OFFSET {
            return Err(Error::HardenedIndexUnsupported(index));
        }
        if self.depth == u8::MAX {
            return Err(Error::MaxDepthExceeded);
        }

        // I = HMAC-SHA512(Key = c_par, Data = ser_P(K_par) || ser_32(i))
        let parent_bytes = self.public_key_bytes();
        let mut mac =
            HmacSha512::new_from_slice(&self.chain_code).map_err(|_| Error::InvalidChildKey(index))?;
        mac.update(&parent_bytes);
        mac.update(&index.to_be_bytes());
        let result = mac.finalize().into_bytes();
        let (il, ir) = result.split_at(32);

        // K_i = point(parse_256(I_L)) + K_par
        let tweak = NonZeroScalar::try_from(il).map_err(|_| Error::InvalidChildKey(index))?;
        let child_point = ProjectivePoint::GENERATOR * tweak.as_ref() + self.public_key.to_projective();
        let public_key =
            PublicKey::from_affine(child_point.to_affine()).map_err(|_| Error::InvalidChildKey(index))?;

        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&hash160(&parent_bytes)[..4]);

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(ir);

        Ok(Self {
            version: self.version,
            depth: self.depth + 1,
            parent_fingerprint,
            child_number: index,
            chain_code,
            public_key,
        })
    }

    /// Derive the receive key at `0/index` (external chain).
    pub fn derive_receive(&self, index: u32) -> Result<ChildPublicKey> {
        if index >= HARDENED_OFFSET {
            return Err(Error::HardenedIndexUnsupported(index));
        }
        let external = self.derive_child(0)?;
        external.derive_child(index).map(ChildPublicKey::from)
    }

    /// Version family (always canonical).
    pub const fn version(&self) -> KeyVersion {
        self.version
    }

    /// Network encoded in the version bytes.
    pub const fn network(&self) -> Network {
        self.version.network()
    }

    /// Depth in the derivation tree (0 for master).
    pub const fn depth(&self) -> u8 {
        self.depth
    }

    /// Fingerprint of the parent key.
    pub const fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    /// Child number this key was derived at (hardened bit included).
    pub const fn child_number(&self) -> u32 {
        self.child_number
    }

    /// Chain code.
    pub const fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// The secp256k1 public key.
    pub const fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// SEC1 compressed public key.
    pub fn public_key_bytes(&self) -> [u8; 33] {
        compressed(&self.public_key)
    }

    /// This key's own fingerprint, as its children record it.
    pub fn fingerprint(&self) -> [u8; 4] {
        let hash = hash160(&self.public_key_bytes());
        [hash[0], hash[1], hash[2], hash[3]]
    }
}

impl ChildPublicKey {
    /// The secp256k1 public key.
    pub const fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// SEC1 compressed public key.
    pub fn public_key_bytes(&self) -> [u8; 33] {
        compressed(&self.public_key)
    }

    /// SEC1 uncompressed public key (`0x04 || X || Y`).
    pub fn uncompressed_public_key(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out.copy_from_slice(self.public_key.to_encoded_point(false).as_bytes());
        out
    }

    /// Chain code.
    pub const fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }
}

impl From<ExtendedPublicKey> for ChildPublicKey {
    fn from(key: ExtendedPublicKey) -> Self {
        Self {
            public_key: key.public_key,
            chain_code: key.chain_code,
        }
    }
}

/// Reject strings too long to be an extended key before decoding them.
pub(crate) const fn check_encoded_len(key: &str) -> Result<()> {
    if key.len() > MAX_ENCODED_CHARS {
        return Err(Error::InvalidLength {
            min: 1,
            max: MAX_ENCODED_CHARS,
            actual: key.len(),
        });
    }
    Ok(())
}

fn compressed(key: &PublicKey) -> [u8; 33] {
    let mut out = [0u8; 33];
    out.copy_from_slice(key.to_encoded_point(true).as_bytes());
    out
}

impl FromStr for ExtendedPublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_base58(s)
    }
}

impl fmt::Display for ExtendedPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for ExtendedPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedPublicKey")
            .field("version", &self.version)
            .field("depth", &self.depth)
            .field("child_number", &self.child_number)
            .finish()
    }
}

impl fmt::Debug for ChildPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildPublicKey")
            .field("public_key", &hex::encode(self.public_key_bytes()))
            .finish()
    }
}
