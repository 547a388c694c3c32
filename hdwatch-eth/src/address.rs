//! Ethereum account address with EIP-55 checksum encoding.
//!
//! Uses `alloy_primitives::Address` as the underlying implementation.

use alloy_primitives::Address as AlloyAddress;
use hdwatch::ChildPublicKey;

/// Ethereum address (20 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address(AlloyAddress);

impl Address {
    /// Create from raw 20-byte address.
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(AlloyAddress::new(bytes))
    }

    /// Create from a derived public key.
    ///
    /// Keccak-256 over the 64-byte uncompressed point, low 20 bytes.
    pub fn from_public_key(key: &ChildPublicKey) -> Self {
        let uncompressed = key.uncompressed_public_key();
        Self(AlloyAddress::from_raw_public_key(&uncompressed[1..]))
    }

    /// Get the raw bytes.
    pub const fn to_bytes(&self) -> [u8; 20] {
        self.0.0.0
    }

    /// Convert to EIP-55 checksummed string.
    pub fn to_checksum_string(&self) -> String {
        self.0.to_checksum(None)
    }
}

impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_checksum_string())
    }
}

impl From<Address> for [u8; 20] {
    fn from(addr: Address) -> Self {
        addr.to_bytes()
    }
}
