//! Ethereum address derivation from an account-level xpub.

use core::fmt;

use hdwatch::{AssetPath, ExtendedPublicKey, HARDENED_OFFSET, check_batch};
use tracing::{debug, warn};

use crate::{Address, Error, Result};

/// Required textual prefix of the account key.
pub const KEY_PREFIX: &str = "xpub";

/// A derived Ethereum receive address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedAddress {
    /// Receive index.
    pub index: u32,
    /// Full derivation path, assuming the key is the `m/44'/60'/0'` account.
    pub path: String,
    /// Address.
    pub address: Address,
    /// Compressed child public key in hex.
    pub public_key_hex: String,
}

impl fmt::Display for DerivedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

/// Ethereum address deriver bound to one parsed account key.
#[derive(Debug, Clone)]
pub struct Deriver {
    account: ExtendedPublicKey,
}

impl Deriver {
    /// Parse an account-level `xpub`.
    ///
    /// The prefix is checked before any decoding.
    pub fn new(extended_key: &str) -> Result<Self> {
        if !extended_key.starts_with(KEY_PREFIX) {
            return Err(Error::InvalidPrefix);
        }
        let account = ExtendedPublicKey::from_base58(extended_key)?;
        Ok(Self { account })
    }

    /// Derive the receive address at `0/index`.
    pub fn derive(&self, index: u32) -> Result<DerivedAddress> {
        let child = self.account.derive_receive(index)?;
        let address = Address::from_public_key(&child);
        debug!(index, "derived ethereum address");

        Ok(DerivedAddress {
            index,
            path: AssetPath::EthUsdt.full_path(index),
            address,
            public_key_hex: hex::encode(child.public_key_bytes()),
        })
    }

    /// Derive `count` consecutive receive addresses starting at `start`.
    pub fn derive_many(&self, start: u32, count: u32) -> Result<Vec<DerivedAddress>> {
        check_batch(start, count)?;
        (start..start + count).map(|index| self.derive(index)).collect()
    }

    /// The parsed account key.
    pub const fn account(&self) -> &ExtendedPublicKey {
        &self.account
    }
}

/// Derive the Ethereum receive address at `index` from an account `xpub`.
///
/// Pure: the same inputs always produce the same address.
pub fn derive_eth_address(extended_key: &str, index: u32) -> Result<DerivedAddress> {
    let result = derive_checked(extended_key, index);
    if let Err(e) = &result {
        warn!(index, error = %e, "ethereum address derivation failed");
    }
    result
}

fn derive_checked(extended_key: &str, index: u32) -> Result<DerivedAddress> {
    if !extended_key.starts_with(KEY_PREFIX) {
        return Err(Error::InvalidPrefix);
    }
    if index >= HARDENED_OFFSET {
        return Err(Error::HardenedIndexUnsupported(index));
    }
    Deriver::new(extended_key)?.derive(index)
}

/// Derive a batch of Ethereum receive addresses, parsing the key once.
pub fn derive_eth_addresses(extended_key: &str, start: u32, count: u32) -> Result<Vec<DerivedAddress>> {
    let result = Deriver::new(extended_key).and_then(|d| d.derive_many(start, count));
    if let Err(e) = &result {
        warn!(start, count, error = %e, "ethereum batch derivation failed");
    }
    result
}
