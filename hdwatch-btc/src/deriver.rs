//! Bitcoin address derivation from an account-level extended key.

use core::fmt;

use hdwatch::{AssetPath, ExtendedPublicKey, HARDENED_OFFSET, Network, check_batch, normalize};
use tracing::{debug, warn};

use crate::{BtcAddressFormat, Error, Result};

/// A derived Bitcoin receive address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedAddress {
    /// Receive index.
    pub index: u32,
    /// Full derivation path, assuming the key is the `m/84'/0'/0'` account.
    pub path: String,
    /// Address string.
    pub address: String,
    /// Compressed child public key in hex.
    pub public_key_hex: String,
    /// Rendering used for `address`.
    pub format: BtcAddressFormat,
}

impl fmt::Display for DerivedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

/// Bitcoin address deriver bound to one normalized account key.
#[derive(Debug, Clone)]
pub struct Deriver {
    account: ExtendedPublicKey,
    format: BtcAddressFormat,
}

impl Deriver {
    /// Normalize and parse an account key.
    pub fn new(extended_key: &str, format: BtcAddressFormat) -> Result<Self> {
        let normalized = normalize(extended_key)?;
        let account = ExtendedPublicKey::from_base58(&normalized)?;
        Ok(Self { account, format })
    }

    /// Derive the receive address at `0/index`.
    pub fn derive(&self, index: u32) -> Result<DerivedAddress> {
        let child = self.account.derive_receive(index)?;
        let public_key = child.public_key_bytes();
        let address = self.format.render(&public_key, self.network())?;
        debug!(index, network = %self.network(), format = self.format.id(), "derived bitcoin address");

        Ok(DerivedAddress {
            index,
            path: AssetPath::Btc.full_path(index),
            address,
            public_key_hex: hex::encode(public_key),
            format: self.format,
        })
    }

    /// Derive `count` consecutive receive addresses starting at `start`.
    pub fn derive_many(&self, start: u32, count: u32) -> Result<Vec<DerivedAddress>> {
        check_batch(start, count)?;
        (start..start + count).map(|index| self.derive(index)).collect()
    }

    /// Network of the account key.
    pub const fn network(&self) -> Network {
        self.account.network()
    }

    /// Address rendering in use.
    pub const fn format(&self) -> BtcAddressFormat {
        self.format
    }

    /// The parsed, normalized account key.
    pub const fn account(&self) -> &ExtendedPublicKey {
        &self.account
    }
}

/// Derive the Bitcoin receive address at `index` in the default format.
///
/// Pure: the same inputs always produce the same address.
pub fn derive_btc_address(extended_key: &str, index: u32) -> Result<DerivedAddress> {
    derive_btc_address_with(extended_key, index, BtcAddressFormat::default())
}

/// Derive the Bitcoin receive address at `index` in the given format.
pub fn derive_btc_address_with(
    extended_key: &str,
    index: u32,
    format: BtcAddressFormat,
) -> Result<DerivedAddress> {
    let result = if index >= HARDENED_OFFSET {
        Err(Error::HardenedIndexUnsupported(index))
    } else {
        Deriver::new(extended_key, format).and_then(|d| d.derive(index))
    };

    if let Err(e) = &result {
        warn!(index, error = %e, "bitcoin address derivation failed");
    }
    result
}

/// Derive a batch of Bitcoin receive addresses, normalizing the key once.
pub fn derive_btc_addresses(
    extended_key: &str,
    start: u32,
    count: u32,
    format: BtcAddressFormat,
) -> Result<Vec<DerivedAddress>> {
    let result = Deriver::new(extended_key, format).and_then(|d| d.derive_many(start, count));
    if let Err(e) = &result {
        warn!(start, count, error = %e, "bitcoin batch derivation failed");
    }
    result
}
