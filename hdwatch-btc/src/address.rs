//! Bitcoin address rendering for derived child keys.

use core::fmt;
use core::str::FromStr;

use bech32::{Fe32, Hrp, hrp, segwit};
use hdwatch::Network;
use hdwatch::hash::{hash160, keccak256};

use crate::Result;

/// How a derived child key is rendered as an address string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BtcAddressFormat {
    /// `<hrp>1q` + hex of the first 20 bytes of Keccak-256(compressed key).
    ///
    /// Looks like a bech32 address but is not one; funds sent to it are lost.
    #[default]
    Digest,
    /// BIP-173 native SegWit (P2WPKH) address.
    P2wpkh,
}

impl BtcAddressFormat {
    /// Short identifier for configuration and CLI usage.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Digest => "digest",
            Self::P2wpkh => "p2wpkh",
        }
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Digest => "Digest (non-standard)",
            Self::P2wpkh => "P2WPKH (Native SegWit)",
        }
    }

    /// Render `public_key` (SEC1 compressed) on `network`.
    pub fn render(self, public_key: &[u8; 33], network: Network) -> Result<String> {
        match self {
            Self::Digest => Ok(digest_address(public_key, network)),
            Self::P2wpkh => p2wpkh_address(public_key, network),
        }
    }
}

impl fmt::Display for BtcAddressFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown address format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseFormatError;

impl fmt::Display for ParseFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid address format, expected: digest or p2wpkh")
    }
}

impl std::error::Error for ParseFormatError {}

impl FromStr for BtcAddressFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "digest" | "legacy-digest" => Ok(Self::Digest),
            "p2wpkh" | "native-segwit" | "bech32" => Ok(Self::P2wpkh),
            _ => Err(ParseFormatError),
        }
    }
}

/// Digest-style placeholder address.
pub fn digest_address(public_key: &[u8; 33], network: Network) -> String {
    let hash = keccak256(public_key);
    format!("{}1q{}", network.bech32_hrp(), hex::encode(&hash[..20]))
}

/// BIP-173 P2WPKH address: witness v0 over Hash160 of the compressed key.
pub fn p2wpkh_address(public_key: &[u8; 33], network: Network) -> Result<String> {
    let program = hash160(public_key);
    Ok(segwit::encode(segwit_hrp(network), Fe32::Q, &program)?)
}

const fn segwit_hrp(network: Network) -> Hrp {
    match network {
        Network::Mainnet => hrp::BC,
        Network::Testnet => hrp::TB,
    }
}
