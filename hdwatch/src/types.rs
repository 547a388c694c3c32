//! Deposit assets and the derivation conventions their master keys follow.

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};

/// First hardened child index (2^31).
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Maximum number of addresses derived in one batch.
pub const MAX_BATCH_SIZE: u32 = 100;

/// Check a batch request of `count` addresses starting at `start`.
///
/// The whole range must fit below [`HARDENED_OFFSET`].
pub fn check_batch(start: u32, count: u32) -> Result<()> {
    if count > MAX_BATCH_SIZE {
        return Err(Error::BatchTooLarge {
            requested: count,
            max: MAX_BATCH_SIZE,
        });
    }
    if count > 0 {
        let last = start.saturating_add(count - 1);
        if last >= HARDENED_OFFSET {
            return Err(Error::HardenedIndexUnsupported(last));
        }
    }
    Ok(())
}

/// Derivation convention an account-level extended key is expected to come from.
///
/// This is metadata only: the origin path of a public key cannot be
/// recovered from the key itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetPath {
    /// BIP-84 native SegWit Bitcoin account, `m/84'/0'/0'`.
    Btc,
    /// BIP-44 Ethereum account used for ERC-20 stablecoins, `m/44'/60'/0'`.
    EthUsdt,
}

impl AssetPath {
    /// BIP purpose.
    pub const fn purpose(self) -> u32 {
        match self {
            Self::Btc => 84,
            Self::EthUsdt => 44,
        }
    }

    /// SLIP-44 coin type.
    pub const fn coin_type(self) -> u32 {
        match self {
            Self::Btc => 0,
            Self::EthUsdt => 60,
        }
    }

    /// Account-level path the master key is exported at.
    pub const fn account_path(self) -> &'static str {
        match self {
            Self::Btc => "m/84'/0'/0'",
            Self::EthUsdt => "m/44'/60'/0'",
        }
    }

    /// Full path of the receive address at `index`.
    pub fn full_path(self, index: u32) -> String {
        format!("m/{}'/{}'/0'/0/{index}", self.purpose(), self.coin_type())
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.account_path())
    }
}

/// Assets clients can deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Asset {
    /// Bitcoin.
    #[default]
    Btc,
    /// Tether on Ethereum (ERC-20).
    Usdt,
    /// USD Coin on Ethereum (ERC-20).
    Usdc,
}

impl Asset {
    /// Every supported asset.
    pub const ALL: [Self; 3] = [Self::Btc, Self::Usdt, Self::Usdc];

    /// Derivation convention of the master key receiving this asset.
    pub const fn path(self) -> AssetPath {
        match self {
            Self::Btc => AssetPath::Btc,
            Self::Usdt | Self::Usdc => AssetPath::EthUsdt,
        }
    }

    /// Ticker symbol.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Btc => "BTC",
            Self::Usdt => "USDT",
            Self::Usdc => "USDC",
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error returned when parsing an unknown asset name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseAssetError;

impl fmt::Display for ParseAssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid asset, expected: btc, usdt, or usdc")
    }
}

impl std::error::Error for ParseAssetError {}

impl FromStr for Asset {
    type Err = ParseAssetError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "btc" | "bitcoin" => Ok(Self::Btc),
            "usdt" | "usdt-erc20" | "tether" => Ok(Self::Usdt),
            "usdc" | "usdc-erc20" => Ok(Self::Usdc),
            _ => Err(ParseAssetError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_path() {
        assert_eq!(AssetPath::Btc.full_path(7), "m/84'/0'/0'/0/7");
        assert_eq!(AssetPath::EthUsdt.full_path(0), "m/44'/60'/0'/0/0");
    }

    #[test]
    fn test_account_path_matches_components() {
        for path in [AssetPath::Btc, AssetPath::EthUsdt] {
            let expected = format!("m/{}'/{}'/0'", path.purpose(), path.coin_type());
            assert_eq!(path.account_path(), expected);
            assert!(path.full_path(5).starts_with(path.account_path()));
        }
        assert_eq!((AssetPath::Btc.purpose(), AssetPath::Btc.coin_type()), (84, 0));
        assert_eq!((AssetPath::EthUsdt.purpose(), AssetPath::EthUsdt.coin_type()), (44, 60));
    }

    #[test]
    fn test_asset_paths() {
        assert_eq!(Asset::Btc.path(), AssetPath::Btc);
        assert_eq!(Asset::Usdt.path(), AssetPath::EthUsdt);
        assert_eq!(Asset::Usdc.path(), AssetPath::EthUsdt);
    }

    #[test]
    fn test_asset_from_str() {
        assert_eq!("BTC".parse::<Asset>(), Ok(Asset::Btc));
        assert_eq!("usdt".parse::<Asset>(), Ok(Asset::Usdt));
        assert_eq!("USDC-ERC20".parse::<Asset>(), Ok(Asset::Usdc));
        assert_eq!("doge".parse::<Asset>(), Err(ParseAssetError));
    }

    mod batch_tests {
        use super::*;

        #[test]
        fn test_within_limits() {
            assert!(check_batch(0, MAX_BATCH_SIZE).is_ok());
            assert!(check_batch(HARDENED_OFFSET - 1, 1).is_ok());
            assert!(check_batch(HARDENED_OFFSET, 0).is_ok());
        }

        #[test]
        fn test_too_large() {
            assert_eq!(
                check_batch(0, 101),
                Err(Error::BatchTooLarge {
                    requested: 101,
                    max: 100
                })
            );
        }

        #[test]
        fn test_runs_into_hardened_range() {
            assert_eq!(
                check_batch(HARDENED_OFFSET - 2, 3),
                Err(Error::HardenedIndexUnsupported(HARDENED_OFFSET))
            );
        }
    }
}
