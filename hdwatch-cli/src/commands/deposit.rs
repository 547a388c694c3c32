//! Per-client deposit addresses.

use clap::{Args, ValueEnum};
use colored::Colorize;
use hdwatch::{Asset, AssetPath};
use hdwatch_btc::{BtcAddressFormat, derive_btc_address_with};
use hdwatch_eth::derive_eth_address;

use crate::config::{Config, resolve_key};

/// Show the deposit address of one client for every asset.
///
/// Assets whose master key is missing or invalid are reported as
/// unavailable; the remaining assets are still shown.
#[derive(Args)]
pub struct DepositCommand {
    /// Client derivation index.
    #[arg(short, long)]
    index: u32,

    /// Only show this asset.
    #[arg(short, long, value_enum)]
    asset: Option<CliAsset>,

    /// Bitcoin account key (overrides the config file).
    #[arg(long, env = "HDWATCH_BTC_XPUB", hide_env_values = true)]
    btc_xpub: Option<String>,

    /// Ethereum account key (overrides the config file).
    #[arg(long, env = "HDWATCH_ETH_XPUB", hide_env_values = true)]
    eth_xpub: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliAsset {
    /// Bitcoin
    Btc,
    /// Tether (ERC-20)
    Usdt,
    /// USD Coin (ERC-20)
    Usdc,
}

impl From<CliAsset> for Asset {
    fn from(val: CliAsset) -> Self {
        match val {
            CliAsset::Btc => Self::Btc,
            CliAsset::Usdt => Self::Usdt,
            CliAsset::Usdc => Self::Usdc,
        }
    }
}

impl DepositCommand {
    /// Execute the deposit command.
    #[rustfmt::skip]
    pub fn execute(self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let assets = self
            .asset
            .map_or_else(|| Asset::ALL.to_vec(), |a| vec![a.into()]);

        println!();
        println!("      {} {}", "Client Index".cyan().bold(), self.index);
        println!();

        let mut failed = 0usize;
        for &asset in &assets {
            let label = format!("{:<12}", asset.symbol()).cyan().bold();
            match self.address(asset, config) {
                Ok(address) => println!("      {label} {}", address.green()),
                Err(e) => {
                    failed += 1;
                    println!("      {label} {}", format!("unavailable: {e}").red());
                }
            }
        }

        if assets.contains(&Asset::Btc) && config.btc_format().ok() == Some(BtcAddressFormat::Digest) {
            println!();
            println!("      {}", "BTC shown as a digest address; it cannot receive bitcoin".yellow());
        }
        println!();

        if failed > 0 {
            return Err(format!("{failed} of {} deposit addresses unavailable", assets.len()).into());
        }
        Ok(())
    }

    fn address(&self, asset: Asset, config: &Config) -> Result<String, Box<dyn std::error::Error>> {
        match asset.path() {
            AssetPath::Btc => {
                let key = resolve_key(self.btc_xpub.as_deref(), config.btc_master_xpub.as_deref(), "BTC")?;
                let derived = derive_btc_address_with(key, self.index, config.btc_format()?)?;
                Ok(derived.address)
            }
            AssetPath::EthUsdt => {
                let key = resolve_key(self.eth_xpub.as_deref(), config.eth_master_xpub.as_deref(), "ETH")?;
                Ok(derive_eth_address(key, self.index)?.address.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZPUB: &str = "zpub6rFR7y4Q2AijBEqTUquhVz398htDFrtymD9xYYfG1m4wAcvPhXNfE3EfH1r1ADqtfSdVCToUG868RvUUkgDKf31mGDtKsAYz2oz2AGutZYs";

    fn command(index: u32, btc: Option<&str>, eth: Option<&str>) -> DepositCommand {
        DepositCommand {
            index,
            asset: None,
            btc_xpub: btc.map(str::to_string),
            eth_xpub: eth.map(str::to_string),
        }
    }

    #[test]
    fn test_btc_address_from_config() {
        let config = Config {
            btc_master_xpub: Some(ZPUB.to_string()),
            btc_address_format: Some("p2wpkh".to_string()),
            ..Config::default()
        };
        let cmd = command(0, None, None);
        assert_eq!(
            cmd.address(Asset::Btc, &config).unwrap(),
            "bc1qcr8te4kr609gcawutmrza0j4xv80jy8z306fyu"
        );
    }

    #[test]
    fn test_usdt_and_usdc_share_address() {
        let eth_key = hdwatch::normalize(ZPUB).unwrap().into_owned();
        let cmd = command(3, None, Some(&eth_key));
        let config = Config::default();
        let usdt = cmd.address(Asset::Usdt, &config).unwrap();
        let usdc = cmd.address(Asset::Usdc, &config).unwrap();
        assert!(usdt.starts_with("0x"));
        assert_eq!(usdt, usdc);
    }

    #[test]
    fn test_missing_key_is_per_asset() {
        let eth_key = hdwatch::normalize(ZPUB).unwrap().into_owned();
        let cmd = command(0, None, Some(&eth_key));
        let config = Config::default();
        assert!(cmd.address(Asset::Btc, &config).is_err());
        assert!(cmd.address(Asset::Usdt, &config).is_ok());
        assert!(cmd.execute(&config).is_err());
    }

    #[test]
    fn test_eth_rejects_zpub() {
        let cmd = command(0, None, Some(ZPUB));
        assert!(cmd.address(Asset::Usdt, &Config::default()).is_err());
    }
}
