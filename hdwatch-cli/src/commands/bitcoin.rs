//! Bitcoin CLI commands.

use clap::{Args, Subcommand, ValueEnum};
use colored::Colorize;
use hdwatch::MAX_BATCH_SIZE;
use hdwatch_btc::{BtcAddressFormat, DerivedAddress, Deriver};

use crate::config::{Config, resolve_key};

/// Bitcoin address derivation.
#[derive(Args)]
pub struct BitcoinCommand {
    #[command(subcommand)]
    command: BitcoinSubcommand,
}

#[derive(Subcommand)]
enum BitcoinSubcommand {
    /// Derive receive addresses from an account-level xpub, ypub or zpub.
    Derive {
        /// Account key exported at m/84'/0'/0'.
        #[arg(short = 'k', long, env = "HDWATCH_BTC_XPUB", hide_env_values = true)]
        xpub: Option<String>,

        /// First receive index.
        #[arg(short, long, default_value_t = 0)]
        index: u32,

        /// Number of consecutive addresses.
        #[arg(
            short = 'n',
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_BATCH_SIZE))
        )]
        count: u32,

        /// Address rendering (defaults to the config file, then `digest`).
        #[arg(short, long, value_enum)]
        format: Option<CliFormat>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CliFormat {
    /// bc1q + Keccak-256 hex digest (not spendable)
    Digest,
    /// Native SegWit P2WPKH (bc1q...)
    P2wpkh,
}

impl From<CliFormat> for BtcAddressFormat {
    fn from(val: CliFormat) -> Self {
        match val {
            CliFormat::Digest => Self::Digest,
            CliFormat::P2wpkh => Self::P2wpkh,
        }
    }
}

impl BitcoinCommand {
    /// Execute the Bitcoin command.
    pub fn execute(self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match self.command {
            BitcoinSubcommand::Derive {
                xpub,
                index,
                count,
                format,
            } => {
                let key = resolve_key(xpub.as_deref(), config.btc_master_xpub.as_deref(), "BTC")?;
                let format = match format {
                    Some(f) => f.into(),
                    None => config.btc_format()?,
                };
                let deriver = Deriver::new(key, format)?;
                let addresses = deriver.derive_many(index, count)?;
                print_addresses(&deriver, &addresses);
            }
        }
        Ok(())
    }
}

#[rustfmt::skip]
fn print_addresses(deriver: &Deriver, addresses: &[DerivedAddress]) {
    println!();
    println!("      {}      {}", "Network".cyan().bold(), deriver.network());
    println!("      {}       {}", "Format".cyan().bold(), deriver.format().name());
    if deriver.format() == BtcAddressFormat::Digest {
        println!("      {}      {}", "Warning".yellow().bold(), "digest addresses cannot receive bitcoin".yellow());
    }
    println!();

    for (i, addr) in addresses.iter().enumerate() {
        println!("      {}        {}", "Index".cyan().bold(), format!("[{}]", addr.index).dimmed());
        println!("      {}         {}", "Path".cyan().bold(), addr.path);
        println!("      {}      {}", "Address".cyan().bold(), addr.address.green());
        println!("      {}   {}", "Public Key".cyan().bold(), addr.public_key_hex.dimmed());
        if i < addresses.len() - 1 {
            println!();
        }
    }
    println!();
}
