//! Ethereum CLI commands.

use clap::{Args, Subcommand};
use colored::Colorize;
use hdwatch::MAX_BATCH_SIZE;
use hdwatch_eth::{DerivedAddress, Deriver};

use crate::config::{Config, resolve_key};

/// Ethereum (ERC-20) address derivation.
#[derive(Args)]
pub struct EthereumCommand {
    #[command(subcommand)]
    command: EthereumSubcommand,
}

#[derive(Subcommand)]
enum EthereumSubcommand {
    /// Derive receive addresses from an account-level xpub.
    Derive {
        /// Account key exported at m/44'/60'/0'.
        #[arg(short = 'k', long, env = "HDWATCH_ETH_XPUB", hide_env_values = true)]
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
    },
}

impl EthereumCommand {
    /// Execute the Ethereum command.
    pub fn execute(self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match self.command {
            EthereumSubcommand::Derive { xpub, index, count } => {
                let key = resolve_key(xpub.as_deref(), config.eth_master_xpub.as_deref(), "ETH")?;
                let deriver = Deriver::new(key)?;
                let addresses = deriver.derive_many(index, count)?;
                print_addresses(&addresses);
            }
        }
        Ok(())
    }
}

#[rustfmt::skip]
fn print_addresses(addresses: &[DerivedAddress]) {
    println!();
    for (i, addr) in addresses.iter().enumerate() {
        println!("      {}        {}", "Index".cyan().bold(), format!("[{}]", addr.index).dimmed());
        println!("      {}         {}", "Path".cyan().bold(), addr.path);
        println!("      {}      {}", "Address".cyan().bold(), addr.address.to_string().green());
        println!("      {}   {}", "Public Key".cyan().bold(), addr.public_key_hex.dimmed());
        if i < addresses.len() - 1 {
            println!();
        }
    }
    println!();
}
