//! CLI command definitions and handlers.

mod bitcoin;
mod deposit;
mod ethereum;
mod key;

use std::path::PathBuf;

pub use bitcoin::BitcoinCommand;
use clap::{Parser, Subcommand};
pub use deposit::DepositCommand;
pub use ethereum::EthereumCommand;
pub use key::KeyCommand;

/// hdwatch - derive deposit addresses from watch-only master keys.
#[derive(Parser)]
#[command(name = "hdwatch")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// TOML file with `btc_master_xpub` / `eth_master_xpub`.
    #[arg(short, long, global = true, env = "HDWATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Bitcoin address derivation.
    #[command(name = "btc", alias = "bitcoin")]
    Bitcoin(BitcoinCommand),

    /// Ethereum (ERC-20) address derivation.
    #[command(name = "eth", alias = "ethereum")]
    Ethereum(EthereumCommand),

    /// Extended key utilities.
    Key(KeyCommand),

    /// Deposit addresses of one client across all assets.
    Deposit(DepositCommand),
}
