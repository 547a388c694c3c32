//! hdwatch - derive deposit addresses from watch-only master keys.
//!
//! No private keys are read, generated or stored.

mod commands;
mod config;

use clap::Parser;
use colored::Colorize;
use commands::{Cli, Commands};
use config::Config;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {e}", "Error:".red().bold());
        std::process::exit(1);
    }
}

/// `-v` flags win over `RUST_LOG`; with neither, only warnings are shown.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Bitcoin(cmd) => cmd.execute(&config)?,
        Commands::Ethereum(cmd) => cmd.execute(&config)?,
        Commands::Key(cmd) => cmd.execute()?,
        Commands::Deposit(cmd) => cmd.execute(&config)?,
    }
    Ok(())
}
