//! Extended key utilities.

use clap::{Args, Subcommand};
use colored::Colorize;
use hdwatch::{ExtendedPublicKey, HARDENED_OFFSET, KeyVersion, normalize, validate_format};

/// Extended key utilities.
#[derive(Args)]
pub struct KeyCommand {
    #[command(subcommand)]
    command: KeySubcommand,
}

#[derive(Subcommand)]
enum KeySubcommand {
    /// Print the canonical (xpub/tpub) form of a key.
    Normalize {
        /// Extended public key.
        key: String,
    },

    /// Decode a key and show its fields.
    Inspect {
        /// Extended public key.
        key: String,
    },

    /// Check prefix, length and alphabet without decoding.
    Validate {
        /// Extended public key.
        key: String,
    },
}

impl KeyCommand {
    /// Execute the key command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        match self.command {
            KeySubcommand::Normalize { key } => {
                println!("{}", normalize(key.trim())?);
            }
            KeySubcommand::Inspect { key } => inspect(key.trim())?,
            KeySubcommand::Validate { key } => {
                let version = validate_format(key.trim())?;
                println!();
                println!("      {}       {}", "Format".cyan().bold(), "valid".green());
                println!("      {}       {}", "Family".cyan().bold(), version);
                println!("      {}      {}", "Network".cyan().bold(), version.network());
                println!();
            }
        }
        Ok(())
    }
}

#[rustfmt::skip]
fn inspect(key: &str) -> Result<(), Box<dyn std::error::Error>> {
    let family = KeyVersion::detect(key);
    let canonical = normalize(key)?;
    let xpub = ExtendedPublicKey::from_base58(&canonical)?;

    println!();
    println!("      {}       {}", "Family".cyan().bold(), family.map_or_else(|| "unknown".to_string(), |v| v.to_string()));
    println!("      {}      {}", "Network".cyan().bold(), xpub.network());
    println!("      {}        {}", "Depth".cyan().bold(), xpub.depth());
    println!("      {}  {}", "Fingerprint".cyan().bold(), hex::encode(xpub.fingerprint()));
    println!("      {}       {}", "Parent".cyan().bold(), hex::encode(xpub.parent_fingerprint()));
    println!("      {}        {}", "Child".cyan().bold(), format_child_number(xpub.child_number()));
    println!("      {}   {}", "Public Key".cyan().bold(), hex::encode(xpub.public_key_bytes()).dimmed());
    println!("      {}    {}", "Canonical".cyan().bold(), canonical.green());
    println!();
    Ok(())
}

fn format_child_number(child: u32) -> String {
    if child >= HARDENED_OFFSET {
        format!("{}'", child - HARDENED_OFFSET)
    } else {
        child.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_child_number() {
        assert_eq!(format_child_number(0), "0");
        assert_eq!(format_child_number(7), "7");
        assert_eq!(format_child_number(HARDENED_OFFSET), "0'");
        assert_eq!(format_child_number(HARDENED_OFFSET + 84), "84'");
    }
}
