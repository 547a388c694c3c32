//! Optional TOML configuration holding the master keys.
//!
//! ```toml
//! btc_master_xpub = "zpub6r..."
//! eth_master_xpub = "xpub6B..."
//! btc_address_format = "p2wpkh"
//! ```
//!
//! Command-line flags and environment variables take precedence.

use std::fmt;
use std::path::{Path, PathBuf};

use hdwatch_btc::{BtcAddressFormat, ParseFormatError};
use serde::Deserialize;
use tracing::info;

/// Master key configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Account-level Bitcoin key (`xpub`, `ypub` or `zpub`).
    pub btc_master_xpub: Option<String>,
    /// Account-level Ethereum key (`xpub`), used for ERC-20 deposits.
    pub eth_master_xpub: Option<String>,
    /// Bitcoin address rendering, `digest` or `p2wpkh`.
    pub btc_address_format: Option<String>,
}

/// Errors loading the configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// File could not be read.
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// File is not valid TOML for [`Config`].
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
    /// `btc_address_format` is not a known format.
    Format(ParseFormatError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Parse { path, source } => write!(f, "invalid config {}: {source}", path.display()),
            Self::Format(e) => write!(f, "btc_address_format: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Format(e) => Some(e),
        }
    }
}

impl Config {
    /// Load from `path`, or return an empty configuration when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.btc_format()?;

        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Configured Bitcoin address format, defaulting to the library default.
    pub fn btc_format(&self) -> Result<BtcAddressFormat, ConfigError> {
        self.btc_address_format
            .as_deref()
            .map_or(Ok(BtcAddressFormat::default()), |s| s.parse().map_err(ConfigError::Format))
    }
}

/// Pick the key from a flag/env value, falling back to the config file.
///
/// Blank values count as missing.
pub fn resolve_key<'a>(
    flag: Option<&'a str>,
    configured: Option<&'a str>,
    chain: &str,
) -> Result<&'a str, String> {
    let present = |k: Option<&'a str>| k.map(str::trim).filter(|k| !k.is_empty());
    present(flag)
        .or_else(|| present(configured))
        .ok_or_else(|| format!("no {chain} master key configured"))
}
