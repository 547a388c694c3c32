//! Ethereum receive addresses for hdwatch.
//!
//! Derives EIP-55 account addresses at `m/44'/60'/0'/0/{index}` from the
//! account-level `xpub` of an Ethereum wallet. The same addresses receive
//! ERC-20 tokens such as USDT and USDC.
//!
//! # Usage
//!
//! ```no_run
//! use hdwatch_eth::derive_eth_address;
//!
//! let xpub = "xpub6BosfCnifzxcFwrSzQiqu2DBVTshkCXacvNsWGYJVVhhawA7d4R5WSWGFNbi8Aw6ZRc1brxMyWMzG3DSSSSoekkudhUd9yLb6qx39T9nMdj";
//! let derived = derive_eth_address(xpub, 0)?;
//! println!("{}", derived.address);
//! # Ok::<(), hdwatch_eth::Error>(())
//! ```

#![warn(missing_docs, rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(clippy::must_use_candidate, clippy::missing_errors_doc, clippy::module_name_repetitions)]
#![forbid(unsafe_code)]

mod address;
mod deriver;
mod error;

pub use address::Address;
pub use deriver::{DerivedAddress, Deriver, KEY_PREFIX, derive_eth_address, derive_eth_addresses};
pub use error::Error;

/// A convenient Result type alias for hdwatch-eth operations.
pub type Result<T> = core::result::Result<T, Error>;
