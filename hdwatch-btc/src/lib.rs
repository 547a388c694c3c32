//! Bitcoin receive addresses for hdwatch.
//!
//! Accepts an account-level `xpub`, `ypub` or `zpub` (or their testnet
//! counterparts), normalizes it and derives receive addresses at `0/{index}`.
//!
//! Two address renderings are available through [`BtcAddressFormat`]:
//!
//! - `Digest` (default): `bc1q` followed by the lower-hex first 20 bytes of
//!   Keccak-256 over the compressed child key. This is **not** a valid
//!   Bitcoin address and cannot receive funds; it exists for compatibility
//!   with addresses already handed out in that form.
//! - `P2wpkh`: a real BIP-173 native SegWit address (`m/84'/0'/0'/0/{index}`).
//!
//! # Usage
//!
//! ```
//! use hdwatch_btc::{BtcAddressFormat, derive_btc_address_with};
//!
//! let zpub = "zpub6rFR7y4Q2AijBEqTUquhVz398htDFrtymD9xYYfG1m4wAcvPhXNfE3EfH1r1ADqtfSdVCToUG868RvUUkgDKf31mGDtKsAYz2oz2AGutZYs";
//! let derived = derive_btc_address_with(zpub, 0, BtcAddressFormat::P2wpkh)?;
//! assert_eq!(derived.address, "bc1qcr8te4kr609gcawutmrza0j4xv80jy8z306fyu");
//! # Ok::<(), hdwatch_btc::Error>(())
//! ```

#![warn(missing_docs, rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(clippy::must_use_candidate, clippy::missing_errors_doc, clippy::module_name_repetitions)]
#![forbid(unsafe_code)]

mod address;
mod deriver;
mod error;

pub use address::{BtcAddressFormat, ParseFormatError, digest_address, p2wpkh_address};
pub use deriver::{
    DerivedAddress, Deriver, derive_btc_address, derive_btc_address_with, derive_btc_addresses,
};
pub use error::Error;
pub use hdwatch::Network;

/// A convenient Result type alias for hdwatch-btc operations.
pub type Result<T> = core::result::Result<T, Error>;
