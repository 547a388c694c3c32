//! # hdwatch - Watch-Only HD Key Core
//!
//! Derives receive keys from an account-level extended public key without
//! ever touching private key material.
//!
//! ## Features
//!
//! - **Base58 codec**: leading-zero preserving, with Base58Check helpers
//! - **Key normalization**: `ypub`/`zpub` (and testnet `upub`/`vpub`) are
//!   rewritten to the canonical `xpub`/`tpub` encoding
//! - **Non-hardened derivation**: BIP-32 `CKDpub` over secp256k1
//!
//! ## Usage
//!
//! ```
//! use hdwatch::{ExtendedPublicKey, normalize};
//!
//! let key = "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8";
//! let xpub = ExtendedPublicKey::from_base58(&normalize(key)?)?;
//! let child = xpub.derive_receive(0)?;
//! assert_eq!(child.public_key_bytes().len(), 33);
//! # Ok::<(), hdwatch::Error>(())
//! ```

#![warn(
    missing_docs,
    rust_2018_idioms,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::doc_markdown,
    clippy::missing_const_for_fn,
    clippy::cast_possible_truncation,
    clippy::unreadable_literal,
    clippy::missing_fields_in_debug
)]
#![forbid(unsafe_code)]

pub mod base58;
pub mod error;
pub mod hash;
pub mod types;
pub mod version;
pub mod xpub;

pub use error::{Error, Result};
pub use types::{Asset, AssetPath, HARDENED_OFFSET, MAX_BATCH_SIZE, ParseAssetError, check_batch};
pub use version::{KeyVersion, Network, normalize, validate_format};
pub use xpub::{ChildPublicKey, ExtendedPublicKey};
