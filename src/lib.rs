//! Elliptic curve key pairs that sign (ECDSA) and agree (ECDH) with one
//! secret scalar, plus their PEM encodings.
//!
//! A [`KeyPair`] is built from a single ECDSA private key. The key agreement
//! half is derived from the same scalar, so the two views can never drift
//! apart. Key pairs convert to and from SEC 1 `EC PRIVATE KEY` PEM documents,
//! and their public half to and from X.509 `PUBLIC KEY` (SubjectPublicKeyInfo)
//! PEM documents.
//!
//! ```
//! # fn main() -> ec_keypair::Result<()> {
//! use ec_keypair::{crypto::ec::Curve, KeyPair, PublicKey};
//!
//! let alice = KeyPair::generate(Curve::P256)?;
//! let bob = KeyPair::generate(Curve::P256)?;
//!
//! let pem = alice.to_pem()?;
//! let restored = KeyPair::from_pem(&pem)?;
//! assert_eq!(alice, restored);
//!
//! let bob_public = PublicKey::from_pem(&bob.public_key_to_pem()?)?;
//! let shared = restored.agreement_key().diffie_hellman(&bob_public)?;
//! # let _ = shared;
//! # Ok(())
//! # }
//! ```
//!
//! # Crypto backends
//!
//! All curve arithmetic is delegated to exactly one backend, selected with a
//! feature flag: `crypto-rustcrypto` (default) or `crypto-openssl`.
#![warn(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    explicit_outlives_requirements,
    clippy::missing_const_for_fn,
    clippy::missing_errors_doc
)]
#![deny(
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    macro_use_extern_crate,
    non_ascii_idents,
    elided_lifetimes_in_paths
)]
#![forbid(unsafe_code)]
#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod crypto;
mod error;
mod key_pair;
pub mod pem;

pub use error::{EncodingError, Error, FormatError, KeyDerivationError, Result};
pub use key_pair::KeyPair;

pub use crate::crypto::ec::PublicKey;
