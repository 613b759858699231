//! This backend implements the primitives using the [OpenSSL](openssl) library.

use alloc::string::String;

use thiserror::Error;

use super::interface;
use crate::crypto::ec::Curve;

pub(crate) mod ec;

#[allow(dead_code)] // may occurr when selecting different OpenSSL variant
#[derive(Debug, Error)]
pub(crate) enum BackendError {
    /// An error from the OpenSSL library.
    #[error(transparent)]
    OpenSsl(#[from] openssl::error::ErrorStack),

    /// A coordinate or scalar does not have the size of a field element.
    #[error("invalid EC point or scalar length (expected {expected} bytes, got {actual})")]
    InvalidLength { expected: usize, actual: usize },

    /// The parsed key is on another curve than the one it was announced with.
    #[error("expected a key on curve {expected}")]
    UnexpectedCurve { expected: Curve },

    /// A specific feature is not supported
    #[error("openssl variant does not support feature: {0}")]
    Unsupported(String),
}

/// The [OpenSSL](openssl) based backend.
#[derive(Debug)]
pub(crate) enum Backend {}

impl interface::Backend for Backend {
    type EcAgreementKey = ec::AgreementKey;
    type EcPrivateKey = ec::PrivateKey;
    type EcPublicKey = ec::PublicKey;
    type Error = BackendError;
}

/// Wrapper around a [`BigNum`](openssl::bn::BigNum) that is cleared on drop.
struct ZeroizingBigNum(openssl::bn::BigNum);

impl ZeroizingBigNum {
    fn from_slice(slice: &[u8]) -> Result<Self, BackendError> {
        let bn = openssl::bn::BigNum::from_slice(slice)?;
        Ok(Self(bn))
    }
}

impl Drop for ZeroizingBigNum {
    fn drop(&mut self) {
        self.0.clear();
    }
}
