//! This backend implements the primitives using the [RustCrypto] ecosystem.
//!
//! [RustCrypto]: https://github.com/RustCrypto

use thiserror::Error;

use super::interface;

pub(crate) mod ec;

/// The errors that can be produced by the rust crypto backend.
#[derive(Debug, Error)]
pub(crate) enum BackendError {
    /// A coordinate or scalar does not have the size of a field element.
    #[error("invalid EC point or scalar length (expected {expected} bytes, got {actual})")]
    InvalidEcPoint { expected: usize, actual: usize },

    /// The point is not on the curve.
    #[error("the EC public key is not a valid point on the curve")]
    InvalidEcKey,

    /// The two keys of an operation use different curves.
    #[error("the keys are on different curves")]
    CurveMismatch,

    /// Error from the `elliptic-curve` crate. It carries no details.
    #[cfg_attr(feature = "std", error("an elliptic curve operation failed"))]
    #[cfg_attr(not(feature = "std"), error("an elliptic curve operation failed: {0}"))]
    EllipticCurve(#[cfg_attr(feature = "std", source)] elliptic_curve::Error),

    /// Creating an ECDSA signature failed.
    #[cfg_attr(feature = "std", error("an ECDSA operation failed"))]
    #[cfg_attr(not(feature = "std"), error("an ECDSA operation failed: {0}"))]
    Ecdsa(#[cfg_attr(feature = "std", source)] ecdsa::Error),

    /// Encoding or decoding a DER structure failed.
    #[cfg_attr(feature = "std", error("a DER operation failed"))]
    #[cfg_attr(not(feature = "std"), error("a DER operation failed: {0}"))]
    Der(#[cfg_attr(feature = "std", source)] der::Error),

    /// Encoding or decoding a `SubjectPublicKeyInfo` failed.
    #[cfg_attr(feature = "std", error("a SubjectPublicKeyInfo operation failed"))]
    #[cfg_attr(
        not(feature = "std"),
        error("a SubjectPublicKeyInfo operation failed: {0}")
    )]
    Spki(#[cfg_attr(feature = "std", source)] spki::Error),
}

impl From<elliptic_curve::Error> for BackendError {
    fn from(x: elliptic_curve::Error) -> Self {
        Self::EllipticCurve(x)
    }
}

impl From<der::Error> for BackendError {
    fn from(x: der::Error) -> Self {
        Self::Der(x)
    }
}

impl From<spki::Error> for BackendError {
    fn from(x: spki::Error) -> Self {
        Self::Spki(x)
    }
}

/// The [RustCrypto] based backend.
///
/// [RustCrypto]: https://github.com/RustCrypto
#[derive(Debug)]
pub(crate) enum Backend {}

impl interface::Backend for Backend {
    type EcAgreementKey = ec::AgreementKey;
    type EcPrivateKey = ec::PrivateKey;
    type EcPublicKey = ec::PublicKey;
    type Error = BackendError;
}
