//! Common traits that define the API each backend must implement.

use core::{error, fmt};

pub(crate) mod ec;

/// The backend trait that all backends must implement.
///
/// Every key type of a backend is curve-erased, the curve is passed in as a
/// [`Curve`](crate::crypto::ec::Curve) value where needed.
pub(crate) trait Backend {
    /// The error type that is used by this backend.
    type Error: fmt::Debug + fmt::Display + error::Error + 'static;

    /// The EC private key type, used for signing.
    type EcPrivateKey: ec::PrivateKey<
        PublicKey = Self::EcPublicKey,
        AgreementKey = Self::EcAgreementKey,
    >;

    /// The EC private key type, used for key agreement.
    type EcAgreementKey: ec::AgreementKey<PublicKey = Self::EcPublicKey>;

    /// The EC public key type.
    type EcPublicKey: ec::PublicKey;
}
