use alloc::string::String;

use der::asn1::ObjectIdentifier;
use thiserror::Error;

use crate::crypto::{self, ec::Curve};

/// The result type used throughout this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Every error a key operation can produce.
///
/// None of them are recoverable by retrying the same operation with the same
/// input.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The input is not a single valid PEM document, or the document has the
    /// wrong label.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The PEM framing is fine, but the DER content inside is malformed or
    /// has an unexpected structure. Also returned if encoding a key fails.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// The key is a valid signing key structure, but can not be used to
    /// derive a key agreement key.
    #[error(transparent)]
    KeyDerivation(#[from] KeyDerivationError),

    /// The decoded public key is not an elliptic curve key. Contains the
    /// algorithm identifier that was found instead.
    #[error("expected an elliptic curve public key, found algorithm {0}")]
    TypeMismatch(ObjectIdentifier),

    /// Two keys that must share a curve do not.
    #[error("expected a key on curve {expected}, found curve {found}")]
    CurveMismatch {
        /// The curve of the local key.
        expected: Curve,
        /// The curve of the peer key.
        found: Curve,
    },

    /// The signature does not belong to the message and key.
    #[error("invalid signature")]
    InvalidSignature,

    /// A backend operation that is not a codec or derivation failed, e.g.
    /// generating a key or signing.
    #[error(transparent)]
    Crypto(crypto::Error),
}

/// The ways PEM framing can be invalid.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormatError {
    /// A PEM document in the input is malformed: broken boundaries,
    /// mismatched labels or a body that is not base64.
    #[cfg_attr(feature = "std", error("invalid PEM document"))]
    #[cfg_attr(not(feature = "std"), error("invalid PEM document: {0}"))]
    Pem(#[cfg_attr(feature = "std", source)] ::pem::PemError),

    /// The input contains no PEM document.
    #[error("no PEM document found")]
    MissingDocument,

    /// The input contains more than one PEM document.
    #[error("expected a single PEM document, found {0}")]
    MultipleDocuments(usize),

    /// There is text other than whitespace before the PEM document.
    #[error("unexpected data before the PEM document")]
    LeadingData,

    /// There is text other than whitespace after the PEM document.
    #[error("unexpected data after the PEM document")]
    TrailingData,

    /// The PEM document is valid, but has another label than required.
    #[error("unexpected PEM label `{found}`, expected `{expected}`")]
    UnexpectedLabel {
        /// The required label.
        expected: &'static str,
        /// The label of the input.
        found: String,
    },
}

/// The reasons no key agreement key can be derived from a signing key.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KeyDerivationError {
    /// The key names a curve that has no key agreement support here, e.g.
    /// P-224.
    #[error("no key agreement support for elliptic curve {0}")]
    UnsupportedCurve(ObjectIdentifier),

    /// The scalar is invalid, or the public point does not belong to it.
    #[error("failed to derive the key agreement key: {0}")]
    Backend(#[source] crypto::Error),
}

/// The ways the DER content of a PEM document can be invalid.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EncodingError {
    /// The DER structure could not be parsed.
    #[cfg_attr(feature = "std", error("malformed DER structure"))]
    #[cfg_attr(not(feature = "std"), error("malformed DER structure: {0}"))]
    Der(#[cfg_attr(feature = "std", source)] der::Error),

    /// A PEM document could not be produced.
    #[cfg_attr(feature = "std", error("failed to encode PEM document"))]
    #[cfg_attr(not(feature = "std"), error("failed to encode PEM document: {0}"))]
    Pem(#[cfg_attr(feature = "std", source)] pem_rfc7468::Error),

    /// The key does not name its curve.
    #[error("the key does not specify a named curve")]
    MissingCurve,

    /// The key is on a curve this crate does not know.
    #[error("unsupported elliptic curve {0}")]
    UnsupportedCurve(ObjectIdentifier),

    /// The backend rejected the key structure.
    #[error("invalid key encoding: {0}")]
    Backend(#[source] crypto::Error),
}
