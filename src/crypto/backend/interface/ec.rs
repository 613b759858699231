//! The interfaces for EC keys.

use alloc::vec::Vec;

use secrecy::SecretSlice;
use zeroize::Zeroizing;

use crate::crypto::{ec::Curve, Result};

/// The common operations for a curve-erased EC public key.
pub(crate) trait PublicKey: Sized + Clone + Send + Sync {
    /// Creates a new public key from the given affine coordinates.
    fn new(curve: Curve, x: Vec<u8>, y: Vec<u8>) -> Result<Self>;

    /// Parses a DER encoded `SubjectPublicKeyInfo` for a key on the given
    /// curve.
    ///
    /// The caller already checked that the algorithm is `id-ecPublicKey` and
    /// that the named curve matches `curve`.
    fn from_spki_der(curve: Curve, der: &[u8]) -> Result<Self>;

    /// Encodes this key as a DER `SubjectPublicKeyInfo`.
    fn to_spki_der(&self) -> Result<Vec<u8>>;

    /// Returns the (x, y) coordinates of the public key.
    fn to_point(&self) -> (Vec<u8>, Vec<u8>);

    /// Verifies if the message is valid for the given `r || s` signature.
    ///
    /// Returns `true` if the signature is valid, `false` otherwise.
    fn verify(&self, msg: &[u8], signature: &[u8]) -> Result<bool>;
}

/// The common operations for a curve-erased EC private key, as used for
/// ECDSA.
pub(crate) trait PrivateKey: Sized + Clone + Send + Sync {
    /// The signature type that is produced by this key.
    type Signature: Into<Vec<u8>> + AsRef<[u8]> + Clone + Send + Sync;

    /// The public key type.
    type PublicKey: PublicKey;

    /// The key agreement view of this key.
    type AgreementKey: AgreementKey<PublicKey = Self::PublicKey>;

    /// Creates a new private key from the given data.
    ///
    /// This must reject scalars that are zero, not smaller than the group
    /// order or not exactly the size of a field element, and public points
    /// that are not `d * G`.
    fn new(curve: Curve, x: Vec<u8>, y: Vec<u8>, d: SecretSlice<u8>) -> Result<Self>;

    /// Generates a new secure random private key.
    fn generate(curve: Curve) -> Result<Self>;

    /// Parses a DER encoded SEC 1 `ECPrivateKey` for a key on the given
    /// curve.
    ///
    /// An embedded public key must match the private scalar.
    fn from_sec1_der(curve: Curve, der: &[u8]) -> Result<Self>;

    /// Encodes this key as a DER SEC 1 `ECPrivateKey`, including the named
    /// curve and the public key.
    fn to_sec1_der(&self) -> Result<Zeroizing<Vec<u8>>>;

    /// Returns the private scalar of this key, big endian and padded to the
    /// field size.
    fn private_material(&self) -> SecretSlice<u8>;

    /// Returns the public part of this key, a (x, y) coordinates.
    fn public_point(&self) -> (Vec<u8>, Vec<u8>);

    /// Returns the public key of this private key.
    fn to_public_key(&self) -> Self::PublicKey;

    /// Derives the key agreement key that shares this key's scalar.
    fn to_agreement_key(&self) -> Result<Self::AgreementKey>;

    /// Signs the given data using this key.
    ///
    /// The `deterministic` flag indicates if the signature should be
    /// deterministic, as according to [RFC 6979](https://www.rfc-editor.org/rfc/rfc6979).
    fn sign(&self, data: &[u8], deterministic: bool) -> Result<Self::Signature>;
}

/// The common operations for a curve-erased EC private key, as used for
/// ECDH.
pub(crate) trait AgreementKey: Sized + Clone + Send + Sync {
    /// The public key type.
    type PublicKey: PublicKey;

    /// Returns the private scalar of this key, big endian and padded to the
    /// field size.
    fn private_material(&self) -> SecretSlice<u8>;

    /// Returns the public key of this private key.
    fn to_public_key(&self) -> Self::PublicKey;

    /// Computes the raw ECDH shared secret (the x coordinate of the shared
    /// point) with the given peer key.
    fn diffie_hellman(&self, peer: &Self::PublicKey) -> Result<SecretSlice<u8>>;
}
