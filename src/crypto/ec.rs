//! The primitives for working with [EC (elliptic curve)](https://en.wikipedia.org/wiki/Elliptic-curve_cryptography)
//! keys.
//!
//! One secret scalar has two views: the [`SigningKey`] used for ECDSA and the
//! [`AgreementKey`] used for ECDH. Both are only handed out by a
//! [`KeyPair`](crate::KeyPair), which guarantees they stay in sync.

use alloc::{string::String, vec::Vec};
use core::{fmt, str::FromStr};

use der::{asn1::ObjectIdentifier, Decode as _};
use secrecy::{ExposeSecret, SecretSlice};
use spki::SubjectPublicKeyInfoRef;

use super::backend::{
    interface::{
        self,
        ec::{AgreementKey as _, PrivateKey as _, PublicKey as _},
    },
    Backend,
};
use crate::{pem, EncodingError, Error};

pub(crate) type BackendPublicKey = <Backend as interface::Backend>::EcPublicKey;
pub(crate) type BackendPrivateKey = <Backend as interface::Backend>::EcPrivateKey;
pub(crate) type BackendAgreementKey = <Backend as interface::Backend>::EcAgreementKey;

/// The `id-ecPublicKey` algorithm identifier used in `SubjectPublicKeyInfo`.
///
/// <http://oid-info.com/get/1.2.840.10045.2.1>
pub const EC_PUBLIC_KEY_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// The curves a key can live on. Both backends support all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Curve {
    /// NIST P-256, also known as `prime256v1` or `secp256r1`.
    P256,
    /// NIST P-384, also known as `secp384r1`.
    P384,
    /// NIST P-521, also known as `secp521r1`.
    P521,
    /// The SECG secp256k1 curve.
    Secp256k1,
}

impl Curve {
    /// All curves, in a stable order.
    pub const ALL: [Curve; 4] = [Curve::P256, Curve::P384, Curve::P521, Curve::Secp256k1];

    /// The name of this curve as used in the JOSE and TLS registries.
    pub const fn name(self) -> &'static str {
        match self {
            Curve::P256 => "P-256",
            Curve::P384 => "P-384",
            Curve::P521 => "P-521",
            Curve::Secp256k1 => "secp256k1",
        }
    }

    /// The named curve object identifier from SEC 2.
    pub const fn oid(self) -> ObjectIdentifier {
        match self {
            Curve::P256 => ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7"),
            Curve::P384 => ObjectIdentifier::new_unwrap("1.3.132.0.34"),
            Curve::P521 => ObjectIdentifier::new_unwrap("1.3.132.0.35"),
            Curve::Secp256k1 => ObjectIdentifier::new_unwrap("1.3.132.0.10"),
        }
    }

    /// Looks up the curve for a named curve object identifier.
    pub fn from_oid(oid: ObjectIdentifier) -> Option<Self> {
        Self::ALL.into_iter().find(|curve| curve.oid() == oid)
    }

    /// The size in bytes of a field element, which is also the size of the
    /// private scalar and of each public coordinate.
    pub const fn field_size(self) -> usize {
        match self {
            Curve::P256 | Curve::Secp256k1 => 32,
            Curve::P384 => 48,
            Curve::P521 => 66,
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Formats bytes as lowercase hex in [`fmt::Debug`] output.
struct Hex<'a>(&'a [u8]);

impl fmt::Debug for Hex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// The raw parameters of an ECDSA private key.
///
/// This type does not validate anything, it is the input to
/// [`KeyPair::new`](crate::KeyPair::new) which does. All values are big
/// endian and must be exactly [`Curve::field_size`] bytes long.
#[derive(Clone)]
pub struct EcdsaPrivateKey {
    curve: Curve,
    d: SecretSlice<u8>,
    x: Vec<u8>,
    y: Vec<u8>,
}

impl EcdsaPrivateKey {
    /// Creates the raw key from its private scalar `d` and the affine
    /// coordinates `x` and `y` of its public point.
    pub const fn new(curve: Curve, d: SecretSlice<u8>, x: Vec<u8>, y: Vec<u8>) -> Self {
        Self { curve, d, x, y }
    }

    /// The curve this key claims to be on.
    pub const fn curve(&self) -> Curve {
        self.curve
    }

    /// The private scalar.
    pub const fn d(&self) -> &SecretSlice<u8> {
        &self.d
    }

    /// The x coordinate of the public point.
    pub fn x(&self) -> &[u8] {
        &self.x
    }

    /// The y coordinate of the public point.
    pub fn y(&self) -> &[u8] {
        &self.y
    }

    pub(crate) fn into_parts(self) -> (Curve, SecretSlice<u8>, Vec<u8>, Vec<u8>) {
        (self.curve, self.d, self.x, self.y)
    }
}

impl fmt::Debug for EcdsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdsaPrivateKey")
            .field("curve", &self.curve)
            .field("x", &Hex(&self.x))
            .field("y", &Hex(&self.y))
            .field("d", &"[REDACTED]")
            .finish()
    }
}

/// The returned signature from a sign operation: the fixed size `r || s`
/// concatenation.
#[derive(Clone)]
#[repr(transparent)]
pub struct Signature {
    inner: <BackendPrivateKey as interface::ec::PrivateKey>::Signature,
}

impl From<Signature> for Vec<u8> {
    fn from(value: Signature) -> Self {
        value.inner.into()
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        self.inner.as_ref()
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Hex(self.as_ref()), f)
    }
}

/// The raw output of an ECDH key agreement.
///
/// This is the x coordinate of the shared point. It is not uniformly random
/// and should be fed into a KDF before it is used as a key.
pub struct SharedSecret(SecretSlice<u8>);

impl ExposeSecret<[u8]> for SharedSecret {
    fn expose_secret(&self) -> &[u8] {
        self.0.expose_secret()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret([REDACTED])")
    }
}

/// An EC public key on any supported curve.
#[derive(Clone)]
pub struct PublicKey {
    inner: BackendPublicKey,
    curve: Curve,
}

impl PublicKey {
    /// Creates a public key from its affine coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if the point is not on the curve or the
    /// coordinates have the wrong size.
    pub fn new(curve: Curve, x: Vec<u8>, y: Vec<u8>) -> Result<Self, Error> {
        let inner = BackendPublicKey::new(curve, x, y).map_err(EncodingError::Backend)?;
        Ok(Self { inner, curve })
    }

    /// Parses a `PUBLIC KEY` PEM document.
    ///
    /// The PEM label itself is not checked, only the `SubjectPublicKeyInfo`
    /// inside it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if the input is not a PEM document,
    /// [`Error::TypeMismatch`] if it holds a non-EC key and
    /// [`Error::Encoding`] for every other malformed content.
    pub fn from_pem(pem: &str) -> Result<Self, Error> {
        let document = pem::Document::decode(pem)?;

        if document.label() != pem::PUBLIC_KEY_LABEL {
            tracing::debug!(
                label = document.label(),
                "parsing public key from a PEM document with an unexpected label"
            );
        }

        Self::from_spki_der(document.der())
    }

    /// Parses a DER encoded `SubjectPublicKeyInfo`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the algorithm is not
    /// `id-ecPublicKey` and [`Error::Encoding`] for every other malformed
    /// content.
    pub fn from_spki_der(der: &[u8]) -> Result<Self, Error> {
        let spki = SubjectPublicKeyInfoRef::from_der(der).map_err(EncodingError::Der)?;

        if spki.algorithm.oid != EC_PUBLIC_KEY_OID {
            tracing::debug!(algorithm = %spki.algorithm.oid, "public key is not an EC key");
            return Err(Error::TypeMismatch(spki.algorithm.oid));
        }

        let parameters = spki
            .algorithm
            .parameters
            .ok_or(EncodingError::MissingCurve)?;
        let oid = ObjectIdentifier::try_from(parameters).map_err(EncodingError::Der)?;
        let curve = Curve::from_oid(oid).ok_or_else(|| {
            tracing::debug!(curve = %oid, "public key uses an unknown curve");
            EncodingError::UnsupportedCurve(oid)
        })?;

        let inner = BackendPublicKey::from_spki_der(curve, der).map_err(EncodingError::Backend)?;
        tracing::trace!(%curve, "parsed EC public key");

        Ok(Self { inner, curve })
    }

    /// Encodes this key as a DER `SubjectPublicKeyInfo`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if the backend fails to encode the key.
    pub fn to_spki_der(&self) -> Result<Vec<u8>, Error> {
        Ok(self
            .inner
            .to_spki_der()
            .map_err(EncodingError::Backend)?)
    }

    /// Encodes this key as a `PUBLIC KEY` PEM document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if the key can not be encoded.
    pub fn to_pem(&self) -> Result<String, Error> {
        let der = self.to_spki_der()?;
        Ok(pem::encode(pem::PUBLIC_KEY_LABEL, &der)?)
    }

    /// The curve of this key.
    pub const fn curve(&self) -> Curve {
        self.curve
    }

    /// Returns the affine (x, y) coordinates of this key.
    pub fn to_point(&self) -> (Vec<u8>, Vec<u8>) {
        self.inner.to_point()
    }

    /// Verifies an `r || s` signature over `msg` that was created by
    /// [`SigningKey::sign`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSignature`] if the signature does not match
    /// and [`Error::Crypto`] if the backend failed.
    pub fn verify(&self, msg: &[u8], signature: &[u8]) -> Result<(), Error> {
        match self.inner.verify(msg, signature) {
            Ok(true) => Ok(()),
            Ok(false) => Err(Error::InvalidSignature),
            Err(e) => Err(Error::Crypto(e)),
        }
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_pem(s)
    }
}

impl Eq for PublicKey {}
impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.curve == other.curve && self.to_point() == other.to_point()
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.inner.to_point();

        f.debug_struct("PublicKey")
            .field("curve", &self.curve)
            .field("x", &Hex(&x))
            .field("y", &Hex(&y))
            .finish()
    }
}

/// The ECDSA view of a [`KeyPair`](crate::KeyPair).
#[derive(Clone)]
pub struct SigningKey {
    inner: BackendPrivateKey,
    curve: Curve,
}

impl SigningKey {
    pub(crate) const fn from_backend(inner: BackendPrivateKey, curve: Curve) -> Self {
        Self { inner, curve }
    }

    pub(crate) const fn backend(&self) -> &BackendPrivateKey {
        &self.inner
    }

    /// The curve of this key.
    pub const fn curve(&self) -> Curve {
        self.curve
    }

    /// Returns the public key of this private key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.inner.to_public_key(),
            curve: self.curve,
        }
    }

    /// Returns the private scalar, big endian and padded to the field size.
    pub fn private_material(&self) -> SecretSlice<u8> {
        self.inner.private_material()
    }

    /// Exports the raw parameters of this key, the inverse of
    /// [`KeyPair::new`](crate::KeyPair::new).
    pub fn to_ecdsa_private_key(&self) -> EcdsaPrivateKey {
        let (x, y) = self.inner.public_point();
        EcdsaPrivateKey::new(self.curve, self.inner.private_material(), x, y)
    }

    /// Signs `msg` with the curve's standard hash function.
    ///
    /// The nonce is derived according to RFC 6979 if the
    /// `deterministic-ecdsa` feature is enabled, and random otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Crypto`] if the backend fails to sign.
    pub fn sign(&self, msg: &[u8]) -> Result<Signature, Error> {
        let inner = self
            .inner
            .sign(msg, cfg!(feature = "deterministic-ecdsa"))
            .map_err(Error::Crypto)?;
        Ok(Signature { inner })
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("curve", &self.curve)
            .field("d", &"[REDACTED]")
            .finish()
    }
}

/// The ECDH view of a [`KeyPair`](crate::KeyPair).
#[derive(Clone)]
pub struct AgreementKey {
    inner: BackendAgreementKey,
    curve: Curve,
}

impl AgreementKey {
    /// Derives the agreement key from a signing key. Both share one scalar.
    pub(crate) fn derive(key: &SigningKey) -> super::Result<Self> {
        Ok(Self {
            inner: key.inner.to_agreement_key()?,
            curve: key.curve,
        })
    }

    /// The curve of this key.
    pub const fn curve(&self) -> Curve {
        self.curve
    }

    /// Returns the public key of this private key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.inner.to_public_key(),
            curve: self.curve,
        }
    }

    /// Returns the private scalar, big endian and padded to the field size.
    pub fn private_material(&self) -> SecretSlice<u8> {
        self.inner.private_material()
    }

    /// Computes the raw ECDH shared secret with `peer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CurveMismatch`] if `peer` is on another curve and
    /// [`Error::Crypto`] if the backend fails.
    pub fn diffie_hellman(&self, peer: &PublicKey) -> Result<SharedSecret, Error> {
        if peer.curve != self.curve {
            return Err(Error::CurveMismatch {
                expected: self.curve,
                found: peer.curve,
            });
        }

        let secret = self
            .inner
            .diffie_hellman(&peer.inner)
            .map_err(Error::Crypto)?;
        Ok(SharedSecret(secret))
    }
}

impl fmt::Debug for AgreementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgreementKey")
            .field("curve", &self.curve)
            .field("d", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_oid_lookup() {
        for curve in Curve::ALL {
            assert_eq!(Curve::from_oid(curve.oid()), Some(curve));
        }

        assert_eq!(Curve::from_oid(EC_PUBLIC_KEY_OID), None);
    }

    #[cfg(feature = "crypto-rustcrypto")]
    #[test]
    fn curve_oids_match_rustcrypto() {
        use der::oid::AssociatedOid;

        assert_eq!(Curve::P256.oid(), p256::NistP256::OID);
        assert_eq!(Curve::P384.oid(), p384::NistP384::OID);
        assert_eq!(Curve::Secp256k1.oid(), k256::Secp256k1::OID);
        assert_eq!(EC_PUBLIC_KEY_OID, elliptic_curve::ALGORITHM_OID);
    }

    #[test]
    fn debug_redacts_scalar() {
        use alloc::{format, vec};

        let key = EcdsaPrivateKey::new(
            Curve::P256,
            SecretSlice::from(vec![0x42; 32]),
            vec![0xab; 32],
            vec![0xcd; 32],
        );
        let debug = format!("{key:?}");

        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains(&"ab".repeat(32)));
        assert!(!debug.contains(&"42".repeat(32)));
    }
}
