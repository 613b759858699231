use alloc::vec::Vec;

use der::Encode as _;
use elliptic_curve::{
    ecdh,
    sec1::{
        EncodedPoint, FromEncodedPoint, ModulusSize, ToEncodedPoint, ValidatePublicKey as _,
    },
    AffinePoint, CurveArithmetic, FieldBytes, FieldBytesSize, SecretKey,
};
use generic_array::typenum::Unsigned as _;
use k256::Secp256k1;
use p256::NistP256;
use p384::NistP384;
use p521::NistP521;
use rand_core::OsRng;
use secrecy::{ExposeSecret as _, SecretSlice};
use signature::{RandomizedSigner as _, Signer as _, Verifier as _};
use spki::{DecodePublicKey as _, EncodePublicKey as _};
use zeroize::Zeroizing;

use super::BackendError;
use crate::crypto::{backend::interface::ec, ec::Curve, Result};

#[derive(Clone)]
enum ErasedPrivateKey {
    P256(SecretKey<NistP256>),
    P384(SecretKey<NistP384>),
    P521(SecretKey<NistP521>),
    Secp256k1(SecretKey<Secp256k1>),
}

#[derive(Clone)]
enum ErasedPublicKey {
    P256(elliptic_curve::PublicKey<NistP256>),
    P384(elliptic_curve::PublicKey<NistP384>),
    P521(elliptic_curve::PublicKey<NistP521>),
    Secp256k1(elliptic_curve::PublicKey<Secp256k1>),
}

#[derive(Clone)]
pub(crate) enum ErasedSignature {
    P256(ecdsa::SignatureBytes<NistP256>),
    P384(ecdsa::SignatureBytes<NistP384>),
    P521(ecdsa::SignatureBytes<NistP521>),
    Secp256k1(ecdsa::SignatureBytes<Secp256k1>),
}

impl From<ErasedSignature> for Vec<u8> {
    fn from(value: ErasedSignature) -> Self {
        match value {
            ErasedSignature::P256(sig) => sig.to_vec(),
            ErasedSignature::P384(sig) => sig.to_vec(),
            ErasedSignature::P521(sig) => sig.to_vec(),
            ErasedSignature::Secp256k1(sig) => sig.to_vec(),
        }
    }
}

impl AsRef<[u8]> for ErasedSignature {
    fn as_ref(&self) -> &[u8] {
        match self {
            ErasedSignature::P256(sig) => sig.as_ref(),
            ErasedSignature::P384(sig) => sig.as_ref(),
            ErasedSignature::P521(sig) => sig.as_ref(),
            ErasedSignature::Secp256k1(sig) => sig.as_ref(),
        }
    }
}

fn to_field_bytes<C: elliptic_curve::Curve>(bytes: &[u8]) -> Result<FieldBytes<C>, BackendError> {
    if bytes.len() != C::FieldBytesSize::USIZE {
        return Err(BackendError::InvalidEcPoint {
            expected: C::FieldBytesSize::USIZE,
            actual: bytes.len(),
        });
    }

    Ok(FieldBytes::<C>::clone_from_slice(bytes))
}

fn secret_from_components<C>(x: &[u8], y: &[u8], d: &[u8]) -> Result<SecretKey<C>, BackendError>
where
    C: CurveArithmetic,
    FieldBytesSize<C>: ModulusSize,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
{
    let x = to_field_bytes::<C>(x)?;
    let y = to_field_bytes::<C>(y)?;
    let d = Zeroizing::new(to_field_bytes::<C>(d)?);

    let point = EncodedPoint::<C>::from_affine_coordinates(&x, &y, false);
    let secret = SecretKey::<C>::from_bytes(&d)?;

    C::validate_public_key(&secret, &point)?;

    Ok(secret)
}

fn public_from_coordinates<C>(
    x: &[u8],
    y: &[u8],
) -> Result<elliptic_curve::PublicKey<C>, BackendError>
where
    C: CurveArithmetic,
    FieldBytesSize<C>: ModulusSize,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
{
    let x = to_field_bytes::<C>(x)?;
    let y = to_field_bytes::<C>(y)?;

    let point = EncodedPoint::<C>::from_affine_coordinates(&x, &y, false);
    let key: Option<_> = elliptic_curve::PublicKey::<C>::from_encoded_point(&point).into();
    key.ok_or(BackendError::InvalidEcKey)
}

fn point_coordinates<C>(key: &elliptic_curve::PublicKey<C>) -> (Vec<u8>, Vec<u8>)
where
    C: CurveArithmetic,
    FieldBytesSize<C>: ModulusSize,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
{
    let identity_point = || alloc::vec![0u8];
    let point = key.to_encoded_point(false);

    (
        point.x().map(|x| x.to_vec()).unwrap_or_else(identity_point),
        point.y().map(|y| y.to_vec()).unwrap_or_else(identity_point),
    )
}

/// `SecretKey::to_sec1_der` leaves out the curve parameters, but other
/// implementations need them to parse the key.
fn secret_to_sec1_der<C>(key: &SecretKey<C>, curve: Curve) -> Result<Zeroizing<Vec<u8>>, BackendError>
where
    C: CurveArithmetic,
    FieldBytesSize<C>: ModulusSize,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
{
    let d = Zeroizing::new(key.to_bytes());
    let public = key.public_key().to_encoded_point(false);

    let der = sec1::EcPrivateKey {
        private_key: &d[..],
        parameters: Some(sec1::EcParameters::NamedCurve(curve.oid())),
        public_key: Some(public.as_bytes()),
    }
    .to_der()?;

    Ok(Zeroizing::new(der))
}

fn secret_material<C: elliptic_curve::Curve>(key: &SecretKey<C>) -> SecretSlice<u8> {
    let d = Zeroizing::new(key.to_bytes());
    SecretSlice::from(d.to_vec())
}

/// A low level private EC key.
#[derive(Clone)]
pub(crate) struct PrivateKey {
    inner: ErasedPrivateKey,
}

impl PrivateKey {
    const fn curve(&self) -> Curve {
        match self.inner {
            ErasedPrivateKey::P256(_) => Curve::P256,
            ErasedPrivateKey::P384(_) => Curve::P384,
            ErasedPrivateKey::P521(_) => Curve::P521,
            ErasedPrivateKey::Secp256k1(_) => Curve::Secp256k1,
        }
    }
}

impl ec::PrivateKey for PrivateKey {
    type AgreementKey = AgreementKey;
    type PublicKey = PublicKey;
    type Signature = ErasedSignature;

    fn new(curve: Curve, x: Vec<u8>, y: Vec<u8>, d: SecretSlice<u8>) -> Result<Self> {
        let d = d.expose_secret();

        let inner = match curve {
            Curve::P256 => ErasedPrivateKey::P256(secret_from_components(&x, &y, d)?),
            Curve::P384 => ErasedPrivateKey::P384(secret_from_components(&x, &y, d)?),
            Curve::P521 => ErasedPrivateKey::P521(secret_from_components(&x, &y, d)?),
            Curve::Secp256k1 => ErasedPrivateKey::Secp256k1(secret_from_components(&x, &y, d)?),
        };

        Ok(Self { inner })
    }

    fn generate(curve: Curve) -> Result<Self> {
        let mut rng = OsRng;

        let inner = match curve {
            Curve::P256 => ErasedPrivateKey::P256(SecretKey::random(&mut rng)),
            Curve::P384 => ErasedPrivateKey::P384(SecretKey::random(&mut rng)),
            Curve::P521 => ErasedPrivateKey::P521(SecretKey::random(&mut rng)),
            Curve::Secp256k1 => ErasedPrivateKey::Secp256k1(SecretKey::random(&mut rng)),
        };

        Ok(Self { inner })
    }

    fn from_sec1_der(curve: Curve, der: &[u8]) -> Result<Self> {
        let inner = match curve {
            Curve::P256 => ErasedPrivateKey::P256(SecretKey::from_sec1_der(der)?),
            Curve::P384 => ErasedPrivateKey::P384(SecretKey::from_sec1_der(der)?),
            Curve::P521 => ErasedPrivateKey::P521(SecretKey::from_sec1_der(der)?),
            Curve::Secp256k1 => ErasedPrivateKey::Secp256k1(SecretKey::from_sec1_der(der)?),
        };

        Ok(Self { inner })
    }

    fn to_sec1_der(&self) -> Result<Zeroizing<Vec<u8>>> {
        let curve = self.curve();

        Ok(match self.inner {
            ErasedPrivateKey::P256(ref key) => secret_to_sec1_der(key, curve)?,
            ErasedPrivateKey::P384(ref key) => secret_to_sec1_der(key, curve)?,
            ErasedPrivateKey::P521(ref key) => secret_to_sec1_der(key, curve)?,
            ErasedPrivateKey::Secp256k1(ref key) => secret_to_sec1_der(key, curve)?,
        })
    }

    fn private_material(&self) -> SecretSlice<u8> {
        match self.inner {
            ErasedPrivateKey::P256(ref key) => secret_material(key),
            ErasedPrivateKey::P384(ref key) => secret_material(key),
            ErasedPrivateKey::P521(ref key) => secret_material(key),
            ErasedPrivateKey::Secp256k1(ref key) => secret_material(key),
        }
    }

    fn public_point(&self) -> (Vec<u8>, Vec<u8>) {
        match self.inner {
            ErasedPrivateKey::P256(ref key) => point_coordinates(&key.public_key()),
            ErasedPrivateKey::P384(ref key) => point_coordinates(&key.public_key()),
            ErasedPrivateKey::P521(ref key) => point_coordinates(&key.public_key()),
            ErasedPrivateKey::Secp256k1(ref key) => point_coordinates(&key.public_key()),
        }
    }

    fn to_public_key(&self) -> Self::PublicKey {
        let inner = match self.inner {
            ErasedPrivateKey::P256(ref key) => ErasedPublicKey::P256(key.public_key()),
            ErasedPrivateKey::P384(ref key) => ErasedPublicKey::P384(key.public_key()),
            ErasedPrivateKey::P521(ref key) => ErasedPublicKey::P521(key.public_key()),
            ErasedPrivateKey::Secp256k1(ref key) => ErasedPublicKey::Secp256k1(key.public_key()),
        };

        PublicKey { inner }
    }

    fn to_agreement_key(&self) -> Result<Self::AgreementKey> {
        // the ECDH secret is the same non-zero scalar, so this can not fail
        let inner = match self.inner {
            ErasedPrivateKey::P256(ref key) => {
                ErasedPrivateKey::P256(SecretKey::from(key.to_nonzero_scalar()))
            }
            ErasedPrivateKey::P384(ref key) => {
                ErasedPrivateKey::P384(SecretKey::from(key.to_nonzero_scalar()))
            }
            ErasedPrivateKey::P521(ref key) => {
                ErasedPrivateKey::P521(SecretKey::from(key.to_nonzero_scalar()))
            }
            ErasedPrivateKey::Secp256k1(ref key) => {
                ErasedPrivateKey::Secp256k1(SecretKey::from(key.to_nonzero_scalar()))
            }
        };

        Ok(AgreementKey { inner })
    }

    fn sign(&self, data: &[u8], deterministic: bool) -> Result<Self::Signature> {
        let sig = match self.inner {
            ErasedPrivateKey::P256(ref key) => {
                let key = ecdsa::SigningKey::<NistP256>::from(key);

                let sig: ecdsa::Signature<NistP256> = if deterministic {
                    key.try_sign(data).map_err(BackendError::Ecdsa)?
                } else {
                    key.try_sign_with_rng(&mut OsRng, data)
                        .map_err(BackendError::Ecdsa)?
                };

                ErasedSignature::P256(sig.to_bytes())
            }
            ErasedPrivateKey::P384(ref key) => {
                let key = ecdsa::SigningKey::<NistP384>::from(key);

                let sig: ecdsa::Signature<NistP384> = if deterministic {
                    key.try_sign(data).map_err(BackendError::Ecdsa)?
                } else {
                    key.try_sign_with_rng(&mut OsRng, data)
                        .map_err(BackendError::Ecdsa)?
                };

                ErasedSignature::P384(sig.to_bytes())
            }
            ErasedPrivateKey::P521(ref key) => {
                // p521 wraps the generic ecdsa keys to pin SHA-512
                let d = Zeroizing::new(key.to_bytes());
                let key = p521::ecdsa::SigningKey::from_bytes(&d).map_err(BackendError::Ecdsa)?;

                let sig: p521::ecdsa::Signature = if deterministic {
                    key.try_sign(data).map_err(BackendError::Ecdsa)?
                } else {
                    key.try_sign_with_rng(&mut OsRng, data)
                        .map_err(BackendError::Ecdsa)?
                };

                ErasedSignature::P521(sig.to_bytes())
            }
            ErasedPrivateKey::Secp256k1(ref key) => {
                let key = ecdsa::SigningKey::<Secp256k1>::from(key);

                let sig: ecdsa::Signature<Secp256k1> = if deterministic {
                    key.try_sign(data).map_err(BackendError::Ecdsa)?
                } else {
                    key.try_sign_with_rng(&mut OsRng, data)
                        .map_err(BackendError::Ecdsa)?
                };

                ErasedSignature::Secp256k1(sig.to_bytes())
            }
        };

        Ok(sig)
    }
}

/// A low level private EC key, as used for ECDH.
#[derive(Clone)]
pub(crate) struct AgreementKey {
    inner: ErasedPrivateKey,
}

impl ec::AgreementKey for AgreementKey {
    type PublicKey = PublicKey;

    fn private_material(&self) -> SecretSlice<u8> {
        match self.inner {
            ErasedPrivateKey::P256(ref key) => secret_material(key),
            ErasedPrivateKey::P384(ref key) => secret_material(key),
            ErasedPrivateKey::P521(ref key) => secret_material(key),
            ErasedPrivateKey::Secp256k1(ref key) => secret_material(key),
        }
    }

    fn to_public_key(&self) -> Self::PublicKey {
        let inner = match self.inner {
            ErasedPrivateKey::P256(ref key) => ErasedPublicKey::P256(key.public_key()),
            ErasedPrivateKey::P384(ref key) => ErasedPublicKey::P384(key.public_key()),
            ErasedPrivateKey::P521(ref key) => ErasedPublicKey::P521(key.public_key()),
            ErasedPrivateKey::Secp256k1(ref key) => ErasedPublicKey::Secp256k1(key.public_key()),
        };

        PublicKey { inner }
    }

    fn diffie_hellman(&self, peer: &Self::PublicKey) -> Result<SecretSlice<u8>> {
        let shared = match (&self.inner, &peer.inner) {
            (ErasedPrivateKey::P256(key), ErasedPublicKey::P256(peer)) => {
                ecdh::diffie_hellman(key.to_nonzero_scalar(), peer.as_affine())
                    .raw_secret_bytes()
                    .to_vec()
            }
            (ErasedPrivateKey::P384(key), ErasedPublicKey::P384(peer)) => {
                ecdh::diffie_hellman(key.to_nonzero_scalar(), peer.as_affine())
                    .raw_secret_bytes()
                    .to_vec()
            }
            (ErasedPrivateKey::P521(key), ErasedPublicKey::P521(peer)) => {
                ecdh::diffie_hellman(key.to_nonzero_scalar(), peer.as_affine())
                    .raw_secret_bytes()
                    .to_vec()
            }
            (ErasedPrivateKey::Secp256k1(key), ErasedPublicKey::Secp256k1(peer)) => {
                ecdh::diffie_hellman(key.to_nonzero_scalar(), peer.as_affine())
                    .raw_secret_bytes()
                    .to_vec()
            }
            _ => return Err(BackendError::CurveMismatch.into()),
        };

        Ok(SecretSlice::from(shared))
    }
}

/// A low level public EC key.
#[derive(Clone)]
#[repr(transparent)]
pub(crate) struct PublicKey {
    inner: ErasedPublicKey,
}

impl ec::PublicKey for PublicKey {
    fn new(curve: Curve, x: Vec<u8>, y: Vec<u8>) -> Result<Self> {
        let inner = match curve {
            Curve::P256 => ErasedPublicKey::P256(public_from_coordinates(&x, &y)?),
            Curve::P384 => ErasedPublicKey::P384(public_from_coordinates(&x, &y)?),
            Curve::P521 => ErasedPublicKey::P521(public_from_coordinates(&x, &y)?),
            Curve::Secp256k1 => ErasedPublicKey::Secp256k1(public_from_coordinates(&x, &y)?),
        };

        Ok(Self { inner })
    }

    fn from_spki_der(curve: Curve, der: &[u8]) -> Result<Self> {
        let inner = match curve {
            Curve::P256 => ErasedPublicKey::P256(elliptic_curve::PublicKey::from_public_key_der(der)?),
            Curve::P384 => ErasedPublicKey::P384(elliptic_curve::PublicKey::from_public_key_der(der)?),
            Curve::P521 => ErasedPublicKey::P521(elliptic_curve::PublicKey::from_public_key_der(der)?),
            Curve::Secp256k1 => {
                ErasedPublicKey::Secp256k1(elliptic_curve::PublicKey::from_public_key_der(der)?)
            }
        };

        Ok(Self { inner })
    }

    fn to_spki_der(&self) -> Result<Vec<u8>> {
        let document = match self.inner {
            ErasedPublicKey::P256(ref key) => key.to_public_key_der()?,
            ErasedPublicKey::P384(ref key) => key.to_public_key_der()?,
            ErasedPublicKey::P521(ref key) => key.to_public_key_der()?,
            ErasedPublicKey::Secp256k1(ref key) => key.to_public_key_der()?,
        };

        Ok(document.as_bytes().to_vec())
    }

    fn to_point(&self) -> (Vec<u8>, Vec<u8>) {
        match self.inner {
            ErasedPublicKey::P256(ref key) => point_coordinates(key),
            ErasedPublicKey::P384(ref key) => point_coordinates(key),
            ErasedPublicKey::P521(ref key) => point_coordinates(key),
            ErasedPublicKey::Secp256k1(ref key) => point_coordinates(key),
        }
    }

    fn verify(&self, msg: &[u8], signature: &[u8]) -> Result<bool> {
        Ok(match self.inner {
            ErasedPublicKey::P256(ref key) => {
                let Ok(sig) = ecdsa::Signature::<NistP256>::try_from(signature) else {
                    return Ok(false);
                };
                let key = ecdsa::VerifyingKey::<NistP256>::from(key);
                key.verify(msg, &sig).is_ok()
            }
            ErasedPublicKey::P384(ref key) => {
                let Ok(sig) = ecdsa::Signature::<NistP384>::try_from(signature) else {
                    return Ok(false);
                };
                let key = ecdsa::VerifyingKey::<NistP384>::from(key);
                key.verify(msg, &sig).is_ok()
            }
            ErasedPublicKey::P521(ref key) => {
                let Ok(sig) = p521::ecdsa::Signature::try_from(signature) else {
                    return Ok(false);
                };
                let point = key.to_encoded_point(false);
                let key = p521::ecdsa::VerifyingKey::from_sec1_bytes(point.as_bytes())
                    .map_err(BackendError::Ecdsa)?;
                key.verify(msg, &sig).is_ok()
            }
            ErasedPublicKey::Secp256k1(ref key) => {
                let Ok(sig) = ecdsa::Signature::<Secp256k1>::try_from(signature) else {
                    return Ok(false);
                };
                let key = ecdsa::VerifyingKey::<Secp256k1>::from(key);
                key.verify(msg, &sig).is_ok()
            }
        })
    }
}
