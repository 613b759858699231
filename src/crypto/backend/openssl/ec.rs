use alloc::{vec, vec::Vec};

use openssl::{
    bn::{BigNum, BigNumContext},
    derive::Deriver,
    ec::{EcGroup, EcKey, EcKeyRef},
    ecdsa::EcdsaSig,
    hash::MessageDigest,
    md::{Md, MdRef},
    md_ctx::MdCtx,
    nid::Nid,
    pkey::{HasPublic, PKey, Private, Public},
    sign::Verifier,
};
use secrecy::{ExposeSecret, SecretSlice};
use zeroize::Zeroizing;

use super::{BackendError, ZeroizingBigNum};
use crate::crypto::{backend::interface::ec, ec::Curve, Result};

const fn nid(curve: Curve) -> Nid {
    match curve {
        Curve::P256 => Nid::X9_62_PRIME256V1,
        Curve::P384 => Nid::SECP384R1,
        Curve::P521 => Nid::SECP521R1,
        Curve::Secp256k1 => Nid::SECP256K1,
    }
}

fn ec_group(curve: Curve) -> Result<EcGroup> {
    Ok(EcGroup::from_curve_name(nid(curve))?)
}

fn digest(curve: Curve) -> MessageDigest {
    match curve {
        Curve::P256 | Curve::Secp256k1 => MessageDigest::sha256(),
        Curve::P384 => MessageDigest::sha384(),
        Curve::P521 => MessageDigest::sha512(),
    }
}

fn md(curve: Curve) -> &'static MdRef {
    match curve {
        Curve::P256 | Curve::Secp256k1 => Md::sha256(),
        Curve::P384 => Md::sha384(),
        Curve::P521 => Md::sha512(),
    }
}

/// OpenSSL happily accepts shorter big endian numbers, but the encoded forms
/// of this crate always use the full field size.
fn check_len(curve: Curve, bytes: &[u8]) -> Result<(), BackendError> {
    if bytes.len() != curve.field_size() {
        return Err(BackendError::InvalidLength {
            expected: curve.field_size(),
            actual: bytes.len(),
        });
    }

    Ok(())
}

fn check_curve<T>(curve: Curve, key: &EcKeyRef<T>) -> Result<(), BackendError> {
    if key.group().curve_name() != Some(nid(curve)) {
        return Err(BackendError::UnexpectedCurve { expected: curve });
    }

    Ok(())
}

fn point_coordinates<T: HasPublic>(curve: Curve, key: &EcKeyRef<T>) -> Result<(Vec<u8>, Vec<u8>)> {
    let mut x = BigNum::new()?;
    let mut y = BigNum::new()?;
    let mut ctx = BigNumContext::new()?;
    key.public_key()
        .affine_coordinates(key.group(), &mut x, &mut y, &mut ctx)?;

    let size = curve.field_size() as i32;
    Ok((x.to_vec_padded(size)?, y.to_vec_padded(size)?))
}

/// A low level private EC key.
#[derive(Clone)]
pub(crate) struct PrivateKey {
    curve: Curve,
    key: PKey<Private>,
    public_key: PublicKey,
    d: SecretSlice<u8>,
}

impl PrivateKey {
    fn from_ec_key(curve: Curve, key: EcKey<Private>) -> Result<Self> {
        check_curve(curve, &key)?;
        key.check_key()?;

        let (x, y) = point_coordinates(curve, &key)?;
        let public_key = EcKey::from_public_key(key.group(), key.public_key())?;
        let d = SecretSlice::from(
            key.private_key()
                .to_vec_padded(curve.field_size() as i32)?,
        );

        Ok(Self {
            curve,
            key: PKey::from_ec_key(key)?,
            public_key: PublicKey {
                curve,
                key: PKey::from_ec_key(public_key)?,
                x,
                y,
            },
            d,
        })
    }
}

impl ec::PrivateKey for PrivateKey {
    type AgreementKey = AgreementKey;
    type PublicKey = PublicKey;
    type Signature = Vec<u8>;

    fn new(curve: Curve, x: Vec<u8>, y: Vec<u8>, d: SecretSlice<u8>) -> Result<Self> {
        check_len(curve, &x)?;
        check_len(curve, &y)?;
        check_len(curve, d.expose_secret())?;

        let group = ec_group(curve)?;

        let d = ZeroizingBigNum::from_slice(d.expose_secret())?;
        let x = BigNum::from_slice(&x)?;
        let y = BigNum::from_slice(&y)?;

        let public_key = EcKey::from_public_key_affine_coordinates(&group, &x, &y)?;
        public_key.check_key()?;

        let key = EcKey::from_private_components(&group, &d.0, public_key.public_key())?;
        Self::from_ec_key(curve, key)
    }

    fn generate(curve: Curve) -> Result<Self> {
        let group = ec_group(curve)?;
        let key = EcKey::generate(&group)?;

        Self::from_ec_key(curve, key)
    }

    fn from_sec1_der(curve: Curve, der: &[u8]) -> Result<Self> {
        let key = EcKey::private_key_from_der(der)?;
        Self::from_ec_key(curve, key)
    }

    fn to_sec1_der(&self) -> Result<Zeroizing<Vec<u8>>> {
        let key = self.key.ec_key()?;
        Ok(Zeroizing::new(key.private_key_to_der()?))
    }

    fn private_material(&self) -> SecretSlice<u8> {
        self.d.clone()
    }

    #[inline]
    fn public_point(&self) -> (Vec<u8>, Vec<u8>) {
        self.public_key.to_point_inner()
    }

    fn to_public_key(&self) -> Self::PublicKey {
        self.public_key.clone()
    }

    fn to_agreement_key(&self) -> Result<Self::AgreementKey> {
        let key = PKey::from_ec_key(self.key.ec_key()?)?;

        Ok(AgreementKey {
            key,
            public_key: self.public_key.clone(),
            d: self.d.clone(),
        })
    }

    fn sign(&self, data: &[u8], deterministic: bool) -> Result<Self::Signature> {
        let mut md_ctx = MdCtx::new()?;

        #[allow(unused_variables)]
        let pkey_ctx = md_ctx.digest_sign_init(Some(md(self.curve)), &self.key)?;

        if deterministic {
            #[cfg(openssl320)]
            pkey_ctx.set_nonce_type(openssl::pkey_ctx::NonceType::DETERMINISTIC_K)?;

            #[cfg(not(openssl320))]
            return Err(BackendError::Unsupported(
                alloc::string::String::from("deterministic signing for ECDSA"),
            )
            .into());
        }

        md_ctx.digest_update(data)?;

        let mut der_sig = vec![];
        md_ctx.digest_sign_final_to_vec(&mut der_sig)?;

        // the returned signature is in DER format, but we hand out the fixed
        // size r || s form
        let signature = EcdsaSig::from_der(&der_sig)?;
        let size = self.curve.field_size() as i32;
        let r = signature.r().to_vec_padded(size)?;
        let s = signature.s().to_vec_padded(size)?;

        let mut sig = Vec::with_capacity(r.len() + s.len());
        sig.extend_from_slice(&r);
        sig.extend_from_slice(&s);

        Ok(sig)
    }
}

/// A low level private EC key, as used for ECDH.
#[derive(Clone)]
pub(crate) struct AgreementKey {
    key: PKey<Private>,
    public_key: PublicKey,
    d: SecretSlice<u8>,
}

impl ec::AgreementKey for AgreementKey {
    type PublicKey = PublicKey;

    fn private_material(&self) -> SecretSlice<u8> {
        self.d.clone()
    }

    fn to_public_key(&self) -> Self::PublicKey {
        self.public_key.clone()
    }

    fn diffie_hellman(&self, peer: &Self::PublicKey) -> Result<SecretSlice<u8>> {
        let mut deriver = Deriver::new(&self.key)?;
        deriver.set_peer(&peer.key)?;

        let shared = deriver.derive_to_vec()?;
        Ok(SecretSlice::from(shared))
    }
}

/// A low level public EC key.
#[derive(Clone)]
pub(crate) struct PublicKey {
    curve: Curve,
    key: PKey<Public>,
    x: Vec<u8>,
    y: Vec<u8>,
}

impl PublicKey {
    fn to_point_inner(&self) -> (Vec<u8>, Vec<u8>) {
        (self.x.clone(), self.y.clone())
    }
}

impl ec::PublicKey for PublicKey {
    fn new(curve: Curve, raw_x: Vec<u8>, raw_y: Vec<u8>) -> Result<Self> {
        check_len(curve, &raw_x)?;
        check_len(curve, &raw_y)?;

        let group = ec_group(curve)?;

        let x = BigNum::from_slice(&raw_x)?;
        let y = BigNum::from_slice(&raw_y)?;

        let public_key = EcKey::from_public_key_affine_coordinates(&group, &x, &y)?;
        public_key.check_key()?;

        Ok(Self {
            curve,
            key: PKey::from_ec_key(public_key)?,
            x: raw_x,
            y: raw_y,
        })
    }

    fn from_spki_der(curve: Curve, der: &[u8]) -> Result<Self> {
        let key = PKey::public_key_from_der(der)?;

        let ec_key = key.ec_key()?;
        check_curve(curve, &ec_key)?;
        ec_key.check_key()?;

        let (x, y) = point_coordinates(curve, &ec_key)?;
        Ok(Self { curve, key, x, y })
    }

    fn to_spki_der(&self) -> Result<Vec<u8>> {
        Ok(self.key.public_key_to_der()?)
    }

    fn to_point(&self) -> (Vec<u8>, Vec<u8>) {
        self.to_point_inner()
    }

    fn verify(&self, msg: &[u8], signature: &[u8]) -> Result<bool> {
        if signature.len() != 2 * self.curve.field_size() {
            return Ok(false);
        }

        // the signature is r and s concatenated, but we need it in DER format for
        // OpenSSL
        let (r, s) = signature.split_at(signature.len() / 2);
        let r = BigNum::from_slice(r)?;
        let s = BigNum::from_slice(s)?;

        let signature = EcdsaSig::from_private_components(r, s)?.to_der()?;

        let mut verifier = Verifier::new(digest(self.curve), &self.key)?;
        verifier.update(msg)?;
        let valid = verifier.verify(&signature)?;

        Ok(valid)
    }
}
