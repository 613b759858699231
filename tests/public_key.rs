use der::asn1::ObjectIdentifier;
use ec_keypair::{crypto::ec::Curve, EncodingError, Error, FormatError, KeyPair, PublicKey};

mod common;
use common::*;

#[test]
fn public_key_roundtrip() {
    for name in ["p256", "p384", "p521"] {
        let pair = KeyPair::from_pem(&read_key(name)).unwrap();
        let pem = read_key(&format!("{name}.pub"));

        let key = PublicKey::from_pem(&pem).unwrap();
        assert_eq!(key, pair.public_key(), "{name}");

        // byte for byte what `openssl ec -pubout` produces
        assert_eq!(pair.public_key_to_pem().unwrap().trim(), pem.trim(), "{name}");
        assert_eq!(key.to_pem().unwrap().trim(), pem.trim(), "{name}");
    }
}

#[test]
fn generated_public_key_roundtrip() {
    for curve in Curve::ALL {
        let pair = KeyPair::generate(curve).unwrap();
        let pem = pair.public_key_to_pem().unwrap();

        assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----\n"));

        let key: PublicKey = pem.parse().unwrap();
        assert_eq!(key.curve(), curve);
        assert_eq!(key, pair.public_key());
    }
}

#[test]
fn public_key_from_coordinates() {
    let key = PublicKey::new(Curve::P256, unhex(P256_X), unhex(P256_Y)).unwrap();
    let (x, y) = key.to_point();

    assert_eq!(x, unhex(P256_X));
    assert_eq!(y, unhex(P256_Y));
    assert_eq!(key, PublicKey::from_pem(&read_key("p256.pub")).unwrap());

    assert!(matches!(
        PublicKey::new(Curve::P256, unhex(P256_X), unhex(P256_X)),
        Err(Error::Encoding(EncodingError::Backend(_)))
    ));
}

#[test]
fn reject_non_ec_keys() {
    let rsa = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
    let ed25519 = ObjectIdentifier::new_unwrap("1.3.101.112");

    for (name, expected) in [("rsa.pub", rsa), ("ed25519.pub", ed25519)] {
        match PublicKey::from_pem(&read_key(name)) {
            Err(Error::TypeMismatch(oid)) => assert_eq!(oid, expected, "{name}"),
            other => panic!("unexpected result for {name}: {other:?}"),
        }
    }
}

#[test]
fn reject_malformed_pem() {
    assert!(matches!(
        PublicKey::from_pem(""),
        Err(Error::Format(FormatError::MissingDocument))
    ));
    assert!(matches!(
        PublicKey::from_pem("ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIG"),
        Err(Error::Format(FormatError::MissingDocument))
    ));
    assert!(matches!(
        PublicKey::from_pem("-----BEGIN PUBLIC KEY-----\n!!!!\n-----END PUBLIC KEY-----\n"),
        Err(Error::Format(FormatError::Pem(_)))
    ));

    let pem = read_key("p256.pub");
    assert!(matches!(
        PublicKey::from_pem(&format!("{pem}{pem}")),
        Err(Error::Format(_))
    ));
}

#[test]
fn reject_malformed_der() {
    let pem = "-----BEGIN PUBLIC KEY-----\nAAAA\n-----END PUBLIC KEY-----\n";

    assert!(matches!(
        PublicKey::from_pem(pem),
        Err(Error::Encoding(EncodingError::Der(_)))
    ));
}

#[test]
fn accept_unwrapped_base64_body() {
    let pem = read_key("p384.pub");
    let key = PublicKey::from_pem(&unwrap_body(&pem)).unwrap();

    assert_eq!(key, PublicKey::from_pem(&pem).unwrap());
    assert_eq!(key.to_pem().unwrap().trim(), pem.trim());
}

#[test]
fn label_is_not_enforced() {
    let pem = read_key("p256.pub").replace("PUBLIC KEY", "EC PUBLIC KEY");
    let key = PublicKey::from_pem(&pem).unwrap();

    assert_eq!(key.curve(), Curve::P256);
}

#[test]
fn private_key_is_not_a_public_key() {
    // the SEC 1 structure does not parse as SubjectPublicKeyInfo
    assert!(matches!(
        PublicKey::from_pem(&read_key("p256")),
        Err(Error::Encoding(_))
    ));
}
