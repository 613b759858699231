//! Common test helpers.

#![allow(dead_code)]

use ec_keypair::crypto::ec::{Curve, EcdsaPrivateKey};
use secrecy::SecretSlice;

/// The parameters of `tests/keys/p256.pem`.
pub const P256_D: &str = "b2c51f086491372c708672f1b47304d8c5df5c853cc669430090a2aa2594c97e";
pub const P256_X: &str = "c3f528ede9d077f5b5b6fcb751e0139028ab777379cb8d2d74f0736f48af05b5";
pub const P256_Y: &str = "7119c3f56a0e8076392f30993b98bcd3afcce7c53ef911c6b6ed5038fad7799f";

/// The public point of `tests/keys/other.p256.pem`.
pub const OTHER_P256_X: &str = "6b1e5a065797c4f7e44cd0ab0cb1cf4cb570b3b8f8888ed7546b1c858d6946c1";
pub const OTHER_P256_Y: &str = "91747d1159ff3d14aa0d6eddb275c1d9179dd76b8ba7e3e2a978c1e42d4a1715";

/// Reads a PEM file from the `tests/keys` directory.
pub fn read_key(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/keys/{name}.pem",
        env!("CARGO_MANIFEST_DIR"),
    ))
    .unwrap()
}

/// Joins the base64 body of a PEM document into a single line.
pub fn unwrap_body(pem: &str) -> String {
    let mut lines = pem.trim().lines();
    let begin = lines.next().unwrap();
    let end = lines.next_back().unwrap();
    let body: String = lines.collect();

    format!("{begin}\n{body}\n{end}\n")
}

pub fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap()
}

/// Builds the raw parameters of a P-256 key from hex strings.
pub fn p256_params(d: &str, x: &str, y: &str) -> EcdsaPrivateKey {
    EcdsaPrivateKey::new(
        Curve::P256,
        SecretSlice::from(unhex(d)),
        unhex(x),
        unhex(y),
    )
}
