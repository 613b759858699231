//! Simple program to generate EC key pairs, extract their public keys and
//! run a key agreement between two of them.

use std::io::Read;

use clap::{Parser, ValueEnum};
use clio::Input;
use ec_keypair::{crypto::ec::Curve, KeyPair, PublicKey};
use secrecy::ExposeSecret;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum CurveArg {
    P256,
    P384,
    P521,
    Secp256k1,
}

impl From<CurveArg> for Curve {
    fn from(value: CurveArg) -> Self {
        match value {
            CurveArg::P256 => Curve::P256,
            CurveArg::P384 => Curve::P384,
            CurveArg::P521 => Curve::P521,
            CurveArg::Secp256k1 => Curve::Secp256k1,
        }
    }
}

#[derive(Parser)]
enum Commands {
    /// Generates a key pair and prints it as an `EC PRIVATE KEY` PEM document
    Generate {
        /// The curve of the new key
        #[arg(short, long, value_enum, default_value = "p256")]
        curve: CurveArg,
    },
    /// Prints the `PUBLIC KEY` PEM document of a private key
    Public {
        /// The `EC PRIVATE KEY` PEM document
        key: Input,
    },
    /// Prints the hex encoded ECDH shared secret of a private and a public key
    Agree {
        /// Our `EC PRIVATE KEY` PEM document
        key: Input,
        /// The peer's `PUBLIC KEY` PEM document
        peer: Input,
    },
}

fn read_input(mut input: Input) -> eyre::Result<String> {
    let mut buf = String::new();
    input.read_to_string(&mut buf)?;
    Ok(buf)
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cmds = Commands::parse();

    match cmds {
        Commands::Generate { curve } => {
            let pair = KeyPair::generate(curve.into())?;
            print!("{}", *pair.to_pem()?);
        }
        Commands::Public { key } => {
            let pair: KeyPair = read_input(key)?.parse()?;
            print!("{}", pair.public_key_to_pem()?);
        }
        Commands::Agree { key, peer } => {
            let pair: KeyPair = read_input(key)?.parse()?;
            let peer: PublicKey = read_input(peer)?.parse()?;

            let shared = pair.agreement_key().diffie_hellman(&peer)?;
            println!("{}", hex::encode(shared.expose_secret()));
        }
    }

    Ok(())
}
