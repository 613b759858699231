//! The actual implementations for the cryptographic backends.

pub(crate) mod interface;

cfg_if::cfg_if! {
    if #[cfg(feature = "crypto-rustcrypto")] {
        mod rust;
        pub(crate) use rust::*;
    } else if #[cfg(feature = "crypto-openssl")] {
        mod openssl;
        pub(crate) use self::openssl::*;
    } else {
        compile_error!("no cryptographic backend selected, enable `crypto-rustcrypto` or `crypto-openssl`");
    }
}
