//! Fixed-length byte values: public keys, hashes and signatures.
//!
//! All three share one const-generic wrapper, [`FixedBytes`], and are exposed
//! as distinct newtypes so a `Hash` can never be passed where a `PublicKey`
//! is expected. Text form is Base58 (the standard Bitcoin alphabet).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SolanaError;

/// An immutable `N`-byte buffer compared and hashed by content.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedBytes<const N: usize>([u8; N]);

impl<const N: usize> FixedBytes<N> {
    pub const LENGTH: usize = N;

    pub const fn new(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    pub const fn as_array(&self) -> &[u8; N] {
        &self.0
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(&self.0).into_string()
    }

    pub fn from_base58(text: &str) -> Result<Self, SolanaError> {
        let bytes = bs58::decode(text)
            .into_vec()
            .map_err(|e| SolanaError::InvalidAddress(format!("base58 decode failed: {e}")))?;
        Self::try_from(bytes.as_slice())
    }
}

impl<const N: usize> TryFrom<&[u8]> for FixedBytes<N> {
    type Error = SolanaError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let array: [u8; N] = bytes.try_into().map_err(|_| SolanaError::InvalidKeyLength {
            expected: N,
            actual: bytes.len(),
        })?;
        Ok(Self(array))
    }
}

impl<const N: usize> AsRef<[u8]> for FixedBytes<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> fmt::Display for FixedBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl<const N: usize> fmt::Debug for FixedBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl<const N: usize> Serialize for FixedBytes<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de, const N: usize> Deserialize<'de> for FixedBytes<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_base58(&text).map_err(serde::de::Error::custom)
    }
}

macro_rules! fixed_key {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(FixedBytes<$len>);

        impl $name {
            pub const LENGTH: usize = $len;
            pub const ZERO: Self = Self(FixedBytes::new([0u8; $len]));

            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(FixedBytes::new(bytes))
            }

            pub const fn as_array(&self) -> &[u8; $len] {
                self.0.as_array()
            }

            pub fn as_bytes(&self) -> &[u8] {
                self.0.as_ref()
            }

            pub fn to_base58(&self) -> String {
                self.0.to_base58()
            }

            pub fn from_base58(text: &str) -> Result<Self, SolanaError> {
                FixedBytes::from_base58(text).map(Self)
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self::new(bytes)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = SolanaError;

            fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                FixedBytes::try_from(bytes).map(Self)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                self.as_bytes()
            }
        }

        impl FromStr for $name {
            type Err = SolanaError;

            fn from_str(text: &str) -> Result<Self, Self::Err> {
                Self::from_base58(text)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

fixed_key!(
    /// A 32-byte Ed25519 public key; also used for program and account addresses.
    PublicKey,
    32
);

fixed_key!(
    /// A 32-byte hash, such as a recent blockhash.
    Hash,
    32
);

fixed_key!(
    /// A 64-byte detached Ed25519 signature.
    Signature,
    64
);

impl PublicKey {
    /// Whether these bytes decompress to a point on the Ed25519 curve.
    ///
    /// Program-derived addresses are exactly the keys for which this is
    /// `false`, so no private key can exist for them.
    pub fn is_on_curve(&self) -> bool {
        curve25519_dalek::edwards::CompressedEdwardsY(*self.as_array())
            .decompress()
            .is_some()
    }
}
