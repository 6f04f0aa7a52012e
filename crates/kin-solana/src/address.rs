//! Account address text helpers.
//!
//! An address is the Base58 encoding of a raw 32-byte public key; there is
//! no hashing step or checksum.

use crate::error::SolanaError;
use crate::key::PublicKey;

/// Validate an address string.
///
/// Returns `Ok(true)` when the string is Base58 and decodes to exactly
/// 32 bytes, or the decoding error otherwise.
pub fn validate_address(address: &str) -> Result<bool, SolanaError> {
    address_to_key(address).map(|_| true)
}

/// Decode an address string into a [`PublicKey`].
pub fn address_to_key(address: &str) -> Result<PublicKey, SolanaError> {
    PublicKey::from_base58(address).map_err(|e| match e {
        SolanaError::InvalidKeyLength { actual, .. } => {
            SolanaError::InvalidAddress(format!("expected 32 bytes, got {actual}"))
        }
        other => other,
    })
}

/// Encode a [`PublicKey`] as an address string.
pub fn key_to_address(key: &PublicKey) -> String {
    key.to_base58()
}
