//! Signing keys.
//!
//! Transactions are signed through the [`Signer`] trait so that key custody
//! (hardware, keychain, remote signer) stays outside this crate. [`Keypair`]
//! is the in-memory Ed25519 implementation.

use ed25519_dalek::{Signer as _, SigningKey, VerifyingKey};
use zeroize::Zeroize;

use crate::error::SolanaError;
use crate::key::{PublicKey, Signature};

/// Anything that can produce an Ed25519 signature for a public key.
pub trait Signer {
    fn public_key(&self) -> PublicKey;

    fn sign_message(&self, message: &[u8]) -> Signature;
}

/// An Ed25519 key pair held in memory.
///
/// The secret half lives in a `SigningKey`, which zeroizes on drop.
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Build a key pair from a 32-byte Ed25519 seed.
    ///
    /// The caller's copy of the seed is left untouched; the local copy is
    /// wiped before returning.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let mut local = *seed;
        let signing_key = SigningKey::from_bytes(&local);
        local.zeroize();
        Self { signing_key }
    }

    pub fn from_seed_slice(seed: &[u8]) -> Result<Self, SolanaError> {
        let mut local: [u8; 32] = seed.try_into().map_err(|_| SolanaError::InvalidKeyLength {
            expected: 32,
            actual: seed.len(),
        })?;
        let keypair = Self::from_seed(&local);
        local.zeroize();
        Ok(keypair)
    }

    pub fn generate<R>(rng: &mut R) -> Self
    where
        R: rand_core::CryptoRngCore + ?Sized,
    {
        Self {
            signing_key: SigningKey::generate(rng),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::new(self.signing_key.verifying_key().to_bytes())
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature::new(self.signing_key.sign(message).to_bytes())
    }
}

impl Signer for Keypair {
    fn public_key(&self) -> PublicKey {
        Keypair::public_key(self)
    }

    fn sign_message(&self, message: &[u8]) -> Signature {
        self.sign(message)
    }
}

impl std::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keypair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Verify `signature` over `message` by `public_key` (strict Ed25519).
pub fn verify(
    public_key: &PublicKey,
    message: &[u8],
    signature: &Signature,
) -> Result<(), SolanaError> {
    let verifying_key = VerifyingKey::from_bytes(public_key.as_array())
        .map_err(|e| SolanaError::SignatureVerification(format!("{public_key}: {e}")))?;
    let signature = ed25519_dalek::Signature::from_bytes(signature.as_array());
    verifying_key
        .verify_strict(message, &signature)
        .map_err(|e| SolanaError::SignatureVerification(format!("{public_key}: {e}")))
}
