//! Per-account roles and the canonical account ordering of a message.

use std::cmp::Ordering;

use crate::key::PublicKey;

/// The role an account plays within one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountMeta {
    pub public_key: PublicKey,
    pub is_signer: bool,
    pub is_writable: bool,
    pub is_payer: bool,
    pub is_program: bool,
}

impl AccountMeta {
    pub fn writable(public_key: PublicKey, is_signer: bool) -> Self {
        Self {
            public_key,
            is_signer,
            is_writable: true,
            is_payer: false,
            is_program: false,
        }
    }

    pub fn readonly(public_key: PublicKey, is_signer: bool) -> Self {
        Self {
            public_key,
            is_signer,
            is_writable: false,
            is_payer: false,
            is_program: false,
        }
    }

    /// The fee payer: always a writable signer.
    pub fn payer(public_key: PublicKey) -> Self {
        Self {
            public_key,
            is_signer: true,
            is_writable: true,
            is_payer: true,
            is_program: false,
        }
    }

    /// A program invoked by an instruction: read-only, never a signer.
    pub fn program(public_key: PublicKey) -> Self {
        Self {
            public_key,
            is_signer: false,
            is_writable: false,
            is_payer: false,
            is_program: true,
        }
    }

    /// Total order used to lay out a message's account list.
    ///
    /// Payer first, signers before non-signers, writable before read-only,
    /// programs after the other read-only non-signers, then ascending Base58
    /// text of the key. A program key that was widened to a signer or
    /// writable role sorts with that role, so the header partition stays
    /// exact.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.role_rank()
            .cmp(&other.role_rank())
            .then_with(|| self.public_key.to_base58().cmp(&other.public_key.to_base58()))
    }

    fn role_rank(&self) -> (bool, bool, bool, bool) {
        (
            !self.is_payer,
            !self.is_signer,
            !self.is_writable,
            self.is_program,
        )
    }
}

/// Deduplicate `accounts` by key, keeping the first occurrence and OR-ing
/// every role flag of each repeat into it.
///
/// Roles are only ever widened: an account that is writable anywhere stays
/// writable in the result, and a key invoked as a program anywhere keeps
/// the program flag whatever order the entries arrive in.
pub fn merge_accounts(accounts: &[AccountMeta]) -> Vec<AccountMeta> {
    let mut unique: Vec<AccountMeta> = Vec::with_capacity(accounts.len());

    for account in accounts {
        match unique
            .iter_mut()
            .find(|existing| existing.public_key == account.public_key)
        {
            Some(existing) => {
                existing.is_signer |= account.is_signer;
                existing.is_writable |= account.is_writable;
                existing.is_payer |= account.is_payer;
                existing.is_program |= account.is_program;
            }
            None => unique.push(*account),
        }
    }

    unique
}

/// Merge `accounts` and sort them into canonical message order.
pub fn canonical_accounts(accounts: &[AccountMeta]) -> Vec<AccountMeta> {
    let mut unique = merge_accounts(accounts);
    // Base58 text is computed once per account rather than per comparison.
    unique.sort_by_cached_key(|meta| (meta.role_rank(), meta.public_key.to_base58()));
    unique
}
