//! Associated token accounts.
//!
//! The associated token account of an owner for a mint lives at the
//! program-derived address of seeds `[owner, token_program, mint]` under
//! [`ASSOCIATED_TOKEN_PROGRAM_ID`], so anyone can compute where a wallet's
//! tokens should be.

use crate::account_meta::AccountMeta;
use crate::error::SolanaError;
use crate::instruction::Instruction;
use crate::key::PublicKey;
use crate::pda;
use crate::programs::{system, sysvar, token};

/// `ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL`
pub const ASSOCIATED_TOKEN_PROGRAM_ID: PublicKey = PublicKey::new([
    0x8c, 0x97, 0x25, 0x8f, 0x4e, 0x24, 0x89, 0xf1, 0xbb, 0x3d, 0x10, 0x29, 0x14, 0x8e, 0x0d, 0x83,
    0x0b, 0x5a, 0x13, 0x99, 0xda, 0xff, 0x10, 0x84, 0x04, 0x8e, 0x7b, 0xd8, 0xdb, 0xe9, 0xf8, 0x59,
]);

/// Derive the associated token account address for `owner` and `mint`.
pub fn derive_associated_token_address(
    owner: &PublicKey,
    mint: &PublicKey,
) -> Result<PublicKey, SolanaError> {
    pda::find_program_address(
        &ASSOCIATED_TOKEN_PROGRAM_ID,
        &[
            owner.as_bytes(),
            token::TOKEN_PROGRAM_ID.as_bytes(),
            mint.as_bytes(),
        ],
    )
    .map(|(address, _bump)| address)
}

/// Create the associated token account of `owner` for `mint`, funded by
/// `subsidizer`. Returns the instruction and the new account's address.
pub fn create_associated_account(
    subsidizer: &PublicKey,
    owner: &PublicKey,
    mint: &PublicKey,
) -> Result<(Instruction, PublicKey), SolanaError> {
    let address = derive_associated_token_address(owner, mint)?;

    let instruction = Instruction::new(
        ASSOCIATED_TOKEN_PROGRAM_ID,
        vec![
            AccountMeta::writable(*subsidizer, true),
            AccountMeta::writable(address, false),
            AccountMeta::readonly(*owner, false),
            AccountMeta::readonly(*mint, false),
            AccountMeta::readonly(system::SYSTEM_PROGRAM_ID, false),
            AccountMeta::readonly(token::TOKEN_PROGRAM_ID, false),
            AccountMeta::readonly(sysvar::RENT, false),
        ],
        Vec::new(),
    );

    Ok((instruction, address))
}
