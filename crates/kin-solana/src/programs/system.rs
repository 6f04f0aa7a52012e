//! The system program: account creation and native transfers.
//!
//! System instruction data starts with a little-endian `u32` command tag.

use crate::account_meta::AccountMeta;
use crate::instruction::Instruction;
use crate::key::PublicKey;

/// `11111111111111111111111111111111`
pub const SYSTEM_PROGRAM_ID: PublicKey = PublicKey::ZERO;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum SystemCommand {
    CreateAccount = 0,
    Assign = 1,
    Transfer = 2,
    CreateAccountWithSeed = 3,
    AdvanceNonceAccount = 4,
    WithdrawNonceAccount = 5,
    InitializeNonceAccount = 6,
    AuthorizeNonceAccount = 7,
    Allocate = 8,
    AllocateWithSeed = 9,
    AssignWithSeed = 10,
    TransferWithSeed = 11,
}

impl SystemCommand {
    pub fn tag(self) -> [u8; 4] {
        (self as u32).to_le_bytes()
    }
}

/// Create `address` funded with `lamports` by `funder`, allocating `space`
/// bytes owned by `owner`. Both `funder` and `address` must sign.
///
/// Data: `u32 tag(0) || lamports u64 || space u64 || owner (32)`, 52 bytes.
pub fn create_account(
    funder: &PublicKey,
    address: &PublicKey,
    owner: &PublicKey,
    lamports: u64,
    space: u64,
) -> Instruction {
    let mut data = Vec::with_capacity(52);
    data.extend_from_slice(&SystemCommand::CreateAccount.tag());
    data.extend_from_slice(&lamports.to_le_bytes());
    data.extend_from_slice(&space.to_le_bytes());
    data.extend_from_slice(owner.as_bytes());

    Instruction::new(
        SYSTEM_PROGRAM_ID,
        vec![
            AccountMeta::writable(*funder, true),
            AccountMeta::writable(*address, true),
        ],
        data,
    )
}

/// Move `lamports` of the native currency from `from` to `to`.
///
/// Data: `u32 tag(2) || lamports u64`, 12 bytes.
pub fn transfer(from: &PublicKey, to: &PublicKey, lamports: u64) -> Instruction {
    let mut data = Vec::with_capacity(12);
    data.extend_from_slice(&SystemCommand::Transfer.tag());
    data.extend_from_slice(&lamports.to_le_bytes());

    Instruction::new(
        SYSTEM_PROGRAM_ID,
        vec![
            AccountMeta::writable(*from, true),
            AccountMeta::writable(*to, false),
        ],
        data,
    )
}
