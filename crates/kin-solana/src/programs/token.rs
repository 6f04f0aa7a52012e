//! The SPL token program.
//!
//! Token instruction data starts with a single command byte. Every builder
//! takes the token program key explicitly since a deployment may point at a
//! program other than [`TOKEN_PROGRAM_ID`].

use crate::account_meta::AccountMeta;
use crate::error::SolanaError;
use crate::instruction::Instruction;
use crate::key::PublicKey;
use crate::programs::sysvar;

/// `TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA`
pub const TOKEN_PROGRAM_ID: PublicKey = PublicKey::new([
    0x06, 0xdd, 0xf6, 0xe1, 0xd7, 0x65, 0xa1, 0x93, 0xd9, 0xcb, 0xe1, 0x46, 0xce, 0xeb, 0x79, 0xac,
    0x1c, 0xb4, 0x85, 0xed, 0x5f, 0x5b, 0x37, 0x91, 0x3a, 0x8c, 0xf5, 0x85, 0x7e, 0xff, 0x00, 0xa9,
]);

/// Size in bytes of a token account's state.
pub const TOKEN_ACCOUNT_SIZE: u64 = 165;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TokenCommand {
    InitializeMint = 0,
    InitializeAccount = 1,
    InitializeMultisig = 2,
    Transfer = 3,
    Approve = 4,
    Revoke = 5,
    SetAuthority = 6,
    MintTo = 7,
    Burn = 8,
    CloseAccount = 9,
    FreezeAccount = 10,
    ThawAccount = 11,
    Transfer2 = 12,
    Approve2 = 13,
    MintTo2 = 14,
    Burn2 = 15,
}

impl TryFrom<u8> for TokenCommand {
    type Error = SolanaError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use TokenCommand::*;
        const ALL: [TokenCommand; 16] = [
            InitializeMint,
            InitializeAccount,
            InitializeMultisig,
            Transfer,
            Approve,
            Revoke,
            SetAuthority,
            MintTo,
            Burn,
            CloseAccount,
            FreezeAccount,
            ThawAccount,
            Transfer2,
            Approve2,
            MintTo2,
            Burn2,
        ];
        ALL.get(usize::from(value))
            .copied()
            .ok_or_else(|| SolanaError::MalformedData(format!("unknown token command {value}")))
    }
}

/// Which authority a `SetAuthority` instruction replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AuthorityType {
    MintTokens = 0,
    FreezeAccount = 1,
    AccountHolder = 2,
    CloseAccount = 3,
}

/// Initialize `account` as a token account for `mint` held by `owner`.
pub fn initialize_account(
    account: &PublicKey,
    mint: &PublicKey,
    owner: &PublicKey,
    token_program: &PublicKey,
) -> Instruction {
    Instruction::new(
        *token_program,
        vec![
            AccountMeta::writable(*account, true),
            AccountMeta::readonly(*mint, false),
            AccountMeta::readonly(*owner, false),
            AccountMeta::readonly(sysvar::RENT, false),
        ],
        vec![TokenCommand::InitializeAccount as u8],
    )
}

/// Move `amount` quarks from `source` to `destination`, authorized by
/// `owner`.
///
/// Data: `[3] || amount u64 LE`, 9 bytes.
pub fn transfer(
    source: &PublicKey,
    destination: &PublicKey,
    owner: &PublicKey,
    amount: u64,
    token_program: &PublicKey,
) -> Instruction {
    let mut data = Vec::with_capacity(9);
    data.push(TokenCommand::Transfer as u8);
    data.extend_from_slice(&amount.to_le_bytes());

    Instruction::new(
        *token_program,
        vec![
            AccountMeta::writable(*source, false),
            AccountMeta::writable(*destination, false),
            AccountMeta::readonly(*owner, true),
        ],
        data,
    )
}

/// Replace (or, with `None`, remove) one authority of `account`.
///
/// Data: `[6, authority_type, 0]` or `[6, authority_type, 1, new_authority]`.
pub fn set_authority(
    account: &PublicKey,
    current_authority: &PublicKey,
    new_authority: Option<&PublicKey>,
    authority_type: AuthorityType,
    token_program: &PublicKey,
) -> Instruction {
    let mut data = Vec::with_capacity(35);
    data.push(TokenCommand::SetAuthority as u8);
    data.push(authority_type as u8);
    match new_authority {
        Some(authority) => {
            data.push(1);
            data.extend_from_slice(authority.as_bytes());
        }
        None => data.push(0),
    }

    Instruction::new(
        *token_program,
        vec![
            AccountMeta::writable(*account, false),
            AccountMeta::readonly(*current_authority, true),
        ],
        data,
    )
}

/// Close `account`, sending its remaining lamports to `destination`.
pub fn close_account(
    account: &PublicKey,
    destination: &PublicKey,
    owner: &PublicKey,
    token_program: &PublicKey,
) -> Instruction {
    Instruction::new(
        *token_program,
        vec![
            AccountMeta::writable(*account, false),
            AccountMeta::writable(*destination, false),
            AccountMeta::readonly(*owner, true),
        ],
        vec![TokenCommand::CloseAccount as u8],
    )
}

/// A token transfer recovered from its instruction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedTransfer {
    pub source: PublicKey,
    pub destination: PublicKey,
    pub owner: PublicKey,
    pub amount: u64,
}

/// Recognize a single-owner token transfer built by [`transfer`].
///
/// Returns `Ok(None)` for any other token command.
pub fn decode_transfer(instruction: &Instruction) -> Result<Option<DecodedTransfer>, SolanaError> {
    let Some((&command, rest)) = instruction.data.split_first() else {
        return Err(SolanaError::MalformedData("empty token instruction".into()));
    };
    if TokenCommand::try_from(command)? != TokenCommand::Transfer {
        return Ok(None);
    }

    let amount: [u8; 8] = rest.try_into().map_err(|_| {
        SolanaError::MalformedData(format!("transfer data must be 8 bytes, got {}", rest.len()))
    })?;
    let [source, destination, owner] = instruction.accounts.as_slice() else {
        return Err(SolanaError::MalformedData(format!(
            "transfer expects 3 accounts, got {}",
            instruction.accounts.len()
        )));
    };

    Ok(Some(DecodedTransfer {
        source: source.public_key,
        destination: destination.public_key,
        owner: owner.public_key,
        amount: u64::from_le_bytes(amount),
    }))
}
