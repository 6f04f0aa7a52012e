//! Symbolic and compiled instructions.
//!
//! An [`Instruction`] names its program and accounts by key. Once the
//! message's account list is fixed, it is compiled into a
//! [`CompiledInstruction`] that refers to accounts by their position:
//!
//! ```text
//! program_index     u8
//! num_accounts      compact-u16
//! account_indexes   u8 * num_accounts
//! data_len          compact-u16
//! data              u8 * data_len
//! ```

use crate::account_meta::AccountMeta;
use crate::error::SolanaError;
use crate::key::PublicKey;
use crate::short_vec;

/// A single operation request against a program, before compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub program_id: PublicKey,
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

impl Instruction {
    pub fn new(program_id: PublicKey, accounts: Vec<AccountMeta>, data: Vec<u8>) -> Self {
        Self {
            program_id,
            accounts,
            data,
        }
    }

    /// Replace keys with their positions in `account_keys`.
    ///
    /// Transaction assembly guarantees every key referenced here is present,
    /// so a miss means the account list and instructions disagree.
    pub fn compile(&self, account_keys: &[PublicKey]) -> Result<CompiledInstruction, SolanaError> {
        let program_index = index_of(account_keys, &self.program_id)?;
        let account_indexes = self
            .accounts
            .iter()
            .map(|meta| index_of(account_keys, &meta.public_key))
            .collect::<Result<Vec<u8>, _>>()?;

        if self.data.len() > usize::from(u16::MAX) {
            return Err(SolanaError::MalformedData(format!(
                "instruction data of {} bytes exceeds the length prefix range",
                self.data.len()
            )));
        }

        Ok(CompiledInstruction {
            program_index,
            account_indexes,
            data: self.data.clone(),
        })
    }
}

fn index_of(account_keys: &[PublicKey], key: &PublicKey) -> Result<u8, SolanaError> {
    let position = account_keys
        .iter()
        .position(|candidate| candidate == key)
        .ok_or_else(|| SolanaError::InconsistentAccountList(format!("{key} not in account keys")))?;

    u8::try_from(position).map_err(|_| SolanaError::TooManyAccounts(account_keys.len()))
}

/// An instruction whose program and accounts are indexes into a message's
/// account list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_index: u8,
    pub account_indexes: Vec<u8>,
    pub data: Vec<u8>,
}

impl CompiledInstruction {
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf
    }

    pub(crate) fn encode_into(&self, buf: &mut Vec<u8>) {
        buf.push(self.program_index);

        short_vec::append_length(buf, self.account_indexes.len());
        buf.extend_from_slice(&self.account_indexes);

        short_vec::append_length(buf, self.data.len());
        buf.extend_from_slice(&self.data);
    }

    fn encoded_len(&self) -> usize {
        1 + short_vec::encode_length(self.account_indexes.len()).len()
            + self.account_indexes.len()
            + short_vec::encode_length(self.data.len()).len()
            + self.data.len()
    }

    /// Decode a single instruction, rejecting trailing bytes.
    pub fn decode(data: &[u8]) -> Result<Self, SolanaError> {
        let (instruction, rest) = Self::decode_prefix(data)?;
        if !rest.is_empty() {
            return Err(SolanaError::MalformedData(format!(
                "{} trailing bytes after instruction",
                rest.len()
            )));
        }
        Ok(instruction)
    }

    /// Decode one instruction from the front of `data`, returning the rest.
    pub(crate) fn decode_prefix(data: &[u8]) -> Result<(Self, &[u8]), SolanaError> {
        let (&program_index, rest) = data.split_first().ok_or_else(|| {
            SolanaError::MalformedData("missing instruction program index".into())
        })?;

        let (account_count, rest) = short_vec::decode_length(rest)?;
        let (account_indexes, rest) = take(rest, usize::from(account_count), "account indexes")?;

        let (data_len, rest) = short_vec::decode_length(rest)?;
        let (payload, rest) = take(rest, usize::from(data_len), "instruction data")?;

        Ok((
            Self {
                program_index,
                account_indexes: account_indexes.to_vec(),
                data: payload.to_vec(),
            },
            rest,
        ))
    }

    /// Every index this instruction refers to must address `account_count` keys.
    pub(crate) fn validate_indexes(&self, account_count: usize) -> Result<(), SolanaError> {
        if usize::from(self.program_index) >= account_count {
            return Err(SolanaError::MalformedData(format!(
                "program index {} out of range for {account_count} accounts",
                self.program_index
            )));
        }
        if let Some(bad) = self
            .account_indexes
            .iter()
            .find(|&&index| usize::from(index) >= account_count)
        {
            return Err(SolanaError::MalformedData(format!(
                "account index {bad} out of range for {account_count} accounts"
            )));
        }
        Ok(())
    }
}

/// Split `len` bytes off the front of `data`.
pub(crate) fn take<'a>(
    data: &'a [u8],
    len: usize,
    what: &str,
) -> Result<(&'a [u8], &'a [u8]), SolanaError> {
    if data.len() < len {
        return Err(SolanaError::MalformedData(format!(
            "truncated {what}: need {len} bytes, have {}",
            data.len()
        )));
    }
    Ok(data.split_at(len))
}
