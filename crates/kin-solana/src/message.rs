//! The signable body of a transaction.
//!
//! ```text
//! Message:
//!   num_required_sigs     u8
//!   num_readonly_signed   u8
//!   num_readonly_unsigned u8
//!   num_accounts          compact-u16
//!   account_keys          32 bytes * num_accounts
//!   recent_blockhash      32 bytes
//!   num_instructions      compact-u16
//!   instructions[]        (see `instruction`)
//! ```

use crate::account_meta::AccountMeta;
use crate::error::SolanaError;
use crate::instruction::{take, CompiledInstruction, Instruction};
use crate::key::{Hash, PublicKey};
use crate::short_vec;

/// Partition counts for the account list that follows it.
///
/// The first `num_required_signatures` accounts sign; the last
/// `num_readonly_signed_accounts` of those are read-only. The last
/// `num_readonly_unsigned_accounts` of the remaining accounts are read-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageHeader {
    pub num_required_signatures: u8,
    pub num_readonly_signed_accounts: u8,
    pub num_readonly_unsigned_accounts: u8,
}

impl MessageHeader {
    pub const LENGTH: usize = 3;

    pub fn encode(&self) -> [u8; Self::LENGTH] {
        [
            self.num_required_signatures,
            self.num_readonly_signed_accounts,
            self.num_readonly_unsigned_accounts,
        ]
    }

    /// Decode a header from exactly three bytes.
    pub fn decode(data: &[u8]) -> Result<Self, SolanaError> {
        match *data {
            [num_required_signatures, num_readonly_signed_accounts, num_readonly_unsigned_accounts] => {
                Ok(Self {
                    num_required_signatures,
                    num_readonly_signed_accounts,
                    num_readonly_unsigned_accounts,
                })
            }
            _ => Err(SolanaError::MalformedData(format!(
                "message header must be {} bytes, got {}",
                Self::LENGTH,
                data.len()
            ))),
        }
    }

    fn validate(&self, account_count: usize) -> Result<(), SolanaError> {
        let signers = usize::from(self.num_required_signatures);
        if signers > account_count {
            return Err(SolanaError::MalformedData(format!(
                "header requires {signers} signatures but message has {account_count} accounts"
            )));
        }
        if self.num_readonly_signed_accounts > self.num_required_signatures {
            return Err(SolanaError::MalformedData(
                "more read-only signed accounts than signers".into(),
            ));
        }
        if usize::from(self.num_readonly_unsigned_accounts) > account_count - signers {
            return Err(SolanaError::MalformedData(
                "more read-only unsigned accounts than non-signers".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: MessageHeader,
    pub account_keys: Vec<PublicKey>,
    pub recent_blockhash: Hash,
    pub instructions: Vec<CompiledInstruction>,
}

impl Message {
    pub fn new(
        header: MessageHeader,
        account_keys: Vec<PublicKey>,
        recent_blockhash: Hash,
        instructions: Vec<CompiledInstruction>,
    ) -> Self {
        Self {
            header,
            account_keys,
            recent_blockhash,
            instructions,
        }
    }

    /// Serialize the message; these are the bytes that get signed.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(256);
        self.encode_into(&mut buf);
        buf
    }

    pub(crate) fn encode_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.header.encode());

        short_vec::append_length(buf, self.account_keys.len());
        for key in &self.account_keys {
            buf.extend_from_slice(key.as_bytes());
        }

        buf.extend_from_slice(self.recent_blockhash.as_bytes());

        short_vec::append_length(buf, self.instructions.len());
        for ix in &self.instructions {
            ix.encode_into(buf);
        }
    }

    /// Decode a complete message, rejecting trailing bytes.
    pub fn decode(data: &[u8]) -> Result<Self, SolanaError> {
        let (message, rest) = Self::decode_prefix(data)?;
        if !rest.is_empty() {
            return Err(SolanaError::MalformedData(format!(
                "{} trailing bytes after message",
                rest.len()
            )));
        }
        Ok(message)
    }

    pub(crate) fn decode_prefix(data: &[u8]) -> Result<(Self, &[u8]), SolanaError> {
        let (header_bytes, rest) = take(data, MessageHeader::LENGTH, "message header")?;
        let header = MessageHeader::decode(header_bytes)?;

        let (account_count, rest) = short_vec::decode_length(rest)?;
        let account_count = usize::from(account_count);
        let (key_bytes, rest) = take(rest, account_count * PublicKey::LENGTH, "account keys")?;
        let account_keys = key_bytes
            .chunks_exact(PublicKey::LENGTH)
            .map(PublicKey::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        header.validate(account_count)?;

        let (hash_bytes, rest) = take(rest, Hash::LENGTH, "recent blockhash")?;
        let recent_blockhash = Hash::try_from(hash_bytes)?;

        let (instruction_count, mut rest) = short_vec::decode_length(rest)?;
        // Each instruction occupies at least three bytes.
        if usize::from(instruction_count) > rest.len() / 3 {
            return Err(SolanaError::MalformedData(format!(
                "{instruction_count} instructions cannot fit in {} bytes",
                rest.len()
            )));
        }

        let mut instructions = Vec::with_capacity(usize::from(instruction_count));
        for _ in 0..instruction_count {
            let (instruction, remaining) = CompiledInstruction::decode_prefix(rest)?;
            instruction.validate_indexes(account_count)?;
            instructions.push(instruction);
            rest = remaining;
        }

        Ok((
            Self {
                header,
                account_keys,
                recent_blockhash,
                instructions,
            },
            rest,
        ))
    }

    /// The program key an instruction invokes.
    pub fn program_id(&self, instruction: &CompiledInstruction) -> Option<&PublicKey> {
        self.account_keys.get(usize::from(instruction.program_index))
    }

    /// The keys of the accounts that must sign this message.
    pub fn signer_keys(&self) -> &[PublicKey] {
        let signers = usize::from(self.header.num_required_signatures).min(self.account_keys.len());
        &self.account_keys[..signers]
    }

    pub fn is_signer(&self, index: usize) -> bool {
        index < usize::from(self.header.num_required_signatures)
    }

    pub fn is_writable(&self, index: usize) -> bool {
        let signers = usize::from(self.header.num_required_signatures);
        if index < signers {
            index < signers.saturating_sub(usize::from(self.header.num_readonly_signed_accounts))
        } else {
            index
                < self
                    .account_keys
                    .len()
                    .saturating_sub(usize::from(self.header.num_readonly_unsigned_accounts))
        }
    }

    /// Rebuild the symbolic form of a compiled instruction, recovering each
    /// account's role from the header.
    ///
    /// Payer and program flags are not carried on the wire, so the result
    /// marks every account as a plain signer/writable combination.
    pub fn decompile(&self, instruction: &CompiledInstruction) -> Result<Instruction, SolanaError> {
        let key_at = |index: u8| {
            self.account_keys
                .get(usize::from(index))
                .copied()
                .ok_or_else(|| {
                    SolanaError::MalformedData(format!(
                        "index {index} out of range for {} accounts",
                        self.account_keys.len()
                    ))
                })
        };

        let program_id = key_at(instruction.program_index)?;
        let accounts = instruction
            .account_indexes
            .iter()
            .map(|&index| {
                let public_key = key_at(index)?;
                let position = usize::from(index);
                let is_signer = self.is_signer(position);
                Ok(if self.is_writable(position) {
                    AccountMeta::writable(public_key, is_signer)
                } else {
                    AccountMeta::readonly(public_key, is_signer)
                })
            })
            .collect::<Result<Vec<_>, SolanaError>>()?;

        Ok(Instruction::new(program_id, accounts, instruction.data.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> PublicKey {
        PublicKey::new([byte; 32])
    }

    fn sample_message() -> Message {
        Message::new(
            MessageHeader {
                num_required_signatures: 2,
                num_readonly_signed_accounts: 1,
                num_readonly_unsigned_accounts: 1,
            },
            vec![key(1), key(2), key(3), key(4)],
            Hash::new([0xAB; 32]),
            vec![
                CompiledInstruction {
                    program_index: 0,
                    account_indexes: vec![1, 2],
                    data: vec![85, 73, 81, 94, 90, 23, 54, 12],
                },
                CompiledInstruction {
                    program_index: 1,
                    account_indexes: vec![2, 3],
                    data: vec![81, 77, 95, 71, 86, 13, 34, 17],
                },
            ],
        )
    }

    #[test]
    fn header_roundtrip() {
        let header = MessageHeader {
            num_required_signatures: 2,
            num_readonly_signed_accounts: 1,
            num_readonly_unsigned_accounts: 3,
        };
        assert_eq!(header.encode(), [2, 1, 3]);
        assert_eq!(MessageHeader::decode(&header.encode()).unwrap(), header);
    }

    #[test]
    fn header_requires_exactly_three_bytes() {
        assert!(MessageHeader::decode(&[1, 0]).is_err());
        assert!(MessageHeader::decode(&[1, 0, 0, 0]).is_err());
    }

    #[test]
    fn encode_decode_cycle() {
        let message = sample_message();
        let decoded = Message::decode(&message.encode()).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn blockhash_sits_after_account_keys() {
        let message = sample_message();
        let encoded = message.encode();
        // header(3) + compact-u16(4) + 4 * 32
        let offset = 3 + 1 + 4 * 32;
        assert_eq!(&encoded[offset..offset + 32], &[0xAB; 32]);
    }

    #[test]
    fn decode_rejects_truncated_account_keys() {
        let encoded = sample_message().encode();
        assert!(matches!(
            Message::decode(&encoded[..3 + 1 + 40]),
            Err(SolanaError::MalformedData(_))
        ));
    }

    #[test]
    fn decode_rejects_truncated_instructions() {
        let encoded = sample_message().encode();
        assert!(Message::decode(&encoded[..encoded.len() - 1]).is_err());
    }

    #[test]
    fn decode_rejects_out_of_range_program_index() {
        let mut message = sample_message();
        message.instructions[1].program_index = 4;
        assert!(Message::decode(&message.encode()).is_err());
    }

    #[test]
    fn decode_rejects_out_of_range_account_index() {
        let mut message = sample_message();
        message.instructions[0].account_indexes = vec![1, 9];
        assert!(Message::decode(&message.encode()).is_err());
    }

    #[test]
    fn decode_rejects_header_exceeding_accounts() {
        let mut message = sample_message();
        message.header.num_required_signatures = 5;
        assert!(Message::decode(&message.encode()).is_err());
    }

    #[test]
    fn decode_rejects_oversized_instruction_count() {
        let mut encoded = sample_message().encode();
        let count_offset = 3 + 1 + 4 * 32 + 32;
        encoded[count_offset] = 0x7f;
        let err = Message::decode(&encoded).unwrap_err();
        assert!(err.to_string().contains("cannot fit"));
    }

    #[test]
    fn decode_rejects_trailing_bytes() {
        let mut encoded = sample_message().encode();
        encoded.push(0);
        assert!(Message::decode(&encoded).is_err());
    }

    #[test]
    fn account_permissions_follow_header() {
        let message = sample_message();
        assert!(message.is_signer(0) && message.is_writable(0));
        assert!(message.is_signer(1) && !message.is_writable(1));
        assert!(!message.is_signer(2) && message.is_writable(2));
        assert!(!message.is_signer(3) && !message.is_writable(3));
        assert_eq!(message.signer_keys(), &[key(1), key(2)]);
    }

    #[test]
    fn decompile_recovers_roles() {
        let message = sample_message();
        let ix = message.decompile(&message.instructions[1]).unwrap();

        assert_eq!(ix.program_id, key(2));
        assert_eq!(
            ix.accounts,
            vec![
                AccountMeta::writable(key(3), false),
                AccountMeta::readonly(key(4), false),
            ]
        );
        assert_eq!(ix.data, message.instructions[1].data);
    }

    #[test]
    fn decompile_rejects_bad_index() {
        let message = sample_message();
        let bad = CompiledInstruction {
            program_index: 7,
            account_indexes: vec![],
            data: vec![],
        };
        assert!(message.decompile(&bad).is_err());
    }

    #[test]
    fn program_id_resolves_index() {
        let message = sample_message();
        assert_eq!(message.program_id(&message.instructions[1]), Some(&key(2)));
    }
}
