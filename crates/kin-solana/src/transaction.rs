//! Transaction assembly, signing and wire format.
//!
//! ```text
//! Transaction:
//!   num_signatures  compact-u16
//!   signatures      64 bytes * num_signatures
//!   message         (see `message`)
//! ```
//!
//! A transaction is assembled once from a fee payer and a list of
//! instructions. The account list is deduplicated, permission-merged and
//! sorted so that the same inputs always produce the same bytes. Every
//! operation that "changes" a transaction returns a new value.

use crate::account_meta::{canonical_accounts, AccountMeta};
use crate::error::SolanaError;
use crate::instruction::{take, CompiledInstruction, Instruction};
use crate::key::{Hash, PublicKey, Signature};
use crate::keypair::{self, Signer};
use crate::message::{Message, MessageHeader};
use crate::short_vec;

/// Largest account list a compiled instruction can index with a `u8`.
const MAX_ACCOUNTS: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    signatures: Vec<Signature>,
    message: Message,
}

impl Transaction {
    /// Assemble an unsigned transaction paid for by `payer`.
    ///
    /// The recent blockhash is left zeroed; set it with
    /// [`Transaction::with_blockhash`] before signing.
    pub fn new(payer: &PublicKey, instructions: &[Instruction]) -> Result<Self, SolanaError> {
        let mut metas = Vec::with_capacity(
            1 + instructions
                .iter()
                .map(|ix| ix.accounts.len() + 1)
                .sum::<usize>(),
        );
        metas.push(AccountMeta::payer(*payer));
        for ix in instructions {
            metas.push(AccountMeta::program(ix.program_id));
            metas.extend_from_slice(&ix.accounts);
        }

        let accounts = canonical_accounts(&metas);
        if accounts.len() > MAX_ACCOUNTS {
            return Err(SolanaError::TooManyAccounts(accounts.len()));
        }

        let header = header_for(&accounts)?;
        let account_keys: Vec<PublicKey> = accounts.iter().map(|meta| meta.public_key).collect();
        let compiled = instructions
            .iter()
            .map(|ix| ix.compile(&account_keys))
            .collect::<Result<Vec<CompiledInstruction>, _>>()?;

        tracing::trace!(
            %payer,
            accounts = account_keys.len(),
            instructions = compiled.len(),
            required_signatures = header.num_required_signatures,
            "assembled transaction"
        );

        Ok(Self {
            signatures: Vec::new(),
            message: Message::new(header, account_keys, Hash::ZERO, compiled),
        })
    }

    /// Pair an existing message with its signatures.
    ///
    /// `signatures` must be empty or hold exactly one entry per required
    /// signer.
    pub fn from_parts(signatures: Vec<Signature>, message: Message) -> Result<Self, SolanaError> {
        check_signature_count(signatures.len(), &message)?;
        Ok(Self {
            signatures,
            message,
        })
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    /// The transaction's identifier: its first signature, once signed.
    pub fn id(&self) -> Option<Signature> {
        self.signatures.first().copied()
    }

    pub fn recent_blockhash(&self) -> &Hash {
        &self.message.recent_blockhash
    }

    /// A copy with `blockhash` as the recent blockhash.
    ///
    /// Existing signatures covered the old message bytes and are dropped.
    pub fn with_blockhash(&self, blockhash: Hash) -> Self {
        let mut message = self.message.clone();
        message.recent_blockhash = blockhash;
        Self {
            signatures: Vec::new(),
            message,
        }
    }

    /// Sign the message with every signer, returning the signed copy.
    ///
    /// Each signer must own one of the message's signer accounts. Signatures
    /// already present for other signer accounts are kept, so a transaction
    /// can be signed in several passes.
    pub fn sign(&self, signers: &[&dyn Signer]) -> Result<Self, SolanaError> {
        let required = usize::from(self.message.header.num_required_signatures);
        if signers.len() > required {
            return Err(SolanaError::TooManySigners {
                provided: signers.len(),
                required,
            });
        }

        let message_bytes = self.message.encode();
        let signer_keys = self.message.signer_keys();

        let mut signatures = self.signatures.clone();
        signatures.resize(required, Signature::ZERO);

        for signer in signers {
            let public_key = signer.public_key();
            let index = signer_keys
                .iter()
                .position(|key| *key == public_key)
                .ok_or_else(|| SolanaError::AccountNotInAccountList(public_key.to_string()))?;
            signatures[index] = signer.sign_message(&message_bytes);
        }

        tracing::debug!(
            signers = signers.len(),
            required,
            blockhash = %self.message.recent_blockhash,
            "signed transaction"
        );

        Ok(Self {
            signatures,
            message: self.message.clone(),
        })
    }

    /// Check every signature against its signer account.
    ///
    /// An unsigned transaction, or one with an unfilled slot, fails.
    pub fn verify_signatures(&self) -> Result<(), SolanaError> {
        let required = usize::from(self.message.header.num_required_signatures);
        if self.signatures.len() != required {
            return Err(SolanaError::SignatureVerification(format!(
                "expected {required} signatures, have {}",
                self.signatures.len()
            )));
        }

        let message_bytes = self.message.encode();
        self.signatures
            .iter()
            .zip(self.message.signer_keys())
            .try_for_each(|(signature, key)| keypair::verify(key, &message_bytes, signature))
    }

    /// The program key a compiled instruction of this transaction invokes.
    pub fn instruction_program(&self, instruction: &CompiledInstruction) -> Option<&PublicKey> {
        self.message.program_id(instruction)
    }

    /// Every instruction in symbolic form.
    pub fn instructions(&self) -> Result<Vec<Instruction>, SolanaError> {
        self.message
            .instructions
            .iter()
            .map(|ix| self.message.decompile(ix))
            .collect()
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(1 + self.signatures.len() * Signature::LENGTH + 256);
        short_vec::append_length(&mut buf, self.signatures.len());
        for signature in &self.signatures {
            buf.extend_from_slice(signature.as_bytes());
        }
        self.message.encode_into(&mut buf);
        buf
    }

    /// Decode a transaction from its exact wire bytes.
    pub fn decode(data: &[u8]) -> Result<Self, SolanaError> {
        let (signature_count, rest) = short_vec::decode_length(data)?;
        let (signature_bytes, rest) = take(
            rest,
            usize::from(signature_count) * Signature::LENGTH,
            "signatures",
        )?;
        let signatures = signature_bytes
            .chunks_exact(Signature::LENGTH)
            .map(Signature::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let message = Message::decode(rest)?;
        check_signature_count(signatures.len(), &message)?;

        Ok(Self {
            signatures,
            message,
        })
    }
}

fn header_for(accounts: &[AccountMeta]) -> Result<MessageHeader, SolanaError> {
    let count = |predicate: fn(&AccountMeta) -> bool| {
        let n = accounts.iter().filter(|meta| predicate(meta)).count();
        u8::try_from(n).map_err(|_| SolanaError::TooManyAccounts(accounts.len()))
    };

    Ok(MessageHeader {
        num_required_signatures: count(|m| m.is_signer)?,
        num_readonly_signed_accounts: count(|m| m.is_signer && !m.is_writable)?,
        num_readonly_unsigned_accounts: count(|m| !m.is_signer && !m.is_writable)?,
    })
}

fn check_signature_count(count: usize, message: &Message) -> Result<(), SolanaError> {
    let required = usize::from(message.header.num_required_signatures);
    if count != 0 && count != required {
        return Err(SolanaError::MalformedData(format!(
            "transaction carries {count} signatures but message requires {required}"
        )));
    }
    Ok(())
}
