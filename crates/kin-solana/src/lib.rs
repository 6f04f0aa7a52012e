//! Transaction codec and construction for the Kin token ledger.
//!
//! This crate implements the ledger's compact binary wire format by hand,
//! using `ed25519-dalek` for signing, `curve25519-dalek` for the curve
//! check behind program-derived addresses and `bs58` for text keys. It has
//! no network access: blockhashes come in, encoded transactions go out.
//!
//! Building a transaction:
//!
//! 1. Build [`Instruction`]s with the helpers in [`programs`].
//! 2. [`Transaction::new`] merges and orders their accounts and compiles
//!    them against the final account list.
//! 3. [`Transaction::with_blockhash`] injects a recent blockhash.
//! 4. [`Transaction::sign`] adds signatures; [`Transaction::encode`] yields
//!    the bytes to submit.

pub mod account_meta;
pub mod address;
pub mod error;
pub mod instruction;
pub mod key;
pub mod keypair;
pub mod message;
pub mod pda;
pub mod programs;
pub mod short_vec;
pub mod transaction;

pub use account_meta::AccountMeta;
pub use address::{address_to_key, key_to_address, validate_address};
pub use error::SolanaError;
pub use instruction::{CompiledInstruction, Instruction};
pub use key::{Hash, PublicKey, Signature};
pub use keypair::{Keypair, Signer};
pub use message::{Message, MessageHeader};
pub use pda::{create_program_address, find_program_address};
pub use programs::associated_token::{
    create_associated_account, derive_associated_token_address, ASSOCIATED_TOKEN_PROGRAM_ID,
};
pub use programs::memo::MEMO_PROGRAM_ID;
pub use programs::system::SYSTEM_PROGRAM_ID;
pub use programs::token::{AuthorityType, TOKEN_PROGRAM_ID};
pub use transaction::Transaction;
