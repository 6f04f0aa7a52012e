//! Kin SDK core: the payments and account flows a Kin wallet sends.
//!
//! Network access stays outside this crate. Callers fetch the
//! [`ServiceConfig`] and a recent blockhash, build a transaction with one of
//! the flows in [`transactions`], and submit the encoded bytes themselves.
//! Private keys are reached only through [`kin_solana::Signer`].

pub mod amount;
pub mod error;
pub mod memo;
pub mod transactions;
pub mod types;

pub use amount::{Quarks, QUARKS_PER_KIN};
pub use error::KinError;
pub use memo::{KinBinaryMemo, KinMemo, TransferType};
pub use transactions::{
    build_create_account_transaction, build_merge_token_accounts_transaction,
    build_payment_transaction, payment_operations, transaction_memo,
};
pub use types::{
    AppIndex, Network, PaymentItem, PaymentOperation, ServiceConfig, TokenAccountInfo,
};

pub use kin_solana;
