//! Kin transaction flows.
//!
//! Every builder is pure: the service config and a recent blockhash come in,
//! a transaction signed by the owner comes out. The subsidizer pays fees and
//! its signature slot (always the first) is left zeroed for the service to
//! fill in.

use kin_solana::programs::{associated_token, token};
use kin_solana::{
    AuthorityType, Hash, Instruction, PublicKey, Signer, Transaction, MEMO_PROGRAM_ID,
};

use crate::amount::Quarks;
use crate::error::KinError;
use crate::memo::{KinBinaryMemo, KinMemo, TransferType};
use crate::types::{AppIndex, PaymentItem, PaymentOperation, ServiceConfig, TokenAccountInfo};

/// Pay each of `payments` from the owner's `source` token account.
///
/// A non-empty `memo` becomes the first instruction.
pub fn build_payment_transaction(
    config: &ServiceConfig,
    owner: &dyn Signer,
    source: &PublicKey,
    payments: &[PaymentItem],
    memo: Option<&KinMemo>,
    blockhash: Hash,
) -> Result<Transaction, KinError> {
    if payments.is_empty() {
        return Err(KinError::NoPayments);
    }
    let owner_key = owner.public_key();

    let mut instructions = Vec::with_capacity(payments.len() + 1);
    if let Some(memo) = memo.filter(|memo| !memo.is_empty()) {
        instructions.push(memo.to_instruction());
    }
    instructions.extend(payments.iter().map(|payment| {
        token::transfer(
            source,
            &payment.destination,
            &owner_key,
            payment.amount.0,
            &config.token_program,
        )
    }));

    tracing::debug!(
        owner = %owner_key,
        %source,
        payments = payments.len(),
        memo = memo.is_some(),
        "building payment transaction"
    );

    sign_as_owner(&config.subsidizer, &instructions, owner, blockhash)
}

/// Create the owner's associated token account for the Kin mint, with the
/// subsidizer as its close authority.
///
/// Returns the transaction and the address of the new account.
pub fn build_create_account_transaction(
    config: &ServiceConfig,
    owner: &dyn Signer,
    app_index: Option<AppIndex>,
    blockhash: Hash,
) -> Result<(Transaction, PublicKey), KinError> {
    let owner_key = owner.public_key();
    let (instructions, address) = create_account_instructions(config, &owner_key, app_index)?;

    tracing::debug!(owner = %owner_key, %address, "building create account transaction");

    let transaction = sign_as_owner(&config.subsidizer, &instructions, owner, blockhash)?;
    Ok((transaction, address))
}

/// Fold every token account of the owner into their associated token
/// account.
///
/// The associated account is created first when it is not among
/// `token_accounts`. Known balances are transferred into it, and accounts the
/// owner or subsidizer may close are closed. Returns `None` when there is
/// nothing to do.
pub fn build_merge_token_accounts_transaction(
    config: &ServiceConfig,
    owner: &dyn Signer,
    token_accounts: &[TokenAccountInfo],
    app_index: Option<AppIndex>,
    blockhash: Hash,
) -> Result<Option<Transaction>, KinError> {
    if token_accounts.is_empty() {
        return Err(KinError::NoTokenAccounts);
    }
    let owner_key = owner.public_key();

    let associated = associated_token::derive_associated_token_address(&owner_key, &config.token)?;
    let mut instructions = Vec::new();
    if !token_accounts
        .iter()
        .any(|account| account.public_key == associated)
    {
        let (create, _) = create_account_instructions(config, &owner_key, app_index)?;
        instructions.extend(create);
    }

    for account in token_accounts
        .iter()
        .filter(|account| account.public_key != associated)
    {
        if let Some(balance) = account.balance {
            instructions.push(token::transfer(
                &account.public_key,
                &associated,
                &owner_key,
                balance.0,
                &config.token_program,
            ));
        }

        if let Some(authority) = account
            .close_authority
            .filter(|authority| *authority == owner_key || *authority == config.subsidizer)
        {
            instructions.push(token::close_account(
                &account.public_key,
                &authority,
                &authority,
                &config.token_program,
            ));
        }
    }

    if instructions.is_empty() {
        tracing::debug!(owner = %owner_key, "token accounts already merged");
        return Ok(None);
    }

    tracing::debug!(
        owner = %owner_key,
        accounts = token_accounts.len(),
        instructions = instructions.len(),
        "building merge transaction"
    );

    sign_as_owner(&config.subsidizer, &instructions, owner, blockhash).map(Some)
}

/// The memo of the first memo-program instruction, if any.
pub fn transaction_memo(transaction: &Transaction) -> Option<KinMemo> {
    transaction
        .message()
        .instructions
        .iter()
        .find(|ix| transaction.instruction_program(ix) == Some(&MEMO_PROGRAM_ID))
        .map(|ix| KinMemo::from_memo_data(&ix.data))
}

/// Every transfer made through the configured token program, in
/// instruction order.
///
/// Instructions for other programs, and token instructions that are not a
/// well-formed transfer, are skipped.
pub fn payment_operations(
    config: &ServiceConfig,
    transaction: &Transaction,
) -> Result<Vec<PaymentOperation>, KinError> {
    let message = transaction.message();
    let mut operations = Vec::new();

    for compiled in &message.instructions {
        if message.program_id(compiled) != Some(&config.token_program) {
            continue;
        }
        if compiled.data.first() != Some(&(token::TokenCommand::Transfer as u8)) {
            continue;
        }

        let instruction = message.decompile(compiled)?;
        match token::decode_transfer(&instruction) {
            Ok(Some(transfer)) => operations.push(PaymentOperation {
                source: transfer.source,
                destination: transfer.destination,
                amount: Quarks(transfer.amount),
            }),
            Ok(None) => {}
            Err(err) => tracing::trace!(%err, "skipping malformed token transfer"),
        }
    }

    Ok(operations)
}

fn create_account_instructions(
    config: &ServiceConfig,
    owner: &PublicKey,
    app_index: Option<AppIndex>,
) -> Result<(Vec<Instruction>, PublicKey), KinError> {
    let (create, address) =
        associated_token::create_associated_account(&config.subsidizer, owner, &config.token)?;

    let mut instructions = vec![
        create,
        token::set_authority(
            &address,
            owner,
            Some(&config.subsidizer),
            AuthorityType::CloseAccount,
            &config.token_program,
        ),
    ];
    if let Some(app_index) = app_index {
        let memo = KinBinaryMemo::for_app(TransferType::None, app_index);
        instructions.push(KinMemo::Binary(memo).to_instruction());
    }

    Ok((instructions, address))
}

/// Assemble with the subsidizer as payer and add the owner's signature when
/// the owner is one of the signers. Other signature slots stay zeroed.
fn sign_as_owner(
    subsidizer: &PublicKey,
    instructions: &[Instruction],
    owner: &dyn Signer,
    blockhash: Hash,
) -> Result<Transaction, KinError> {
    let transaction = Transaction::new(subsidizer, instructions)?.with_blockhash(blockhash);
    let owner_signs = transaction
        .message()
        .signer_keys()
        .contains(&owner.public_key());

    let signed = if owner_signs {
        transaction.sign(&[owner])?
    } else {
        transaction.sign(&[])?
    };
    Ok(signed)
}
