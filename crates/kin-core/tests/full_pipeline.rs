//! Cross-crate integration tests exercising the full SDK pipeline:
//! service config -> build -> sign -> encode -> decode -> inspect.
//!
//! These go through the public API of kin_core and kin_solana only, the way
//! a wallet app would, to catch regressions at crate boundaries.

use kin_core::kin_solana::{
    derive_associated_token_address, Hash, Keypair, PublicKey, Signature, Signer, Transaction,
};
use kin_core::*;
use rand::rngs::OsRng;

const SUBSIDIZER: &str = "9NDJfMU42fHEot4stJ4tiwSbEJ9TAZ3gvjNgjsCsVXCd";
const KIN_MINT: &str = "kinXdEcpDQeHPEuQnqmUgtYykqKGVFq6CeVX5iAHJq6";

fn service_config() -> ServiceConfig {
    let json = format!(r#"{{"subsidizer":"{SUBSIDIZER}","token":"{KIN_MINT}"}}"#);
    ServiceConfig::from_json(&json).unwrap()
}

fn recent_blockhash() -> Hash {
    Hash::new([0x42; 32])
}

/// Submit-and-fetch stand-in: the bytes a wallet sends are the bytes an
/// observer reads back.
fn over_the_wire(tx: &Transaction) -> Transaction {
    Transaction::decode(&tx.encode()).unwrap()
}

// ─── Payment: build -> sign -> encode -> decode -> inspect ──────────

#[test]
fn payment_full_pipeline() {
    let config = service_config();
    let owner = Keypair::generate(&mut OsRng);
    let source = derive_associated_token_address(&owner.public_key(), &config.token).unwrap();
    let destination = Keypair::generate(&mut OsRng).public_key();

    // 1. Parse the amount the user typed
    let amount: Quarks = "12.5".parse().unwrap();
    assert_eq!(amount, Quarks(1_250_000));

    // 2. Build and sign
    let memo = KinMemo::Binary(KinBinaryMemo::new(1, 0, TransferType::P2p, 7, b"order-99").unwrap());
    let tx = build_payment_transaction(
        &config,
        &owner,
        &source,
        &[PaymentItem {
            amount,
            destination,
        }],
        Some(&memo),
        recent_blockhash(),
    )
    .unwrap();

    // 3. Wire format: two signature slots, the subsidizer's still empty
    let encoded = tx.encode();
    assert_eq!(encoded[0], 2);
    assert_eq!(hex::encode(&encoded[1..65]), "00".repeat(64));

    // 4. Read back what the ledger would see
    let observed = over_the_wire(&tx);
    assert_eq!(observed, tx);
    assert_eq!(observed.recent_blockhash(), &recent_blockhash());
    assert_eq!(transaction_memo(&observed), Some(memo));
    assert_eq!(
        payment_operations(&config, &observed).unwrap(),
        vec![PaymentOperation {
            source,
            destination,
            amount,
        }]
    );
}

#[test]
fn fully_signed_payment_verifies() {
    // A subsidizer we hold the key for, so both slots can be filled.
    let subsidizer = Keypair::generate(&mut OsRng);
    let config = ServiceConfig {
        subsidizer: subsidizer.public_key(),
        ..service_config()
    };
    let owner = Keypair::generate(&mut OsRng);

    let tx = build_payment_transaction(
        &config,
        &owner,
        &PublicKey::new([3; 32]),
        &[PaymentItem {
            amount: Quarks::from_kin(1).unwrap(),
            destination: PublicKey::new([4; 32]),
        }],
        Some(&KinMemo::from("1-test-coffee")),
        recent_blockhash(),
    )
    .unwrap();
    assert!(tx.verify_signatures().is_err());

    let cosigned = tx.sign(&[&subsidizer as &dyn Signer]).unwrap();
    cosigned.verify_signatures().unwrap();
    assert_eq!(cosigned.id(), Some(cosigned.signatures()[0]));
    assert_ne!(cosigned.signatures()[0], Signature::ZERO);

    let observed = over_the_wire(&cosigned);
    observed.verify_signatures().unwrap();
    assert_eq!(
        transaction_memo(&observed),
        Some(KinMemo::Text("1-test-coffee".into()))
    );
}

// ─── Account lifecycle: create, then merge ──────────────────────────

#[test]
fn create_then_merge_pipeline() {
    let config = service_config();
    let owner = Keypair::generate(&mut OsRng);

    let (create_tx, ata) =
        build_create_account_transaction(&config, &owner, Some(AppIndex(12)), recent_blockhash())
            .unwrap();
    let observed = over_the_wire(&create_tx);
    let Some(KinMemo::Binary(binary)) = transaction_memo(&observed) else {
        panic!("expected a binary memo");
    };
    assert_eq!(binary.app_index(), AppIndex(12));
    assert_eq!(binary.transfer_type(), TransferType::None);
    assert!(observed.message().account_keys.contains(&ata));

    // A legacy account left over from before the associated one existed.
    let legacy = Keypair::generate(&mut OsRng).public_key();
    let accounts = [
        TokenAccountInfo {
            public_key: ata,
            balance: Some(Quarks::ZERO),
            close_authority: Some(config.subsidizer),
        },
        TokenAccountInfo {
            public_key: legacy,
            balance: Some(Quarks(777)),
            close_authority: Some(owner.public_key()),
        },
    ];

    let merge_tx =
        build_merge_token_accounts_transaction(&config, &owner, &accounts, None, recent_blockhash())
            .unwrap()
            .unwrap();
    let observed = over_the_wire(&merge_tx);
    assert_eq!(
        payment_operations(&config, &observed).unwrap(),
        vec![PaymentOperation {
            source: legacy,
            destination: ata,
            amount: Quarks(777),
        }]
    );
    assert_eq!(transaction_memo(&observed), None);

    // Once merged there is nothing left to do.
    let merged = [accounts[0]];
    assert!(build_merge_token_accounts_transaction(
        &config,
        &owner,
        &merged,
        None,
        recent_blockhash()
    )
    .unwrap()
    .is_none());
}

// ─── Memos survive the wire unchanged ───────────────────────────────

#[test]
fn memo_foreign_key_survives_pipeline() {
    let config = service_config();
    let owner = Keypair::generate(&mut OsRng);
    let foreign_key: Vec<u8> = (0u8..29).collect();
    let binary = KinBinaryMemo::new(2, 5, TransferType::Earn, u16::MAX, &foreign_key).unwrap();

    let tx = build_payment_transaction(
        &config,
        &owner,
        &PublicKey::new([3; 32]),
        &[PaymentItem {
            amount: Quarks(1),
            destination: PublicKey::new([4; 32]),
        }],
        Some(&KinMemo::Binary(binary)),
        recent_blockhash(),
    )
    .unwrap();

    let Some(KinMemo::Binary(observed)) = transaction_memo(&over_the_wire(&tx)) else {
        panic!("binary memo lost on the wire");
    };
    assert_eq!(observed, binary);
    assert_eq!(observed.foreign_key_base64(), binary.foreign_key_base64());
    assert_eq!(observed.foreign_key()[..28], foreign_key[..28]);
}
