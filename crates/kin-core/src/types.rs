use kin_solana::{PublicKey, TOKEN_PROGRAM_ID};
use serde::{Deserialize, Serialize};

use crate::amount::Quarks;
use crate::error::KinError;

/// Kin deployments the SDK knows about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    /// Network passphrase identifying the deployment.
    pub fn id(&self) -> &'static str {
        match self {
            Network::Mainnet => "Kin Mainnet ; December 2018",
            Network::Testnet => "Kin Testnet ; December 2018",
        }
    }

    /// `host:port` of the Agora gateway for this network.
    pub fn agora_endpoint(&self) -> &'static str {
        match self {
            Network::Mainnet => "api.agorainfra.net:443",
            Network::Testnet => "api.agorainfra.dev:443",
        }
    }

    pub fn is_testnet(&self) -> bool {
        matches!(self, Network::Testnet)
    }
}

/// Service parameters published by the gateway: who pays fees, which token
/// program to call and which mint is Kin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub subsidizer: PublicKey,
    #[serde(default = "default_token_program")]
    pub token_program: PublicKey,
    pub token: PublicKey,
}

fn default_token_program() -> PublicKey {
    TOKEN_PROGRAM_ID
}

impl ServiceConfig {
    pub fn from_json(json: &str) -> Result<Self, KinError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Index of a registered app, carried in binary memos.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AppIndex(pub u16);

/// One leg of an outgoing payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentItem {
    pub amount: Quarks,
    pub destination: PublicKey,
}

/// A token account the owner holds, as reported by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAccountInfo {
    pub public_key: PublicKey,
    /// `None` when the balance has not been resolved.
    pub balance: Option<Quarks>,
    pub close_authority: Option<PublicKey>,
}

/// A token transfer found inside a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOperation {
    pub source: PublicKey,
    pub destination: PublicKey,
    pub amount: Quarks,
}
