use kin_solana::SolanaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KinError {
    #[error("transaction error: {0}")]
    Solana(#[from] SolanaError),

    #[error("invalid magic byte indicator {0}: valid range is [0, 4)")]
    InvalidMagicByte(u8),

    #[error("invalid memo version {0}: valid range is [0, 8)")]
    InvalidVersion(u8),

    #[error("invalid transfer type id {0}")]
    InvalidTypeId(u8),

    #[error("invalid memo length: expected 32 bytes, got {0}")]
    InvalidMemoLength(usize),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid service config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("no token accounts to merge")]
    NoTokenAccounts,

    #[error("payment has no recipients")]
    NoPayments,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_wraps_solana_error() {
        let err: KinError = SolanaError::NoValidBumpFound.into();
        assert_eq!(
            err.to_string(),
            "transaction error: no valid bump seed found for program address"
        );
    }

    #[test]
    fn display_invalid_magic_byte() {
        assert_eq!(
            KinError::InvalidMagicByte(4).to_string(),
            "invalid magic byte indicator 4: valid range is [0, 4)"
        );
    }

    #[test]
    fn display_invalid_type_id() {
        assert_eq!(
            KinError::InvalidTypeId(9).to_string(),
            "invalid transfer type id 9"
        );
    }

    #[test]
    fn display_invalid_amount() {
        let err = KinError::InvalidAmount("too many decimal places".into());
        assert_eq!(err.to_string(), "invalid amount: too many decimal places");
    }

    #[test]
    fn display_config_error() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: KinError = json_err.into();
        assert!(err.to_string().starts_with("invalid service config: "));
    }

    #[test]
    fn display_no_token_accounts() {
        assert_eq!(
            KinError::NoTokenAccounts.to_string(),
            "no token accounts to merge"
        );
    }

    #[test]
    fn display_no_payments() {
        assert_eq!(KinError::NoPayments.to_string(), "payment has no recipients");
    }
}
