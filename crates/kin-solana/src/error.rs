use thiserror::Error;

/// Errors raised while building, encoding, decoding or signing transactions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolanaError {
    #[error("malformed data: {0}")]
    MalformedData(String),

    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("account not in account list: {0}")]
    AccountNotInAccountList(String),

    #[error("too many signers: {provided} provided, {required} required")]
    TooManySigners { provided: usize, required: usize },

    #[error("inconsistent account list: {0}")]
    InconsistentAccountList(String),

    #[error("too many accounts: {0} exceeds the 256 addressable by a message")]
    TooManyAccounts(usize),

    #[error("max seeds exceeded: at most {max} seeds allowed", max = crate::pda::MAX_SEEDS)]
    MaxSeedsExceeded,

    #[error("max seed length exceeded: seeds are limited to {max} bytes", max = crate::pda::MAX_SEED_LEN)]
    MaxSeedLengthExceeded,

    #[error("provided seeds do not result in a valid program address")]
    InvalidSeeds,

    #[error("no valid bump seed found for program address")]
    NoValidBumpFound,

    #[error("signature verification failed: {0}")]
    SignatureVerification(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_malformed_data() {
        let err = SolanaError::MalformedData("truncated account keys".into());
        assert_eq!(err.to_string(), "malformed data: truncated account keys");
    }

    #[test]
    fn display_invalid_key_length() {
        let err = SolanaError::InvalidKeyLength {
            expected: 32,
            actual: 31,
        };
        assert_eq!(
            err.to_string(),
            "invalid key length: expected 32 bytes, got 31"
        );
    }

    #[test]
    fn display_account_not_in_account_list() {
        let err = SolanaError::AccountNotInAccountList("Account: 1111".into());
        assert_eq!(err.to_string(), "account not in account list: Account: 1111");
    }

    #[test]
    fn display_too_many_signers() {
        let err = SolanaError::TooManySigners {
            provided: 3,
            required: 2,
        };
        assert_eq!(
            err.to_string(),
            "too many signers: 3 provided, 2 required"
        );
    }

    #[test]
    fn display_seed_limits() {
        assert_eq!(
            SolanaError::MaxSeedsExceeded.to_string(),
            "max seeds exceeded: at most 16 seeds allowed"
        );
        assert_eq!(
            SolanaError::MaxSeedLengthExceeded.to_string(),
            "max seed length exceeded: seeds are limited to 32 bytes"
        );
    }

    #[test]
    fn display_no_valid_bump_found() {
        let err = SolanaError::NoValidBumpFound;
        assert_eq!(err.to_string(), "no valid bump seed found for program address");
    }

    #[test]
    fn error_trait_is_implemented() {
        let err: Box<dyn std::error::Error> =
            Box::new(SolanaError::InvalidAddress("test".into()));
        assert!(err.to_string().contains("test"));
    }

    #[test]
    fn debug_format_works() {
        let err = SolanaError::NoValidBumpFound;
        let debug = format!("{:?}", err);
        assert!(debug.contains("NoValidBumpFound"));
    }
}
