//! Well-known sysvar accounts.

use crate::key::PublicKey;

/// `SysvarRent111111111111111111111111111111111`
pub const RENT: PublicKey = PublicKey::new([
    6, 167, 213, 23, 25, 44, 92, 81, 33, 140, 201, 76, 61, 74, 241, 127, 88, 218, 238, 8, 155, 161,
    253, 68, 227, 219, 217, 138, 0, 0, 0, 0,
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rent_address() {
        assert_eq!(
            RENT.to_base58(),
            "SysvarRent111111111111111111111111111111111"
        );
    }
}
