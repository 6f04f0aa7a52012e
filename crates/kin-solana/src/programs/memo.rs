//! The memo program: attaches arbitrary bytes to a transaction.

use crate::instruction::Instruction;
use crate::key::PublicKey;

/// `Memo1UhkJRfHyvLMcVucJwxXeuD728EqVDDwQDxFMNo`
pub const MEMO_PROGRAM_ID: PublicKey = PublicKey::new([
    5, 74, 83, 80, 248, 93, 200, 130, 214, 20, 165, 86, 114, 120, 138, 41, 109, 223, 30, 171, 171,
    208, 166, 6, 120, 136, 73, 50, 244, 238, 246, 160,
]);

/// A memo instruction carrying `data` verbatim. It references no accounts.
pub fn memo(data: impl Into<Vec<u8>>) -> Instruction {
    Instruction::new(MEMO_PROGRAM_ID, Vec::new(), data.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memo_program_address() {
        assert_eq!(
            MEMO_PROGRAM_ID.to_base58(),
            "Memo1UhkJRfHyvLMcVucJwxXeuD728EqVDDwQDxFMNo"
        );
    }

    #[test]
    fn memo_has_no_accounts() {
        let ix = memo("1-kek-hello");
        assert!(ix.accounts.is_empty());
        assert_eq!(ix.program_id, MEMO_PROGRAM_ID);
        assert_eq!(ix.data, b"1-kek-hello");
    }
}
