//! Instruction builders for the on-ledger programs the SDK talks to.
//!
//! Each builder only lays out accounts and data bytes; none of them
//! validates program business rules.

pub mod associated_token;
pub mod memo;
pub mod sysvar;
pub mod system;
pub mod token;
