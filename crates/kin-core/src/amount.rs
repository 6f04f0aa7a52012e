//! Kin amounts.
//!
//! The ledger counts in quarks, the smallest indivisible unit:
//! 1 Kin = 100,000 quarks, so Kin amounts carry at most five decimals.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KinError;

pub const QUARKS_PER_KIN: u64 = 100_000;

/// Number of fractional Kin digits a quark amount can express.
const KIN_DECIMALS: usize = 5;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quarks(pub u64);

impl Quarks {
    pub const ZERO: Self = Self(0);

    pub fn from_kin(kin: u64) -> Result<Self, KinError> {
        kin.checked_mul(QUARKS_PER_KIN)
            .map(Self)
            .ok_or_else(|| KinError::InvalidAmount(format!("{kin} Kin overflows u64 quarks")))
    }

    /// Parse a decimal Kin amount such as `"12.5"` or `"0.00001"`.
    pub fn parse_kin(text: &str) -> Result<Self, KinError> {
        let invalid = |reason: &str| KinError::InvalidAmount(format!("{text:?}: {reason}"));

        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (text, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("empty amount"));
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected decimal digits"));
        }
        if fraction.len() > KIN_DECIMALS {
            return Err(invalid("more than 5 decimal places"));
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("amount too large"))?
        };
        let fraction: u64 = format!("{fraction:0<KIN_DECIMALS$}")
            .parse()
            .map_err(|_| invalid("expected decimal digits"))?;

        whole
            .checked_mul(QUARKS_PER_KIN)
            .and_then(|q| q.checked_add(fraction))
            .map(Self)
            .ok_or_else(|| invalid("amount too large"))
    }

    /// Whole-Kin text with trailing fractional zeros dropped.
    pub fn to_kin_string(&self) -> String {
        let whole = self.0 / QUARKS_PER_KIN;
        let fraction = self.0 % QUARKS_PER_KIN;
        if fraction == 0 {
            return whole.to_string();
        }
        let digits = format!("{fraction:0KIN_DECIMALS$}");
        format!("{whole}.{}", digits.trim_end_matches('0'))
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }
}

impl From<u64> for Quarks {
    fn from(quarks: u64) -> Self {
        Self(quarks)
    }
}

impl FromStr for Quarks {
    type Err = KinError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse_kin(text)
    }
}

impl fmt::Display for Quarks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Kin", self.to_kin_string())
    }
}
