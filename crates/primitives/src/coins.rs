//! Coin amounts in nanotons.

use crate::constants::{NANO_PER_TON, TON_DECIMALS};
use crate::error::{PrimitiveError, PrimitiveResult};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An amount of TON expressed in nanotons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coins(u128);

impl Coins {
    /// Zero coins.
    pub const ZERO: Coins = Coins(0);

    /// Wraps a nanoton amount.
    #[inline]
    #[must_use]
    pub const fn from_nano(nano: u128) -> Self {
        Self(nano)
    }

    /// Parses a TON-denominated decimal such as `"0.05"`.
    ///
    /// # Errors
    ///
    /// Fails for negative amounts, more than nine fractional digits and
    /// values that overflow `u128`.
    pub fn from_ton(ton: &str) -> PrimitiveResult<Self> {
        let value = Decimal::from_str(ton.trim())
            .map_err(|e| PrimitiveError::invalid_amount(format!("{ton}: {e}")))?;
        if value.is_sign_negative() && !value.is_zero() {
            return Err(PrimitiveError::invalid_amount(format!("{ton}: negative")));
        }
        if value.normalize().scale() > TON_DECIMALS {
            return Err(PrimitiveError::invalid_amount(format!(
                "{ton}: more than {TON_DECIMALS} decimal places"
            )));
        }

        let nano = value
            .checked_mul(Decimal::from(NANO_PER_TON as u64))
            .and_then(|nano| nano.to_u128())
            .ok_or_else(|| PrimitiveError::invalid_amount(format!("{ton}: out of range")))?;
        Ok(Self(nano))
    }

    /// Nanoton value.
    #[inline]
    #[must_use]
    pub const fn as_nano(&self) -> u128 {
        self.0
    }

    /// Returns `true` for a zero amount.
    #[inline]
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Sum, or `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Coins) -> Option<Coins> {
        match self.0.checked_add(other.0) {
            Some(sum) => Some(Coins(sum)),
            None => None,
        }
    }

    /// Difference, or `None` if `other` is larger.
    #[must_use]
    pub const fn checked_sub(self, other: Coins) -> Option<Coins> {
        match self.0.checked_sub(other.0) {
            Some(diff) => Some(Coins(diff)),
            None => None,
        }
    }
}

impl From<u128> for Coins {
    fn from(nano: u128) -> Self {
        Self(nano)
    }
}

impl FromStr for Coins {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ton(s)
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / NANO_PER_TON;
        let fraction = self.0 % NANO_PER_TON;
        if fraction == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{fraction:09}");
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ton() {
        assert_eq!(Coins::from_ton("0.05").unwrap().as_nano(), 50_000_000);
        assert_eq!(Coins::from_ton("1").unwrap().as_nano(), 1_000_000_000);
        assert_eq!(Coins::from_ton("0.000000001").unwrap().as_nano(), 1);
        assert_eq!(Coins::from_ton("0").unwrap(), Coins::ZERO);
    }

    #[test]
    fn test_from_ton_rejects() {
        assert!(Coins::from_ton("-1").is_err());
        assert!(Coins::from_ton("0.0000000001").is_err());
        assert!(Coins::from_ton("abc").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Coins::from_nano(50_000_000).to_string(), "0.05");
        assert_eq!(Coins::from_nano(2_000_000_000).to_string(), "2");
        assert_eq!(Coins::from_nano(1_500_000_001).to_string(), "1.500000001");
    }
}
