//! # Money Module
//!
//! Provides the `Money` type for handling receipt amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    ceil() of a product that should be whole can jump by one            │
//! │    "6.49" + ... summed as floats may format differently than cents     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "10.00" → 1000 cents, 1000 / 500 = 2 exactly                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use receipt_core::money::Money;
//!
//! let price: Money = "12.25".parse().unwrap();
//! assert_eq!(price.cents(), 1225);
//! assert_eq!(price.to_string(), "12.25");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Money Type
// =============================================================================

/// A non-negative amount in cents, parsed from a `D+.DD` literal.
///
/// ## Where Money is Used
/// ```text
/// Item.price ──┬──► sum ──► formatted "35.35" ──► compared with total text
///              │
///              └──► R5: ceil(price × 0.2)
///
/// Receipt.total ──► R2 (round dollar), R3 (multiple of 0.25)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    ///
    /// ## Example
    /// ```rust
    /// use receipt_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(3535).cents_part(), 35);
    /// assert_eq!(Money::from_cents(900).cents_part(), 0);
    /// ```
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// True when the amount has no cents (e.g. `9.00`).
    #[inline]
    pub const fn is_round_dollar(&self) -> bool {
        self.0 % 100 == 0
    }

    /// True when the amount is an exact multiple of 0.25.
    #[inline]
    pub const fn is_multiple_of_quarter(&self) -> bool {
        self.0 % 25 == 0
    }

    /// Adds two amounts, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use receipt_core::money::Money;
    ///
    /// assert_eq!(
    ///     Money::from_cents(649).checked_add(Money::from_cents(1225)),
    ///     Some(Money::from_cents(1874))
    /// );
    /// assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    /// ```
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Returns `ceil(amount × 0.2)` as a whole number, computed exactly.
    ///
    /// `amount × 0.2 = cents / 500`, so the ceiling is an integer division
    /// rounded toward positive infinity.
    ///
    /// ## Example
    /// ```rust
    /// use receipt_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1225).fifth_rounded_up(), 3); // 2.45 → 3
    /// assert_eq!(Money::from_cents(1000).fifth_rounded_up(), 2); // 2.00 → 2
    /// assert_eq!(Money::from_cents(0).fifth_rounded_up(), 0);
    /// ```
    pub fn fifth_rounded_up(&self) -> i64 {
        let quotient = self.0.div_euclid(500);
        if self.0.rem_euclid(500) == 0 {
            quotient
        } else {
            quotient + 1
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// A price or total literal that is not `digits.dd`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid amount literal '{0}'")]
pub struct ParseMoneyError(String);

/// Parses `D+.DD` (one or more digits, a dot, exactly two digits).
///
/// Signs, thousands separators, currency symbols and any other number of
/// fractional digits are rejected.
impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMoneyError(s.to_string());

        let (whole, frac) = s.split_once('.').ok_or_else(err)?;
        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

        if !all_digits(whole) || !all_digits(frac) || frac.len() != 2 {
            return Err(err());
        }

        let dollars: i64 = whole.parse().map_err(|_| err())?;
        let cents: i64 = frac.parse().map_err(|_| err())?;

        dollars
            .checked_mul(100)
            .and_then(|d| d.checked_add(cents))
            .map(Money)
            .ok_or_else(err)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Formats with exactly two fractional digits and no currency symbol,
/// matching the wire format of `price` and `total`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("6.49".parse::<Money>().unwrap().cents(), 649);
        assert_eq!("12.00".parse::<Money>().unwrap().cents(), 1200);
        assert_eq!("0.05".parse::<Money>().unwrap().cents(), 5);
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        let cases = [
            "", "12", "12.5", "35.350", "-1.00", "$1.00", "1,000.00", ".50", "1.ab", " 1.00",
        ];
        for bad in cases {
            assert!(bad.parse::<Money>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(3535).to_string(), "35.35");
        assert_eq!(Money::from_cents(900).to_string(), "9.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
    }

    #[test]
    fn test_sum() {
        let prices: Vec<Money> = ["6.49", "12.25", "1.26", "3.35", "12.00"]
            .iter()
            .map(|p| p.parse().unwrap())
            .collect();
        let total = prices
            .iter()
            .try_fold(Money::zero(), |acc, p| acc.checked_add(*p))
            .unwrap();
        assert_eq!(total.to_string(), "35.35");
    }

    #[test]
    fn test_round_and_quarter() {
        assert!(Money::from_cents(900).is_round_dollar());
        assert!(!Money::from_cents(901).is_round_dollar());
        assert!(Money::from_cents(925).is_multiple_of_quarter());
        assert!(Money::from_cents(900).is_multiple_of_quarter());
        assert!(!Money::from_cents(935).is_multiple_of_quarter());
    }

    /// The product is computed exactly: 10.00 × 0.2 is exactly 2.
    #[test]
    fn test_fifth_rounded_up_is_exact() {
        assert_eq!(Money::from_cents(1000).fifth_rounded_up(), 2);
        assert_eq!(Money::from_cents(1001).fifth_rounded_up(), 3);
        assert_eq!(Money::from_cents(1200).fifth_rounded_up(), 3); // 2.40
        assert_eq!(Money::from_cents(140).fifth_rounded_up(), 1); // 0.28
        assert_eq!(Money::from_cents(500).fifth_rounded_up(), 1);
    }
}
