//! # Money Module
//!
//! Provides the `Money` type for handling receipt amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With binary floats:                                                    │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    15.00 * 0.2 = 3.0000000000000004 → ceil() = 4 points  ❌ WRONG!      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "15.00" → 1500 cents                                                 │
//! │    ceil(1500 / 500) = 3 points                                          │
//! │    total % 25 == 0  → exact quarter check                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let price = Money::parse_decimal("1.50").unwrap();
//! assert_eq!(price.cents(), 150);
//!
//! let total = price.checked_add(Money::from_cents(75)).unwrap();
//! assert_eq!(total.to_decimal_string(), "2.25");
//! ```

use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: negative amounts can be parsed so the validator can
///   reject them with a precise reason instead of a parse failure
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized as a decimal string**: `"2.25"`, matching how receipts are
///   submitted
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  item.price ──┬──► sum of prices ──► compared with receipt.total        │
/// │               │                                                         │
/// │               └──► ceil(price * 0.2) description bonus                  │
/// │                                                                         │
/// │  receipt.total ──► whole-dollar bonus, quarter bonus                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

/// Errors produced while reading a decimal amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    /// The text is not a decimal number.
    #[error("'{0}' is not a decimal number")]
    NotANumber(String),

    /// The amount does not fit in i64 cents.
    #[error("'{0}' is out of range")]
    OutOfRange(String),

    /// The amount is below zero, even if it rounds to zero cents.
    #[error("'{0}' is negative")]
    Negative(String),
}

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a decimal amount, rounding to whole cents.
    ///
    /// ## Rules
    /// - Optional sign, digits, optional `.` and fraction digits
    /// - Surrounding whitespace is ignored
    /// - Fractions beyond two digits round half away from zero
    /// - Exponent forms (`1e2`) are read as floats, then rounded
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("6.49").unwrap().cents(), 649);
    /// assert_eq!(Money::parse_decimal("2.675").unwrap().cents(), 268);
    /// assert_eq!(Money::parse_decimal("-0.5").unwrap().cents(), -50);
    /// assert!(Money::parse_decimal("abc").is_err());
    /// ```
    pub fn parse_decimal(text: &str) -> Result<Money, MoneyParseError> {
        Self::parse_signed(text).map(|(amount, _)| amount)
    }

    /// Parses a decimal amount that must not be below zero.
    ///
    /// The sign is checked before rounding, so `-0.004` is rejected even
    /// though it rounds to zero cents. `-0` and `-0.00` are accepted.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::{Money, MoneyParseError};
    ///
    /// assert_eq!(Money::parse_non_negative("0.75").unwrap().cents(), 75);
    /// assert_eq!(Money::parse_non_negative("-0.00").unwrap().cents(), 0);
    /// assert!(matches!(
    ///     Money::parse_non_negative("-0.004"),
    ///     Err(MoneyParseError::Negative(_))
    /// ));
    /// ```
    pub fn parse_non_negative(text: &str) -> Result<Money, MoneyParseError> {
        match Self::parse_signed(text)? {
            (_, true) => Err(MoneyParseError::Negative(text.to_string())),
            (amount, false) => Ok(amount),
        }
    }

    /// Parses a decimal amount and reports whether the unrounded value is
    /// below zero.
    fn parse_signed(text: &str) -> Result<(Money, bool), MoneyParseError> {
        let raw = text.trim();
        let not_a_number = || MoneyParseError::NotANumber(text.to_string());
        let out_of_range = || MoneyParseError::OutOfRange(text.to_string());

        if raw.contains(['e', 'E']) {
            let value: f64 = raw.parse().map_err(|_| not_a_number())?;
            let amount = Money::from_f64(value).ok_or_else(out_of_range)?;
            return Ok((amount, value < 0.0));
        }

        let (negative, unsigned) = match raw.as_bytes().first() {
            Some(b'-') => (true, &raw[1..]),
            Some(b'+') => (false, &raw[1..]),
            _ => (false, raw),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(not_a_number());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(not_a_number());
        }

        let mut cents: i64 = 0;
        for digit in whole.bytes() {
            cents = cents
                .checked_mul(10)
                .and_then(|c| c.checked_add(i64::from(digit - b'0')))
                .ok_or_else(out_of_range)?;
        }
        cents = cents.checked_mul(100).ok_or_else(out_of_range)?;

        let mut digits = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().is_some_and(|d| d >= 5);

        cents = cents
            .checked_add(tenths * 10 + hundredths + i64::from(round_up))
            .ok_or_else(out_of_range)?;

        let below_zero = negative && unsigned.bytes().any(|b| matches!(b, b'1'..=b'9'));
        Ok((Money(if negative { -cents } else { cents }), below_zero))
    }

    /// Converts a float amount to cents, rounding half away from zero.
    ///
    /// Returns `None` for NaN, infinities, and values outside the i64 range.
    pub fn from_f64(value: f64) -> Option<Money> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the amount has no cents (e.g. `$35.00`).
    #[inline]
    pub const fn is_whole_dollar(&self) -> bool {
        self.0 % 100 == 0
    }

    /// Checks if the amount is an exact multiple of `step` cents.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert!(Money::from_cents(225).is_multiple_of(25));
    /// assert!(!Money::from_cents(230).is_multiple_of(25));
    /// ```
    #[inline]
    pub const fn is_multiple_of(&self, step: i64) -> bool {
        step != 0 && self.0 % step == 0
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Formats the amount as a plain decimal with two fraction digits.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(225).to_decimal_string(), "2.25");
    /// assert_eq!(Money::from_cents(-5).to_decimal_string(), "-0.05");
    /// ```
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}.{:02}",
            sign,
            self.dollars().unsigned_abs(),
            self.cents_part()
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$2.25` (for logs and error messages).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().unsigned_abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
