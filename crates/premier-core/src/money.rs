//! # Money Module
//!
//! Provides the `Money` type for prices and booking totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Parsing "$2999" into a float and multiplying by guests works until     │
//! │  a price carries cents:                                                 │
//! │    19.99 × 3 = 59.97000000000001  ❌                                    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1999 cents × 3 = 5997 cents, always                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use premier_core::money::Money;
//!
//! let price = Money::from_major_minor(2999, 0); // $2,999.00
//! let total = price.multiply_quantity(2);
//! assert_eq!(total.cents(), 599_800);
//! assert_eq!(total.format_whole(), "$5,998");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Where Money is Used
/// ```text
/// Service.price_from ──┐
///                      ├──► Offer.unit_price ──► compute_total(price, guests)
/// Package.price ───────┘                              │
///                                                     ▼
///                                     BookingView.total ("$8,997")
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use premier_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -$5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
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

    /// Multiplies money by a quantity (guests, nights, ...).
    ///
    /// ```rust
    /// use premier_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Formats with thousands separators, dropping the cents when they are
    /// zero. This is how prices are written on the page ("$2,999").
    ///
    /// ```rust
    /// use premier_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(8997, 0).format_whole(), "$8,997");
    /// assert_eq!(Money::from_cents(1999).format_whole(), "$19.99");
    /// ```
    pub fn format_whole(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let dollars = group_thousands(self.dollars().unsigned_abs());
        if self.cents_part() == 0 {
            format!("{sign}${dollars}")
        } else {
            format!("{sign}${dollars}.{:02}", self.cents_part())
        }
    }
}

/// Inserts `,` every three digits, like `toLocaleString` in en-US.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-style display ("$10.99"). Views use [`Money::format_whole`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// `price * guests`, same as [`Money::multiply_quantity`].
impl Mul<i64> for Money {
    type Output = Self;

    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(2999, 0).cents(), 299_900);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_format_whole() {
        assert_eq!(Money::from_major_minor(299, 0).format_whole(), "$299");
        assert_eq!(Money::from_major_minor(23450, 0).format_whole(), "$23,450");
        assert_eq!(Money::from_major_minor(1_000_000, 5).format_whole(), "$1,000,000.05");
        assert_eq!(Money::from_major_minor(-1500, 0).format_whole(), "-$1,500");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(15420), "15,420");
        assert_eq!(group_thousands(123456789), "123,456,789");
    }

    #[test]
    fn test_multiply_quantity_has_no_drift() {
        let price = Money::from_cents(1999);
        assert_eq!(price.multiply_quantity(3).cents(), 5997);
        let result: Money = price * 3;
        assert_eq!(result, price.multiply_quantity(3));
    }
}
