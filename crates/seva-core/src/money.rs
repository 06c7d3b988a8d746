//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    1000 * 0.09 = 90.00000000000001  ❌ then toFixed(2) everywhere       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    INR amounts are held in paise, USD amounts in cents.                 │
//! │    ₹1,000.00 = 100000 paise; 9% CGST = 9000 paise, exactly.            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Money` carries no currency of its own. The currency travels alongside it
//! on line items, carts and invoices, and [`crate::types::Currency::format`]
//! attaches the symbol for display.
//!
//! ## Usage
//! ```rust
//! use seva_core::money::Money;
//!
//! let price = Money::from_minor(50_050); // 500.50
//! let yearly = price * 12;               // 6006.00
//! assert_eq!(yearly.to_string(), "6006.00");
//!
//! // Amounts from settings records and forms are parsed exactly:
//! assert_eq!(Money::parse("1000.5").unwrap().minor_units(), 100_050);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::TaxRate;

/// Number of minor units in one major unit (paise per rupee, cents per dollar).
pub const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Two decimal places**: Both supported currencies (INR, USD) use 2
///
/// ## Where Money is Used
/// ```text
/// ServiceOffering.price_inr / price_usd
///        │
///        ▼
/// LineItem.base_price ──► compute_line_total (×1 or ×12)
///        │
///        ▼
/// subtotal ──► compute_tax ──► InvoiceTotals.total ──► GatewayOrder
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units (paise or cents).
    ///
    /// ## Example
    /// ```rust
    /// use seva_core::money::Money;
    ///
    /// let price = Money::from_minor(1099); // 10.99
    /// assert_eq!(price.minor_units(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole major units (rupees or dollars).
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * MINOR_PER_MAJOR)
    }

    /// Parses a decimal amount such as `"1000"`, `"1000.5"` or `"-12.30"`.
    ///
    /// ## Rules
    /// - Optional leading `-`
    /// - At most two fractional digits (amounts are never silently rounded)
    /// - Surrounding whitespace is ignored
    ///
    /// ## Example
    /// ```rust
    /// use seva_core::money::Money;
    ///
    /// assert_eq!(Money::parse("250").unwrap().minor_units(), 25_000);
    /// assert_eq!(Money::parse("0.05").unwrap().minor_units(), 5);
    /// assert!(Money::parse("1.005").is_err());
    /// assert!(Money::parse("abc").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Money, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("expected a decimal number"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected a decimal number"));
        }
        if fraction.len() > 2 {
            return Err(invalid("at most two decimal places are allowed"));
        }

        let major: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("amount is too large"))?
        };
        let minor: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid("expected a decimal number"))? * 10,
            _ => fraction.parse().map_err(|_| invalid("expected a decimal number"))?,
        };

        let magnitude = major
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|m| m.checked_add(minor))
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -magnitude } else { magnitude }))
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major_part(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Calculates tax at the given rate, rounded half-up to the minor unit.
    ///
    /// ## Rounding
    /// Invoices show exactly two decimals, and the tax printed on the invoice
    /// is the tax charged. Half-up rounding away from zero is applied to the
    /// magnitude, so a refund rounds symmetrically with the original sale.
    ///
    /// ## Implementation
    /// Integer math: `(|amount| * bps + 5000) / 10000`, sign restored after.
    ///
    /// ## Example
    /// ```rust
    /// use seva_core::money::Money;
    /// use seva_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_major(1000);
    /// let cgst = subtotal.calculate_tax(TaxRate::from_bps(900)); // 9%
    /// assert_eq!(cgst.minor_units(), 9000); // 90.00
    ///
    /// // 0.125 rounds up to 0.13
    /// let odd = Money::from_minor(250).calculate_tax(TaxRate::from_bps(500));
    /// assert_eq!(odd.minor_units(), 13);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 prevents overflow on large amounts
        let magnitude = (self.0.unsigned_abs() as i128 * rate.bps() as i128 + 5000) / 10000;
        let signed = if self.0 < 0 { -magnitude } else { magnitude };
        Money::from_minor(signed as i64)
    }

    /// Multiplies money by a whole count (billing periods, quantities).
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering without a currency symbol, e.g. `"1234.50"`.
///
/// Use [`crate::types::Currency::format`] for customer-facing text.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major_part().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
