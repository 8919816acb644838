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
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A bill is recomputed on every basket edit. Float drift would make     │
//! │  the same basket print different totals.                               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (paise)                              │
//! │    ₹120.00 × 1/3 = 12000 paise × 1/3 = 4000 paise (exact)              │
//! │    Inexact fractions round to the nearest paisa, explicitly            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use supermart_core::money::Money;
//! use supermart_core::types::Fraction;
//!
//! let price = Money::from_major(120);       // ₹120.00
//! let line = price * 3;                      // ₹360.00
//! let third = line.mul_fraction(Fraction::new(1, 3).unwrap());
//! assert_eq!(third, Money::from_major(120));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::{Fraction, Percent};

/// Minor units per major unit (100 paise = ₹1).
pub const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction of savings and discounts stays closed
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: serialized as a plain integer
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► ItemPricing.gross_line_cost ──► Bill.sub_total
///                   ItemPricing.item_savings    ──► Bill.savings_from_offers
///                                                   Bill.coupon_discount
///                                                   Bill.grand_total
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units (paise).
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole major units (rupees).
    ///
    /// ```rust
    /// use supermart_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(40).minor(), 4000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * MINOR_PER_MAJOR)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the whole major-unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor-unit portion (always 0-99).
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

    /// Multiplies money by a basket quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Cheese (200g) ₹90.00
    /// Quantity: 3
    ///      │
    ///      ▼
    /// multiply_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Gross line cost: ₹270.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Multiplies by a quantity, returning `None` on overflow.
    #[inline]
    pub const fn checked_mul_quantity(&self, qty: u32) -> Option<Self> {
        match self.0.checked_mul(qty as i64) {
            Some(value) => Some(Money(value)),
            None => None,
        }
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(value) => Some(Money(value)),
            None => None,
        }
    }

    /// Adds two amounts, clamping at the `i64` bounds.
    #[inline]
    pub const fn saturating_add(&self, other: Money) -> Self {
        Money(self.0.saturating_add(other.0))
    }

    /// Multiplies by a fraction, rounding to the nearest minor unit.
    ///
    /// Halves round away from zero. Since a [`Fraction`] never exceeds one,
    /// the result never exceeds `self` in magnitude.
    ///
    /// ```rust
    /// use supermart_core::money::Money;
    /// use supermart_core::types::Fraction;
    ///
    /// let bread = Money::from_major(40);
    /// assert_eq!(bread.mul_fraction(Fraction::HALF), Money::from_major(20));
    ///
    /// // 1000 paise / 3 = 333.33 → 333
    /// let odd = Money::from_minor(1000);
    /// assert_eq!(odd.mul_fraction(Fraction::new(1, 3).unwrap()).minor(), 333);
    /// ```
    pub fn mul_fraction(&self, fraction: Fraction) -> Money {
        let scaled = self.0 as i128 * fraction.numerator() as i128;
        Money(round_div(scaled, fraction.denominator() as i128) as i64)
    }

    /// Returns `percent`% of this amount, rounded to the nearest minor unit.
    ///
    /// ## Example
    /// ```rust
    /// use supermart_core::money::Money;
    /// use supermart_core::types::Percent;
    ///
    /// let total = Money::from_major(350);
    /// let discount = total.percentage(Percent::new(10).unwrap());
    /// assert_eq!(discount, Money::from_major(35));
    /// ```
    pub fn percentage(&self, percent: Percent) -> Money {
        let scaled = self.0 as i128 * percent.value() as i128;
        Money(round_div(scaled, 100) as i64)
    }

    /// Formats the amount with a currency symbol, e.g. `₹12.50`.
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.major().abs(),
            self.minor_part()
        )
    }
}

/// Integer division rounding half away from zero. `denominator` must be > 0.
fn round_div(numerator: i128, denominator: i128) -> i128 {
    let magnitude = (numerator.abs() * 2 + denominator) / (denominator * 2);
    if numerator < 0 {
        -magnitude
    } else {
        magnitude
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money with the rupee symbol.
///
/// ## Note
/// For debugging and the terminal receipt. Other front ends should use
/// [`Money::format_with`] with their configured symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("₹"))
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

/// Multiplication by a basket quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
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
