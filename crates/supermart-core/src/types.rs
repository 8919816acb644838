//! # Domain Types
//!
//! Core reference types used throughout SuperMart Billing.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Coupon      │   │   CouponCode    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (ProductId) │   │  code           │   │  trimmed        │       │
//! │  │  name           │   │  description    │   │  UPPER-CASED    │       │
//! │  │  price (Money)  │   │  discount %     │   │  never empty    │       │
//! │  └─────────────────┘   │  min_amount     │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Percent      │   │    Fraction     │                             │
//! │  │  0..=100        │   │  n/d, n <= d    │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All of these are immutable reference data: defined once when the catalog
//! is built and never changed afterwards.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Percent
// =============================================================================

/// A whole-number percentage between 0 and 100 inclusive.
///
/// Coupons discount at most the full bill, which keeps grand totals
/// non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "u8")]
#[ts(export)]
pub struct Percent(pub(crate) u8);

impl Percent {
    /// Maximum percentage value.
    pub const MAX: u8 = 100;

    /// Creates a percentage, rejecting values above 100.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if value > Self::MAX {
            return Err(ValidationError::OutOfRange {
                field: "percent".to_string(),
                min: 0,
                max: Self::MAX as i64,
            });
        }
        Ok(Percent(value))
    }

    /// Returns the percentage as an integer (10 = 10%).
    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Percent {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Percent::new(value)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// Fraction
// =============================================================================

/// A discount fraction `numerator / denominator` in the range `[0, 1]`.
///
/// Exact rationals avoid the drift of `0.333…` when an offer takes a third
/// off a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "FractionRepr")]
#[ts(export)]
pub struct Fraction {
    numerator: u32,
    denominator: u32,
}

#[derive(Deserialize)]
struct FractionRepr {
    numerator: u32,
    denominator: u32,
}

impl Fraction {
    /// One half (50% off).
    pub const HALF: Fraction = Fraction {
        numerator: 1,
        denominator: 2,
    };

    /// One third.
    pub const ONE_THIRD: Fraction = Fraction {
        numerator: 1,
        denominator: 3,
    };

    /// Creates a fraction.
    ///
    /// ## Rules
    /// - `denominator` must be positive
    /// - `numerator <= denominator` (never more than the whole price)
    pub fn new(numerator: u32, denominator: u32) -> Result<Self, ValidationError> {
        if denominator == 0 {
            return Err(ValidationError::MustBePositive {
                field: "denominator".to_string(),
            });
        }
        if numerator > denominator {
            return Err(ValidationError::OutOfRange {
                field: "numerator".to_string(),
                min: 0,
                max: denominator as i64,
            });
        }
        Ok(Fraction {
            numerator,
            denominator,
        })
    }

    #[inline]
    pub const fn numerator(&self) -> u32 {
        self.numerator
    }

    #[inline]
    pub const fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Approximate percentage for display ("33%" for one third).
    pub fn rounded_percent(&self) -> u32 {
        let numerator = u64::from(self.numerator);
        let denominator = u64::from(self.denominator);
        // n <= d keeps the quotient within 0..=100
        ((numerator * 100 + denominator / 2) / denominator) as u32
    }
}

impl TryFrom<FractionRepr> for Fraction {
    type Error = ValidationError;

    fn try_from(repr: FractionRepr) -> Result<Self, Self::Error> {
        Fraction::new(repr.numerator, repr.denominator)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

// =============================================================================
// Product
// =============================================================================

/// Stable product identifier, e.g. `"cheese"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        ProductId(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId::new(id)
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique, stable identifier.
    pub id: ProductId,

    /// Display name shown on the bill.
    pub name: String,

    /// Unit price.
    pub price: Money,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        Product {
            id: ProductId::new(id),
            name: name.into(),
            price,
        }
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// A canonical coupon code: trimmed and upper-cased, never empty.
///
/// ## Canonicalization
/// ```text
/// "  save10 " ──► parse() ──► Some("SAVE10")
/// "   "       ──► parse() ──► None   (no coupon entered)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "String")]
#[ts(export)]
pub struct CouponCode(pub(crate) String);

impl CouponCode {
    /// Canonicalizes user input. Blank input means "no coupon".
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(CouponCode(trimmed.to_uppercase()))
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CouponCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CouponCode::parse(&value).ok_or_else(|| ValidationError::Required {
            field: "coupon code".to_string(),
        })
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A percentage coupon with a minimum-spend threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Coupon {
    pub code: CouponCode,
    pub description: String,
    pub discount_percent: Percent,
    /// Minimum post-offer total for the coupon to apply (inclusive).
    pub min_amount: Money,
}

impl Coupon {
    /// Whether a post-offer total reaches the minimum spend.
    #[inline]
    pub fn qualifies(&self, total_after_offers: Money) -> bool {
        total_after_offers >= self.min_amount
    }

    /// Discount this coupon grants on a qualifying total.
    #[inline]
    pub fn discount_for(&self, total_after_offers: Money) -> Money {
        total_after_offers.percentage(self.discount_percent)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
