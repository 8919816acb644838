//! # Error Types
//!
//! Domain-specific error types for supermart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  supermart-core errors (this file)                                     │
//! │  ├── CoreError        - Contract violations and basket limits          │
//! │  └── ValidationError  - Catalog / input validation failures            │
//! │                                                                         │
//! │  supermart-cli errors (separate crate)                                 │
//! │  └── CliError         - What the terminal user sees                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → exit code              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! An unknown coupon code, or a known coupon on a bill below its minimum
//! spend, is a normal outcome. It shows up on the bill as
//! [`CouponStatus::Inactive`](crate::bill::CouponStatus::Inactive), never here.

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Core pricing and basket errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A product id is not part of the catalog.
    ///
    /// ## When This Occurs
    /// - A basket line references a product the catalog does not carry
    /// - An offer rule names a product missing from the catalog
    ///
    /// Both are upstream contract violations: the basket store only builds
    /// lines from catalog products.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    /// Product is not currently in the basket.
    #[error("Product {0} is not in the basket")]
    ProductNotInBasket(ProductId),

    /// Basket has exceeded maximum allowed distinct lines.
    #[error("Basket cannot have more than {max} lines")]
    BasketTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u64, max: u32 },

    /// A bill total does not fit in the money range.
    ///
    /// Only reachable with very large catalogs priced near `MAX_PRICE` and
    /// quantities far beyond what the basket store accepts.
    #[error("Amount exceeds the supported range")]
    AmountOverflow,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while building catalogs, coupons and offer fractions, and when a
/// basket edit carries a bad quantity.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. coupon code with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. two products with the same id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnknownProduct(ProductId::new("caviar"));
        assert_eq!(err.to_string(), "Unknown product: caviar");

        let err = CoreError::QuantityTooLarge {
            requested: 1000,
            max: 999,
        };
        assert_eq!(
            err.to_string(),
            "Quantity 1000 exceeds maximum allowed (999)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Duplicate {
            field: "coupon code".to_string(),
            value: "SAVE10".to_string(),
        };
        assert_eq!(err.to_string(), "coupon code 'SAVE10' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
