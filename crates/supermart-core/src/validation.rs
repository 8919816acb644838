//! # Validation Module
//!
//! Input validation utilities for SuperMart Billing.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog construction                                         │
//! │  ├── Product names, prices, unique ids                                 │
//! │  └── Coupon codes, percents, minimum amounts                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Basket Store edits                                           │
//! │  └── Quantity limits, basket size                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing engine                                               │
//! │  └── Trusts the above; only unknown products are reported              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use supermart_core::validation::{validate_coupon_code, validate_quantity};
//!
//! validate_coupon_code("SAVE10").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_ITEM_QUANTITY, MAX_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted coupon code.
pub const MAX_COUPON_CODE_LEN: usize = 32;

/// Longest accepted product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product display name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a product id.
///
/// ## Rules
/// - Must not be empty
/// - Lowercase letters, digits, hyphens and underscores only
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "product id".to_string(),
            reason: "must contain only lowercase letters, digits, hyphens, and underscores"
                .to_string(),
        });
    }

    Ok(())
}

/// Validates a catalog coupon code (already canonicalized).
///
/// ## Rules
/// - 1 to 32 characters
/// - Uppercase ASCII letters and digits only
///
/// ## Example
/// ```rust
/// use supermart_core::validation::validate_coupon_code;
///
/// assert!(validate_coupon_code("WELCOME50").is_ok());
/// assert!(validate_coupon_code("save10").is_err());
/// assert!(validate_coupon_code("SAVE 10").is_err());
/// ```
pub fn validate_coupon_code(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "coupon code".to_string(),
        });
    }

    if code.len() > MAX_COUPON_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "coupon code".to_string(),
            max: MAX_COUPON_CODE_LEN,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return Err(ValidationError::InvalidFormat {
            field: "coupon code".to_string(),
            reason: "must contain only uppercase letters and digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity being added to a basket line.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY as i64,
        });
    }

    Ok(())
}

/// Validates a monetary amount from reference data (price, minimum spend).
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items, coupons without a minimum)
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a product unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Must not exceed MAX_PRICE (₹1,00,000.00)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    validate_amount("price", price)?;

    if price.minor() > MAX_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
