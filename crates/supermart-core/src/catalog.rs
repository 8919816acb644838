//! # Catalog
//!
//! Immutable product and coupon reference data.
//!
//! ## Standard SuperMart Catalog
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Products (INR)                      Coupons                            │
//! │  ─────────────────────────────       ─────────────────────────────────  │
//! │  bread    Bread            ₹40       SAVE10     10% off, min ₹300       │
//! │  milk     Milk (1L)        ₹30       WELCOME50   5% off, min ₹200       │
//! │  cheese   Cheese (200g)    ₹90                                          │
//! │  soup     Soup Packet      ₹50                                          │
//! │  butter   Butter (200g)   ₹120                                          │
//! │  rice     Rice (1kg)       ₹65                                          │
//! │  sugar    Sugar (1kg)      ₹45                                          │
//! │  tea      Tea (250g)      ₹160                                          │
//! │  eggs     Eggs (6 pcs)     ₹50                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A catalog is built once, validated, and then only read. Custom catalogs
//! (tests, other stores) go through [`Catalog::new`] or JSON deserialization,
//! which run the same validation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Coupon, CouponCode, Percent, Product, ProductId};
use crate::validation::{
    validate_amount, validate_coupon_code, validate_price, validate_product_id,
    validate_product_name,
};

/// Product ids of the standard catalog.
pub mod ids {
    pub const BREAD: &str = "bread";
    pub const MILK: &str = "milk";
    pub const CHEESE: &str = "cheese";
    pub const SOUP: &str = "soup";
    pub const BUTTER: &str = "butter";
    pub const RICE: &str = "rice";
    pub const SUGAR: &str = "sugar";
    pub const TEA: &str = "tea";
    pub const EGGS: &str = "eggs";
}

/// Products and coupons available at the till.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(try_from = "CatalogRepr")]
#[ts(export)]
pub struct Catalog {
    products: Vec<Product>,
    coupons: Vec<Coupon>,
}

#[derive(Deserialize)]
struct CatalogRepr {
    products: Vec<Product>,
    #[serde(default)]
    coupons: Vec<Coupon>,
}

impl TryFrom<CatalogRepr> for Catalog {
    type Error = CoreError;

    fn try_from(repr: CatalogRepr) -> Result<Self, Self::Error> {
        Catalog::new(repr.products, repr.coupons)
    }
}

impl Catalog {
    /// Builds a catalog from reference data.
    ///
    /// ## Rules
    /// - Product ids are valid and unique
    /// - Product names are present, prices within 0..=MAX_PRICE
    /// - Coupon codes are canonical and unique
    /// - Coupon descriptions are present, minimum amounts non-negative
    pub fn new(products: Vec<Product>, coupons: Vec<Coupon>) -> CoreResult<Self> {
        let mut seen_ids = HashSet::new();
        for product in &products {
            validate_product_id(product.id.as_str())?;
            validate_product_name(&product.name)?;
            validate_price(product.price)?;
            if !seen_ids.insert(product.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "product id".to_string(),
                    value: product.id.to_string(),
                }
                .into());
            }
        }

        let mut seen_codes = HashSet::new();
        for coupon in &coupons {
            validate_coupon_code(coupon.code.as_str())?;
            if coupon.description.trim().is_empty() {
                return Err(ValidationError::Required {
                    field: "coupon description".to_string(),
                }
                .into());
            }
            validate_amount("minimum amount", coupon.min_amount)?;
            if !seen_codes.insert(coupon.code.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "coupon code".to_string(),
                    value: coupon.code.to_string(),
                }
                .into());
            }
        }

        Ok(Catalog { products, coupons })
    }

    /// The built-in SuperMart catalog.
    pub fn standard() -> Self {
        let products = vec![
            Product::new(ids::BREAD, "Bread", Money::from_major(40)),
            Product::new(ids::MILK, "Milk (1L)", Money::from_major(30)),
            Product::new(ids::CHEESE, "Cheese (200g)", Money::from_major(90)),
            Product::new(ids::SOUP, "Soup Packet", Money::from_major(50)),
            Product::new(ids::BUTTER, "Butter (200g)", Money::from_major(120)),
            Product::new(ids::RICE, "Rice (1kg)", Money::from_major(65)),
            Product::new(ids::SUGAR, "Sugar (1kg)", Money::from_major(45)),
            Product::new(ids::TEA, "Tea (250g)", Money::from_major(160)),
            Product::new(ids::EGGS, "Eggs (6 pcs)", Money::from_major(50)),
        ];

        let coupons = vec![
            standard_coupon("SAVE10", "10% off on bills above ₹300", 10, 300),
            standard_coupon("WELCOME50", "Flat 5% off above ₹200", 5, 200),
        ];

        Catalog { products, coupons }
    }

    /// Looks up a product by id.
    ///
    /// ## Errors
    /// [`CoreError::UnknownProduct`] when the id is not in this catalog.
    pub fn get_product(&self, id: &str) -> CoreResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id.as_str() == id)
            .ok_or_else(|| CoreError::UnknownProduct(ProductId::new(id)))
    }

    /// Finds a coupon by user-entered code.
    ///
    /// The input is trimmed and upper-cased before an exact match. Unknown or
    /// blank codes simply return `None`.
    pub fn find_coupon(&self, code: &str) -> Option<&Coupon> {
        let code = CouponCode::parse(code)?;
        self.coupons.iter().find(|c| c.code == code)
    }

    /// Products in display order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Coupons in display order.
    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::standard()
    }
}

fn standard_coupon(code: &str, description: &str, percent: u8, min_major: i64) -> Coupon {
    Coupon {
        code: CouponCode(code.to_string()),
        description: description.to_string(),
        discount_percent: Percent(percent),
        min_amount: Money::from_major(min_major),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
