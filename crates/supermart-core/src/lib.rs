//! # supermart-core: Pure Pricing Logic for SuperMart Billing
//!
//! This crate is the **heart** of SuperMart Billing. It turns a basket of
//! product quantities and an optional coupon code into an itemized bill, as
//! pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     SuperMart Billing Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             Front end (supermart-cli, web screen)               │   │
//! │  │    Product list ──► Basket edits ──► Coupon ──► Print bill      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ BasketSnapshot                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ supermart-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐       │   │
//! │  │   │ catalog  │  │  offers  │  │   bill   │  │  basket  │       │   │
//! │  │   │ Product  │  │ OfferRule│  │   Bill   │  │  Basket  │       │   │
//! │  │   │ Coupon   │  │ Savings  │  │  Engine  │  │ Snapshot │       │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────┘       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • DETERMINISTIC                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Reference types (Product, Coupon, Percent, Fraction)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Products and coupons, lookups
//! - [`offers`] - Offer rule descriptors and the offer engine
//! - [`bill`] - Bill aggregation and coupon application
//! - [`basket`] - Basket store and immutable snapshots
//! - [`validation`] - Reference data and input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use supermart_core::{Basket, Money, PricingEngine};
//! use supermart_core::catalog::ids;
//!
//! let engine = PricingEngine::standard();
//! let mut basket = Basket::new();
//!
//! let cheese = engine.catalog().get_product(ids::CHEESE).unwrap();
//! basket.add_quantity(cheese, 3).unwrap();
//!
//! let bill = engine.compute_for(&basket.snapshot()).unwrap();
//! // Buy one get one free: pay for 2 of 3
//! assert_eq!(bill.savings_from_offers, Money::from_major(90));
//! assert_eq!(bill.grand_total, Money::from_major(180));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod basket;
pub mod bill;
pub mod catalog;
pub mod error;
pub mod money;
pub mod offers;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use basket::{Basket, BasketLine, BasketSnapshot, BasketSource, SharedBasket};
pub use bill::{Bill, CouponStatus, InactiveReason, ItemPricing, PricingEngine};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use offers::{OfferEngine, OfferRule, OfferSavings, QuantitySnapshot};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single basket.
pub const MAX_BASKET_LINES: usize = 100;

/// Maximum quantity of a single product in a basket.
///
/// ## Business Reason
/// Catches slips like typing 1000 instead of 10 at the till.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Maximum unit price in minor units (₹1,00,000.00).
///
/// `MAX_PRICE × u32::MAX` stays far inside `i64`, so a single line cost
/// never overflows. Totals across lines are still summed with checked
/// arithmetic.
pub const MAX_PRICE: i64 = 10_000_000;
