//! # Basket Store
//!
//! Holds the mutable quantity-per-product state and the entered coupon code.
//! The pricing engine never sees the store itself, only a read-only
//! [`BasketSource`] (usually a [`BasketSnapshot`]).
//!
//! ## Basket Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Basket Store Operations                              │
//! │                                                                         │
//! │  Front-end Action        Store Method          State Change             │
//! │  ────────────────        ────────────          ────────────             │
//! │                                                                         │
//! │  Click "Add" ──────────► add() ──────────────► push line or qty += 1    │
//! │  Click "+" ────────────► increment() ────────► qty += 1                 │
//! │  Click "-" ────────────► decrement() ────────► qty -= 1, drop at 0      │
//! │  Click "Clear" ────────► clear() ────────────► no lines, no coupon      │
//! │  Click "Apply" ────────► set_coupon() ───────► canonical code or none   │
//! │                                                                         │
//! │  Every bill ───────────► snapshot() ─────────► (read only copy)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - One line per distinct product, in insertion (display) order
//! - Every line has quantity 1..=MAX_ITEM_QUANTITY; no zero lines are kept
//! - At most MAX_BASKET_LINES lines

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{CouponCode, Product, ProductId};
use crate::validation::validate_quantity;
use crate::{MAX_BASKET_LINES, MAX_ITEM_QUANTITY};

// =============================================================================
// Basket Line
// =============================================================================

/// One product and its quantity in the basket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BasketLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl BasketLine {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        BasketLine {
            product_id: ProductId::new(product_id),
            quantity,
        }
    }
}

// =============================================================================
// Read Boundary
// =============================================================================

/// Read-only view of a basket, consumed by the pricing engine.
pub trait BasketSource {
    /// Lines in display order. Order never changes computed totals.
    fn lines(&self) -> &[BasketLine];

    /// The entered coupon code, already canonicalized.
    fn coupon_code(&self) -> Option<&CouponCode>;
}

/// An owned, immutable copy of the basket at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BasketSnapshot {
    lines: Vec<BasketLine>,
    coupon_code: Option<CouponCode>,
}

impl BasketSnapshot {
    pub fn new(lines: Vec<BasketLine>, coupon_code: Option<CouponCode>) -> Self {
        BasketSnapshot { lines, coupon_code }
    }
}

impl BasketSource for BasketSnapshot {
    fn lines(&self) -> &[BasketLine] {
        &self.lines
    }

    fn coupon_code(&self) -> Option<&CouponCode> {
        self.coupon_code.as_ref()
    }
}

// =============================================================================
// Basket
// =============================================================================

/// The mutable basket store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Basket {
    lines: Vec<BasketLine>,
    coupon_code: Option<CouponCode>,
}

impl Basket {
    /// Creates a new empty basket with no coupon.
    pub fn new() -> Self {
        Basket::default()
    }

    /// Adds one unit of a catalog product.
    pub fn add(&mut self, product: &Product) -> CoreResult<()> {
        self.add_quantity(product, 1)
    }

    /// Adds `quantity` units of a catalog product.
    ///
    /// ## Behavior
    /// - Product already in basket: quantity increases
    /// - Product not in basket: appended as a new line
    ///
    /// ## Errors
    /// - `Validation` if `quantity` is zero or above the per-line maximum
    /// - `QuantityTooLarge` if the line would exceed the per-line maximum
    /// - `BasketTooLarge` if a new line would exceed the line limit
    pub fn add_quantity(&mut self, product: &Product, quantity: u32) -> CoreResult<()> {
        validate_quantity(quantity)?;
        debug!(product_id = %product.id, quantity, "Adding to basket");

        if let Some(line) = self.line_mut(product.id.as_str()) {
            let new_qty = line.quantity as u64 + quantity as u64;
            if new_qty > MAX_ITEM_QUANTITY as u64 {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            line.quantity = new_qty as u32;
            return Ok(());
        }

        if self.lines.len() >= MAX_BASKET_LINES {
            return Err(CoreError::BasketTooLarge {
                max: MAX_BASKET_LINES,
            });
        }

        self.lines.push(BasketLine {
            product_id: product.id.clone(),
            quantity,
        });
        Ok(())
    }

    /// Increases an existing line by one.
    pub fn increment(&mut self, product_id: &str) -> CoreResult<()> {
        debug!(product_id, "Incrementing basket line");
        let line = self
            .line_mut(product_id)
            .ok_or_else(|| CoreError::ProductNotInBasket(ProductId::new(product_id)))?;

        if line.quantity >= MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: line.quantity as u64 + 1,
                max: MAX_ITEM_QUANTITY,
            });
        }
        line.quantity += 1;
        Ok(())
    }

    /// Decreases a line by one, removing it when it reaches zero.
    pub fn decrement(&mut self, product_id: &str) -> CoreResult<()> {
        debug!(product_id, "Decrementing basket line");
        let index = self
            .position(product_id)
            .ok_or_else(|| CoreError::ProductNotInBasket(ProductId::new(product_id)))?;

        if self.lines[index].quantity <= 1 {
            self.lines.remove(index);
        } else {
            self.lines[index].quantity -= 1;
        }
        Ok(())
    }

    /// Removes a line entirely.
    pub fn remove(&mut self, product_id: &str) -> CoreResult<()> {
        let index = self
            .position(product_id)
            .ok_or_else(|| CoreError::ProductNotInBasket(ProductId::new(product_id)))?;
        self.lines.remove(index);
        Ok(())
    }

    /// Empties the basket and forgets the coupon.
    pub fn clear(&mut self) {
        debug!("Clearing basket");
        self.lines.clear();
        self.coupon_code = None;
    }

    /// Stores a coupon code. Blank input (or `None`) removes it.
    pub fn set_coupon(&mut self, input: Option<&str>) {
        self.coupon_code = input.and_then(CouponCode::parse);
        debug!(coupon = ?self.coupon_code, "Coupon code set");
    }

    /// Quantity of a product in the basket; zero when absent.
    pub fn quantity(&self, product_id: &str) -> u32 {
        self.lines
            .iter()
            .find(|l| l.product_id.as_str() == product_id)
            .map_or(0, |l| l.quantity)
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| l.quantity as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Copies the current state for pricing.
    pub fn snapshot(&self) -> BasketSnapshot {
        BasketSnapshot::new(self.lines.clone(), self.coupon_code.clone())
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|l| l.product_id.as_str() == product_id)
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut BasketLine> {
        self.lines
            .iter_mut()
            .find(|l| l.product_id.as_str() == product_id)
    }
}

impl BasketSource for Basket {
    fn lines(&self) -> &[BasketLine] {
        &self.lines
    }

    fn coupon_code(&self) -> Option<&CouponCode> {
        self.coupon_code.as_ref()
    }
}

// =============================================================================
// Shared Basket
// =============================================================================

/// Thread-safe basket handle for multi-threaded hosts.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<Basket>>`: edits are serialized, and [`snapshot`]
/// takes one lock so a bill always sees a consistent basket.
///
/// [`snapshot`]: SharedBasket::snapshot
#[derive(Debug, Clone, Default)]
pub struct SharedBasket {
    basket: Arc<Mutex<Basket>>,
}

impl SharedBasket {
    pub fn new() -> Self {
        SharedBasket::default()
    }

    /// Executes a function with read access to the basket.
    pub fn with_basket<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Basket) -> R,
    {
        let basket = self.basket.lock().unwrap_or_else(PoisonError::into_inner);
        f(&basket)
    }

    /// Executes a function with write access to the basket.
    ///
    /// ## Usage
    /// ```rust
    /// use supermart_core::basket::SharedBasket;
    /// use supermart_core::catalog::{ids, Catalog};
    ///
    /// let catalog = Catalog::standard();
    /// let shared = SharedBasket::new();
    /// let cheese = catalog.get_product(ids::CHEESE).unwrap();
    /// shared.with_basket_mut(|b| b.add(cheese)).unwrap();
    /// assert_eq!(shared.with_basket(|b| b.quantity(ids::CHEESE)), 1);
    /// ```
    pub fn with_basket_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Basket) -> R,
    {
        let mut basket = self.basket.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut basket)
    }

    /// Takes an atomic snapshot of the basket.
    pub fn snapshot(&self) -> BasketSnapshot {
        self.with_basket(Basket::snapshot)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
