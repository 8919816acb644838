//! # Offer Engine
//!
//! Automatic, rule-based promotions evaluated against basket quantities.
//!
//! ## Rule Descriptors
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OfferRule                          Savings (credited to)               │
//! │  ─────────────────────────────────  ──────────────────────────────────  │
//! │  BuyOneGetOneFree { product }       q×price − ceil(q/2)×price (product) │
//! │  CrossBundle { trigger, target,     min(qT, qG) × targetPrice × frac    │
//! │                fraction }           (target, never trigger)             │
//! │  FlatFraction { product, fraction } q × price × frac (product)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rule reads the same [`QuantitySnapshot`] and nothing else: no rule
//! looks at another rule's result or at the money totals of other products.
//! Adding an offer means adding a descriptor; the bill aggregator does not
//! change.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;
use ts_rs::TS;

use crate::catalog::{ids, Catalog};
use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{Fraction, ProductId};

// =============================================================================
// Quantity Snapshot
// =============================================================================

/// Quantity per product, read once from a basket.
///
/// Repeated lines for the same product are summed (saturating at
/// `u32::MAX`), so the snapshot does not depend on line order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuantitySnapshot {
    quantities: BTreeMap<ProductId, u32>,
}

impl QuantitySnapshot {
    /// Quantity of a product; zero when absent.
    pub fn quantity(&self, id: &str) -> u32 {
        self.quantities.get(id).copied().unwrap_or(0)
    }
}

impl FromIterator<(ProductId, u32)> for QuantitySnapshot {
    fn from_iter<I: IntoIterator<Item = (ProductId, u32)>>(iter: I) -> Self {
        let mut quantities = BTreeMap::new();
        for (id, qty) in iter {
            let total = quantities.entry(id).or_insert(0u32);
            *total = total.saturating_add(qty);
        }
        QuantitySnapshot { quantities }
    }
}

// =============================================================================
// Offer Rules
// =============================================================================

/// A single promotional rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum OfferRule {
    /// Every second unit of `product` is free.
    BuyOneGetOneFree { product: ProductId },

    /// Each unit of `trigger` discounts one unit of `target` by `fraction`.
    CrossBundle {
        trigger: ProductId,
        target: ProductId,
        fraction: Fraction,
    },

    /// `product` is always sold `fraction` off, no minimum quantity.
    FlatFraction {
        product: ProductId,
        fraction: Fraction,
    },
}

/// Savings one rule produced, and the product they belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSavings {
    pub product: ProductId,
    pub amount: Money,
}

impl OfferRule {
    /// The product whose line receives this rule's savings.
    pub fn beneficiary(&self) -> &ProductId {
        match self {
            OfferRule::BuyOneGetOneFree { product } => product,
            OfferRule::CrossBundle { target, .. } => target,
            OfferRule::FlatFraction { product, .. } => product,
        }
    }

    /// Every product the rule reads.
    pub fn products(&self) -> Vec<&ProductId> {
        match self {
            OfferRule::BuyOneGetOneFree { product } => vec![product],
            OfferRule::CrossBundle {
                trigger, target, ..
            } => vec![trigger, target],
            OfferRule::FlatFraction { product, .. } => vec![product],
        }
    }

    /// Computes this rule's savings for a quantity snapshot.
    ///
    /// ## Errors
    /// `UnknownProduct` if the rule names a product the catalog lacks.
    pub fn evaluate(
        &self,
        quantities: &QuantitySnapshot,
        catalog: &Catalog,
    ) -> CoreResult<RuleSavings> {
        let amount = match self {
            OfferRule::BuyOneGetOneFree { product } => {
                let price = catalog.get_product(product.as_str())?.price;
                let qty = quantities.quantity(product.as_str());
                let paid = qty.div_ceil(2);
                price * qty - price * paid
            }
            OfferRule::CrossBundle {
                trigger,
                target,
                fraction,
            } => {
                catalog.get_product(trigger.as_str())?;
                let price = catalog.get_product(target.as_str())?.price;
                let eligible = quantities
                    .quantity(trigger.as_str())
                    .min(quantities.quantity(target.as_str()));
                (price * eligible).mul_fraction(*fraction)
            }
            OfferRule::FlatFraction { product, fraction } => {
                let price = catalog.get_product(product.as_str())?.price;
                (price * quantities.quantity(product.as_str())).mul_fraction(*fraction)
            }
        };

        Ok(RuleSavings {
            product: self.beneficiary().clone(),
            amount,
        })
    }

    /// Human-readable offer line, e.g. for a receipt footer.
    pub fn describe(&self, catalog: &Catalog) -> CoreResult<String> {
        let text = match self {
            OfferRule::BuyOneGetOneFree { product } => {
                let name = &catalog.get_product(product.as_str())?.name;
                format!("Buy 1 {name}, get the 2nd {name} free.")
            }
            OfferRule::CrossBundle {
                trigger,
                target,
                fraction,
            } => {
                let trigger = &catalog.get_product(trigger.as_str())?.name;
                let target = &catalog.get_product(target.as_str())?.name;
                format!(
                    "Buy 1 {trigger} and get 1 {target} at {}% off.",
                    fraction.rounded_percent()
                )
            }
            OfferRule::FlatFraction { product, fraction } => {
                let name = &catalog.get_product(product.as_str())?.name;
                format!("Flat {}% off on {name}.", fraction.rounded_percent())
            }
        };
        Ok(text)
    }
}

// =============================================================================
// Offer Savings
// =============================================================================

/// Savings per product. Products without an offer read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferSavings {
    by_product: BTreeMap<ProductId, Money>,
}

impl OfferSavings {
    pub fn get(&self, id: &str) -> Money {
        self.by_product.get(id).copied().unwrap_or_default()
    }

    /// Credits savings to a product. Overlapping rules add up, saturating at
    /// the `Money` bounds; the bill clamps each line to its gross cost.
    fn credit(&mut self, savings: RuleSavings) {
        let total = self.by_product.entry(savings.product).or_default();
        *total = total.saturating_add(savings.amount);
    }
}

// =============================================================================
// Offer Engine
// =============================================================================

/// An ordered set of offer rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfferEngine {
    rules: Vec<OfferRule>,
}

impl OfferEngine {
    pub fn new(rules: Vec<OfferRule>) -> Self {
        OfferEngine { rules }
    }

    /// The SuperMart in-store offers.
    ///
    /// - Buy 1 Cheese, get the 2nd Cheese free
    /// - Buy 1 Soup, get 1 Bread at 50% off
    /// - Butter always a third off
    pub fn standard() -> Self {
        OfferEngine::new(vec![
            OfferRule::BuyOneGetOneFree {
                product: ProductId::new(ids::CHEESE),
            },
            OfferRule::CrossBundle {
                trigger: ProductId::new(ids::SOUP),
                target: ProductId::new(ids::BREAD),
                fraction: Fraction::HALF,
            },
            OfferRule::FlatFraction {
                product: ProductId::new(ids::BUTTER),
                fraction: Fraction::ONE_THIRD,
            },
        ])
    }

    pub fn rules(&self) -> &[OfferRule] {
        &self.rules
    }

    /// Checks that every product a rule names exists in the catalog.
    pub fn check_catalog(&self, catalog: &Catalog) -> CoreResult<()> {
        for rule in &self.rules {
            for product in rule.products() {
                catalog.get_product(product.as_str())?;
            }
        }
        Ok(())
    }

    /// Evaluates every rule independently against one snapshot.
    pub fn savings(
        &self,
        quantities: &QuantitySnapshot,
        catalog: &Catalog,
    ) -> CoreResult<OfferSavings> {
        let mut savings = OfferSavings::default();
        for rule in &self.rules {
            let result = rule.evaluate(quantities, catalog)?;
            trace!(product = %result.product, amount = %result.amount, "Offer evaluated");
            savings.credit(result);
        }
        Ok(savings)
    }
}

impl Default for OfferEngine {
    fn default() -> Self {
        OfferEngine::standard()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
