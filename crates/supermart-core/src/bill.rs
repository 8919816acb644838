//! # Bill Aggregator
//!
//! Turns a basket snapshot into an itemized bill.
//!
//! ## Pricing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       compute_bill()                                    │
//! │                                                                         │
//! │  BasketLine[] ──► merge by product ──► QuantitySnapshot                 │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                                     OfferEngine::savings()              │
//! │                                              │                          │
//! │  for each line:                              ▼                          │
//! │    gross = price × qty          savings = bucket (capped at gross)      │
//! │    net   = gross − savings                                              │
//! │                                                                         │
//! │  sub_total ─ savings_from_offers ──► total_after_offers                 │
//! │                                              │                          │
//! │  coupon code? ──► find ──► total >= min? ──► coupon_discount            │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                                         grand_total                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The bill is a pure function of (lines, coupon code): nothing is cached and
//! nothing read is mutated, so the same input always prints the same bill.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::basket::{BasketLine, BasketSource};
use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::offers::{OfferEngine, QuantitySnapshot};
use crate::types::{Coupon, CouponCode, Product, ProductId};

// =============================================================================
// Bill Types
// =============================================================================

/// Pricing of one basket line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ItemPricing {
    pub product: Product,
    pub quantity: u32,
    /// `price × quantity`
    pub gross_line_cost: Money,
    /// Offer savings credited to this product, `0 <= savings <= gross`.
    pub item_savings: Money,
    /// `gross_line_cost − item_savings`
    pub net_line_cost: Money,
}

/// Why an entered coupon did not apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum InactiveReason {
    /// No coupon with this code exists.
    Unknown,
    /// The post-offer total is below the coupon's minimum spend.
    BelowMinimum {
        #[serde(rename = "minAmount")]
        min_amount: Money,
        shortfall: Money,
    },
}

/// Coupon outcome of a bill.
///
/// ## States
/// ```text
/// no code entered ──────────────────────────► NotEntered
/// code entered ──► unknown / below minimum ──► Inactive { code, reason }
///              └─► found and qualifying ─────► Applied { coupon }
/// ```
/// A front end tells "invalid or minimum not reached" apart from "nothing
/// entered" by matching on this enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum CouponStatus {
    NotEntered,
    Inactive {
        code: CouponCode,
        reason: InactiveReason,
    },
    Applied {
        coupon: Coupon,
    },
}

/// The final itemized bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Bill {
    pub lines: Vec<ItemPricing>,
    /// Σ gross line costs.
    pub sub_total: Money,
    /// Σ item savings.
    pub savings_from_offers: Money,
    /// `sub_total − savings_from_offers`
    pub total_after_offers: Money,
    /// Zero unless a coupon is applied.
    pub coupon_discount: Money,
    /// `total_after_offers − coupon_discount`
    pub grand_total: Money,
    pub coupon: CouponStatus,
}

impl Bill {
    /// The coupon that was applied, if any.
    pub fn applied_coupon(&self) -> Option<&Coupon> {
        match &self.coupon {
            CouponStatus::Applied { coupon } => Some(coupon),
            _ => None,
        }
    }

    /// The code the customer entered, whether or not it applied.
    pub fn entered_code(&self) -> Option<&CouponCode> {
        match &self.coupon {
            CouponStatus::NotEntered => None,
            CouponStatus::Inactive { code, .. } => Some(code),
            CouponStatus::Applied { coupon } => Some(&coupon.code),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Pricing of a single product line.
    pub fn line(&self, product_id: &str) -> Option<&ItemPricing> {
        self.lines
            .iter()
            .find(|l| l.product.id.as_str() == product_id)
    }
}

// =============================================================================
// Pricing Engine
// =============================================================================

/// Catalog plus offers: everything needed to price a basket.
///
/// Holds only immutable data, so one engine can be shared across threads
/// and called reentrantly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingEngine {
    catalog: Catalog,
    offers: OfferEngine,
}

impl PricingEngine {
    /// Builds an engine, checking that every offer names catalog products.
    pub fn new(catalog: Catalog, offers: OfferEngine) -> CoreResult<Self> {
        offers.check_catalog(&catalog)?;
        Ok(PricingEngine { catalog, offers })
    }

    /// The standard SuperMart catalog and offers.
    pub fn standard() -> Self {
        PricingEngine {
            catalog: Catalog::standard(),
            offers: OfferEngine::standard(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn offers(&self) -> &OfferEngine {
        &self.offers
    }

    /// Prices a basket snapshot.
    pub fn compute_for<B>(&self, basket: &B) -> CoreResult<Bill>
    where
        B: BasketSource + ?Sized,
    {
        self.compute_bill(basket.lines(), basket.coupon_code())
    }

    /// Computes the full bill for basket lines and an optional coupon code.
    ///
    /// ## Line Handling
    /// - Lines for the same product are merged (first position kept)
    /// - Zero-quantity lines are dropped
    ///
    /// ## Errors
    /// `UnknownProduct` when a line names a product outside the catalog.
    /// `AmountOverflow` when a total does not fit in [`Money`].
    /// Unknown or non-qualifying coupons are not errors; see [`CouponStatus`].
    pub fn compute_bill(
        &self,
        lines: &[BasketLine],
        coupon_code: Option<&CouponCode>,
    ) -> CoreResult<Bill> {
        let merged = merge_lines(lines);
        let quantities: QuantitySnapshot = merged.iter().cloned().collect();
        let savings = self.offers.savings(&quantities, &self.catalog)?;

        let mut priced = Vec::with_capacity(merged.len());
        for (product_id, quantity) in merged {
            let product = self.catalog.get_product(product_id.as_str())?;
            let gross_line_cost = product
                .price
                .checked_mul_quantity(quantity)
                .ok_or(CoreError::AmountOverflow)?;
            let item_savings = savings
                .get(product_id.as_str())
                .clamp(Money::zero(), gross_line_cost.max(Money::zero()));
            priced.push(ItemPricing {
                product: product.clone(),
                quantity,
                gross_line_cost,
                item_savings,
                net_line_cost: gross_line_cost - item_savings,
            });
        }

        let sub_total = checked_sum(priced.iter().map(|l| l.gross_line_cost))?;
        let savings_from_offers = checked_sum(priced.iter().map(|l| l.item_savings))?;
        let total_after_offers = sub_total - savings_from_offers;

        let coupon = self.resolve_coupon(coupon_code, total_after_offers);
        let coupon_discount = match &coupon {
            CouponStatus::Applied { coupon } => coupon.discount_for(total_after_offers),
            _ => Money::zero(),
        };
        let grand_total = total_after_offers - coupon_discount;

        debug!(
            lines = priced.len(),
            sub_total = %sub_total,
            savings = %savings_from_offers,
            coupon_discount = %coupon_discount,
            grand_total = %grand_total,
            "Bill computed"
        );

        Ok(Bill {
            lines: priced,
            sub_total,
            savings_from_offers,
            total_after_offers,
            coupon_discount,
            grand_total,
            coupon,
        })
    }

    fn resolve_coupon(
        &self,
        code: Option<&CouponCode>,
        total_after_offers: Money,
    ) -> CouponStatus {
        let Some(code) = code else {
            return CouponStatus::NotEntered;
        };

        let Some(coupon) = self.catalog.find_coupon(code.as_str()) else {
            debug!(code = %code, "Coupon not found");
            return CouponStatus::Inactive {
                code: code.clone(),
                reason: InactiveReason::Unknown,
            };
        };

        if !coupon.qualifies(total_after_offers) {
            debug!(
                code = %code,
                min_amount = %coupon.min_amount,
                total = %total_after_offers,
                "Coupon below minimum spend"
            );
            return CouponStatus::Inactive {
                code: code.clone(),
                reason: InactiveReason::BelowMinimum {
                    min_amount: coupon.min_amount,
                    shortfall: coupon.min_amount - total_after_offers,
                },
            };
        }

        CouponStatus::Applied {
            coupon: coupon.clone(),
        }
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        PricingEngine::standard()
    }
}

/// Sums amounts, failing with `AmountOverflow` instead of wrapping.
fn checked_sum(mut amounts: impl Iterator<Item = Money>) -> CoreResult<Money> {
    amounts.try_fold(Money::zero(), |acc, amount| {
        acc.checked_add(amount).ok_or(CoreError::AmountOverflow)
    })
}

/// Merges lines by product, keeping first-seen order and dropping zeros.
fn merge_lines(lines: &[BasketLine]) -> Vec<(ProductId, u32)> {
    let mut merged: Vec<(ProductId, u32)> = Vec::with_capacity(lines.len());
    for line in lines.iter().filter(|l| l.quantity > 0) {
        match merged.iter_mut().find(|(id, _)| *id == line.product_id) {
            Some((_, qty)) => *qty = qty.saturating_add(line.quantity),
            None => merged.push((line.product_id.clone(), line.quantity)),
        }
    }
    merged
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basket::{Basket, BasketSnapshot};
    use crate::catalog::ids;
    use crate::offers::OfferRule;
    use crate::types::{Fraction, Percent};
    use crate::MAX_PRICE;
    use proptest::prelude::*;

    fn lines(items: &[(&str, u32)]) -> Vec<BasketLine> {
        items
            .iter()
            .map(|(id, qty)| BasketLine::new(*id, *qty))
            .collect()
    }

    fn bill(items: &[(&str, u32)], code: Option<&str>) -> Bill {
        let code = code.and_then(CouponCode::parse);
        PricingEngine::standard()
            .compute_bill(&lines(items), code.as_ref())
            .unwrap()
    }

    fn assert_invariants(bill: &Bill) {
        let gross: Money = bill.lines.iter().map(|l| l.gross_line_cost).sum();
        let saved: Money = bill.lines.iter().map(|l| l.item_savings).sum();
        assert_eq!(bill.sub_total, gross);
        assert_eq!(bill.savings_from_offers, saved);
        assert_eq!(bill.total_after_offers, bill.sub_total - bill.savings_from_offers);
        assert_eq!(bill.grand_total, bill.total_after_offers - bill.coupon_discount);
        assert!(!bill.grand_total.is_negative());
        for line in &bill.lines {
            assert!(!line.item_savings.is_negative());
            assert!(line.item_savings <= line.gross_line_cost);
            assert_eq!(line.net_line_cost, line.gross_line_cost - line.item_savings);
        }
        if bill.applied_coupon().is_none() {
            assert_eq!(bill.coupon_discount, Money::zero());
        }
    }

    #[test]
    fn test_scenario_empty_basket() {
        let bill = bill(&[], None);
        assert!(bill.is_empty());
        assert_eq!(bill.sub_total, Money::zero());
        assert_eq!(bill.savings_from_offers, Money::zero());
        assert_eq!(bill.total_after_offers, Money::zero());
        assert_eq!(bill.coupon_discount, Money::zero());
        assert_eq!(bill.grand_total, Money::zero());
        assert_eq!(bill.coupon, CouponStatus::NotEntered);
        assert!(bill.applied_coupon().is_none());
    }

    #[test]
    fn test_scenario_three_cheese() {
        let bill = bill(&[(ids::CHEESE, 3)], None);
        let cheese = bill.line(ids::CHEESE).unwrap();
        assert_eq!(cheese.gross_line_cost, Money::from_major(270));
        assert_eq!(cheese.item_savings, Money::from_major(90));
        assert_eq!(cheese.net_line_cost, Money::from_major(180));
        assert_invariants(&bill);
    }

    #[test]
    fn test_scenario_soup_and_bread() {
        let bill = bill(&[(ids::SOUP, 2), (ids::BREAD, 3)], None);

        let bread = bill.line(ids::BREAD).unwrap();
        assert_eq!(bread.gross_line_cost, Money::from_major(120));
        assert_eq!(bread.item_savings, Money::from_major(40));
        assert_eq!(bread.net_line_cost, Money::from_major(80));

        let soup = bill.line(ids::SOUP).unwrap();
        assert_eq!(soup.gross_line_cost, Money::from_major(100));
        assert_eq!(soup.item_savings, Money::zero());
        assert_eq!(soup.net_line_cost, Money::from_major(100));

        assert_eq!(bill.sub_total, Money::from_major(220));
        assert_eq!(bill.total_after_offers, Money::from_major(180));
        assert_invariants(&bill);
    }

    #[test]
    fn test_scenario_coupon_applied() {
        // 2 × Tea ₹160 + 1 × Milk ₹30 = ₹350, no offers
        let bill = bill(&[(ids::TEA, 2), (ids::MILK, 1)], Some("SAVE10"));
        assert_eq!(bill.total_after_offers, Money::from_major(350));
        assert_eq!(bill.coupon_discount, Money::from_major(35));
        assert_eq!(bill.grand_total, Money::from_major(315));
        assert_eq!(bill.applied_coupon().unwrap().code.as_str(), "SAVE10");
        assert_invariants(&bill);
    }

    #[test]
    fn test_scenario_coupon_below_minimum() {
        // 3 × Soup ₹50 = ₹150
        let bill = bill(&[(ids::SOUP, 3)], Some("SAVE10"));
        assert_eq!(bill.total_after_offers, Money::from_major(150));
        assert_eq!(bill.coupon_discount, Money::zero());
        assert_eq!(bill.grand_total, Money::from_major(150));
        assert!(bill.applied_coupon().is_none());
        assert_eq!(bill.entered_code().unwrap().as_str(), "SAVE10");
        assert_eq!(
            bill.coupon,
            CouponStatus::Inactive {
                code: CouponCode::parse("SAVE10").unwrap(),
                reason: InactiveReason::BelowMinimum {
                    min_amount: Money::from_major(300),
                    shortfall: Money::from_major(150),
                },
            }
        );
    }

    #[test]
    fn test_unknown_coupon_is_inactive_not_error() {
        let bill = bill(&[(ids::TEA, 5)], Some("free100"));
        assert_eq!(bill.coupon_discount, Money::zero());
        assert!(matches!(
            bill.coupon,
            CouponStatus::Inactive {
                reason: InactiveReason::Unknown,
                ..
            }
        ));
    }

    #[test]
    fn test_coupon_minimum_is_inclusive() {
        let catalog = Catalog::new(
            vec![
                Product::new("exact", "Exact", Money::from_major(300)),
                Product::new("under", "Under", Money::from_major(299)),
            ],
            vec![Coupon {
                code: CouponCode::parse("SAVE10").unwrap(),
                description: "10% off on bills above ₹300".to_string(),
                discount_percent: Percent::new(10).unwrap(),
                min_amount: Money::from_major(300),
            }],
        )
        .unwrap();
        let engine = PricingEngine::new(catalog, OfferEngine::new(vec![])).unwrap();
        let code = CouponCode::parse("SAVE10");

        let at_min = engine
            .compute_bill(&lines(&[("exact", 1)]), code.as_ref())
            .unwrap();
        assert!(at_min.applied_coupon().is_some());
        assert_eq!(at_min.coupon_discount, Money::from_major(30));

        let below = engine
            .compute_bill(&lines(&[("under", 1)]), code.as_ref())
            .unwrap();
        assert!(below.applied_coupon().is_none());
    }

    #[test]
    fn test_coupon_threshold_uses_post_offer_total() {
        // Butter 3 × ₹120 = ₹360 gross, ₹240 after a third off: below ₹300
        let save10 = bill(&[(ids::BUTTER, 3)], Some("SAVE10"));
        assert_eq!(save10.sub_total, Money::from_major(360));
        assert_eq!(save10.total_after_offers, Money::from_major(240));
        assert!(save10.applied_coupon().is_none());

        let welcome = bill(&[(ids::BUTTER, 3)], Some("welcome50"));
        assert_eq!(welcome.coupon_discount, Money::from_major(12));
        assert_eq!(welcome.grand_total, Money::from_major(228));
    }

    #[test]
    fn test_coupon_apply_remove_reapply() {
        let engine = PricingEngine::standard();
        let mut basket = Basket::new();
        basket
            .add_quantity(engine.catalog().get_product(ids::TEA).unwrap(), 3)
            .unwrap();

        basket.set_coupon(Some("SAVE10"));
        let first = engine.compute_for(&basket).unwrap();
        basket.set_coupon(None);
        let removed = engine.compute_for(&basket).unwrap();
        basket.set_coupon(Some("save10"));
        let again = engine.compute_for(&basket).unwrap();

        assert_eq!(first.coupon_discount, Money::from_major(48));
        assert_eq!(removed.coupon_discount, Money::zero());
        assert_eq!(removed.coupon, CouponStatus::NotEntered);
        assert_eq!(first, again);
    }

    #[test]
    fn test_line_order_does_not_change_totals() {
        let forward = bill(
            &[(ids::SOUP, 2), (ids::BREAD, 3), (ids::CHEESE, 2), (ids::BUTTER, 1)],
            Some("SAVE10"),
        );
        let backward = bill(
            &[(ids::BUTTER, 1), (ids::CHEESE, 2), (ids::BREAD, 3), (ids::SOUP, 2)],
            Some("SAVE10"),
        );
        assert_eq!(forward.sub_total, backward.sub_total);
        assert_eq!(forward.savings_from_offers, backward.savings_from_offers);
        assert_eq!(forward.grand_total, backward.grand_total);
        assert_eq!(forward.lines[0].product.id.as_str(), ids::SOUP);
        assert_eq!(backward.lines[0].product.id.as_str(), ids::BUTTER);
    }

    #[test]
    fn test_duplicate_and_zero_lines_are_normalized() {
        let bill = bill(&[(ids::CHEESE, 1), (ids::MILK, 0), (ids::CHEESE, 1)], None);
        assert_eq!(bill.lines.len(), 1);
        let cheese = bill.line(ids::CHEESE).unwrap();
        assert_eq!(cheese.quantity, 2);
        assert_eq!(cheese.item_savings, Money::from_major(90));
    }

    #[test]
    fn test_unknown_product_is_error() {
        let result = PricingEngine::standard().compute_bill(&lines(&[("caviar", 1)]), None);
        assert!(matches!(result, Err(CoreError::UnknownProduct(_))));
    }

    #[test]
    fn test_engine_rejects_offers_outside_catalog() {
        let catalog = Catalog::new(vec![Product::new("tea", "Tea", Money::from_major(1))], vec![])
            .unwrap();
        let result = PricingEngine::new(catalog, OfferEngine::standard());
        assert!(matches!(result, Err(CoreError::UnknownProduct(_))));
    }

    #[test]
    fn test_recomputation_is_identical() {
        let engine = PricingEngine::standard();
        let snapshot = BasketSnapshot::new(
            lines(&[(ids::BUTTER, 7), (ids::SOUP, 1), (ids::BREAD, 2)]),
            CouponCode::parse("WELCOME50"),
        );
        let a = engine.compute_for(&snapshot).unwrap();
        let b = engine.compute_for(&snapshot).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_bill_json_shape() {
        let bill = bill(&[(ids::SOUP, 3)], Some("SAVE10"));
        let json = serde_json::to_value(&bill).unwrap();
        assert_eq!(json["subTotal"], 15000);
        assert_eq!(json["coupon"]["status"], "inactive");
        assert_eq!(json["coupon"]["reason"]["kind"], "below_minimum");
        assert_eq!(json["lines"][0]["grossLineCost"], 15000);
    }

    fn huge_engine(products: usize) -> PricingEngine {
        let products = (0..products)
            .map(|i| {
                Product::new(format!("p{i}"), format!("Item {i}"), Money::from_minor(MAX_PRICE))
            })
            .collect();
        let catalog = Catalog::new(products, vec![]).unwrap();
        PricingEngine::new(catalog, OfferEngine::new(vec![])).unwrap()
    }

    #[test]
    fn test_max_price_at_max_quantity_is_priced() {
        let engine = huge_engine(1);
        let bill = engine
            .compute_bill(&[BasketLine::new("p0", u32::MAX)], None)
            .unwrap();
        let expected = Money::from_minor(MAX_PRICE * u32::MAX as i64);
        assert_eq!(bill.sub_total, expected);
        assert_eq!(bill.grand_total, expected);
        assert_invariants(&bill);
    }

    #[test]
    fn test_total_overflow_is_error_not_wrap() {
        let engine = huge_engine(300);
        let items: Vec<BasketLine> = (0..300)
            .map(|i| BasketLine::new(format!("p{i}"), u32::MAX))
            .collect();
        let result = engine.compute_bill(&items, None);
        assert!(matches!(result, Err(CoreError::AmountOverflow)));
    }

    #[test]
    fn test_merged_quantity_saturates_without_panic() {
        let engine = huge_engine(1);
        let bill = engine
            .compute_bill(
                &[BasketLine::new("p0", u32::MAX), BasketLine::new("p0", 5)],
                None,
            )
            .unwrap();
        assert_eq!(bill.lines[0].quantity, u32::MAX);
        assert_invariants(&bill);
    }

    const STANDARD_IDS: [&str; 9] = [
        ids::BREAD,
        ids::MILK,
        ids::CHEESE,
        ids::SOUP,
        ids::BUTTER,
        ids::RICE,
        ids::SUGAR,
        ids::TEA,
        ids::EGGS,
    ];

    proptest! {
        #[test]
        fn prop_bill_invariants_hold(
            quantities in proptest::collection::vec(0u32..60, 9),
            coupon in prop_oneof![
                Just(None),
                Just(Some("SAVE10")),
                Just(Some("WELCOME50")),
                Just(Some("BOGUS")),
            ],
        ) {
            let items: Vec<(&str, u32)> = STANDARD_IDS
                .iter()
                .copied()
                .zip(quantities.iter().copied())
                .collect();
            let forward = bill(&items, coupon);
            assert_invariants(&forward);

            let reversed: Vec<(&str, u32)> = items.iter().rev().copied().collect();
            let backward = bill(&reversed, coupon);
            prop_assert_eq!(forward.sub_total, backward.sub_total);
            prop_assert_eq!(forward.savings_from_offers, backward.savings_from_offers);
            prop_assert_eq!(forward.coupon_discount, backward.coupon_discount);
            prop_assert_eq!(forward.grand_total, backward.grand_total);
        }

        #[test]
        fn prop_invariants_hold_for_any_valid_catalog(
            priced in proptest::collection::vec((0i64..=MAX_PRICE, 0u32..60), 2..=9),
            discount in 0u8..=100,
            min_amount in 0i64..=MAX_PRICE,
            flat in proptest::option::of((0u32..=12, 1u32..=12)),
            bundle in proptest::option::of((0u32..=4, 1u32..=4)),
            bogo in any::<bool>(),
            with_coupon in any::<bool>(),
        ) {
            let products: Vec<Product> = priced
                .iter()
                .enumerate()
                .map(|(i, (price, _))| {
                    Product::new(format!("p{i}"), format!("Item {i}"), Money::from_minor(*price))
                })
                .collect();
            let coupon = Coupon {
                code: CouponCode::parse("ANY").unwrap(),
                description: "Randomized coupon".to_string(),
                discount_percent: Percent::new(discount).unwrap(),
                min_amount: Money::from_minor(min_amount),
            };
            let catalog = Catalog::new(products, vec![coupon]).unwrap();

            // Overlapping rules all credit p0.
            let mut rules = Vec::new();
            if bogo {
                rules.push(OfferRule::BuyOneGetOneFree { product: ProductId::new("p0") });
            }
            if let Some((n, d)) = flat {
                rules.push(OfferRule::FlatFraction {
                    product: ProductId::new("p0"),
                    fraction: Fraction::new(n.min(d), d).unwrap(),
                });
            }
            if let Some((n, d)) = bundle {
                rules.push(OfferRule::CrossBundle {
                    trigger: ProductId::new("p1"),
                    target: ProductId::new("p0"),
                    fraction: Fraction::new(n.min(d), d).unwrap(),
                });
            }
            let engine = PricingEngine::new(catalog, OfferEngine::new(rules)).unwrap();

            let items: Vec<BasketLine> = priced
                .iter()
                .enumerate()
                .map(|(i, (_, qty))| BasketLine::new(format!("p{i}"), *qty))
                .collect();
            let code = if with_coupon { CouponCode::parse("any") } else { None };

            let first = engine.compute_bill(&items, code.as_ref()).unwrap();
            assert_invariants(&first);
            prop_assert!(!first.grand_total.is_negative());
            prop_assert!(first.coupon_discount <= first.total_after_offers);

            let again = engine.compute_bill(&items, code.as_ref()).unwrap();
            prop_assert_eq!(&first, &again);

            let removed = engine.compute_bill(&items, None).unwrap();
            assert_invariants(&removed);
            prop_assert_eq!(removed.coupon_discount, Money::zero());
            prop_assert_eq!(removed.total_after_offers, first.total_after_offers);

            let reapplied = engine.compute_bill(&items, code.as_ref()).unwrap();
            prop_assert_eq!(&first, &reapplied);
        }
    }
}
