//! # Receipt Rendering
//!
//! Formats a [`Bill`] as a fixed-width text receipt.
//!
//! ## Layout
//! ```text
//!             SuperMart Billing
//!             Currency: INR (₹)
//! ------------------------------------------
//! Cheese (200g)
//!   ₹90.00 × 3 = ₹270.00
//!   Offer savings                  ₹90.00
//!   Item total                    ₹180.00
//! ------------------------------------------
//! Sub total (before offers)        ₹270.00
//! Savings from offers             - ₹90.00
//! Total after offers               ₹180.00
//! ------------------------------------------
//! Coupon is invalid or minimum amount not reached.
//! Grand total                      ₹180.00
//! ------------------------------------------
//!      Thank you for shopping with us.
//! ```
//!
//! Offer and coupon rows only appear when they are non-zero.

use std::fmt;

use supermart_core::{Bill, CoreResult, CouponStatus, Money, PricingEngine};

use crate::config::StoreConfig;

/// Shown when a code was entered but did not apply.
pub const INACTIVE_COUPON_MESSAGE: &str = "Coupon is invalid or minimum amount not reached.";

/// Shown instead of lines for an empty basket.
pub const EMPTY_BASKET_MESSAGE: &str = "No items in the basket.";

/// A bill bound to the store configuration that prints it.
pub struct Receipt<'a> {
    config: &'a StoreConfig,
    bill: &'a Bill,
}

impl<'a> Receipt<'a> {
    pub fn new(config: &'a StoreConfig, bill: &'a Bill) -> Self {
        Receipt { config, bill }
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with(&self.config.currency_symbol)
    }

    fn rule(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "-".repeat(self.config.receipt_width))
    }

    fn centered(&self, f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
        let width = self.config.receipt_width;
        writeln!(f, "{:^width$}", text)
    }

    /// `label` left, `value` right-aligned to the receipt width.
    fn row(&self, f: &mut fmt::Formatter<'_>, label: &str, value: &str) -> fmt::Result {
        let gap = self
            .config
            .receipt_width
            .saturating_sub(label.chars().count())
            .max(value.chars().count() + 1);
        writeln!(f, "{label}{value:>gap$}")
    }

    fn header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.centered(f, &self.config.store_name)?;
        for line in &self.config.store_address {
            self.centered(f, line)?;
        }
        self.centered(
            f,
            &format!(
                "Currency: {} ({})",
                self.config.currency_code, self.config.currency_symbol
            ),
        )?;
        self.rule(f)
    }

    fn coupon_message(&self) -> Option<String> {
        match &self.bill.coupon {
            CouponStatus::NotEntered => None,
            CouponStatus::Inactive { .. } => Some(INACTIVE_COUPON_MESSAGE.to_string()),
            CouponStatus::Applied { coupon } => {
                Some(format!("Coupon {}: {}", coupon.code, coupon.description))
            }
        }
    }
}

impl fmt::Display for Receipt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.header(f)?;

        if self.bill.is_empty() {
            return writeln!(f, "{EMPTY_BASKET_MESSAGE}");
        }

        // Lines
        for line in &self.bill.lines {
            writeln!(f, "{}", line.product.name)?;
            writeln!(
                f,
                "  {} × {} = {}",
                self.money(line.product.price),
                line.quantity,
                self.money(line.gross_line_cost)
            )?;
            if line.item_savings.is_positive() {
                self.row(f, "  Offer savings", &self.money(line.item_savings))?;
            }
            self.row(f, "  Item total", &self.money(line.net_line_cost))?;
        }
        self.rule(f)?;

        // Totals
        self.row(f, "Sub total (before offers)", &self.money(self.bill.sub_total))?;
        self.row(
            f,
            "Savings from offers",
            &format!("- {}", self.money(self.bill.savings_from_offers)),
        )?;
        self.row(f, "Total after offers", &self.money(self.bill.total_after_offers))?;
        self.rule(f)?;

        // Coupon
        if let Some(message) = self.coupon_message() {
            writeln!(f, "{message}")?;
        }
        if self.bill.coupon_discount.is_positive() {
            self.row(
                f,
                "Coupon discount",
                &format!("- {}", self.money(self.bill.coupon_discount)),
            )?;
        }
        self.row(f, "Grand total", &self.money(self.bill.grand_total))?;
        self.rule(f)?;

        for line in &self.config.footer {
            self.centered(f, line)?;
        }
        Ok(())
    }
}

/// Renders the store offers of an engine as a bulleted list.
pub fn render_offers(engine: &PricingEngine) -> CoreResult<String> {
    let mut out = String::from("Store offers\n");
    if engine.offers().rules().is_empty() {
        out.push_str("  (none)\n");
    }
    for rule in engine.offers().rules() {
        out.push_str("  - ");
        out.push_str(&rule.describe(engine.catalog())?);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use supermart_core::catalog::ids;
    use supermart_core::{BasketLine, CouponCode, OfferEngine};

    fn render(items: &[(&str, u32)], coupon: Option<&str>) -> String {
        let engine = PricingEngine::standard();
        let lines: Vec<BasketLine> = items
            .iter()
            .map(|(id, qty)| BasketLine::new(*id, *qty))
            .collect();
        let code = coupon.and_then(CouponCode::parse);
        let bill = engine.compute_bill(&lines, code.as_ref()).unwrap();
        Receipt::new(&StoreConfig::default(), &bill).to_string()
    }

    #[test]
    fn test_empty_basket() {
        let text = render(&[], Some("SAVE10"));
        assert!(text.contains("SuperMart Billing"));
        assert!(text.contains("Currency: INR (₹)"));
        assert!(text.contains(EMPTY_BASKET_MESSAGE));
        assert!(!text.contains("Grand total"));
    }

    #[test]
    fn test_cheese_receipt() {
        let text = render(&[(ids::CHEESE, 3)], None);
        assert!(text.contains("Cheese (200g)\n"));
        assert!(text.contains("  ₹90.00 × 3 = ₹270.00\n"));
        assert!(text.contains(&format!("  Offer savings{:>27}\n", "₹90.00")));
        assert!(text.contains(&format!("Grand total{:>31}\n", "₹180.00")));
        assert!(!text.contains("Coupon"));
        assert!(text.contains("Thank you for shopping with us."));
    }

    #[test]
    fn test_no_savings_row_without_offer() {
        let text = render(&[(ids::MILK, 2)], None);
        assert!(!text.contains("Offer savings"));
        assert!(text.contains(&format!("Savings from offers{:>23}\n", "- ₹0.00")));
    }

    #[test]
    fn test_inactive_coupon_message() {
        let text = render(&[(ids::CHEESE, 3)], Some("save10"));
        assert!(text.contains(INACTIVE_COUPON_MESSAGE));
        assert!(!text.contains("Coupon discount"));

        let text = render(&[(ids::BREAD, 1)], Some("NOPE"));
        assert!(text.contains(INACTIVE_COUPON_MESSAGE));
    }

    #[test]
    fn test_applied_coupon_rows() {
        let text = render(&[(ids::TEA, 2)], Some("SAVE10"));
        assert!(text.contains("Coupon SAVE10: 10% off on bills above ₹300"));
        assert!(text.contains(&format!("Coupon discount{:>27}\n", "- ₹32.00")));
        assert!(text.contains(&format!("Grand total{:>31}\n", "₹288.00")));
    }

    #[test]
    fn test_lines_fit_width() {
        let text = render(
            &[(ids::CHEESE, 2), (ids::SOUP, 1), (ids::BREAD, 1), (ids::BUTTER, 1)],
            Some("WELCOME50"),
        );
        for line in text.lines() {
            assert!(line.chars().count() <= 42, "too wide: {line:?}");
        }
    }

    #[test]
    fn test_custom_symbol() {
        let config = StoreConfig {
            currency_symbol: "Rs ".to_string(),
            ..StoreConfig::default()
        };
        let bill = PricingEngine::standard()
            .compute_bill(&[BasketLine::new(ids::RICE, 1)], None)
            .unwrap();
        let text = Receipt::new(&config, &bill).to_string();
        assert!(text.contains("Rs 65.00"));
    }

    #[test]
    fn test_render_offers() {
        let text = render_offers(&PricingEngine::standard()).unwrap();
        assert!(text.starts_with("Store offers\n"));
        assert!(text.contains("  - Buy 1 Cheese (200g), get the 2nd Cheese (200g) free.\n"));
        assert!(text.contains("  - Buy 1 Soup Packet and get 1 Bread at 50% off.\n"));
        assert!(text.contains("  - Flat 33% off on Butter (200g).\n"));
    }

    #[test]
    fn test_render_offers_from_catalog_file() {
        let engine = crate::config::parse_catalog_file(
            r#"{
                "products": [{ "id": "jam", "name": "Jam", "price": 12000 }],
                "offers": [{ "type": "buy_one_get_one_free", "product": "jam" }]
            }"#,
        )
        .unwrap();
        let text = render_offers(&engine).unwrap();
        assert_eq!(text, "Store offers\n  - Buy 1 Jam, get the 2nd Jam free.\n");
        assert!(!text.contains("Built-in"));
    }

    #[test]
    fn test_render_no_offers() {
        let engine =
            PricingEngine::new(PricingEngine::standard().catalog().clone(), OfferEngine::new(vec![]))
                .unwrap();
        assert!(render_offers(&engine).unwrap().contains("(none)"));
    }
}
