//! # Store Configuration
//!
//! Receipt branding plus where the catalog comes from.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--catalog`)
//! 2. Environment variables (`SUPERMART_*`)
//! 3. Defaults (this file)
//!
//! ## Catalog File
//! A JSON document with the same shapes the core crate serializes. Prices and
//! minimum amounts are in paise.
//! ```json
//! {
//!   "products": [{ "id": "bread", "name": "Bread", "price": 4000 }],
//!   "coupons": [{ "code": "SAVE10", "description": "10% off",
//!                 "discountPercent": 10, "minAmount": 30000 }],
//!   "offers": [{ "type": "flat_fraction", "product": "bread",
//!                "fraction": { "numerator": 1, "denominator": 2 } }]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use supermart_core::{Catalog, Coupon, OfferEngine, PricingEngine, Product};
use tracing::info;

use crate::error::{CliError, CliResult};

/// Store configuration for the terminal front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Store name (receipt header)
    pub store_name: String,

    /// Store address lines (receipt header)
    pub store_address: Vec<String>,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Lines printed under the totals
    pub footer: Vec<String>,

    /// Receipt width in characters
    pub receipt_width: usize,

    /// Custom catalog file; the built-in catalog is used when absent
    pub catalog_path: Option<PathBuf>,
}

impl Default for StoreConfig {
    /// ## Default Values
    /// - Store: "SuperMart Billing"
    /// - Currency: INR (₹)
    /// - Width: 42 columns
    /// - Catalog: built-in
    fn default() -> Self {
        StoreConfig {
            store_name: "SuperMart Billing".to_string(),
            store_address: Vec::new(),
            currency_code: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            footer: vec![
                "Thank you for shopping with us.".to_string(),
                "Prices are sample values in INR.".to_string(),
            ],
            receipt_width: 42,
            catalog_path: None,
        }
    }
}

impl StoreConfig {
    /// Creates a StoreConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SUPERMART_STORE_NAME`: Override store name
    /// - `SUPERMART_CURRENCY_SYMBOL`: Override currency symbol
    /// - `SUPERMART_CATALOG`: Path to a catalog JSON file
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`StoreConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = StoreConfig::default();

        if let Some(store_name) = lookup("SUPERMART_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(symbol) = lookup("SUPERMART_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(path) = lookup("SUPERMART_CATALOG").filter(|p| !p.trim().is_empty()) {
            config.catalog_path = Some(PathBuf::from(path));
        }

        config
    }

    /// Builds the pricing engine from the configured catalog.
    ///
    /// `override_path` (from `--catalog`) wins over `catalog_path`.
    ///
    /// ## Errors
    /// - `Io` if the file cannot be read
    /// - `Json` if it is not a valid catalog document
    /// - `Core` if the data fails validation (duplicate ids, offers naming
    ///   unknown products...)
    pub fn load_engine(&self, override_path: Option<&Path>) -> CliResult<PricingEngine> {
        let Some(path) = override_path.or(self.catalog_path.as_deref()) else {
            info!("Using built-in catalog");
            return Ok(PricingEngine::standard());
        };

        let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let engine = parse_catalog_file(&text)?;

        info!(
            path = %path.display(),
            products = engine.catalog().products().len(),
            coupons = engine.catalog().coupons().len(),
            offers = engine.offers().rules().len(),
            "Catalog file loaded"
        );
        Ok(engine)
    }
}

/// On-disk catalog document.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
    #[serde(default)]
    coupons: Vec<Coupon>,
    /// Missing means the store runs no offers.
    #[serde(default)]
    offers: Option<OfferEngine>,
}

/// Parses and validates a catalog document.
pub fn parse_catalog_file(text: &str) -> CliResult<PricingEngine> {
    let file: CatalogFile = serde_json::from_str(text)?;
    let catalog = Catalog::new(file.products, file.coupons)?;
    let offers = file.offers.unwrap_or_else(|| OfferEngine::new(Vec::new()));
    Ok(PricingEngine::new(catalog, offers)?)
}
