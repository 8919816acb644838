//! # SuperMart Billing Terminal Entry Point
//!
//! Prints a bill for a basket given on the command line.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        supermart-bill                                   │
//! │                                                                         │
//! │  args.rs ────► --item / --coupon / --catalog / --json / --offers        │
//! │                                                                         │
//! │  config.rs ──► StoreConfig (env) ──► PricingEngine (built-in or file)   │
//! │                                                                         │
//! │  main.rs ────► Basket ──► snapshot ──► Bill                             │
//! │                                                                         │
//! │  receipt.rs ─► text receipt on stdout (or JSON)                         │
//! │                                                                         │
//! │  logs ───────► stderr (RUST_LOG), stdout stays a clean bill             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Parse arguments
//! 3. Load store configuration and catalog
//! 4. Fill the basket, compute and print the bill

mod args;
mod config;
mod error;
mod receipt;

use std::process::ExitCode;

use supermart_core::{Basket, PricingEngine};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use args::{BillArgs, Command, USAGE};
use config::StoreConfig;
use error::CliResult;
use receipt::{render_offers, Receipt};

fn main() -> ExitCode {
    init_tracing();

    match run(std::env::args().skip(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Billing failed");
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=supermart_core=trace` - Show every offer evaluation
/// - Default: WARN, so a plain run prints only the bill
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run<I>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = String>,
{
    let config = StoreConfig::from_env();

    match args::parse_args(args)? {
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Command::Offers { catalog } => {
            let engine = config.load_engine(catalog.as_deref())?;
            print!("{}", render_offers(&engine)?);
            Ok(())
        }
        Command::Bill(bill_args) => {
            let engine = config.load_engine(bill_args.catalog.as_deref())?;
            print_bill(&config, &engine, &bill_args)
        }
    }
}

fn print_bill(config: &StoreConfig, engine: &PricingEngine, args: &BillArgs) -> CliResult<()> {
    let mut basket = Basket::new();
    for item in &args.items {
        let product = engine.catalog().get_product(&item.product_id)?;
        basket.add_quantity(product, item.quantity)?;
    }
    basket.set_coupon(args.coupon.as_deref());

    let bill = engine.compute_for(&basket.snapshot())?;
    info!(
        items = basket.item_count(),
        grand_total = %bill.grand_total,
        "Bill ready"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&bill)?);
    } else {
        print!("{}", Receipt::new(config, &bill));
    }
    Ok(())
}
