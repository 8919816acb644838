//! # Command-Line Arguments
//!
//! ## Usage
//! ```bash
//! # Three cheese, one soup, one bread, with a coupon
//! supermart-bill --item cheese=3 --item soup --item bread --coupon save10
//!
//! # Bill as JSON
//! supermart-bill --item butter=3 --json
//!
//! # List the store offers
//! supermart-bill --offers
//! ```

use std::path::PathBuf;

use crate::error::{CliError, CliResult};

/// Help text printed for `--help`.
pub const USAGE: &str = "\
SuperMart Billing - print a bill for a basket

Usage: supermart-bill [OPTIONS]

Options:
  -i, --item <ID[=QTY]>   Add QTY (default 1) of a product, repeatable
  -c, --coupon <CODE>     Apply a coupon code
      --catalog <PATH>    Load products, coupons and offers from a JSON file
      --json              Print the bill as JSON instead of a receipt
      --offers            List the store offers and exit
  -h, --help              Show this help message

Environment:
  SUPERMART_STORE_NAME, SUPERMART_CURRENCY_SYMBOL, SUPERMART_CATALOG
  RUST_LOG (log filter, logs go to stderr)";

/// One `--item` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemArg {
    pub product_id: String,
    pub quantity: u32,
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Price a basket and print it.
    Bill(BillArgs),
    /// List the offers of the active catalog.
    Offers { catalog: Option<PathBuf> },
    /// Print usage.
    Help,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillArgs {
    pub items: Vec<ItemArg>,
    pub coupon: Option<String>,
    pub catalog: Option<PathBuf>,
    pub json: bool,
}

/// Parses arguments, excluding the program name.
pub fn parse_args<I>(args: I) -> CliResult<Command>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    let mut bill = BillArgs::default();
    let mut list_offers = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--item" | "-i" => {
                bill.items.push(parse_item(value_for(&args, i)?)?);
                i += 1;
            }
            "--coupon" | "-c" => {
                bill.coupon = Some(value_for(&args, i)?.to_string());
                i += 1;
            }
            "--catalog" => {
                bill.catalog = Some(PathBuf::from(value_for(&args, i)?));
                i += 1;
            }
            "--json" => bill.json = true,
            "--offers" => list_offers = true,
            "--help" | "-h" => return Ok(Command::Help),
            other => {
                return Err(CliError::usage(format!(
                    "Unexpected argument '{other}' (try --help)"
                )))
            }
        }
        i += 1;
    }

    if list_offers {
        return Ok(Command::Offers {
            catalog: bill.catalog,
        });
    }
    Ok(Command::Bill(bill))
}

fn value_for(args: &[String], flag_index: usize) -> CliResult<&str> {
    args.get(flag_index + 1)
        .map(String::as_str)
        .ok_or_else(|| CliError::usage(format!("{} needs a value", args[flag_index])))
}

/// Parses `ID` or `ID=QTY`.
fn parse_item(raw: &str) -> CliResult<ItemArg> {
    let (id, qty) = match raw.split_once('=') {
        Some((id, qty)) => (id.trim(), Some(qty.trim())),
        None => (raw.trim(), None),
    };

    if id.is_empty() {
        return Err(CliError::usage(format!("Missing product id in '{raw}'")));
    }

    let quantity = match qty {
        Some(qty) => qty
            .parse::<u32>()
            .map_err(|_| CliError::usage(format!("Invalid quantity in '{raw}'")))?,
        None => 1,
    };

    Ok(ItemArg {
        product_id: id.to_string(),
        quantity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliResult<Command> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_empty_args_is_empty_bill() {
        assert_eq!(parse(&[]).unwrap(), Command::Bill(BillArgs::default()));
    }

    #[test]
    fn test_items_and_coupon() {
        let Command::Bill(bill) =
            parse(&["--item", "cheese=3", "-i", "soup", "--coupon", "save10", "--json"]).unwrap()
        else {
            panic!("expected bill command");
        };
        assert_eq!(
            bill.items,
            vec![
                ItemArg {
                    product_id: "cheese".to_string(),
                    quantity: 3
                },
                ItemArg {
                    product_id: "soup".to_string(),
                    quantity: 1
                },
            ]
        );
        assert_eq!(bill.coupon.as_deref(), Some("save10"));
        assert!(bill.json);
    }

    #[test]
    fn test_offers_keeps_catalog() {
        assert_eq!(
            parse(&["--catalog", "shop.json", "--offers"]).unwrap(),
            Command::Offers {
                catalog: Some(PathBuf::from("shop.json"))
            }
        );
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(parse(&["--item", "tea", "--help"]).unwrap(), Command::Help);
    }

    #[test]
    fn test_missing_value() {
        assert!(matches!(parse(&["--item"]), Err(CliError::Usage(_))));
        assert!(matches!(parse(&["--coupon"]), Err(CliError::Usage(_))));
    }

    #[test]
    fn test_bad_item() {
        assert!(matches!(parse(&["--item", "=2"]), Err(CliError::Usage(_))));
        assert!(matches!(parse(&["--item", "tea=two"]), Err(CliError::Usage(_))));
        assert!(matches!(parse(&["--item", "tea=-1"]), Err(CliError::Usage(_))));
    }

    #[test]
    fn test_unknown_flag() {
        assert!(matches!(parse(&["--tax"]), Err(CliError::Usage(_))));
    }
}
