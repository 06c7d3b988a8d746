//! # Invoice Preview
//!
//! Prints checkout totals for the persisted cart, or books it and prints
//! the invoice.
//!
//! ## Usage
//! ```bash
//! # Totals and gateway order for the current cart
//! SEVA_BUYER_STATE=Kerala \
//! SEVA_TAX_CONFIG='{"is_tax_enabled":true,"home_state":"Tamil Nadu","cgst_rate":9,"sgst_rate":9,"igst_rate":18}' \
//! cargo run -p seva-store --bin invoice-preview
//!
//! # Book the cart and print the invoice
//! cargo run -p seva-store --bin invoice-preview -- \
//!     --book pay_29QQoUBi66xm2f --name "Anna George" --email anna@example.org
//! ```
//!
//! Settings come from `SEVA_*` variables; see [`seva_store::StoreConfig`].

use std::env;

use chrono::Utc;
use seva_core::payment::GatewayOrder;
use seva_core::BookerInfo;
use seva_store::{assemble_invoice, book_cart, CartRepository, Database, StoreConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    payment_reference: Option<String>,
    name: String,
    email: String,
    invoice_number: Option<String>,
}

const HELP: &str = "Seva Invoice Preview

Usage: invoice-preview [OPTIONS]

Options:
  -b, --book <REF>       Book the cart with this payment reference
  -n, --name <NAME>      Booker name (required with --book)
  -e, --email <EMAIL>    Booker email (required with --book)
  -i, --invoice <NUM>    Invoice number (default: PREVIEW-<date>)
  -h, --help             Show this help message";

/// Parses `argv` (program name first). `Ok(None)` means help was printed.
fn parse_args(argv: &[String]) -> Result<Option<Args>, String> {
    let mut parsed = Args::default();

    let mut rest = argv.iter().skip(1);
    while let Some(flag) = rest.next() {
        let mut value = || {
            rest.next()
                .filter(|v| !v.starts_with('-') && !v.trim().is_empty())
                .map(|v| v.trim().to_string())
                .ok_or_else(|| format!("{} needs a value", flag))
        };
        match flag.as_str() {
            "--book" | "-b" => parsed.payment_reference = Some(value()?),
            "--name" | "-n" => parsed.name = value()?,
            "--email" | "-e" => parsed.email = value()?,
            "--invoice" | "-i" => parsed.invoice_number = Some(value()?),
            "--help" | "-h" => {
                println!("{}", HELP);
                return Ok(None);
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
    }

    if parsed.payment_reference.is_some() && parsed.name.is_empty() {
        return Err("--book needs --name".to_string());
    }

    Ok(Some(parsed))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,seva=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let argv: Vec<String> = env::args().collect();
    let Some(args) = parse_args(&argv)? else {
        return Ok(());
    };

    let config = StoreConfig::from_env()?;
    info!(
        path = %config.database_path.display(),
        cart_key = %config.cart_key,
        tax_enabled = config.tax_config.as_ref().is_some_and(|t| t.is_tax_enabled),
        "Starting invoice preview"
    );

    let db = Database::new(config.db_config()).await?;
    let carts = db.carts();
    let cart = carts.load(&config.cart_key).await?;

    let totals = cart.totals(
        config.tax_config.as_ref(),
        &config.buyer_state,
        &config.buyer_country,
    )?;
    println!("{}", serde_json::to_string_pretty(&totals)?);

    match GatewayOrder::from_totals(&totals) {
        Ok(order) => println!("{}", serde_json::to_string_pretty(&order)?),
        Err(e) => warn!(error = %e, "Nothing to pay"),
    }

    let Some(payment_reference) = args.payment_reference else {
        db.close().await;
        return Ok(());
    };

    let booker = BookerInfo {
        name: args.name,
        email: args.email,
        state: config.buyer_state.clone(),
        country: config.buyer_country.clone(),
        ..BookerInfo::default()
    };

    let bookings = db.bookings();
    let booked = book_cart(
        &carts,
        &bookings,
        &config.cart_key,
        &booker,
        config.tax_config.as_ref(),
        Some(payment_reference),
    )
    .await?;

    let today = Utc::now().date_naive();
    let invoice_number = args
        .invoice_number
        .unwrap_or_else(|| format!("PREVIEW-{}", today.format("%Y%m%d")));
    let ids: Vec<String> = booked.iter().map(|b| b.id.clone()).collect();

    let invoice = assemble_invoice(&bookings, &invoice_number, today, &ids).await?;
    println!("{}", serde_json::to_string_pretty(&invoice)?);

    db.close().await;
    Ok(())
}
