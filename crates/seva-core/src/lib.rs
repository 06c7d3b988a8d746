//! # seva-core: Pure Pricing, Tax & Invoice Logic
//!
//! This crate is the **heart** of the Seva storefront. Everything that turns
//! a booking cart into a payable amount and an invoice lives here, as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Seva Storefront Data Flow                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    React Storefront                             │   │
//! │  │   Book Service ──► Cart Panel ──► Payment Step ──► Invoice PDF │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ts-rs generated types                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ seva-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐  │   │
//! │  │   │ pricing  │─►│   tax    │─►│ invoice  │─►│    format    │  │   │
//! │  │   │ ×12 etc. │  │ CGST/SGST│  │ totals + │  │ lakh/crore   │  │   │
//! │  │   │          │  │ or IGST  │  │ document │  │ words        │  │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 seva-store (Persistence Layer)                  │   │
//! │  │            Cart repository, booking records (SQLite)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Currency, recurrence, tax rate and catalog types
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`config`] - Typed tax configuration validated from settings records
//! - [`pricing`] - Recurring pricing calculator
//! - [`tax`] - GST engine (CGST+SGST vs IGST vs none)
//! - [`invoice`] - Invoice totals, per-booking charges and invoice documents
//! - [`format`] - Display formatting and Indian-numbering amount in words
//! - [`cart`] - Booking cart with currency switching
//! - [`payment`] - Payment gateway order amounts
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use seva_core::config::TaxConfig;
//! use seva_core::money::Money;
//! use seva_core::tax::compute_tax;
//! use seva_core::types::{TaxRate, TaxType};
//!
//! let config = TaxConfig::enabled("Tamil Nadu")
//!     .with_rates(TaxRate::from_bps(900), TaxRate::from_bps(900), TaxRate::from_bps(1800));
//!
//! let subtotal = Money::parse("1000").unwrap();
//! let tax = compute_tax(subtotal, "Tamil Nadu", "India", Some(&config));
//!
//! assert_eq!(tax.tax_type, TaxType::CgstSgst);
//! assert_eq!(tax.total_tax.to_string(), "180.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod config;
pub mod error;
pub mod format;
pub mod invoice;
pub mod money;
pub mod payment;
pub mod pricing;
pub mod tax;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartState, LineItem};
pub use config::{InternationalTaxPolicy, TaxConfig};
pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice::{build_invoice, Booking, BookerInfo, InvoiceDocument, InvoiceTotals};
pub use money::Money;
pub use pricing::compute_line_total;
pub use tax::{compute_tax, compute_tax_for_currency, TaxBreakdown};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The seller's registered country. Buyers elsewhere are international.
pub const HOME_COUNTRY: &str = "India";

/// Maximum line items allowed in a single booking cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Highest catalog price a cart accepts, in minor units (₹1,000 crore).
///
/// A full cart of twelve-month lines at this price, plus tax at every
/// rate's 100% ceiling, still fits in an `i64`.
pub const MAX_PRICE_MINOR: i64 = 1_000_000_000_000;
