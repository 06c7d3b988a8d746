//! # Tax Engine
//!
//! Decides which GST mode applies to a sale and computes the amounts.
//!
//! ## Decision Tree
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  compute_tax(subtotal, buyer_state, buyer_country, config)              │
//! │       │                                                                 │
//! │       ├── config missing or tax disabled ──────────► none (all zero)    │
//! │       │                                                                 │
//! │       ├── buyer_country ≠ home_country                                  │
//! │       │      ├── policy = igst ─────────────────────► IGST only         │
//! │       │      └── policy = exempt ───────────────────► none              │
//! │       │                                                                 │
//! │       ├── buyer_state == home_state (normalized) ───► CGST + SGST       │
//! │       │                                                                 │
//! │       └── otherwise ────────────────────────────────► IGST only         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Region names are compared after lowercasing and removing all whitespace,
//! so `"Tamil Nadu"`, `"tamilnadu"` and `" TAMIL  NADU "` are the same state.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::{InternationalTaxPolicy, TaxConfig};
use crate::money::Money;
use crate::types::{Currency, TaxType};

// =============================================================================
// Tax Breakdown
// =============================================================================

/// Computed GST for one amount. Never stored on its own; bookings copy the
/// component amounts at creation time.
///
/// ## Invariant
/// Exactly one of these holds:
/// - `tax_type == CgstSgst`: CGST/SGST carry the tax, `igst` is zero
/// - `tax_type == Igst`: `igst` carries the tax, CGST/SGST are zero
/// - `tax_type == None`: every amount is zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxBreakdown {
    pub cgst: Money,
    pub sgst: Money,
    pub igst: Money,
    pub total_tax: Money,
    pub tax_type: TaxType,
}

impl TaxBreakdown {
    /// No tax.
    pub const fn none() -> Self {
        TaxBreakdown {
            cgst: Money::zero(),
            sgst: Money::zero(),
            igst: Money::zero(),
            total_tax: Money::zero(),
            tax_type: TaxType::None,
        }
    }

    /// Intra-state tax. Collapses to [`TaxBreakdown::none`] when both halves
    /// round to zero.
    pub fn intra_state(cgst: Money, sgst: Money) -> Self {
        if cgst.is_zero() && sgst.is_zero() {
            return TaxBreakdown::none();
        }
        TaxBreakdown {
            cgst,
            sgst,
            igst: Money::zero(),
            total_tax: cgst + sgst,
            tax_type: TaxType::CgstSgst,
        }
    }

    /// Inter-state tax. Collapses to [`TaxBreakdown::none`] when IGST rounds
    /// to zero.
    pub fn inter_state(igst: Money) -> Self {
        if igst.is_zero() {
            return TaxBreakdown::none();
        }
        TaxBreakdown {
            cgst: Money::zero(),
            sgst: Money::zero(),
            igst,
            total_tax: igst,
            tax_type: TaxType::Igst,
        }
    }

    /// Whether any tax is charged.
    pub fn is_taxed(&self) -> bool {
        self.tax_type != TaxType::None
    }
}

// =============================================================================
// Tax Computation
// =============================================================================

/// Computes GST on a subtotal for a buyer location.
///
/// Pure and infallible: an absent config degrades to no tax, and malformed
/// rates have already been zeroed by [`TaxConfig::from_record`].
///
/// ## Example
/// ```rust
/// use seva_core::config::TaxConfig;
/// use seva_core::money::Money;
/// use seva_core::tax::compute_tax;
/// use seva_core::types::{TaxRate, TaxType};
///
/// let config = TaxConfig::enabled("Tamil Nadu")
///     .with_rates(TaxRate::from_bps(900), TaxRate::from_bps(900), TaxRate::from_bps(1800));
///
/// let tax = compute_tax(Money::from_major(1000), "Kerala", "India", Some(&config));
/// assert_eq!(tax.tax_type, TaxType::Igst);
/// assert_eq!(tax.igst, Money::from_major(180));
///
/// assert!(!compute_tax(Money::from_major(1000), "Kerala", "India", None).is_taxed());
/// ```
pub fn compute_tax(
    subtotal: Money,
    buyer_state: &str,
    buyer_country: &str,
    config: Option<&TaxConfig>,
) -> TaxBreakdown {
    let config = match config {
        Some(c) if c.is_tax_enabled => c,
        _ => return TaxBreakdown::none(),
    };

    if is_international(buyer_country, &config.home_country) {
        return match config.international_policy {
            InternationalTaxPolicy::Igst => {
                TaxBreakdown::inter_state(subtotal.calculate_tax(config.igst_rate))
            }
            InternationalTaxPolicy::Exempt => TaxBreakdown::none(),
        };
    }

    if same_region(buyer_state, &config.home_state) {
        TaxBreakdown::intra_state(
            subtotal.calculate_tax(config.cgst_rate),
            subtotal.calculate_tax(config.sgst_rate),
        )
    } else {
        TaxBreakdown::inter_state(subtotal.calculate_tax(config.igst_rate))
    }
}

/// Computes GST for a subtotal denominated in `currency`.
///
/// GST is only ever levied on rupee transactions. Dollar carts are settled
/// through PayPal without tax, whatever the buyer's address says.
pub fn compute_tax_for_currency(
    subtotal: Money,
    currency: Currency,
    buyer_state: &str,
    buyer_country: &str,
    config: Option<&TaxConfig>,
) -> TaxBreakdown {
    if !currency.is_gst_currency() {
        return TaxBreakdown::none();
    }
    compute_tax(subtotal, buyer_state, buyer_country, config)
}

/// Lowercases and strips all whitespace from a state or country name.
pub fn normalize_region(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn same_region(a: &str, b: &str) -> bool {
    normalize_region(a) == normalize_region(b)
}

/// A blank country counts as domestic: the booking form pre-fills the
/// seller's country and older bookings never captured it.
fn is_international(buyer_country: &str, home_country: &str) -> bool {
    let buyer = normalize_region(buyer_country);
    !buyer.is_empty() && buyer != normalize_region(home_country)
}

// =============================================================================
// Unit Tests
// =============================================================================
