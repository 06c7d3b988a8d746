//! # Domain Types
//!
//! Core domain types used throughout the storefront core.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Currency     │   │   Recurrence    │   │    TaxType      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  INR → Razorpay │   │  one-time  ×1   │   │  none           │       │
//! │  │  USD → PayPal   │   │  monthly   ×12  │   │  cgst_sgst      │       │
//! │  └─────────────────┘   │  yearly    ×12  │   │  igst           │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────────────────────────────┐     │
//! │  │    TaxRate      │   │  ServiceOffering / ServiceCatalog       │     │
//! │  │  bps (u32)      │   │  one published price per currency       │     │
//! │  │  900 = 9%       │   │  (never converted, always looked up)    │     │
//! │  └─────────────────┘   └─────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::format;
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 900 bps = 9% (a typical CGST or SGST half of 18% GST)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (`9.0` means 9%).
    ///
    /// Negative, NaN and infinite inputs become a zero rate.
    pub fn from_percentage(pct: f64) -> Self {
        if !pct.is_finite() || pct <= 0.0 {
            return TaxRate::zero();
        }
        TaxRate((pct * 100.0).round().min(u32::MAX as f64) as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Currency & Payment Gateway
// =============================================================================

/// The two currencies the storefront sells in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Currency {
    #[default]
    #[serde(rename = "INR")]
    Inr,
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    /// All supported currencies.
    pub const ALL: [Currency; 2] = [Currency::Inr, Currency::Usd];

    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
        }
    }

    /// Display symbol.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
        }
    }

    /// Payment gateway that settles this currency.
    ///
    /// Derived, never chosen: INR always goes through Razorpay and USD
    /// always through PayPal.
    pub const fn gateway(&self) -> PaymentGateway {
        match self {
            Currency::Inr => PaymentGateway::Razorpay,
            Currency::Usd => PaymentGateway::PayPal,
        }
    }

    /// Whether Indian GST can be levied on transactions in this currency.
    pub const fn is_gst_currency(&self) -> bool {
        matches!(self, Currency::Inr)
    }

    /// Formats an amount for customer-facing text.
    ///
    /// INR uses Indian digit grouping (`₹1,23,456.00`), USD uses
    /// international grouping (`$123,456.00`).
    pub fn format(&self, amount: Money) -> String {
        let digits = match self {
            Currency::Inr => format::format_indian_grouping(amount),
            Currency::Usd => format::format_international_grouping(amount),
        };
        match digits.strip_prefix('-') {
            Some(rest) => format!("-{}{}", self.symbol(), rest),
            None => format!("{}{}", self.symbol(), digits),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INR" => Ok(Currency::Inr),
            "USD" => Ok(Currency::Usd),
            _ => Err(ValidationError::NotAllowed {
                field: "currency".to_string(),
                allowed: Currency::ALL.iter().map(|c| c.code().to_string()).collect(),
            }),
        }
    }
}

/// Hosted payment gateway used to collect a cart's total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentGateway {
    Razorpay,
    PayPal,
}

// =============================================================================
// Recurrence
// =============================================================================

/// Billing cadence of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum Recurrence {
    #[default]
    OneTime,
    Monthly,
    Yearly,
}

impl Recurrence {
    /// All recurrence options, in the order the booking form lists them.
    pub const ALL: [Recurrence; 3] = [Recurrence::OneTime, Recurrence::Monthly, Recurrence::Yearly];

    /// Wire name (`one-time`, `monthly`, `yearly`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Recurrence::OneTime => "one-time",
            Recurrence::Monthly => "monthly",
            Recurrence::Yearly => "yearly",
        }
    }

    /// How many times the base price is charged up front.
    ///
    /// Monthly bookings bill a full 12-month commitment at checkout.
    /// Yearly bookings are billed with the same multiplier.
    pub const fn billing_multiplier(&self) -> i64 {
        match self {
            Recurrence::OneTime => 1,
            Recurrence::Monthly => 12,
            Recurrence::Yearly => 12,
        }
    }

    /// Whether the booking repeats.
    pub const fn is_recurring(&self) -> bool {
        !matches!(self, Recurrence::OneTime)
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Recurrence {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "one-time" | "one_time" | "onetime" | "once" => Ok(Recurrence::OneTime),
            "monthly" => Ok(Recurrence::Monthly),
            "yearly" | "annual" | "annually" => Ok(Recurrence::Yearly),
            _ => Err(ValidationError::NotAllowed {
                field: "recurrence".to_string(),
                allowed: Recurrence::ALL.iter().map(|r| r.as_str().to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Tax Type
// =============================================================================

/// Which GST mode applied to an amount. The three modes are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TaxType {
    /// No tax charged.
    #[default]
    None,
    /// Intra-state: Central + State GST.
    CgstSgst,
    /// Inter-state (or international): Integrated GST.
    Igst,
}

impl TaxType {
    /// Infers the mode from stored component amounts.
    pub fn from_components(cgst: Money, sgst: Money, igst: Money) -> Self {
        if !cgst.is_zero() || !sgst.is_zero() {
            TaxType::CgstSgst
        } else if !igst.is_zero() {
            TaxType::Igst
        } else {
            TaxType::None
        }
    }
}

// =============================================================================
// Service Catalog
// =============================================================================

/// A bookable service (puja, prayer, subscription) or purchasable book.
///
/// Each offering publishes its own price in every supported currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ServiceOffering {
    /// Service identifier in the hosted content store.
    pub id: String,

    /// Display name shown in the cart and on invoices.
    pub name: String,

    /// Published price in rupees.
    pub price_inr: Money,

    /// Published price in dollars.
    pub price_usd: Money,
}

impl ServiceOffering {
    /// Returns the published price in the given currency.
    pub fn price_in(&self, currency: Currency) -> Money {
        match currency {
            Currency::Inr => self.price_inr,
            Currency::Usd => self.price_usd,
        }
    }
}

/// Lookup table of offerings by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceCatalog {
    offerings: HashMap<String, ServiceOffering>,
}

impl ServiceCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        ServiceCatalog::default()
    }

    /// Adds or replaces an offering.
    pub fn insert(&mut self, offering: ServiceOffering) {
        self.offerings.insert(offering.id.clone(), offering);
    }

    /// Looks up an offering by id.
    pub fn get(&self, service_id: &str) -> Option<&ServiceOffering> {
        self.offerings.get(service_id)
    }

    /// Number of offerings.
    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    /// Whether the catalog has no offerings.
    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }
}

impl FromIterator<ServiceOffering> for ServiceCatalog {
    fn from_iter<I: IntoIterator<Item = ServiceOffering>>(iter: I) -> Self {
        let mut catalog = ServiceCatalog::new();
        for offering in iter {
            catalog.insert(offering);
        }
        catalog
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
