//! # Payment Orders
//!
//! Converts invoice totals into the amount handed to a hosted gateway.
//!
//! Razorpay expects paise and PayPal expects cents. Both are the minor
//! unit `Money` already stores, so no scaling happens here.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::invoice::InvoiceTotals;
use crate::types::{Currency, PaymentGateway};
use crate::validation::{validate_payment_amount, ValidationResult};

/// Order parameters for the payment-initiation UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GatewayOrder {
    pub gateway: PaymentGateway,
    pub currency: Currency,
    /// Grand total in minor units (paise / cents).
    pub amount_minor: i64,
}

impl GatewayOrder {
    /// Builds the order for a cart's totals.
    ///
    /// ## Errors
    /// Rejects zero or negative totals: gateways refuse them and a free
    /// checkout should skip payment entirely.
    ///
    /// ## Example
    /// ```rust
    /// use seva_core::invoice::InvoiceTotals;
    /// use seva_core::money::Money;
    /// use seva_core::payment::GatewayOrder;
    /// use seva_core::tax::TaxBreakdown;
    /// use seva_core::types::{Currency, PaymentGateway};
    ///
    /// let totals = InvoiceTotals::from_breakdown(
    ///     Currency::Inr,
    ///     Money::parse("1180.50").unwrap(),
    ///     TaxBreakdown::none(),
    /// );
    /// let order = GatewayOrder::from_totals(&totals).unwrap();
    /// assert_eq!(order.gateway, PaymentGateway::Razorpay);
    /// assert_eq!(order.amount_minor, 118_050);
    /// ```
    pub fn from_totals(totals: &InvoiceTotals) -> ValidationResult<Self> {
        validate_payment_amount(totals.total)?;
        Ok(GatewayOrder {
            gateway: totals.currency.gateway(),
            currency: totals.currency,
            amount_minor: totals.total.minor_units(),
        })
    }
}
