//! # Invoice Aggregation
//!
//! Turns cart lines into payable totals, and stored bookings into invoices.
//!
//! ## Two Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CHECKOUT (before payment)                                              │
//! │                                                                         │
//! │  LineItem[] ──► compute_line_total ──► Σ subtotal                       │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                         compute_tax_for_currency(subtotal, buyer)       │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                 InvoiceTotals { subtotal, cgst, sgst, igst, total }     │
//! │                                                                         │
//! │  BOOKING CREATION (after payment)                                       │
//! │                                                                         │
//! │  LineItem ──► charge_line_items ──► BookingCharge ──► Booking (stored)  │
//! │               (tax per line, persisted verbatim)                        │
//! │                                                                         │
//! │  INVOICE DOCUMENT (any time later)                                      │
//! │                                                                         │
//! │  Booking[] ──► InvoiceDocument::from_bookings ──► Σ stored amounts      │
//! │                (NO tax recomputation: what was charged is what prints) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Because invoice assembly only sums stored values, the per-booking tax
//! fields MUST be written exactly as [`charge_line_items`] produced them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::LineItem;
use crate::config::TaxConfig;
use crate::error::{CoreError, CoreResult};
use crate::format::amount_in_words;
use crate::money::Money;
use crate::tax::{compute_tax_for_currency, TaxBreakdown};
use crate::types::{Currency, Recurrence, TaxType};
use crate::validation::validate_invoice_number;

// =============================================================================
// Invoice Totals
// =============================================================================

/// Aggregate amounts for a cart or an invoice.
///
/// ## Invariant
/// `total == subtotal + cgst + sgst + igst`, exactly (integer minor units).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceTotals {
    pub currency: Currency,
    pub subtotal: Money,
    pub cgst: Money,
    pub sgst: Money,
    pub igst: Money,
    pub total_tax: Money,
    pub total: Money,
    pub tax_type: TaxType,
}

impl InvoiceTotals {
    /// Zero totals (empty cart).
    pub fn empty(currency: Currency) -> Self {
        InvoiceTotals::from_breakdown(currency, Money::zero(), TaxBreakdown::none())
    }

    /// Combines a subtotal with its tax breakdown.
    pub fn from_breakdown(currency: Currency, subtotal: Money, tax: TaxBreakdown) -> Self {
        InvoiceTotals {
            currency,
            subtotal,
            cgst: tax.cgst,
            sgst: tax.sgst,
            igst: tax.igst,
            total_tax: tax.total_tax,
            total: subtotal + tax.total_tax,
            tax_type: tax.tax_type,
        }
    }

    /// Checks the totals invariant.
    pub fn is_consistent(&self) -> bool {
        self.total == self.subtotal + self.cgst + self.sgst + self.igst
            && self.total_tax == self.cgst + self.sgst + self.igst
    }
}

/// Builds the totals shown in the cart panel and sent to the payment step.
///
/// Tax is computed once on the aggregate subtotal, not per line.
///
/// ## Errors
/// `CurrencyMismatch` if the lines are not all in one currency. An empty
/// slice yields zero INR totals.
///
/// ## Example
/// ```rust
/// use seva_core::cart::CartState;
/// use seva_core::config::TaxConfig;
/// use seva_core::invoice::build_invoice;
/// use seva_core::money::Money;
/// use seva_core::types::{Currency, Recurrence, ServiceOffering, TaxRate};
///
/// let novena = ServiceOffering {
///     id: "novena".into(),
///     name: "Nine-day Novena".into(),
///     price_inr: Money::from_major(100),
///     price_usd: Money::from_major(2),
/// };
/// let mut cart = CartState::new(Currency::Inr);
/// cart.add_service(&novena, Recurrence::Monthly, None).unwrap();
///
/// let config = TaxConfig::enabled("Kerala")
///     .with_rates(TaxRate::zero(), TaxRate::zero(), TaxRate::from_bps(1800));
/// let totals = build_invoice(&cart.items, Some(&config), "Karnataka", "India").unwrap();
///
/// assert_eq!(totals.subtotal, Money::from_major(1200));
/// assert_eq!(totals.igst, Money::from_major(216));
/// assert_eq!(totals.total, Money::from_major(1416));
/// ```
pub fn build_invoice(
    items: &[LineItem],
    tax_config: Option<&TaxConfig>,
    buyer_state: &str,
    buyer_country: &str,
) -> CoreResult<InvoiceTotals> {
    let currency = common_currency(items.iter().map(|i| i.currency))?.unwrap_or_default();
    let subtotal: Money = items.iter().map(LineItem::line_total).sum();
    let tax = compute_tax_for_currency(subtotal, currency, buyer_state, buyer_country, tax_config);
    Ok(InvoiceTotals::from_breakdown(currency, subtotal, tax))
}

fn common_currency(mut currencies: impl Iterator<Item = Currency>) -> CoreResult<Option<Currency>> {
    let Some(expected) = currencies.next() else {
        return Ok(None);
    };
    match currencies.find(|c| *c != expected) {
        Some(found) => Err(CoreError::CurrencyMismatch { expected, found }),
        None => Ok(Some(expected)),
    }
}

// =============================================================================
// Per-Booking Charges
// =============================================================================

/// What one cart line costs, including its own tax.
///
/// Produced at checkout and copied onto the booking record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BookingCharge {
    pub line_id: String,
    pub service_id: String,
    pub service_name: String,
    pub currency: Currency,
    pub recurrence: Recurrence,
    #[ts(as = "Option<String>")]
    pub booking_date: Option<NaiveDate>,
    /// Line total before tax (base price × billing multiplier).
    pub amount: Money,
    pub tax: TaxBreakdown,
}

/// Computes each line's tax separately for persistence.
///
/// Per-line rounding means the sum of these taxes can differ from the
/// aggregate [`build_invoice`] tax by a paisa per line. Invoices print the
/// per-line values.
pub fn charge_line_items(
    items: &[LineItem],
    tax_config: Option<&TaxConfig>,
    buyer_state: &str,
    buyer_country: &str,
) -> CoreResult<Vec<BookingCharge>> {
    common_currency(items.iter().map(|i| i.currency))?;

    Ok(items
        .iter()
        .map(|item| {
            let amount = item.line_total();
            BookingCharge {
                line_id: item.id.clone(),
                service_id: item.service_id.clone(),
                service_name: item.service_name.clone(),
                currency: item.currency,
                recurrence: item.recurrence,
                booking_date: item.booking_date,
                amount,
                tax: compute_tax_for_currency(
                    amount,
                    item.currency,
                    buyer_state,
                    buyer_country,
                    tax_config,
                ),
            }
        })
        .collect())
}

// =============================================================================
// Booking Records
// =============================================================================

/// The person who booked and paid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BookerInfo {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub state: String,
    pub country: String,
}

/// A confirmed booking with its tax frozen at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Booking {
    pub id: String,
    pub booker: BookerInfo,
    pub service_id: String,
    pub service_name: String,
    pub currency: Currency,
    pub recurrence: Recurrence,
    #[ts(as = "Option<String>")]
    pub booking_date: Option<NaiveDate>,
    /// Line total before tax.
    pub amount: Money,
    pub cgst_amount: Money,
    pub sgst_amount: Money,
    pub igst_amount: Money,
    /// Total tax for this booking.
    pub tax_amount: Money,
    /// Gateway payment reference (Razorpay payment id / PayPal capture id).
    pub payment_reference: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Freezes a checkout charge into a booking record.
    pub fn from_charge(
        charge: &BookingCharge,
        booker: &BookerInfo,
        payment_reference: Option<String>,
    ) -> Self {
        Booking {
            id: Uuid::new_v4().to_string(),
            booker: booker.clone(),
            service_id: charge.service_id.clone(),
            service_name: charge.service_name.clone(),
            currency: charge.currency,
            recurrence: charge.recurrence,
            booking_date: charge.booking_date,
            amount: charge.amount,
            cgst_amount: charge.tax.cgst,
            sgst_amount: charge.tax.sgst,
            igst_amount: charge.tax.igst,
            tax_amount: charge.tax.total_tax,
            payment_reference,
            created_at: Utc::now(),
        }
    }

    /// GST mode, as read back from the stored amounts.
    pub fn tax_type(&self) -> TaxType {
        TaxType::from_components(self.cgst_amount, self.sgst_amount, self.igst_amount)
    }

    /// Amount plus stored tax.
    pub fn total(&self) -> Money {
        self.amount + self.tax_amount
    }
}

// =============================================================================
// Invoice Document
// =============================================================================

/// One printed invoice row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceLine {
    pub booking_id: String,
    pub description: String,
    pub recurrence: Recurrence,
    #[ts(as = "Option<String>")]
    pub booking_date: Option<NaiveDate>,
    pub amount: Money,
    pub cgst: Money,
    pub sgst: Money,
    pub igst: Money,
    pub tax: Money,
    pub total: Money,
    pub tax_type: TaxType,
}

impl From<&Booking> for InvoiceLine {
    fn from(booking: &Booking) -> Self {
        InvoiceLine {
            booking_id: booking.id.clone(),
            description: booking.service_name.clone(),
            recurrence: booking.recurrence,
            booking_date: booking.booking_date,
            amount: booking.amount,
            cgst: booking.cgst_amount,
            sgst: booking.sgst_amount,
            igst: booking.igst_amount,
            tax: booking.tax_amount,
            total: booking.total(),
            tax_type: booking.tax_type(),
        }
    }
}

/// Structured invoice handed to the PDF renderer and the mailer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceDocument {
    /// Server-issued transaction reference number.
    pub invoice_number: String,
    #[ts(as = "String")]
    pub issued_on: NaiveDate,
    pub booker: BookerInfo,
    pub lines: Vec<InvoiceLine>,
    pub totals: InvoiceTotals,
    /// Grand total spelled out (rupee invoices only).
    pub amount_in_words: Option<String>,
}

impl InvoiceDocument {
    /// Assembles an invoice by summing the bookings' stored amounts.
    ///
    /// Tax is never recomputed here.
    ///
    /// ## Errors
    /// - `Validation` for a blank invoice number
    /// - `EmptyInvoice` when `bookings` is empty
    /// - `CurrencyMismatch` when bookings span currencies
    /// - `BookerMismatch` when a booking's email differs from `booker`'s
    /// - `TaxModeMismatch` when taxed bookings mix CGST+SGST with IGST
    pub fn from_bookings(
        invoice_number: &str,
        issued_on: NaiveDate,
        booker: BookerInfo,
        bookings: &[Booking],
    ) -> CoreResult<Self> {
        validate_invoice_number(invoice_number)?;
        let currency = common_currency(bookings.iter().map(|b| b.currency))?
            .ok_or(CoreError::EmptyInvoice)?;

        ensure_single_booker(&booker, bookings)?;

        let lines: Vec<InvoiceLine> = bookings.iter().map(InvoiceLine::from).collect();
        ensure_single_tax_mode(&lines)?;

        let subtotal: Money = lines.iter().map(|l| l.amount).sum();
        let cgst: Money = lines.iter().map(|l| l.cgst).sum();
        let sgst: Money = lines.iter().map(|l| l.sgst).sum();
        let igst: Money = lines.iter().map(|l| l.igst).sum();
        let total_tax: Money = lines.iter().map(|l| l.tax).sum();
        let total = subtotal + total_tax;

        let totals = InvoiceTotals {
            currency,
            subtotal,
            cgst,
            sgst,
            igst,
            total_tax,
            total,
            tax_type: TaxType::from_components(cgst, sgst, igst),
        };

        Ok(InvoiceDocument {
            invoice_number: invoice_number.trim().to_string(),
            issued_on,
            booker,
            lines,
            totals,
            amount_in_words: amount_in_words(total, currency),
        })
    }

    /// Grand total formatted with the currency symbol.
    pub fn formatted_total(&self) -> String {
        self.totals.currency.format(self.totals.total)
    }
}

fn ensure_single_booker(booker: &BookerInfo, bookings: &[Booking]) -> CoreResult<()> {
    let expected = booker.email.trim();
    match bookings
        .iter()
        .find(|b| !b.booker.email.trim().eq_ignore_ascii_case(expected))
    {
        Some(other) => Err(CoreError::BookerMismatch {
            expected: expected.to_string(),
            found: other.booker.email.trim().to_string(),
        }),
        None => Ok(()),
    }
}

/// Untaxed lines fit either mode; taxed lines must all share one.
fn ensure_single_tax_mode(lines: &[InvoiceLine]) -> CoreResult<()> {
    let mut taxed = lines
        .iter()
        .map(|l| l.tax_type)
        .filter(|t| *t != TaxType::None);

    let Some(expected) = taxed.next() else {
        return Ok(());
    };
    match taxed.find(|t| *t != expected) {
        Some(found) => Err(CoreError::TaxModeMismatch { expected, found }),
        None => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ServiceOffering, TaxRate};

    fn gst_config() -> TaxConfig {
        TaxConfig::enabled("Tamil Nadu").with_rates(
            TaxRate::from_bps(900),
            TaxRate::from_bps(900),
            TaxRate::from_bps(1800),
        )
    }

    fn line(inr_major: i64, currency: Currency, recurrence: Recurrence) -> LineItem {
        let offering = ServiceOffering {
            id: format!("svc-{}", inr_major),
            name: format!("Service {}", inr_major),
            price_inr: Money::from_major(inr_major),
            price_usd: Money::from_major(inr_major / 50),
        };
        LineItem::new(&offering, currency, recurrence, None)
    }

    fn booker() -> BookerInfo {
        BookerInfo {
            name: "Mary Thomas".to_string(),
            email: "mary@example.org".to_string(),
            state: "Tamil Nadu".to_string(),
            country: "India".to_string(),
            ..BookerInfo::default()
        }
    }

    fn stored_booking(amount: i64, igst: i64) -> Booking {
        let charge = BookingCharge {
            line_id: "line".to_string(),
            service_id: "svc".to_string(),
            service_name: "Mass Offering".to_string(),
            currency: Currency::Inr,
            recurrence: Recurrence::OneTime,
            booking_date: None,
            amount: Money::from_major(amount),
            tax: TaxBreakdown::inter_state(Money::from_major(igst)),
        };
        Booking::from_charge(&charge, &booker(), None)
    }

    #[test]
    fn test_build_invoice_intra_state() {
        let items = vec![
            line(500, Currency::Inr, Recurrence::OneTime),
            line(500, Currency::Inr, Recurrence::OneTime),
        ];
        let totals = build_invoice(&items, Some(&gst_config()), "Tamil Nadu", "India").unwrap();

        assert_eq!(totals.subtotal, Money::from_major(1000));
        assert_eq!(totals.cgst, Money::from_major(90));
        assert_eq!(totals.sgst, Money::from_major(90));
        assert_eq!(totals.total, Money::from_major(1180));
        assert_eq!(totals.tax_type, TaxType::CgstSgst);
        assert!(totals.is_consistent());
    }

    #[test]
    fn test_build_invoice_applies_recurrence() {
        let items = vec![
            line(100, Currency::Inr, Recurrence::Monthly),
            line(50, Currency::Inr, Recurrence::OneTime),
        ];
        let totals = build_invoice(&items, None, "Kerala", "India").unwrap();

        assert_eq!(totals.subtotal, Money::from_major(1250));
        assert_eq!(totals.total, Money::from_major(1250));
        assert_eq!(totals.tax_type, TaxType::None);
    }

    #[test]
    fn test_build_invoice_usd_is_untaxed() {
        let items = vec![line(1000, Currency::Usd, Recurrence::OneTime)];
        let totals = build_invoice(&items, Some(&gst_config()), "Tamil Nadu", "India").unwrap();

        assert_eq!(totals.currency, Currency::Usd);
        assert_eq!(totals.subtotal, Money::from_major(20));
        assert!(totals.total_tax.is_zero());
    }

    #[test]
    fn test_build_invoice_rejects_mixed_currency() {
        let items = vec![
            line(1000, Currency::Inr, Recurrence::OneTime),
            line(1000, Currency::Usd, Recurrence::OneTime),
        ];
        let err = build_invoice(&items, None, "", "").unwrap_err();
        assert!(matches!(
            err,
            CoreError::CurrencyMismatch { expected: Currency::Inr, found: Currency::Usd }
        ));
    }

    #[test]
    fn test_build_invoice_empty() {
        let totals = build_invoice(&[], Some(&gst_config()), "Tamil Nadu", "India").unwrap();
        assert_eq!(totals, InvoiceTotals::empty(Currency::Inr));
    }

    #[test]
    fn test_totals_consistent_across_inputs() {
        let config = gst_config();
        for (state, country) in [("Tamil Nadu", "India"), ("Kerala", "India"), ("", "USA")] {
            for major in [1, 99, 333, 1001, 54_321] {
                for recurrence in Recurrence::ALL {
                    let items = vec![line(major, Currency::Inr, recurrence)];
                    let totals = build_invoice(&items, Some(&config), state, country).unwrap();
                    assert!(totals.is_consistent(), "{:?}", totals);
                }
            }
        }
    }

    #[test]
    fn test_charge_line_items_taxes_each_line() {
        let items = vec![
            line(500, Currency::Inr, Recurrence::OneTime),
            line(100, Currency::Inr, Recurrence::Monthly),
        ];
        let charges = charge_line_items(&items, Some(&gst_config()), "Kerala", "India").unwrap();

        assert_eq!(charges.len(), 2);
        assert_eq!(charges[0].amount, Money::from_major(500));
        assert_eq!(charges[0].tax.igst, Money::from_major(90));
        assert_eq!(charges[1].amount, Money::from_major(1200));
        assert_eq!(charges[1].tax.igst, Money::from_major(216));
        assert_eq!(charges[1].line_id, items[1].id);
    }

    #[test]
    fn test_booking_copies_charge_verbatim() {
        let items = vec![line(1000, Currency::Inr, Recurrence::OneTime)];
        let charges = charge_line_items(&items, Some(&gst_config()), "Tamil Nadu", "India").unwrap();
        let booking = Booking::from_charge(&charges[0], &booker(), Some("pay_123".to_string()));

        assert_eq!(booking.amount, Money::from_major(1000));
        assert_eq!(booking.cgst_amount, Money::from_major(90));
        assert_eq!(booking.sgst_amount, Money::from_major(90));
        assert!(booking.igst_amount.is_zero());
        assert_eq!(booking.tax_amount, Money::from_major(180));
        assert_eq!(booking.tax_type(), TaxType::CgstSgst);
        assert_eq!(booking.total(), Money::from_major(1180));
    }

    #[test]
    fn test_multi_booking_invoice_sums_stored_tax() {
        let bookings = vec![
            stored_booking(500, 90),
            stored_booking(1000, 180),
            stored_booking(250, 45),
        ];
        let issued = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let invoice = InvoiceDocument::from_bookings("TRN-000123", issued, booker(), &bookings).unwrap();

        assert_eq!(invoice.totals.subtotal, Money::from_major(1750));
        assert_eq!(invoice.totals.total_tax, Money::from_major(315));
        assert_eq!(invoice.totals.total, Money::from_major(2065));
        assert_eq!(invoice.totals.total.to_string(), "2065.00");
        assert_eq!(invoice.totals.tax_type, TaxType::Igst);
        assert!(invoice.totals.is_consistent());
        assert_eq!(invoice.lines.len(), 3);
        assert_eq!(invoice.lines[2].total, Money::from_major(295));
        assert_eq!(
            invoice.amount_in_words.as_deref(),
            Some("Rupees Two Thousand Sixty Five Only")
        );
        assert_eq!(invoice.formatted_total(), "₹2,065.00");
    }

    #[test]
    fn test_invoice_trusts_stored_values_over_config() {
        // Stored tax is odd on purpose; the invoice must not "fix" it.
        let bookings = vec![stored_booking(1000, 7)];
        let issued = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let invoice = InvoiceDocument::from_bookings("TRN-1", issued, booker(), &bookings).unwrap();
        assert_eq!(invoice.totals.total, Money::from_major(1007));
    }

    #[test]
    fn test_invoice_errors() {
        let issued = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

        assert!(matches!(
            InvoiceDocument::from_bookings("TRN-1", issued, booker(), &[]),
            Err(CoreError::EmptyInvoice)
        ));
        assert!(matches!(
            InvoiceDocument::from_bookings("  ", issued, booker(), &[stored_booking(1, 0)]),
            Err(CoreError::Validation(_))
        ));

        let mut usd = stored_booking(10, 0);
        usd.currency = Currency::Usd;
        assert!(matches!(
            InvoiceDocument::from_bookings("TRN-1", issued, booker(), &[stored_booking(1, 0), usd]),
            Err(CoreError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_invoice_rejects_other_bookers() {
        let issued = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let mut other = stored_booking(500, 90);
        other.booker.email = "zach@example.org".to_string();

        let err = InvoiceDocument::from_bookings(
            "TRN-2",
            issued,
            booker(),
            &[stored_booking(1000, 180), other],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::BookerMismatch { ref expected, ref found }
                if expected == "mary@example.org" && found == "zach@example.org"
        ));

        // Same address, different case and padding.
        let mut same = stored_booking(500, 90);
        same.booker.email = " Mary@Example.org".to_string();
        assert!(InvoiceDocument::from_bookings("TRN-2", issued, booker(), &[same]).is_ok());
    }

    #[test]
    fn test_invoice_rejects_mixed_tax_modes() {
        let issued = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let items = vec![line(1000, Currency::Inr, Recurrence::OneTime)];
        let intra = charge_line_items(&items, Some(&gst_config()), "Tamil Nadu", "India").unwrap();
        let intra = Booking::from_charge(&intra[0], &booker(), None);
        let inter = stored_booking(1000, 180);

        let err = InvoiceDocument::from_bookings("TRN-3", issued, booker(), &[intra, inter])
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::TaxModeMismatch { expected: TaxType::CgstSgst, found: TaxType::Igst }
        ));
    }

    #[test]
    fn test_untaxed_line_joins_taxed_invoice() {
        let issued = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let bookings = vec![stored_booking(1000, 180), stored_booking(0, 0)];
        let invoice = InvoiceDocument::from_bookings("TRN-4", issued, booker(), &bookings).unwrap();

        assert_eq!(invoice.totals.tax_type, TaxType::Igst);
        assert!(invoice.totals.cgst.is_zero() && invoice.totals.sgst.is_zero());
    }

    #[test]
    fn test_usd_invoice_has_no_words() {
        let mut booking = stored_booking(25, 0);
        booking.currency = Currency::Usd;
        let issued = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let invoice = InvoiceDocument::from_bookings("TRN-9", issued, booker(), &[booking]).unwrap();

        assert!(invoice.amount_in_words.is_none());
        assert_eq!(invoice.formatted_total(), "$25.00");
    }
}
