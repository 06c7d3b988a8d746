//! # Checkout Flow
//!
//! Ties the pure cart and invoice logic to storage.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  payment captured                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  book_cart()                                                            │
//! │  ├── payment already booked? ──► clear cart, return stored bookings     │
//! │  ├── CartRepository::load                                               │
//! │  ├── CartState::charges (tax per line, booker's region)                 │
//! │  ├── BookingRepository::insert_many (one transaction)                   │
//! │  └── clear cart, CartRepository::save                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  assemble_invoice()                                                     │
//! │  ├── BookingRepository::list_by_ids                                     │
//! │  └── InvoiceDocument::from_bookings (sums stored values)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use seva_core::validation::validate_email;
use seva_core::{BookerInfo, Booking, CoreError, InvoiceDocument, TaxConfig};
use tracing::{info, warn};

use crate::error::{StoreError, StoreResult};
use crate::repository::booking::BookingRepository;
use crate::repository::CartRepository;

/// Turns the persisted cart into booking records and empties the cart.
///
/// The cart is only cleared once every booking is stored, so a failed
/// insert leaves the visitor's cart intact for a retry.
///
/// A retry with a `payment_reference` that already has bookings returns
/// those bookings and clears the cart without booking it again. This covers
/// a cart save that failed after the bookings were committed. Calls without
/// a reference are never deduplicated.
///
/// ## Errors
/// - `Domain(Validation)` for a malformed booker email
/// - `Domain(EmptyInvoice)` when the cart has no lines
/// - `Domain(CurrencyMismatch)` for a cart whose lines disagree on currency
pub async fn book_cart<R>(
    carts: &R,
    bookings: &BookingRepository,
    cart_key: &str,
    booker: &BookerInfo,
    tax_config: Option<&TaxConfig>,
    payment_reference: Option<String>,
) -> StoreResult<Vec<Booking>>
where
    R: CartRepository + ?Sized,
{
    validate_email(&booker.email)?;

    let mut cart = carts.load(cart_key).await?;

    if let Some(reference) = payment_reference.as_deref() {
        let existing = bookings.list_by_payment_reference(reference).await?;
        if !existing.is_empty() {
            warn!(
                payment_reference = %reference,
                bookings = existing.len(),
                "Payment already booked, clearing cart"
            );
            if !cart.is_empty() {
                cart.clear();
                carts.save(cart_key, &cart).await?;
            }
            return Ok(existing);
        }
    }

    if cart.is_empty() {
        return Err(CoreError::EmptyInvoice.into());
    }

    let charges = cart.charges(tax_config, &booker.state, &booker.country)?;
    let records: Vec<Booking> = charges
        .iter()
        .map(|charge| Booking::from_charge(charge, booker, payment_reference.clone()))
        .collect();

    bookings.insert_many(&records).await?;

    cart.clear();
    carts.save(cart_key, &cart).await?;

    info!(
        cart_key = %cart_key,
        bookings = records.len(),
        currency = %cart.currency,
        "Cart booked"
    );

    Ok(records)
}

/// Builds the invoice for previously stored bookings.
///
/// The booker printed on the invoice is the first booking's booker.
///
/// ## Errors
/// - `NotFound` if any id has no booking
/// - `Domain(EmptyInvoice)` when `booking_ids` is empty
/// - `Domain(CurrencyMismatch)` when the bookings span currencies
/// - `Domain(BookerMismatch)` when the bookings belong to different bookers
/// - `Domain(TaxModeMismatch)` when CGST+SGST and IGST bookings are mixed
pub async fn assemble_invoice(
    bookings: &BookingRepository,
    invoice_number: &str,
    issued_on: NaiveDate,
    booking_ids: &[String],
) -> StoreResult<InvoiceDocument> {
    let found = bookings.list_by_ids(booking_ids).await?;

    if let Some(missing) = booking_ids
        .iter()
        .find(|id| !found.iter().any(|b| &b.id == *id))
    {
        return Err(StoreError::not_found("Booking", missing.clone()));
    }

    let Some(first) = found.first() else {
        return Err(CoreError::EmptyInvoice.into());
    };

    let invoice =
        InvoiceDocument::from_bookings(invoice_number, issued_on, first.booker.clone(), &found)?;

    info!(
        invoice_number = %invoice.invoice_number,
        lines = invoice.lines.len(),
        total = %invoice.formatted_total(),
        "Invoice assembled"
    );

    Ok(invoice)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::cart::MemoryCartRepository;
    use crate::repository::DEFAULT_CART_KEY;
    use seva_core::{CartState, Currency, Money, Recurrence, ServiceOffering, TaxRate, TaxType};

    fn offering(id: &str, inr: i64, usd: i64) -> ServiceOffering {
        ServiceOffering {
            id: id.to_string(),
            name: format!("Service {}", id),
            price_inr: Money::from_major(inr),
            price_usd: Money::from_major(usd),
        }
    }

    fn gst_config() -> TaxConfig {
        TaxConfig::enabled("Tamil Nadu").with_rates(
            TaxRate::from_bps(900),
            TaxRate::from_bps(900),
            TaxRate::from_bps(1800),
        )
    }

    fn booker(state: &str) -> BookerInfo {
        BookerInfo {
            name: "Anna George".to_string(),
            email: "anna@example.org".to_string(),
            state: state.to_string(),
            country: "India".to_string(),
            ..BookerInfo::default()
        }
    }

    async fn seed_cart<R: CartRepository>(carts: &R, currency: Currency) {
        let mut cart = CartState::new(currency);
        cart.add_service(&offering("mass", 500, 10), Recurrence::OneTime, None)
            .unwrap();
        cart.add_service(&offering("novena", 1000, 20), Recurrence::OneTime, None)
            .unwrap();
        cart.add_service(&offering("candle", 250, 5), Recurrence::OneTime, None)
            .unwrap();
        carts.save(DEFAULT_CART_KEY, &cart).await.unwrap();
    }

    #[tokio::test]
    async fn test_book_cart_then_invoice() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let carts = db.carts();
        seed_cart(&carts, Currency::Inr).await;

        let booked = book_cart(
            &carts,
            &db.bookings(),
            DEFAULT_CART_KEY,
            &booker("Kerala"),
            Some(&gst_config()),
            Some("pay_29QQoUBi66xm2f".to_string()),
        )
        .await
        .unwrap();

        assert_eq!(booked.len(), 3);
        assert_eq!(booked[0].igst_amount, Money::from_major(90));
        assert_eq!(booked[1].igst_amount, Money::from_major(180));
        assert_eq!(booked[2].igst_amount, Money::from_major(45));
        assert!(carts.load(DEFAULT_CART_KEY).await.unwrap().is_empty());

        let ids: Vec<String> = booked.iter().map(|b| b.id.clone()).collect();
        let issued = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let invoice = assemble_invoice(&db.bookings(), "TRN-2026-0001", issued, &ids)
            .await
            .unwrap();

        assert_eq!(invoice.totals.subtotal, Money::from_major(1750));
        assert_eq!(invoice.totals.igst, Money::from_major(315));
        assert_eq!(invoice.totals.total, Money::from_major(2065));
        assert_eq!(invoice.totals.tax_type, TaxType::Igst);
        assert_eq!(invoice.booker.name, "Anna George");
        assert_eq!(
            invoice.amount_in_words.as_deref(),
            Some("Rupees Two Thousand Sixty Five Only")
        );
    }

    #[tokio::test]
    async fn test_intra_state_invoice_sums_per_line_halves() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let carts = MemoryCartRepository::new();
        seed_cart(&carts, Currency::Inr).await;

        let booked = book_cart(
            &carts,
            &db.bookings(),
            DEFAULT_CART_KEY,
            &booker("Tamil Nadu"),
            Some(&gst_config()),
            None,
        )
        .await
        .unwrap();

        let ids: Vec<String> = booked.iter().map(|b| b.id.clone()).collect();
        let issued = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let invoice = assemble_invoice(&db.bookings(), "TRN-7", issued, &ids)
            .await
            .unwrap();

        assert_eq!(invoice.totals.cgst, Money::from_minor(15_750));
        assert_eq!(invoice.totals.cgst, invoice.totals.sgst);
        assert_eq!(invoice.totals.tax_type, TaxType::CgstSgst);
        assert_eq!(invoice.totals.total, Money::from_major(1750 + 315));
    }

    #[tokio::test]
    async fn test_usd_cart_books_without_tax() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let carts = MemoryCartRepository::new();
        seed_cart(&carts, Currency::Usd).await;

        let booked = book_cart(
            &carts,
            &db.bookings(),
            DEFAULT_CART_KEY,
            &booker("Tamil Nadu"),
            Some(&gst_config()),
            Some("PAYPAL-CAPTURE-1".to_string()),
        )
        .await
        .unwrap();

        assert!(booked.iter().all(|b| b.tax_amount.is_zero()));
        assert!(booked.iter().all(|b| b.currency == Currency::Usd));
    }

    #[tokio::test]
    async fn test_empty_cart_cannot_be_booked() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let carts = MemoryCartRepository::new();

        let err = book_cart(&carts, &db.bookings(), DEFAULT_CART_KEY, &booker("Kerala"), None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Domain(CoreError::EmptyInvoice)));
    }

    #[tokio::test]
    async fn test_bad_email_keeps_cart() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let carts = MemoryCartRepository::new();
        seed_cart(&carts, Currency::Inr).await;
        let mut who = booker("Kerala");
        who.email = "not-an-email".to_string();

        let err = book_cart(&carts, &db.bookings(), DEFAULT_CART_KEY, &who, None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Domain(CoreError::Validation(_))));
        assert_eq!(carts.load(DEFAULT_CART_KEY).await.unwrap().item_count(), 3);
    }

    #[tokio::test]
    async fn test_retry_with_same_payment_returns_stored_bookings() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let carts = MemoryCartRepository::new();
        let reference = Some("pay_29QQoUBi66xm2f".to_string());
        seed_cart(&carts, Currency::Inr).await;

        let first = book_cart(
            &carts,
            &db.bookings(),
            DEFAULT_CART_KEY,
            &booker("Kerala"),
            Some(&gst_config()),
            reference.clone(),
        )
        .await
        .unwrap();

        // The cart save after the first booking did not stick.
        seed_cart(&carts, Currency::Inr).await;

        let retry = book_cart(
            &carts,
            &db.bookings(),
            DEFAULT_CART_KEY,
            &booker("Kerala"),
            Some(&gst_config()),
            reference,
        )
        .await
        .unwrap();

        let mut first_ids: Vec<String> = first.iter().map(|b| b.id.clone()).collect();
        let mut retry_ids: Vec<String> = retry.iter().map(|b| b.id.clone()).collect();
        first_ids.sort();
        retry_ids.sort();
        assert_eq!(first_ids, retry_ids);

        let stored = db.bookings().list_by_booker("anna@example.org").await.unwrap();
        assert_eq!(stored.len(), 3);
        assert!(carts.load(DEFAULT_CART_KEY).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_assemble_invoice_rejects_mixed_checkouts() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let carts = MemoryCartRepository::new();
        let issued = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();

        seed_cart(&carts, Currency::Inr).await;
        let local = book_cart(
            &carts,
            &db.bookings(),
            DEFAULT_CART_KEY,
            &booker("Tamil Nadu"),
            Some(&gst_config()),
            Some("pay_local".to_string()),
        )
        .await
        .unwrap();

        seed_cart(&carts, Currency::Inr).await;
        let visiting = book_cart(
            &carts,
            &db.bookings(),
            DEFAULT_CART_KEY,
            &booker("Kerala"),
            Some(&gst_config()),
            Some("pay_visiting".to_string()),
        )
        .await
        .unwrap();

        let ids = vec![local[0].id.clone(), visiting[0].id.clone()];
        let err = assemble_invoice(&db.bookings(), "TRN-8", issued, &ids)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(CoreError::TaxModeMismatch {
                expected: TaxType::CgstSgst,
                found: TaxType::Igst
            })
        ));

        let mut stranger = booker("Tamil Nadu");
        stranger.email = "zach@example.org".to_string();
        seed_cart(&carts, Currency::Inr).await;
        let theirs = book_cart(
            &carts,
            &db.bookings(),
            DEFAULT_CART_KEY,
            &stranger,
            Some(&gst_config()),
            Some("pay_stranger".to_string()),
        )
        .await
        .unwrap();

        let ids = vec![local[0].id.clone(), theirs[0].id.clone()];
        let err = assemble_invoice(&db.bookings(), "TRN-9", issued, &ids)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(CoreError::BookerMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_assemble_invoice_missing_booking() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let issued = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();

        let err = assemble_invoice(&db.bookings(), "TRN-1", issued, &["ghost".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));

        let err = assemble_invoice(&db.bookings(), "TRN-1", issued, &[])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Domain(CoreError::EmptyInvoice)));
    }
}
