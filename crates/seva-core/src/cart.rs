//! # Booking Cart
//!
//! The cart a visitor fills before paying.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UI Action               Cart Method              State Change          │
//! │  ─────────               ───────────              ────────────          │
//! │                                                                         │
//! │  Book a service ───────► add_service() ─────────► items.push(line)     │
//! │                                                                         │
//! │  Remove line ──────────► remove_item() ─────────► items.retain(..)     │
//! │                                                                         │
//! │  Toggle ₹ / $ ─────────► switch_currency() ─────► every base_price     │
//! │                                                   re-read from catalog │
//! │                                                                         │
//! │  Show totals ──────────► totals() ──────────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Every line is priced in the cart's currency
//! - A line's price always comes from the catalog, never from a conversion
//! - At most [`MAX_CART_ITEMS`] lines

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::config::TaxConfig;
use crate::error::{CoreError, CoreResult};
use crate::invoice::{build_invoice, charge_line_items, BookingCharge, InvoiceTotals};
use crate::money::Money;
use crate::pricing::compute_line_total;
use crate::types::{Currency, PaymentGateway, Recurrence, ServiceCatalog, ServiceOffering};
use crate::validation::{validate_cart_size, validate_price};
use crate::MAX_CART_ITEMS;

// =============================================================================
// Line Item
// =============================================================================

/// One booked service or purchased book in the cart.
///
/// Lines are immutable once added, apart from currency re-pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Cart line id (UUID v4).
    pub id: String,

    /// Catalog id of the booked service.
    pub service_id: String,

    /// Service name at time of adding (frozen).
    pub service_name: String,

    /// Price for one occurrence, in `currency`.
    pub base_price: Money,

    pub currency: Currency,

    pub recurrence: Recurrence,

    /// First date the service is performed, if the service is dated.
    #[ts(as = "Option<String>")]
    pub booking_date: Option<NaiveDate>,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// Creates a line for `offering` priced in `currency`.
    pub fn new(
        offering: &ServiceOffering,
        currency: Currency,
        recurrence: Recurrence,
        booking_date: Option<NaiveDate>,
    ) -> Self {
        LineItem {
            id: Uuid::new_v4().to_string(),
            service_id: offering.id.clone(),
            service_name: offering.name.clone(),
            base_price: offering.price_in(currency),
            currency,
            recurrence,
            booking_date,
            added_at: Utc::now(),
        }
    }

    /// Amount charged at checkout for this line.
    pub fn line_total(&self) -> Money {
        compute_line_total(self.base_price, self.recurrence)
    }
}

// =============================================================================
// Cart State
// =============================================================================

/// The booking cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartState {
    pub items: Vec<LineItem>,

    /// Currency every line is priced in.
    pub currency: Currency,

    /// When the cart was created or last cleared.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl CartState {
    /// Creates an empty cart in `currency`.
    pub fn new(currency: Currency) -> Self {
        CartState {
            items: Vec::new(),
            currency,
            created_at: Utc::now(),
        }
    }

    /// Gateway that will collect this cart's total.
    pub fn payment_gateway(&self) -> PaymentGateway {
        self.currency.gateway()
    }

    /// Adds a booking for `offering`, priced in the cart's currency.
    ///
    /// ## Returns
    /// The id of the new line.
    pub fn add_service(
        &mut self,
        offering: &ServiceOffering,
        recurrence: Recurrence,
        booking_date: Option<NaiveDate>,
    ) -> CoreResult<String> {
        if validate_cart_size(self.items.len()).is_err() {
            return Err(CoreError::CartTooLarge { max: MAX_CART_ITEMS });
        }
        validate_price(offering.price_in(self.currency))?;

        let line = LineItem::new(offering, self.currency, recurrence, booking_date);
        let id = line.id.clone();
        self.items.push(line);
        Ok(id)
    }

    /// Removes a line by id.
    pub fn remove_item(&mut self, line_id: &str) -> CoreResult<LineItem> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == line_id)
            .ok_or_else(|| CoreError::LineItemNotFound(line_id.to_string()))?;
        Ok(self.items.remove(index))
    }

    /// Switches the cart to `currency`, re-reading every price from the catalog.
    ///
    /// All-or-nothing: if any line's service is missing from the catalog the
    /// cart is left untouched and `ServiceNotFound` is returned. A catalog
    /// price outside [`validate_price`]'s range fails the same way.
    ///
    /// ## Example
    /// ```rust
    /// use seva_core::cart::CartState;
    /// use seva_core::money::Money;
    /// use seva_core::types::{Currency, Recurrence, ServiceCatalog, ServiceOffering};
    ///
    /// let offering = ServiceOffering {
    ///     id: "abhishekam".into(),
    ///     name: "Abhishekam".into(),
    ///     price_inr: Money::from_major(1001),
    ///     price_usd: Money::from_major(15),
    /// };
    /// let catalog: ServiceCatalog = vec![offering.clone()].into_iter().collect();
    ///
    /// let mut cart = CartState::new(Currency::Inr);
    /// cart.add_service(&offering, Recurrence::OneTime, None).unwrap();
    /// cart.switch_currency(Currency::Usd, &catalog).unwrap();
    ///
    /// assert_eq!(cart.items[0].base_price, Money::from_major(15));
    /// ```
    pub fn switch_currency(&mut self, currency: Currency, catalog: &ServiceCatalog) -> CoreResult<()> {
        let repriced = self
            .items
            .iter()
            .map(|item| -> CoreResult<Money> {
                let price = catalog
                    .get(&item.service_id)
                    .map(|offering| offering.price_in(currency))
                    .ok_or_else(|| CoreError::ServiceNotFound(item.service_id.clone()))?;
                validate_price(price)?;
                Ok(price)
            })
            .collect::<CoreResult<Vec<Money>>>()?;

        for (item, price) in self.items.iter_mut().zip(repriced) {
            item.base_price = price;
            item.currency = currency;
        }
        self.currency = currency;
        Ok(())
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Number of lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of every line total, before tax.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Invoice totals for the whole cart.
    pub fn totals(
        &self,
        tax_config: Option<&TaxConfig>,
        buyer_state: &str,
        buyer_country: &str,
    ) -> CoreResult<InvoiceTotals> {
        if self.items.is_empty() {
            return Ok(InvoiceTotals::empty(self.currency));
        }
        build_invoice(&self.items, tax_config, buyer_state, buyer_country)
    }

    /// Per-line charges to persist on booking records at checkout.
    pub fn charges(
        &self,
        tax_config: Option<&TaxConfig>,
        buyer_state: &str,
        buyer_country: &str,
    ) -> CoreResult<Vec<BookingCharge>> {
        charge_line_items(&self.items, tax_config, buyer_state, buyer_country)
    }
}

impl Default for CartState {
    fn default() -> Self {
        CartState::new(Currency::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
