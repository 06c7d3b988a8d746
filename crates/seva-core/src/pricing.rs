//! # Recurring Pricing
//!
//! Expands a booking's base price into the amount charged at checkout.
//!
//! ```text
//! base price ──► compute_line_total(recurrence)
//!                    one-time ──► × 1
//!                    monthly  ──► × 12  (full year billed up front;
//!                    yearly   ──► × 12   the server expands the bookings)
//! ```

use crate::money::Money;
use crate::types::Recurrence;

/// Returns the amount charged at checkout for one cart line.
///
/// ## Example
/// ```rust
/// use seva_core::money::Money;
/// use seva_core::pricing::compute_line_total;
/// use seva_core::types::Recurrence;
///
/// let base = Money::from_major(101);
/// assert_eq!(compute_line_total(base, Recurrence::OneTime), base);
/// assert_eq!(compute_line_total(base, Recurrence::Monthly), Money::from_major(1212));
/// ```
#[inline]
pub fn compute_line_total(base_price: Money, recurrence: Recurrence) -> Money {
    base_price.multiply_quantity(recurrence.billing_multiplier())
}
