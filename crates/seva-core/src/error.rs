//! # Error Types
//!
//! Domain-specific error types for seva-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  seva-core errors (this file)                                          │
//! │  ├── CoreError        - Cart, catalog and invoice rule violations      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  seva-store errors (separate crate)                                    │
//! │  └── StoreError       - Persistence failures (wraps CoreError)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → UI toast             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Missing tax configuration is NOT an error: the tax engine degrades to a
//! zero breakdown instead.

use thiserror::Error;

use crate::types::{Currency, TaxType};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Service is not published in the catalog.
    ///
    /// ## When This Occurs
    /// - Switching cart currency when an item's service was withdrawn
    /// - Looking up a service id that never existed
    #[error("Service not found in catalog: {0}")]
    ServiceNotFound(String),

    /// Cart line does not exist.
    #[error("Line item not found in cart: {0}")]
    LineItemNotFound(String),

    /// Line items or bookings are denominated in different currencies.
    ///
    /// ## When This Occurs
    /// A cart always rewrites every price on currency switch, so this only
    /// shows up when callers assemble item lists by hand.
    #[error("Currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch { expected: Currency, found: Currency },

    /// Cart has exceeded maximum allowed items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Bookings on one invoice belong to different bookers.
    #[error("Booking belongs to {found}, not {expected}")]
    BookerMismatch { expected: String, found: String },

    /// Bookings on one invoice were taxed under different GST modes.
    ///
    /// ## When This Occurs
    /// Bookings from an intra-state checkout and an inter-state checkout
    /// are put on the same invoice.
    #[error("Tax mode mismatch: expected {expected:?}, found {found:?}")]
    TaxModeMismatch { expected: TaxType, found: TaxType },

    /// An invoice needs at least one booking.
    #[error("Cannot build an invoice without bookings")]
    EmptyInvoice,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised at the boundary before values reach the pure calculators.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, malformed amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
