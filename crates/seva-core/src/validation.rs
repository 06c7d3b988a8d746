//! # Validation Module
//!
//! Input validation at the boundary of the pure calculators.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Booking form (React)                                         │
//! │  ├── Required fields, date pickers                                     │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Prices never negative, rates within 0–100%                        │
//! │  └── Cart size, invoice numbers, booker contact                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pure calculators (pricing, tax, invoice)                     │
//! │  └── Assume validated input, never fail on numbers                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::TaxRate;
use crate::{MAX_CART_ITEMS, MAX_PRICE_MINOR};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// 100% in basis points.
const MAX_TAX_RATE_BPS: u32 = 10_000;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a catalog or line price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free offerings)
/// - At most [`MAX_PRICE_MINOR`]
///
/// ## Example
/// ```rust
/// use seva_core::money::Money;
/// use seva_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_major(501)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_minor(-1)).is_err());
/// assert!(validate_price(Money::from_minor(i64::MAX / 10)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price.minor_units() > MAX_PRICE_MINOR {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_MINOR,
        });
    }

    Ok(())
}

/// Validates an amount sent to a payment gateway.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_payment_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a GST rate.
///
/// ## Rules
/// - Must be between 0 and 10000 bps (0% to 100%)
pub fn validate_tax_rate(field: &str, rate: TaxRate) -> ValidationResult<()> {
    if rate.bps() > MAX_TAX_RATE_BPS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_TAX_RATE_BPS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that one more line fits in the cart.
///
/// ## Rules
/// - Must not exceed MAX_CART_ITEMS (100)
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a state or country name.
///
/// ## Rules
/// - Must not be blank
/// - At most 100 characters
pub fn validate_region_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a server-issued invoice / transaction reference number.
///
/// ## Rules
/// - Must not be blank
/// - At most 50 characters
/// - Letters, digits, `-`, `/` and `_` only
///
/// ## Example
/// ```rust
/// use seva_core::validation::validate_invoice_number;
///
/// assert!(validate_invoice_number("TRN-2026/000123").is_ok());
/// assert!(validate_invoice_number("").is_err());
/// assert!(validate_invoice_number("TRN 1").is_err());
/// ```
pub fn validate_invoice_number(number: &str) -> ValidationResult<()> {
    let number = number.trim();

    if number.is_empty() {
        return Err(ValidationError::Required {
            field: "invoice number".to_string(),
        });
    }

    if number.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "invoice number".to_string(),
            max: 50,
        });
    }

    if !number
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '/' | '_'))
    {
        return Err(ValidationError::InvalidFormat {
            field: "invoice number".to_string(),
            reason: "must contain only letters, numbers, '-', '/' and '_'".to_string(),
        });
    }

    Ok(())
}

/// Validates a booker's email address.
///
/// Only a shape check: one `@` with a dotted domain after it.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if !valid || email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must be a valid email address".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
