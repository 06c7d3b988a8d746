//! # Invoice Text Formatting
//!
//! Digit grouping and "amount in words" for invoice documents.
//!
//! ## Indian Numbering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  International:   123,456,789     (3-3-3)                               │
//! │  Indian:        12,34,56,789      (…-2-2-3)                             │
//! │                  │  │  │  └── units + hundreds                          │
//! │                  │  │  └───── thousands                                 │
//! │                  │  └──────── lakhs    (1,00,000)                       │
//! │                  └─────────── crores   (1,00,00,000)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rupee invoices print the grand total in words using lakhs and crores.
//! Dollar invoices omit the words line entirely.

use crate::money::Money;
use crate::types::Currency;

const ONES: [&str; 20] = [
    "Zero", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
    "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;

// =============================================================================
// Digit Grouping
// =============================================================================

/// Renders an amount with Indian digit grouping, e.g. `12,34,567.89`.
///
/// ## Example
/// ```rust
/// use seva_core::format::format_indian_grouping;
/// use seva_core::money::Money;
///
/// assert_eq!(format_indian_grouping(Money::from_minor(123_456_789)), "12,34,567.89");
/// assert_eq!(format_indian_grouping(Money::from_minor(99_900)), "999.00");
/// ```
pub fn format_indian_grouping(amount: Money) -> String {
    let whole = amount.major_part().unsigned_abs().to_string();
    let grouped = if whole.len() <= 3 {
        whole
    } else {
        let (head, tail) = whole.split_at(whole.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };
    with_sign_and_fraction(amount, grouped)
}

/// Renders an amount with international digit grouping, e.g. `1,234,567.89`.
pub fn format_international_grouping(amount: Money) -> String {
    let whole = amount.major_part().unsigned_abs().to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    with_sign_and_fraction(amount, grouped)
}

fn with_sign_and_fraction(amount: Money, grouped: String) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    format!("{}{}.{:02}", sign, grouped, amount.minor_part())
}

// =============================================================================
// Amount in Words
// =============================================================================

/// Spells out an invoice amount.
///
/// Returns `None` for currencies that do not print a words line.
///
/// ## Example
/// ```rust
/// use seva_core::format::amount_in_words;
/// use seva_core::money::Money;
/// use seva_core::types::Currency;
///
/// let words = amount_in_words(Money::from_minor(12_345_678), Currency::Inr).unwrap();
/// assert_eq!(
///     words,
///     "Rupees One Lakh Twenty Three Thousand Four Hundred Fifty Six and Seventy Eight Paise Only"
/// );
/// assert!(amount_in_words(Money::from_major(10), Currency::Usd).is_none());
/// ```
pub fn amount_in_words(amount: Money, currency: Currency) -> Option<String> {
    match currency {
        Currency::Inr => Some(rupees_in_words(amount)),
        Currency::Usd => None,
    }
}

fn rupees_in_words(amount: Money) -> String {
    let rupees = amount.major_part().unsigned_abs();
    let paise = amount.minor_part() as u64;
    let sign = if amount.is_negative() { "Minus " } else { "" };

    match (rupees, paise) {
        (0, 0) => "Rupees Zero Only".to_string(),
        (0, p) => format!("{}{} Paise Only", sign, indian_number_in_words(p)),
        (r, 0) => format!("{}Rupees {} Only", sign, indian_number_in_words(r)),
        (r, p) => format!(
            "{}Rupees {} and {} Paise Only",
            sign,
            indian_number_in_words(r),
            indian_number_in_words(p)
        ),
    }
}

/// Spells out a whole number using crores, lakhs and thousands.
///
/// Counts above 99 crore recurse, so one trillion reads "One Lakh Crore".
pub fn indian_number_in_words(n: u64) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }

    let mut parts: Vec<String> = Vec::new();

    let crores = n / CRORE;
    if crores > 0 {
        parts.push(format!("{} Crore", indian_number_in_words(crores)));
    }

    let lakhs = (n % CRORE) / LAKH;
    if lakhs > 0 {
        parts.push(format!("{} Lakh", below_hundred(lakhs)));
    }

    let thousands = (n % LAKH) / THOUSAND;
    if thousands > 0 {
        parts.push(format!("{} Thousand", below_hundred(thousands)));
    }

    let hundreds = (n % THOUSAND) / 100;
    if hundreds > 0 {
        parts.push(format!("{} Hundred", ONES[hundreds as usize]));
    }

    let rest = n % 100;
    if rest > 0 {
        parts.push(below_hundred(rest));
    }

    parts.join(" ")
}

fn below_hundred(n: u64) -> String {
    debug_assert!(n < 100);
    if n < 20 {
        ONES[n as usize].to_string()
    } else if n % 10 == 0 {
        TENS[(n / 10) as usize].to_string()
    } else {
        format!("{} {}", TENS[(n / 10) as usize], ONES[(n % 10) as usize])
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
