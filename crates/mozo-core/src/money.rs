//! # Money Module
//!
//! Display formatting for peso amounts, es-UY style.
//!
//! ## Compute in f64, Display in Centésimos
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHERE ROUNDING HAPPENS                                                 │
//! │                                                                         │
//! │  bill::compute      f64 all the way (742.5 / 1.22 = 608.6065...)        │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Money::from_amount  round once, to whole centésimos (i64)              │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Display             "608,61"   "1.234.567,89"   "-247,50"              │
//! │                                                                         │
//! │  The pipeline never sees a rounded value. Formatting is display-only.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mozo_core::money::{format_money, Money};
//!
//! assert_eq!(format_money(742.5), "742,50");
//! assert_eq!(format_money(1234567.891), "1.234.567,89");
//! assert_eq!(Money::from_amount(608.6066).to_string(), "608,61");
//! ```

use std::fmt;

// =============================================================================
// Money Type
// =============================================================================

/// A peso amount in centésimos, ready for display.
///
/// ## Design Decisions
/// - **i64 (signed)**: negative lines show discounts and refunds
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **No arithmetic**: sums happen in the pipeline before rounding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centésimos.
    ///
    /// ## Example
    /// ```rust
    /// use mozo_core::money::Money;
    ///
    /// let price = Money::from_cents(74250); // $ 742,50
    /// assert_eq!(price.cents(), 74250);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds a computed amount to the nearest centésimo.
    ///
    /// Halves round away from zero. NaN and infinities become zero.
    pub fn from_amount(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the value in centésimos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-peso portion, without sign.
    #[inline]
    pub const fn pesos(&self) -> u64 {
        self.0.unsigned_abs() / 100
    }

    /// Returns the centésimos portion (always 0-99).
    #[inline]
    pub const fn centesimos(&self) -> u64 {
        self.0.unsigned_abs() % 100
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

/// es-UY rendering: `.` groups thousands, `,` separates centésimos.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(
            f,
            "{}{},{:02}",
            sign,
            group_thousands(self.pesos()),
            self.centesimos()
        )
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    grouped
}

// =============================================================================
// Formatting Helpers
// =============================================================================

/// Formats an amount with exactly two decimals and es-UY grouping.
pub fn format_money(value: f64) -> String {
    Money::from_amount(value).to_string()
}

/// Formats a percentage with one decimal and a decimal comma ("20,0").
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return "0,0".to_string();
    }
    let tenths = (value * 10.0).round() as i64;
    let sign = if tenths < 0 { "-" } else { "" };
    let tenths = tenths.unsigned_abs();
    format!("{}{},{}", sign, tenths / 10, tenths % 10)
}

/// Rounds to two decimals, for values stored back into a form field.
#[inline]
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// =============================================================================
// Unit Tests
// =============================================================================
