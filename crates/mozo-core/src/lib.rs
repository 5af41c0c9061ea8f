//! # mozo-core: Pure Bill Engine for Mozo
//!
//! This crate is the **heart** of Mozo, the "Mozo, la cuenta!" restaurant
//! bill calculator for Uruguay. It works out what a diner really pays once
//! the card discount, the Ley 17.934 IVA refund, the tip and the split are
//! applied. Everything is a pure function with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Mozo Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation (web form, mozo-cli)                  │   │
//! │  │    Amount ──► Tip ──► IVA refund ──► Card discount ──► Split    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ RawBillInput                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ mozo-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │  validation ──► expression ──► bill ──► receipt / money         │   │
//! │  │  (clamp)        (amount)       (compute)  (views, es-UY text)   │   │
//! │  │                                                                 │   │
//! │  │                      tip (mode toggle)                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Bill input and result types
//! - [`expression`] - Restricted arithmetic evaluator for the amount field
//! - [`validation`] - Input normalizer (clamping, safe parsing)
//! - [`bill`] - The calculation pipeline
//! - [`tip`] - Percentage/fixed tip conversion
//! - [`receipt`] - e-Ticket, POS voucher and summary views
//! - [`money`] - es-UY money formatting
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, bit for bit
//! 2. **No I/O**: no files, network or logging sinks here
//! 3. **Degrade, Don't Fail**: malformed input becomes 0 or unset
//! 4. **Closed Grammar**: the amount field is parsed, never executed
//!
//! ## Example Usage
//!
//! ```rust
//! use mozo_core::{compute, format_money, RawBillInput};
//!
//! let mut form = RawBillInput::default(); // 10% tip, 9% IVA refund
//! form.amount_expression = "500+300".to_string();
//! form.set_card_discount_percentage("20");
//!
//! let result = compute(&form.normalize());
//! assert!(result.has_results);
//! assert_eq!(format_money(result.numeric_amount), "800,00");
//! assert_eq!(format_money(result.numeric_tip), "80,00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill;
pub mod error;
pub mod expression;
pub mod money;
pub mod receipt;
pub mod tip;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use bill::{compute, compute_raw};
pub use error::{CoreError, CoreResult, ExpressionError, ValidationError};
pub use expression::{evaluate, try_evaluate};
pub use money::{format_money, Money};
pub use receipt::{summary_lines, InvoiceReceipt, LineItem, PosVoucher, SummaryLine};
pub use tip::{convert_tip_mode, TipConversion};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Statutory IVA rate embedded in Uruguayan invoice totals, in percent.
pub const IVA_RATE_PERCENT: f64 = 22.0;

/// Factor that divides IVA out of a gross invoice total (1 + 22%).
pub const IVA_GROSS_UP: f64 = 1.22;

/// Ley 17.934 refund for card payments in food service, in percent.
pub const LAW_17934_REFUND_PERCENT: f64 = 9.0;

/// Tip suggested on first load, in percent.
pub const DEFAULT_TIP_PERCENT: f64 = 10.0;

/// Longest amount expression the evaluator will look at.
///
/// Anything longer evaluates to 0 without being tokenized.
pub const MAX_EXPRESSION_LENGTH: usize = 200;

pub const MAX_CARD_DISCOUNT_PERCENT: f64 = 100.0;

/// The refund can never exceed the IVA itself.
pub const MAX_VAT_REFUND_PERCENT: f64 = IVA_RATE_PERCENT;

pub const MAX_TIP_PERCENT: f64 = 100.0;

pub const MIN_NUMBER_OF_PEOPLE: u32 = 2;

pub const MAX_NUMBER_OF_PEOPLE: u32 = 99;

pub const DEFAULT_NUMBER_OF_PEOPLE: u32 = MIN_NUMBER_OF_PEOPLE;
