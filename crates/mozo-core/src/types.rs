//! # Domain Types
//!
//! Core domain types shared by the pipeline, the receipt views and every
//! presentation layer.
//!
//! ## Type Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   normalize   ┌─────────────────┐                  │
//! │  │  RawBillInput   │ ────────────► │    BillInput    │                  │
//! │  │  ─────────────  │               │  ─────────────  │                  │
//! │  │  form strings   │               │  typed, clamped │                  │
//! │  │  toggle flags   │               │  numbers        │                  │
//! │  └─────────────────┘               └────────┬────────┘                  │
//! │                                             │ compute                   │
//! │                                             ▼                           │
//! │  ┌─────────────────┐               ┌─────────────────┐                  │
//! │  │ PerPersonShare  │ ◄──────────── │   BillResult    │                  │
//! │  │  (split only)   │               │  all derived    │                  │
//! │  └─────────────────┘               └─────────────────┘                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Identity
//! None of these types has an ID or a lifecycle. A `BillResult` is rebuilt
//! from scratch on every input change and never refers to a previous one.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{
    DEFAULT_NUMBER_OF_PEOPLE, DEFAULT_TIP_PERCENT, LAW_17934_REFUND_PERCENT,
};

// =============================================================================
// Tip Mode
// =============================================================================

/// How the tip is specified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TipMode {
    /// Percentage of the POS amount.
    #[default]
    Percentage,
    /// Fixed amount in pesos.
    Fixed,
}

// =============================================================================
// Discount Timing
// =============================================================================

/// When the card issuer applies its discount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountTiming {
    /// Full amount charged now, discount credited later on the statement.
    #[default]
    Refund,
    /// Discount already subtracted from the amount charged at the terminal.
    Invoice,
}

// =============================================================================
// Bill Input
// =============================================================================

/// A typed, normalized snapshot of everything the diner entered.
///
/// Only the tip field matching `tip_mode` is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillInput {
    /// Raw arithmetic text for the bill total ("500+300").
    pub amount_expression: String,

    pub tip_mode: TipMode,

    /// 0–100.
    pub tip_percentage: f64,

    /// Pesos, no upper bound.
    pub fixed_tip: f64,

    /// When false the tip is 0 regardless of mode.
    pub wants_tip: bool,

    /// 0–100.
    pub card_discount_percentage: f64,

    pub discount_timing: DiscountTiming,

    /// Read only for [`DiscountTiming::Refund`].
    pub include_tip_in_discount_base: bool,

    /// 0–22.
    pub vat_refund_percentage: f64,

    pub split_enabled: bool,

    /// 2–99.
    pub number_of_people: u32,
}

impl Default for BillInput {
    /// Matches what the calculator shows on first load: 10% tip, Ley 17.934
    /// refund, no card discount.
    fn default() -> Self {
        BillInput {
            amount_expression: String::new(),
            tip_mode: TipMode::Percentage,
            tip_percentage: DEFAULT_TIP_PERCENT,
            fixed_tip: 0.0,
            wants_tip: true,
            card_discount_percentage: 0.0,
            discount_timing: DiscountTiming::Refund,
            include_tip_in_discount_base: true,
            vat_refund_percentage: LAW_17934_REFUND_PERCENT,
            split_enabled: false,
            number_of_people: DEFAULT_NUMBER_OF_PEOPLE,
        }
    }
}

// =============================================================================
// Raw Bill Input
// =============================================================================

/// The bill form as a UI holds it: text fields plus toggles.
///
/// Empty strings mean "unset". Call [`RawBillInput::normalize`] to get a
/// [`BillInput`] for the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RawBillInput {
    pub amount_expression: String,
    pub tip_mode: TipMode,
    pub tip_percentage: String,
    pub fixed_tip: String,
    pub wants_tip: bool,
    pub card_discount_percentage: String,
    pub discount_timing: DiscountTiming,
    pub include_tip_in_discount_base: bool,
    pub vat_refund_percentage: String,
    pub split_enabled: bool,
    pub number_of_people: String,
}

impl Default for RawBillInput {
    fn default() -> Self {
        RawBillInput {
            amount_expression: String::new(),
            tip_mode: TipMode::Percentage,
            tip_percentage: DEFAULT_TIP_PERCENT.to_string(),
            fixed_tip: String::new(),
            wants_tip: true,
            card_discount_percentage: String::new(),
            discount_timing: DiscountTiming::Refund,
            include_tip_in_discount_base: true,
            vat_refund_percentage: LAW_17934_REFUND_PERCENT.to_string(),
            split_enabled: false,
            number_of_people: DEFAULT_NUMBER_OF_PEOPLE.to_string(),
        }
    }
}

// =============================================================================
// Bill Result
// =============================================================================

/// The full breakdown of one computation.
///
/// Every field is derived from a [`BillInput`]; see [`crate::bill::compute`]
/// for the formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillResult {
    /// Evaluated bill total, the e-Ticket consumption.
    pub numeric_amount: f64,
    /// Bill after an invoice-timed discount.
    pub discounted_invoice_amount: f64,
    /// What the card terminal charges before tip.
    pub pos_amount: f64,
    pub numeric_tip: f64,
    /// Bill plus tip before any discount or refund.
    pub subtotal: f64,
    /// Amount the card discount percentage applies to.
    pub card_discount_base: f64,
    pub card_discount_amount: f64,
    /// Invoiced amount (tip excluded) that carries the 22% IVA.
    pub amount_for_vat: f64,
    /// `amount_for_vat` with IVA divided out.
    pub taxable_amount: f64,
    /// Refunded IVA.
    pub vat_discount: f64,
    pub final_price: f64,
    pub total_savings: f64,
    pub savings_percentage: f64,
    /// `numeric_amount > 0`.
    pub has_results: bool,
    /// Present only when splitting among two or more people.
    pub per_person: Option<PerPersonShare>,
}

impl BillResult {
    /// The "no results" state: every figure zero.
    pub fn empty() -> Self {
        BillResult {
            numeric_amount: 0.0,
            discounted_invoice_amount: 0.0,
            pos_amount: 0.0,
            numeric_tip: 0.0,
            subtotal: 0.0,
            card_discount_base: 0.0,
            card_discount_amount: 0.0,
            amount_for_vat: 0.0,
            taxable_amount: 0.0,
            vat_discount: 0.0,
            final_price: 0.0,
            total_savings: 0.0,
            savings_percentage: 0.0,
            has_results: false,
            per_person: None,
        }
    }
}

impl Default for BillResult {
    fn default() -> Self {
        BillResult::empty()
    }
}

// =============================================================================
// Per-Person Share
// =============================================================================

/// Aggregate figures divided by the number of people.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PerPersonShare {
    pub people: u32,
    pub numeric_amount: f64,
    pub numeric_tip: f64,
    pub card_discount_amount: f64,
    pub vat_discount: f64,
    pub final_price: f64,
    pub total_savings: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================
