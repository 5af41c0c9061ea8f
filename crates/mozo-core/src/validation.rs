//! # Validation Module
//!
//! The input normalizer: turns raw form text into values the pipeline can
//! trust.
//!
//! ## Normalization Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Normalization Layers                               │
//! │                                                                         │
//! │  Layer 1: Field edit (set_* on RawBillInput)                           │
//! │  ├── clamp() keeps percentages and counts in range                     │
//! │  └── accept_fixed_tip() refuses negative or non-numeric edits          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Snapshot (RawBillInput::normalize)                           │
//! │  ├── Every field clamped again (the struct may be deserialized)        │
//! │  └── parse_or_zero(): unset strings become 0                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pipeline (bill::compute)                                     │
//! │  └── Receives only in-range numbers, never rejects                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Out-of-range values are clamped, never rejected. The `validate_*`
//! functions exist for callers that want to tell the user a value was
//! adjusted.
//!
//! ## Usage
//! ```rust
//! use mozo_core::validation::{clamp, clamp_card_discount, clamp_vat_refund};
//!
//! assert_eq!(clamp_card_discount("150"), "100");
//! assert_eq!(clamp_vat_refund("30"), "22");
//! assert_eq!(clamp("abc", 0.0, 100.0), "");
//! assert_eq!(clamp("12.5", 0.0, 100.0), "12.5");
//! ```

use crate::error::{CoreResult, ValidationError};
use crate::expression::try_evaluate;
use crate::types::{BillInput, RawBillInput};
use crate::{
    DEFAULT_NUMBER_OF_PEOPLE, MAX_CARD_DISCOUNT_PERCENT, MAX_NUMBER_OF_PEOPLE,
    MAX_TIP_PERCENT, MAX_VAT_REFUND_PERCENT, MIN_NUMBER_OF_PEOPLE,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Parsing
// =============================================================================

/// Parses a raw field as a finite number.
///
/// Surrounding whitespace is ignored. `NaN` and `inf` spellings are not
/// numbers here.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parses a raw field, treating anything unusable as `0`.
pub fn parse_or_zero(raw: &str) -> f64 {
    parse_number(raw).unwrap_or(0.0)
}

/// Parses the people count, falling back to the default when unset.
///
/// The value is clamped to 2–99 first. Fractions are truncated.
pub fn parse_people(raw: &str) -> u32 {
    match parse_number(&clamp_people(raw)) {
        Some(value) => value.trunc() as u32,
        None => DEFAULT_NUMBER_OF_PEOPLE,
    }
}

// =============================================================================
// Clamping
// =============================================================================

/// Clamps a raw numeric field into `[min, max]`.
///
/// ## Rules
/// - Non-numeric → `""` (unset)
/// - Below `min` → `min`
/// - Above `max` → `max`
/// - Otherwise the raw text is returned unchanged
pub fn clamp(raw: &str, min: f64, max: f64) -> String {
    match parse_number(raw) {
        None => String::new(),
        Some(value) if value < min => min.to_string(),
        Some(value) if value > max => max.to_string(),
        Some(_) => raw.to_string(),
    }
}

/// Card discount percentage, 0–100.
pub fn clamp_card_discount(raw: &str) -> String {
    clamp(raw, 0.0, MAX_CARD_DISCOUNT_PERCENT)
}

/// VAT refund percentage, 0–22.
pub fn clamp_vat_refund(raw: &str) -> String {
    clamp(raw, 0.0, MAX_VAT_REFUND_PERCENT)
}

/// Tip percentage, 0–100.
pub fn clamp_tip_percentage(raw: &str) -> String {
    clamp(raw, 0.0, MAX_TIP_PERCENT)
}

/// Number of people sharing the bill, 2–99.
pub fn clamp_people(raw: &str) -> String {
    clamp(
        raw,
        MIN_NUMBER_OF_PEOPLE as f64,
        MAX_NUMBER_OF_PEOPLE as f64,
    )
}

/// Decides what the fixed-tip field holds after an edit.
///
/// ## Rules
/// - Empty candidate clears the field
/// - Negative or non-numeric candidate is rejected, `previous` is kept
/// - Anything else is accepted, there is no upper bound
///
/// ## Example
/// ```rust
/// use mozo_core::validation::accept_fixed_tip;
///
/// assert_eq!(accept_fixed_tip("50", "75"), "75");
/// assert_eq!(accept_fixed_tip("50", "-5"), "50");
/// assert_eq!(accept_fixed_tip("50", "abc"), "50");
/// assert_eq!(accept_fixed_tip("50", ""), "");
/// ```
pub fn accept_fixed_tip(previous: &str, candidate: &str) -> String {
    if candidate.trim().is_empty() {
        return String::new();
    }

    match parse_number(candidate) {
        Some(value) if value >= 0.0 => candidate.to_string(),
        _ => previous.to_string(),
    }
}

// =============================================================================
// Validators
// =============================================================================

/// Checks a raw field against `[min, max]` without adjusting it.
///
/// ## Example
/// ```rust
/// use mozo_core::validation::validate_in_range;
///
/// assert_eq!(validate_in_range("card discount", "25", 0.0, 100.0), Ok(25.0));
/// assert!(validate_in_range("card discount", "150", 0.0, 100.0).is_err());
/// assert!(validate_in_range("card discount", "x", 0.0, 100.0).is_err());
/// ```
pub fn validate_in_range(field: &str, raw: &str, min: f64, max: f64) -> ValidationResult<f64> {
    let value = parse_number(raw).ok_or_else(|| ValidationError::NotNumeric {
        field: field.to_string(),
    })?;

    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max,
        });
    }

    Ok(value)
}

/// Checks a raw fixed tip: numeric and not negative.
pub fn validate_fixed_tip(raw: &str) -> ValidationResult<f64> {
    let value = parse_number(raw).ok_or_else(|| ValidationError::NotNumeric {
        field: "fixed tip".to_string(),
    })?;

    if value < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "fixed tip".to_string(),
        });
    }

    Ok(value)
}

// =============================================================================
// Form Edits
// =============================================================================

impl RawBillInput {
    /// Stores a tip percentage edit, clamped.
    pub fn set_tip_percentage(&mut self, raw: &str) {
        self.tip_percentage = clamp_tip_percentage(raw);
    }

    /// Stores a fixed tip edit if acceptable.
    pub fn set_fixed_tip(&mut self, raw: &str) {
        self.fixed_tip = accept_fixed_tip(&self.fixed_tip, raw);
    }

    /// Stores a card discount edit, clamped.
    pub fn set_card_discount_percentage(&mut self, raw: &str) {
        self.card_discount_percentage = clamp_card_discount(raw);
    }

    /// Stores a VAT refund edit, clamped.
    pub fn set_vat_refund_percentage(&mut self, raw: &str) {
        self.vat_refund_percentage = clamp_vat_refund(raw);
    }

    /// Stores a people-count edit, clamped.
    pub fn set_number_of_people(&mut self, raw: &str) {
        self.number_of_people = clamp_people(raw);
    }

    /// Strict counterpart of [`RawBillInput::normalize`].
    ///
    /// Returns the first field that `normalize` would have to degrade: an
    /// amount that does not evaluate, or a set field that is not numeric
    /// or out of range. Unset (empty) fields are fine. The people count is
    /// only checked when the split is enabled.
    ///
    /// ## Example
    /// ```rust
    /// use mozo_core::{CoreError, RawBillInput};
    ///
    /// let mut form = RawBillInput::default();
    /// form.amount_expression = "500+300".to_string();
    /// assert!(form.validate().is_ok());
    ///
    /// form.card_discount_percentage = "150".to_string();
    /// assert!(matches!(form.validate(), Err(CoreError::Validation(_))));
    /// ```
    pub fn validate(&self) -> CoreResult<BillInput> {
        try_evaluate(&self.amount_expression)?;

        check_set("tip percentage", &self.tip_percentage, 0.0, MAX_TIP_PERCENT)?;
        if !self.fixed_tip.trim().is_empty() {
            validate_fixed_tip(&self.fixed_tip)?;
        }
        check_set(
            "card discount",
            &self.card_discount_percentage,
            0.0,
            MAX_CARD_DISCOUNT_PERCENT,
        )?;
        check_set(
            "VAT refund",
            &self.vat_refund_percentage,
            0.0,
            MAX_VAT_REFUND_PERCENT,
        )?;
        if self.split_enabled {
            check_set(
                "number of people",
                &self.number_of_people,
                MIN_NUMBER_OF_PEOPLE as f64,
                MAX_NUMBER_OF_PEOPLE as f64,
            )?;
        }

        Ok(self.normalize())
    }

    /// Produces the typed snapshot the pipeline consumes.
    ///
    /// Every field is clamped again, so a snapshot received over IPC is as
    /// safe as one built through the `set_*` methods.
    pub fn normalize(&self) -> BillInput {
        BillInput {
            amount_expression: self.amount_expression.clone(),
            tip_mode: self.tip_mode,
            tip_percentage: parse_or_zero(&clamp_tip_percentage(&self.tip_percentage)),
            fixed_tip: parse_or_zero(&accept_fixed_tip("", &self.fixed_tip)),
            wants_tip: self.wants_tip,
            card_discount_percentage: parse_or_zero(&clamp_card_discount(
                &self.card_discount_percentage,
            )),
            discount_timing: self.discount_timing,
            include_tip_in_discount_base: self.include_tip_in_discount_base,
            vat_refund_percentage: parse_or_zero(&clamp_vat_refund(&self.vat_refund_percentage)),
            split_enabled: self.split_enabled,
            number_of_people: parse_people(&self.number_of_people),
        }
    }
}

fn check_set(field: &str, raw: &str, min: f64, max: f64) -> ValidationResult<()> {
    if raw.trim().is_empty() {
        return Ok(());
    }
    validate_in_range(field, raw, min, max).map(|_| ())
}

// =============================================================================
// Unit Tests
// =============================================================================
