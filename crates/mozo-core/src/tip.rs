//! # Tip Module
//!
//! Converts the tip between percentage and fixed form when the diner flips
//! the tip-mode toggle, so the peso amount survives the switch.
//!
//! ## Conversion Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Toggle            New value                          Stored as unset  │
//! │  ───────────────   ─────────────────────────────────  ─────────────── │
//! │  %  → $            round2(base × pct / 100)           result = 0      │
//! │  $  → %            round(100 × fixed / base), 0–100   result ≤ 0      │
//! │  same mode         nothing                                              │
//! │  base = 0          mode flips, values untouched                         │
//! │                                                                         │
//! │  base is the POS amount at toggle time, so an invoice-timed discount   │
//! │  is already out of it.                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use mozo_core::tip::convert_tip_mode;
//! use mozo_core::types::TipMode;
//!
//! let to_fixed = convert_tip_mode(TipMode::Percentage, TipMode::Fixed, 1000.0, Some(10.0), None);
//! assert_eq!(to_fixed.fixed, Some(100.0));
//!
//! let back = convert_tip_mode(TipMode::Fixed, TipMode::Percentage, 1000.0, None, to_fixed.fixed);
//! assert_eq!(back.percentage, Some(10.0));
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::bill::compute;
use crate::money::round_to_cents;
use crate::types::{RawBillInput, TipMode};
use crate::validation::parse_number;

/// Tip fields after a mode toggle. `None` means the field is unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TipConversion {
    pub mode: TipMode,
    pub percentage: Option<f64>,
    pub fixed: Option<f64>,
}

/// Converts the tip from one mode to the other at the given POS amount.
///
/// The field that is not being written keeps its current value.
pub fn convert_tip_mode(
    from: TipMode,
    to: TipMode,
    base_amount: f64,
    current_percentage: Option<f64>,
    current_fixed: Option<f64>,
) -> TipConversion {
    let unchanged = TipConversion {
        mode: to,
        percentage: current_percentage,
        fixed: current_fixed,
    };

    if from == to || base_amount.is_nan() || base_amount <= 0.0 {
        return unchanged;
    }

    match to {
        TipMode::Fixed => TipConversion {
            fixed: current_percentage
                .map(|pct| round_to_cents(base_amount * (pct / 100.0)))
                .filter(|fixed| *fixed > 0.0),
            ..unchanged
        },
        TipMode::Percentage => TipConversion {
            percentage: current_fixed
                .map(|fixed| (100.0 * fixed / base_amount).round().clamp(0.0, 100.0))
                .filter(|pct| *pct > 0.0),
            ..unchanged
        },
    }
}

impl RawBillInput {
    /// Flips the tip mode the way the toggle does, rewriting the converted
    /// field in place.
    ///
    /// The base is the POS amount of the current form; an empty bill flips
    /// the mode without touching either field.
    pub fn switch_tip_mode(&mut self, to: TipMode) {
        if self.tip_mode == to {
            return;
        }

        let base_amount = compute(&self.normalize()).pos_amount;
        let current_percentage = parse_number(&self.tip_percentage);
        let current_fixed = parse_number(&self.fixed_tip);
        let conversion = convert_tip_mode(
            self.tip_mode,
            to,
            base_amount,
            current_percentage,
            current_fixed,
        );

        self.tip_mode = conversion.mode;
        if conversion.percentage != current_percentage {
            self.tip_percentage = field_text(conversion.percentage);
        }
        if conversion.fixed != current_fixed {
            self.fixed_tip = field_text(conversion.fixed);
        }
    }
}

fn field_text(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

// =============================================================================
// Unit Tests
// =============================================================================
