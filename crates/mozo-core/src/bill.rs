//! # Bill Module
//!
//! The bill calculation pipeline: one pure function from [`BillInput`] to
//! [`BillResult`].
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      compute(input)                                     │
//! │                                                                         │
//! │   1. amount        = evaluate(expression)        ≤ 0 → empty result    │
//! │   2. invoice       = Invoice ? amount × (1 − d%) : amount              │
//! │   3. pos           = invoice                                            │
//! │   4. tip           = pos × t%  |  fixed  |  0                           │
//! │   5. subtotal      = amount + tip                                       │
//! │   6. card discount = base × d%   (base: subtotal or amount)            │
//! │   7. taxable       = (Invoice ? pos : amount) / 1.22                    │
//! │      vat refund    = taxable × v%                                       │
//! │   8. final         = pos + tip − vat  (− card discount when Refund)    │
//! │   9. savings       = subtotal − final                                   │
//! │  10. per person    = each figure ÷ people          (split only)        │
//! │                                                                         │
//! │  Every step reads only earlier steps. Nothing is cached.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Discount Timings
//! - **Refund**: the terminal charges the full bill; the issuer credits the
//!   discount later. The discount is subtracted from the final price here.
//! - **Invoice**: the discount is already off the invoice. It lives inside
//!   `pos_amount` and must not be subtracted again; `card_discount_amount`
//!   is only the nominal value for display.
//!
//! The tip is always a percentage of what the terminal charges, and the IVA
//! refund always applies to the invoiced amount without tip.
//!
//! ## Example
//! ```rust
//! use mozo_core::bill::compute;
//! use mozo_core::types::{BillInput, DiscountTiming};
//!
//! let input = BillInput {
//!     amount_expression: "1000".to_string(),
//!     tip_percentage: 10.0,
//!     card_discount_percentage: 20.0,
//!     discount_timing: DiscountTiming::Refund,
//!     include_tip_in_discount_base: true,
//!     vat_refund_percentage: 0.0,
//!     ..BillInput::default()
//! };
//!
//! let result = compute(&input);
//! assert_eq!(result.numeric_tip, 100.0);
//! assert_eq!(result.card_discount_amount, 220.0);
//! assert_eq!(result.final_price, 880.0);
//! ```

use crate::expression::evaluate;
use crate::types::{BillInput, BillResult, DiscountTiming, PerPersonShare, RawBillInput, TipMode};
use crate::{IVA_GROSS_UP, MIN_NUMBER_OF_PEOPLE};

/// Computes the full breakdown for one bill.
///
/// Pure and deterministic: the same input always yields a bit-identical
/// result, and it is safe to call from any thread.
pub fn compute(input: &BillInput) -> BillResult {
    let numeric_amount = evaluate(&input.amount_expression);
    if numeric_amount <= 0.0 {
        return BillResult::empty();
    }

    let discount_pct = input.card_discount_percentage;
    let timing = input.discount_timing;

    let discounted_invoice_amount = match timing {
        DiscountTiming::Invoice => numeric_amount * (1.0 - discount_pct / 100.0),
        DiscountTiming::Refund => numeric_amount,
    };
    let pos_amount = discounted_invoice_amount;

    let numeric_tip = tip_amount(input, pos_amount);
    let subtotal = numeric_amount + numeric_tip;

    let card_discount_base = match timing {
        DiscountTiming::Refund if input.include_tip_in_discount_base => subtotal,
        DiscountTiming::Refund | DiscountTiming::Invoice => numeric_amount,
    };
    let card_discount_amount = card_discount_base * discount_pct / 100.0;

    let amount_for_vat = match timing {
        DiscountTiming::Invoice => pos_amount,
        DiscountTiming::Refund => numeric_amount,
    };
    let taxable_amount = amount_for_vat / IVA_GROSS_UP;
    let vat_discount = taxable_amount * input.vat_refund_percentage / 100.0;

    // No floor: stacked discounts above 100% can make this negative
    let final_price = match timing {
        DiscountTiming::Invoice => pos_amount + numeric_tip - vat_discount,
        DiscountTiming::Refund => pos_amount + numeric_tip - card_discount_amount - vat_discount,
    };

    let total_savings = subtotal - final_price;
    let savings_percentage = if subtotal > 0.0 {
        total_savings / subtotal * 100.0
    } else {
        0.0
    };

    let mut result = BillResult {
        numeric_amount,
        discounted_invoice_amount,
        pos_amount,
        numeric_tip,
        subtotal,
        card_discount_base,
        card_discount_amount,
        amount_for_vat,
        taxable_amount,
        vat_discount,
        final_price,
        total_savings,
        savings_percentage,
        has_results: true,
        per_person: None,
    };

    if input.split_enabled && input.number_of_people >= MIN_NUMBER_OF_PEOPLE {
        result.per_person = Some(PerPersonShare::split(&result, input.number_of_people));
    }

    result
}

/// Normalizes a raw form snapshot and computes it.
pub fn compute_raw(raw: &RawBillInput) -> BillResult {
    compute(&raw.normalize())
}

fn tip_amount(input: &BillInput, pos_amount: f64) -> f64 {
    if !input.wants_tip {
        return 0.0;
    }

    match input.tip_mode {
        TipMode::Percentage => pos_amount * input.tip_percentage / 100.0,
        TipMode::Fixed => input.fixed_tip,
    }
}

impl PerPersonShare {
    /// Divides the aggregate figures evenly. No rounding is applied.
    pub fn split(result: &BillResult, people: u32) -> Self {
        let n = people as f64;
        PerPersonShare {
            people,
            numeric_amount: result.numeric_amount / n,
            numeric_tip: result.numeric_tip / n,
            card_discount_amount: result.card_discount_amount / n,
            vat_discount: result.vat_discount / n,
            final_price: result.final_price / n,
            total_savings: result.total_savings / n,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn refund_with_tip(include_tip: bool) -> BillInput {
        BillInput {
            amount_expression: "1000".to_string(),
            tip_mode: TipMode::Percentage,
            tip_percentage: 10.0,
            wants_tip: true,
            card_discount_percentage: 20.0,
            discount_timing: DiscountTiming::Refund,
            include_tip_in_discount_base: include_tip,
            vat_refund_percentage: 0.0,
            ..BillInput::default()
        }
    }

    #[test]
    fn test_invoice_discount_with_law_refund() {
        let input = BillInput {
            amount_expression: "990".to_string(),
            wants_tip: false,
            card_discount_percentage: 25.0,
            discount_timing: DiscountTiming::Invoice,
            vat_refund_percentage: 9.0,
            ..BillInput::default()
        };

        let result = compute(&input);
        assert!(result.has_results);
        assert_close(result.numeric_amount, 990.0);
        assert_close(result.discounted_invoice_amount, 742.5);
        assert_close(result.pos_amount, 742.5);
        assert_close(result.numeric_tip, 0.0);
        assert_close(result.card_discount_amount, 247.5);
        assert_close(result.amount_for_vat, 742.5);
        assert_close(result.taxable_amount, 742.5 / 1.22);
        assert_close(result.vat_discount, 742.5 / 1.22 * 0.09);
        assert_close(result.final_price, 742.5 - 742.5 / 1.22 * 0.09);
        assert!((result.final_price - 687.7254).abs() < 1e-3);
    }

    #[test]
    fn test_refund_discount_includes_tip() {
        let result = compute(&refund_with_tip(true));
        assert_close(result.pos_amount, 1000.0);
        assert_close(result.numeric_tip, 100.0);
        assert_close(result.subtotal, 1100.0);
        assert_close(result.card_discount_base, 1100.0);
        assert_close(result.card_discount_amount, 220.0);
        assert_close(result.vat_discount, 0.0);
        assert_close(result.final_price, 880.0);
        assert_close(result.total_savings, 220.0);
        assert_close(result.savings_percentage, 20.0);
    }

    #[test]
    fn test_refund_discount_excludes_tip() {
        let result = compute(&refund_with_tip(false));
        assert_close(result.card_discount_base, 1000.0);
        assert_close(result.card_discount_amount, 200.0);
        assert_close(result.final_price, 900.0);
        assert_close(result.total_savings, 200.0);
    }

    #[test]
    fn test_split_divides_aggregates() {
        let input = BillInput {
            split_enabled: true,
            number_of_people: 4,
            ..refund_with_tip(true)
        };

        let result = compute(&input);
        let share = result.per_person.expect("split requested");
        assert_eq!(share.people, 4);
        assert_close(share.numeric_amount, 250.0);
        assert_close(share.numeric_tip, 25.0);
        assert_close(share.card_discount_amount, 55.0);
        assert_close(share.final_price, 220.0);
        assert_close(share.total_savings, 55.0);
        // Aggregates are untouched
        assert_close(result.final_price, 880.0);
    }

    #[test]
    fn test_no_split_without_flag_or_people() {
        assert!(compute(&refund_with_tip(true)).per_person.is_none());

        let single = BillInput {
            split_enabled: true,
            number_of_people: 1,
            ..refund_with_tip(true)
        };
        assert!(compute(&single).per_person.is_none());
    }

    #[test]
    fn test_tip_base_is_pos_amount() {
        let input = BillInput {
            amount_expression: "990".to_string(),
            tip_percentage: 10.0,
            card_discount_percentage: 25.0,
            discount_timing: DiscountTiming::Invoice,
            vat_refund_percentage: 9.0,
            ..BillInput::default()
        };

        let result = compute(&input);
        assert_close(result.numeric_tip, 74.25);
        assert_close(result.subtotal, 990.0 + 74.25);
        // Tip is never part of the taxable base
        assert_close(result.taxable_amount, 742.5 / 1.22);
        assert_close(
            result.final_price,
            742.5 + 74.25 - result.vat_discount,
        );
    }

    #[test]
    fn test_fixed_tip_and_no_tip() {
        let fixed = BillInput {
            amount_expression: "500+300".to_string(),
            tip_mode: TipMode::Fixed,
            tip_percentage: 50.0,
            fixed_tip: 60.0,
            vat_refund_percentage: 0.0,
            ..BillInput::default()
        };
        let result = compute(&fixed);
        assert_close(result.numeric_amount, 800.0);
        assert_close(result.numeric_tip, 60.0);
        assert_close(result.final_price, 860.0);

        let skipped = BillInput {
            wants_tip: false,
            ..fixed
        };
        let result = compute(&skipped);
        assert_close(result.numeric_tip, 0.0);
        assert_close(result.final_price, 800.0);
    }

    #[test]
    fn test_refund_vat_uses_full_invoice() {
        let input = BillInput {
            amount_expression: "1220".to_string(),
            wants_tip: false,
            card_discount_percentage: 20.0,
            discount_timing: DiscountTiming::Refund,
            vat_refund_percentage: 9.0,
            ..BillInput::default()
        };

        let result = compute(&input);
        assert_close(result.amount_for_vat, 1220.0);
        assert_close(result.taxable_amount, 1000.0);
        assert_close(result.vat_discount, 90.0);
        assert_close(result.final_price, 1220.0 - 244.0 - 90.0);
    }

    #[test]
    fn test_non_positive_amount_is_empty() {
        for expression in ["", "   ", "abc", "0", "100-200", "10/0"] {
            let input = BillInput {
                amount_expression: expression.to_string(),
                fixed_tip: 50.0,
                tip_mode: TipMode::Fixed,
                split_enabled: true,
                ..BillInput::default()
            };
            assert_eq!(compute(&input), BillResult::empty(), "{expression:?}");
        }
    }

    #[test]
    fn test_stacked_discounts_may_go_negative() {
        let input = BillInput {
            amount_expression: "1000".to_string(),
            wants_tip: false,
            card_discount_percentage: 100.0,
            discount_timing: DiscountTiming::Refund,
            vat_refund_percentage: 22.0,
            ..BillInput::default()
        };

        let result = compute(&input);
        assert!(result.final_price < 0.0);
        assert!(result.total_savings > result.subtotal);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let input = BillInput {
            amount_expression: "(1234.56+78.9)*1.1".to_string(),
            card_discount_percentage: 15.0,
            discount_timing: DiscountTiming::Invoice,
            split_enabled: true,
            number_of_people: 3,
            ..BillInput::default()
        };

        let first = compute(&input);
        let second = compute(&input);
        assert_eq!(first, second);
        assert_eq!(first.final_price.to_bits(), second.final_price.to_bits());
    }

    #[test]
    fn test_compute_raw_clamps_first() {
        let mut raw = RawBillInput {
            amount_expression: "1000".to_string(),
            ..RawBillInput::default()
        };
        raw.card_discount_percentage = "150".to_string();
        raw.vat_refund_percentage = "30".to_string();
        raw.wants_tip = false;

        let result = compute_raw(&raw);
        assert_close(result.card_discount_amount, 1000.0);
        assert_close(result.vat_discount, 1000.0 / 1.22 * 0.22);
    }

    #[test]
    fn test_compute_across_threads() {
        let owned = refund_with_tip(true);
        let input = &owned;
        let expected = compute(input);

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(move |_| scope.spawn(move || compute(input)))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
