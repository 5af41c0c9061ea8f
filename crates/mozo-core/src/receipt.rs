//! # Receipt Module
//!
//! Receipt-style views of a computed bill. Everything here regroups fields
//! of a [`BillResult`]; no new figures are derived beyond the IVA line.
//!
//! ## Views
//! ```text
//! ┌──────────────────────────────┐   ┌──────────────────────────────┐
//! │  e-Ticket (InvoiceReceipt)   │   │  POS voucher (PosVoucher)    │
//! │                              │   │                              │
//! │  Consumo          990,00     │   │  Importe          742,50     │
//! │  Descuento (25%) -247,50     │   │  Propina           74,25     │
//! │  ──────────────────────────  │   │  Dev. IVA         -54,77     │
//! │  Subtotal grav.   608,61     │   │  ──────────────────────────  │
//! │  IVA 22%          133,89     │   │  Total            761,98     │
//! │  Total            742,50     │   │                              │
//! └──────────────────────────────┘   └──────────────────────────────┘
//! ```
//!
//! [`summary_lines`] is the itemized list shown above the final price.
//! Labels are left to the presentation layer; each line carries a
//! [`LineItem`] describing what it is.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{BillInput, BillResult, DiscountTiming, TipMode};
use crate::IVA_RATE_PERCENT;

// =============================================================================
// Invoice Receipt
// =============================================================================

/// The fiscal invoice (e-Ticket) as the restaurant issues it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceReceipt {
    pub consumption: f64,
    /// Percentage shown next to the discount line.
    pub discount_percentage: f64,
    /// Present only for invoice-timed discounts.
    pub discount: Option<f64>,
    pub taxable_subtotal: f64,
    /// IVA embedded in the total at the statutory rate.
    pub iva: f64,
    pub total: f64,
}

impl InvoiceReceipt {
    pub fn build(input: &BillInput, result: &BillResult) -> Self {
        let discounted = input.discount_timing == DiscountTiming::Invoice
            && input.card_discount_percentage > 0.0;

        InvoiceReceipt {
            consumption: result.numeric_amount,
            discount_percentage: input.card_discount_percentage,
            discount: discounted.then_some(result.card_discount_amount),
            taxable_subtotal: result.taxable_amount,
            iva: result.taxable_amount * IVA_RATE_PERCENT / 100.0,
            total: result.amount_for_vat,
        }
    }
}

// =============================================================================
// POS Voucher
// =============================================================================

/// The card terminal voucher.
///
/// A refund-timed card discount never shows here: the terminal charged the
/// full amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PosVoucher {
    pub amount: f64,
    pub tip: Option<f64>,
    /// Ley 17.934 refund, present when a refund percentage is set.
    pub vat_refund: Option<f64>,
    pub total: f64,
}

impl PosVoucher {
    pub fn build(input: &BillInput, result: &BillResult) -> Self {
        PosVoucher {
            amount: result.pos_amount,
            tip: (result.numeric_tip > 0.0).then_some(result.numeric_tip),
            vat_refund: (input.vat_refund_percentage > 0.0).then_some(result.vat_discount),
            total: result.pos_amount + result.numeric_tip - result.vat_discount,
        }
    }
}

// =============================================================================
// Summary Lines
// =============================================================================

/// What the card discount was computed over, shown when a tip exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountBase {
    BillAndTip,
    BillOnly,
}

/// The meaning of one summary line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LineItem {
    Consumption,
    InvoiceDiscount { percentage: f64 },
    DiscountedInvoice,
    PosAmount,
    /// `percentage` is set in percentage mode only.
    Tip { percentage: Option<f64> },
    Subtotal,
    CardDiscount {
        percentage: f64,
        base: Option<DiscountBase>,
    },
    VatRefund { percentage: f64, taxable: f64 },
}

/// One line of the breakdown. Deductions carry a negative amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SummaryLine {
    pub item: LineItem,
    pub amount: f64,
}

impl SummaryLine {
    fn new(item: LineItem, amount: f64) -> Self {
        SummaryLine { item, amount }
    }
}

/// Builds the itemized breakdown, in display order.
///
/// Returns no lines for the "no results" state.
pub fn summary_lines(input: &BillInput, result: &BillResult) -> Vec<SummaryLine> {
    if !result.has_results {
        return Vec::new();
    }

    let discount_pct = input.card_discount_percentage;
    let has_discount = discount_pct > 0.0;
    let mut lines = vec![SummaryLine::new(LineItem::Consumption, result.numeric_amount)];

    if input.discount_timing == DiscountTiming::Invoice && has_discount {
        lines.push(SummaryLine::new(
            LineItem::InvoiceDiscount {
                percentage: discount_pct,
            },
            -result.card_discount_amount,
        ));
        lines.push(SummaryLine::new(
            LineItem::DiscountedInvoice,
            result.discounted_invoice_amount,
        ));
        lines.push(SummaryLine::new(LineItem::PosAmount, result.pos_amount));
    }

    if result.numeric_tip > 0.0 {
        let percentage = match input.tip_mode {
            TipMode::Percentage => Some(input.tip_percentage),
            TipMode::Fixed => None,
        };
        lines.push(SummaryLine::new(
            LineItem::Tip { percentage },
            result.numeric_tip,
        ));
    }

    if input.discount_timing == DiscountTiming::Refund {
        lines.push(SummaryLine::new(LineItem::Subtotal, result.subtotal));

        if has_discount {
            let base = (result.numeric_tip > 0.0).then(|| {
                if input.include_tip_in_discount_base {
                    DiscountBase::BillAndTip
                } else {
                    DiscountBase::BillOnly
                }
            });
            lines.push(SummaryLine::new(
                LineItem::CardDiscount {
                    percentage: discount_pct,
                    base,
                },
                -result.card_discount_amount,
            ));
        }
    }

    if input.vat_refund_percentage > 0.0 {
        lines.push(SummaryLine::new(
            LineItem::VatRefund {
                percentage: input.vat_refund_percentage,
                taxable: result.taxable_amount,
            },
            -result.vat_discount,
        ));
    }

    lines
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill::compute;
    use crate::money::format_money;

    fn invoice_bill() -> BillInput {
        BillInput {
            amount_expression: "990".to_string(),
            tip_percentage: 10.0,
            card_discount_percentage: 25.0,
            discount_timing: DiscountTiming::Invoice,
            vat_refund_percentage: 9.0,
            ..BillInput::default()
        }
    }

    fn refund_bill() -> BillInput {
        BillInput {
            amount_expression: "1000".to_string(),
            tip_percentage: 10.0,
            card_discount_percentage: 20.0,
            discount_timing: DiscountTiming::Refund,
            include_tip_in_discount_base: true,
            vat_refund_percentage: 9.0,
            ..BillInput::default()
        }
    }

    #[test]
    fn test_invoice_receipt_matches_e_ticket() {
        let input = invoice_bill();
        let receipt = InvoiceReceipt::build(&input, &compute(&input));

        assert_eq!(format_money(receipt.consumption), "990,00");
        assert_eq!(receipt.discount.map(format_money).as_deref(), Some("247,50"));
        assert_eq!(format_money(receipt.taxable_subtotal), "608,61");
        assert_eq!(format_money(receipt.iva), "133,89");
        assert_eq!(format_money(receipt.total), "742,50");
    }

    #[test]
    fn test_refund_invoice_has_no_discount_line() {
        let input = refund_bill();
        let receipt = InvoiceReceipt::build(&input, &compute(&input));

        assert_eq!(receipt.discount, None);
        assert_eq!(receipt.total, 1000.0);
    }

    #[test]
    fn test_pos_voucher() {
        let input = invoice_bill();
        let result = compute(&input);
        let voucher = PosVoucher::build(&input, &result);

        assert_eq!(voucher.amount, 742.5);
        assert_eq!(voucher.tip, Some(74.25));
        assert_eq!(voucher.vat_refund, Some(result.vat_discount));
        assert_eq!(format_money(voucher.total), "761,98");
    }

    #[test]
    fn test_pos_voucher_omits_empty_lines() {
        let input = BillInput {
            wants_tip: false,
            vat_refund_percentage: 0.0,
            ..refund_bill()
        };
        let voucher = PosVoucher::build(&input, &compute(&input));

        assert_eq!(voucher.tip, None);
        assert_eq!(voucher.vat_refund, None);
        // Refund-timed discount is not on the voucher
        assert_eq!(voucher.total, 1000.0);
    }

    #[test]
    fn test_summary_for_invoice_discount() {
        let input = invoice_bill();
        let result = compute(&input);
        let items: Vec<LineItem> = summary_lines(&input, &result)
            .into_iter()
            .map(|line| line.item)
            .collect();

        assert_eq!(
            items,
            vec![
                LineItem::Consumption,
                LineItem::InvoiceDiscount { percentage: 25.0 },
                LineItem::DiscountedInvoice,
                LineItem::PosAmount,
                LineItem::Tip {
                    percentage: Some(10.0)
                },
                LineItem::VatRefund {
                    percentage: 9.0,
                    taxable: result.taxable_amount
                },
            ]
        );
    }

    #[test]
    fn test_summary_for_refund_discount() {
        let input = refund_bill();
        let result = compute(&input);
        let lines = summary_lines(&input, &result);
        let items: Vec<&LineItem> = lines.iter().map(|line| &line.item).collect();

        assert_eq!(items[0], &LineItem::Consumption);
        assert_eq!(items[2], &LineItem::Subtotal);
        assert_eq!(
            items[3],
            &LineItem::CardDiscount {
                percentage: 20.0,
                base: Some(DiscountBase::BillAndTip)
            }
        );
        assert_eq!(lines[3].amount, -220.0);
        assert!(lines[4].amount < 0.0);
    }

    #[test]
    fn test_summary_discount_note_needs_tip() {
        let input = BillInput {
            wants_tip: false,
            ..refund_bill()
        };
        let lines = summary_lines(&input, &compute(&input));

        assert!(lines.iter().any(|line| line.item
            == LineItem::CardDiscount {
                percentage: 20.0,
                base: None
            }));
        assert!(!lines
            .iter()
            .any(|line| matches!(line.item, LineItem::Tip { .. })));
    }

    #[test]
    fn test_fixed_tip_line_has_no_percentage() {
        let input = BillInput {
            tip_mode: TipMode::Fixed,
            fixed_tip: 150.0,
            ..refund_bill()
        };
        let lines = summary_lines(&input, &compute(&input));

        assert!(lines
            .iter()
            .any(|line| line.item == LineItem::Tip { percentage: None } && line.amount == 150.0));
    }

    #[test]
    fn test_no_lines_without_results() {
        let input = BillInput::default();
        assert!(summary_lines(&input, &compute(&input)).is_empty());
    }
}
