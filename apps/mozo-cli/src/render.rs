//! # Text Rendering
//!
//! Turns a computed bill into the Spanish breakdown printed by `mozo`.
//!
//! ```text
//! Consumo                                 $ 1.000,00
//! Propina (10%)                             $ 100,00
//! Subtotal                                $ 1.100,00
//! Dto. tarjeta (20%)                      - $ 220,00
//!     Sobre cuenta + propina
//! ──────────────────────────────────────────────────
//! Total a pagar                             $ 880,00
//! Ahorrás $ 220,00 (20,0%)
//! ```

use mozo_core::expression::has_operator;
use mozo_core::money::format_percent;
use mozo_core::receipt::DiscountBase;
use mozo_core::{
    summary_lines, BillInput, BillResult, InvoiceReceipt, LineItem, Money, PerPersonShare,
    PosVoucher, IVA_RATE_PERCENT,
};

const LABEL_WIDTH: usize = 32;
const AMOUNT_WIDTH: usize = 18;
const RULE_WIDTH: usize = LABEL_WIDTH + AMOUNT_WIDTH;

/// Shown instead of a breakdown when the amount is empty or not positive.
pub const NO_RESULTS_MESSAGE: &str = "Ingresá el monto para calcular";

/// Renders the full breakdown, optionally followed by both receipts.
pub fn breakdown(input: &BillInput, result: &BillResult, symbol: &str, receipts: bool) -> String {
    if !result.has_results {
        return NO_RESULTS_MESSAGE.to_string();
    }

    let mut out = Vec::new();

    if has_operator(&input.amount_expression) {
        out.push(format!(
            "{} = {}",
            input.amount_expression.trim(),
            amount_text(symbol, result.numeric_amount)
        ));
        out.push(String::new());
    }

    for line in summary_lines(input, result) {
        let (label, note) = describe(&line.item, symbol);
        out.push(row(&label, &amount_text(symbol, line.amount)));
        if let Some(note) = note {
            out.push(format!("    {note}"));
        }
    }

    out.push(rule());
    out.push(row("Total a pagar", &amount_text(symbol, result.final_price)));
    if result.total_savings != 0.0 {
        out.push(savings_badge(symbol, result.total_savings, result.savings_percentage));
    }

    if let Some(share) = &result.per_person {
        out.push(String::new());
        out.extend(per_person(share, symbol));
    }

    if receipts {
        out.push(String::new());
        out.extend(invoice(&InvoiceReceipt::build(input, result), symbol));
        out.push(String::new());
        out.extend(voucher(&PosVoucher::build(input, result), symbol));
    }

    out.join("\n")
}

fn describe(item: &LineItem, symbol: &str) -> (String, Option<String>) {
    match item {
        LineItem::Consumption => ("Consumo".to_string(), None),
        LineItem::InvoiceDiscount { percentage } => {
            (format!("Dto. en factura ({}%)", percent(*percentage)), None)
        }
        LineItem::DiscountedInvoice => ("Factura con descuento".to_string(), None),
        LineItem::PosAmount => ("Cobro en POS".to_string(), None),
        LineItem::Tip {
            percentage: Some(pct),
        } => (format!("Propina ({}%)", percent(*pct)), None),
        LineItem::Tip { percentage: None } => ("Propina".to_string(), None),
        LineItem::Subtotal => ("Subtotal".to_string(), None),
        LineItem::CardDiscount { percentage, base } => {
            let note = base.map(|base| match base {
                DiscountBase::BillAndTip => "Sobre cuenta + propina".to_string(),
                DiscountBase::BillOnly => "Solo sobre la cuenta".to_string(),
            });
            (format!("Dto. tarjeta ({}%)", percent(*percentage)), note)
        }
        LineItem::VatRefund {
            percentage,
            taxable,
        } => (
            format!("Devolución IVA ({}%)", percent(*percentage)),
            Some(format!("Sobre gravado {}", amount_text(symbol, *taxable))),
        ),
    }
}

fn per_person(share: &PerPersonShare, symbol: &str) -> Vec<String> {
    let mut lines = vec![
        format!("Por persona ({})", share.people),
        rule(),
        row("Consumo", &amount_text(symbol, share.numeric_amount)),
    ];
    if share.numeric_tip > 0.0 {
        lines.push(row("Propina", &amount_text(symbol, share.numeric_tip)));
    }
    if share.card_discount_amount > 0.0 {
        lines.push(row(
            "Dto. tarjeta",
            &amount_text(symbol, -share.card_discount_amount),
        ));
    }
    if share.vat_discount > 0.0 {
        lines.push(row(
            "Devolución IVA",
            &amount_text(symbol, -share.vat_discount),
        ));
    }
    lines.push(row("Paga cada uno", &amount_text(symbol, share.final_price)));
    lines.push(row("Ahorra cada uno", &amount_text(symbol, share.total_savings)));
    lines
}

fn invoice(receipt: &InvoiceReceipt, symbol: &str) -> Vec<String> {
    let mut lines = vec![
        "Factura (e-Ticket)".to_string(),
        rule(),
        row("Consumo", &amount_text(symbol, receipt.consumption)),
    ];
    if let Some(discount) = receipt.discount {
        lines.push(row(
            &format!("Descuento ({}%)", percent(receipt.discount_percentage)),
            &amount_text(symbol, -discount),
        ));
    }
    let iva = percent(IVA_RATE_PERCENT);
    lines.push(row(
        &format!("Subtotal gravado ({iva}%)"),
        &amount_text(symbol, receipt.taxable_subtotal),
    ));
    lines.push(row(&format!("IVA ({iva}%)"), &amount_text(symbol, receipt.iva)));
    lines.push(row("Total", &amount_text(symbol, receipt.total)));
    lines
}

fn voucher(voucher: &PosVoucher, symbol: &str) -> Vec<String> {
    let mut lines = vec![
        "Voucher POS".to_string(),
        rule(),
        row("Importe", &amount_text(symbol, voucher.amount)),
    ];
    if let Some(tip) = voucher.tip {
        lines.push(row("Propina", &amount_text(symbol, tip)));
    }
    if let Some(refund) = voucher.vat_refund {
        lines.push(row("Dev. IVA Ley 17.934", &amount_text(symbol, -refund)));
    }
    lines.push(row("Total", &amount_text(symbol, voucher.total)));
    lines
}

fn savings_badge(symbol: &str, savings: f64, percentage: f64) -> String {
    format!(
        "Ahorrás {} ({}%)",
        amount_text(symbol, savings),
        format_percent(percentage)
    )
}

/// Money with the currency symbol. Deductions read "- $ 247,50".
fn amount_text(symbol: &str, value: f64) -> String {
    let money = Money::from_amount(value);
    if money.is_negative() {
        format!("- {symbol} {}", Money::from_cents(money.cents().saturating_neg()))
    } else {
        format!("{symbol} {money}")
    }
}

/// Percentages as typed: 25 → "25", 12.5 → "12.5".
fn percent(value: f64) -> String {
    value.to_string()
}

fn row(label: &str, amount: &str) -> String {
    format!("{label:<LABEL_WIDTH$}{amount:>AMOUNT_WIDTH$}")
}

fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}

// =============================================================================
// Unit Tests
// =============================================================================
