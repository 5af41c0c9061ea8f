//! # Compute Command
//!
//! Fills a [`RawBillInput`] the way the web form would (settings first,
//! then flags, each edit clamped), computes it and renders the result.

use mozo_core::validation::{validate_fixed_tip, validate_in_range};
use mozo_core::{
    compute, summary_lines, BillInput, BillResult, InvoiceReceipt, PosVoucher, RawBillInput,
    SummaryLine, TipMode, MAX_CARD_DISCOUNT_PERCENT, MAX_NUMBER_OF_PEOPLE, MAX_TIP_PERCENT,
    MAX_VAT_REFUND_PERCENT, MIN_NUMBER_OF_PEOPLE,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::args::ComputeArgs;
use crate::error::CliResult;
use crate::render;
use crate::settings::Settings;

/// Machine-readable output of `mozo compute --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeReport {
    pub input: BillInput,
    pub result: BillResult,
    pub summary: Vec<SummaryLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice: Option<InvoiceReceipt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher: Option<PosVoucher>,
}

impl ComputeReport {
    pub fn new(input: BillInput, result: BillResult) -> Self {
        let summary = summary_lines(&input, &result);
        let (invoice, voucher) = if result.has_results {
            (
                Some(InvoiceReceipt::build(&input, &result)),
                Some(PosVoucher::build(&input, &result)),
            )
        } else {
            (None, None)
        };

        Self {
            input,
            result,
            summary,
            invoice,
            voucher,
        }
    }
}

pub fn run(args: &ComputeArgs, settings: &Settings) -> CliResult<String> {
    let form = build_form(args, settings);
    let input = form.normalize();
    let result = compute(&input);

    debug!(
        final_price = result.final_price,
        total_savings = result.total_savings,
        has_results = result.has_results,
        "Bill computed"
    );

    if args.json {
        let report = ComputeReport::new(input, result);
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    let receipts = args.receipts || settings.show_receipts;
    Ok(render::breakdown(
        &input,
        &result,
        &settings.currency_symbol,
        receipts,
    ))
}

/// Builds the form snapshot from settings and flags.
pub fn build_form(args: &ComputeArgs, settings: &Settings) -> RawBillInput {
    let mut form = RawBillInput {
        amount_expression: args.amount.clone(),
        wants_tip: !args.no_tip,
        discount_timing: args.timing.into(),
        include_tip_in_discount_base: !args.exclude_tip_from_discount,
        ..RawBillInput::default()
    };

    let tip = args
        .tip
        .clone()
        .unwrap_or_else(|| settings.tip_percentage.to_string());
    note_adjustment("tip percentage", &tip, 0.0, MAX_TIP_PERCENT);
    form.set_tip_percentage(&tip);

    if let Some(fixed) = &args.fixed_tip {
        if let Err(err) = validate_fixed_tip(fixed) {
            if !fixed.trim().is_empty() {
                warn!(value = %fixed, %err, "Fixed tip ignored");
            }
        }
        form.tip_mode = TipMode::Fixed;
        form.set_fixed_tip(fixed);
    }

    if let Some(discount) = &args.discount {
        note_adjustment("card discount", discount, 0.0, MAX_CARD_DISCOUNT_PERCENT);
        form.set_card_discount_percentage(discount);
    }

    let vat_refund = args
        .vat_refund
        .clone()
        .unwrap_or_else(|| settings.vat_refund_percentage.to_string());
    note_adjustment("VAT refund", &vat_refund, 0.0, MAX_VAT_REFUND_PERCENT);
    form.set_vat_refund_percentage(&vat_refund);

    if let Some(split) = &args.split {
        let people = split
            .clone()
            .unwrap_or_else(|| settings.number_of_people.to_string());
        note_adjustment(
            "number of people",
            &people,
            f64::from(MIN_NUMBER_OF_PEOPLE),
            f64::from(MAX_NUMBER_OF_PEOPLE),
        );
        form.split_enabled = true;
        form.set_number_of_people(&people);
    }

    // Field edits are clamped already, so what is left is the amount
    if let Err(err) = form.validate() {
        debug!(amount = %args.amount, %err, "Bill input degrades to no results");
    }

    form
}

/// Warns when a value is about to be clamped or blanked.
fn note_adjustment(field: &str, raw: &str, min: f64, max: f64) {
    if raw.trim().is_empty() {
        return;
    }
    if let Err(err) = validate_in_range(field, raw, min, max) {
        warn!(value = %raw, %err, "Input adjusted");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
