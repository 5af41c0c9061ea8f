//! # Command-Line Arguments
//!
//! ```text
//! mozo compute <AMOUNT> [--tip PCT | --fixed-tip AMT | --no-tip]
//!                       [--discount PCT] [--timing refund|invoice]
//!                       [--exclude-tip-from-discount] [--vat-refund PCT]
//!                       [--split [PEOPLE]] [--receipts] [--json]
//! mozo convert-tip --to fixed|percentage --base <AMOUNT>
//!                  [--percentage PCT] [--fixed AMT]
//! mozo eval <EXPRESSION>
//! ```
//!
//! Numeric flags are kept as text. They are normalized by the core exactly
//! like form fields, so `--discount 150` becomes 100 instead of an error.

use clap::{Parser, Subcommand, ValueEnum};
use mozo_core::{DiscountTiming, TipMode};

#[derive(Debug, Parser)]
#[command(name = "mozo", version, about = "Mozo, la cuenta! What you really pay at a restaurant in Uruguay")]
pub struct Args {
    /// Settings file (defaults to ./mozo.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the full bill breakdown
    Compute(ComputeArgs),

    /// Convert a tip between percentage and fixed amount
    ConvertTip(ConvertTipArgs),

    /// Evaluate an amount expression such as "500+300"
    Eval {
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },
}

#[derive(Debug, clap::Args)]
pub struct ComputeArgs {
    /// Bill total as printed, arithmetic allowed ("1200/3", "500+300")
    #[arg(allow_hyphen_values = true)]
    pub amount: String,

    /// Tip percentage (0-100)
    #[arg(long, value_name = "PCT", allow_hyphen_values = true, conflicts_with_all = ["fixed_tip", "no_tip"])]
    pub tip: Option<String>,

    /// Tip as a fixed amount instead of a percentage
    #[arg(long, value_name = "AMOUNT", allow_hyphen_values = true, conflicts_with = "no_tip")]
    pub fixed_tip: Option<String>,

    /// Do not leave a tip
    #[arg(long)]
    pub no_tip: bool,

    /// Card discount percentage (0-100)
    #[arg(long, value_name = "PCT", allow_hyphen_values = true)]
    pub discount: Option<String>,

    /// When the card discount is applied
    #[arg(long, value_enum, default_value_t = Timing::Refund)]
    pub timing: Timing,

    /// Apply a refund-timed card discount to the bill only
    #[arg(long)]
    pub exclude_tip_from_discount: bool,

    /// Ley 17.934 IVA refund percentage (0-22)
    #[arg(long, value_name = "PCT", allow_hyphen_values = true)]
    pub vat_refund: Option<String>,

    /// Split between diners; without a value uses the configured count
    #[arg(long, value_name = "PEOPLE", num_args = 0..=1)]
    pub split: Option<Option<String>>,

    /// Also print the e-Ticket and POS voucher
    #[arg(long)]
    pub receipts: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args)]
pub struct ConvertTipArgs {
    /// Mode to switch to
    #[arg(long, value_enum)]
    pub to: Mode,

    /// Amount the tip applies to (the POS amount), arithmetic allowed
    #[arg(long, value_name = "AMOUNT", allow_hyphen_values = true)]
    pub base: String,

    /// Current tip percentage
    #[arg(long, value_name = "PCT", allow_hyphen_values = true)]
    pub percentage: Option<String>,

    /// Current fixed tip
    #[arg(long, value_name = "AMOUNT", allow_hyphen_values = true)]
    pub fixed: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Timing {
    /// Bank refunds the discount later; the terminal charges full price
    Refund,
    /// Restaurant discounts the invoice itself
    Invoice,
}

impl From<Timing> for DiscountTiming {
    fn from(timing: Timing) -> Self {
        match timing {
            Timing::Refund => DiscountTiming::Refund,
            Timing::Invoice => DiscountTiming::Invoice,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Percentage,
    Fixed,
}

impl From<Mode> for TipMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Percentage => TipMode::Percentage,
            Mode::Fixed => TipMode::Fixed,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
