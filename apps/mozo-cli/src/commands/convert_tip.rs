//! # Convert-Tip Command
//!
//! The tip-mode toggle on its own: given the POS amount and the current
//! tip, prints what the other field becomes.

use mozo_core::validation::{accept_fixed_tip, clamp_tip_percentage, parse_number};
use mozo_core::{convert_tip_mode, evaluate, Money, TipConversion, TipMode};
use tracing::debug;

use crate::args::ConvertTipArgs;
use crate::error::CliResult;
use crate::settings::Settings;

pub fn run(args: &ConvertTipArgs, settings: &Settings) -> CliResult<String> {
    let conversion = convert(args, settings);

    if args.json {
        return Ok(serde_json::to_string_pretty(&conversion)?);
    }

    Ok(describe(&conversion, &settings.currency_symbol))
}

/// Runs the conversion. A missing `--percentage` falls back to the
/// configured tip. Both current values are normalized like form fields
/// first: the percentage is clamped to 0-100 and a negative or
/// non-numeric fixed tip counts as unset.
pub fn convert(args: &ConvertTipArgs, settings: &Settings) -> TipConversion {
    let to = TipMode::from(args.to);
    let from = match to {
        TipMode::Percentage => TipMode::Fixed,
        TipMode::Fixed => TipMode::Percentage,
    };

    let base = evaluate(&args.base);
    if base <= 0.0 {
        debug!(base = %args.base, "No positive base, tip values kept as they are");
    }

    let percentage = args
        .percentage
        .clone()
        .unwrap_or_else(|| settings.tip_percentage.to_string());
    let percentage = parse_number(&clamp_tip_percentage(&percentage));
    let fixed = args
        .fixed
        .as_deref()
        .and_then(|fixed| parse_number(&accept_fixed_tip("", fixed)));

    convert_tip_mode(from, to, base, percentage, fixed)
}

fn describe(conversion: &TipConversion, symbol: &str) -> String {
    match conversion.mode {
        TipMode::Fixed => match conversion.fixed {
            Some(fixed) => format!("Propina fija: {symbol} {}", Money::from_amount(fixed)),
            None => "Propina fija: sin definir".to_string(),
        },
        TipMode::Percentage => match conversion.percentage {
            Some(pct) => format!("Propina: {pct}%"),
            None => "Propina: sin definir".to_string(),
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{Args, Command};
    use clap::Parser;

    fn convert_args(argv: &[&str]) -> ConvertTipArgs {
        let mut full = vec!["mozo", "convert-tip"];
        full.extend_from_slice(argv);
        match Args::try_parse_from(full).expect("valid arguments").command {
            Command::ConvertTip(args) => args,
            other => panic!("expected convert-tip, got {other:?}"),
        }
    }

    #[test]
    fn test_percentage_to_fixed() {
        let args = convert_args(&["--to", "fixed", "--base", "742.5", "--percentage", "10"]);
        let text = run(&args, &Settings::default()).expect("convert");
        assert_eq!(text, "Propina fija: $ 74,25");
    }

    #[test]
    fn test_fixed_to_percentage() {
        let args = convert_args(&["--to", "percentage", "--base", "1000", "--fixed", "125"]);
        let conversion = convert(&args, &Settings::default());

        assert_eq!(conversion.mode, TipMode::Percentage);
        // 12.5 rounds half away from zero
        assert_eq!(conversion.percentage, Some(13.0));
        assert_eq!(conversion.fixed, Some(125.0));
    }

    #[test]
    fn test_percentage_defaults_to_settings() {
        let settings = Settings {
            tip_percentage: 15.0,
            ..Settings::default()
        };
        let args = convert_args(&["--to", "fixed", "--base", "500+500"]);
        assert_eq!(convert(&args, &settings).fixed, Some(150.0));
    }

    #[test]
    fn test_percentage_is_clamped_before_converting() {
        let args = convert_args(&["--to", "fixed", "--base", "1000", "--percentage", "150"]);
        let conversion = convert(&args, &Settings::default());

        assert_eq!(conversion.fixed, Some(1000.0));
        assert_eq!(conversion.percentage, Some(100.0));

        let args = convert_args(&["--to", "fixed", "--base", "1000", "--percentage", "abc"]);
        assert_eq!(convert(&args, &Settings::default()).fixed, None);
    }

    #[test]
    fn test_out_of_range_settings_tip_is_clamped() {
        let settings = Settings {
            tip_percentage: 250.0,
            ..Settings::default()
        };
        let args = convert_args(&["--to", "fixed", "--base", "500"]);
        assert_eq!(convert(&args, &settings).fixed, Some(500.0));
    }

    #[test]
    fn test_invalid_fixed_tip_is_unset() {
        let args = convert_args(&["--to", "percentage", "--base", "1000", "--fixed", "abc"]);
        let conversion = convert(&args, &Settings::default());

        assert_eq!(conversion.fixed, None);
        // Converted from an unset fixed tip
        assert_eq!(conversion.percentage, None);

        let args = convert_args(&["--to", "percentage", "--base", "1000", "--fixed", "-50"]);
        assert_eq!(convert(&args, &Settings::default()).fixed, None);
    }

    #[test]
    fn test_zero_base_keeps_values() {
        let args = convert_args(&["--to", "fixed", "--base", "0", "--percentage", "10"]);
        let conversion = convert(&args, &Settings::default());

        assert_eq!(conversion.mode, TipMode::Fixed);
        assert_eq!(conversion.fixed, None);
        assert_eq!(conversion.percentage, Some(10.0));
        assert_eq!(
            run(&args, &Settings::default()).expect("convert"),
            "Propina fija: sin definir"
        );
    }

    #[test]
    fn test_json_output() {
        let args = convert_args(&["--to", "fixed", "--base", "1000", "--percentage", "10", "--json"]);
        let json = run(&args, &Settings::default()).expect("convert");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["mode"], "fixed");
        assert_eq!(value["fixed"], 100.0);
        assert_eq!(value["percentage"], 10.0);
    }
}
