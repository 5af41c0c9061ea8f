//! # Eval Command
//!
//! Evaluates an amount expression exactly as the amount field would.

use mozo_core::{try_evaluate, Money};
use tracing::warn;

use crate::settings::Settings;

/// Always succeeds: an expression that does not evaluate is worth 0.
pub fn run(expression: &str, settings: &Settings) -> String {
    let value = try_evaluate(expression).unwrap_or_else(|err| {
        warn!(%err, "Expression evaluates to 0");
        0.0
    });

    format!("{} {}", settings.currency_symbol, Money::from_amount(value))
}
