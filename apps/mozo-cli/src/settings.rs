//! # Settings
//!
//! User defaults applied before any command-line flag.
//!
//! ## Sources (Priority Order)
//! 1. Environment variables (`MOZO_*`, e.g. `MOZO_TIP_PERCENTAGE=15`)
//! 2. Settings file (`--config <path>`, else `mozo.toml` when present)
//! 3. Defaults (this file)
//!
//! Values from the file and the environment go through the same clamping
//! as command-line input once they reach the form, so an out-of-range
//! default degrades instead of failing.

use config::{Config, ConfigError, Environment, File};
use mozo_core::{DEFAULT_NUMBER_OF_PEOPLE, DEFAULT_TIP_PERCENT, LAW_17934_REFUND_PERCENT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Looked up next to the working directory when `--config` is not given.
/// Any extension the `config` crate understands is accepted.
pub const DEFAULT_SETTINGS_FILE: &str = "mozo";

pub const ENV_PREFIX: &str = "MOZO";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings loading failed: {0}")]
    Load(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Tip percentage used when `--tip` is not given.
    pub tip_percentage: f64,

    /// Ley 17.934 refund percentage used when `--vat-refund` is not given.
    pub vat_refund_percentage: f64,

    /// Diners used by a bare `--split`.
    pub number_of_people: u32,

    /// Prefix for every rendered amount.
    pub currency_symbol: String,

    /// Print the e-Ticket and POS voucher without `--receipts`.
    pub show_receipts: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tip_percentage: DEFAULT_TIP_PERCENT,
            vat_refund_percentage: LAW_17934_REFUND_PERCENT,
            number_of_people: DEFAULT_NUMBER_OF_PEOPLE,
            currency_symbol: "$".to_string(),
            show_receipts: false,
        }
    }
}

impl Settings {
    /// Loads settings from the layered sources.
    ///
    /// An explicit `config_path` must exist; the default file is optional.
    pub fn load(config_path: Option<&str>) -> Result<Self, SettingsError> {
        let defaults = Self::default();
        let path = config_path.unwrap_or(DEFAULT_SETTINGS_FILE);

        let settings = Config::builder()
            .set_default("tip_percentage", defaults.tip_percentage)?
            .set_default("vat_refund_percentage", defaults.vat_refund_percentage)?
            .set_default("number_of_people", i64::from(defaults.number_of_people))?
            .set_default("currency_symbol", defaults.currency_symbol)?
            .set_default("show_receipts", defaults.show_receipts)?
            .add_source(File::with_name(path).required(config_path.is_some()))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize::<Settings>()?;

        Ok(settings)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
