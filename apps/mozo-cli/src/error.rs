//! # CLI Error Type
//!
//! Everything that can stop a `mozo` invocation. Bad bill input is never
//! one of them: the core degrades it to zero or unset.

use thiserror::Error;

use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum CliError {
    /// Settings file or environment could not be loaded.
    #[error("{0}")]
    Settings(#[from] SettingsError),

    /// JSON output could not be produced.
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
