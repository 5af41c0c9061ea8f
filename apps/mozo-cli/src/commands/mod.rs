//! # Commands
//!
//! One module per subcommand. Each returns the text to print so it can be
//! tested without capturing stdout.

pub mod compute;
pub mod convert_tip;
pub mod eval;

use crate::args::Command;
use crate::error::CliResult;
use crate::settings::Settings;

/// Dispatches a parsed subcommand.
pub fn dispatch(command: &Command, settings: &Settings) -> CliResult<String> {
    match command {
        Command::Compute(args) => compute::run(args, settings),
        Command::ConvertTip(args) => convert_tip::run(args, settings),
        Command::Eval { expression } => Ok(eval::run(expression, settings)),
    }
}
