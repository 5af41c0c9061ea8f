//! # Mozo CLI Library
//!
//! Command-line front end for `mozo-core`. Parses flags into the same form
//! snapshot the web calculator builds, then prints the breakdown.
//!
//! ## Module Organization
//! ```text
//! mozo_cli/
//! ├── lib.rs            ◄─── You are here (tracing setup & run)
//! ├── args.rs           ◄─── clap definitions
//! ├── settings.rs       ◄─── Layered user defaults
//! ├── commands/
//! │   ├── mod.rs        ◄─── Dispatch
//! │   ├── compute.rs    ◄─── Full bill breakdown
//! │   ├── convert_tip.rs◄─── Tip-mode toggle
//! │   └── eval.rs       ◄─── Amount expression evaluator
//! ├── render.rs         ◄─── Spanish text output
//! └── error.rs          ◄─── CLI error type
//! ```

pub mod args;
pub mod commands;
pub mod error;
pub mod render;
pub mod settings;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use args::Args;
use error::CliResult;
use settings::Settings;

/// Default log filter when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "warn";

/// Runs one `mozo` invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging ──► stderr, RUST_LOG or "warn"                   │
/// │  2. Parse Arguments ─────► clap exits on --help or bad usage            │
/// │  3. Load Settings ───────► defaults → mozo.toml → MOZO_* env            │
/// │  4. Dispatch ────────────► compute | convert-tip | eval                 │
/// │  5. Print ───────────────► stdout                                       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> CliResult<()> {
    init_tracing();

    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref())?;
    debug!(?settings, "Settings loaded");

    let output = commands::dispatch(&args.command, &settings)?;
    println!("{output}");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so `--json` output stays clean.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every adjustment and evaluation failure
/// - `RUST_LOG=mozo_cli=debug` - Only this crate
/// - Default: WARN level
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
