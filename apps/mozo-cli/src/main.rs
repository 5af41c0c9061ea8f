//! # Mozo CLI Entry Point
//!
//! The actual setup lives in lib.rs for better testability.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging to stderr)
//! 2. Parse arguments
//! 3. Load settings (defaults → mozo.toml → MOZO_* env)
//! 4. Run the subcommand and print its output

fn main() -> anyhow::Result<()> {
    mozo_cli::run()?;
    Ok(())
}
