use anyhow::Context;
use clap::Parser;
use tracing::debug;

use taxcalc_cli::cli::Cli;
use taxcalc_cli::commands::{execute, load_registry};
use taxcalc_cli::config::{Options, Settings};
use taxcalc_cli::logging::init_logging;

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    let options = Options::resolve(&cli, settings);
    init_logging(&options.log_level)?;
    debug!(?options, "resolved options");

    let registry = load_registry(options.data_dir.as_deref())?;
    let output = execute(&cli.command, &registry, &options)?;
    println!("{output}");

    Ok(())
}
