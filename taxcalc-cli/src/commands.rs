use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use taxcalc_core::{FilingStatus, Jurisdiction, ScheduleRegistry, TaxCalculator, TaxSchedule};
use taxcalc_data::{bundled_registry, cwd_data_dir, data_dir_from_env, directory_registry};
use tracing::{debug, info, warn};

use crate::cli::Command;
use crate::config::Options;
use crate::render::{BracketListing, YearListing, render};

/// Rate data from `data_dir` if given, else from `TAXCALC_DATA_DIR`, else
/// from `./data` when it holds at least one tax year, else the data bundled
/// with the binary.
///
/// A directory named by the caller or the environment must hold at least
/// one tax year.
pub fn load_registry(data_dir: Option<&Path>) -> Result<ScheduleRegistry> {
    if let Some(dir) = data_dir.map(Path::to_path_buf).or_else(data_dir_from_env) {
        info!(dir = %dir.display(), "using rate data directory");
        let registry = read_directory(&dir)?;
        if registry.is_empty() {
            bail!("No tax year directories found in: {}", dir.display());
        }
        return Ok(registry);
    }

    if let Some(dir) = cwd_data_dir() {
        let registry = read_directory(&dir)?;
        if !registry.is_empty() {
            info!(dir = %dir.display(), "using rate data directory");
            return Ok(registry);
        }
        warn!(dir = %dir.display(), "ignoring data directory without tax years");
    }

    debug!("using bundled rate data");
    bundled_registry().context("Failed to load bundled rate data")
}

fn read_directory(dir: &Path) -> Result<ScheduleRegistry> {
    directory_registry(dir)
        .with_context(|| format!("Failed to load rate data from: {}", dir.display()))
}

/// The schedule for the requested year, or the latest one.
fn select_schedule(
    registry: &ScheduleRegistry,
    options: &Options,
) -> Result<Arc<TaxSchedule>> {
    match options.tax_year {
        Some(year) => Ok(registry.get(year)?),
        None => registry
            .latest()
            .ok_or_else(|| anyhow!("no tax years available")),
    }
}

/// Runs `command` against `registry` and returns the rendered output.
pub fn execute(
    command: &Command,
    registry: &ScheduleRegistry,
    options: &Options,
) -> Result<String> {
    debug!(?command, tax_year = ?options.tax_year, "running command");

    let output = match *command {
        Command::Income {
            jurisdiction,
            amount,
            filing_status,
        } => {
            let schedule = select_schedule(registry, options)?;
            let result = TaxCalculator::new(&schedule).calculate_income_tax(
                jurisdiction,
                amount,
                filing_status,
            )?;
            render(&result, options.format)?
        }
        Command::Indirect {
            jurisdiction,
            amount,
            category,
        } => {
            let schedule = select_schedule(registry, options)?;
            let result = TaxCalculator::new(&schedule).calculate_indirect_tax(
                amount,
                jurisdiction,
                category,
            )?;
            render(&result, options.format)?
        }
        Command::Corporate {
            jurisdiction,
            profit,
        } => {
            let schedule = select_schedule(registry, options)?;
            let result =
                TaxCalculator::new(&schedule).calculate_corporate_tax(profit, jurisdiction)?;
            render(&result, options.format)?
        }
        Command::Brackets {
            jurisdiction,
            filing_status,
        } => {
            let schedule = select_schedule(registry, options)?;
            let table = schedule.income_brackets(jurisdiction, filing_status)?;
            let listing = BracketListing {
                heading: brackets_heading(jurisdiction, filing_status, schedule.tax_year()),
                currency: jurisdiction.currency(),
                table,
            };
            render(&listing, options.format)?
        }
        Command::Years => render(&YearListing(registry.available_years()), options.format)?,
    };

    Ok(output)
}

fn brackets_heading(
    jurisdiction: Jurisdiction,
    filing_status: Option<FilingStatus>,
    tax_year: i32,
) -> String {
    let mut heading = format!(
        "{} income tax brackets, tax year {tax_year}",
        jurisdiction.name()
    );
    if let Some(period) = jurisdiction.tax_period(tax_year) {
        heading.push_str(&format!(" ({period})"));
    }
    if let (Jurisdiction::Us, Some(status)) = (jurisdiction, filing_status) {
        heading.push_str(&format!(", {}", status.label()));
    }
    heading
}
