use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use serde::Deserialize;
use taxcalc_core::{FilingStatus, GstCategory, Jurisdiction};

use crate::utils::parse_amount;

/// Progressive income, indirect and corporate tax for the US, UK, India and
/// Nigeria.
///
/// Rates come from the data bundled with the binary unless a data directory
/// is given. Settings can also be read from a TOML file (`./taxcalc.toml` by
/// default); flags override the file.
#[derive(Debug, Parser)]
#[command(name = "taxcalc", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a TOML settings file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Tax year to calculate for. Defaults to the latest available year.
    #[arg(long, global = true)]
    pub year: Option<i32>,

    /// Directory holding `<year>/*.csv` rate files.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Log filter, e.g. `debug` or `taxcalc_core=trace`. `RUST_LOG` wins.
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Personal income tax.
    Income {
        /// Jurisdiction code: US, UK, IN or NG.
        #[arg(short, long)]
        jurisdiction: Jurisdiction,

        /// Gross annual income; thousands separators are allowed.
        #[arg(short, long, value_parser = parse_amount)]
        amount: Decimal,

        /// Filing status (US only): S, MFJ, MFS or HOH.
        #[arg(short, long)]
        filing_status: Option<FilingStatus>,
    },

    /// VAT / GST on a transaction amount.
    Indirect {
        #[arg(short, long)]
        jurisdiction: Jurisdiction,

        /// Amount before tax.
        #[arg(short, long, value_parser = parse_amount)]
        amount: Decimal,

        /// GST category (India only): essential, basic, standard, luxury or sin.
        #[arg(short, long)]
        category: Option<GstCategory>,
    },

    /// Corporate tax on annual profit.
    Corporate {
        #[arg(short, long)]
        jurisdiction: Jurisdiction,

        #[arg(short, long, value_parser = parse_amount)]
        profit: Decimal,
    },

    /// Print the income tax brackets for a jurisdiction.
    Brackets {
        #[arg(short, long)]
        jurisdiction: Jurisdiction,

        #[arg(short, long)]
        filing_status: Option<FilingStatus>,
    },

    /// List the tax years that have rate data.
    Years,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
