use std::fmt::{self, Display, Write};

use serde::Serialize;
use taxcalc_core::calculations::common::{format_percent, to_percent};
use taxcalc_core::calculations::progressive::{bracket_label, format_range};
use taxcalc_core::{BracketTable, Currency};

use crate::cli::OutputFormat;

/// Renders a calculation result as its `Display` text or as pretty JSON.
pub fn render<T>(
    value: &T,
    format: OutputFormat,
) -> Result<String, serde_json::Error>
where
    T: Serialize + Display,
{
    match format {
        OutputFormat::Text => Ok(value.to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(value),
    }
}

/// A bracket table with the currency needed to print its ranges.
#[derive(Debug, Serialize)]
pub struct BracketListing<'a> {
    pub heading: String,
    pub currency: Currency,
    #[serde(serialize_with = "serialize_table")]
    pub table: &'a BracketTable,
}

fn serialize_table<S>(
    table: &&BracketTable,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    table.brackets().serialize(serializer)
}

impl Display for BracketListing<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        writeln!(f)?;
        write!(f, "{:<22} {:<28} {:>7}", "Bracket", "Range", "Rate")?;
        for bracket in self.table.brackets() {
            writeln!(f)?;
            write!(
                f,
                "{:<22} {:<28} {:>7}",
                bracket_label(bracket),
                format_range(bracket, self.currency),
                format_percent(to_percent(bracket.tax_rate))
            )?;
        }
        Ok(())
    }
}

/// Registered tax years, one per line as text.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct YearListing(pub Vec<i32>);

impl Display for YearListing {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let mut text = String::new();
        for year in &self.0 {
            if !text.is_empty() {
                text.push('\n');
            }
            write!(text, "{year}")?;
        }
        f.write_str(&text)
    }
}
