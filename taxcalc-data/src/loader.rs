use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use taxcalc_core::{
    BracketTable, CorporateRateTier, CorporateRates, FilingStatus, GstCategory, IndirectRates,
    Jurisdiction, ParseCodeError, ScheduleError, TaxBracket, TaxSchedule, TaxYearConfig,
};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading rate data.
#[derive(Debug, Error)]
pub enum ScheduleLoadError {
    #[error("CSV parse error in {file}: {message}")]
    CsvParse { file: &'static str, message: String },

    #[error("Invalid schedule '{schedule}' for {jurisdiction}")]
    InvalidSchedule {
        jurisdiction: Jurisdiction,
        schedule: String,
    },

    #[error(transparent)]
    UnknownCode(#[from] ParseCodeError),

    #[error("{file} has a row for tax year {found}, expected {expected}")]
    YearMismatch {
        file: &'static str,
        expected: i32,
        found: i32,
    },

    #[error("Tax year {0} has no entry in tax_year_config.csv")]
    MissingYearConfig(i32),

    #[error("Invalid indirect rates for {jurisdiction}: {reason}")]
    InvalidIndirectRates {
        jurisdiction: Jurisdiction,
        reason: String,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

impl From<ScheduleLoadError> for ScheduleError {
    fn from(err: ScheduleLoadError) -> Self {
        match err {
            ScheduleLoadError::Schedule(inner) => inner,
            other => ScheduleError::Source(other.to_string()),
        }
    }
}

/// Maps IRS schedule codes to filing statuses.
///
/// - Schedule X → Single (S)
/// - Schedule Y-1 → Married Filing Jointly (MFJ)
/// - Schedule Y-2 → Married Filing Separately (MFS)
/// - Schedule Z → Head of Household (HOH)
fn schedule_to_filing_status(schedule: &str) -> Option<FilingStatus> {
    match schedule {
        "X" => Some(FilingStatus::Single),
        "Y-1" => Some(FilingStatus::MarriedFilingJointly),
        "Y-2" => Some(FilingStatus::MarriedFilingSeparately),
        "Z" => Some(FilingStatus::HeadOfHousehold),
        _ => None,
    }
}

/// A single record from `brackets.csv`.
///
/// - `jurisdiction`: `US`, `UK`, `IN` or `NG`
/// - `schedule`: the IRS schedule code (X, Y-1, Y-2, Z) for US rows, empty
///   otherwise
/// - `max_income`: empty for the open top bracket
/// - `rate`: the marginal rate as a decimal (e.g. 0.10 for 10%)
/// - `label`: optional display name (e.g. `Basic Rate`)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub tax_year: i32,
    pub jurisdiction: String,
    #[serde(default)]
    pub schedule: Option<String>,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
    #[serde(default)]
    pub label: Option<String>,
}

/// A single record from `indirect_rates.csv`. An empty `category` is the
/// jurisdiction's flat rate; `default` is the category fallback rate.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct IndirectRateRecord {
    pub tax_year: i32,
    pub jurisdiction: String,
    #[serde(default)]
    pub category: Option<String>,
    pub rate: Decimal,
}

/// A single record from `corporate_rates.csv`. An empty `max_profit` is the
/// open top tier.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CorporateRateRecord {
    pub tax_year: i32,
    pub jurisdiction: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_profit: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Contents of the four CSV files that describe one tax year.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleCsv<'a> {
    pub brackets: &'a str,
    pub indirect_rates: &'a str,
    pub corporate_rates: &'a str,
    pub tax_year_config: &'a str,
}

impl ScheduleCsv<'_> {
    pub const BRACKETS_FILE: &'static str = "brackets.csv";
    pub const INDIRECT_RATES_FILE: &'static str = "indirect_rates.csv";
    pub const CORPORATE_RATES_FILE: &'static str = "corporate_rates.csv";
    pub const TAX_YEAR_CONFIG_FILE: &'static str = "tax_year_config.csv";
}

/// Loader that turns rate CSV data into a validated [`TaxSchedule`].
///
/// Every row must belong to the requested tax year; rows are grouped by
/// jurisdiction (and, for the US, by IRS schedule code) and handed to the
/// core constructors, which reject malformed tables.
pub struct ScheduleLoader;

impl ScheduleLoader {
    /// Parse records of type `T` from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or a
    /// string slice. `file` names the source in errors.
    pub fn parse<T, R>(
        file: &'static str,
        reader: R,
    ) -> Result<Vec<T>, ScheduleLoadError>
    where
        T: DeserializeOwned,
        R: Read,
    {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: T = result.map_err(|err| ScheduleLoadError::CsvParse {
                file,
                message: err.to_string(),
            })?;
            records.push(record);
        }

        Ok(records)
    }

    /// Build the schedule for `tax_year` from the contents of its CSV files.
    pub fn load(
        tax_year: i32,
        csv: &ScheduleCsv<'_>,
    ) -> Result<TaxSchedule, ScheduleLoadError> {
        let config = Self::year_config(
            tax_year,
            Self::parse(ScheduleCsv::TAX_YEAR_CONFIG_FILE, csv.tax_year_config.as_bytes())?,
        )?;
        let brackets: Vec<BracketRecord> =
            Self::parse(ScheduleCsv::BRACKETS_FILE, csv.brackets.as_bytes())?;
        let indirect: Vec<IndirectRateRecord> =
            Self::parse(ScheduleCsv::INDIRECT_RATES_FILE, csv.indirect_rates.as_bytes())?;
        let corporate: Vec<CorporateRateRecord> =
            Self::parse(ScheduleCsv::CORPORATE_RATES_FILE, csv.corporate_rates.as_bytes())?;

        let mut builder = TaxSchedule::builder(config);

        for ((jurisdiction, status), table) in Self::bracket_tables(tax_year, &brackets)? {
            debug!(%jurisdiction, ?status, brackets = table.len(), "loaded income tax table");
            builder = match status {
                Some(status) => builder.income_tax_for_status(jurisdiction, status, table)?,
                None => builder.income_tax(jurisdiction, table)?,
            };
        }
        for (jurisdiction, rates) in Self::indirect_rates(tax_year, &indirect)? {
            builder = builder.indirect(jurisdiction, rates);
        }
        for (jurisdiction, rates) in Self::corporate_rates(tax_year, &corporate)? {
            builder = builder.corporate(jurisdiction, rates);
        }

        let schedule = builder.build()?;
        info!(tax_year, jurisdictions = ?schedule.jurisdictions(), "built tax schedule");
        Ok(schedule)
    }

    fn year_config(
        tax_year: i32,
        records: Vec<TaxYearConfig>,
    ) -> Result<TaxYearConfig, ScheduleLoadError> {
        records
            .into_iter()
            .find(|config| config.tax_year == tax_year)
            .ok_or(ScheduleLoadError::MissingYearConfig(tax_year))
    }

    /// Groups bracket rows into one validated table per jurisdiction, or per
    /// (jurisdiction, filing status) for rows carrying a schedule code.
    fn bracket_tables(
        tax_year: i32,
        records: &[BracketRecord],
    ) -> Result<BTreeMap<(Jurisdiction, Option<FilingStatus>), BracketTable>, ScheduleLoadError>
    {
        let mut groups: BTreeMap<(Jurisdiction, Option<FilingStatus>), Vec<TaxBracket>> =
            BTreeMap::new();

        for record in records {
            check_year(ScheduleCsv::BRACKETS_FILE, tax_year, record.tax_year)?;
            let jurisdiction: Jurisdiction = record.jurisdiction.parse()?;

            let status = match record.schedule.as_deref().map(str::trim) {
                None | Some("") if jurisdiction != Jurisdiction::Us => None,
                Some(code) if jurisdiction == Jurisdiction::Us => {
                    Some(schedule_to_filing_status(code).ok_or_else(|| {
                        ScheduleLoadError::InvalidSchedule {
                            jurisdiction,
                            schedule: code.to_string(),
                        }
                    })?)
                }
                other => {
                    return Err(ScheduleLoadError::InvalidSchedule {
                        jurisdiction,
                        schedule: other.unwrap_or_default().to_string(),
                    });
                }
            };

            let mut bracket = TaxBracket::new(record.min_income, record.max_income, record.rate);
            if let Some(label) = record.label.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
                bracket = bracket.with_label(label);
            }
            groups.entry((jurisdiction, status)).or_default().push(bracket);
        }

        groups
            .into_iter()
            .map(|(key, mut brackets)| {
                brackets.sort_by(|a, b| a.min_income.cmp(&b.min_income));
                Ok((key, BracketTable::new(brackets)?))
            })
            .collect()
    }

    fn indirect_rates(
        tax_year: i32,
        records: &[IndirectRateRecord],
    ) -> Result<HashMap<Jurisdiction, IndirectRates>, ScheduleLoadError> {
        #[derive(Default)]
        struct Rows {
            flat: Option<Decimal>,
            default_rate: Option<Decimal>,
            categories: BTreeMap<GstCategory, Decimal>,
        }

        let mut grouped: BTreeMap<Jurisdiction, Rows> = BTreeMap::new();
        for record in records {
            check_year(ScheduleCsv::INDIRECT_RATES_FILE, tax_year, record.tax_year)?;
            let jurisdiction: Jurisdiction = record.jurisdiction.parse()?;
            let rows = grouped.entry(jurisdiction).or_default();

            match record.category.as_deref().map(str::trim) {
                None | Some("") => rows.flat = Some(record.rate),
                Some(c) if c.eq_ignore_ascii_case("default") => rows.default_rate = Some(record.rate),
                Some(c) => {
                    rows.categories.insert(c.parse()?, record.rate);
                }
            }
        }

        let invalid = |jurisdiction: Jurisdiction, reason: &str| ScheduleLoadError::InvalidIndirectRates {
            jurisdiction,
            reason: reason.to_string(),
        };

        grouped
            .into_iter()
            .map(|(jurisdiction, rows)| {
                let rates = match (rows.flat, rows.default_rate, rows.categories.is_empty()) {
                    (Some(rate), None, true) => IndirectRates::flat(rate)?,
                    (None, Some(default_rate), _) => {
                        IndirectRates::by_category(rows.categories, default_rate)?
                    }
                    (Some(_), _, _) => {
                        return Err(invalid(jurisdiction, "flat rate mixed with category rates"));
                    }
                    (None, None, _) => {
                        return Err(invalid(jurisdiction, "category rates need a default rate"));
                    }
                };
                Ok((jurisdiction, rates))
            })
            .collect()
    }

    fn corporate_rates(
        tax_year: i32,
        records: &[CorporateRateRecord],
    ) -> Result<HashMap<Jurisdiction, CorporateRates>, ScheduleLoadError> {
        let mut grouped: BTreeMap<Jurisdiction, Vec<CorporateRateTier>> = BTreeMap::new();
        for record in records {
            check_year(ScheduleCsv::CORPORATE_RATES_FILE, tax_year, record.tax_year)?;
            let jurisdiction: Jurisdiction = record.jurisdiction.parse()?;
            grouped.entry(jurisdiction).or_default().push(CorporateRateTier {
                max_profit: record.max_profit,
                rate: record.rate,
            });
        }

        grouped
            .into_iter()
            .map(|(jurisdiction, mut tiers)| {
                // Bounded tiers ascending, the open tier last.
                tiers.sort_by_key(|tier| (tier.max_profit.is_none(), tier.max_profit));
                Ok((jurisdiction, CorporateRates::new(tiers)?))
            })
            .collect()
    }
}

fn check_year(
    file: &'static str,
    expected: i32,
    found: i32,
) -> Result<(), ScheduleLoadError> {
    if expected != found {
        return Err(ScheduleLoadError::YearMismatch {
            file,
            expected,
            found,
        });
    }
    Ok(())
}
