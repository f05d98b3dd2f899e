//! Per-jurisdiction income tax adapters.
//!
//! Each adapter selects its bracket table from a [`TaxSchedule`], applies any
//! jurisdiction rule that sits outside the progressive evaluation, and
//! reports the result in the jurisdiction's currency.

mod india;
mod nigeria;
mod uk;
mod us;

use rust_decimal::Decimal;
use tracing::debug;

pub use india::{CESS_LABEL, calculate_india_tax};
pub use nigeria::calculate_nigeria_tax;
pub use uk::{calculate_uk_tax, derive_tapered_brackets};
pub use us::calculate_usa_tax;

use crate::error::TaxError;
use crate::models::{FilingStatus, Jurisdiction, TaxCalculationResult};
use crate::schedule::TaxSchedule;

/// Routes to the adapter for `jurisdiction`.
///
/// # Errors
///
/// [`TaxError::FilingStatusRequired`] for the US without a filing status,
/// plus anything the selected adapter returns. A filing status given for
/// another jurisdiction is ignored.
pub fn calculate_income_tax(
    schedule: &TaxSchedule,
    jurisdiction: Jurisdiction,
    income: Decimal,
    filing_status: Option<FilingStatus>,
) -> Result<TaxCalculationResult, TaxError> {
    if jurisdiction != Jurisdiction::Us
        && let Some(status) = filing_status
    {
        debug!(%jurisdiction, %status, "filing status ignored outside the US");
    }

    match jurisdiction {
        Jurisdiction::Us => {
            let status = filing_status.ok_or(TaxError::FilingStatusRequired(jurisdiction))?;
            calculate_usa_tax(schedule, income, status)
        }
        Jurisdiction::Uk => calculate_uk_tax(schedule, income),
        Jurisdiction::India => calculate_india_tax(schedule, income),
        Jurisdiction::Nigeria => calculate_nigeria_tax(schedule, income),
    }
}

/// A small 2026 schedule shared by the calculation tests: US single and
/// joint tables only, the full UK, India and Nigeria tables, and indirect
/// and corporate rates for every jurisdiction.
#[cfg(test)]
pub(crate) fn test_schedule() -> TaxSchedule {
    use std::collections::BTreeMap;

    use rust_decimal_macros::dec;

    use crate::models::{
        BracketTable, CorporateRateTier, CorporateRates, GstCategory, IndirectRates, TaxBracket,
        TaxYearConfig,
    };

    fn table(bands: &[(Decimal, Option<Decimal>, Decimal)]) -> BracketTable {
        BracketTable::new(
            bands
                .iter()
                .map(|&(min, max, rate)| TaxBracket::new(min, max, rate))
                .collect(),
        )
        .unwrap()
    }

    let us_single = table(&[
        (dec!(0), Some(dec!(12400)), dec!(0.10)),
        (dec!(12400), Some(dec!(50400)), dec!(0.12)),
        (dec!(50400), Some(dec!(105700)), dec!(0.22)),
        (dec!(105700), None, dec!(0.24)),
    ]);
    let us_joint = table(&[
        (dec!(0), Some(dec!(24800)), dec!(0.10)),
        (dec!(24800), Some(dec!(100800)), dec!(0.12)),
        (dec!(100800), None, dec!(0.22)),
    ]);
    let uk = BracketTable::new(vec![
        TaxBracket::new(dec!(0), Some(dec!(12570)), dec!(0)).with_label("Personal Allowance"),
        TaxBracket::new(dec!(12570), Some(dec!(50270)), dec!(0.20)).with_label("Basic Rate"),
        TaxBracket::new(dec!(50270), Some(dec!(125140)), dec!(0.40)).with_label("Higher Rate"),
        TaxBracket::new(dec!(125140), None, dec!(0.45)).with_label("Additional Rate"),
    ])
    .unwrap();
    let india = table(&[
        (dec!(0), Some(dec!(400000)), dec!(0)),
        (dec!(400000), Some(dec!(800000)), dec!(0.05)),
        (dec!(800000), Some(dec!(1200000)), dec!(0.10)),
        (dec!(1200000), Some(dec!(1600000)), dec!(0.15)),
        (dec!(1600000), Some(dec!(2000000)), dec!(0.20)),
        (dec!(2000000), Some(dec!(2400000)), dec!(0.25)),
        (dec!(2400000), None, dec!(0.30)),
    ]);
    let nigeria = table(&[
        (dec!(0), Some(dec!(800000)), dec!(0)),
        (dec!(800000), Some(dec!(3000000)), dec!(0.15)),
        (dec!(3000000), Some(dec!(12000000)), dec!(0.18)),
        (dec!(12000000), Some(dec!(25000000)), dec!(0.21)),
        (dec!(25000000), Some(dec!(50000000)), dec!(0.23)),
        (dec!(50000000), None, dec!(0.25)),
    ]);

    let gst = BTreeMap::from([
        (GstCategory::Essential, dec!(0)),
        (GstCategory::Basic, dec!(0.05)),
        (GstCategory::Standard, dec!(0.12)),
        (GstCategory::Luxury, dec!(0.18)),
        (GstCategory::Sin, dec!(0.28)),
    ]);
    let uk_corporate = CorporateRates::new(vec![
        CorporateRateTier {
            max_profit: Some(dec!(50000)),
            rate: dec!(0.19),
        },
        CorporateRateTier {
            max_profit: None,
            rate: dec!(0.25),
        },
    ])
    .unwrap();

    TaxSchedule::builder(TaxYearConfig {
        tax_year: 2026,
        uk_allowance_taper_threshold: dec!(100000),
        uk_allowance_taper_ratio: dec!(2),
        india_cess_rate: dec!(0.04),
    })
    .income_tax_for_status(Jurisdiction::Us, FilingStatus::Single, us_single)
    .unwrap()
    .income_tax_for_status(Jurisdiction::Us, FilingStatus::MarriedFilingJointly, us_joint)
    .unwrap()
    .income_tax(Jurisdiction::Uk, uk)
    .unwrap()
    .income_tax(Jurisdiction::India, india)
    .unwrap()
    .income_tax(Jurisdiction::Nigeria, nigeria)
    .unwrap()
    .indirect(Jurisdiction::Us, IndirectRates::flat(dec!(0.075)).unwrap())
    .indirect(Jurisdiction::Uk, IndirectRates::flat(dec!(0.20)).unwrap())
    .indirect(Jurisdiction::Nigeria, IndirectRates::flat(dec!(0.075)).unwrap())
    .indirect(Jurisdiction::India, IndirectRates::by_category(gst, dec!(0.18)).unwrap())
    .corporate(Jurisdiction::Us, CorporateRates::flat(dec!(0.21)).unwrap())
    .corporate(Jurisdiction::Uk, uk_corporate)
    .corporate(Jurisdiction::India, CorporateRates::flat(dec!(0.25)).unwrap())
    .corporate(Jurisdiction::Nigeria, CorporateRates::flat(dec!(0.30)).unwrap())
    .build()
    .unwrap()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn us_requires_filing_status() {
        let result = calculate_income_tax(&test_schedule(), Jurisdiction::Us, dec!(50000), None);

        assert_eq!(result, Err(TaxError::FilingStatusRequired(Jurisdiction::Us)));
    }

    #[test]
    fn dispatches_to_each_adapter() {
        let schedule = test_schedule();

        let us = calculate_income_tax(
            &schedule,
            Jurisdiction::Us,
            dec!(100000),
            Some(FilingStatus::Single),
        )
        .unwrap();
        let uk = calculate_income_tax(&schedule, Jurisdiction::Uk, dec!(100000), None).unwrap();
        let india =
            calculate_income_tax(&schedule, Jurisdiction::India, dec!(600000), None).unwrap();

        assert_eq!(us.total_tax, dec!(16712));
        assert_eq!(uk.total_tax, dec!(27432));
        assert_eq!(india.total_tax, dec!(10400));
    }

    #[test]
    fn filing_status_is_ignored_outside_us() {
        let schedule = test_schedule();

        let with_status = calculate_income_tax(
            &schedule,
            Jurisdiction::Nigeria,
            dec!(5000000),
            Some(FilingStatus::Single),
        )
        .unwrap();
        let without =
            calculate_income_tax(&schedule, Jurisdiction::Nigeria, dec!(5000000), None).unwrap();

        assert_eq!(with_status, without);
    }
}
