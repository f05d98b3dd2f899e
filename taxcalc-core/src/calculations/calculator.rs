//! A calculator bound to one tax year.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use taxcalc_core::{
//!     BracketTable, Jurisdiction, TaxBracket, TaxCalculator, TaxSchedule, TaxYearConfig,
//! };
//!
//! let schedule = TaxSchedule::builder(TaxYearConfig {
//!     tax_year: 2026,
//!     uk_allowance_taper_threshold: dec!(100000),
//!     uk_allowance_taper_ratio: dec!(2),
//!     india_cess_rate: dec!(0.04),
//! })
//! .income_tax(
//!     Jurisdiction::Nigeria,
//!     BracketTable::new(vec![
//!         TaxBracket::new(dec!(0), Some(dec!(800000)), dec!(0)),
//!         TaxBracket::new(dec!(800000), None, dec!(0.15)),
//!     ])
//!     .unwrap(),
//! )
//! .unwrap()
//! .build()
//! .unwrap();
//!
//! let calculator = TaxCalculator::new(&schedule);
//! let result = calculator.calculate_nigeria_tax(dec!(1000000)).unwrap();
//!
//! assert_eq!(result.total_tax, dec!(30000));
//! assert_eq!(calculator.tax_year(), 2026);
//! ```

use rust_decimal::Decimal;

use crate::calculations::{corporate, indirect, jurisdictions};
use crate::error::TaxError;
use crate::models::{
    CorporateTaxResult, FilingStatus, GstCategory, IndirectTaxResult, Jurisdiction,
    TaxCalculationResult,
};
use crate::schedule::TaxSchedule;

/// Entry points for every calculation, over a borrowed [`TaxSchedule`].
#[derive(Debug, Clone, Copy)]
pub struct TaxCalculator<'a> {
    schedule: &'a TaxSchedule,
}

impl<'a> TaxCalculator<'a> {
    pub fn new(schedule: &'a TaxSchedule) -> Self {
        Self { schedule }
    }

    pub fn tax_year(&self) -> i32 {
        self.schedule.tax_year()
    }

    pub fn schedule(&self) -> &'a TaxSchedule {
        self.schedule
    }

    pub fn calculate_usa_tax(
        &self,
        income: Decimal,
        filing_status: FilingStatus,
    ) -> Result<TaxCalculationResult, TaxError> {
        jurisdictions::calculate_usa_tax(self.schedule, income, filing_status)
    }

    pub fn calculate_uk_tax(
        &self,
        income: Decimal,
    ) -> Result<TaxCalculationResult, TaxError> {
        jurisdictions::calculate_uk_tax(self.schedule, income)
    }

    pub fn calculate_india_tax(
        &self,
        income: Decimal,
    ) -> Result<TaxCalculationResult, TaxError> {
        jurisdictions::calculate_india_tax(self.schedule, income)
    }

    pub fn calculate_nigeria_tax(
        &self,
        income: Decimal,
    ) -> Result<TaxCalculationResult, TaxError> {
        jurisdictions::calculate_nigeria_tax(self.schedule, income)
    }

    /// See [`jurisdictions::calculate_income_tax`].
    pub fn calculate_income_tax(
        &self,
        jurisdiction: Jurisdiction,
        income: Decimal,
        filing_status: Option<FilingStatus>,
    ) -> Result<TaxCalculationResult, TaxError> {
        jurisdictions::calculate_income_tax(self.schedule, jurisdiction, income, filing_status)
    }

    pub fn calculate_indirect_tax(
        &self,
        amount: Decimal,
        jurisdiction: Jurisdiction,
        category: Option<GstCategory>,
    ) -> Result<IndirectTaxResult, TaxError> {
        indirect::calculate_indirect_tax(self.schedule, amount, jurisdiction, category)
    }

    pub fn calculate_corporate_tax(
        &self,
        profit: Decimal,
        jurisdiction: Jurisdiction,
    ) -> Result<CorporateTaxResult, TaxError> {
        corporate::calculate_corporate_tax(self.schedule, profit, jurisdiction)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::jurisdictions::test_schedule;

    #[test]
    fn facade_matches_free_functions() {
        let schedule = test_schedule();
        let calculator = TaxCalculator::new(&schedule);

        assert_eq!(
            calculator.calculate_uk_tax(dec!(100000)),
            jurisdictions::calculate_uk_tax(&schedule, dec!(100000))
        );
        assert_eq!(
            calculator.calculate_usa_tax(dec!(100000), FilingStatus::Single).unwrap().total_tax,
            dec!(16712)
        );
        assert_eq!(
            calculator.calculate_india_tax(dec!(600000)).unwrap().total_tax,
            dec!(10400)
        );
    }

    #[test]
    fn facade_covers_indirect_and_corporate() {
        let schedule = test_schedule();
        let calculator = TaxCalculator::new(&schedule);

        let vat = calculator
            .calculate_indirect_tax(dec!(100), Jurisdiction::Uk, None)
            .unwrap();
        let corporate = calculator
            .calculate_corporate_tax(dec!(60000), Jurisdiction::Uk)
            .unwrap();

        assert_eq!(vat.gross_amount, dec!(120));
        assert_eq!(corporate.tax, dec!(15000));
        assert_eq!(calculator.tax_year(), 2026);
    }

    #[test]
    fn dispatcher_is_exposed() {
        let schedule = test_schedule();
        let calculator = TaxCalculator::new(&schedule);

        let result = calculator
            .calculate_income_tax(Jurisdiction::Nigeria, dec!(0), None)
            .unwrap();

        assert_eq!(result.total_tax, dec!(0));
        assert_eq!(result.effective_rate, dec!(0));
    }
}
