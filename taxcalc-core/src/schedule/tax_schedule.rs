use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::error::{ScheduleError, TaxError};
use crate::models::indirect_rates::check_rate;
use crate::models::{
    BracketTable, CorporateRates, FilingStatus, IndirectRates, Jurisdiction, TaxYearConfig,
};

/// Income tax tables for one jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomeTaxTables {
    /// One table for every taxpayer.
    Uniform(BracketTable),
    /// One independent table per filing status.
    ByFilingStatus(BTreeMap<FilingStatus, BracketTable>),
}

/// The complete rule set for one tax year.
///
/// A schedule is built once (usually by a [`super::ScheduleSource`]) and never
/// modified. When rates change for a new year, a new schedule is registered
/// alongside it rather than patching this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxSchedule {
    config: TaxYearConfig,
    income_tax: HashMap<Jurisdiction, IncomeTaxTables>,
    indirect: HashMap<Jurisdiction, IndirectRates>,
    corporate: HashMap<Jurisdiction, CorporateRates>,
}

impl TaxSchedule {
    pub fn builder(config: TaxYearConfig) -> TaxScheduleBuilder {
        TaxScheduleBuilder {
            config,
            uniform: BTreeMap::new(),
            by_status: BTreeMap::new(),
            indirect: HashMap::new(),
            corporate: HashMap::new(),
        }
    }

    pub fn tax_year(&self) -> i32 {
        self.config.tax_year
    }

    pub fn config(&self) -> &TaxYearConfig {
        &self.config
    }

    pub fn income_tax_tables(
        &self,
        jurisdiction: Jurisdiction,
    ) -> Option<&IncomeTaxTables> {
        self.income_tax.get(&jurisdiction)
    }

    /// The bracket table for `jurisdiction`, selected by `filing_status` when
    /// the jurisdiction taxes per status. A status given for a uniform
    /// jurisdiction is ignored.
    ///
    /// # Errors
    ///
    /// * [`TaxError::UnsupportedJurisdiction`] if the schedule has no income
    ///   tax tables for the jurisdiction.
    /// * [`TaxError::FilingStatusRequired`] if tables are per status and no
    ///   status was given.
    /// * [`TaxError::FilingStatusNotCovered`] if the given status has no table.
    pub fn income_brackets(
        &self,
        jurisdiction: Jurisdiction,
        filing_status: Option<FilingStatus>,
    ) -> Result<&BracketTable, TaxError> {
        let tables = self
            .income_tax
            .get(&jurisdiction)
            .ok_or_else(|| self.unsupported(jurisdiction, "income tax"))?;

        match (tables, filing_status) {
            (IncomeTaxTables::Uniform(table), _) => Ok(table),
            (IncomeTaxTables::ByFilingStatus(_), None) => {
                Err(TaxError::FilingStatusRequired(jurisdiction))
            }
            (IncomeTaxTables::ByFilingStatus(map), Some(status)) => {
                map.get(&status).ok_or(TaxError::FilingStatusNotCovered {
                    jurisdiction,
                    status,
                    tax_year: self.tax_year(),
                })
            }
        }
    }

    /// # Errors
    ///
    /// [`TaxError::UnsupportedJurisdiction`] if no indirect rates are defined.
    pub fn indirect_rates(
        &self,
        jurisdiction: Jurisdiction,
    ) -> Result<&IndirectRates, TaxError> {
        self.indirect
            .get(&jurisdiction)
            .ok_or_else(|| self.unsupported(jurisdiction, "indirect tax"))
    }

    /// # Errors
    ///
    /// [`TaxError::UnsupportedJurisdiction`] if no corporate rates are defined.
    pub fn corporate_rates(
        &self,
        jurisdiction: Jurisdiction,
    ) -> Result<&CorporateRates, TaxError> {
        self.corporate
            .get(&jurisdiction)
            .ok_or_else(|| self.unsupported(jurisdiction, "corporate tax"))
    }

    /// Jurisdictions with income tax tables, in code order.
    pub fn jurisdictions(&self) -> Vec<Jurisdiction> {
        let mut all: Vec<_> = self.income_tax.keys().copied().collect();
        all.sort_unstable();
        all
    }

    fn unsupported(
        &self,
        jurisdiction: Jurisdiction,
        kind: &'static str,
    ) -> TaxError {
        TaxError::UnsupportedJurisdiction {
            jurisdiction,
            kind,
            tax_year: self.tax_year(),
        }
    }
}

/// Collects the tables of a [`TaxSchedule`] before validating them together.
#[derive(Debug)]
pub struct TaxScheduleBuilder {
    config: TaxYearConfig,
    uniform: BTreeMap<Jurisdiction, BracketTable>,
    by_status: BTreeMap<Jurisdiction, BTreeMap<FilingStatus, BracketTable>>,
    indirect: HashMap<Jurisdiction, IndirectRates>,
    corporate: HashMap<Jurisdiction, CorporateRates>,
}

impl TaxScheduleBuilder {
    /// Adds the single income tax table for `jurisdiction`.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::DuplicateIncomeTable`] if one was already added.
    pub fn income_tax(
        mut self,
        jurisdiction: Jurisdiction,
        table: BracketTable,
    ) -> Result<Self, ScheduleError> {
        if self.uniform.insert(jurisdiction, table).is_some() {
            return Err(ScheduleError::DuplicateIncomeTable(jurisdiction.to_string()));
        }
        Ok(self)
    }

    /// Adds the income tax table for one filing status of `jurisdiction`.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::DuplicateIncomeTable`] if that status already has one.
    pub fn income_tax_for_status(
        mut self,
        jurisdiction: Jurisdiction,
        status: FilingStatus,
        table: BracketTable,
    ) -> Result<Self, ScheduleError> {
        let tables = self.by_status.entry(jurisdiction).or_default();
        if tables.insert(status, table).is_some() {
            return Err(ScheduleError::DuplicateIncomeTable(format!(
                "{jurisdiction} {status}"
            )));
        }
        Ok(self)
    }

    /// Sets the indirect tax rates for `jurisdiction`, replacing any earlier ones.
    pub fn indirect(
        mut self,
        jurisdiction: Jurisdiction,
        rates: IndirectRates,
    ) -> Self {
        self.indirect.insert(jurisdiction, rates);
        self
    }

    /// Sets the corporate tax rates for `jurisdiction`, replacing any earlier ones.
    pub fn corporate(
        mut self,
        jurisdiction: Jurisdiction,
        rates: CorporateRates,
    ) -> Self {
        self.corporate.insert(jurisdiction, rates);
        self
    }

    /// # Errors
    ///
    /// * [`ScheduleError::ConflictingIncomeTables`] if a jurisdiction has both
    ///   a uniform table and per-status tables.
    /// * [`ScheduleError::InvalidYearConfig`] for a non-positive taper ratio.
    /// * [`ScheduleError::InvalidRate`] for a cess rate outside `[0, 1]`.
    pub fn build(self) -> Result<TaxSchedule, ScheduleError> {
        if self.config.uk_allowance_taper_ratio <= Decimal::ZERO {
            return Err(ScheduleError::InvalidYearConfig(format!(
                "taper ratio must be positive, got {}",
                self.config.uk_allowance_taper_ratio
            )));
        }
        check_rate(self.config.india_cess_rate)?;

        let mut income_tax = HashMap::new();

        for (jurisdiction, table) in self.uniform {
            if self.by_status.contains_key(&jurisdiction) {
                return Err(ScheduleError::ConflictingIncomeTables(jurisdiction));
            }
            income_tax.insert(jurisdiction, IncomeTaxTables::Uniform(table));
        }
        for (jurisdiction, tables) in self.by_status {
            income_tax.insert(jurisdiction, IncomeTaxTables::ByFilingStatus(tables));
        }

        Ok(TaxSchedule {
            config: self.config,
            income_tax,
            indirect: self.indirect,
            corporate: self.corporate,
        })
    }
}
