mod corporate_rates;
mod currency;
mod filing_status;
pub(crate) mod indirect_rates;
mod jurisdiction;
mod results;
mod tax_bracket;
mod tax_year_config;

pub use corporate_rates::{CorporateRateTier, CorporateRates};
pub use currency::Currency;
pub use filing_status::FilingStatus;
pub use indirect_rates::{GstCategory, IndirectRates};
pub use jurisdiction::{Jurisdiction, TaxPeriod};
pub use results::{
    BracketContribution, ContributionKind, CorporateTaxResult, IndirectTaxResult, RateBasis,
    TaxCalculationResult,
};
pub use tax_bracket::{BracketTable, TaxBracket};
pub use tax_year_config::TaxYearConfig;
