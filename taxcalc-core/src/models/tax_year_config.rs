use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Scalar rule parameters for one tax year that sit outside the bracket tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,
    /// Income above which the UK personal allowance is withdrawn.
    pub uk_allowance_taper_threshold: Decimal,
    /// Pounds of income over the threshold per pound of allowance withdrawn.
    pub uk_allowance_taper_ratio: Decimal,
    /// India health and education cess, as a fraction of income tax.
    pub india_cess_rate: Decimal,
}
