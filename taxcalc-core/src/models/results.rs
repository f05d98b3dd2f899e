use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::format_percent;
use crate::models::{Currency, GstCategory};

/// Whether a breakdown line is a real bracket slice or a surcharge levied on
/// top of the bracket total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContributionKind {
    Bracket,
    Surcharge,
}

/// Tax raised by one bracket (or surcharge) of a progressive calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketContribution {
    pub bracket: String,
    pub range: String,
    /// Rate as a percentage.
    pub rate: Decimal,
    pub taxable_in_bracket: Decimal,
    pub tax_paid: Decimal,
    pub kind: ContributionKind,
}

/// Outcome of a personal income tax calculation.
///
/// `total_tax` always equals the sum of `breakdown[].tax_paid`. Rates are
/// percentages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationResult {
    pub income: Decimal,
    pub currency: Currency,
    pub total_tax: Decimal,
    pub effective_rate: Decimal,
    pub marginal_rate: Decimal,
    pub breakdown: Vec<BracketContribution>,
}

/// Where the rate of an indirect tax calculation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateBasis {
    Flat,
    Category(GstCategory),
    /// No usable category was given; the jurisdiction's fallback rate applied.
    DefaultRate,
}

/// Outcome of a VAT/GST calculation on one amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndirectTaxResult {
    pub currency: Currency,
    pub net_amount: Decimal,
    pub tax_amount: Decimal,
    pub gross_amount: Decimal,
    pub rate: Decimal,
    pub basis: RateBasis,
}

/// Outcome of a corporate tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporateTaxResult {
    pub currency: Currency,
    pub profit: Decimal,
    pub tax: Decimal,
    pub rate: Decimal,
    pub net_profit: Decimal,
}

impl fmt::Display for TaxCalculationResult {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let c = self.currency;
        writeln!(f, "Income:          {}", c.format_amount(self.income))?;
        writeln!(f, "Total tax:       {}", c.format_amount(self.total_tax))?;
        writeln!(f, "Effective rate:  {}", format_percent(self.effective_rate))?;
        write!(f, "Marginal rate:   {}", format_percent(self.marginal_rate))?;

        if self.breakdown.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        writeln!(f)?;
        write!(
            f,
            "{:<22} {:<28} {:>7} {:>16} {:>14}",
            "Bracket", "Range", "Rate", "Taxable", "Tax"
        )?;
        for line in &self.breakdown {
            writeln!(f)?;
            write!(
                f,
                "{:<22} {:<28} {:>7} {:>16} {:>14}",
                line.bracket,
                line.range,
                format_percent(line.rate),
                c.format_amount(line.taxable_in_bracket),
                c.format_amount(line.tax_paid)
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for IndirectTaxResult {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let c = self.currency;
        let basis = match self.basis {
            RateBasis::Flat => "flat rate".to_string(),
            RateBasis::Category(category) => format!("{category} category"),
            RateBasis::DefaultRate => "default rate".to_string(),
        };
        writeln!(f, "Net amount:    {}", c.format_amount(self.net_amount))?;
        writeln!(
            f,
            "Tax:           {} ({}, {basis})",
            c.format_amount(self.tax_amount),
            format_percent(self.rate)
        )?;
        write!(f, "Gross amount:  {}", c.format_amount(self.gross_amount))
    }
}

impl fmt::Display for CorporateTaxResult {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let c = self.currency;
        writeln!(f, "Profit:      {}", c.format_amount(self.profit))?;
        writeln!(
            f,
            "Tax:         {} ({})",
            c.format_amount(self.tax),
            format_percent(self.rate)
        )?;
        write!(f, "Net profit:  {}", c.format_amount(self.net_profit))
    }
}
