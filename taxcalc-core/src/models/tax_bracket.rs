use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// One slice of a progressive schedule: income in `[min_income, max_income)`
/// is taxed at `rate`. `max_income` of `None` means the slice is open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    /// Marginal rate as a fraction (e.g. `0.22` for 22%).
    pub tax_rate: Decimal,
    pub label: Option<String>,
}

impl TaxBracket {
    pub fn new(
        min_income: Decimal,
        max_income: Option<Decimal>,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            min_income,
            max_income,
            tax_rate,
            label: None,
        }
    }

    pub fn with_label(
        mut self,
        label: impl Into<String>,
    ) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Width of the bracket, or `None` for the open-ended top bracket.
    pub fn size(&self) -> Option<Decimal> {
        self.max_income.map(|max| max - self.min_income)
    }

    pub fn contains(
        &self,
        income: Decimal,
    ) -> bool {
        income >= self.min_income && self.max_income.is_none_or(|max| income < max)
    }
}

/// An ordered, contiguous, validated set of brackets.
///
/// A table always starts at zero, each bracket ends where the next begins,
/// and only the last bracket is open-ended. Tables are immutable once built;
/// adjustments such as allowance tapering produce a new table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Validates and wraps `brackets`.
    ///
    /// # Errors
    ///
    /// * [`ScheduleError::EmptyBracketTable`] if no brackets are given.
    /// * [`ScheduleError::InvalidBracketTable`] if the first bracket does not
    ///   start at zero, a rate is outside `[0, 1]`, a bracket ends before it
    ///   starts, neighbours do not meet, or the open-ended bracket is not last.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, ScheduleError> {
        let Some(first) = brackets.first() else {
            return Err(ScheduleError::EmptyBracketTable);
        };
        if first.min_income != Decimal::ZERO {
            return Err(invalid(0, format!("first bracket starts at {}, expected 0", first.min_income)));
        }

        let last_index = brackets.len() - 1;
        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate > Decimal::ONE {
                return Err(invalid(index, format!("rate {} is outside [0, 1]", bracket.tax_rate)));
            }

            match (bracket.max_income, index == last_index) {
                (None, true) => {}
                (None, false) => {
                    return Err(invalid(index, "only the last bracket may be open-ended".to_string()));
                }
                (Some(_), true) => {
                    return Err(invalid(index, "last bracket must be open-ended".to_string()));
                }
                (Some(max), false) => {
                    if max < bracket.min_income {
                        return Err(invalid(
                            index,
                            format!("max {max} is below min {}", bracket.min_income),
                        ));
                    }
                    let next_min = brackets[index + 1].min_income;
                    if next_min != max {
                        return Err(invalid(
                            index + 1,
                            format!("starts at {next_min}, previous bracket ends at {max}"),
                        ));
                    }
                }
            }
        }

        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    /// Always `false` for a table built through [`BracketTable::new`].
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// The bracket whose half-open range holds `income`.
    pub fn bracket_for(
        &self,
        income: Decimal,
    ) -> Option<&TaxBracket> {
        self.brackets.iter().find(|b| b.contains(income))
    }
}

fn invalid(
    index: usize,
    reason: String,
) -> ScheduleError {
    ScheduleError::InvalidBracketTable { index, reason }
}
