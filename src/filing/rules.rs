//! Statutory due dates per tax type and filing mode.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::core::{DeadlineTable, FilingMode, FilingPeriod, TaxType, VerificationConfig, VerificationError};

/// Due-date engine built from the configured deadline tables.
///
/// A return for period `YYYY-MM` is due on the configured day of the
/// following month; December periods fall due in January of the next year.
///
/// ```
/// use taxverify::core::*;
/// use taxverify::filing::FilingRules;
/// use chrono::NaiveDate;
///
/// let rules = FilingRules::default();
/// let period = FilingPeriod::new(2023, 12).unwrap();
/// let due = rules.due_date(TaxType::Vat, FilingMode::Manual, period).unwrap();
/// assert_eq!(due, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingRules {
    deadlines: BTreeMap<TaxType, DeadlineTable>,
}

impl Default for FilingRules {
    fn default() -> Self {
        Self::new(&VerificationConfig::default())
    }
}

impl FilingRules {
    pub fn new(config: &VerificationConfig) -> Self {
        Self {
            deadlines: config.filing_deadlines.clone(),
        }
    }

    /// Deadline table for one tax type, if any is configured.
    pub fn table(&self, tax_type: TaxType) -> Option<&DeadlineTable> {
        self.deadlines.get(&tax_type)
    }

    pub fn supports(&self, tax_type: TaxType, mode: FilingMode) -> bool {
        self.table(tax_type).is_some_and(|t| t.contains_key(&mode))
    }

    /// Compute the due date for a filing.
    ///
    /// # Errors
    ///
    /// `InvalidFilingMode` if no deadline is configured for the pair.
    pub fn due_date(
        &self,
        tax_type: TaxType,
        mode: FilingMode,
        period: FilingPeriod,
    ) -> Result<NaiveDate, VerificationError> {
        let empty = DeadlineTable::new();
        due_date_in(self.table(tax_type).unwrap_or(&empty), tax_type, mode, period)
    }
}

/// Due date for `period` looked up in a single tax type's table.
pub(crate) fn due_date_in(
    table: &DeadlineTable,
    tax_type: TaxType,
    mode: FilingMode,
    period: FilingPeriod,
) -> Result<NaiveDate, VerificationError> {
    let day = *table
        .get(&mode)
        .ok_or(VerificationError::InvalidFilingMode { tax_type, mode })?;
    let next = period.next();
    NaiveDate::from_ymd_opt(next.year(), next.month(), day).ok_or_else(|| {
        VerificationError::Config(format!(
            "{tax_type} {mode} deadline day {day} does not exist in {next}"
        ))
    })
}
