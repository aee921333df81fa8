//! Input checks shared by the verification entry points.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::VerificationError;
use super::period::FilingPeriod;

/// Parse a `YYYY-MM` tax period into its start (inclusive) and end
/// (exclusive) dates.
pub fn validate_tax_period(tax_period: &str) -> Result<(NaiveDate, NaiveDate), VerificationError> {
    Ok(FilingPeriod::parse(tax_period)?.bounds())
}

/// Reject filing periods that start after `today`.
pub fn validate_filing_period(period: FilingPeriod, today: NaiveDate) -> Result<(), VerificationError> {
    period.ensure_not_future(today)
}

/// Reject amounts below `minimum`.
pub fn validate_amount(amount: Decimal, minimum: Decimal) -> Result<(), VerificationError> {
    if amount < minimum {
        return Err(VerificationError::InvalidAmount(format!(
            "amount {amount} must not be less than {minimum}"
        )));
    }
    Ok(())
}
