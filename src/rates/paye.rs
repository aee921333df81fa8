//! Pay As You Earn band calculation.
//!
//! Default monthly bands (ZMW, 2025):
//! - up to 4,500: 0%
//! - 4,500.01 to 4,800: 25%
//! - 4,800.01 to 6,900: 30%
//! - above 6,900: 37.5%

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::core::{VerificationError, validate_amount};

/// One PAYE band: income up to `upper` is taxed at `rate` percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeBand {
    /// Inclusive upper bound of the band; `None` for the top band.
    pub upper: Option<Decimal>,
    /// Percentage rate, e.g. `37.5`.
    pub rate: Decimal,
}

/// Tax charged within one band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandCharge {
    pub lower: Decimal,
    pub upper: Option<Decimal>,
    pub rate: Decimal,
    /// Portion of income falling inside the band.
    pub taxable: Decimal,
    pub tax: Decimal,
}

/// Result of a PAYE calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeCalculation {
    pub gross_income: Decimal,
    /// Total tax, rounded to 2 decimal places.
    pub tax_amount: Decimal,
    /// Tax as a percentage of gross income, rounded to 2 decimal places.
    pub effective_rate: Decimal,
    /// Charges for every band that received income.
    pub breakdown: Vec<BandCharge>,
}

/// Ordered PAYE band table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PayeBand>", into = "Vec<PayeBand>")]
pub struct PayeBands {
    bands: Vec<PayeBand>,
}

impl Default for PayeBands {
    fn default() -> Self {
        Self {
            bands: vec![
                PayeBand { upper: Some(dec!(4500)), rate: dec!(0) },
                PayeBand { upper: Some(dec!(4800)), rate: dec!(25) },
                PayeBand { upper: Some(dec!(6900)), rate: dec!(30) },
                PayeBand { upper: None, rate: dec!(37.5) },
            ],
        }
    }
}

impl PayeBands {
    /// Build a table. Bounds must be strictly ascending, only the last
    /// band may be open-ended, and rates must lie in 0..=100.
    pub fn new(bands: Vec<PayeBand>) -> Result<Self, VerificationError> {
        let Some(last) = bands.last() else {
            return Err(VerificationError::Config("PAYE table has no bands".into()));
        };
        if last.upper.is_some() {
            return Err(VerificationError::Config("last PAYE band must be open-ended".into()));
        }

        let mut previous = Decimal::ZERO;
        for (i, band) in bands.iter().enumerate() {
            if band.rate < Decimal::ZERO || band.rate > dec!(100) {
                return Err(VerificationError::Config(format!(
                    "PAYE band {i} rate {} outside 0..=100",
                    band.rate
                )));
            }
            match band.upper {
                Some(upper) if upper <= previous => {
                    return Err(VerificationError::Config(format!(
                        "PAYE band {i} upper bound {upper} not above {previous}"
                    )));
                }
                Some(upper) => previous = upper,
                None if i + 1 != bands.len() => {
                    return Err(VerificationError::Config(format!(
                        "PAYE band {i} is open-ended but not last"
                    )));
                }
                None => {}
            }
        }
        Ok(Self { bands })
    }

    pub fn bands(&self) -> &[PayeBand] {
        &self.bands
    }

    /// Compute PAYE on a monthly `income`.
    ///
    /// # Errors
    ///
    /// `InvalidAmount` for negative income.
    pub fn calculate(&self, income: Decimal) -> Result<PayeCalculation, VerificationError> {
        validate_amount(income, Decimal::ZERO)?;

        let mut breakdown = Vec::new();
        let mut total = Decimal::ZERO;
        let mut lower = Decimal::ZERO;
        for band in &self.bands {
            if income <= lower {
                break;
            }
            let top = band.upper.map_or(income, |upper| upper.min(income));
            let taxable = top - lower;
            let tax = taxable * band.rate / dec!(100);
            total += tax;
            breakdown.push(BandCharge {
                lower,
                upper: band.upper,
                rate: band.rate,
                taxable,
                tax,
            });
            match band.upper {
                Some(upper) => lower = upper,
                None => break,
            }
        }

        let tax_amount = total.round_dp(2);
        let effective_rate = if income > Decimal::ZERO {
            (total / income * dec!(100)).round_dp(2)
        } else {
            Decimal::ZERO
        };

        Ok(PayeCalculation {
            gross_income: income,
            tax_amount,
            effective_rate,
            breakdown,
        })
    }
}

impl TryFrom<Vec<PayeBand>> for PayeBands {
    type Error = VerificationError;

    fn try_from(bands: Vec<PayeBand>) -> Result<Self, Self::Error> {
        Self::new(bands)
    }
}

impl From<PayeBands> for Vec<PayeBand> {
    fn from(table: PayeBands) -> Self {
        table.bands
    }
}

/// PAYE on a monthly income using the default bands.
pub fn calculate_paye(income: Decimal) -> Result<PayeCalculation, VerificationError> {
    PayeBands::default().calculate(income)
}
