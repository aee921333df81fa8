//! VAT registration threshold check.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Annual taxable turnover above which VAT registration is compulsory (ZMW).
pub const VAT_REGISTRATION_THRESHOLD: Decimal = dec!(800_000);

/// Result of a VAT registration requirement check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatRegistrationCheck {
    /// Whether the business must register for VAT.
    pub required: bool,
    /// Annual turnover used in the check.
    pub annual_turnover: Decimal,
    pub threshold: Decimal,
    /// If registration is required, the reason why.
    pub reason: Option<String>,
}

/// Check whether `annual_turnover` exceeds the VAT registration threshold.
pub fn check_vat_registration(annual_turnover: Decimal) -> VatRegistrationCheck {
    check_vat_registration_against(annual_turnover, VAT_REGISTRATION_THRESHOLD)
}

/// Same as [`check_vat_registration`] with an explicit threshold.
pub fn check_vat_registration_against(
    annual_turnover: Decimal,
    threshold: Decimal,
) -> VatRegistrationCheck {
    let required = annual_turnover > threshold;
    VatRegistrationCheck {
        required,
        annual_turnover,
        threshold,
        reason: required.then(|| {
            format!("annual turnover {annual_turnover} exceeds VAT registration threshold of {threshold}")
        }),
    }
}
