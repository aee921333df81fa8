//! Tax rate tables: PAYE bands and the VAT registration threshold.
//!
//! All amounts use [`rust_decimal::Decimal`]. The tables are plain data and
//! can be loaded from configuration instead of the built-in defaults.

mod paye;
mod vat_threshold;

pub use paye::{BandCharge, PayeBand, PayeBands, PayeCalculation, calculate_paye};
pub use vat_threshold::{
    VAT_REGISTRATION_THRESHOLD, VatRegistrationCheck, check_vat_registration,
    check_vat_registration_against,
};
