//! Taxpayer records: details, tax registrations and contact validation.

mod builder;
mod types;
mod validation;

pub use builder::{AddressBuilder, TaxpayerBuilder};
pub use types::*;
pub use validation::{validate_email, validate_phone, validate_taxpayer_data};
