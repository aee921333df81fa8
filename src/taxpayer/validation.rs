//! Shape checks for taxpayer contact data.

use super::types::TaxpayerData;
use crate::core::ValidationError;

/// Validate a Zambian phone number: `+260` or `0` followed by 9 digits.
pub fn validate_phone(phone: &str) -> bool {
    let rest = phone
        .strip_prefix("+260")
        .or_else(|| phone.strip_prefix('0'));
    rest.is_some_and(|r| r.len() == 9 && r.chars().all(|c| c.is_ascii_digit()))
}

/// Validate the basic shape of an email address: `local@domain.tld` with
/// an alphabetic top-level domain of at least two letters.
pub fn validate_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());
    local_ok && host_ok && tld_ok
}

/// Check taxpayer details, returning every problem found.
pub fn validate_taxpayer_data(data: &TaxpayerData) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if data.name.trim().is_empty() {
        errors.push(ValidationError::new("name", "taxpayer name must not be empty"));
    }

    if let Some(email) = &data.contact.email {
        if !validate_email(email) {
            errors.push(ValidationError::new(
                "contact.email",
                format!("'{email}' is not a valid email address"),
            ));
        }
    }

    for (field, value) in [
        ("contact.phone", &data.contact.phone),
        ("contact.mobile", &data.contact.mobile),
        ("contact.fax", &data.contact.fax),
    ] {
        if let Some(number) = value {
            if !validate_phone(number) {
                errors.push(ValidationError::new(
                    field,
                    format!("'{number}' is not a Zambian phone number (+260 or 0, then 9 digits)"),
                ));
            }
        }
    }

    for (i, reg) in data.tax_registrations.iter().enumerate() {
        if reg.registration_number.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("tax_registrations[{i}].registration_number"),
                "registration number must not be empty",
            ));
        }
    }

    errors
}
