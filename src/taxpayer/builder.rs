use chrono::{DateTime, Utc};

use super::types::*;
use crate::core::TaxType;

/// Builder for [`TaxpayerData`].
///
/// ```
/// use taxverify::taxpayer::*;
/// use taxverify::core::TaxType;
/// use chrono::{TimeZone, Utc};
///
/// let registered = Utc.with_ymd_and_hms(2023, 1, 15, 0, 0, 0).unwrap();
/// let data = TaxpayerBuilder::new(
///         "John Banda",
///         registered,
///         AddressBuilder::new("123 Cairo Road", "Lusaka", "Lusaka").postal_code("10101").build(),
///     )
///     .business_name("Banda Enterprises Ltd")
///     .category(BusinessCategory::Corporation)
///     .email("john.banda@bandaenterprises.co.zm")
///     .mobile("+260977123456")
///     .registration(TaxType::Vat, "VAT123456", registered)
///     .build();
///
/// assert!(data.is_registered_for(TaxType::Vat));
/// assert!(validate_taxpayer_data(&data).is_empty());
/// ```
pub struct TaxpayerBuilder {
    name: String,
    business_name: Option<String>,
    business_category: Option<BusinessCategory>,
    registration_date: DateTime<Utc>,
    address: Address,
    contact: Contact,
    tax_registrations: Vec<TaxRegistration>,
    is_active: bool,
}

impl TaxpayerBuilder {
    pub fn new(name: impl Into<String>, registration_date: DateTime<Utc>, address: Address) -> Self {
        Self {
            name: name.into(),
            business_name: None,
            business_category: None,
            registration_date,
            address,
            contact: Contact::default(),
            tax_registrations: Vec::new(),
            is_active: true,
        }
    }

    pub fn business_name(mut self, name: impl Into<String>) -> Self {
        self.business_name = Some(name.into());
        self
    }

    pub fn category(mut self, category: BusinessCategory) -> Self {
        self.business_category = Some(category);
        self
    }

    pub fn contact(mut self, contact: Contact) -> Self {
        self.contact = contact;
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.contact.email = Some(email.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.contact.phone = Some(phone.into());
        self
    }

    pub fn mobile(mut self, mobile: impl Into<String>) -> Self {
        self.contact.mobile = Some(mobile.into());
        self
    }

    /// Add an active registration for `tax_type`.
    pub fn registration(
        mut self,
        tax_type: TaxType,
        number: impl Into<String>,
        registered_on: DateTime<Utc>,
    ) -> Self {
        self.tax_registrations.push(TaxRegistration {
            tax_type,
            registration_date: registered_on,
            registration_number: number.into(),
            active: true,
            last_filing_date: None,
            next_filing_due: None,
        });
        self
    }

    pub fn add_registration(mut self, registration: TaxRegistration) -> Self {
        self.tax_registrations.push(registration);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn build(self) -> TaxpayerData {
        TaxpayerData {
            name: self.name,
            business_name: self.business_name,
            business_category: self.business_category,
            registration_date: self.registration_date,
            address: self.address,
            contact: self.contact,
            tax_registrations: self.tax_registrations,
            is_active: self.is_active,
        }
    }
}

/// Builder for [`Address`].
pub struct AddressBuilder {
    street: String,
    city: String,
    province: String,
    postal_code: Option<String>,
    country: String,
}

impl AddressBuilder {
    pub fn new(street: impl Into<String>, city: impl Into<String>, province: impl Into<String>) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            province: province.into(),
            postal_code: None,
            country: "Zambia".to_string(),
        }
    }

    pub fn postal_code(mut self, code: impl Into<String>) -> Self {
        self.postal_code = Some(code.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn build(self) -> Address {
        Address {
            street: self.street,
            city: self.city,
            province: self.province,
            postal_code: self.postal_code,
            country: self.country,
        }
    }
}
