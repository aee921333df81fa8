use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::compliance::ComplianceRecord;
use crate::core::{TaxType, Tpin};

/// Physical address of a taxpayer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub province: String,
    pub postal_code: Option<String>,
    /// Defaults to "Zambia".
    pub country: String,
}

/// Contact details. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub fax: Option<String>,
}

/// Registration of a taxpayer for one tax type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRegistration {
    pub tax_type: TaxType,
    pub registration_date: DateTime<Utc>,
    /// Authority-issued number, e.g. "VAT123456".
    pub registration_number: String,
    /// `false` once the registration has been cancelled or suspended.
    pub active: bool,
    pub last_filing_date: Option<DateTime<Utc>>,
    pub next_filing_due: Option<DateTime<Utc>>,
}

/// Legal form of a business taxpayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusinessCategory {
    SoleProprietorship,
    Partnership,
    Corporation,
    Cooperative,
    Trust,
    NonProfit,
    Other,
}

/// Taxpayer details as returned by a data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxpayerData {
    pub name: String,
    pub business_name: Option<String>,
    pub business_category: Option<BusinessCategory>,
    pub registration_date: DateTime<Utc>,
    pub address: Address,
    pub contact: Contact,
    pub tax_registrations: Vec<TaxRegistration>,
    pub is_active: bool,
}

impl TaxpayerData {
    pub fn tax_registration(&self, tax_type: TaxType) -> Option<&TaxRegistration> {
        self.tax_registrations.iter().find(|r| r.tax_type == tax_type)
    }

    /// Has an active registration for `tax_type`.
    pub fn is_registered_for(&self, tax_type: TaxType) -> bool {
        self.tax_registration(tax_type).is_some_and(|r| r.active)
    }
}

/// A verified taxpayer: identifier, details and the compliance record
/// computed at verification time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Taxpayer {
    pub tpin: Tpin,
    #[serde(flatten)]
    pub details: TaxpayerData,
    pub compliance: Option<ComplianceRecord>,
    pub is_verified: bool,
}

impl Taxpayer {
    /// Unverified taxpayer without a compliance record.
    pub fn new(tpin: Tpin, details: TaxpayerData) -> Self {
        Self {
            tpin,
            details,
            compliance: None,
            is_verified: false,
        }
    }

    /// Attach a compliance record and mark the taxpayer verified.
    pub fn verified(mut self, compliance: ComplianceRecord) -> Self {
        self.compliance = Some(compliance);
        self.is_verified = true;
        self
    }

    pub fn tax_registration(&self, tax_type: TaxType) -> Option<&TaxRegistration> {
        self.details.tax_registration(tax_type)
    }

    pub fn is_registered_for(&self, tax_type: TaxType) -> bool {
        self.details.is_registered_for(tax_type)
    }

    /// `false` when no compliance record is attached.
    pub fn is_compliant(&self) -> bool {
        self.compliance.as_ref().is_some_and(ComplianceRecord::is_compliant)
    }
}
