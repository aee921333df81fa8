use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::VerificationError;
use super::period::FilingPeriod;

/// Tax heads administered by the Zambia Revenue Authority.
///
/// Adding a tax head means adding a variant here and a matching
/// [`Verifier`](crate::filing::Verifier) variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaxType {
    /// VAT: Value Added Tax.
    #[serde(rename = "VAT")]
    Vat,
    /// PAYE: Pay As You Earn.
    #[serde(rename = "PAYE")]
    Paye,
    /// WHT: Withholding Tax.
    #[serde(rename = "WHT")]
    Withholding,
    /// ITX: Income Tax.
    #[serde(rename = "ITX")]
    Income,
    /// PTT: Property Transfer Tax.
    #[serde(rename = "PTT")]
    PropertyTransfer,
    /// TLEVY: Tourism Levy.
    #[serde(rename = "TLEVY")]
    TourismLevy,
    /// MINRYL: Mineral Royalty.
    #[serde(rename = "MINRYL")]
    MineralRoyalty,
}

impl TaxType {
    /// Every tax head, in declaration order.
    pub const ALL: [TaxType; 7] = [
        TaxType::Vat,
        TaxType::Paye,
        TaxType::Withholding,
        TaxType::Income,
        TaxType::PropertyTransfer,
        TaxType::TourismLevy,
        TaxType::MineralRoyalty,
    ];

    /// Short code used on returns and in configuration files.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Vat => "VAT",
            Self::Paye => "PAYE",
            Self::Withholding => "WHT",
            Self::Income => "ITX",
            Self::PropertyTransfer => "PTT",
            Self::TourismLevy => "TLEVY",
            Self::MineralRoyalty => "MINRYL",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Vat => "Value Added Tax",
            Self::Paye => "Pay As You Earn",
            Self::Withholding => "Withholding Tax",
            Self::Income => "Income Tax",
            Self::PropertyTransfer => "Property Transfer Tax",
            Self::TourismLevy => "Tourism Levy",
            Self::MineralRoyalty => "Mineral Royalty",
        }
    }
}

impl fmt::Display for TaxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TaxType {
    type Err = VerificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TaxType::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| VerificationError::UnknownTaxType(s.to_string()))
    }
}

/// How a return is submitted; selects the statutory deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilingMode {
    Manual,
    Electronic,
}

impl FilingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Electronic => "electronic",
        }
    }
}

impl fmt::Display for FilingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilingMode {
    type Err = VerificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manual" => Ok(Self::Manual),
            "electronic" => Ok(Self::Electronic),
            _ => Err(VerificationError::UnknownFilingMode(s.to_string())),
        }
    }
}

/// Status of a single verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Verified,
    Pending,
    Rejected,
    Expired,
    NotFound,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "VERIFIED",
            Self::Pending => "PENDING",
            Self::Rejected => "REJECTED",
            Self::Expired => "EXPIRED",
            Self::NotFound => "NOT_FOUND",
        }
    }

    /// Map a textual status onto the closed set.
    ///
    /// Case-insensitive; anything unrecognised becomes `Pending`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "VERIFIED" => Self::Verified,
            "REJECTED" => Self::Rejected,
            "EXPIRED" => Self::Expired,
            "NOT_FOUND" => Self::NotFound,
            _ => Self::Pending,
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tax compliance standing of a taxpayer or a single filing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    Compliant,
    NonCompliant,
    UnderInvestigation,
    Defaulter,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "COMPLIANT",
            Self::NonCompliant => "NON_COMPLIANT",
            Self::UnderInvestigation => "UNDER_INVESTIGATION",
            Self::Defaulter => "DEFAULTER",
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of verifying one taxpayer / tax type / period combination.
///
/// Built once by a verifier and never changed afterwards; all fields are
/// read through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    tpin: String,
    tax_type: TaxType,
    status: VerificationStatus,
    compliance: Option<ComplianceStatus>,
    reason: Option<String>,
    due_date: Option<NaiveDate>,
    filed_on: Option<NaiveDate>,
    late_by_days: Option<i64>,
    filing_period: FilingPeriod,
}

impl VerificationOutcome {
    pub(crate) fn rejected(
        tpin: &str,
        tax_type: TaxType,
        filing_period: FilingPeriod,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            tpin: tpin.to_string(),
            tax_type,
            status: VerificationStatus::Rejected,
            compliance: None,
            reason: Some(reason.into()),
            due_date: None,
            filed_on: None,
            late_by_days: None,
            filing_period,
        }
    }

    pub(crate) fn pending(
        tpin: &str,
        tax_type: TaxType,
        filing_period: FilingPeriod,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            tpin: tpin.to_string(),
            tax_type,
            status: VerificationStatus::Pending,
            compliance: None,
            reason: None,
            due_date: Some(due_date),
            filed_on: None,
            late_by_days: None,
            filing_period,
        }
    }

    /// A filed return: compliant when `filed_on <= due_date`, otherwise
    /// non-compliant with the lateness in whole days.
    pub(crate) fn filed(
        tpin: &str,
        tax_type: TaxType,
        filing_period: FilingPeriod,
        due_date: NaiveDate,
        filed_on: NaiveDate,
    ) -> Self {
        let (compliance, late_by_days) = if filed_on <= due_date {
            (ComplianceStatus::Compliant, None)
        } else {
            (
                ComplianceStatus::NonCompliant,
                Some((filed_on - due_date).num_days()),
            )
        };
        Self {
            tpin: tpin.to_string(),
            tax_type,
            status: VerificationStatus::Verified,
            compliance: Some(compliance),
            reason: None,
            due_date: Some(due_date),
            filed_on: Some(filed_on),
            late_by_days,
            filing_period,
        }
    }

    pub fn tpin(&self) -> &str {
        &self.tpin
    }

    pub fn tax_type(&self) -> TaxType {
        self.tax_type
    }

    pub fn status(&self) -> VerificationStatus {
        self.status
    }

    /// Timeliness verdict; `None` while the return is still pending or
    /// when the verification was rejected.
    pub fn compliance(&self) -> Option<ComplianceStatus> {
        self.compliance
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn filed_on(&self) -> Option<NaiveDate> {
        self.filed_on
    }

    /// Whole days between the due date and a late filing.
    pub fn late_by_days(&self) -> Option<i64> {
        self.late_by_days
    }

    pub fn filing_period(&self) -> FilingPeriod {
        self.filing_period
    }

    pub fn is_compliant(&self) -> bool {
        self.compliance == Some(ComplianceStatus::Compliant)
    }
}
