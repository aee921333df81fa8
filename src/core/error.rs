use thiserror::Error;

use super::tpin::TpinFormatError;
use super::types::{FilingMode, TaxType};

/// Errors that can occur while verifying a taxpayer or a filing.
///
/// Compliance problems are not errors: they are reported inside
/// [`ComplianceRecord`](crate::compliance::ComplianceRecord) and
/// [`VerificationOutcome`](super::VerificationOutcome).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VerificationError {
    /// The taxpayer identifier failed format validation.
    #[error(transparent)]
    InvalidFormat(#[from] TpinFormatError),

    /// No due-date offset is configured for this tax type and filing mode.
    #[error("no {mode} filing deadline configured for {tax_type}")]
    InvalidFilingMode { tax_type: TaxType, mode: FilingMode },

    /// A filing mode label could not be parsed.
    #[error("invalid filing mode '{0}': must be one of manual, electronic")]
    UnknownFilingMode(String),

    /// A tax type code could not be parsed.
    #[error("unknown tax type '{0}'")]
    UnknownTaxType(String),

    /// Malformed or future filing period.
    #[error("invalid filing period: {0}")]
    InvalidFilingPeriod(String),

    /// Payment amount below the allowed minimum.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// The identifier is well-formed but has no backing record.
    #[error("TPIN {0} not found")]
    NotFound(String),

    /// A collaborator lookup failed; the verification could not complete.
    #[error("verification unavailable: {0}")]
    Unavailable(#[from] LookupError),

    /// Configuration is inconsistent or could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Coarse classification of a [`VerificationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller input is malformed; correct it and call again.
    Format,
    /// The identifier has no backing record.
    NotFound,
    /// A collaborator was unreachable or failed.
    Unavailable,
    /// Static configuration is wrong.
    Configuration,
}

impl VerificationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFormat(_)
            | Self::UnknownFilingMode(_)
            | Self::UnknownTaxType(_)
            | Self::InvalidFilingPeriod(_)
            | Self::InvalidAmount(_) => ErrorKind::Format,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Unavailable(_) => ErrorKind::Unavailable,
            Self::InvalidFilingMode { .. } | Self::Config(_) => ErrorKind::Configuration,
        }
    }
}

/// Failure reported by a registry or data-source collaborator.
///
/// The core never retries; retry policy belongs to the collaborator's client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LookupError {
    /// The backend answered with an error or could not be reached.
    #[error("lookup backend error: {0}")]
    Backend(String),

    /// The lookup did not complete within the configured timeout.
    #[error("lookup timed out after {0}s")]
    Timeout(u64),
}

/// A single taxpayer-data validation finding with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "contact.email").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
