//! Static verification configuration, loaded once and read-only afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::VerificationError;
use super::tpin::TpinRules;
use super::types::{FilingMode, TaxType};

/// Day-of-month deadlines per filing mode for one tax type.
pub type DeadlineTable = BTreeMap<FilingMode, u32>;

/// Default VAT return deadline for manual filing (day of the following month).
pub const VAT_MANUAL_DUE_DAY: u32 = 5;
/// Default VAT return deadline for electronic filing (day of the following month).
pub const VAT_ELECTRONIC_DUE_DAY: u32 = 18;

/// Default seconds allowed for a single collaborator lookup.
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 30;
/// Default cache lifetime for integrators that cache verification results.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Score deducted for each failed compliance check category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyWeights {
    /// Outstanding tax returns.
    pub returns: u8,
    /// Outstanding tax payments.
    pub payments: u8,
    /// Unpaid penalties.
    pub penalties: u8,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            returns: 30,
            payments: 40,
            penalties: 30,
        }
    }
}

/// Configuration shared by every verification component.
///
/// ```
/// use taxverify::core::*;
///
/// let config = VerificationConfig::default();
/// assert_eq!(config.tpin.length, 10);
/// assert_eq!(config.deadline_day(TaxType::Vat, FilingMode::Electronic), Some(18));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    pub tpin: TpinRules,
    pub filing_deadlines: BTreeMap<TaxType, DeadlineTable>,
    pub penalty_weights: PenaltyWeights,
    pub lookup_timeout_secs: u64,
    /// Not used by the core, which keeps no cache.
    pub cache_ttl_secs: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        let vat = DeadlineTable::from([
            (FilingMode::Manual, VAT_MANUAL_DUE_DAY),
            (FilingMode::Electronic, VAT_ELECTRONIC_DUE_DAY),
        ]);
        Self {
            tpin: TpinRules::default(),
            filing_deadlines: BTreeMap::from([(TaxType::Vat, vat)]),
            penalty_weights: PenaltyWeights::default(),
            lookup_timeout_secs: DEFAULT_LOOKUP_TIMEOUT_SECS,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl VerificationConfig {
    pub fn deadline_day(&self, tax_type: TaxType, mode: FilingMode) -> Option<u32> {
        self.filing_deadlines
            .get(&tax_type)
            .and_then(|table| table.get(&mode))
            .copied()
    }

    /// Check internal consistency.
    ///
    /// Deadline days are limited to 1..=28 so they exist in every month.
    pub fn validate(&self) -> Result<(), VerificationError> {
        if self.tpin.length == 0 {
            return Err(VerificationError::Config("TPIN length must be positive".into()));
        }
        if let Some(bad) = self.tpin.allowed_prefixes.iter().find(|c| !c.is_ascii_digit()) {
            return Err(VerificationError::Config(format!(
                "TPIN prefix '{bad}' is not a digit"
            )));
        }
        for (tax_type, table) in &self.filing_deadlines {
            for (mode, day) in table {
                if !(1..=28).contains(day) {
                    return Err(VerificationError::Config(format!(
                        "{tax_type} {mode} deadline day {day} outside 1..=28"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration document.
    ///
    /// Missing fields fall back to their defaults.
    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> Result<Self, VerificationError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| VerificationError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "json")]
    pub fn from_json_reader(reader: impl std::io::Read) -> Result<Self, VerificationError> {
        let config: Self = serde_json::from_reader(reader)
            .map_err(|e| VerificationError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
