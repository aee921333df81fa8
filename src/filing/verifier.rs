//! Per-tax-type filing verification.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;

use super::rules::due_date_in;
use crate::core::{
    DeadlineTable, FilingMode, FilingPeriod, LookupError, TaxType, Tpin, TpinValidator,
    VerificationConfig, VerificationError, VerificationOutcome,
};

/// Collaborator answering whether a taxpayer is registered for a tax type.
///
/// Must be idempotent and free of side effects from the caller's view.
/// Implementations backed by I/O should await it rather than block.
#[async_trait]
pub trait RegistrationLookup: Send + Sync {
    async fn is_registered(&self, tpin: &Tpin, tax_type: TaxType) -> Result<bool, LookupError>;
}

/// Registration lookup that treats every taxpayer as registered.
///
/// Used when no registry is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeRegistered;

#[async_trait]
impl RegistrationLookup for AssumeRegistered {
    async fn is_registered(&self, _tpin: &Tpin, _tax_type: TaxType) -> Result<bool, LookupError> {
        Ok(true)
    }
}

/// Verifier for Value Added Tax returns.
#[derive(Clone)]
pub struct VatVerifier {
    validator: TpinValidator,
    deadlines: DeadlineTable,
    registration: Arc<dyn RegistrationLookup>,
}

impl fmt::Debug for VatVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VatVerifier")
            .field("validator", &self.validator)
            .field("deadlines", &self.deadlines)
            .finish_non_exhaustive()
    }
}

impl Default for VatVerifier {
    fn default() -> Self {
        Self::new(&VerificationConfig::default())
    }
}

impl VatVerifier {
    /// Build from the VAT deadline table and TPIN rules in `config`.
    pub fn new(config: &VerificationConfig) -> Self {
        Self {
            validator: TpinValidator::new(config.tpin.clone()),
            deadlines: config
                .filing_deadlines
                .get(&TaxType::Vat)
                .cloned()
                .unwrap_or_default(),
            registration: Arc::new(AssumeRegistered),
        }
    }

    pub fn with_validator(mut self, validator: TpinValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_registration(mut self, registration: Arc<dyn RegistrationLookup>) -> Self {
        self.registration = registration;
        self
    }

    pub fn due_date(
        &self,
        mode: FilingMode,
        period: FilingPeriod,
    ) -> Result<NaiveDate, VerificationError> {
        due_date_in(&self.deadlines, TaxType::Vat, mode, period)
    }

    /// Verify a VAT return.
    ///
    /// Steps, stopping at the first that fails:
    /// 1. TPIN format: `Rejected` with the validation message.
    /// 2. VAT registration: `Rejected`, "Not registered for VAT".
    /// 3. Due date: an unknown filing mode is returned as `Err`.
    /// 4. No `filed_on`: `Pending` with the due date.
    /// 5. `filed_on <= due`: `Verified`, compliant.
    /// 6. Otherwise: `Verified`, non-compliant, with days late.
    ///
    /// # Errors
    ///
    /// `InvalidFilingMode` for an unconfigured mode, `Unavailable` if the
    /// registration lookup fails.
    pub async fn verify(
        &self,
        tpin: &str,
        mode: FilingMode,
        period: FilingPeriod,
        filed_on: Option<NaiveDate>,
    ) -> Result<VerificationOutcome, VerificationError> {
        verify_filing(
            TaxType::Vat,
            &self.validator,
            self.registration.as_ref(),
            |mode, period| self.due_date(mode, period),
            tpin,
            mode,
            period,
            filed_on,
        )
        .await
    }
}

/// Shared verification pipeline; each tax type supplies its own due-date
/// function and registration lookup.
#[allow(clippy::too_many_arguments)]
async fn verify_filing(
    tax_type: TaxType,
    validator: &TpinValidator,
    registration: &dyn RegistrationLookup,
    due_date: impl Fn(FilingMode, FilingPeriod) -> Result<NaiveDate, VerificationError>,
    tpin: &str,
    mode: FilingMode,
    period: FilingPeriod,
    filed_on: Option<NaiveDate>,
) -> Result<VerificationOutcome, VerificationError> {
    let valid = match validator.validate(tpin) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::warn!(%tax_type, %period, reason = %e.reason, "TPIN rejected");
            return Ok(VerificationOutcome::rejected(tpin, tax_type, period, e.reason));
        }
    };

    if !registration.is_registered(&valid, tax_type).await? {
        tracing::warn!(tpin, %tax_type, "taxpayer not registered");
        return Ok(VerificationOutcome::rejected(
            tpin,
            tax_type,
            period,
            format!("Not registered for {tax_type}"),
        ));
    }

    let due = due_date(mode, period)?;

    let outcome = match filed_on {
        None => VerificationOutcome::pending(tpin, tax_type, period, due),
        Some(filed_on) => VerificationOutcome::filed(tpin, tax_type, period, due, filed_on),
    };
    tracing::debug!(
        tpin,
        %tax_type,
        %period,
        %due,
        status = %outcome.status(),
        late_by_days = ?outcome.late_by_days(),
        "filing verified"
    );
    Ok(outcome)
}

/// One verifier per implemented tax type.
///
/// Add a variant here together with its [`TaxType`] to support another
/// tax head.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Verifier {
    Vat(VatVerifier),
}

impl Verifier {
    pub fn tax_type(&self) -> TaxType {
        match self {
            Self::Vat(_) => TaxType::Vat,
        }
    }

    pub fn due_date(
        &self,
        mode: FilingMode,
        period: FilingPeriod,
    ) -> Result<NaiveDate, VerificationError> {
        match self {
            Self::Vat(v) => v.due_date(mode, period),
        }
    }

    pub async fn verify(
        &self,
        tpin: &str,
        mode: FilingMode,
        period: FilingPeriod,
        filed_on: Option<NaiveDate>,
    ) -> Result<VerificationOutcome, VerificationError> {
        match self {
            Self::Vat(v) => v.verify(tpin, mode, period, filed_on).await,
        }
    }
}

impl From<VatVerifier> for Verifier {
    fn from(v: VatVerifier) -> Self {
        Self::Vat(v)
    }
}
