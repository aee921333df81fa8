use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::source::TaxpayerDataSource;
use crate::compliance::{
    ComplianceChecker, ComplianceChecks, ComplianceOptions, ComplianceRecord,
    check_compliance_status_at,
};
use crate::core::{
    FilingMode, FilingPeriod, LookupError, TaxType, Tpin, TpinChecksum, TpinValidator,
    VerificationConfig, VerificationError, VerificationOutcome, VerificationStatus,
    validate_amount,
};
use crate::filing::{FilingRules, RegistrationLookup, VatVerifier, Verifier, VerifierRegistry};
use crate::taxpayer::{TaxRegistration, Taxpayer};

/// Source of the current time.
pub type Clock = fn() -> DateTime<Utc>;

/// Entry point for taxpayer, registration and payment verification.
///
/// Holds only read-only state assembled at construction, so one instance
/// can serve concurrent requests.
pub struct VerificationService {
    config: VerificationConfig,
    validator: TpinValidator,
    rules: FilingRules,
    verifiers: VerifierRegistry,
    compliance: ComplianceChecker,
    source: Arc<dyn TaxpayerDataSource>,
    clock: Clock,
}

impl fmt::Debug for VerificationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationService")
            .field("config", &self.config)
            .field("verifiers", &self.verifiers)
            .finish_non_exhaustive()
    }
}

impl VerificationService {
    pub fn builder(source: Arc<dyn TaxpayerDataSource>) -> VerificationServiceBuilder {
        VerificationServiceBuilder::new(source)
    }

    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    /// Validate a TPIN without any lookup.
    pub fn validate_tpin(&self, tpin: &str) -> Result<Tpin, VerificationError> {
        Ok(self.validator.validate(tpin)?)
    }

    /// Statutory due date without a full verification.
    ///
    /// Uses the registered verifier's deadlines for `tax_type`, so the
    /// answer matches what [`verify_filing`](Self::verify_filing) would
    /// compute. Tax types without a verifier use the configured rules.
    pub fn due_date(
        &self,
        tax_type: TaxType,
        mode: FilingMode,
        period: FilingPeriod,
    ) -> Result<NaiveDate, VerificationError> {
        match self.verifiers.get(tax_type) {
            Some(verifier) => verifier.due_date(mode, period),
            None => self.rules.due_date(tax_type, mode, period),
        }
    }

    /// Verify a taxpayer and attach a fresh compliance record.
    ///
    /// # Errors
    ///
    /// `InvalidFormat` for a malformed TPIN, `NotFound` when the data source
    /// has no record, `Unavailable` when a lookup fails or times out.
    #[tracing::instrument(skip(self))]
    pub async fn verify_taxpayer(&self, tpin: &str) -> Result<Taxpayer, VerificationError> {
        let tpin = self.validate_tpin(tpin)?;
        let details = self
            .lookup(self.source.fetch(&tpin))
            .await?
            .ok_or_else(|| VerificationError::NotFound(tpin.to_string()))?;

        let compliance = self
            .lookup(self.compliance.verify_compliance_at(
                &tpin,
                ComplianceOptions::default(),
                (self.clock)(),
            ))
            .await?;
        tracing::info!(%tpin, compliant = compliance.is_compliant(), "taxpayer verified");
        Ok(Taxpayer::new(tpin, details).verified(compliance))
    }

    /// Fetch the taxpayer's registration for `tax_type`.
    ///
    /// # Errors
    ///
    /// `NotFound` when no registration exists for the pair.
    #[tracing::instrument(skip(self))]
    pub async fn verify_tax_registration(
        &self,
        tpin: &str,
        tax_type: TaxType,
    ) -> Result<TaxRegistration, VerificationError> {
        let tpin = self.validate_tpin(tpin)?;
        let registration = self
            .lookup(self.source.fetch_registration(&tpin, tax_type))
            .await?
            .ok_or_else(|| VerificationError::NotFound(format!("{tpin} ({tax_type})")))?;
        tracing::info!(%tpin, %tax_type, active = registration.active, "registration verified");
        Ok(registration)
    }

    /// Verify a tax payment for a `YYYY-MM` period.
    ///
    /// Tax types without a registered verifier report `Pending`.
    ///
    /// # Errors
    ///
    /// Format errors for the TPIN, period or amount, `InvalidFilingPeriod`
    /// for a future period, `InvalidFilingMode` when the verifier has no
    /// deadline for `mode`, `Unavailable` when the registration lookup fails
    /// or times out.
    #[tracing::instrument(skip(self))]
    pub async fn verify_tax_payment(
        &self,
        tpin: &str,
        tax_type: TaxType,
        tax_period: &str,
        amount: Decimal,
        mode: FilingMode,
        filed_on: Option<NaiveDate>,
    ) -> Result<VerificationStatus, VerificationError> {
        self.validate_tpin(tpin)?;
        let period = FilingPeriod::parse(tax_period)?;
        validate_amount(amount, Decimal::ZERO)?;

        let status = match self.verify_filing(tpin, tax_type, period, mode, filed_on).await? {
            Some(outcome) => outcome.status(),
            None => {
                tracing::debug!(%tax_type, "no verifier registered, reporting pending");
                VerificationStatus::Pending
            }
        };
        tracing::info!(tpin, %tax_type, %period, %status, "payment verified");
        Ok(status)
    }

    /// Run the tax type's verifier and return its full outcome.
    ///
    /// `Ok(None)` when no verifier is registered for `tax_type`.
    pub async fn verify_filing(
        &self,
        tpin: &str,
        tax_type: TaxType,
        period: FilingPeriod,
        mode: FilingMode,
        filed_on: Option<NaiveDate>,
    ) -> Result<Option<VerificationOutcome>, VerificationError> {
        period.ensure_not_future((self.clock)().date_naive())?;
        let Some(verifier) = self.verifiers.get(tax_type) else {
            return Ok(None);
        };
        self.lookup(verifier.verify(tpin, mode, period, filed_on))
            .await
            .map(Some)
    }

    /// Check a compliance record against the service clock.
    pub fn compliance_status(&self, record: &ComplianceRecord) -> (bool, String) {
        check_compliance_status_at(record, (self.clock)())
    }

    /// Bound a call that reaches a collaborator by `lookup_timeout_secs`.
    async fn lookup<T, E>(
        &self,
        fut: impl Future<Output = Result<T, E>>,
    ) -> Result<T, VerificationError>
    where
        E: Into<VerificationError>,
    {
        let secs = self.config.lookup_timeout_secs;
        match tokio::time::timeout(Duration::from_secs(secs), fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                let err = e.into();
                if let VerificationError::Unavailable(cause) = &err {
                    tracing::warn!(error = %cause, "taxpayer lookup failed");
                }
                Err(err)
            }
            Err(_) => {
                tracing::warn!(timeout_secs = secs, "taxpayer lookup timed out");
                Err(LookupError::Timeout(secs).into())
            }
        }
    }
}

/// Builder for [`VerificationService`].
///
/// ```
/// use std::sync::Arc;
/// use taxverify::service::*;
///
/// let directory = Arc::new(InMemoryDirectory::new());
/// let service = VerificationService::builder(directory.clone())
///     .registration_lookup(directory.clone())
///     .compliance_checks(directory)
///     .build()
///     .unwrap();
/// assert!(service.validate_tpin("1234567890").is_ok());
/// ```
pub struct VerificationServiceBuilder {
    source: Arc<dyn TaxpayerDataSource>,
    config: VerificationConfig,
    registration: Option<Arc<dyn RegistrationLookup>>,
    checks: Option<Arc<dyn ComplianceChecks>>,
    checksum: Option<Arc<dyn TpinChecksum>>,
    extra_verifiers: Vec<Verifier>,
    clock: Clock,
}

impl VerificationServiceBuilder {
    pub fn new(source: Arc<dyn TaxpayerDataSource>) -> Self {
        Self {
            source,
            config: VerificationConfig::default(),
            registration: None,
            checks: None,
            checksum: None,
            extra_verifiers: Vec::new(),
            clock: Utc::now,
        }
    }

    pub fn config(mut self, config: VerificationConfig) -> Self {
        self.config = config;
        self
    }

    /// Registry consulted by the per-tax-type verifiers.
    pub fn registration_lookup(mut self, lookup: Arc<dyn RegistrationLookup>) -> Self {
        self.registration = Some(lookup);
        self
    }

    /// Predicates consulted when building compliance records.
    pub fn compliance_checks(mut self, checks: Arc<dyn ComplianceChecks>) -> Self {
        self.checks = Some(checks);
        self
    }

    pub fn tpin_checksum(mut self, checksum: Arc<dyn TpinChecksum>) -> Self {
        self.checksum = Some(checksum);
        self
    }

    /// Register a verifier, replacing the standard one for its tax type.
    pub fn verifier(mut self, verifier: impl Into<Verifier>) -> Self {
        self.extra_verifiers.push(verifier.into());
        self
    }

    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Validate the configuration and assemble the service.
    pub fn build(self) -> Result<VerificationService, VerificationError> {
        self.config.validate()?;

        let mut validator = TpinValidator::new(self.config.tpin.clone());
        if let Some(checksum) = self.checksum {
            validator = validator.with_checksum(checksum);
        }

        let mut vat = VatVerifier::new(&self.config).with_validator(validator.clone());
        if let Some(registration) = self.registration {
            vat = vat.with_registration(registration);
        }
        let mut verifiers = VerifierRegistry::empty();
        verifiers.register(vat);
        for verifier in self.extra_verifiers {
            verifiers.register(verifier);
        }

        let mut compliance = ComplianceChecker::new(&self.config);
        if let Some(checks) = self.checks {
            compliance = compliance.with_checks(checks);
        }

        tracing::debug!(
            tax_types = ?verifiers.tax_types().collect::<Vec<_>>(),
            "verification service ready"
        );

        Ok(VerificationService {
            rules: FilingRules::new(&self.config),
            validator,
            verifiers,
            compliance,
            source: self.source,
            clock: self.clock,
            config: self.config,
        })
    }
}
