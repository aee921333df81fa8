//! Deduction-based compliance checks with a validity window.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Days, Months, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::core::{
    ComplianceStatus, LookupError, PenaltyWeights, Tpin, VerificationConfig, VerificationError,
};

/// Issue recorded when tax returns are outstanding.
pub const ISSUE_OUTSTANDING_RETURNS: &str = "Outstanding tax returns";
/// Issue recorded when tax payments are outstanding.
pub const ISSUE_OUTSTANDING_PAYMENTS: &str = "Outstanding tax payments";
/// Issue recorded when penalties are unpaid.
pub const ISSUE_UNPAID_PENALTIES: &str = "Unpaid penalties";

/// Tax compliance record for one taxpayer.
///
/// `score` is in 0..=100 and `valid_until` is the last second of the month
/// after `last_verified`. Deserialized records go through [`ComplianceRecord::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredRecord")]
pub struct ComplianceRecord {
    status: ComplianceStatus,
    last_verified: DateTime<Utc>,
    valid_until: DateTime<Utc>,
    issues: Vec<String>,
    score: u8,
}

impl ComplianceRecord {
    /// Assemble a record, e.g. one loaded from an external store.
    ///
    /// Scores above 100 are clamped.
    pub fn new(
        status: ComplianceStatus,
        last_verified: DateTime<Utc>,
        valid_until: DateTime<Utc>,
        issues: Vec<String>,
        score: u8,
    ) -> Self {
        Self {
            status,
            last_verified,
            valid_until,
            issues,
            score: score.min(100),
        }
    }

    pub fn status(&self) -> ComplianceStatus {
        self.status
    }

    pub fn last_verified(&self) -> DateTime<Utc> {
        self.last_verified
    }

    pub fn valid_until(&self) -> DateTime<Utc> {
        self.valid_until
    }

    pub fn issues(&self) -> &[String] {
        &self.issues
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    /// `true` while `now` is before `valid_until`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.valid_until
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Compliant status and no recorded issues.
    pub fn is_compliant(&self) -> bool {
        self.status == ComplianceStatus::Compliant && self.issues.is_empty()
    }
}

/// Serialized shape of a [`ComplianceRecord`].
#[derive(Deserialize)]
struct StoredRecord {
    status: ComplianceStatus,
    last_verified: DateTime<Utc>,
    valid_until: DateTime<Utc>,
    issues: Vec<String>,
    score: u8,
}

impl From<StoredRecord> for ComplianceRecord {
    fn from(r: StoredRecord) -> Self {
        Self::new(r.status, r.last_verified, r.valid_until, r.issues, r.score)
    }
}

/// Collaborator predicates consulted by [`ComplianceChecker`].
#[async_trait]
pub trait ComplianceChecks: Send + Sync {
    /// All required returns have been filed.
    async fn returns_filed(&self, tpin: &Tpin) -> Result<bool, LookupError>;
    /// All tax payments are up to date.
    async fn payments_current(&self, tpin: &Tpin) -> Result<bool, LookupError>;
    /// No penalties are outstanding.
    async fn penalties_clear(&self, tpin: &Tpin) -> Result<bool, LookupError>;
}

/// Predicates that pass for every taxpayer; used when no data source is
/// wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeCompliant;

#[async_trait]
impl ComplianceChecks for AssumeCompliant {
    async fn returns_filed(&self, _tpin: &Tpin) -> Result<bool, LookupError> {
        Ok(true)
    }

    async fn payments_current(&self, _tpin: &Tpin) -> Result<bool, LookupError> {
        Ok(true)
    }

    async fn penalties_clear(&self, _tpin: &Tpin) -> Result<bool, LookupError> {
        Ok(true)
    }
}

/// Which check categories to run. All enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplianceOptions {
    pub check_returns: bool,
    pub check_payments: bool,
    pub check_penalties: bool,
}

impl Default for ComplianceOptions {
    fn default() -> Self {
        Self {
            check_returns: true,
            check_payments: true,
            check_penalties: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Category {
    Returns,
    Payments,
    Penalties,
}

impl Category {
    async fn passes(
        self,
        checks: &dyn ComplianceChecks,
        tpin: &Tpin,
    ) -> Result<bool, LookupError> {
        match self {
            Self::Returns => checks.returns_filed(tpin).await,
            Self::Payments => checks.payments_current(tpin).await,
            Self::Penalties => checks.penalties_clear(tpin).await,
        }
    }
}

/// Builds [`ComplianceRecord`]s by deducting a fixed weight per failed
/// check category from a starting score of 100.
#[derive(Clone)]
pub struct ComplianceChecker {
    weights: PenaltyWeights,
    checks: Arc<dyn ComplianceChecks>,
}

impl fmt::Debug for ComplianceChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComplianceChecker")
            .field("weights", &self.weights)
            .finish_non_exhaustive()
    }
}

impl Default for ComplianceChecker {
    fn default() -> Self {
        Self::new(&VerificationConfig::default())
    }
}

impl ComplianceChecker {
    pub fn new(config: &VerificationConfig) -> Self {
        Self {
            weights: config.penalty_weights,
            checks: Arc::new(AssumeCompliant),
        }
    }

    pub fn with_checks(mut self, checks: Arc<dyn ComplianceChecks>) -> Self {
        self.checks = checks;
        self
    }

    /// Verify compliance as of now.
    pub async fn verify_compliance(
        &self,
        tpin: &Tpin,
        options: ComplianceOptions,
    ) -> Result<ComplianceRecord, VerificationError> {
        self.verify_compliance_at(tpin, options, Utc::now()).await
    }

    /// Verify compliance as of `now`.
    ///
    /// # Errors
    ///
    /// `Unavailable` if any predicate lookup fails; no partial record is
    /// returned.
    pub async fn verify_compliance_at(
        &self,
        tpin: &Tpin,
        options: ComplianceOptions,
        now: DateTime<Utc>,
    ) -> Result<ComplianceRecord, VerificationError> {
        let mut status = ComplianceStatus::Compliant;
        let mut score: u8 = 100;
        let mut issues = Vec::new();

        let categories = [
            (
                options.check_returns,
                Category::Returns,
                ISSUE_OUTSTANDING_RETURNS,
                self.weights.returns,
            ),
            (
                options.check_payments,
                Category::Payments,
                ISSUE_OUTSTANDING_PAYMENTS,
                self.weights.payments,
            ),
            (
                options.check_penalties,
                Category::Penalties,
                ISSUE_UNPAID_PENALTIES,
                self.weights.penalties,
            ),
        ];

        for (enabled, category, issue, weight) in categories {
            if !enabled {
                continue;
            }
            if !category.passes(self.checks.as_ref(), tpin).await? {
                tracing::debug!(%tpin, issue, weight, "compliance check failed");
                issues.push(issue.to_string());
                status = ComplianceStatus::NonCompliant;
                score = score.saturating_sub(weight);
            }
        }

        let record = ComplianceRecord {
            status,
            last_verified: now,
            valid_until: valid_until_for(now),
            issues,
            score,
        };
        tracing::info!(%tpin, status = %record.status, score = record.score, "compliance verified");
        Ok(record)
    }
}

/// 23:59:59 on the last day of the month after `now`'s month.
pub fn valid_until_for(now: DateTime<Utc>) -> DateTime<Utc> {
    let today = now.date_naive();
    let month_start = today - Days::new(u64::from(today.day0()));
    let after_next = month_start + Months::new(2);
    (after_next.and_time(NaiveTime::MIN) - TimeDelta::seconds(1)).and_utc()
}

/// Whether `record` can be relied on as of now, with a message.
///
/// See [`check_compliance_status_at`] for the compliance gate.
pub fn check_compliance_status(record: &ComplianceRecord) -> (bool, String) {
    check_compliance_status_at(record, Utc::now())
}

/// Whether `record` can be relied on as of `now`, with a message.
///
/// The gate is [`ComplianceRecord::is_compliant`]: a record whose status is
/// `Compliant` but which still lists issues is reported as not compliant,
/// with those issues in the message.
pub fn check_compliance_status_at(record: &ComplianceRecord, now: DateTime<Utc>) -> (bool, String) {
    if !record.is_valid_at(now) {
        return (false, "Compliance record has expired".into());
    }

    if !record.is_compliant() {
        let issues = if record.issues.is_empty() {
            "Unknown issues".to_string()
        } else {
            record.issues.join(", ")
        };
        return (false, format!("Compliance record is not compliant: {issues}"));
    }

    (true, "Compliance record is valid and compliant".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validate_tpin;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn tpin() -> Tpin {
        validate_tpin("1234567890").unwrap()
    }

    struct Failing {
        returns: bool,
        payments: bool,
        penalties: bool,
    }

    #[async_trait]
    impl ComplianceChecks for Failing {
        async fn returns_filed(&self, _: &Tpin) -> Result<bool, LookupError> {
            Ok(!self.returns)
        }
        async fn payments_current(&self, _: &Tpin) -> Result<bool, LookupError> {
            Ok(!self.payments)
        }
        async fn penalties_clear(&self, _: &Tpin) -> Result<bool, LookupError> {
            Ok(!self.penalties)
        }
    }

    fn checker(returns: bool, payments: bool, penalties: bool) -> ComplianceChecker {
        ComplianceChecker::default().with_checks(Arc::new(Failing {
            returns,
            payments,
            penalties,
        }))
    }

    #[tokio::test]
    async fn clean_taxpayer_scores_100() {
        let now = at(2024, 6, 15, 10, 0, 0);
        let r = ComplianceChecker::default()
            .verify_compliance_at(&tpin(), ComplianceOptions::default(), now)
            .await
            .unwrap();
        assert_eq!(r.status(), ComplianceStatus::Compliant);
        assert_eq!(r.score(), 100);
        assert!(r.issues().is_empty());
        assert!(r.is_compliant());
        assert_eq!(r.last_verified(), now);
        assert_eq!(r.valid_until(), at(2024, 7, 31, 23, 59, 59));
    }

    #[tokio::test]
    async fn payments_failure_deducts_40() {
        let r = checker(false, true, false)
            .verify_compliance_at(&tpin(), ComplianceOptions::default(), at(2024, 6, 1, 0, 0, 0))
            .await
            .unwrap();
        assert_eq!(r.status(), ComplianceStatus::NonCompliant);
        assert_eq!(r.score(), 60);
        assert_eq!(r.issues(), [ISSUE_OUTSTANDING_PAYMENTS]);
    }

    #[tokio::test]
    async fn all_failures_floor_at_zero_with_three_issues() {
        let r = checker(true, true, true)
            .verify_compliance_at(&tpin(), ComplianceOptions::default(), at(2024, 6, 1, 0, 0, 0))
            .await
            .unwrap();
        assert_eq!(r.score(), 0);
        assert_eq!(
            r.issues(),
            [ISSUE_OUTSTANDING_RETURNS, ISSUE_OUTSTANDING_PAYMENTS, ISSUE_UNPAID_PENALTIES]
        );
    }

    #[tokio::test]
    async fn heavy_weights_saturate() {
        let mut config = VerificationConfig::default();
        config.penalty_weights = PenaltyWeights {
            returns: 90,
            payments: 90,
            penalties: 90,
        };
        let r = ComplianceChecker::new(&config)
            .with_checks(Arc::new(Failing {
                returns: true,
                payments: true,
                penalties: false,
            }))
            .verify_compliance_at(&tpin(), ComplianceOptions::default(), at(2024, 6, 1, 0, 0, 0))
            .await
            .unwrap();
        assert_eq!(r.score(), 0);
    }

    #[tokio::test]
    async fn disabled_categories_are_skipped() {
        let options = ComplianceOptions {
            check_returns: false,
            check_payments: true,
            check_penalties: false,
        };
        let r = checker(true, false, true)
            .verify_compliance_at(&tpin(), options, at(2024, 6, 1, 0, 0, 0))
            .await
            .unwrap();
        assert!(r.is_compliant());
        assert_eq!(r.score(), 100);
    }

    #[test]
    fn valid_until_wraps_december() {
        assert_eq!(valid_until_for(at(2024, 12, 31, 23, 59, 59)), at(2025, 1, 31, 23, 59, 59));
        assert_eq!(valid_until_for(at(2024, 1, 31, 8, 0, 0)), at(2024, 2, 29, 23, 59, 59));
        assert_eq!(valid_until_for(at(2023, 1, 1, 0, 0, 0)), at(2023, 2, 28, 23, 59, 59));
    }

    #[tokio::test]
    async fn status_expired() {
        let now = at(2024, 6, 1, 0, 0, 0);
        let r = ComplianceChecker::default()
            .verify_compliance_at(&tpin(), ComplianceOptions::default(), now)
            .await
            .unwrap();
        let (ok, msg) = check_compliance_status_at(&r, r.valid_until());
        assert!(!ok);
        assert!(msg.contains("expired"));
        assert!(check_compliance_status_at(&r, now).0);
    }

    #[tokio::test]
    async fn status_lists_issues() {
        let r = checker(true, false, true)
            .verify_compliance_at(&tpin(), ComplianceOptions::default(), at(2024, 6, 1, 0, 0, 0))
            .await
            .unwrap();
        let (ok, msg) = check_compliance_status_at(&r, at(2024, 6, 2, 0, 0, 0));
        assert!(!ok);
        assert_eq!(
            msg,
            "Compliance record is not compliant: Outstanding tax returns, Unpaid penalties"
        );
    }

    #[test]
    fn status_unknown_issues() {
        let now = at(2024, 6, 1, 0, 0, 0);
        let r = ComplianceRecord::new(
            ComplianceStatus::UnderInvestigation,
            now,
            valid_until_for(now),
            Vec::new(),
            80,
        );
        let (ok, msg) = check_compliance_status_at(&r, now);
        assert!(!ok);
        assert!(msg.ends_with("Unknown issues"));
    }

    #[tokio::test]
    async fn status_valid_and_compliant() {
        let now = at(2024, 6, 1, 0, 0, 0);
        let r = ComplianceChecker::default()
            .verify_compliance_at(&tpin(), ComplianceOptions::default(), now)
            .await
            .unwrap();
        assert_eq!(
            check_compliance_status_at(&r, now),
            (true, "Compliance record is valid and compliant".to_string())
        );
    }

    #[tokio::test]
    async fn lookup_failure_propagates() {
        struct Down;
        #[async_trait]
        impl ComplianceChecks for Down {
            async fn returns_filed(&self, _: &Tpin) -> Result<bool, LookupError> {
                Ok(true)
            }
            async fn payments_current(&self, _: &Tpin) -> Result<bool, LookupError> {
                Err(LookupError::Backend("ledger offline".into()))
            }
            async fn penalties_clear(&self, _: &Tpin) -> Result<bool, LookupError> {
                Ok(true)
            }
        }
        let err = ComplianceChecker::default()
            .with_checks(Arc::new(Down))
            .verify_compliance(&tpin(), ComplianceOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, VerificationError::Unavailable(_)));
    }

    #[test]
    fn new_clamps_score() {
        let now = at(2024, 6, 1, 0, 0, 0);
        let r = ComplianceRecord::new(ComplianceStatus::Compliant, now, now, Vec::new(), 250);
        assert_eq!(r.score(), 100);
    }

    #[test]
    fn compliant_status_with_issues_is_not_relied_on() {
        let now = at(2024, 6, 1, 0, 0, 0);
        let r = ComplianceRecord::new(
            ComplianceStatus::Compliant,
            now,
            valid_until_for(now),
            vec![ISSUE_UNPAID_PENALTIES.to_string()],
            90,
        );
        assert!(!r.is_compliant());
        assert_eq!(
            check_compliance_status_at(&r, now),
            (false, "Compliance record is not compliant: Unpaid penalties".to_string())
        );
    }

    #[test]
    fn deserialize_clamps_score() {
        let json = r#"{
            "status": "COMPLIANT",
            "last_verified": "2024-06-01T00:00:00Z",
            "valid_until": "2024-07-31T23:59:59Z",
            "issues": [],
            "score": 250
        }"#;
        let r: ComplianceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.score(), 100);
        assert_eq!(r.valid_until(), at(2024, 7, 31, 23, 59, 59));
    }
}
