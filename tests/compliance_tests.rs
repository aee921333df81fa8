use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal_macros::dec;
use std::sync::Arc;
use taxverify::compliance::*;
use taxverify::core::*;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

fn tpin() -> Tpin {
    validate_tpin("1234567890").unwrap()
}

struct Ledger {
    returns: bool,
    payments: bool,
    penalties: bool,
}

#[async_trait]
impl ComplianceChecks for Ledger {
    async fn returns_filed(&self, _: &Tpin) -> Result<bool, LookupError> {
        Ok(self.returns)
    }

    async fn payments_current(&self, _: &Tpin) -> Result<bool, LookupError> {
        Ok(self.payments)
    }

    async fn penalties_clear(&self, _: &Tpin) -> Result<bool, LookupError> {
        Ok(self.penalties)
    }
}

fn checker(returns: bool, payments: bool, penalties: bool) -> ComplianceChecker {
    ComplianceChecker::default().with_checks(Arc::new(Ledger {
        returns,
        payments,
        penalties,
    }))
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[tokio::test]
async fn clean_taxpayer_scores_100() {
    let now = at(2024, 3, 15, 10, 0, 0);
    let r = checker(true, true, true)
        .verify_compliance_at(&tpin(), ComplianceOptions::default(), now)
        .await
        .unwrap();
    assert_eq!(r.status(), ComplianceStatus::Compliant);
    assert_eq!(r.score(), 100);
    assert!(r.issues().is_empty());
    assert_eq!(r.last_verified(), now);
    assert_eq!(r.valid_until(), at(2024, 4, 30, 23, 59, 59));
}

#[tokio::test]
async fn every_failure_deducts_its_weight() {
    let now = at(2024, 3, 15, 10, 0, 0);
    let r = checker(false, false, false)
        .verify_compliance_at(&tpin(), ComplianceOptions::default(), now)
        .await
        .unwrap();
    assert_eq!(r.status(), ComplianceStatus::NonCompliant);
    assert_eq!(r.score(), 0);
    assert_eq!(
        r.issues(),
        [ISSUE_OUTSTANDING_RETURNS, ISSUE_OUTSTANDING_PAYMENTS, ISSUE_UNPAID_PENALTIES]
    );
}

#[tokio::test]
async fn payments_only_failure() {
    let r = checker(true, false, true)
        .verify_compliance_at(&tpin(), ComplianceOptions::default(), at(2024, 1, 1, 0, 0, 0))
        .await
        .unwrap();
    assert_eq!(r.score(), 60);
    assert_eq!(r.issues(), [ISSUE_OUTSTANDING_PAYMENTS]);
}

#[tokio::test]
async fn disabled_checks_are_skipped() {
    let options = ComplianceOptions {
        check_returns: false,
        check_payments: true,
        check_penalties: false,
    };
    let r = checker(false, true, false)
        .verify_compliance_at(&tpin(), options, at(2024, 1, 1, 0, 0, 0))
        .await
        .unwrap();
    assert!(r.is_compliant());
    assert_eq!(r.score(), 100);
}

#[tokio::test]
async fn heavy_weights_saturate_at_zero() {
    let config = VerificationConfig {
        penalty_weights: PenaltyWeights {
            returns: 90,
            payments: 90,
            penalties: 90,
        },
        ..VerificationConfig::default()
    };
    let r = ComplianceChecker::new(&config)
        .with_checks(Arc::new(Ledger {
            returns: false,
            payments: false,
            penalties: true,
        }))
        .verify_compliance_at(&tpin(), ComplianceOptions::default(), at(2024, 1, 1, 0, 0, 0))
        .await
        .unwrap();
    assert_eq!(r.score(), 0);
}

#[test]
fn validity_window_for_december_and_leap_february() {
    assert_eq!(valid_until_for(at(2023, 12, 31, 23, 0, 0)), at(2024, 1, 31, 23, 59, 59));
    assert_eq!(valid_until_for(at(2024, 1, 1, 0, 0, 0)), at(2024, 2, 29, 23, 59, 59));
    assert_eq!(valid_until_for(at(2023, 1, 31, 12, 0, 0)), at(2023, 2, 28, 23, 59, 59));
}

// ---------------------------------------------------------------------------
// Status check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_messages() {
    let now = at(2024, 3, 15, 10, 0, 0);
    let good = checker(true, true, true)
        .verify_compliance_at(&tpin(), ComplianceOptions::default(), now)
        .await
        .unwrap();
    assert_eq!(
        check_compliance_status_at(&good, now),
        (true, "Compliance record is valid and compliant".to_string())
    );
    assert_eq!(
        check_compliance_status_at(&good, at(2024, 5, 1, 0, 0, 0)),
        (false, "Compliance record has expired".to_string())
    );

    let bad = checker(false, true, false)
        .verify_compliance_at(&tpin(), ComplianceOptions::default(), now)
        .await
        .unwrap();
    assert_eq!(
        check_compliance_status_at(&bad, now).1,
        "Compliance record is not compliant: Outstanding tax returns, Unpaid penalties"
    );
}

#[test]
fn non_compliant_without_issues_reports_unknown() {
    let now = at(2024, 3, 15, 10, 0, 0);
    let record = ComplianceRecord::new(
        ComplianceStatus::UnderInvestigation,
        now,
        valid_until_for(now),
        Vec::new(),
        80,
    );
    let (ok, msg) = check_compliance_status_at(&record, now);
    assert!(!ok);
    assert_eq!(msg, "Compliance record is not compliant: Unknown issues");
}

#[test]
fn record_constructor_clamps_score() {
    let now = at(2024, 3, 15, 10, 0, 0);
    let r = ComplianceRecord::new(ComplianceStatus::Compliant, now, valid_until_for(now), vec![], 250);
    assert_eq!(r.score(), 100);
}

#[test]
fn compliant_status_with_issues_is_not_compliant() {
    let now = at(2024, 3, 15, 10, 0, 0);
    let r = ComplianceRecord::new(
        ComplianceStatus::Compliant,
        now,
        valid_until_for(now),
        vec!["Manual review flag".into()],
        100,
    );
    assert!(!r.is_compliant());
    assert_eq!(
        check_compliance_status_at(&r, now),
        (false, "Compliance record is not compliant: Manual review flag".to_string())
    );
}

// ---------------------------------------------------------------------------
// Reporting score and recommendations
// ---------------------------------------------------------------------------

#[test]
fn reporting_score_always_capped() {
    for returns in [true, false] {
        for payments in [true, false] {
            for penalties in [true, false] {
                for months in [0, 12, 24, 120] {
                    let s = compliance_score(returns, payments, penalties, months);
                    assert_eq!(s.score, 100);
                    assert!(s.raw_total >= 100);
                }
            }
        }
    }
}

#[test]
fn high_risk_summary() {
    let summary = ComplianceSummary {
        outstanding_returns: 1,
        outstanding_payments: dec!(0),
        penalties: dec!(500),
        score: 90,
        risk_level: RiskLevel::High,
    };
    assert_eq!(
        summary.recommendations(),
        vec![
            "Submit 1 outstanding tax returns".to_string(),
            "Urgent: Address compliance issues to avoid penalties".to_string(),
        ]
    );
}
