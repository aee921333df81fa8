//! Taxpayer compliance records, scoring, and recommendations.
//!
//! [`ComplianceChecker`] runs the returns / payments / penalties checks and
//! produces a [`ComplianceRecord`] valid until the end of the following
//! month. [`compliance_score`] is a separate additive score for reports.

mod checker;
mod recommendations;
mod score;

pub use checker::{
    AssumeCompliant, ComplianceChecker, ComplianceChecks, ComplianceOptions, ComplianceRecord,
    ISSUE_OUTSTANDING_PAYMENTS, ISSUE_OUTSTANDING_RETURNS, ISSUE_UNPAID_PENALTIES,
    check_compliance_status, check_compliance_status_at, valid_until_for,
};
pub use recommendations::{ComplianceSummary, REVIEW_SCORE_THRESHOLD, RiskLevel, format_zmw};
pub use score::{ScoreBreakdown, compliance_score};
