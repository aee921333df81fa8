//! Follow-up actions derived from a compliance summary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Score below which a consultant review is recommended.
pub const REVIEW_SCORE_THRESHOLD: u8 = 70;

/// Audit risk band assigned to a taxpayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Outstanding obligations and standing of one taxpayer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub outstanding_returns: u32,
    /// Unpaid tax in ZMW.
    pub outstanding_payments: Decimal,
    /// Unpaid penalties in ZMW.
    pub penalties: Decimal,
    pub score: u8,
    pub risk_level: RiskLevel,
}

impl ComplianceSummary {
    /// Recommended actions, most concrete first.
    ///
    /// ```
    /// use taxverify::compliance::*;
    /// use rust_decimal_macros::dec;
    ///
    /// let summary = ComplianceSummary {
    ///     outstanding_returns: 3,
    ///     outstanding_payments: dec!(12500),
    ///     penalties: dec!(1800),
    ///     score: 45,
    ///     risk_level: RiskLevel::High,
    /// };
    /// let recs = summary.recommendations();
    /// assert_eq!(recs[0], "Submit 3 outstanding tax returns");
    /// assert_eq!(recs[1], "Clear outstanding payment of ZMW 12,500.00");
    /// assert_eq!(recs.len(), 4);
    /// ```
    pub fn recommendations(&self) -> Vec<String> {
        let mut recs = Vec::new();

        if self.outstanding_returns > 0 {
            recs.push(format!(
                "Submit {} outstanding tax returns",
                self.outstanding_returns
            ));
        }

        if self.outstanding_payments > Decimal::ZERO {
            recs.push(format!(
                "Clear outstanding payment of ZMW {}",
                format_zmw(self.outstanding_payments)
            ));
        }

        if self.score < REVIEW_SCORE_THRESHOLD {
            recs.push("Schedule meeting with tax consultant to review compliance status".into());
        }

        if self.risk_level == RiskLevel::High {
            recs.push("Urgent: Address compliance issues to avoid penalties".into());
        }

        if recs.is_empty() {
            recs.push("Maintain current compliance practices".into());
        }

        recs
    }
}

/// Format an amount with thousands separators and two decimals.
pub fn format_zmw(amount: Decimal) -> String {
    let fixed = format!("{:.2}", amount.round_dp(2));
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}.{frac_part}")
}
