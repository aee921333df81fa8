//! Additive compliance score used for reporting.
//!
//! This score is computed independently of the deduction-based score in
//! [`ComplianceRecord`](super::ComplianceRecord); the two are not reconciled
//! and can disagree for the same taxpayer.

use serde::{Deserialize, Serialize};

const BASE_SCORE: u32 = 100;
const RETURNS_BONUS: u32 = 40;
const PAYMENTS_BONUS: u32 = 40;
const PENALTIES_BONUS: u32 = 30;
const LONG_HISTORY_MONTHS: u32 = 24;
const LONG_HISTORY_BONUS: u32 = 10;
const SHORT_HISTORY_MONTHS: u32 = 12;
const SHORT_HISTORY_BONUS: u32 = 5;
const MAX_SCORE: u32 = 100;

/// Components of an additive compliance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: u32,
    pub returns_bonus: u32,
    pub payments_bonus: u32,
    pub penalties_bonus: u32,
    pub history_bonus: u32,
    /// Sum of all components before capping.
    pub raw_total: u32,
    /// `raw_total` capped at 100.
    pub score: u8,
}

/// Additive reporting score: base 100, +40 returns filed, +40 payments
/// current, +30 no penalties, +10 for 24+ months of history (+5 for 12+),
/// capped at 100.
///
/// Because the base already equals the cap, `score` is always 100; the
/// uncapped `raw_total` is what distinguishes taxpayers.
pub fn compliance_score(
    returns_filed: bool,
    payments_current: bool,
    no_penalties: bool,
    filing_history_months: u32,
) -> ScoreBreakdown {
    let bonus = |earned: bool, points: u32| if earned { points } else { 0 };
    let history_bonus = if filing_history_months >= LONG_HISTORY_MONTHS {
        LONG_HISTORY_BONUS
    } else if filing_history_months >= SHORT_HISTORY_MONTHS {
        SHORT_HISTORY_BONUS
    } else {
        0
    };

    let returns_bonus = bonus(returns_filed, RETURNS_BONUS);
    let payments_bonus = bonus(payments_current, PAYMENTS_BONUS);
    let penalties_bonus = bonus(no_penalties, PENALTIES_BONUS);
    let raw_total = BASE_SCORE + returns_bonus + payments_bonus + penalties_bonus + history_bonus;

    ScoreBreakdown {
        base: BASE_SCORE,
        returns_bonus,
        payments_bonus,
        penalties_bonus,
        history_bonus,
        raw_total,
        score: u8::try_from(raw_total.min(MAX_SCORE)).unwrap_or(u8::MAX),
    }
}
