use serde::Serialize;

use crate::models::{ReportResult, RiskLevel};

const MAX_SCORE: i64 = 10;
const MIN_SCORE: i64 = 1;

/// At-a-glance counts and score for a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// 1..=10, higher is better.
    pub score: i64,
    pub risk: RiskLevel,
    pub count_normal: usize,
    /// Low or High.
    pub count_mild: usize,
    /// Crit Low or Crit High.
    pub count_critical: usize,
    pub pct_normal: u32,
    pub pct_abnormal: u32,
}

impl Snapshot {
    /// Score is 10, minus 2 per critical and 1 per mild result, clamped to
    /// 1..=10. No results scores 10 with zero counts.
    pub fn compute(results: &[ReportResult]) -> Self {
        let total = results.len();
        let count_normal = results.iter().filter(|r| r.status.is_normal()).count();
        let count_critical = results.iter().filter(|r| r.status.is_critical()).count();
        let count_mild = total - count_normal - count_critical;

        let score = (MAX_SCORE - 2 * count_critical as i64 - count_mild as i64).clamp(MIN_SCORE, MAX_SCORE);

        let (pct_normal, pct_abnormal) = if total == 0 {
            (0, 0)
        } else {
            let pct = (count_normal as f64 / total as f64 * 100.0).round() as u32;
            (pct, 100 - pct)
        };

        Self {
            score,
            risk: risk_for(score),
            count_normal,
            count_mild,
            count_critical,
            pct_normal,
            pct_abnormal,
        }
    }
}

pub fn risk_for(score: i64) -> RiskLevel {
    if score >= 8 {
        RiskLevel::Low
    } else if score >= 5 {
        RiskLevel::Moderate
    } else {
        RiskLevel::High
    }
}
