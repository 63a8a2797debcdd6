//! Patient-facing summary assembled from an extracted report: narrative,
//! snapshot metrics and per-result range-bar positions. Rendering is left
//! to the caller.

pub mod messages;
pub mod snapshot;

pub use messages::MessageTemplates;
pub use snapshot::Snapshot;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::models::{PatientInfo, ReportResult};
use crate::pipeline::extraction::number::find_numbers;
use crate::pipeline::extraction::LabReport;

/// Range-bar position when the range cannot be used.
const CENTER_PCT: f64 = 50.0;

/// A result with its marker position on a 0–100 range bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    #[serde(flatten)]
    pub result: ReportResult,
    pub visual_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatientSummary {
    pub info: PatientInfo,
    /// Report date from the document, else the day the summary was built.
    pub report_date: String,
    pub narrative: Vec<String>,
    pub snapshot: Snapshot,
    pub next_steps: String,
    pub rows: Vec<SummaryRow>,
}

impl PatientSummary {
    pub fn build(report: &LabReport) -> Self {
        Self::build_on(report, Local::now().date_naive())
    }

    /// Build with an explicit "today" for reports without a date.
    pub fn build_on(report: &LabReport, today: NaiveDate) -> Self {
        let report_date = if report.info.has_date() {
            report.info.date.clone()
        } else {
            today.format("%d-%m-%Y").to_string()
        };

        let snapshot = Snapshot::compute(&report.results);
        Self {
            info: report.info.clone(),
            report_date,
            narrative: narrative(&report.results),
            next_steps: MessageTemplates::next_steps(snapshot.count_critical > 0).to_string(),
            snapshot,
            rows: report
                .results
                .iter()
                .map(|r| SummaryRow {
                    visual_pct: visual_position(r),
                    result: r.clone(),
                })
                .collect(),
        }
    }
}

/// Narrative paragraphs: one stable line, or a critical line and/or a mild
/// line.
pub fn narrative(results: &[ReportResult]) -> Vec<String> {
    let critical: Vec<&str> = results
        .iter()
        .filter(|r| r.status.is_critical())
        .map(|r| r.name.as_str())
        .collect();
    let mild: Vec<&str> = results
        .iter()
        .filter(|r| r.status.is_mild())
        .map(|r| r.name.as_str())
        .collect();

    if critical.is_empty() && mild.is_empty() {
        return vec![MessageTemplates::all_stable()];
    }
    let mut lines = Vec::new();
    if !critical.is_empty() {
        lines.push(MessageTemplates::critical_alert(&critical));
    }
    if !mild.is_empty() {
        lines.push(MessageTemplates::mild_changes(&mild));
    }
    lines
}

/// `20 + (value - low) / (high - low) * 60`, clamped to 5..=95, so the
/// reference range spans 20..80. Centered when value or range is unusable.
pub fn visual_position(result: &ReportResult) -> f64 {
    let Some(value) = find_numbers(&result.value).first().copied() else {
        return CENTER_PCT;
    };
    let bounds = find_numbers(&result.range);
    let (low, high) = match bounds.as_slice() {
        [low, high, ..] => (*low, *high),
        _ => return CENTER_PCT,
    };
    let span = high - low;
    if span <= 0.0 {
        return CENTER_PCT;
    }
    (20.0 + (value - low) / span * 60.0).clamp(5.0, 95.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExtractionMethod, LabStatus, RiskLevel};

    fn row(name: &str, value: &str, range: &str, status: LabStatus) -> ReportResult {
        ReportResult {
            name: name.into(),
            value: value.into(),
            range: range.into(),
            status,
        }
    }

    fn report(results: Vec<ReportResult>, date: &str) -> LabReport {
        LabReport {
            info: PatientInfo {
                date: date.into(),
                ..PatientInfo::default()
            },
            results,
            method: ExtractionMethod::Spatial,
            page_count: 1,
        }
    }

    #[test]
    fn visual_position_maps_range_to_middle() {
        let r = row("HAEMOGLOBIN", "15.0", "13.0 - 17.0 g/dL", LabStatus::Normal);
        assert!((visual_position(&r) - 50.0).abs() < 1e-9);

        let low_edge = row("HAEMOGLOBIN", "13.0", "13.0 - 17.0 g/dL", LabStatus::Normal);
        assert!((visual_position(&low_edge) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn visual_position_clamped() {
        let r = row("TSH", "40.0", "0.4 - 4.5 uIU/mL", LabStatus::CritHigh);
        assert_eq!(visual_position(&r), 95.0);
        let r = row("TSH", "0.0", "10.0 - 20.0 ", LabStatus::CritLow);
        assert_eq!(visual_position(&r), 5.0);
    }

    #[test]
    fn visual_position_centered_without_range() {
        let r = row("ESR", "12.0", "0.0 - 0.0 ", LabStatus::Normal);
        assert_eq!(visual_position(&r), 50.0);
    }

    #[test]
    fn narrative_all_stable() {
        let lines = narrative(&[row("TSH", "2.0", "0.4 - 4.5 ", LabStatus::Normal)]);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("All systems look stable."));
        assert_eq!(narrative(&[]).len(), 1);
    }

    #[test]
    fn narrative_critical_then_mild() {
        let lines = narrative(&[
            row("HDL", "38.0", "40.0 - 60.0 ", LabStatus::Low),
            row("TSH", "9.0", "0.4 - 4.5 ", LabStatus::CritHigh),
        ]);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("TSH"));
        assert!(lines[1].contains("(HDL)"));
    }

    #[test]
    fn report_date_defaults_to_today() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let summary = PatientSummary::build_on(&report(vec![], "Unknown"), today);
        assert_eq!(summary.report_date, "09-03-2024");
        assert_eq!(summary.snapshot.risk, RiskLevel::Low);

        let summary = PatientSummary::build_on(&report(vec![], "14/02/2024"), today);
        assert_eq!(summary.report_date, "14/02/2024");
    }

    #[test]
    fn next_steps_follow_critical_count() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let summary = PatientSummary::build_on(
            &report(vec![row("TSH", "9.0", "0.4 - 4.5 ", LabStatus::CritHigh)], "Unknown"),
            today,
        );
        assert!(summary.next_steps.contains("critical"));
        assert_eq!(summary.rows.len(), 1);
    }
}
