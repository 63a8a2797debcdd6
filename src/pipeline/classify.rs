//! Abnormality status and final result assembly.

use crate::models::{format_number, ExtractedResult, LabStatus, ReportResult};
use crate::reference::{ReferenceDatabase, ReferenceEntry};

/// Below `low * CRITICAL_LOW_FACTOR` is critical.
pub const CRITICAL_LOW_FACTOR: f64 = 0.7;
/// Above `high * CRITICAL_HIGH_FACTOR` is critical.
pub const CRITICAL_HIGH_FACTOR: f64 = 1.3;

/// Status of a value against an entry's clinical range.
///
/// Without a clinical range every value is Normal. The critical bands are
/// strict: exactly `0.7 × low` is Low, exactly `1.3 × high` is High.
pub fn status_for(value: f64, entry: &ReferenceEntry) -> LabStatus {
    if !entry.has_clinical_range() {
        return LabStatus::Normal;
    }
    if value < entry.low {
        if value < entry.low * CRITICAL_LOW_FACTOR {
            LabStatus::CritLow
        } else {
            LabStatus::Low
        }
    } else if value > entry.high {
        if value > entry.high * CRITICAL_HIGH_FACTOR {
            LabStatus::CritHigh
        } else {
            LabStatus::High
        }
    } else {
        LabStatus::Normal
    }
}

/// `"<low> - <high> <unit>"`; the trailing space stays when unit is empty.
pub fn range_label(entry: &ReferenceEntry) -> String {
    format!(
        "{} - {} {}",
        format_number(entry.low),
        format_number(entry.high),
        entry.unit
    )
}

pub fn classify(key: &str, value: f64, entry: &ReferenceEntry) -> ReportResult {
    ReportResult {
        name: key.to_string(),
        value: format_number(value),
        range: range_label(entry),
        status: status_for(value, entry),
    }
}

/// Classify merged results, ordered by test name. Keys missing from the
/// database are dropped.
pub fn classify_all(results: &[ExtractedResult], db: &ReferenceDatabase) -> Vec<ReportResult> {
    let mut out: Vec<ReportResult> = results
        .iter()
        .filter_map(|r| {
            let entry = db.get(&r.test_key)?;
            Some(classify(&r.test_key, r.numeric_value, entry))
        })
        .collect();
    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}
