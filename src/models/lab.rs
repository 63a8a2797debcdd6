use serde::{Deserialize, Serialize};

use super::enums::LabStatus;

/// A value found for one test on one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedResult {
    pub test_key: String,
    pub numeric_value: f64,
}

/// Final, render-ready result for one test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResult {
    pub name: String,
    pub value: String,
    /// `"<low> - <high> <unit>"`.
    pub range: String,
    pub status: LabStatus,
}

/// Format a number the way reports print it: shortest round-trip form,
/// with a trailing `.0` for integral values (`13.0`, `0.0`, `13.5`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
