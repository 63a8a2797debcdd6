use serde::{Deserialize, Serialize};

use super::ExtractionError;
use crate::models::{ExtractionMethod, PageLayout, PatientInfo, ReportResult};

/// Everything extracted from one report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabReport {
    pub info: PatientInfo,
    /// Classified results, ordered by test name.
    pub results: Vec<ReportResult>,
    pub method: ExtractionMethod,
    pub page_count: usize,
}

impl LabReport {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Source of positioned words and page text (allows mocking for tests).
///
/// Implementations return pages in document order. A page stream that
/// cannot be read fails the whole document.
pub trait LayoutReader {
    fn read_pages(&self, bytes: &[u8]) -> Result<Vec<PageLayout>, ExtractionError>;
}
