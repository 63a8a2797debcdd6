use tracing::{debug, info, warn};

use super::engine::extract_pages;
use super::info::extract_info;
use super::text_fallback::scan_text;
use super::types::{LabReport, LayoutReader};
use super::ExtractionError;
use crate::models::{ExtractionMethod, PageLayout};
use crate::pipeline::classify::classify_all;
use crate::pipeline_config::LayoutConfig;
use crate::reference::{NameMatcher, ReferenceDatabase};

/// Document-level driver: pages in, classified results out.
///
/// Holds the reference database and its matcher so both are built once
/// and shared by every page and document.
pub struct LabReportExtractor {
    reader: Box<dyn LayoutReader + Send + Sync>,
    db: ReferenceDatabase,
    matcher: NameMatcher,
    config: LayoutConfig,
}

impl LabReportExtractor {
    pub fn new(reader: Box<dyn LayoutReader + Send + Sync>, db: ReferenceDatabase, config: LayoutConfig) -> Self {
        let matcher = NameMatcher::new(&db);
        Self {
            reader,
            db,
            matcher,
            config,
        }
    }

    /// Read a document with the configured reader and extract it.
    pub fn extract(&self, bytes: &[u8]) -> Result<LabReport, ExtractionError> {
        let pages = self.reader.read_pages(bytes)?;
        Ok(self.extract_pages(&pages))
    }

    /// Extract from pages already read. Never fails: heuristic misses
    /// leave tests out and an empty result list is a valid outcome.
    pub fn extract_pages(&self, pages: &[PageLayout]) -> LabReport {
        info!(pages = pages.len(), tests = self.db.len(), "Starting lab report extraction");

        let full_text = pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let info = extract_info(&full_text);

        let mut method = ExtractionMethod::Spatial;
        let mut raw = extract_pages(pages, &self.db, &self.matcher, &self.config).into_results();

        if raw.is_empty() && self.config.text_fallback {
            debug!("Spatial pass found no tests, scanning page text");
            raw = scan_text(pages, &self.db, &self.matcher);
            method = ExtractionMethod::TextFallback;
        }

        let results = classify_all(&raw, &self.db);
        if results.is_empty() {
            warn!(pages = pages.len(), "No tests recognized in report");
        }

        info!(
            results = results.len(),
            abnormal = results.iter().filter(|r| !r.status.is_normal()).count(),
            method = method.as_str(),
            "Lab report extraction complete"
        );

        LabReport {
            info,
            results,
            method,
            page_count: pages.len(),
        }
    }
}
