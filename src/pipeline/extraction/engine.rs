//! Spatial extraction: pair each recognized test row with its result value.
//!
//! Per page: locate the result column, group words into rows, take the
//! text left of the column as the test label, then pick the value among
//! the row's numbers. Pages are independent; their results are merged in
//! page order with later values replacing earlier ones for the same test.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use super::column_locate::{locate_with_source, ZoneSource};
use super::number::{is_numeric_token, is_report_year, parse_number};
use super::rows::group_rows;
use crate::models::layout::join_words;
use crate::models::{ColumnZone, ExtractedResult, PageLayout, Row};
use crate::pipeline_config::LayoutConfig;
use crate::reference::{NameMatcher, ReferenceDatabase, ReferenceEntry};

/// A number found on a row already matched to a test.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub value: f64,
    pub in_zone: bool,
    /// Horizontal midpoint of the token.
    pub x_position: f64,
    pub raw_text: String,
}

/// Results of one page, in row order (top to bottom).
#[derive(Debug, Clone)]
pub struct PageResults {
    pub page_number: usize,
    pub zone: ColumnZone,
    pub zone_source: ZoneSource,
    pub results: Vec<ExtractedResult>,
}

/// Document-level test → value mapping with last-write-wins merging.
///
/// Pages must be merged in page order; within a page, rows are applied top
/// to bottom. A later value for a key replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct ResultAccumulator {
    values: BTreeMap<String, f64>,
}

impl ResultAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &ExtractedResult) {
        if let Some(previous) = self.values.insert(result.test_key.clone(), result.numeric_value) {
            debug!(
                key = %result.test_key,
                previous,
                value = result.numeric_value,
                "Later occurrence replaces earlier value"
            );
        }
    }

    pub fn merge_page(&mut self, page: &PageResults) {
        for result in &page.results {
            self.record(result);
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merged results ordered by test key.
    pub fn into_results(self) -> Vec<ExtractedResult> {
        self.values
            .into_iter()
            .map(|(test_key, numeric_value)| ExtractedResult {
                test_key,
                numeric_value,
            })
            .collect()
    }
}

/// Scan one page's words for test rows.
pub fn extract_page(
    page: &PageLayout,
    db: &ReferenceDatabase,
    matcher: &NameMatcher,
    config: &LayoutConfig,
) -> PageResults {
    let (zone, zone_source) = locate_with_source(&page.words, config);
    let rows = group_rows(&page.words, config.row_tolerance);

    let results: Vec<ExtractedResult> = rows
        .iter()
        .filter_map(|row| extract_row(row, zone, db, matcher, config))
        .collect();

    debug!(
        page = page.page_number,
        rows = rows.len(),
        found = results.len(),
        zone_source = ?zone_source,
        x_min = zone.x_min,
        x_max = zone.x_max,
        "Page scanned"
    );

    PageResults {
        page_number: page.page_number,
        zone,
        zone_source,
        results,
    }
}

/// Scan pages in order and merge their results.
pub fn extract_pages(
    pages: &[PageLayout],
    db: &ReferenceDatabase,
    matcher: &NameMatcher,
    config: &LayoutConfig,
) -> ResultAccumulator {
    let mut acc = ResultAccumulator::new();
    for page in pages {
        acc.merge_page(&extract_page(page, db, matcher, config));
    }
    acc
}

fn extract_row(
    row: &Row,
    zone: ColumnZone,
    db: &ReferenceDatabase,
    matcher: &NameMatcher,
    config: &LayoutConfig,
) -> Option<ExtractedResult> {
    let name_edge = zone.x_min + config.name_edge_buffer;
    let label = join_words(row.words.iter().filter(|w| w.x1 < name_edge));

    let key = matcher.match_label(&label)?;
    let entry = db.get(key)?;

    let candidates = collect_candidates(row, zone, name_edge);
    let Some(winner) = select_candidate(&candidates, entry) else {
        trace!(key, label = %label, candidates = candidates.len(), "No valid value on test row");
        return None;
    };

    trace!(
        key,
        value = winner.value,
        raw = %winner.raw_text,
        in_zone = winner.in_zone,
        "Row value selected"
    );
    Some(ExtractedResult {
        test_key: key.to_string(),
        numeric_value: winner.value,
    })
}

/// Numbers on the row, left to right.
///
/// Words inside the label only count when they are bare numbers, so digits
/// in names ("B12", "T3") never become candidates.
pub fn collect_candidates(row: &Row, zone: ColumnZone, name_edge: f64) -> Vec<Candidate> {
    row.words
        .iter()
        .filter(|w| w.x1 >= name_edge || is_numeric_token(&w.text))
        .filter_map(|w| {
            let value = parse_number(&w.text)?;
            let x_position = w.mid_x();
            Some(Candidate {
                value,
                in_zone: zone.contains(x_position),
                x_position,
                raw_text: w.text.clone(),
            })
        })
        .collect()
}

/// Pick the result among a row's candidates.
///
/// Values outside the test's physiological range or looking like a report
/// year are dropped. The leftmost in-zone survivor wins; with none in the
/// zone, the leftmost survivor.
pub fn select_candidate<'a>(candidates: &'a [Candidate], entry: &ReferenceEntry) -> Option<&'a Candidate> {
    let mut valid = candidates
        .iter()
        .filter(|c| entry.is_plausible(c.value) && !is_report_year(c.value));

    let first = valid.next()?;
    if first.in_zone {
        return Some(first);
    }
    valid.find(|c| c.in_zone).or(Some(first))
}
