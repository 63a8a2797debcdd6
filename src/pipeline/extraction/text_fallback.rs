//! Line-based scan of page text, used when the spatial pass finds nothing.
//!
//! Some reports have no usable word geometry (single text run per line,
//! odd producers). Each text line is matched as a whole and the first
//! plausible number on it is taken. Within this scan the first occurrence
//! of a test wins.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use super::number::find_numbers;
use crate::models::{ExtractedResult, PageLayout};
use crate::reference::{NameMatcher, ReferenceDatabase};

/// Calendar dates in d/m/y or y-m-d shape.
static DATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{2,4}[/-]\d{1,2}[/-]\d{2,4}").unwrap());

/// Values above this are treated as years.
const YEAR_FLOOR: f64 = 2020.0;

/// Scan every page's text, in page order.
pub fn scan_text(pages: &[PageLayout], db: &ReferenceDatabase, matcher: &NameMatcher) -> Vec<ExtractedResult> {
    let mut found: BTreeMap<String, f64> = BTreeMap::new();

    for page in pages {
        for line in page.text.lines() {
            let clean = DATE.replace_all(line, "");
            let Some(key) = matcher.match_label(&clean) else {
                continue;
            };
            if found.contains_key(key) {
                continue;
            }
            let Some(entry) = db.get(key) else {
                continue;
            };

            let value = find_numbers(&clean)
                .into_iter()
                .filter(|v| *v <= YEAR_FLOOR)
                .find(|v| entry.is_plausible(*v));

            if let Some(value) = value {
                trace!(page = page.page_number, key, value, "Text line value");
                found.insert(key.to_string(), value);
            }
        }
    }

    debug!(found = found.len(), "Text fallback scan complete");
    found
        .into_iter()
        .map(|(test_key, numeric_value)| ExtractedResult {
            test_key,
            numeric_value,
        })
        .collect()
}
