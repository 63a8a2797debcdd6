//! Locate the result-value column on a page.
//!
//! Lab reports carry no table structure, only positioned words. Two
//! strategies find the x-span holding results:
//! 1. Header: a line containing a known column title ("Observed Value",
//!    "Result", ...) pins the column to that title's span.
//! 2. Density: without a header, numeric tokens are histogrammed by their
//!    midpoint and the busiest bin is taken as the column center.
//!
//! The zone is per page; layouts can differ between pages of one report.

use std::collections::BTreeMap;

use tracing::debug;

use super::number::{is_layout_year, is_numeric_token, parse_number};
use super::rows::group_rows;
use crate::models::{ColumnZone, PositionedWord};
use crate::pipeline_config::LayoutConfig;

/// Column titles in priority order, most specific first.
pub const HEADER_PHRASES: &[&str] = &["observed value", "test result", "result", "value"];

/// Title that gets extra room on the right for wide numeric fields.
const WIDE_HEADER: &str = "observed value";

/// Header lines are grouped on whole-point vertical bins.
const HEADER_LINE_TOLERANCE: f64 = 1.0;

/// How a page's zone was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneSource {
    Header,
    Density,
    Default,
}

/// Zone of the result column for one page's words.
pub fn locate_result_column(words: &[PositionedWord], config: &LayoutConfig) -> ColumnZone {
    locate_with_source(words, config).0
}

/// Same as [`locate_result_column`], also reporting which strategy won.
pub fn locate_with_source(words: &[PositionedWord], config: &LayoutConfig) -> (ColumnZone, ZoneSource) {
    if let Some(zone) = header_zone(words, config) {
        debug!(x_min = zone.x_min, x_max = zone.x_max, "Result column from header");
        return (zone, ZoneSource::Header);
    }
    if let Some(zone) = density_zone(words, config) {
        debug!(x_min = zone.x_min, x_max = zone.x_max, "Result column from numeric density");
        return (zone, ZoneSource::Density);
    }
    let (x_min, x_max) = config.default_zone;
    debug!(x_min, x_max, "No header or numeric tokens, using default result column");
    (ColumnZone::new(x_min, x_max), ZoneSource::Default)
}

/// Zone around the first header title found scanning lines top to bottom.
pub fn header_zone(words: &[PositionedWord], config: &LayoutConfig) -> Option<ColumnZone> {
    for line in group_rows(words, HEADER_LINE_TOLERANCE) {
        let text = line.text().to_lowercase();
        for phrase in HEADER_PHRASES {
            if !text.contains(phrase) {
                continue;
            }
            // Substring hit inside a longer word ("Values") has no span.
            let Some((x0, x1)) = phrase_span(&line.words, phrase) else {
                continue;
            };
            let mut zone = ColumnZone::new(x0 - config.header_buffer, x1 + config.header_buffer);
            if *phrase == WIDE_HEADER {
                zone.x_max += config.observed_value_extra;
            }
            return Some(zone);
        }
    }
    None
}

/// Horizontal extent of the consecutive words spelling `phrase`.
fn phrase_span(words: &[PositionedWord], phrase: &str) -> Option<(f64, f64)> {
    let token_count = phrase.split_whitespace().count();

    for start in 0..words.len() {
        let mut joined = String::new();
        for (offset, word) in words[start..].iter().take(token_count).enumerate() {
            let token = header_token(&word.text);
            if token.is_empty() {
                break;
            }
            if offset > 0 {
                joined.push(' ');
            }
            joined.push_str(&token);

            if joined == phrase {
                let span = &words[start..=start + offset];
                let x0 = span.iter().map(|w| w.x0).fold(f64::INFINITY, f64::min);
                let x1 = span.iter().map(|w| w.x1).fold(f64::NEG_INFINITY, f64::max);
                return Some((x0, x1));
            }
            if !phrase.starts_with(joined.as_str()) {
                break;
            }
        }
    }
    None
}

/// Lowercase word text without surrounding punctuation ("Value:" → "value").
fn header_token(text: &str) -> String {
    text.trim_matches(|c: char| !c.is_alphanumeric() && !c.is_whitespace())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Zone around the most populated midpoint bin of numeric tokens.
///
/// Tokens left of `density_min_x` (row numbers) and calendar years are
/// ignored. Ties go to the leftmost bin.
pub fn density_zone(words: &[PositionedWord], config: &LayoutConfig) -> Option<ColumnZone> {
    let width = if config.density_bin_width > 0.0 {
        config.density_bin_width
    } else {
        LayoutConfig::default().density_bin_width
    };

    let mut bins: BTreeMap<i64, usize> = BTreeMap::new();
    for word in words {
        if !is_numeric_token(&word.text) {
            continue;
        }
        let Some(value) = parse_number(&word.text) else {
            continue;
        };
        let mid = word.mid_x();
        if is_layout_year(value) || mid <= config.density_min_x {
            continue;
        }
        *bins.entry((mid / width).floor() as i64).or_default() += 1;
    }

    let mut best: Option<(i64, usize)> = None;
    for (&bin, &count) in &bins {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((bin, count));
        }
    }

    let (bin, count) = best?;
    let center = bin as f64 * width + width / 2.0;
    debug!(center, count, bins = bins.len(), "Densest numeric column");
    Some(ColumnZone::new(
        center - config.density_margin_left,
        center + config.density_margin_right,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(text: &str, top: f64, x0: f64, x1: f64) -> PositionedWord {
        PositionedWord::new(text, top, x0, x1)
    }

    fn config() -> LayoutConfig {
        LayoutConfig::default()
    }

    /// Rows of "<name> <value> <unit> <low>-<high>" with values at x≈300.
    fn table_body(start_top: f64) -> Vec<PositionedWord> {
        let mut words = Vec::new();
        for (i, (name, value)) in [("Sodium", "140"), ("Potassium", "4.2"), ("Chloride", "101")]
            .iter()
            .enumerate()
        {
            let top = start_top + 15.0 * i as f64;
            words.push(w(name, top, 40.0, 100.0));
            words.push(w(value, top, 300.0, 320.0));
            words.push(w("mmol/L", top, 380.0, 420.0));
        }
        words
    }

    // --- header tier ---

    #[test]
    fn observed_value_header_gets_extra_right_room() {
        let words = vec![
            w("Test", 80.0, 40.0, 65.0),
            w("Name", 80.0, 68.0, 95.0),
            w("Observed", 80.0, 290.0, 335.0),
            w("Value", 80.0, 338.0, 365.0),
            w("Unit", 80.0, 400.0, 420.0),
        ];
        let zone = header_zone(&words, &config()).unwrap();
        assert_eq!(zone, ColumnZone::new(270.0, 415.0));
    }

    #[test]
    fn result_header_plain_buffer() {
        let words = vec![
            w("Investigation", 80.0, 40.0, 110.0),
            w("Result", 80.0, 300.0, 330.0),
            w("Units", 80.0, 400.0, 425.0),
        ];
        let zone = header_zone(&words, &config()).unwrap();
        assert_eq!(zone, ColumnZone::new(280.0, 350.0));
    }

    #[test]
    fn test_result_phrase_uses_both_words() {
        let words = vec![
            w("Parameter", 80.0, 40.0, 95.0),
            w("Test", 80.0, 280.0, 300.0),
            w("Result", 80.0, 303.0, 335.0),
        ];
        let zone = header_zone(&words, &config()).unwrap();
        assert_eq!(zone, ColumnZone::new(260.0, 355.0));
    }

    #[test]
    fn test_name_column_does_not_widen_result() {
        // "Test" of "Test Name" must not be taken as part of "Result".
        let words = vec![
            w("Test", 80.0, 40.0, 65.0),
            w("Name", 80.0, 68.0, 95.0),
            w("Result", 80.0, 300.0, 330.0),
        ];
        let zone = header_zone(&words, &config()).unwrap();
        assert_eq!(zone.x_min, 280.0);
    }

    #[test]
    fn observed_value_preferred_over_value() {
        let words = vec![
            w("Observed", 80.0, 290.0, 335.0),
            w("Value", 80.0, 338.0, 365.0),
            w("Ref.", 80.0, 450.0, 470.0),
            w("Value", 80.0, 473.0, 500.0),
        ];
        let zone = header_zone(&words, &config()).unwrap();
        assert_eq!(zone.x_min, 270.0);
    }

    #[test]
    fn first_header_line_wins() {
        let mut words = vec![w("Result", 80.0, 300.0, 330.0)];
        words.push(w("Value", 400.0, 500.0, 530.0));
        let zone = header_zone(&words, &config()).unwrap();
        assert_eq!(zone.x_min, 280.0);
    }

    #[test]
    fn punctuation_around_header_ignored() {
        let words = vec![w("Result:", 80.0, 300.0, 335.0)];
        assert!(header_zone(&words, &config()).is_some());
    }

    #[test]
    fn substring_inside_longer_word_is_not_header() {
        let words = vec![w("Reference", 80.0, 400.0, 450.0), w("Values", 80.0, 453.0, 490.0)];
        assert!(header_zone(&words, &config()).is_none());
    }

    #[test]
    fn single_word_phrase_from_reader() {
        let words = vec![w("Observed Value", 80.0, 290.0, 365.0)];
        let zone = header_zone(&words, &config()).unwrap();
        assert_eq!(zone, ColumnZone::new(270.0, 415.0));
    }

    // --- density tier ---

    #[test]
    fn density_finds_value_column() {
        let zone = density_zone(&table_body(100.0), &config()).unwrap();
        // Midpoint 310 → bin 6 → center 325.
        assert_eq!(zone, ColumnZone::new(285.0, 385.0));
    }

    #[test]
    fn density_ignores_years_and_margin_indices() {
        let mut words = table_body(100.0);
        for i in 0..5 {
            let top = 200.0 + 15.0 * i as f64;
            words.push(w(&(i + 1).to_string(), top, 10.0, 20.0)); // row index
            words.push(w("2024", top, 500.0, 530.0)); // year column
        }
        let zone = density_zone(&words, &config()).unwrap();
        assert_eq!(zone.x_min, 285.0);
    }

    #[test]
    fn density_tie_goes_left() {
        let words = vec![
            w("1.0", 100.0, 300.0, 320.0),
            w("2.0", 100.0, 500.0, 520.0),
        ];
        let zone = density_zone(&words, &config()).unwrap();
        assert_eq!(zone.x_min, 285.0);
    }

    #[test]
    fn density_none_without_numbers() {
        let words = vec![w("Remarks", 100.0, 40.0, 90.0), w("g/dL", 100.0, 300.0, 330.0)];
        assert!(density_zone(&words, &config()).is_none());
    }

    // --- strategy selection ---

    #[test]
    fn header_preferred_over_denser_cluster() {
        let mut words = vec![
            w("Test", 80.0, 40.0, 65.0),
            w("Name", 80.0, 68.0, 95.0),
            w("Observed", 80.0, 290.0, 335.0),
            w("Value", 80.0, 338.0, 365.0),
        ];
        // Ten numeric tokens stacked at x≈510, far more than the value column.
        for i in 0..10 {
            words.push(w("12.5", 100.0 + 12.0 * i as f64, 500.0, 520.0));
        }
        let (zone, source) = locate_with_source(&words, &config());
        assert_eq!(source, ZoneSource::Header);
        assert_eq!(zone, ColumnZone::new(270.0, 415.0));
    }

    #[test]
    fn falls_back_to_density_then_default() {
        let (_, source) = locate_with_source(&table_body(100.0), &config());
        assert_eq!(source, ZoneSource::Density);

        let (zone, source) = locate_with_source(&[w("Remarks", 100.0, 40.0, 90.0)], &config());
        assert_eq!(source, ZoneSource::Default);
        assert_eq!(zone, ColumnZone::new(250.0, 400.0));
    }
}
