use std::collections::BTreeMap;

use crate::models::{PositionedWord, Row};

/// Group words into rows by snapping `top` to the nearest multiple of
/// `tolerance`. Rows come back top to bottom, words left to right.
///
/// Purely geometric: sub-point baseline jitter inside one printed line
/// lands in the same bin.
pub fn group_rows(words: &[PositionedWord], tolerance: f64) -> Vec<Row> {
    let tolerance = if tolerance > 0.0 { tolerance } else { 1.0 };

    let mut bins: BTreeMap<i64, Vec<PositionedWord>> = BTreeMap::new();
    for word in words {
        let bin = (word.top / tolerance).round() as i64;
        bins.entry(bin).or_default().push(word.clone());
    }

    bins.into_iter()
        .map(|(bin, mut words)| {
            words.sort_by(|a, b| a.x0.total_cmp(&b.x0));
            Row {
                top: bin as f64 * tolerance,
                words,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(text: &str, top: f64, x0: f64) -> PositionedWord {
        PositionedWord::new(text, top, x0, x0 + 10.0 * text.len() as f64)
    }

    #[test]
    fn jitter_within_tolerance_shares_row() {
        let words = vec![w("Sodium", 100.2, 40.0), w("140", 99.4, 300.0), w("mmol/L", 99.9, 380.0)];
        let rows = group_rows(&words, 3.0);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text(), "Sodium 140 mmol/L");
        assert_eq!(rows[0].top, 99.0);
    }

    #[test]
    fn rows_sorted_top_to_bottom() {
        let words = vec![w("Second", 130.0, 40.0), w("First", 100.0, 40.0), w("Third", 160.0, 40.0)];
        let rows = group_rows(&words, 3.0);
        let texts: Vec<String> = rows.iter().map(|r| r.text()).collect();
        assert_eq!(texts, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn words_sorted_left_to_right() {
        let words = vec![w("13.5", 100.0, 300.0), w("Haemoglobin", 100.0, 40.0), w("g/dL", 100.0, 380.0)];
        let rows = group_rows(&words, 3.0);
        assert_eq!(rows[0].text(), "Haemoglobin 13.5 g/dL");
    }

    #[test]
    fn separate_lines_stay_separate() {
        let words = vec![w("TSH", 100.0, 40.0), w("T4", 112.0, 40.0)];
        assert_eq!(group_rows(&words, 3.0).len(), 2);
    }

    #[test]
    fn empty_input() {
        assert!(group_rows(&[], 3.0).is_empty());
    }

    #[test]
    fn non_positive_tolerance_falls_back_to_unit_bins() {
        let words = vec![w("A", 10.2, 0.0), w("B", 10.4, 20.0), w("C", 12.0, 0.0)];
        assert_eq!(group_rows(&words, 0.0).len(), 2);
    }
}
