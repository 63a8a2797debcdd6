use serde::{Deserialize, Serialize};

/// A run of glyphs on a page with its geometry, as produced by the
/// word-geometry reader. `top` grows downwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedWord {
    pub text: String,
    pub top: f64,
    pub x0: f64,
    pub x1: f64,
}

impl PositionedWord {
    pub fn new(text: impl Into<String>, top: f64, x0: f64, x1: f64) -> Self {
        Self {
            text: text.into(),
            top,
            x0,
            x1,
        }
    }

    pub fn mid_x(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }
}

/// Words sharing one inferred printed line, ordered left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Binned vertical coordinate of the line.
    pub top: f64,
    pub words: Vec<PositionedWord>,
}

impl Row {
    /// Space-joined text of the row.
    pub fn text(&self) -> String {
        join_words(&self.words)
    }
}

/// Horizontal span of the result-value column on one page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnZone {
    pub x_min: f64,
    pub x_max: f64,
}

impl ColumnZone {
    pub fn new(x_min: f64, x_max: f64) -> Self {
        Self { x_min, x_max }
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.x_min && x <= self.x_max
    }
}

/// One page as delivered by a layout reader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// 1-based page number.
    #[serde(default)]
    pub page_number: usize,
    /// Plain text of the page in reading order.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub words: Vec<PositionedWord>,
}

pub(crate) fn join_words<'a>(words: impl IntoIterator<Item = &'a PositionedWord>) -> String {
    words
        .into_iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mid_x_is_center() {
        let w = PositionedWord::new("13.5", 100.0, 300.0, 320.0);
        assert_eq!(w.mid_x(), 310.0);
    }

    #[test]
    fn zone_bounds_inclusive() {
        let zone = ColumnZone::new(280.0, 370.0);
        assert!(zone.contains(280.0));
        assert!(zone.contains(370.0));
        assert!(!zone.contains(370.1));
        assert!(!zone.contains(279.9));
    }

    #[test]
    fn row_text_joins_with_spaces() {
        let row = Row {
            top: 99.0,
            words: vec![
                PositionedWord::new("Serum", 99.0, 40.0, 70.0),
                PositionedWord::new("Sodium", 99.0, 72.0, 110.0),
            ],
        };
        assert_eq!(row.text(), "Serum Sodium");
    }

    #[test]
    fn page_layout_tolerates_missing_fields() {
        let page: PageLayout = serde_json::from_str(r#"{"words": []}"#).unwrap();
        assert_eq!(page.page_number, 0);
        assert!(page.text.is_empty());
    }
}
