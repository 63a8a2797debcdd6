//! JSON page dumps: word geometry produced by an external PDF reader.
//!
//! ```json
//! {"pages": [{"text": "...", "words": [{"text": "TSH", "top": 210.4, "x0": 42.0, "x1": 61.5}]}]}
//! ```
//!
//! `page_number` is optional and defaults to the 1-based position. A page
//! with words but no text gets its text rebuilt line by line from the words.

use serde::Deserialize;
use tracing::debug;

use super::rows::group_rows;
use super::types::LayoutReader;
use super::ExtractionError;
use crate::models::PageLayout;
use crate::pipeline_config::LayoutConfig;

#[derive(Debug, Deserialize)]
struct PageDump {
    pages: Vec<PageLayout>,
}

/// Reads `{"pages": [...]}` documents.
#[derive(Debug, Clone)]
pub struct PageDumpReader {
    row_tolerance: f64,
}

impl PageDumpReader {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            row_tolerance: config.row_tolerance,
        }
    }
}

impl Default for PageDumpReader {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl LayoutReader for PageDumpReader {
    fn read_pages(&self, bytes: &[u8]) -> Result<Vec<PageLayout>, ExtractionError> {
        let dump: PageDump = serde_json::from_slice(bytes)?;

        let mut pages = dump.pages;
        for (i, page) in pages.iter_mut().enumerate() {
            if page.page_number == 0 {
                page.page_number = i + 1;
            }
            if page.text.trim().is_empty() && !page.words.is_empty() {
                page.text = group_rows(&page.words, self.row_tolerance)
                    .iter()
                    .map(|row| row.text())
                    .collect::<Vec<_>>()
                    .join("\n");
            }
        }

        debug!(pages = pages.len(), "Page dump loaded");
        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(json: &str) -> Result<Vec<PageLayout>, ExtractionError> {
        PageDumpReader::default().read_pages(json.as_bytes())
    }

    #[test]
    fn reads_words_and_numbers_pages() {
        let pages = read(
            r#"{"pages": [
                {"text": "TSH 2.5", "words": [{"text": "TSH", "top": 100, "x0": 40, "x1": 60}]},
                {"page_number": 7, "text": "", "words": []}
            ]}"#,
        )
        .unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[0].words[0].text, "TSH");
        assert_eq!(pages[0].words[0].x1, 60.0);
        assert_eq!(pages[1].page_number, 7);
    }

    #[test]
    fn text_rebuilt_from_words() {
        let pages = read(
            r#"{"pages": [{"words": [
                {"text": "2.5", "top": 100.4, "x0": 300, "x1": 315},
                {"text": "TSH", "top": 100.0, "x0": 40, "x1": 60},
                {"text": "Name:", "top": 60.0, "x0": 40, "x1": 70}
            ]}]}"#,
        )
        .unwrap();
        assert_eq!(pages[0].text, "Name:\nTSH 2.5");
    }

    #[test]
    fn invalid_json_is_error() {
        assert!(matches!(read("{not json"), Err(ExtractionError::PageDump(_))));
        assert!(matches!(read(r#"{"document": []}"#), Err(ExtractionError::PageDump(_))));
    }

    #[test]
    fn empty_document() {
        assert!(read(r#"{"pages": []}"#).unwrap().is_empty());
    }
}
