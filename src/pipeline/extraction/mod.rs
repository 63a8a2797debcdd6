pub mod types;
pub mod number;
pub mod rows;
pub mod column_locate;
pub mod engine;
pub mod text_fallback;
pub mod info;
pub mod page_dump;
#[cfg(feature = "pdfium")]
pub mod pdfium;
pub mod orchestrator;

pub use types::*;
pub use column_locate::{locate_result_column, ZoneSource};
pub use engine::{extract_page, extract_pages, PageResults, ResultAccumulator};
pub use info::extract_info;
pub use number::parse_number;
pub use orchestrator::*;
pub use page_dump::PageDumpReader;
pub use rows::group_rows;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("PDF is password-protected")]
    PdfEncrypted,

    #[error("Page dump is not valid JSON: {0}")]
    PageDump(#[from] serde_json::Error),

    #[error("PDFium unavailable: {0}")]
    PdfiumLoad(String),

    #[error("Page {page} unreadable: {reason}")]
    UnreadablePage { page: usize, reason: String },

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),
}
