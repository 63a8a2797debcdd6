//! PDF word geometry via Google PDFium.
//!
//! `PdfiumLayoutReader` is stateless (`Send + Sync`). Each read binds a
//! fresh `Pdfium` instance because the upstream type is `!Send`; the OS
//! caches the library load.

use pdfium_render::prelude::*;
use tracing::{debug, warn};

use super::types::LayoutReader;
use super::ExtractionError;
use crate::models::{PageLayout, PositionedWord};

/// Characters further apart than this many points start a new word.
const WORD_GAP: f64 = 1.5;

/// Reads positioned words from a text-layer PDF.
pub struct PdfiumLayoutReader;

impl PdfiumLayoutReader {
    /// Create a reader, verifying the PDFium library is loadable.
    ///
    /// Discovery order:
    /// 1. `PDFIUM_DYNAMIC_LIB_PATH` env var (explicit path to library file)
    /// 2. Alongside the running executable
    /// 3. System library search paths
    pub fn new() -> Result<Self, ExtractionError> {
        let _ = load_pdfium()?;
        Ok(Self)
    }
}

fn load_pdfium() -> Result<Pdfium, ExtractionError> {
    if let Ok(path) = std::env::var("PDFIUM_DYNAMIC_LIB_PATH") {
        debug!(path = %path, "Loading PDFium from env var");
        let bindings = Pdfium::bind_to_library(&path)
            .map_err(|e| ExtractionError::PdfiumLoad(format!("{path}: {e}")))?;
        return Ok(Pdfium::new(bindings));
    }

    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|exe| exe.parent().map(|p| p.to_path_buf())) {
        let lib_path = Pdfium::pdfium_platform_library_name_at_path(exe_dir.to_string_lossy().as_ref());
        if let Ok(bindings) = Pdfium::bind_to_library(&lib_path) {
            debug!(dir = %exe_dir.display(), "Loaded PDFium next to executable");
            return Ok(Pdfium::new(bindings));
        }
    }

    let bindings = Pdfium::bind_to_system_library().map_err(|e| {
        ExtractionError::PdfiumLoad(format!(
            "library not found. Set PDFIUM_DYNAMIC_LIB_PATH or install PDFium: {e}"
        ))
    })?;
    Ok(Pdfium::new(bindings))
}

/// Encrypted documents get their own error.
fn map_load_error(e: PdfiumError) -> ExtractionError {
    let msg = e.to_string();
    let lower = msg.to_lowercase();
    if lower.contains("password") || lower.contains("encrypt") {
        ExtractionError::PdfEncrypted
    } else {
        ExtractionError::PdfParsing(msg)
    }
}

impl LayoutReader for PdfiumLayoutReader {
    fn read_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageLayout>, ExtractionError> {
        let pdfium = load_pdfium()?;
        let document = pdfium
            .load_pdf_from_byte_slice(pdf_bytes, None)
            .map_err(map_load_error)?;

        let mut pages = Vec::new();
        for (index, page) in document.pages().iter().enumerate() {
            let page_number = index + 1;
            let text = page.text().map_err(|e| ExtractionError::UnreadablePage {
                page: page_number,
                reason: e.to_string(),
            })?;

            let height = f64::from(page.height().value);
            let mut builder = WordBuilder::default();
            for ch in text.chars().iter() {
                let Some(c) = ch.unicode_char() else {
                    builder.finish();
                    continue;
                };
                match ch.loose_bounds() {
                    Ok(rect) => builder.push(
                        c,
                        height - f64::from(rect.top().value),
                        f64::from(rect.left().value),
                        f64::from(rect.right().value),
                    ),
                    Err(_) => builder.finish(),
                }
            }
            let words = builder.into_words();

            if words.is_empty() {
                warn!(page = page_number, "Page has no text layer");
            }
            pages.push(PageLayout {
                page_number,
                text: text.all(),
                words,
            });
        }

        debug!(pages = pages.len(), "PDF pages read");
        Ok(pages)
    }
}

/// Joins characters into words on whitespace, gaps and line changes.
#[derive(Default)]
struct WordBuilder {
    words: Vec<PositionedWord>,
    current: Option<PositionedWord>,
}

impl WordBuilder {
    fn push(&mut self, c: char, top: f64, x0: f64, x1: f64) {
        if c.is_whitespace() || c.is_control() {
            self.finish();
            return;
        }
        if let Some(word) = self.current.as_mut() {
            let same_line = (word.top - top).abs() < WORD_GAP;
            let adjacent = x0 - word.x1 < WORD_GAP && x0 >= word.x0;
            if same_line && adjacent {
                word.text.push(c);
                word.x1 = word.x1.max(x1);
                word.top = word.top.min(top);
                return;
            }
            self.finish();
        }
        self.current = Some(PositionedWord::new(c.to_string(), top, x0, x1));
    }

    fn finish(&mut self) {
        if let Some(word) = self.current.take() {
            self.words.push(word);
        }
    }

    fn into_words(mut self) -> Vec<PositionedWord> {
        self.finish();
        self.words
    }
}
