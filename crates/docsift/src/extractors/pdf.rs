//! PDF extractor: embedded text layer first, OCR fallback second.
//!
//! The fallback controller has exactly two attempts, strictly ordered:
//! the text layer is tried first, and OCR runs only when the text-layer
//! result is empty or whitespace-only after trimming. OCR is terminal:
//! if it also yields nothing, the result is empty text. A text-layer
//! *parse* failure degrades to empty text and therefore also triggers the
//! fallback; scanned PDFs with no text layer at all take the same route.
//!
//! The fallback is deliberately PDF-only. No other format re-tries through
//! OCR when its native parser comes up empty.

use super::DocumentExtractor;
use crate::core::config::ExtractionConfig;
use crate::ocr::OcrBackend;
use crate::{DocsiftError, Result};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// PDF extraction strategy with OCR fallback.
pub struct PdfExtractor {
    ocr: Arc<dyn OcrBackend>,
}

impl PdfExtractor {
    pub fn new(ocr: Arc<dyn OcrBackend>) -> Self {
        Self { ocr }
    }
}

/// The fallback trigger: nothing usable came out of the text layer.
pub(crate) fn should_fallback_to_ocr(native_text: &str) -> bool {
    native_text.trim().is_empty()
}

/// Walk the document's pages and collect the embedded text of each,
/// joined with newlines and trimmed.
///
/// Pages whose content streams cannot be decoded are skipped; a document
/// that cannot be opened at all is a `Parsing` error (except for real I/O
/// faults, which stay `Io`).
fn read_text_layer(path: &Path) -> Result<String> {
    let document = lopdf::Document::load(path).map_err(|e| match e {
        lopdf::Error::IO(io_err) => DocsiftError::Io(io_err),
        other => DocsiftError::parsing_with_source(format!("failed to open PDF {}", path.display()), other),
    })?;

    let mut pages_text = Vec::new();
    for page_number in document.get_pages().keys() {
        match document.extract_text(&[*page_number]) {
            Ok(page_text) => {
                let page_text = page_text.trim();
                if !page_text.is_empty() {
                    pages_text.push(page_text.to_string());
                }
            }
            Err(e) => {
                tracing::debug!(page = page_number, error = %e, "skipping undecodable PDF page");
            }
        }
    }

    Ok(pages_text.join("\n"))
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    fn name(&self) -> &str {
        "pdf"
    }

    async fn extract_path(&self, path: &Path, config: &ExtractionConfig) -> Result<String> {
        let path_buf = path.to_path_buf();
        let native = tokio::task::spawn_blocking(move || read_text_layer(&path_buf))
            .await
            .map_err(|e| DocsiftError::parsing(format!("PDF text-layer task failed: {e}")))?;

        let native = match native {
            Ok(text) => text,
            Err(e @ DocsiftError::Io(_)) => return Err(e),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "PDF text-layer extraction failed");
                String::new()
            }
        };

        if !should_fallback_to_ocr(&native) {
            return Ok(native);
        }

        tracing::debug!(
            path = %path.display(),
            backend = self.ocr.name(),
            "PDF text layer empty, falling back to OCR"
        );
        let recognized = self.ocr.recognize_pdf(path, &config.ocr).await?;
        Ok(recognized.trim().to_string())
    }
}
