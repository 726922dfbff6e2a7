//! Extraction pipeline orchestration.
//!
//! `run` is the core contract: given a stored file and its classified media
//! type, produce a single text result. The pipeline applies the error
//! policy described in [`crate::error`]: content-level failures from an
//! extractor are logged and absorbed into an empty-text result, while I/O
//! faults propagate untouched. Given identical bytes, every non-OCR path is
//! deterministic; OCR paths are best-effort.

use crate::core::config::ExtractionConfig;
use crate::core::{io, sniff};
use crate::extractors::ExtractorSet;
use crate::ocr::{OcrBackend, TesseractOcr};
use crate::types::{ExtractionResult, MediaType};
use crate::Result;
use std::path::Path;
use std::sync::Arc;

/// The document extraction pipeline.
///
/// Holds the read-only strategy table; no state is retained across
/// requests, so one instance serves any number of concurrent extractions.
pub struct Pipeline {
    extractors: ExtractorSet,
    config: ExtractionConfig,
}

impl Pipeline {
    /// Build a pipeline with the tesseract CLI as its OCR engine.
    pub fn new(config: ExtractionConfig) -> Self {
        Self::with_ocr_backend(config, Arc::new(TesseractOcr::new()))
    }

    /// Build a pipeline around a custom OCR backend.
    pub fn with_ocr_backend(config: ExtractionConfig, ocr: Arc<dyn OcrBackend>) -> Self {
        Self {
            extractors: ExtractorSet::new(ocr),
            config,
        }
    }

    /// Extract text from `path` as the given media type.
    ///
    /// `Unknown` short-circuits to empty text without invoking any
    /// extractor. A missing or unreadable file is an `Io` error even for
    /// `Unknown`; environment faults are never represented as output.
    pub async fn run(&self, path: impl AsRef<Path>, media_type: MediaType) -> Result<ExtractionResult> {
        let path = path.as_ref();
        io::validate_file_exists(path).await?;

        let Some(extractor) = self.extractors.for_media_type(&media_type) else {
            tracing::debug!(path = %path.display(), "unknown media type, skipping extraction");
            return Ok(ExtractionResult::empty(media_type));
        };

        tracing::debug!(
            path = %path.display(),
            media_type = %media_type,
            strategy = extractor.name(),
            "extracting"
        );

        match extractor.extract_path(path, &self.config).await {
            Ok(text) => Ok(ExtractionResult { text, media_type }),
            Err(e) if e.is_content_error() => {
                tracing::warn!(
                    path = %path.display(),
                    strategy = extractor.name(),
                    error = %e,
                    "extraction failed, returning empty text"
                );
                Ok(ExtractionResult::empty(media_type))
            }
            Err(e) => Err(e),
        }
    }

    /// Classify `path` from its content signature, then extract.
    pub async fn classify_and_run(&self, path: impl AsRef<Path>) -> Result<ExtractionResult> {
        let path = path.as_ref();
        let media_type = sniff::classify_path(path).await?;
        self.run(path, media_type).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocsiftError;
    use tempfile::tempdir;

    fn pipeline() -> Pipeline {
        Pipeline::new(ExtractionConfig::default())
    }

    #[tokio::test]
    async fn test_plain_text_trim() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "  spaced  \n").unwrap();

        let result = pipeline().run(&path, MediaType::PlainText).await.unwrap();
        assert_eq!(result.text, "spaced");
        assert_eq!(result.media_type, MediaType::PlainText);
        assert!(result.found_text());
    }

    #[tokio::test]
    async fn test_unknown_media_type_returns_empty_without_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, [0x00, 0x01, 0x02, 0xFF]).unwrap();

        let result = pipeline().run(&path, MediaType::Unknown).await.unwrap();
        assert!(result.text.is_empty());
        assert!(!result.found_text());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = pipeline().run(dir.path().join("gone.txt"), MediaType::PlainText).await;
        assert!(matches!(result.unwrap_err(), DocsiftError::Io(_)));
    }

    #[tokio::test]
    async fn test_corrupt_document_degrades_to_empty_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"definitely not a zip container").unwrap();

        let result = pipeline().run(&path, MediaType::Docx).await.unwrap();
        assert!(result.text.is_empty());
    }

    #[tokio::test]
    async fn test_classify_and_run_unrecognized_blob() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mystery");
        std::fs::write(&path, [0x00, 0xDE, 0xAD, 0xBE, 0xEF]).unwrap();

        let result = pipeline().classify_and_run(&path).await.unwrap();
        assert_eq!(result.media_type, MediaType::Unknown);
        assert!(result.text.is_empty());
    }

    #[tokio::test]
    async fn test_idempotent_for_non_ocr_formats() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stable.txt");
        std::fs::write(&path, "same text every time\n").unwrap();

        let p = pipeline();
        let first = p.run(&path, MediaType::PlainText).await.unwrap();
        let second = p.run(&path, MediaType::PlainText).await.unwrap();
        assert_eq!(first, second);
    }
}
