//! Per-format extraction strategies.
//!
//! Each extractor converts one stored file into plain text. Extractors
//! return *typed* errors: they do not swallow parse failures themselves;
//! the degrade-to-empty policy for content errors lives in the pipeline,
//! so tests can tell "no text found" apart from "parser crashed".
//!
//! The strategy table is [`ExtractorSet::for_media_type`]: an exhaustive
//! match over the closed [`MediaType`] enum, so a new format cannot be
//! added without deciding its strategy here.

pub mod doc;
pub mod docx;
pub mod image;
pub mod pdf;
pub mod rtf;
pub mod text;

pub use doc::LegacyDocExtractor;
pub use docx::DocxExtractor;
pub use image::ImageExtractor;
pub use pdf::PdfExtractor;
pub use rtf::RtfExtractor;
pub use text::PlainTextExtractor;

use crate::core::config::ExtractionConfig;
use crate::ocr::OcrBackend;
use crate::types::MediaType;
use crate::Result;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// A format-specific extraction strategy.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Strategy name, for logs.
    fn name(&self) -> &str;

    /// Extract plain text from the file at `path`.
    ///
    /// The returned text is trimmed; empty means "no text found". Errors are
    /// typed: `Io` for environment faults, `Parsing`/`Ocr`/
    /// `MissingDependency` for content-level failures.
    async fn extract_path(&self, path: &Path, config: &ExtractionConfig) -> Result<String>;
}

/// The full set of extraction strategies, built once and read-only after.
pub struct ExtractorSet {
    pdf: PdfExtractor,
    image: ImageExtractor,
    legacy_doc: LegacyDocExtractor,
    docx: DocxExtractor,
    plain_text: PlainTextExtractor,
    rich_text: RtfExtractor,
}

impl ExtractorSet {
    /// Build the strategy table around one OCR backend.
    ///
    /// The backend is shared by the image extractor and the PDF fallback.
    pub fn new(ocr: Arc<dyn OcrBackend>) -> Self {
        Self {
            pdf: PdfExtractor::new(Arc::clone(&ocr)),
            image: ImageExtractor::new(ocr),
            legacy_doc: LegacyDocExtractor::new(),
            docx: DocxExtractor::new(),
            plain_text: PlainTextExtractor::new(),
            rich_text: RtfExtractor::new(),
        }
    }

    /// Total mapping from media type to strategy.
    ///
    /// `Unknown` has no extractor; the pipeline short-circuits it to empty
    /// text without touching the file again.
    pub fn for_media_type(&self, media_type: &MediaType) -> Option<&dyn DocumentExtractor> {
        match media_type {
            MediaType::Pdf => Some(&self.pdf),
            MediaType::Image(_) => Some(&self.image),
            MediaType::LegacyDoc => Some(&self.legacy_doc),
            MediaType::Docx => Some(&self.docx),
            MediaType::PlainText => Some(&self.plain_text),
            MediaType::RichText => Some(&self.rich_text),
            MediaType::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::TesseractOcr;

    #[test]
    fn test_every_known_media_type_has_a_strategy() {
        let set = ExtractorSet::new(Arc::new(TesseractOcr::new()));

        let known = [
            MediaType::Pdf,
            MediaType::Image("image/png".to_string()),
            MediaType::LegacyDoc,
            MediaType::Docx,
            MediaType::PlainText,
            MediaType::RichText,
        ];
        for media_type in known {
            assert!(
                set.for_media_type(&media_type).is_some(),
                "no strategy for {media_type}"
            );
        }

        assert!(set.for_media_type(&MediaType::Unknown).is_none());
    }

    #[test]
    fn test_strategy_names_are_distinct() {
        let set = ExtractorSet::new(Arc::new(TesseractOcr::new()));
        let mut names: Vec<&str> = [
            MediaType::Pdf,
            MediaType::Image("image/png".to_string()),
            MediaType::LegacyDoc,
            MediaType::Docx,
            MediaType::PlainText,
            MediaType::RichText,
        ]
        .iter()
        .map(|m| set.for_media_type(m).unwrap().name())
        .collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 6);
    }
}
