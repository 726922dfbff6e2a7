//! Raster image extractor: a single OCR pass over the image.

use super::DocumentExtractor;
use crate::core::config::ExtractionConfig;
use crate::ocr::OcrBackend;
use crate::Result;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Runs OCR directly on the raster. No fallback exists for images: if the
/// engine finds nothing, the result is empty text.
pub struct ImageExtractor {
    ocr: Arc<dyn OcrBackend>,
}

impl ImageExtractor {
    pub fn new(ocr: Arc<dyn OcrBackend>) -> Self {
        Self { ocr }
    }
}

#[async_trait]
impl DocumentExtractor for ImageExtractor {
    fn name(&self) -> &str {
        "image-ocr"
    }

    async fn extract_path(&self, path: &Path, config: &ExtractionConfig) -> Result<String> {
        let recognized = self.ocr.recognize_image(path, &config.ocr).await?;
        Ok(recognized.trim().to_string())
    }
}
