//! OCR (Optical Character Recognition) subsystem.
//!
//! OCR is the expensive, lossy path: it is used directly for raster images
//! and as the terminal fallback for PDFs whose text layer yields nothing.
//! The engine sits behind the [`OcrBackend`] trait so the pipeline can be
//! exercised in tests with a counting stub instead of a real engine.

pub mod rasterize;
pub mod tesseract;

pub use tesseract::TesseractOcr;

use crate::core::config::OcrConfig;
use crate::Result;
use async_trait::async_trait;
use std::path::Path;

/// An OCR engine.
///
/// Both methods are best-effort: OCR output is inherently non-deterministic
/// and callers treat failures as "no text found", not as request aborts.
#[async_trait]
pub trait OcrBackend: Send + Sync {
    /// Engine name, for logs.
    fn name(&self) -> &str;

    /// Recognize text in a single raster image.
    async fn recognize_image(&self, image_path: &Path, config: &OcrConfig) -> Result<String>;

    /// Rasterize a PDF page by page and recognize each page, returning the
    /// concatenated text.
    async fn recognize_pdf(&self, pdf_path: &Path, config: &OcrConfig) -> Result<String>;
}
