//! Configuration loading.
//!
//! All knobs have defaults; a `docsift.toml` in the working directory is
//! picked up automatically by [`ServiceConfig::discover`].

use crate::{DocsiftError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Rasterization density used when a PDF falls back to OCR.
pub const DEFAULT_OCR_DPI: u32 = 300;

/// OCR engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language model.
    pub language: String,
    /// Rasterization density for PDF pages handed to OCR.
    pub dpi: u32,
    /// Upper bound for a single OCR subprocess invocation.
    pub timeout_seconds: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            dpi: DEFAULT_OCR_DPI,
            timeout_seconds: 120,
        }
    }
}

/// Settings for the extraction pipeline itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub ocr: OcrConfig,
    pub conversion: ConversionConfig,
}

/// Settings for external document conversion (legacy Word formats).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Upper bound for a LibreOffice headless conversion.
    pub timeout_seconds: u64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self { timeout_seconds: 300 }
    }
}

/// How files are written to disk by the storage layer.
///
/// Selected once at construction and honored for the process lifetime;
/// there is no per-call capability probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriterMode {
    /// Blocking `std::fs` writes, moved onto the blocking thread pool.
    Buffered,
    /// `tokio::fs` writes on the async runtime.
    #[default]
    NonBlocking,
}

/// Top-level service configuration: storage locations plus pipeline knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Directory uploaded files are staged into.
    pub upload_dir: PathBuf,
    /// Directory extracted-text JSON artifacts are written to.
    pub artifact_dir: PathBuf,
    /// File write strategy for both stores.
    pub writer: WriterMode,
    pub extraction: ExtractionConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("data/uploads"),
            artifact_dir: PathBuf::from("data/artifacts"),
            writer: WriterMode::default(),
            extraction: ExtractionConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            DocsiftError::validation_with_source(format!("Invalid config file {}", path.display()), e)
        })
    }

    /// Look for `docsift.toml` in the current directory.
    ///
    /// Returns `Ok(None)` when no config file is present; defaults apply.
    pub fn discover() -> Result<Option<Self>> {
        let candidate = Path::new("docsift.toml");
        if candidate.is_file() {
            return Self::from_toml_file(candidate).map(Some);
        }
        Ok(None)
    }
}
