//! docsift - Document Text Extraction Pipeline
//!
//! docsift accepts an uploaded document, determines its format from the
//! file's content signature, extracts plain text with a format-specific
//! strategy, and persists the result as a JSON artifact keyed by a record
//! id. Scanned PDFs without a text layer fall back to OCR.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use docsift::{ExtractionConfig, Pipeline};
//!
//! # async fn example() -> docsift::Result<()> {
//! let pipeline = Pipeline::new(ExtractionConfig::default());
//! let result = pipeline.classify_and_run("document.pdf").await?;
//! println!("{}: {}", result.media_type, result.text);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core** (`core`): content sniffing, pipeline orchestration, config
//! - **Extractors** (`extractors`): one strategy per supported format
//! - **OCR** (`ocr`): tesseract-backed engine behind a swappable trait
//! - **Storage** (`storage`): upload staging, JSON artifacts, records
//! - **Ingest** (`ingest`): the end-to-end service flow

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod extractors;
mod external;
pub mod ingest;
pub mod ocr;
pub mod storage;
pub mod types;

pub use error::{DocsiftError, Result};
pub use types::*;

pub use core::config::{ConversionConfig, ExtractionConfig, OcrConfig, ServiceConfig, WriterMode};
pub use core::pipeline::Pipeline;
pub use core::sniff::{classify_bytes, classify_path};

pub use extractors::{DocumentExtractor, ExtractorSet};
pub use ingest::IngestService;
pub use ocr::{OcrBackend, TesseractOcr};
pub use storage::{ArtifactStore, ClassificationStore, MemoryClassificationStore, UploadStore};
