//! Core data types shared across the crate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Canonical MIME label for DOCX documents.
pub const DOCX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
/// Canonical MIME label for legacy Word documents.
pub const LEGACY_WORD_MIME_TYPE: &str = "application/msword";
/// Canonical MIME label for PDF documents.
pub const PDF_MIME_TYPE: &str = "application/pdf";
/// Canonical MIME label for plain text.
pub const PLAIN_TEXT_MIME_TYPE: &str = "text/plain";
/// Canonical MIME label for RTF documents.
pub const RTF_MIME_TYPE: &str = "application/rtf";
/// Label used for content with no recognized signature.
pub const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";

/// A document's format, derived from its content signature.
///
/// This is a closed enumeration: every dispatch site matches exhaustively,
/// so adding a format forces every site to handle it. The `Image` variant
/// carries the concrete `image/*` MIME produced by signature sniffing.
///
/// Media types are always derived fresh from file bytes; a client-declared
/// content type is never trusted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaType {
    Pdf,
    Image(String),
    LegacyDoc,
    Docx,
    PlainText,
    RichText,
    Unknown,
}

impl MediaType {
    /// The normalized MIME label for this media type.
    pub fn mime_label(&self) -> &str {
        match self {
            MediaType::Pdf => PDF_MIME_TYPE,
            MediaType::Image(mime) => mime,
            MediaType::LegacyDoc => LEGACY_WORD_MIME_TYPE,
            MediaType::Docx => DOCX_MIME_TYPE,
            MediaType::PlainText => PLAIN_TEXT_MIME_TYPE,
            MediaType::RichText => RTF_MIME_TYPE,
            MediaType::Unknown => UNKNOWN_MIME_TYPE,
        }
    }

    /// Whether signature sniffing produced a usable format.
    pub fn is_known(&self) -> bool {
        !matches!(self, MediaType::Unknown)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_label())
    }
}

impl From<String> for MediaType {
    fn from(label: String) -> Self {
        match label.as_str() {
            PDF_MIME_TYPE => MediaType::Pdf,
            DOCX_MIME_TYPE => MediaType::Docx,
            LEGACY_WORD_MIME_TYPE => MediaType::LegacyDoc,
            PLAIN_TEXT_MIME_TYPE => MediaType::PlainText,
            RTF_MIME_TYPE | "text/rtf" => MediaType::RichText,
            other if other.starts_with("image/") => MediaType::Image(label),
            _ => MediaType::Unknown,
        }
    }
}

impl From<MediaType> for String {
    fn from(media_type: MediaType) -> Self {
        media_type.mime_label().to_string()
    }
}

/// The outcome of running the extraction pipeline on one document.
///
/// An empty `text` is a valid "no text found" outcome, not a pipeline
/// failure; hard failures are reported through `DocsiftError` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Extracted plain text, trimmed. May be empty.
    pub text: String,
    /// The media type the text was extracted as.
    pub media_type: MediaType,
}

impl ExtractionResult {
    pub fn empty(media_type: MediaType) -> Self {
        Self {
            text: String::new(),
            media_type,
        }
    }

    /// Whether any text was found at all.
    pub fn found_text(&self) -> bool {
        !self.text.is_empty()
    }
}

/// The JSON document persisted per processed file, keyed by record id.
///
/// Field names are part of the stored contract; retrieval hands this
/// document back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentArtifact {
    pub filename: String,
    pub extracted_text: String,
    pub metadata: ArtifactMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub created_at: String,
    pub filetype: String,
}

/// One row of the classification record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub record_id: String,
    pub filename: String,
    pub media_type: MediaType,
}

/// Result of ingesting one uploaded document end to end.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub record_id: String,
    pub filename: String,
    pub media_type: MediaType,
    pub text: String,
    pub artifact_path: PathBuf,
}
