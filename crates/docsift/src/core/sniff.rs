//! Content-based format classification.
//!
//! Media types are derived from file signatures (magic numbers), never from
//! the filename or a client-declared content type. Only a bounded header
//! prefix is read; classification never pulls a whole upload into memory.
//!
//! Detection order matters: binary signatures first (`infer`), then the RTF
//! signature (RTF is itself valid UTF-8 and would otherwise be swallowed by
//! the plain-text heuristic), and the text heuristic last.

use crate::core::io;
use crate::types::{DOCX_MIME_TYPE, LEGACY_WORD_MIME_TYPE, MediaType, PDF_MIME_TYPE};
use crate::Result;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

/// Bytes of header read for signature sniffing.
pub const SNIFF_HEADER_LEN: usize = 8192;

const RTF_SIGNATURE: &[u8] = b"{\\rtf";
const ZIP_MIME_TYPE: &str = "application/zip";

/// Signature-detected MIME label to media type.
static MIME_TO_MEDIA_TYPE: Lazy<HashMap<&'static str, MediaType>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(PDF_MIME_TYPE, MediaType::Pdf);
    m.insert(DOCX_MIME_TYPE, MediaType::Docx);
    m.insert(LEGACY_WORD_MIME_TYPE, MediaType::LegacyDoc);
    m
});

/// Classify a file on disk by its content signature.
///
/// Reads at most [`SNIFF_HEADER_LEN`] bytes. An unreadable or missing file
/// is an `Io` error; callers must be able to distinguish "cannot read"
/// from "unrecognized format", which is the `Ok(MediaType::Unknown)` case.
pub async fn classify_path(path: impl AsRef<Path>) -> Result<MediaType> {
    let path = path.as_ref();
    let header = io::read_header(path, SNIFF_HEADER_LEN).await?;
    let media_type = classify_bytes(&header);
    tracing::debug!(path = %path.display(), media_type = %media_type, "classified upload");
    Ok(media_type)
}

/// Classify a header prefix. Pure; total over all byte inputs.
pub fn classify_bytes(header: &[u8]) -> MediaType {
    if header.is_empty() {
        return MediaType::Unknown;
    }

    if let Some(kind) = infer::get(header) {
        let mime = kind.mime_type();
        if let Some(media_type) = MIME_TO_MEDIA_TYPE.get(mime) {
            return media_type.clone();
        }
        if mime.starts_with("image/") {
            return MediaType::Image(mime.to_string());
        }
        // Office containers that infer reports as bare ZIP can still be
        // identified by their well-known member path in the header.
        if mime == ZIP_MIME_TYPE && contains_subslice(header, b"word/document.xml") {
            return MediaType::Docx;
        }
        return MediaType::Unknown;
    }

    if header.starts_with(RTF_SIGNATURE) {
        return MediaType::RichText;
    }

    if looks_like_text(header) {
        return MediaType::PlainText;
    }

    MediaType::Unknown
}

/// Heuristic for text files, which carry no magic number: no NUL bytes and
/// valid UTF-8. A multi-byte character cut off by the header boundary is
/// tolerated only when the prefix was actually truncated at the boundary.
fn looks_like_text(header: &[u8]) -> bool {
    if header.contains(&0) {
        return false;
    }
    match std::str::from_utf8(header) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none() && header.len() >= SNIFF_HEADER_LEN,
    }
}

fn contains_subslice(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}
