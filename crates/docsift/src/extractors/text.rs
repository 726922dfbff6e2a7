//! Plain text extractor.

use super::DocumentExtractor;
use crate::core::config::ExtractionConfig;
use crate::core::io;
use crate::{DocsiftError, Result};
use async_trait::async_trait;
use std::path::Path;

/// Reads the file as UTF-8 and trims surrounding whitespace.
///
/// Internal whitespace is preserved untouched; only leading and trailing
/// whitespace is removed.
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for PlainTextExtractor {
    fn name(&self) -> &str {
        "plain-text"
    }

    async fn extract_path(&self, path: &Path, _config: &ExtractionConfig) -> Result<String> {
        let bytes = io::read_file(path).await?;
        let text = String::from_utf8(bytes)
            .map_err(|e| DocsiftError::parsing_with_source("file is not valid UTF-8", e))?;
        Ok(text.trim().to_string())
    }
}
