//! RTF (Rich Text Format) extractor.

use super::DocumentExtractor;
use crate::core::config::ExtractionConfig;
use crate::core::io;
use crate::{DocsiftError, Result};
use async_trait::async_trait;
use rtf_parser::lexer::Lexer;
use rtf_parser::parser::Parser;
use std::path::Path;

/// Parses the RTF control stream and returns the document's plain text.
pub struct RtfExtractor;

impl RtfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RtfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_rtf(content: &str) -> Result<String> {
    let tokens =
        Lexer::scan(content).map_err(|e| DocsiftError::parsing(format!("RTF lexing failed: {e:?}")))?;
    let document = Parser::new(tokens)
        .parse()
        .map_err(|e| DocsiftError::parsing(format!("RTF parsing failed: {e:?}")))?;
    Ok(document.get_text().trim().to_string())
}

#[async_trait]
impl DocumentExtractor for RtfExtractor {
    fn name(&self) -> &str {
        "rtf"
    }

    async fn extract_path(&self, path: &Path, _config: &ExtractionConfig) -> Result<String> {
        let bytes = io::read_file(path).await?;
        let content = String::from_utf8(bytes)
            .map_err(|e| DocsiftError::parsing_with_source("RTF file is not valid UTF-8", e))?;
        parse_rtf(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_simple_rtf() {
        let rtf = r"{\rtf1\ansi{\fonttbl\f0\fswiss Helvetica;}\f0 Hello from RTF}";
        let text = parse_rtf(rtf).unwrap();
        assert!(text.contains("Hello from RTF"), "got: {text:?}");
    }

    #[test]
    fn test_unbalanced_rtf_never_panics() {
        // The parser may recover or reject unbalanced groups; either way the
        // failure mode must be a typed Parsing error, not a panic.
        if let Err(err) = parse_rtf("{\\rtf1 unbalanced") {
            assert!(matches!(err, DocsiftError::Parsing { .. }));
        }
    }

    #[tokio::test]
    async fn test_extract_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("memo.rtf");
        std::fs::write(&path, r"{\rtf1\ansi{\fonttbl\f0\fswiss Helvetica;}\f0 quarterly memo}").unwrap();

        let text = RtfExtractor::new()
            .extract_path(&path, &ExtractionConfig::default())
            .await
            .unwrap();
        assert!(text.contains("quarterly memo"), "got: {text:?}");
    }
}
