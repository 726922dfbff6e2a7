//! DOCX extractor.
//!
//! A `.docx` file is a ZIP container whose main document lives in
//! `word/document.xml`. Extraction walks the `<w:p>` paragraph elements of
//! the document body in order; a paragraph's text is the concatenation of
//! its `<w:t>` runs. Paragraphs are joined with newlines, so an empty
//! paragraph becomes an empty line, matching how word processors render it.

use super::DocumentExtractor;
use crate::core::config::ExtractionConfig;
use crate::core::io;
use crate::{DocsiftError, Result};
use async_trait::async_trait;
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

const DOCUMENT_XML: &str = "word/document.xml";

/// Walks paragraph elements of `word/document.xml`.
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract paragraph text from DOCX bytes.
fn parse_docx(content: &[u8]) -> Result<String> {
    let cursor = Cursor::new(content);
    let mut archive =
        ZipArchive::new(cursor).map_err(|e| DocsiftError::parsing_with_source("failed to open DOCX as ZIP", e))?;

    let mut document_xml = String::new();
    archive
        .by_name(DOCUMENT_XML)
        .map_err(|e| DocsiftError::parsing_with_source(format!("DOCX has no {DOCUMENT_XML}"), e))?
        .read_to_string(&mut document_xml)
        .map_err(|e| DocsiftError::parsing_with_source(format!("failed to read {DOCUMENT_XML}"), e))?;

    let xml = roxmltree::Document::parse(&document_xml)
        .map_err(|e| DocsiftError::parsing_with_source(format!("invalid XML in {DOCUMENT_XML}"), e))?;

    let body = xml
        .descendants()
        .find(|n| n.has_tag_name("body"))
        .ok_or_else(|| DocsiftError::parsing(format!("{DOCUMENT_XML} has no document body")))?;

    let mut paragraphs = Vec::new();
    for node in body.children().filter(|n| n.has_tag_name("p")) {
        let mut paragraph = String::new();
        for run_text in node.descendants().filter(|n| n.has_tag_name("t")) {
            if let Some(text) = run_text.text() {
                paragraph.push_str(text);
            }
        }
        paragraphs.push(paragraph);
    }

    Ok(paragraphs.join("\n").trim().to_string())
}

#[async_trait]
impl DocumentExtractor for DocxExtractor {
    fn name(&self) -> &str {
        "docx"
    }

    async fn extract_path(&self, path: &Path, _config: &ExtractionConfig) -> Result<String> {
        let bytes = io::read_file(path).await?;
        parse_docx(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
            .collect();
        let document = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
             <w:body>{body}</w:body></w:document>"
        );

        let content_types = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
             <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
             <Override PartName=\"/word/document.xml\" \
             ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>\
             </Types>";

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        writer.start_file("[Content_Types].xml", options).unwrap();
        writer.write_all(content_types.as_bytes()).unwrap();
        writer.start_file("word/document.xml", options).unwrap();
        writer.write_all(document.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_paragraphs_joined_with_newline() {
        let bytes = build_docx(&["Line1", "Line2"]);
        assert_eq!(parse_docx(&bytes).unwrap(), "Line1\nLine2");
    }

    #[test]
    fn test_empty_paragraph_becomes_blank_line() {
        let bytes = build_docx(&["Heading", "", "Body"]);
        assert_eq!(parse_docx(&bytes).unwrap(), "Heading\n\nBody");
    }

    #[test]
    fn test_split_runs_concatenate_within_paragraph() {
        let document = "<?xml version=\"1.0\"?>\
            <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
            <w:body><w:p><w:r><w:t>Hel</w:t></w:r><w:r><w:t>lo</w:t></w:r></w:p></w:body></w:document>";
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        writer.start_file("word/document.xml", options).unwrap();
        writer.write_all(document.as_bytes()).unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        assert_eq!(parse_docx(&bytes).unwrap(), "Hello");
    }

    #[test]
    fn test_not_a_zip_is_parsing_error() {
        let err = parse_docx(b"this is not a zip archive").unwrap_err();
        assert!(matches!(err, DocsiftError::Parsing { .. }));
    }

    #[test]
    fn test_zip_without_document_xml_is_parsing_error() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("unrelated.txt", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"nothing").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = parse_docx(&bytes).unwrap_err();
        assert!(matches!(err, DocsiftError::Parsing { .. }));
    }

    #[tokio::test]
    async fn test_extract_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.docx");
        std::fs::write(&path, build_docx(&["alpha", "beta"])).unwrap();

        let text = DocxExtractor::new()
            .extract_path(&path, &ExtractionConfig::default())
            .await
            .unwrap();
        assert_eq!(text, "alpha\nbeta");
    }
}
