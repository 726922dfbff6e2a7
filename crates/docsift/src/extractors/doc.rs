//! Legacy Word (`.doc`) extractor.
//!
//! There is no production-grade native parser for the OLE2 `.doc` format,
//! so extraction delegates to LibreOffice's headless text conversion and
//! decodes the converter's output strictly as UTF-8. The `soffice` binary
//! is discovered through `DOCSIFT_SOFFICE_PATH` or `PATH`.

use super::DocumentExtractor;
use crate::core::config::ExtractionConfig;
use crate::external::{locate_tool, ScratchDir};
use crate::{DocsiftError, Result};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

const SOFFICE_INSTALL_HINT: &str =
    "Install LibreOffice: 'apt install libreoffice' or 'brew install --cask libreoffice'.";

/// Converts the document to text with LibreOffice and decodes it as UTF-8.
pub struct LegacyDocExtractor;

impl LegacyDocExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LegacyDocExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `soffice --headless --convert-to txt` and return the converted bytes.
async fn convert_to_text(path: &Path, timeout_seconds: u64) -> Result<Vec<u8>> {
    let binary = locate_tool("DOCSIFT_SOFFICE_PATH", "soffice", SOFFICE_INSTALL_HINT)?;

    // soffice derives the output name from the input stem, so the input is
    // staged under a fixed name in a per-request scratch dir.
    let scratch = ScratchDir::new("docsift-doc").await?;
    let input_path = scratch.path().join("input.doc");
    tokio::fs::copy(path, &input_path).await?;
    let out_dir = scratch.path().join("out");
    tokio::fs::create_dir_all(&out_dir).await?;

    let child = Command::new(&binary)
        .arg("--headless")
        .arg("--convert-to")
        .arg("txt:Text")
        .arg("--outdir")
        .arg(&out_dir)
        .arg(&input_path)
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()?;

    let output = match timeout(Duration::from_secs(timeout_seconds), child.wait_with_output()).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(DocsiftError::parsing(format!(
                "LibreOffice conversion timed out after {timeout_seconds} seconds on {}",
                path.display()
            )));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DocsiftError::parsing(format!(
            "LibreOffice conversion failed on {}: {}",
            path.display(),
            stderr.trim()
        )));
    }

    let converted = out_dir.join("input.txt");
    tokio::fs::read(&converted).await.map_err(|e| {
        DocsiftError::parsing_with_source("LibreOffice reported success but produced no text output", e)
    })
}

#[async_trait]
impl DocumentExtractor for LegacyDocExtractor {
    fn name(&self) -> &str {
        "legacy-doc"
    }

    async fn extract_path(&self, path: &Path, config: &ExtractionConfig) -> Result<String> {
        crate::core::io::validate_file_exists(path).await?;

        let bytes = convert_to_text(path, config.conversion.timeout_seconds).await?;
        let text = String::from_utf8(bytes)
            .map_err(|e| DocsiftError::parsing_with_source("converted text is not valid UTF-8", e))?;
        Ok(text.trim().to_string())
    }
}
