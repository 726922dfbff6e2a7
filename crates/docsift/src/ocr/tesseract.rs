//! Tesseract CLI backend.
//!
//! Shells out to the `tesseract` binary rather than binding its C API; the
//! binary is discovered through `DOCSIFT_TESSERACT_PATH` or `PATH`.

use super::rasterize::render_pdf_pages;
use super::OcrBackend;
use crate::core::config::OcrConfig;
use crate::external::{locate_tool, ScratchDir};
use crate::{DocsiftError, Result};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

const TESSERACT_INSTALL_HINT: &str =
    "Install tesseract: 'apt install tesseract-ocr' or 'brew install tesseract'.";

/// OCR backend driving the tesseract command-line tool.
#[derive(Debug, Default)]
pub struct TesseractOcr;

impl TesseractOcr {
    pub fn new() -> Self {
        Self
    }

    async fn run_tesseract(&self, image_path: &Path, config: &OcrConfig) -> Result<String> {
        let binary = locate_tool("DOCSIFT_TESSERACT_PATH", "tesseract", TESSERACT_INSTALL_HINT)?;

        let child = Command::new(&binary)
            .arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(&config.language)
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .spawn()?;

        let output = match timeout(Duration::from_secs(config.timeout_seconds), child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(DocsiftError::ocr(format!(
                    "tesseract timed out after {} seconds on {}",
                    config.timeout_seconds,
                    image_path.display()
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DocsiftError::ocr(format!(
                "tesseract failed on {}: {}",
                image_path.display(),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl OcrBackend for TesseractOcr {
    fn name(&self) -> &str {
        "tesseract-cli"
    }

    async fn recognize_image(&self, image_path: &Path, config: &OcrConfig) -> Result<String> {
        self.run_tesseract(image_path, config).await
    }

    async fn recognize_pdf(&self, pdf_path: &Path, config: &OcrConfig) -> Result<String> {
        let scratch = ScratchDir::new("docsift-ocr").await?;
        let pages = render_pdf_pages(pdf_path, config.dpi, scratch.path(), config.timeout_seconds).await?;

        tracing::debug!(
            pdf = %pdf_path.display(),
            pages = pages.len(),
            dpi = config.dpi,
            "running OCR over rasterized PDF pages"
        );

        let mut page_texts = Vec::with_capacity(pages.len());
        for page in &pages {
            page_texts.push(self.run_tesseract(page, config).await?);
        }

        Ok(page_texts.join("\n"))
    }
}
