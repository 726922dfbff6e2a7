//! PDF page rasterization via poppler's `pdftoppm`.

use crate::external::locate_tool;
use crate::{DocsiftError, Result};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tokio::time::{timeout, Duration};

const PDFTOPPM_INSTALL_HINT: &str =
    "Install poppler-utils: 'apt install poppler-utils' or 'brew install poppler'.";

/// Render every page of a PDF into `out_dir` as a PNG at the given density.
///
/// Returns the page image paths in page order. `pdftoppm` zero-pads page
/// numbers to a fixed width, so lexical order is page order.
pub async fn render_pdf_pages(
    pdf_path: &Path,
    dpi: u32,
    out_dir: &Path,
    timeout_seconds: u64,
) -> Result<Vec<PathBuf>> {
    let binary = locate_tool("DOCSIFT_PDFTOPPM_PATH", "pdftoppm", PDFTOPPM_INSTALL_HINT)?;
    let prefix = out_dir.join("page");

    let child = Command::new(&binary)
        .arg("-png")
        .arg("-r")
        .arg(dpi.to_string())
        .arg(pdf_path)
        .arg(&prefix)
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()?;

    let output = match timeout(Duration::from_secs(timeout_seconds), child.wait_with_output()).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(DocsiftError::ocr(format!(
                "pdftoppm timed out after {timeout_seconds} seconds on {}",
                pdf_path.display()
            )));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DocsiftError::ocr(format!(
            "pdftoppm failed on {}: {}",
            pdf_path.display(),
            stderr.trim()
        )));
    }

    let mut pages = Vec::new();
    let mut entries = tokio::fs::read_dir(out_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("png") {
            pages.push(path);
        }
    }
    pages.sort();

    if pages.is_empty() {
        return Err(DocsiftError::ocr(format!(
            "pdftoppm produced no page images for {}",
            pdf_path.display()
        )));
    }

    Ok(pages)
}
