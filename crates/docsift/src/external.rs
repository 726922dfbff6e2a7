//! Discovery of external tool binaries and scratch space for their output.
//!
//! OCR and legacy-format conversion shell out to system tools (tesseract,
//! pdftoppm, soffice). A missing tool is a `MissingDependency` error, which
//! the pipeline treats as a content-level failure: the document degrades to
//! empty text instead of aborting the request.

use crate::{DocsiftError, Result};
use std::env;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Locate an external tool binary.
///
/// The override environment variable wins; otherwise every `PATH` entry is
/// probed for the binary name.
pub(crate) fn locate_tool(env_var: &str, binary: &str, install_hint: &str) -> Result<PathBuf> {
    if let Some(value) = env::var_os(env_var).filter(|v| !v.is_empty()) {
        let candidate = PathBuf::from(value);
        if candidate.is_file() {
            return Ok(candidate);
        }
        return Err(DocsiftError::MissingDependency(format!(
            "{env_var} points at '{}', which does not exist. {install_hint}",
            candidate.display()
        )));
    }

    if let Some(path_env) = env::var_os("PATH") {
        for dir in env::split_paths(&path_env) {
            let candidate = dir.join(binary);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }

    Err(DocsiftError::MissingDependency(format!(
        "'{binary}' was not found on PATH. {install_hint}"
    )))
}

/// Temp directory that cleans itself up when dropped.
///
/// One scratch dir per request; the uuid suffix keeps concurrent requests
/// from colliding.
pub(crate) struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub(crate) async fn new(prefix: &str) -> Result<Self> {
        let path = env::temp_dir().join(format!("{prefix}-{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&path).await?;
        Ok(Self { path })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_tool_missing_is_missing_dependency() {
        let result = locate_tool(
            "DOCSIFT_NO_SUCH_TOOL_PATH",
            "definitely-not-a-real-tool-9x7",
            "install it",
        );
        match result {
            Err(DocsiftError::MissingDependency(msg)) => {
                assert!(msg.contains("definitely-not-a-real-tool-9x7"));
                assert!(msg.contains("install it"));
            }
            other => panic!("expected MissingDependency, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_scratch_dir_removed_on_drop() {
        let scratch = ScratchDir::new("docsift-test").await.unwrap();
        let path = scratch.path().to_path_buf();
        assert!(path.is_dir());
        std::fs::write(path.join("page-1.png"), b"fake").unwrap();

        drop(scratch);
        assert!(!path.exists());
    }
}
