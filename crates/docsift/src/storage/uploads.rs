//! Upload staging store.
//!
//! Uploaded bytes are staged under a root directory until extraction
//! finishes, then removed by the caller that owns the request. The store
//! never interprets file content; filename uniqueness is the caller's
//! responsibility.

use super::writer::{writer_for_mode, FileWriter};
use crate::core::config::WriterMode;
use crate::core::io;
use crate::{DocsiftError, Result};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Staging area for uploaded files.
pub struct UploadStore {
    root: PathBuf,
    writer: Arc<dyn FileWriter>,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>, mode: WriterMode) -> Self {
        Self {
            root: root.into(),
            writer: writer_for_mode(mode),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stage an upload under its client-provided name.
    ///
    /// Relative subdirectories in the name are allowed and created; names
    /// escaping the root (absolute, `..`) are rejected.
    pub async fn save(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let name = validate_upload_name(name)?;
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        self.writer.write(&path, bytes).await?;
        tracing::info!(path = %path.display(), size = bytes.len(), "upload staged");
        Ok(path)
    }

    pub async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        io::read_file(path).await
    }

    /// Remove a staged upload. Removing a file that is already gone is
    /// logged but not an error.
    pub async fn remove(&self, path: &Path) -> Result<()> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "upload removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "tried to remove non-existent upload");
                Ok(())
            }
            Err(e) => Err(DocsiftError::Io(e)),
        }
    }
}

fn validate_upload_name(name: &str) -> Result<&Path> {
    let path = Path::new(name);
    let valid = !name.is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
    if !valid {
        return Err(DocsiftError::validation(format!("invalid upload name: '{name}'")));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_read_remove_round_trip() {
        let dir = tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("uploads"), WriterMode::NonBlocking);

        let path = store.save("invoice.pdf", b"%PDF-1.7 payload").await.unwrap();
        assert!(path.starts_with(store.root()));
        assert_eq!(store.read(&path).await.unwrap(), b"%PDF-1.7 payload");

        store.remove(&path).await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_save_creates_nested_directories() {
        let dir = tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("uploads"), WriterMode::Buffered);

        let path = store.save("batch-7/invoice.pdf", b"data").await.unwrap();
        assert!(path.exists());
        assert!(path.ends_with("batch-7/invoice.pdf"));
    }

    #[tokio::test]
    async fn test_traversal_names_rejected() {
        let dir = tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("uploads"), WriterMode::NonBlocking);

        for name in ["../escape.txt", "/etc/passwd", "a/../../b", ""] {
            let err = store.save(name, b"x").await.unwrap_err();
            assert!(matches!(err, DocsiftError::Validation { .. }), "accepted '{name}'");
        }
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_not_an_error() {
        let dir = tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("uploads"), WriterMode::NonBlocking);
        store.remove(&dir.path().join("never-existed.txt")).await.unwrap();
    }
}
