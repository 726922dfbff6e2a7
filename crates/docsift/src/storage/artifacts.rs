//! Extracted-text artifact store.
//!
//! One pretty-printed JSON document per processed file, named
//! `{record_id}.json` under a flat directory. Retrieval hands the stored
//! document back verbatim; a missing record is `Ok(None)`, not an error.

use super::writer::{writer_for_mode, FileWriter};
use crate::core::config::WriterMode;
use crate::types::DocumentArtifact;
use crate::{DocsiftError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Flat-file key-value store for extraction artifacts.
pub struct ArtifactStore {
    root: PathBuf,
    writer: Arc<dyn FileWriter>,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>, mode: WriterMode) -> Self {
        Self {
            root: root.into(),
            writer: writer_for_mode(mode),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The on-disk path for a record id.
    pub fn artifact_path(&self, record_id: &str) -> PathBuf {
        self.root.join(format!("{record_id}.json"))
    }

    pub async fn save(&self, record_id: &str, artifact: &DocumentArtifact) -> Result<PathBuf> {
        validate_record_id(record_id)?;
        tokio::fs::create_dir_all(&self.root).await?;

        let path = self.artifact_path(record_id);
        let json = serde_json::to_vec_pretty(artifact)?;
        self.writer.write(&path, &json).await?;
        tracing::info!(record_id, path = %path.display(), "artifact saved");
        Ok(path)
    }

    pub async fn load(&self, record_id: &str) -> Result<Option<DocumentArtifact>> {
        validate_record_id(record_id)?;

        let path = self.artifact_path(record_id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DocsiftError::Io(e)),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

/// Record ids are generated internally, but load() is reachable with
/// client-supplied ids; keep them from naming paths outside the store.
fn validate_record_id(record_id: &str) -> Result<()> {
    let valid = !record_id.is_empty()
        && record_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(DocsiftError::validation(format!("invalid record id: '{record_id}'")));
    }
    Ok(())
}
