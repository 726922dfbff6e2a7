//! End-to-end document ingestion.
//!
//! Ties the stores and the pipeline together for one uploaded document:
//! stage the upload, classify it, record the classification, extract text,
//! persist the artifact, and remove the staged file. Classification failure
//! is reported before extraction is ever attempted; empty extraction after
//! a successful classification is a client-visible failure, but the
//! artifact is persisted first so the record remains inspectable.

use crate::core::config::ServiceConfig;
use crate::core::pipeline::Pipeline;
use crate::core::sniff;
use crate::storage::{ArtifactStore, ClassificationStore, MemoryClassificationStore, UploadStore};
use crate::types::{ArtifactMetadata, DocumentArtifact, IngestOutcome};
use crate::{DocsiftError, Result};
use std::sync::Arc;

/// The document ingestion service.
pub struct IngestService {
    uploads: UploadStore,
    artifacts: ArtifactStore,
    records: Arc<dyn ClassificationStore>,
    pipeline: Pipeline,
}

impl IngestService {
    /// Build a service with the default pipeline and an in-memory
    /// classification store.
    pub fn new(config: ServiceConfig) -> Self {
        let pipeline = Pipeline::new(config.extraction.clone());
        Self::with_parts(config, pipeline, Arc::new(MemoryClassificationStore::new()))
    }

    /// Build a service from explicit collaborators.
    pub fn with_parts(config: ServiceConfig, pipeline: Pipeline, records: Arc<dyn ClassificationStore>) -> Self {
        Self {
            uploads: UploadStore::new(config.upload_dir.clone(), config.writer),
            artifacts: ArtifactStore::new(config.artifact_dir.clone(), config.writer),
            records,
            pipeline,
        }
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    /// Process one uploaded document end to end.
    ///
    /// `received_at` stamps the artifact; when absent, the current time in
    /// RFC3339 is used.
    pub async fn ingest(&self, filename: &str, bytes: &[u8], received_at: Option<&str>) -> Result<IngestOutcome> {
        tracing::info!(filename, size = bytes.len(), "received document");

        let stored = self.uploads.save(filename, bytes).await?;

        let media_type = sniff::classify_path(&stored).await?;
        if !media_type.is_known() {
            self.uploads.remove(&stored).await?;
            return Err(DocsiftError::UnsupportedFormat(format!(
                "unrecognized file signature for '{filename}'"
            )));
        }
        tracing::info!(filename, media_type = %media_type, "document classified");

        let record_id = self.records.insert_classification(filename, &media_type).await?;

        let result = self.pipeline.run(&stored, media_type).await?;

        let created_at = received_at
            .map(str::to_string)
            .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());
        let artifact = DocumentArtifact {
            filename: filename.to_string(),
            extracted_text: result.text.clone(),
            metadata: ArtifactMetadata {
                created_at,
                filetype: result.media_type.mime_label().to_string(),
            },
        };
        let artifact_path = self.artifacts.save(&record_id, &artifact).await?;

        self.uploads.remove(&stored).await?;

        if !result.found_text() {
            return Err(DocsiftError::EmptyExtraction(filename.to_string()));
        }

        tracing::info!(filename, record_id, "document processed");
        Ok(IngestOutcome {
            record_id,
            filename: filename.to_string(),
            media_type: result.media_type,
            text: result.text,
            artifact_path,
        })
    }
}
