//! Classification record store.
//!
//! In production this store is a relational database; the core only needs
//! "insert a row, get back an id", so the seam is exactly that. The
//! in-memory implementation backs tests and the CLI.

use crate::types::{ClassificationRecord, MediaType};
use crate::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use uuid::Uuid;

/// Opaque store for classification records.
#[async_trait]
pub trait ClassificationStore: Send + Sync {
    /// Persist one classification and return the new record's id.
    async fn insert_classification(&self, filename: &str, media_type: &MediaType) -> Result<String>;
}

/// In-memory classification store with UUID record ids.
#[derive(Default)]
pub struct MemoryClassificationStore {
    rows: Mutex<Vec<ClassificationRecord>>,
}

impl MemoryClassificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all inserted records, in insertion order.
    pub fn records(&self) -> Vec<ClassificationRecord> {
        self.rows.lock().clone()
    }
}

#[async_trait]
impl ClassificationStore for MemoryClassificationStore {
    async fn insert_classification(&self, filename: &str, media_type: &MediaType) -> Result<String> {
        let record_id = Uuid::new_v4().to_string();
        self.rows.lock().push(ClassificationRecord {
            record_id: record_id.clone(),
            filename: filename.to_string(),
            media_type: media_type.clone(),
        });
        tracing::debug!(record_id, filename, media_type = %media_type, "classification recorded");
        Ok(record_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_returns_unique_ids() {
        let store = MemoryClassificationStore::new();

        let first = store
            .insert_classification("a.pdf", &MediaType::Pdf)
            .await
            .unwrap();
        let second = store
            .insert_classification("b.txt", &MediaType::PlainText)
            .await
            .unwrap();

        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());

        let records = store.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].filename, "a.pdf");
        assert_eq!(records[0].media_type, MediaType::Pdf);
        assert_eq!(records[1].record_id, second);
    }
}
