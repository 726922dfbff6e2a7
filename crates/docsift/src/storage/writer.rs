//! File write strategies.
//!
//! Two concrete implementations behind one seam, selected once at process
//! start from [`WriterMode`]; there is no per-call capability probing.
//! Both produce identical bytes on disk; they differ only in how the write
//! is scheduled relative to the async runtime.

use crate::core::config::WriterMode;
use crate::{DocsiftError, Result};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// A strategy for writing a file to disk.
#[async_trait]
pub trait FileWriter: Send + Sync {
    async fn write(&self, path: &Path, bytes: &[u8]) -> Result<()>;
}

/// Blocking `std::fs` write, moved onto the blocking thread pool.
pub struct BufferedWriter;

#[async_trait]
impl FileWriter for BufferedWriter {
    async fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        let path = path.to_path_buf();
        let bytes = bytes.to_vec();
        tokio::task::spawn_blocking(move || std::fs::write(path, bytes))
            .await
            .map_err(|e| DocsiftError::Io(std::io::Error::other(format!("write task failed: {e}"))))??;
        Ok(())
    }
}

/// Non-blocking `tokio::fs` write on the async runtime.
pub struct NonBlockingWriter;

#[async_trait]
impl FileWriter for NonBlockingWriter {
    async fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        tokio::fs::write(path, bytes).await?;
        Ok(())
    }
}

/// Resolve the configured write strategy.
pub fn writer_for_mode(mode: WriterMode) -> Arc<dyn FileWriter> {
    match mode {
        WriterMode::Buffered => Arc::new(BufferedWriter),
        WriterMode::NonBlocking => Arc::new(NonBlockingWriter),
    }
}
