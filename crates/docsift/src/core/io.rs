//! File I/O helpers.
//!
//! I/O errors from these functions always surface as `DocsiftError::Io`;
//! they are never downgraded to empty extraction output.

use crate::{DocsiftError, Result};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncReadExt;

/// Read a whole file asynchronously.
pub async fn read_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    fs::read(path.as_ref()).await.map_err(DocsiftError::Io)
}

/// Read at most `limit` bytes from the start of a file.
///
/// Used by the format classifier, which must never pull an entire upload
/// into memory just to look at its signature.
pub async fn read_header(path: impl AsRef<Path>, limit: usize) -> Result<Vec<u8>> {
    let file = fs::File::open(path.as_ref()).await?;
    let mut reader = file.take(limit as u64);
    let mut buf = Vec::with_capacity(limit.min(64 * 1024));
    reader.read_to_end(&mut buf).await?;
    Ok(buf)
}

/// Error if the path does not point at an existing regular file.
///
/// A missing or unreadable file is an environment fault, reported as `Io`
/// so callers cannot confuse it with an unrecognized format.
pub async fn validate_file_exists(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let metadata = fs::metadata(path).await?;
    if !metadata.is_file() {
        return Err(DocsiftError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("not a regular file: {}", path.display()),
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_read_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"test content").unwrap();

        let content = read_file(&path).await.unwrap();
        assert_eq!(content, b"test content");
    }

    #[tokio::test]
    async fn test_read_file_missing_is_io() {
        let result = read_file("/nonexistent/file.txt").await;
        assert!(matches!(result.unwrap_err(), DocsiftError::Io(_)));
    }

    #[tokio::test]
    async fn test_read_header_bounded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.bin");
        std::fs::write(&path, vec![0xAB; 64 * 1024]).unwrap();

        let header = read_header(&path, 8192).await.unwrap();
        assert_eq!(header.len(), 8192);
    }

    #[tokio::test]
    async fn test_read_header_short_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("small.bin");
        std::fs::write(&path, b"abc").unwrap();

        let header = read_header(&path, 8192).await.unwrap();
        assert_eq!(header, b"abc");
    }

    #[tokio::test]
    async fn test_validate_file_exists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");
        std::fs::File::create(&path).unwrap();

        assert!(validate_file_exists(&path).await.is_ok());

        let missing = validate_file_exists(dir.path().join("gone.txt")).await;
        assert!(matches!(missing.unwrap_err(), DocsiftError::Io(_)));

        let directory = validate_file_exists(dir.path()).await;
        assert!(matches!(directory.unwrap_err(), DocsiftError::Io(_)));
    }
}
