use async_trait::async_trait;
#[cfg(test)]
use mockall::{automock, predicate::*};
use thiserror::Error;

use crate::domain::value_objects::{ContentHash, ImagePath};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Port for the directory of pictures on disk
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MediaLibrary: Send + Sync {
    /// Every media file under the library root, sorted by path
    async fn list_all(&self) -> Result<Vec<ImagePath>, StorageError>;

    /// Check if the file is still present
    async fn exists(&self, path: &ImagePath) -> bool;

    /// SHA-256 of the file contents
    async fn hash_file(&self, path: &ImagePath) -> Result<ContentHash, StorageError>;

    /// Write an uploaded file under a sanitized, non-colliding name
    async fn store_upload(&self, filename: &str, bytes: &[u8]) -> Result<ImagePath, StorageError>;
}
