use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::MetadataCatalog;
#[cfg(test)]
use mockall::{automock, predicate::*};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Port for the picture metadata document
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Load the catalog; missing or unreadable documents yield an empty catalog
    async fn load(&self) -> MetadataCatalog;

    /// Persist the whole catalog, replacing the previous version atomically
    async fn save(&self, catalog: &MetadataCatalog) -> Result<(), RepositoryError>;
}
