//! Error type shared by the picture use cases
//!
//! Store operations surface not-found and invalid-input failures as typed
//! variants; write failures pass through unchanged from the adapters.

use thiserror::Error;

use crate::application::ports::{RepositoryError, StorageError};
use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum PictureError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("No available (non-blacklisted) images")]
    NoEligibleImages,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("All {max} pulls used today ({used} used)")]
    QuotaExhausted { used: u64, max: u64 },

    #[error("Not allowed")]
    NotAllowed,

    #[error("No image selected")]
    NoSelection,
}

impl PictureError {
    /// Nothing eligible or the referenced file is gone
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PictureError::NoEligibleImages
                | PictureError::NotFound(_)
                | PictureError::Storage(StorageError::NotFound(_))
        )
    }

    /// Rejected caller input; raised before anything is written
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, PictureError::Domain(_) | PictureError::InvalidRequest(_))
    }
}
