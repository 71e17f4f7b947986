use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Invalid rarity: {0}")]
    InvalidRarity(String),

    #[error("Invalid content hash: expected {expected}, got {actual}")]
    InvalidContentHash { expected: String, actual: String },

    #[error("Invalid date key: {0}")]
    InvalidDateKey(String),

    #[error("Invalid user ID: {0}")]
    InvalidUserId(String),

    #[error("Validation failed for {field}: {message}")]
    ValidationError { field: String, message: String },
}

