use sherwood_contracts::host::NavigationError;
use sherwood_contracts::storage::StorageError;
use sherwood_model::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SherwoodError {
    #[error("Persistence error: {0}")]
    Persistence(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ModelError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl SherwoodError {
    /// Failures that left previously persisted state untouched because the
    /// store rejected the operation.
    pub fn is_persistence(&self) -> bool {
        matches!(self, SherwoodError::Persistence(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, SherwoodError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SherwoodError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, SherwoodError>;
