use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Failures reported by a key-value store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error(
        "quota exceeded for key {key}: {bytes} bytes exceeds limit of {limit}"
    )]
    QuotaExceeded {
        key: String,
        bytes: usize,
        limit: usize,
    },

    #[error("stored value for key {key} is malformed: {reason}")]
    Malformed { key: String, reason: String },
}

/// Asynchronous string-keyed store holding JSON values.
///
/// Implementations may be shared between execution contexts; a `get`
/// followed by a `set` is not atomic and callers that need read-modify-write
/// must serialize themselves.
#[async_trait]
pub trait StoragePort: Send + Sync {
    /// Value stored under `key`, or `None` when nothing was ever written.
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
}
