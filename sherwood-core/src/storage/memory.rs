use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use sherwood_contracts::storage::{StorageError, StoragePort};
use tokio::sync::RwLock;

/// Per-item limit of browser sync storage, in bytes of key plus JSON value.
pub const SYNC_ITEM_QUOTA_BYTES: usize = 8_192;

/// Process-local store. Shared by every context of one runtime, which is
/// how the shared browser store behaves from the extension's point of view.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
    item_quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects writes whose key plus serialized value exceed `limit` bytes.
    pub fn with_item_quota(limit: usize) -> Self {
        Self {
            entries: RwLock::default(),
            item_quota: Some(limit),
        }
    }

    pub async fn snapshot(&self) -> HashMap<String, Value> {
        self.entries.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn check_quota(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        let Some(limit) = self.item_quota else {
            return Ok(());
        };

        let bytes = key.len() + value.to_string().len();
        if bytes > limit {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                bytes,
                limit,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl StoragePort for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.check_quota(key, &value)?;
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn quota_rejects_oversized_items_and_keeps_old_value() {
        let store = MemoryStore::with_item_quota(32);
        store.set("size", json!(20)).await.expect("small write");

        let err = store
            .set("size", json!("x".repeat(64)))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { limit: 32, .. }));
        assert_eq!(store.get("size").await.expect("read"), Some(json!(20)));
    }

    #[tokio::test]
    async fn missing_keys_read_as_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("bookmarks").await.expect("read"), None);
        assert!(store.is_empty().await);
    }
}
