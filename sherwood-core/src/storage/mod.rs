//! Typed persistence facade and the concrete key-value backends.
//!
//! Every component reads and writes through [`SettingsStore`], which wraps
//! whichever [`StoragePort`] the runtime was composed with. The facade owns
//! JSON (de)serialization and defaulting; it never retries.

pub mod file;
pub mod memory;

use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use sherwood_contracts::storage::{StorageError, StoragePort};
use sherwood_model::StorageKey;
use tracing::trace;

use crate::error::Result;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Clone)]
pub struct SettingsStore {
    port: Arc<dyn StoragePort>,
}

impl fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsStore")
            .field("port", &type_name_of_val(self.port.as_ref()))
            .finish()
    }
}

impl SettingsStore {
    pub fn new(port: Arc<dyn StoragePort>) -> Self {
        Self { port }
    }

    pub fn port(&self) -> &Arc<dyn StoragePort> {
        &self.port
    }

    /// Value under `key`, or `None` if nothing was ever persisted there.
    /// A present but undecodable value is an error, not a silent default.
    pub async fn get_optional<T>(&self, key: StorageKey) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let Some(raw) = self.port.get(key.as_str()).await? else {
            return Ok(None);
        };

        if raw.is_null() {
            return Ok(None);
        }

        let value = serde_json::from_value(raw).map_err(|err| {
            StorageError::Malformed {
                key: key.as_str().to_string(),
                reason: err.to_string(),
            }
        })?;
        Ok(Some(value))
    }

    /// Value under `key`, falling back to `default` when absent.
    pub async fn get<T>(&self, key: StorageKey, default: T) -> Result<T>
    where
        T: DeserializeOwned,
    {
        Ok(self.get_optional(key).await?.unwrap_or(default))
    }

    pub async fn set<T>(&self, key: StorageKey, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let raw = serde_json::to_value(value)?;
        self.port.set(key.as_str(), raw).await?;
        trace!(key = %key, "persisted value");
        Ok(())
    }
}
