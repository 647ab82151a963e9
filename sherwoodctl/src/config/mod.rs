//! Runtime configuration for the command-line driver.

pub mod loader;
pub mod validation;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use sherwood_core::activation::DEFAULT_STATUS_CHANNEL_CAPACITY;
use sherwood_core::favicon::{DEFAULT_FAVICON_ENDPOINT, DEFAULT_FAVICON_SIZE};

pub use loader::ConfigSource;
pub use validation::ConfigValidationError;

pub const DEFAULT_STORE_PATH: &str = "sherwood-store.json";
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Which [`StoragePort`](sherwood_contracts::storage::StoragePort) backs the
/// runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Process-local map. State is gone when the command exits.
    Memory,
    /// One JSON document on disk.
    #[default]
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Store document for the `file` backend.
    pub path: Option<PathBuf>,
    /// Per-item byte limit for the `memory` backend. Unset means unlimited.
    pub item_quota_bytes: Option<usize>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            path: Some(PathBuf::from(DEFAULT_STORE_PATH)),
            item_quota_bytes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MessagingSettings {
    /// Frames a status listener may fall behind before it starts losing
    /// the oldest ones.
    pub status_channel_capacity: usize,
}

impl Default for MessagingSettings {
    fn default() -> Self {
        Self {
            status_channel_capacity: DEFAULT_STATUS_CHANNEL_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FaviconSettings {
    pub endpoint: String,
    pub icon_size: u32,
}

impl Default for FaviconSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_FAVICON_ENDPOINT.to_string(),
            icon_size: DEFAULT_FAVICON_SIZE,
        }
    }
}

/// Top-level settings. Every section falls back to its defaults when
/// omitted, so an empty document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SherwoodConfig {
    pub storage: StorageSettings,
    pub messaging: MessagingSettings,
    pub favicon: FaviconSettings,
    /// Default `tracing` filter; `RUST_LOG` takes precedence.
    pub log_filter: String,
}

impl Default for SherwoodConfig {
    fn default() -> Self {
        Self {
            storage: StorageSettings::default(),
            messaging: MessagingSettings::default(),
            favicon: FaviconSettings::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
