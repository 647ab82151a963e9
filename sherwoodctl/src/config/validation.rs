use thiserror::Error;
use url::Url;

use super::{SherwoodConfig, StorageBackend};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("messaging.status_channel_capacity must be at least 1")]
    ZeroChannelCapacity,
    #[error("storage.backend = \"file\" requires storage.path")]
    MissingStorePath,
    #[error("favicon.endpoint {endpoint} is not an absolute url: {reason}")]
    InvalidFaviconEndpoint { endpoint: String, reason: String },
}

impl SherwoodConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.messaging.status_channel_capacity == 0 {
            return Err(ConfigValidationError::ZeroChannelCapacity);
        }

        if self.storage.backend == StorageBackend::File {
            let has_path = self
                .storage
                .path
                .as_ref()
                .is_some_and(|path| !path.as_os_str().is_empty());
            if !has_path {
                return Err(ConfigValidationError::MissingStorePath);
            }
        }

        Url::parse(&self.favicon.endpoint).map_err(|err| {
            ConfigValidationError::InvalidFaviconEndpoint {
                endpoint: self.favicon.endpoint.clone(),
                reason: err.to_string(),
            }
        })?;

        Ok(())
    }
}
