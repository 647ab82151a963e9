use async_trait::async_trait;
use sherwood_contracts::favicon::{FaviconError, FaviconResolver};
use url::Url;

pub const DEFAULT_FAVICON_ENDPOINT: &str = "https://www.google.com/s2/favicons";
pub const DEFAULT_FAVICON_SIZE: u32 = 32;

/// Builds favicon-service urls from the bookmark's host. No network access;
/// the page fetches the icon when it renders.
#[derive(Debug, Clone)]
pub struct HostFaviconResolver {
    endpoint: String,
    icon_size: u32,
}

impl Default for HostFaviconResolver {
    fn default() -> Self {
        Self::new(DEFAULT_FAVICON_ENDPOINT, DEFAULT_FAVICON_SIZE)
    }
}

impl HostFaviconResolver {
    pub fn new(endpoint: impl Into<String>, icon_size: u32) -> Self {
        Self {
            endpoint: endpoint.into(),
            icon_size,
        }
    }
}

#[async_trait]
impl FaviconResolver for HostFaviconResolver {
    async fn resolve(&self, page_url: &Url) -> Result<String, FaviconError> {
        let host = page_url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| FaviconError::MissingHost(page_url.to_string()))?;

        let size = self.icon_size.to_string();
        let url = Url::parse_with_params(
            &self.endpoint,
            [("domain", host), ("sz", size.as_str())],
        )
        .map_err(|err| {
            FaviconError::Lookup(format!(
                "invalid favicon endpoint {}: {err}",
                self.endpoint
            ))
        })?;
        Ok(url.into())
    }
}
