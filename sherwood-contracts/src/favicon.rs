use async_trait::async_trait;
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FaviconError {
    #[error("url {0} has no host to look up")]
    MissingHost(String),

    #[error("favicon lookup failed: {0}")]
    Lookup(String),
}

/// Derives a favicon reference for a page url. Lookups key on the url's
/// host, so two urls on the same host resolve to the same icon.
#[async_trait]
pub trait FaviconResolver: Send + Sync {
    async fn resolve(&self, page_url: &Url) -> Result<String, FaviconError>;
}
