//! Rendering and navigation surfaces supplied by the host page.

use thiserror::Error;
use url::Url;

/// The on-page badge the content script shows while the extension is
/// active.
pub trait IndicatorSurface: Send + Sync {
    /// Shows the indicator, replacing any existing one.
    fn mount(&self, label: &str);

    /// Removes the indicator if present.
    fn unmount(&self);

    fn is_mounted(&self) -> bool;
}

/// Document-level style variables (`--background-image`, `--em`).
pub trait PresentationSink: Send + Sync {
    fn set_variable(&self, name: &str, value: &str);
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("navigation to {url} was refused: {reason}")]
    Refused { url: String, reason: String },
}

/// Sends the current tab to a new location.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &Url) -> Result<(), NavigationError>;
}
