//! Trait surfaces the host environment implements for Sherwood.
//!
//! The extension logic in `sherwood-core` never touches a browser API
//! directly; storage, favicon lookup, message delivery, page rendering and
//! navigation all arrive through these ports.

pub mod favicon;
pub mod host;
pub mod messaging;
pub mod storage;

/// Frequently used ports for runtime composition and tests.
pub mod prelude {
    pub use super::favicon::{FaviconError, FaviconResolver};
    pub use super::host::{
        IndicatorSurface, NavigationError, Navigator, PresentationSink,
    };
    pub use super::messaging::{ContextKind, MessageEndpoint};
    pub use super::storage::{StorageError, StoragePort};
}
