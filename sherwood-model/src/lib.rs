//! Core data model definitions shared across Sherwood crates.
#![allow(missing_docs)]

pub mod activation;
pub mod bookmark;
pub mod error;
pub mod grid;
pub mod keys;
pub mod messages;
pub mod pagination;
pub mod settings;

// Intentionally curated re-exports for downstream consumers.
pub use activation::{ActivationState, InstallReason};
pub use bookmark::{Bookmark, BookmarkId, NewBookmark, ValidatedBookmark};
pub use error::{ModelError, Result as ModelResult};
pub use grid::{GridDimension, GridSettings};
pub use keys::StorageKey;
pub use messages::{ExtensionRequest, ExtensionResponse};
pub use pagination::{PageDirection, PaginationView};
pub use settings::{DisplaySettings, DisplayToggle, IconSize};
