use std::fmt;

use url::Url;
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Opaque, unique bookmark identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BookmarkId(String);

impl BookmarkId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Fresh identifier for a user-created bookmark. UUIDv7 keeps ids
    /// ordered by creation time, like the millisecond stamps older stores
    /// hold.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BookmarkId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A single tile on the new-tab grid. Replace-only: nothing mutates a
/// stored bookmark in place.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bookmark {
    pub id: BookmarkId,
    pub title: String,
    pub url: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub favicon: Option<String>,
}

pub const DEFAULT_BOOKMARK_ID: &str = "1";
pub const DEFAULT_BOOKMARK_TITLE: &str = "Buy me a coffee";
pub const DEFAULT_BOOKMARK_URL: &str = "https://coff.ee/starlight.space";
pub const DEFAULT_BOOKMARK_FAVICON: &str = "https://t0.gstatic.com/faviconV2?client=SOCIAL&type=FAVICON&fallback_opts=TYPE,SIZE,URL&url=http://buymeacoffee.com&size=32";

impl Bookmark {
    /// The entry seeded on first run when no bookmark list is persisted.
    pub fn seed() -> Self {
        Self {
            id: BookmarkId::new(DEFAULT_BOOKMARK_ID),
            title: DEFAULT_BOOKMARK_TITLE.to_string(),
            url: DEFAULT_BOOKMARK_URL.to_string(),
            favicon: Some(DEFAULT_BOOKMARK_FAVICON.to_string()),
        }
    }

    /// Parsed form of the stored url, if it is still well formed.
    pub fn parsed_url(&self) -> Option<Url> {
        Url::parse(&self.url).ok()
    }
}

/// User input for a new bookmark, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
}

/// A draft that passed validation: trimmed title, trimmed url text and its
/// parsed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBookmark {
    pub title: String,
    pub url_text: String,
    pub url: Url,
}

impl NewBookmark {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    pub fn validate(&self) -> Result<ValidatedBookmark> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ModelError::EmptyTitle);
        }

        let raw_url = self.url.trim();
        if raw_url.is_empty() {
            return Err(ModelError::EmptyUrl);
        }

        let url = Url::parse(raw_url).map_err(|err| ModelError::InvalidUrl {
            url: raw_url.to_string(),
            reason: err.to_string(),
        })?;

        Ok(ValidatedBookmark {
            title: title.to_string(),
            url_text: raw_url.to_string(),
            url,
        })
    }
}

impl ValidatedBookmark {
    /// The url's host, which favicon lookups key on.
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    pub fn into_bookmark(
        self,
        id: BookmarkId,
        favicon: Option<String>,
    ) -> Bookmark {
        Bookmark {
            id,
            title: self.title,
            url: self.url_text,
            favicon,
        }
    }
}
