use std::fmt;

/// Keys of the shared key-value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    IsActive,
    Settings,
    GridSettings,
    Bookmarks,
    BackgroundImage,
    Size,
}

impl StorageKey {
    pub const ALL: [StorageKey; 6] = [
        StorageKey::IsActive,
        StorageKey::Settings,
        StorageKey::GridSettings,
        StorageKey::Bookmarks,
        StorageKey::BackgroundImage,
        StorageKey::Size,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::IsActive => "isActive",
            StorageKey::Settings => "settings",
            StorageKey::GridSettings => "gridSettings",
            StorageKey::Bookmarks => "bookmarks",
            StorageKey::BackgroundImage => "backgroundImage",
            StorageKey::Size => "size",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
