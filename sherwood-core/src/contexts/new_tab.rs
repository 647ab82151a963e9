use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;

use sherwood_contracts::favicon::FaviconResolver;
use sherwood_contracts::host::{Navigator, PresentationSink};
use sherwood_model::{
    Bookmark, BookmarkId, DisplaySettings, DisplayToggle, GridDimension,
    GridSettings, IconSize, NewBookmark, PageDirection, PaginationView,
    StorageKey,
};
use tracing::{info, warn};
use url::Url;

use crate::background_image::BackgroundImagePolicy;
use crate::bookmarks::BookmarkCollection;
use crate::error::{Result, SherwoodError};
use crate::settings::{
    DisplaySettingsService, GridSettingsService, IconSizePreference,
};
use crate::storage::SettingsStore;

/// The new-tab page: bookmark grid plus the options panel.
pub struct NewTabPage {
    bookmarks: BookmarkCollection,
    display: DisplaySettingsService,
    grid: GridSettingsService,
    background: BackgroundImagePolicy,
    icon_size: IconSizePreference,
    navigator: Arc<dyn Navigator>,
    options_open: bool,
    degraded: Vec<StorageKey>,
}

impl fmt::Debug for NewTabPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewTabPage")
            .field("bookmarks", &self.bookmarks)
            .field("grid", &self.grid.current())
            .field("icon_size", &self.icon_size.current())
            .field("options_open", &self.options_open)
            .field("degraded", &self.degraded)
            .field("navigator", &type_name_of_val(self.navigator.as_ref()))
            .finish()
    }
}

impl NewTabPage {
    pub fn new(
        store: SettingsStore,
        favicons: Arc<dyn FaviconResolver>,
        sink: Arc<dyn PresentationSink>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            bookmarks: BookmarkCollection::new(
                store.clone(),
                favicons,
                GridSettings::default(),
            ),
            display: DisplaySettingsService::new(store.clone()),
            grid: GridSettingsService::new(store.clone()),
            background: BackgroundImagePolicy::new(store.clone(), Arc::clone(&sink)),
            icon_size: IconSizePreference::new(store, sink),
            navigator,
            options_open: false,
            degraded: Vec::new(),
        }
    }

    /// Reads every persisted preference and the bookmark list.
    ///
    /// The grid is loaded first so the bookmark view paginates with the
    /// stored dimensions; the independent preferences load concurrently.
    /// A preference that cannot be read keeps its current value and is
    /// listed by [`degraded_preferences`](Self::degraded_preferences). Only a
    /// failed bookmark read fails the load.
    pub async fn load(&mut self) -> Result<PaginationView> {
        self.degraded.clear();

        match self.grid.load().await {
            Ok(grid) => {
                self.bookmarks.set_grid(grid);
            }
            Err(err) => {
                warn!(%err, grid = ?self.grid.current(), "keeping current grid");
                self.degraded.push(StorageKey::GridSettings);
                self.bookmarks.set_grid(self.grid.current());
            }
        }

        let (display, background, icon_size) = futures::join!(
            self.display.load(),
            self.background.load(),
            self.icon_size.load()
        );
        for (key, failure) in [
            (StorageKey::Settings, display.err()),
            (StorageKey::BackgroundImage, background.err()),
            (StorageKey::Size, icon_size.err()),
        ] {
            if let Some(err) = failure {
                warn!(%err, %key, "preference unavailable; keeping current value");
                self.degraded.push(key);
            }
        }

        self.bookmarks.load().await
    }

    /// Preferences whose stored value could not be read by the last load.
    pub fn degraded_preferences(&self) -> &[StorageKey] {
        &self.degraded
    }

    pub fn view(&self) -> PaginationView {
        self.bookmarks.view()
    }

    pub fn bookmarks(&self) -> &BookmarkCollection {
        &self.bookmarks
    }

    pub fn display_settings(&self) -> &DisplaySettings {
        self.display.current()
    }

    pub fn grid(&self) -> GridSettings {
        self.grid.current()
    }

    pub fn background_image(&self) -> Option<&str> {
        self.background.current()
    }

    pub fn icon_size(&self) -> IconSize {
        self.icon_size.current()
    }

    pub fn is_options_open(&self) -> bool {
        self.options_open
    }

    pub async fn add_bookmark(&mut self, draft: &NewBookmark) -> Result<Bookmark> {
        self.bookmarks.add(draft).await
    }

    pub async fn remove_bookmark(&mut self, id: &BookmarkId) -> Result<bool> {
        self.bookmarks.remove(id).await
    }

    pub fn change_page(&mut self, direction: PageDirection) -> PaginationView {
        self.bookmarks.change_page(direction)
    }

    /// Sends the current tab to the bookmark's url.
    pub fn open_bookmark(&self, id: &BookmarkId) -> Result<Url> {
        let bookmark = self
            .bookmarks
            .bookmark(id)
            .ok_or_else(|| SherwoodError::NotFound(format!("bookmark {id}")))?;
        let url = bookmark.parsed_url().ok_or_else(|| {
            SherwoodError::NotFound(format!(
                "bookmark {id} has no openable url: {}",
                bookmark.url
            ))
        })?;

        self.navigator
            .navigate(&url)
            .inspect_err(|err| warn!(%err, %id, "navigation refused"))?;
        info!(%id, %url, "opened bookmark");
        Ok(url)
    }

    pub async fn set_grid_dimension(
        &mut self,
        dimension: GridDimension,
        value: u32,
    ) -> Result<PaginationView> {
        let grid = self.grid.set_dimension(dimension, value).await?;
        Ok(self.bookmarks.set_grid(grid))
    }

    pub async fn set_display_toggle(
        &mut self,
        toggle: DisplayToggle,
        value: bool,
    ) -> Result<DisplaySettings> {
        self.display.set_toggle(toggle, value).await
    }

    pub async fn set_background_image(&mut self, image_ref: &str) -> Result<()> {
        self.background.set(image_ref).await
    }

    pub async fn set_icon_size(&mut self, px: u32) -> Result<IconSize> {
        self.icon_size.set(px).await
    }

    pub fn open_options_panel(&mut self) {
        self.options_open = true;
    }

    /// Closes the panel and re-reads everything from the store in place, so
    /// edits made elsewhere while the panel was open are picked up without a
    /// page reload. The current page is kept when still in range.
    pub async fn close_options_panel(&mut self) -> Result<PaginationView> {
        if !self.options_open {
            return Ok(self.view());
        }
        self.options_open = false;

        let page = self.bookmarks.current_page();
        self.load().await?;
        Ok(self.bookmarks.go_to_page(page))
    }
}
