//! Ordered bookmark list with a paginated view over the grid.
//!
//! Mutations persist the full updated list before touching memory, so a
//! failed write leaves the last-known-good list in place.

use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;

use sherwood_contracts::favicon::FaviconResolver;
use sherwood_model::{
    Bookmark, BookmarkId, GridSettings, NewBookmark, PageDirection,
    PaginationView, StorageKey,
};
use tracing::{debug, error, info, warn};

use crate::error::Result;
use crate::layout;
use crate::storage::SettingsStore;

pub struct BookmarkCollection {
    store: SettingsStore,
    favicons: Arc<dyn FaviconResolver>,
    bookmarks: Vec<Bookmark>,
    grid: GridSettings,
    current_page: usize,
}

impl fmt::Debug for BookmarkCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookmarkCollection")
            .field("bookmarks", &self.bookmarks.len())
            .field("grid", &self.grid)
            .field("current_page", &self.current_page)
            .field("favicons", &type_name_of_val(self.favicons.as_ref()))
            .finish()
    }
}

impl BookmarkCollection {
    pub fn new(
        store: SettingsStore,
        favicons: Arc<dyn FaviconResolver>,
        grid: GridSettings,
    ) -> Self {
        Self {
            store,
            favicons,
            bookmarks: Vec::new(),
            grid: grid.sanitized(),
            current_page: 0,
        }
    }

    /// Reads the persisted list, seeding the default bookmark on first run.
    pub async fn load(&mut self) -> Result<PaginationView> {
        let stored = self
            .store
            .get_optional::<Vec<Bookmark>>(StorageKey::Bookmarks)
            .await
            .inspect_err(|err| error!(%err, "failed to load bookmarks"))?;

        match stored {
            Some(bookmarks) => {
                debug!(count = bookmarks.len(), "loaded bookmarks");
                self.bookmarks = bookmarks;
            }
            None => {
                let seeded = vec![Bookmark::seed()];
                if let Err(err) =
                    self.store.set(StorageKey::Bookmarks, &seeded).await
                {
                    warn!(%err, "failed to persist seeded bookmark list");
                }
                info!("seeded default bookmark");
                self.bookmarks = seeded;
            }
        }

        self.clamp_current_page();
        Ok(self.view())
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn bookmark(&self, id: &BookmarkId) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|bookmark| &bookmark.id == id)
    }

    pub fn grid(&self) -> GridSettings {
        self.grid
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        layout::total_pages(self.bookmarks.len(), &self.grid)
    }

    /// View of the page the user is on.
    pub fn view(&self) -> PaginationView {
        self.list(self.current_page)
    }

    /// View of `page`, clamped into range. Does not move the current page.
    pub fn list(&self, page: usize) -> PaginationView {
        let count = self.bookmarks.len();
        let total_pages = layout::total_pages(count, &self.grid);
        let current_page = layout::clamp_page(page, total_pages);

        PaginationView {
            current_page,
            total_pages,
            content_pages: layout::content_pages(count, &self.grid),
            capacity: layout::page_capacity(&self.grid),
            items: layout::page_slice(&self.bookmarks, current_page, &self.grid)
                .to_vec(),
            item_count: count,
        }
    }

    /// Validates `draft`, appends it and persists the full list.
    ///
    /// A favicon lookup failure does not block the add. When the new
    /// bookmark fills the page the user is looking at, the view advances to
    /// the freshly reserved page behind it.
    pub async fn add(&mut self, draft: &NewBookmark) -> Result<Bookmark> {
        let validated = draft
            .validate()
            .inspect_err(|err| warn!(%err, "rejected bookmark draft"))?;

        let favicon = match self.favicons.resolve(&validated.url).await {
            Ok(favicon) => Some(favicon),
            Err(err) => {
                warn!(%err, url = %validated.url, "favicon lookup failed");
                None
            }
        };
        let bookmark = validated.into_bookmark(BookmarkId::generate(), favicon);

        let mut updated = self.bookmarks.clone();
        updated.push(bookmark.clone());
        self.persist(&updated).await?;

        let landed_on = layout::page_of(updated.len() - 1, &self.grid);
        self.bookmarks = updated;

        let capacity = layout::page_capacity(&self.grid);
        if self.bookmarks.len() % capacity == 0
            && self.current_page == landed_on
        {
            self.current_page = landed_on + 1;
        }
        self.clamp_current_page();

        info!(
            id = %bookmark.id,
            count = self.bookmarks.len(),
            page = self.current_page,
            "bookmark added"
        );
        Ok(bookmark)
    }

    /// Removes the bookmark with `id`. Returns `false` without writing when
    /// no such bookmark exists.
    pub async fn remove(&mut self, id: &BookmarkId) -> Result<bool> {
        let mut updated = self.bookmarks.clone();
        updated.retain(|bookmark| &bookmark.id != id);
        if updated.len() == self.bookmarks.len() {
            debug!(%id, "bookmark not present; nothing to remove");
            return Ok(false);
        }

        self.persist(&updated).await?;
        self.bookmarks = updated;

        self.clamp_current_page();
        if self.current_page > 0
            && layout::page_slice(&self.bookmarks, self.current_page, &self.grid)
                .is_empty()
        {
            self.current_page -= 1;
        }

        info!(
            %id,
            count = self.bookmarks.len(),
            page = self.current_page,
            "bookmark removed"
        );
        Ok(true)
    }

    /// Steps one page back or forward, staying inside the page range.
    pub fn change_page(&mut self, direction: PageDirection) -> PaginationView {
        let total = self.total_pages();
        match direction {
            PageDirection::Prev if self.current_page > 0 => {
                self.current_page -= 1;
            }
            PageDirection::Next if self.current_page + 1 < total => {
                self.current_page += 1;
            }
            _ => {}
        }
        self.view()
    }

    pub fn go_to_page(&mut self, page: usize) -> PaginationView {
        self.current_page = layout::clamp_page(page, self.total_pages());
        self.view()
    }

    /// Re-paginates for a new grid, keeping the current page in range.
    pub fn set_grid(&mut self, grid: GridSettings) -> PaginationView {
        self.grid = grid.sanitized();
        self.clamp_current_page();
        self.view()
    }

    async fn persist(&self, bookmarks: &[Bookmark]) -> Result<()> {
        self.store
            .set(StorageKey::Bookmarks, bookmarks)
            .await
            .inspect_err(|err| {
                error!(%err, count = bookmarks.len(), "failed to persist bookmarks")
            })
    }

    fn clamp_current_page(&mut self) {
        self.current_page =
            layout::clamp_page(self.current_page, self.total_pages());
    }
}
