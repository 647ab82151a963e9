use crate::bookmark::Bookmark;

/// One page of the bookmark grid as the new-tab page renders it. Derived
/// state; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaginationView {
    pub current_page: usize,
    /// Pages offered to the user, including a reserved empty trailing page
    /// when the last page is exactly full.
    pub total_pages: usize,
    /// Pages that hold at least one bookmark.
    pub content_pages: usize,
    pub capacity: usize,
    pub items: Vec<Bookmark>,
    /// Total bookmarks across every page.
    pub item_count: usize,
}

/// Direction for stepping between pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageDirection {
    Prev,
    Next,
}

impl PaginationView {
    pub fn is_last_page(&self) -> bool {
        self.total_pages > 0 && self.current_page + 1 == self.total_pages
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page == 0
    }

    /// Every slot on the current page is taken.
    pub fn is_page_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    /// The empty "add" tile is shown on the last page while it has room.
    pub fn shows_add_slot(&self) -> bool {
        (self.is_last_page() || self.total_pages == 0) && !self.is_page_full()
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.total_pages
    }
}
