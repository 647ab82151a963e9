use std::sync::Arc;

use sherwood_core::bookmarks::BookmarkCollection;
use sherwood_core::favicon::HostFaviconResolver;
use sherwood_core::storage::{MemoryStore, SettingsStore};
use sherwood_model::{BookmarkId, GridSettings, NewBookmark, PageDirection};

fn empty_collection(grid: GridSettings) -> BookmarkCollection {
    BookmarkCollection::new(
        SettingsStore::new(Arc::new(MemoryStore::new())),
        Arc::new(HostFaviconResolver::default()),
        grid,
    )
}

fn draft(n: usize) -> NewBookmark {
    NewBookmark::new(format!("Site {n}"), format!("https://site{n}.example/"))
}

async fn fill(collection: &mut BookmarkCollection, count: usize) -> Vec<BookmarkId> {
    let mut ids = Vec::with_capacity(count);
    for n in 0..count {
        ids.push(collection.add(&draft(n)).await.expect("add").id);
    }
    ids
}

#[tokio::test]
async fn twelve_adds_on_default_grid_open_a_second_page() {
    let mut bookmarks = empty_collection(GridSettings::default());
    fill(&mut bookmarks, 12).await;

    let view = bookmarks.view();
    assert_eq!(view.total_pages, 2);
    assert_eq!(view.current_page, 1);
    assert!(view.items.is_empty(), "the reserved page holds only the add tile");
    assert!(view.shows_add_slot());
}

#[tokio::test]
async fn deleting_thirteenth_item_pulls_view_back_to_first_page() {
    let mut bookmarks = empty_collection(GridSettings::default());
    let ids = fill(&mut bookmarks, 13).await;

    let before = bookmarks.view();
    assert_eq!(before.current_page, 1);
    assert_eq!(before.content_pages, 2);
    assert_eq!(before.items.len(), 1);

    assert!(bookmarks.remove(&ids[0]).await.expect("remove"));

    let after = bookmarks.view();
    assert_eq!(after.content_pages, 1);
    assert_eq!(after.current_page, 0);
    assert_eq!(after.items.len(), 12);
    assert!(after.is_page_full());
}

#[tokio::test]
async fn add_then_remove_restores_content_and_pages() {
    for existing in [5usize, 11, 12] {
        let mut bookmarks = empty_collection(GridSettings::default());
        fill(&mut bookmarks, existing).await;
        let before = bookmarks.bookmarks().to_vec();
        let pages_before = bookmarks.total_pages();

        let added = bookmarks.add(&draft(99)).await.expect("add");
        assert!(bookmarks.remove(&added.id).await.expect("remove"));

        assert_eq!(bookmarks.bookmarks(), before.as_slice(), "existing={existing}");
        assert_eq!(bookmarks.total_pages(), pages_before, "existing={existing}");
    }
}

#[tokio::test]
async fn removing_unknown_id_is_a_no_op() {
    let mut bookmarks = empty_collection(GridSettings::default());
    fill(&mut bookmarks, 3).await;

    let removed = bookmarks
        .remove(&BookmarkId::from("missing"))
        .await
        .expect("remove");
    assert!(!removed);
    assert_eq!(bookmarks.bookmarks().len(), 3);
}

#[tokio::test]
async fn adding_from_an_earlier_page_does_not_move_the_view() {
    let mut bookmarks = empty_collection(GridSettings::clamped(3, 1, 0));
    fill(&mut bookmarks, 5).await;
    bookmarks.go_to_page(0);

    bookmarks.add(&draft(50)).await.expect("add");
    assert_eq!(bookmarks.current_page(), 0);
    assert_eq!(bookmarks.total_pages(), 3);

    assert_eq!(bookmarks.change_page(PageDirection::Next).current_page, 1);
    assert_eq!(bookmarks.change_page(PageDirection::Next).current_page, 2);
    assert!(bookmarks.view().is_last_page());
}

#[tokio::test]
async fn invalid_drafts_never_reach_the_store() {
    let backend = Arc::new(MemoryStore::new());
    let mut bookmarks = BookmarkCollection::new(
        SettingsStore::new(backend.clone()),
        Arc::new(HostFaviconResolver::default()),
        GridSettings::default(),
    );

    for bad in [
        NewBookmark::new("  ", "https://example.com"),
        NewBookmark::new("Example", ""),
        NewBookmark::new("Example", "not a url"),
    ] {
        let err = bookmarks.add(&bad).await.unwrap_err();
        assert!(err.is_validation(), "{bad:?}");
    }
    assert!(backend.is_empty().await);
}

#[tokio::test]
async fn list_is_consistent_for_every_page() {
    let mut bookmarks = empty_collection(GridSettings::clamped(4, 2, 1));
    fill(&mut bookmarks, 21).await;

    let total = bookmarks.total_pages();
    let seen: usize = (0..total).map(|page| bookmarks.list(page).items.len()).sum();
    assert_eq!(seen, 21);
    assert_eq!(bookmarks.list(total + 5).current_page, total - 1);
}
