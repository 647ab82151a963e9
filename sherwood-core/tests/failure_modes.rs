use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use serde_json::{Value, json};
use sherwood_contracts::favicon::{FaviconError, FaviconResolver};
use sherwood_contracts::storage::{StorageError, StoragePort};
use sherwood_core::activation::{ActivationBroker, StatusBus};
use sherwood_core::application::ExtensionRuntime;
use sherwood_core::bookmarks::BookmarkCollection;
use sherwood_core::contexts::dispatch_json;
use sherwood_core::favicon::HostFaviconResolver;
use sherwood_core::settings::GridSettingsService;
use sherwood_core::storage::{MemoryStore, SettingsStore};
use sherwood_model::{
    Bookmark, BookmarkId, GridDimension, GridSettings, IconSize, NewBookmark, StorageKey,
};
use url::Url;

mock! {
    pub Storage {}

    #[async_trait]
    impl StoragePort for Storage {
        async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;
        async fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
    }
}

mock! {
    pub Favicons {}

    #[async_trait]
    impl FaviconResolver for Favicons {
        async fn resolve(&self, page_url: &Url) -> Result<String, FaviconError>;
    }
}

fn read_only_store(stored: Option<Value>) -> MockStorage {
    let mut storage = MockStorage::new();
    storage
        .expect_get()
        .returning(move |_| Ok(stored.clone()));
    storage
        .expect_set()
        .returning(|_, _| Err(StorageError::Unavailable("disk full".into())));
    storage
}

#[tokio::test]
async fn failed_bookmark_write_keeps_last_known_good_list() {
    let store = SettingsStore::new(Arc::new(read_only_store(None)));
    let mut bookmarks = BookmarkCollection::new(
        store,
        Arc::new(HostFaviconResolver::default()),
        GridSettings::default(),
    );

    let view = bookmarks.load().await.expect("seeding survives a failed write");
    assert_eq!(view.items, vec![Bookmark::seed()]);

    let err = bookmarks
        .add(&NewBookmark::new("Docs", "https://docs.rs"))
        .await
        .unwrap_err();
    assert!(err.is_persistence());
    assert_eq!(bookmarks.bookmarks(), &[Bookmark::seed()]);

    let err = bookmarks.remove(&Bookmark::seed().id).await.unwrap_err();
    assert!(err.is_persistence());
    assert_eq!(bookmarks.bookmarks().len(), 1);
}

#[tokio::test]
async fn failed_read_surfaces_as_error() {
    let mut storage = MockStorage::new();
    storage
        .expect_get()
        .returning(|_| Err(StorageError::Unavailable("offline".into())));
    storage.expect_set().never();

    let mut bookmarks = BookmarkCollection::new(
        SettingsStore::new(Arc::new(storage)),
        Arc::new(HostFaviconResolver::default()),
        GridSettings::default(),
    );
    assert!(bookmarks.load().await.unwrap_err().is_persistence());
    assert!(bookmarks.bookmarks().is_empty());
}

#[tokio::test]
async fn failed_toggle_neither_flips_nor_broadcasts() {
    let bus = Arc::new(StatusBus::new(4));
    let broker = ActivationBroker::new(
        SettingsStore::new(Arc::new(read_only_store(Some(json!(false))))),
        Arc::clone(&bus),
    );

    assert!(broker.toggle().await.unwrap_err().is_persistence());
    assert_eq!(bus.stats().published, 0);
}

#[tokio::test]
async fn favicon_failure_still_adds_the_bookmark() {
    let mut favicons = MockFavicons::new();
    favicons
        .expect_resolve()
        .times(1)
        .returning(|_| Err(FaviconError::Lookup("service down".into())));

    let backend = Arc::new(MemoryStore::new());
    let mut bookmarks = BookmarkCollection::new(
        SettingsStore::new(backend.clone()),
        Arc::new(favicons),
        GridSettings::default(),
    );

    let added = bookmarks
        .add(&NewBookmark::new(" Rust ", " https://www.rust-lang.org "))
        .await
        .expect("add");
    assert_eq!(added.title, "Rust");
    assert_eq!(added.url, "https://www.rust-lang.org");
    assert_eq!(added.favicon, None);

    let stored = backend
        .get("bookmarks")
        .await
        .expect("read")
        .expect("persisted");
    assert_eq!(stored[0]["title"], json!("Rust"));
    assert!(stored[0].get("favicon").is_none());
}

#[tokio::test]
async fn malformed_stored_grid_is_reported() {
    let backend = Arc::new(MemoryStore::new());
    backend
        .set("gridSettings", json!("wide"))
        .await
        .expect("raw write");

    let mut grid = GridSettingsService::new(SettingsStore::new(backend));
    assert!(grid.load().await.unwrap_err().is_persistence());
    assert_eq!(grid.current(), GridSettings::default());
}

#[tokio::test]
async fn quota_rejections_leave_the_store_unchanged() {
    let backend = Arc::new(MemoryStore::with_item_quota(64));
    let mut grid = GridSettingsService::new(SettingsStore::new(backend.clone()));
    grid.set_dimension(GridDimension::Rows, 2)
        .await
        .expect("small write fits");

    let mut bookmarks = BookmarkCollection::new(
        SettingsStore::new(backend.clone()),
        Arc::new(HostFaviconResolver::default()),
        grid.current(),
    );
    let err = bookmarks
        .add(&NewBookmark::new("Long", "https://example.com/a/very/long/path"))
        .await
        .unwrap_err();
    assert!(err.is_persistence());
    assert_eq!(backend.get("bookmarks").await.expect("read"), None);
}

#[tokio::test]
async fn unreadable_preferences_do_not_block_the_bookmark_grid() {
    let backend = Arc::new(MemoryStore::new());
    let saved = vec![
        Bookmark::seed(),
        Bookmark {
            id: BookmarkId::new("docs"),
            title: "Docs".into(),
            url: "https://docs.rs".into(),
            ..Bookmark::seed()
        },
    ];
    backend
        .set("bookmarks", serde_json::to_value(&saved).expect("encode"))
        .await
        .expect("raw write");
    backend.set("size", json!("24")).await.expect("raw write");
    backend.set("settings", json!(7)).await.expect("raw write");

    let runtime = ExtensionRuntime::builder()
        .with_storage(backend.clone())
        .build()
        .expect("runtime");
    let mut page = runtime.new_tab_page();

    let view = page.load().await.expect("bookmarks still load");
    assert_eq!(view.item_count, 2);
    assert_eq!(page.bookmarks().bookmarks().len(), 2);
    assert_eq!(
        page.degraded_preferences(),
        &[StorageKey::Settings, StorageKey::Size]
    );
    assert_eq!(page.icon_size(), IconSize::default());

    page.open_options_panel();
    let view = page.close_options_panel().await.expect("reload in place");
    assert_eq!(view.item_count, 2);

    backend.set("size", json!(30)).await.expect("raw write");
    page.load().await.expect("load");
    assert_eq!(page.degraded_preferences(), &[StorageKey::Settings]);
}

#[tokio::test]
async fn status_reply_survives_unreadable_display_settings() {
    let backend = Arc::new(MemoryStore::new());
    backend.set("isActive", json!(true)).await.expect("raw write");
    backend.set("settings", json!("compact")).await.expect("raw write");

    let runtime = ExtensionRuntime::builder()
        .with_storage(backend)
        .build()
        .expect("runtime");
    let reply =
        dispatch_json(runtime.background.as_ref(), r#"{"action":"get-status"}"#)
            .await;
    let reply: Value = serde_json::from_str(&reply).expect("reply is JSON");

    assert_eq!(reply["success"], json!(true));
    assert_eq!(reply["isActive"], json!(true));
    assert_eq!(reply["settings"]["showIcons"], json!(true));
}
