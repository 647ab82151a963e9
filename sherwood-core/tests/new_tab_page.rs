use std::sync::Arc;

use sherwood_core::application::ExtensionRuntime;
use sherwood_core::host::{RecordingNavigator, StyleVariables};
use sherwood_core::settings::DisplaySettingsService;
use sherwood_core::storage::MemoryStore;
use sherwood_model::{
    Bookmark, BookmarkId, DisplayToggle, GridDimension, NewBookmark,
};
use url::Url;

struct Harness {
    runtime: ExtensionRuntime,
    styles: Arc<StyleVariables>,
    navigator: Arc<RecordingNavigator>,
}

fn harness() -> Harness {
    let styles = Arc::new(StyleVariables::default());
    let navigator = Arc::new(RecordingNavigator::default());
    let runtime = ExtensionRuntime::builder()
        .with_storage(Arc::new(MemoryStore::new()))
        .with_presentation(styles.clone())
        .with_navigator(navigator.clone())
        .build()
        .expect("runtime");
    Harness {
        runtime,
        styles,
        navigator,
    }
}

#[tokio::test]
async fn first_load_seeds_and_reflects_defaults() {
    let h = harness();
    let mut page = h.runtime.new_tab_page();

    let view = page.load().await.expect("load");
    assert_eq!(view.items, vec![Bookmark::seed()]);
    assert_eq!(view.capacity, 12);
    assert_eq!(h.styles.get("--em").as_deref(), Some("20px"));
    assert_eq!(h.styles.get("--background-image"), None);
    assert!(page.display_settings().show_add_button);
}

#[tokio::test]
async fn opening_a_bookmark_navigates_the_tab() {
    let h = harness();
    let mut page = h.runtime.new_tab_page();
    page.load().await.expect("load");

    let url = page
        .open_bookmark(&BookmarkId::from("1"))
        .expect("open seed");
    assert_eq!(url, Url::parse("https://coff.ee/starlight.space").unwrap());
    assert_eq!(h.navigator.last(), Some(url));

    let err = page.open_bookmark(&BookmarkId::from("nope")).unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn grid_changes_repaginate_the_view() {
    let h = harness();
    let mut page = h.runtime.new_tab_page();
    page.load().await.expect("load");
    for n in 0..6 {
        page.add_bookmark(&NewBookmark::new(
            format!("Site {n}"),
            format!("https://site{n}.example"),
        ))
        .await
        .expect("add");
    }

    let view = page
        .set_grid_dimension(GridDimension::Columns, 1)
        .await
        .expect("columns");
    assert_eq!(page.grid().columns, 3);
    assert_eq!(view.capacity, 9);
    assert_eq!(view.total_pages, 1);

    let view = page
        .set_grid_dimension(GridDimension::Rows, 1)
        .await
        .expect("rows");
    assert_eq!(view.capacity, 3);
    assert_eq!(view.total_pages, 3);
    assert_eq!(view.item_count, 7);
}

#[tokio::test]
async fn closing_the_options_panel_picks_up_outside_edits() {
    let h = harness();
    let mut page = h.runtime.new_tab_page();
    page.load().await.expect("load");
    page.open_options_panel();

    let mut elsewhere = DisplaySettingsService::new(h.runtime.store.clone());
    elsewhere.load().await.expect("load elsewhere");
    elsewhere
        .set_toggle(DisplayToggle::ShowUrls, false)
        .await
        .expect("toggle elsewhere");
    assert!(page.display_settings().show_urls);

    page.close_options_panel().await.expect("close");
    assert!(!page.is_options_open());
    assert!(!page.display_settings().show_urls);
}

#[tokio::test]
async fn background_and_icon_size_are_reflected() {
    let h = harness();
    let mut page = h.runtime.new_tab_page();
    page.load().await.expect("load");

    page.set_background_image("https://images.example/pines.jpg")
        .await
        .expect("background");
    page.set_icon_size(4).await.expect("size");

    assert_eq!(
        h.styles.get("--background-image").as_deref(),
        Some("url(https://images.example/pines.jpg)")
    );
    assert_eq!(h.styles.get("--em").as_deref(), Some("10px"));

    let mut reopened = h.runtime.new_tab_page();
    reopened.load().await.expect("reload");
    assert_eq!(
        reopened.background_image(),
        Some("https://images.example/pines.jpg")
    );
    assert_eq!(reopened.icon_size().px(), 10);
}
