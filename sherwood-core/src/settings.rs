//! Persisted user preferences backing the options panel.
//!
//! Each service caches the last-known-good value. Updates are written to the
//! store first and only then replace the cache, so a failed write leaves the
//! cache untouched.

use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;

use sherwood_contracts::host::PresentationSink;
use sherwood_model::{
    DisplaySettings, DisplayToggle, GridDimension, GridSettings, IconSize,
    StorageKey,
};
use tracing::{debug, error, info};

use crate::error::Result;
use crate::storage::SettingsStore;

/// Presentation variable carrying the grid's base size.
pub const ICON_SIZE_VARIABLE: &str = "--em";

#[derive(Debug, Clone)]
pub struct DisplaySettingsService {
    store: SettingsStore,
    current: DisplaySettings,
}

impl DisplaySettingsService {
    pub fn new(store: SettingsStore) -> Self {
        Self {
            store,
            current: DisplaySettings::default(),
        }
    }

    pub fn current(&self) -> &DisplaySettings {
        &self.current
    }

    /// Reads the stored record merged over the defaults.
    pub async fn load(&mut self) -> Result<DisplaySettings> {
        let settings = self
            .store
            .get(StorageKey::Settings, DisplaySettings::default())
            .await
            .inspect_err(|err| error!(%err, "failed to load display settings"))?;
        self.current = settings.clone();
        Ok(settings)
    }

    pub async fn update(&mut self, settings: DisplaySettings) -> Result<()> {
        self.store
            .set(StorageKey::Settings, &settings)
            .await
            .inspect_err(|err| error!(%err, "failed to save display settings"))?;
        debug!(?settings, "display settings saved");
        self.current = settings;
        Ok(())
    }

    pub async fn set_toggle(
        &mut self,
        toggle: DisplayToggle,
        value: bool,
    ) -> Result<DisplaySettings> {
        let updated = self.current.clone().with_toggle(toggle, value);
        self.update(updated.clone()).await?;
        info!(toggle = toggle.as_str(), value, "display toggle changed");
        Ok(updated)
    }
}

#[derive(Debug, Clone)]
pub struct GridSettingsService {
    store: SettingsStore,
    current: GridSettings,
}

impl GridSettingsService {
    pub fn new(store: SettingsStore) -> Self {
        Self {
            store,
            current: GridSettings::default(),
        }
    }

    pub fn current(&self) -> GridSettings {
        self.current
    }

    /// Stored grid with out-of-range dimensions clamped.
    pub async fn load(&mut self) -> Result<GridSettings> {
        let grid = self
            .store
            .get(StorageKey::GridSettings, GridSettings::default())
            .await
            .inspect_err(|err| error!(%err, "failed to load grid settings"))?
            .sanitized();
        self.current = grid;
        Ok(grid)
    }

    pub async fn update(&mut self, grid: GridSettings) -> Result<GridSettings> {
        let grid = grid.sanitized();
        self.store
            .set(StorageKey::GridSettings, &grid)
            .await
            .inspect_err(|err| error!(%err, ?grid, "failed to save grid settings"))?;
        info!(columns = grid.columns, rows = grid.rows, gap = grid.gap, "grid updated");
        self.current = grid;
        Ok(grid)
    }

    pub async fn set_dimension(
        &mut self,
        dimension: GridDimension,
        value: u32,
    ) -> Result<GridSettings> {
        self.update(self.current.with_dimension(dimension, value))
            .await
    }
}

pub struct IconSizePreference {
    store: SettingsStore,
    sink: Arc<dyn PresentationSink>,
    current: IconSize,
}

impl fmt::Debug for IconSizePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconSizePreference")
            .field("current", &self.current)
            .field("sink", &type_name_of_val(self.sink.as_ref()))
            .finish()
    }
}

impl IconSizePreference {
    pub fn new(store: SettingsStore, sink: Arc<dyn PresentationSink>) -> Self {
        Self {
            store,
            sink,
            current: IconSize::default(),
        }
    }

    pub fn current(&self) -> IconSize {
        self.current
    }

    pub async fn load(&mut self) -> Result<IconSize> {
        let stored: u32 = self
            .store
            .get(StorageKey::Size, IconSize::default().px())
            .await
            .inspect_err(|err| error!(%err, "failed to load icon size"))?;
        self.current = IconSize::clamped(stored);
        self.reflect();
        Ok(self.current)
    }

    /// Persists `px` clamped to the allowed range and reflects it.
    pub async fn set(&mut self, px: u32) -> Result<IconSize> {
        let size = IconSize::clamped(px);
        self.store
            .set(StorageKey::Size, &size)
            .await
            .inspect_err(|err| error!(%err, px = size.px(), "failed to save icon size"))?;
        self.current = size;
        self.reflect();
        debug!(px = size.px(), "icon size changed");
        Ok(size)
    }

    fn reflect(&self) {
        self.sink
            .set_variable(ICON_SIZE_VARIABLE, &self.current.css_length());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StyleVariables;
    use crate::storage::MemoryStore;
    use serde_json::json;
    use sherwood_contracts::storage::StoragePort;

    fn backend() -> (SettingsStore, Arc<MemoryStore>) {
        let backend = Arc::new(MemoryStore::new());
        (SettingsStore::new(backend.clone()), backend)
    }

    #[tokio::test]
    async fn display_settings_merge_missing_fields() {
        let (store, backend) = backend();
        backend
            .set("settings", json!({ "showUrls": false, "someFutureFlag": 1 }))
            .await
            .expect("raw write");

        let mut service = DisplaySettingsService::new(store);
        let settings = service.load().await.expect("load");
        assert!(!settings.show_urls);
        assert!(settings.show_icons);
        assert_eq!(settings.background_image, "");
    }

    #[tokio::test]
    async fn toggle_replaces_a_single_flag() {
        let (store, backend) = backend();
        let mut service = DisplaySettingsService::new(store);
        service.load().await.expect("load");

        let updated = service
            .set_toggle(DisplayToggle::ShowTitles, false)
            .await
            .expect("toggle");
        assert_eq!(
            updated,
            DisplaySettings::default().with_toggle(DisplayToggle::ShowTitles, false)
        );
        let raw = backend.get("settings").await.expect("read").expect("stored");
        assert_eq!(raw["showTitles"], json!(false));
        assert_eq!(raw["showIcons"], json!(true));
    }

    #[tokio::test]
    async fn stored_grid_is_clamped_on_load() {
        let (store, backend) = backend();
        backend
            .set("gridSettings", json!({ "columns": 42, "rows": 0, "gap": 2 }))
            .await
            .expect("raw write");

        let mut service = GridSettingsService::new(store);
        let grid = service.load().await.expect("load");
        assert_eq!(grid, GridSettings { columns: 10, rows: 1, gap: 2 });
    }

    #[tokio::test]
    async fn grid_dimension_updates_are_clamped_and_persisted() {
        let (store, backend) = backend();
        let mut service = GridSettingsService::new(store);

        let grid = service
            .set_dimension(GridDimension::Columns, 2)
            .await
            .expect("set columns");
        assert_eq!(grid.columns, 3);
        assert_eq!(
            backend.get("gridSettings").await.expect("read"),
            Some(json!({ "columns": 3, "rows": 3, "gap": 1 }))
        );
    }

    #[tokio::test]
    async fn icon_size_is_clamped_and_reflected() {
        let (store, backend) = backend();
        let sink = Arc::new(StyleVariables::default());
        let mut size = IconSizePreference::new(store, sink.clone());

        assert_eq!(size.load().await.expect("load").px(), 20);
        assert_eq!(sink.get("--em").as_deref(), Some("20px"));

        assert_eq!(size.set(80).await.expect("set").px(), 50);
        assert_eq!(sink.get("--em").as_deref(), Some("50px"));
        assert_eq!(backend.get("size").await.expect("read"), Some(json!(50)));
    }
}
