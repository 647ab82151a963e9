//! Composition root wiring one storage port to every context.

use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;

use sherwood_contracts::favicon::FaviconResolver;
use sherwood_contracts::host::{IndicatorSurface, Navigator, PresentationSink};
use sherwood_contracts::messaging::MessageEndpoint;
use sherwood_contracts::storage::StoragePort;
use tokio::task::JoinHandle;

use crate::activation::{
    ActivationBroker, DEFAULT_STATUS_CHANNEL_CAPACITY, StatusBus,
};
use crate::contexts::{
    BackgroundService, ContentScript, NewTabPage, PopupController,
    spawn_status_listener,
};
use crate::favicon::HostFaviconResolver;
use crate::host::{RecordingIndicator, RecordingNavigator, StyleVariables};
use crate::storage::SettingsStore;

/// Shared handles for one running extension instance.
#[derive(Clone)]
pub struct ExtensionRuntime {
    pub store: SettingsStore,
    pub bus: Arc<StatusBus>,
    pub broker: Arc<ActivationBroker>,
    pub background: Arc<BackgroundService>,
    pub favicons: Arc<dyn FaviconResolver>,
    pub presentation: Arc<dyn PresentationSink>,
    pub navigator: Arc<dyn Navigator>,
    pub indicator: Arc<dyn IndicatorSurface>,
}

impl fmt::Debug for ExtensionRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRuntime")
            .field("store", &self.store)
            .field("bus", &self.bus)
            .field("favicons", &type_name_of_val(self.favicons.as_ref()))
            .field(
                "presentation",
                &type_name_of_val(self.presentation.as_ref()),
            )
            .field("navigator", &type_name_of_val(self.navigator.as_ref()))
            .field("indicator", &type_name_of_val(self.indicator.as_ref()))
            .finish()
    }
}

impl ExtensionRuntime {
    pub fn builder() -> ExtensionRuntimeBuilder {
        ExtensionRuntimeBuilder::new()
    }

    pub fn content_script(&self) -> Arc<ContentScript> {
        Arc::new(ContentScript::new(
            self.background.clone(),
            Arc::clone(&self.indicator),
        ))
    }

    pub fn popup(&self) -> Arc<PopupController> {
        Arc::new(PopupController::new(self.background.clone()))
    }

    pub fn new_tab_page(&self) -> NewTabPage {
        NewTabPage::new(
            self.store.clone(),
            Arc::clone(&self.favicons),
            Arc::clone(&self.presentation),
            Arc::clone(&self.navigator),
        )
    }

    /// Subscribes `endpoint` to status changes on a background task.
    pub fn attach(&self, endpoint: Arc<dyn MessageEndpoint>) -> JoinHandle<()> {
        let subscription = self.bus.subscribe(endpoint.context());
        spawn_status_listener(subscription, endpoint)
    }
}

#[derive(Default)]
pub struct ExtensionRuntimeBuilder {
    storage: Option<Arc<dyn StoragePort>>,
    favicons: Option<Arc<dyn FaviconResolver>>,
    presentation: Option<Arc<dyn PresentationSink>>,
    navigator: Option<Arc<dyn Navigator>>,
    indicator: Option<Arc<dyn IndicatorSurface>>,
    status_capacity: Option<usize>,
}

impl fmt::Debug for ExtensionRuntimeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRuntimeBuilder")
            .field("storage", &self.storage.is_some())
            .field("favicons", &self.favicons.is_some())
            .field("presentation", &self.presentation.is_some())
            .field("navigator", &self.navigator.is_some())
            .field("indicator", &self.indicator.is_some())
            .field("status_capacity", &self.status_capacity)
            .finish()
    }
}

impl ExtensionRuntimeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_storage(mut self, port: Arc<dyn StoragePort>) -> Self {
        self.storage = Some(port);
        self
    }
    pub fn with_favicons(mut self, resolver: Arc<dyn FaviconResolver>) -> Self {
        self.favicons = Some(resolver);
        self
    }
    pub fn with_presentation(
        mut self,
        sink: Arc<dyn PresentationSink>,
    ) -> Self {
        self.presentation = Some(sink);
        self
    }
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }
    pub fn with_indicator(
        mut self,
        indicator: Arc<dyn IndicatorSurface>,
    ) -> Self {
        self.indicator = Some(indicator);
        self
    }
    pub fn with_status_capacity(mut self, capacity: usize) -> Self {
        self.status_capacity = Some(capacity);
        self
    }

    /// Storage is the only required port; host surfaces fall back to the
    /// in-process recorders.
    pub fn build(self) -> Result<ExtensionRuntime, String> {
        let port = self
            .storage
            .ok_or_else(|| "missing StoragePort".to_string())?;
        let capacity = self
            .status_capacity
            .unwrap_or(DEFAULT_STATUS_CHANNEL_CAPACITY);
        if capacity == 0 {
            return Err("status channel capacity must be positive".to_string());
        }

        let store = SettingsStore::new(port);
        let bus = Arc::new(StatusBus::new(capacity));
        let broker =
            Arc::new(ActivationBroker::new(store.clone(), Arc::clone(&bus)));
        let background = Arc::new(BackgroundService::new(
            Arc::clone(&broker),
            store.clone(),
        ));

        Ok(ExtensionRuntime {
            store,
            bus,
            broker,
            background,
            favicons: self
                .favicons
                .unwrap_or_else(|| Arc::new(HostFaviconResolver::default())),
            presentation: self
                .presentation
                .unwrap_or_else(|| Arc::new(StyleVariables::default())),
            navigator: self
                .navigator
                .unwrap_or_else(|| Arc::new(RecordingNavigator::default())),
            indicator: self
                .indicator
                .unwrap_or_else(|| Arc::new(RecordingIndicator::default())),
        })
    }
}
