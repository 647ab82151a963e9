use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;

use sherwood_contracts::host::PresentationSink;
use sherwood_model::{ModelError, StorageKey};
use tracing::{error, info};

use crate::error::Result;
use crate::storage::SettingsStore;

pub const BACKGROUND_IMAGE_VARIABLE: &str = "--background-image";

/// Stores the chosen background (a url or a data-url) and mirrors it into
/// the page's `--background-image` variable.
pub struct BackgroundImagePolicy {
    store: SettingsStore,
    sink: Arc<dyn PresentationSink>,
    current: Option<String>,
}

impl fmt::Debug for BackgroundImagePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackgroundImagePolicy")
            .field("has_image", &self.current.is_some())
            .field("sink", &type_name_of_val(self.sink.as_ref()))
            .finish()
    }
}

impl BackgroundImagePolicy {
    pub fn new(store: SettingsStore, sink: Arc<dyn PresentationSink>) -> Self {
        Self {
            store,
            sink,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Reads the stored reference and reflects it. Nothing is reflected when
    /// no image was ever chosen.
    pub async fn load(&mut self) -> Result<Option<String>> {
        let stored: Option<String> = self
            .store
            .get_optional(StorageKey::BackgroundImage)
            .await
            .inspect_err(|err| error!(%err, "failed to load background image"))?;

        self.current = stored.filter(|reference| !reference.trim().is_empty());
        if let Some(reference) = &self.current {
            self.reflect(reference);
        }
        Ok(self.current.clone())
    }

    pub async fn set(&mut self, image_ref: &str) -> Result<()> {
        let reference = image_ref.trim();
        if reference.is_empty() {
            return Err(ModelError::EmptyImageReference.into());
        }

        self.store
            .set(StorageKey::BackgroundImage, reference)
            .await
            .inspect_err(|err| error!(%err, "failed to save background image"))?;

        self.reflect(reference);
        self.current = Some(reference.to_string());
        info!(bytes = reference.len(), "background image updated");
        Ok(())
    }

    fn reflect(&self, reference: &str) {
        self.sink
            .set_variable(BACKGROUND_IMAGE_VARIABLE, &css_url(reference));
    }
}

fn css_url(reference: &str) -> String {
    format!("url({reference})")
}
