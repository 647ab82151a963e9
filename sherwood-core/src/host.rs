//! In-process host surfaces.
//!
//! These back the CLI and the tests: they record what the page would have
//! rendered instead of touching a real document.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use sherwood_contracts::host::{
    IndicatorSurface, NavigationError, Navigator, PresentationSink,
};
use tracing::debug;
use url::Url;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Indicator that remembers its label while mounted.
#[derive(Debug, Default)]
pub struct RecordingIndicator {
    label: Mutex<Option<String>>,
    mounts: Mutex<usize>,
}

impl RecordingIndicator {
    pub fn label(&self) -> Option<String> {
        lock(&self.label).clone()
    }

    /// How many times `mount` was called, replacements included.
    pub fn mount_count(&self) -> usize {
        *lock(&self.mounts)
    }
}

impl IndicatorSurface for RecordingIndicator {
    fn mount(&self, label: &str) {
        *lock(&self.label) = Some(label.to_string());
        *lock(&self.mounts) += 1;
        debug!(label, "indicator mounted");
    }

    fn unmount(&self) {
        if lock(&self.label).take().is_some() {
            debug!("indicator unmounted");
        }
    }

    fn is_mounted(&self) -> bool {
        lock(&self.label).is_some()
    }
}

/// Document style variables kept in a sorted map.
#[derive(Debug, Default)]
pub struct StyleVariables {
    values: Mutex<BTreeMap<String, String>>,
}

impl StyleVariables {
    pub fn get(&self, name: &str) -> Option<String> {
        lock(&self.values).get(name).cloned()
    }

    pub fn snapshot(&self) -> BTreeMap<String, String> {
        lock(&self.values).clone()
    }
}

impl PresentationSink for StyleVariables {
    fn set_variable(&self, name: &str, value: &str) {
        lock(&self.values).insert(name.to_string(), value.to_string());
    }
}

/// Navigator that records every destination. Only `http`, `https` and
/// `file` urls are accepted, mirroring what a tab may be sent to.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<Url>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<Url> {
        lock(&self.visited).clone()
    }

    pub fn last(&self) -> Option<Url> {
        lock(&self.visited).last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &Url) -> Result<(), NavigationError> {
        match url.scheme() {
            "http" | "https" | "file" => {
                lock(&self.visited).push(url.clone());
                Ok(())
            }
            other => Err(NavigationError::Refused {
                url: url.to_string(),
                reason: format!("scheme `{other}` cannot be opened in a tab"),
            }),
        }
    }
}
