use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use sherwood_contracts::host::IndicatorSurface;
use sherwood_contracts::messaging::{ContextKind, MessageEndpoint};
use sherwood_model::{
    ActivationState, ExtensionRequest, ExtensionResponse,
};
use tracing::{debug, info, warn};

pub const INDICATOR_LABEL: &str = "Sherwood active";

/// Script injected into every page. Shows an indicator while the extension
/// is active.
pub struct ContentScript {
    background: Arc<dyn MessageEndpoint>,
    indicator: Arc<dyn IndicatorSurface>,
    active: AtomicBool,
}

impl fmt::Debug for ContentScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentScript")
            .field("active", &self.active.load(Ordering::Relaxed))
            .field("indicator", &type_name_of_val(self.indicator.as_ref()))
            .finish()
    }
}

impl ContentScript {
    pub fn new(
        background: Arc<dyn MessageEndpoint>,
        indicator: Arc<dyn IndicatorSurface>,
    ) -> Self {
        Self {
            background,
            indicator,
            active: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> ActivationState {
        ActivationState::from(self.active.load(Ordering::Acquire))
    }

    /// Asks the background for the current flag and mounts the indicator if
    /// the extension is already active. A failed reply leaves the script
    /// inactive.
    pub async fn initialize(&self) -> ActivationState {
        let response = self.background.handle(ExtensionRequest::GetStatus).await;
        match response.activation() {
            Some(state) => self.apply(state),
            None => {
                warn!(error = ?response.error, "status query failed; staying inactive");
            }
        }
        self.state()
    }

    fn apply(&self, state: ActivationState) {
        self.active.store(state.is_active(), Ordering::Release);
        if state.is_active() {
            self.indicator.mount(INDICATOR_LABEL);
            info!("page features activated");
        } else {
            self.indicator.unmount();
            info!("page features deactivated");
        }
    }
}

#[async_trait]
impl MessageEndpoint for ContentScript {
    fn context(&self) -> ContextKind {
        ContextKind::ContentScript
    }

    async fn handle(&self, request: ExtensionRequest) -> ExtensionResponse {
        match request {
            ExtensionRequest::StatusChanged { is_active } => {
                self.apply(ActivationState::from(is_active));
                ExtensionResponse::ack()
            }
            other => {
                debug!(action = other.action(), "content script ignores action");
                ExtensionResponse::unknown_action()
            }
        }
    }
}
