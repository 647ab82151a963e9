use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use sherwood_contracts::messaging::{ContextKind, MessageEndpoint};
use sherwood_model::{ActivationState, ExtensionRequest, ExtensionResponse};
use tracing::{debug, warn};

use crate::error::{Result, SherwoodError};

/// Toolbar popup: shows the activation flag and flips it on request.
pub struct PopupController {
    background: Arc<dyn MessageEndpoint>,
    active: AtomicBool,
}

impl fmt::Debug for PopupController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopupController")
            .field("active", &self.active.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl PopupController {
    pub fn new(background: Arc<dyn MessageEndpoint>) -> Self {
        Self {
            background,
            active: AtomicBool::new(false),
        }
    }

    /// Cached flag; call [`refresh`](Self::refresh) to resynchronize.
    pub fn state(&self) -> ActivationState {
        ActivationState::from(self.active.load(Ordering::Acquire))
    }

    pub async fn refresh(&self) -> Result<ActivationState> {
        self.request(ExtensionRequest::GetStatus).await
    }

    pub async fn toggle(&self) -> Result<ActivationState> {
        self.request(ExtensionRequest::ToggleActive).await
    }

    async fn request(&self, request: ExtensionRequest) -> Result<ActivationState> {
        let response = self.background.handle(request).await;
        let Some(state) = response.activation() else {
            let reason = response
                .error
                .unwrap_or_else(|| "reply carried no activation flag".into());
            warn!(action = request.action(), %reason, "popup request failed");
            return Err(SherwoodError::Transport(reason));
        };
        self.active.store(state.is_active(), Ordering::Release);
        Ok(state)
    }
}

#[async_trait]
impl MessageEndpoint for PopupController {
    fn context(&self) -> ContextKind {
        ContextKind::Popup
    }

    async fn handle(&self, request: ExtensionRequest) -> ExtensionResponse {
        match request {
            ExtensionRequest::StatusChanged { is_active } => {
                self.active.store(is_active, Ordering::Release);
                debug!(is_active, "popup cache updated");
                ExtensionResponse::ack()
            }
            _ => ExtensionResponse::unknown_action(),
        }
    }
}
