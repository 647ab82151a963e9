use std::sync::Arc;

use async_trait::async_trait;
use sherwood_contracts::messaging::{ContextKind, MessageEndpoint};
use sherwood_model::{
    DisplaySettings, ExtensionRequest, ExtensionResponse, InstallReason,
    StorageKey,
};
use tracing::{debug, error, warn};

use crate::activation::ActivationBroker;
use crate::error::Result;
use crate::storage::SettingsStore;

/// The long-lived context that owns activation and answers status queries.
#[derive(Debug, Clone)]
pub struct BackgroundService {
    broker: Arc<ActivationBroker>,
    store: SettingsStore,
}

impl BackgroundService {
    pub fn new(broker: Arc<ActivationBroker>, store: SettingsStore) -> Self {
        Self { broker, store }
    }

    pub fn broker(&self) -> &Arc<ActivationBroker> {
        &self.broker
    }

    pub async fn on_installed(&self, reason: InstallReason) -> Result<()> {
        self.broker.seed_on_install(reason).await.map(|_| ())
    }

    async fn toggle(&self) -> ExtensionResponse {
        match self.broker.toggle().await {
            Ok(state) => ExtensionResponse::toggled(state),
            Err(err) => {
                error!(%err, "toggle-active failed");
                ExtensionResponse::failure(format!(
                    "failed to change activation: {err}"
                ))
            }
        }
    }

    async fn status(&self) -> ExtensionResponse {
        let state = match self.broker.query().await {
            Ok(state) => state,
            Err(err) => {
                return ExtensionResponse::failure(format!(
                    "failed to read status: {err}"
                ));
            }
        };

        let settings = self
            .store
            .get(StorageKey::Settings, DisplaySettings::default())
            .await
            .unwrap_or_else(|err| {
                warn!(%err, "get-status answering with default display settings");
                DisplaySettings::default()
            });

        ExtensionResponse::status(state, settings)
    }
}

#[async_trait]
impl MessageEndpoint for BackgroundService {
    fn context(&self) -> ContextKind {
        ContextKind::Background
    }

    async fn handle(&self, request: ExtensionRequest) -> ExtensionResponse {
        debug!(action = request.action(), "background received request");
        match request {
            ExtensionRequest::ToggleActive => self.toggle().await,
            ExtensionRequest::GetStatus => self.status().await,
            other => {
                warn!(action = other.action(), "background ignores action");
                ExtensionResponse::unknown_action()
            }
        }
    }
}
