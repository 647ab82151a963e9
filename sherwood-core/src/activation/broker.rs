use std::fmt;
use std::sync::Arc;

use sherwood_model::{
    ActivationState, DisplaySettings, InstallReason, StorageKey,
};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use super::bus::StatusBus;
use crate::error::Result;
use crate::storage::SettingsStore;

/// Owns the persisted activation flag and announces every change.
///
/// Toggles from this process run one at a time behind `gate`, so two
/// concurrent toggles always observe each other's write.
pub struct ActivationBroker {
    store: SettingsStore,
    bus: Arc<StatusBus>,
    gate: Mutex<()>,
}

impl fmt::Debug for ActivationBroker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivationBroker")
            .field("store", &self.store)
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}

impl ActivationBroker {
    pub fn new(store: SettingsStore, bus: Arc<StatusBus>) -> Self {
        Self {
            store,
            bus,
            gate: Mutex::new(()),
        }
    }

    pub fn bus(&self) -> &Arc<StatusBus> {
        &self.bus
    }

    /// Last persisted state; inactive when nothing was ever written.
    pub async fn query(&self) -> Result<ActivationState> {
        self.store
            .get(StorageKey::IsActive, ActivationState::Inactive)
            .await
            .inspect_err(|err| error!(%err, "failed to read activation flag"))
    }

    /// Flips the flag, persists it and broadcasts the new state.
    pub async fn toggle(&self) -> Result<ActivationState> {
        let _guard = self.gate.lock().await;
        let next = self.query().await?.toggled();
        self.write(next).await?;
        info!(state = %next, "activation toggled");
        self.bus.publish(next);
        Ok(next)
    }

    /// Persists `state`, broadcasting only when it differs from the stored
    /// value.
    pub async fn set(&self, state: ActivationState) -> Result<ActivationState> {
        let _guard = self.gate.lock().await;
        let previous = self.query().await?;
        self.replace(Some(previous), state).await?;
        Ok(state)
    }

    /// First-run and update initialisation.
    ///
    /// A fresh install writes the inactive flag and seeds display settings
    /// if none exist. An update keeps whatever flag is stored.
    pub async fn seed_on_install(
        &self,
        reason: InstallReason,
    ) -> Result<ActivationState> {
        match reason {
            InstallReason::Install => {
                let state = ActivationState::Inactive;
                {
                    let _guard = self.gate.lock().await;
                    // An unreadable flag is overwritten and announced.
                    let previous = self.query().await.ok();
                    self.replace(previous, state).await?;
                }
                self.seed_display_settings().await;
                info!("extension installed; activation reset to inactive");
                Ok(state)
            }
            InstallReason::Update => {
                let state = self.query().await?;
                info!(state = %state, "extension updated; activation kept");
                Ok(state)
            }
        }
    }

    /// Writes `state` and publishes it unless `previous` already matched.
    /// Callers hold `gate`.
    async fn replace(
        &self,
        previous: Option<ActivationState>,
        state: ActivationState,
    ) -> Result<()> {
        self.write(state).await?;
        if previous != Some(state) {
            info!(state = %state, "activation changed");
            self.bus.publish(state);
        }
        Ok(())
    }

    async fn seed_display_settings(&self) {
        let existing = self
            .store
            .get_optional::<DisplaySettings>(StorageKey::Settings)
            .await;
        match existing {
            Ok(Some(_)) => {}
            Ok(None) => {
                if let Err(err) = self
                    .store
                    .set(StorageKey::Settings, &DisplaySettings::default())
                    .await
                {
                    warn!(%err, "failed to seed display settings");
                }
            }
            Err(err) => {
                warn!(%err, "stored display settings unreadable; left as is");
            }
        }
    }

    async fn write(&self, state: ActivationState) -> Result<()> {
        self.store
            .set(StorageKey::IsActive, &state)
            .await
            .inspect_err(|err| {
                error!(%err, state = %state, "failed to persist activation flag")
            })
    }
}
