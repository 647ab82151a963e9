//! Cross-context message contract.
//!
//! Requests are tagged by `action`; responses always carry `success` and
//! optionally the activation flag, the display settings, or an error
//! string. Field names match the JSON the contexts exchange.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::activation::ActivationState;
use crate::settings::DisplaySettings;

pub const UNKNOWN_ACTION_ERROR: &str = "unknown action";

/// A message sent from one execution context to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "action", rename_all = "kebab-case")
)]
pub enum ExtensionRequest {
    ToggleActive,
    GetStatus,
    StatusChanged {
        #[cfg_attr(feature = "serde", serde(rename = "isActive"))]
        is_active: bool,
    },
}

impl ExtensionRequest {
    pub fn action(&self) -> &'static str {
        match self {
            ExtensionRequest::ToggleActive => "toggle-active",
            ExtensionRequest::GetStatus => "get-status",
            ExtensionRequest::StatusChanged { .. } => "status-changed",
        }
    }

    pub fn status_changed(state: ActivationState) -> Self {
        ExtensionRequest::StatusChanged {
            is_active: state.is_active(),
        }
    }
}

/// Reply to an [`ExtensionRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ExtensionResponse {
    pub success: bool,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub is_active: Option<bool>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub settings: Option<DisplaySettings>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub error: Option<String>,
}

impl ExtensionResponse {
    /// Bare acknowledgment.
    pub fn ack() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn toggled(state: ActivationState) -> Self {
        Self {
            success: true,
            is_active: Some(state.is_active()),
            ..Self::default()
        }
    }

    pub fn status(state: ActivationState, settings: DisplaySettings) -> Self {
        Self {
            success: true,
            is_active: Some(state.is_active()),
            settings: Some(settings),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn unknown_action() -> Self {
        Self::failure(UNKNOWN_ACTION_ERROR)
    }

    /// Activation flag carried by a successful reply.
    pub fn activation(&self) -> Option<ActivationState> {
        if self.success {
            self.is_active.map(ActivationState::from)
        } else {
            None
        }
    }
}
