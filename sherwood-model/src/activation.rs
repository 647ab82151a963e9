use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Extension-wide activation flag, persisted as the boolean `isActive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "bool", into = "bool"))]
pub enum ActivationState {
    #[default]
    Inactive,
    Active,
}

impl ActivationState {
    pub fn is_active(self) -> bool {
        matches!(self, ActivationState::Active)
    }

    pub fn toggled(self) -> Self {
        match self {
            ActivationState::Inactive => ActivationState::Active,
            ActivationState::Active => ActivationState::Inactive,
        }
    }
}

impl From<bool> for ActivationState {
    fn from(value: bool) -> Self {
        if value {
            ActivationState::Active
        } else {
            ActivationState::Inactive
        }
    }
}

impl From<ActivationState> for bool {
    fn from(value: ActivationState) -> Self {
        value.is_active()
    }
}

impl fmt::Display for ActivationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivationState::Inactive => f.write_str("inactive"),
            ActivationState::Active => f.write_str("active"),
        }
    }
}

/// Why the background context is being initialised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InstallReason {
    Install,
    Update,
}
