use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    EmptyTitle,
    EmptyUrl,
    InvalidUrl { url: String, reason: String },
    EmptyImageReference,
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::EmptyTitle => write!(f, "bookmark title is empty"),
            ModelError::EmptyUrl => write!(f, "bookmark url is empty"),
            ModelError::InvalidUrl { url, reason } => {
                write!(f, "invalid bookmark url {url:?}: {reason}")
            }
            ModelError::EmptyImageReference => {
                write!(f, "background image reference is empty")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
