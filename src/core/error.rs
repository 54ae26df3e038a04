use thiserror::Error;

use crate::core::types::ElementId;

/// Problems with how a check was set up. None of these are recoverable locally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("No document source: neither the active document nor any link is selected")]
    NoDocumentSource,

    #[error("Duplicate link title: {0}")]
    DuplicateLinkTitle(String),

    #[error("Active document '{0}' is also listed as a link")]
    ActiveDocumentLinked(String),

    #[error("Element {id} appears twice in document '{document}'")]
    DuplicateElementId { document: String, id: ElementId },

    #[error("Element {0} not found in the active document")]
    ElementNotFound(ElementId),

    #[error("Element {0} is not a curve")]
    NotACurve(ElementId),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),
}

#[derive(Error, Debug)]
pub enum TraversabilityError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transaction '{name}' failed: {reason}")]
    Transaction { name: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Settings parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TraversabilityError>;
