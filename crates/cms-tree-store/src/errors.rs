//! Error types for the tree store
//!
//! Remote failures are wrapped as-is; the store never retries or recovers
//! them. Unknown menu actions are rejected synchronously by the dispatcher.

use cms_tree_core::{ServiceError, UnknownActionError};
use thiserror::Error;

use crate::config::ConfigError;

/// Result type for tree store operations
pub type Result<T> = std::result::Result<T, TreeStoreError>;

/// Errors that can occur during tree store operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeStoreError {
    /// The remote tree service failed
    #[error("Tree service error: {0}")]
    Service(#[from] ServiceError),

    /// A menu action outside the known vocabulary was dispatched
    #[error(transparent)]
    UnknownAction(#[from] UnknownActionError),

    /// The store configuration is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl TreeStoreError {
    /// Whether the error came from the remote service.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Service(_))
    }
}
