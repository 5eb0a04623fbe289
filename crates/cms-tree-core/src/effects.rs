//! Remote Tree Service Effects
//!
//! Interface to the remote data client that fetches node metadata and
//! child lists. The store consumes it through dependency injection and never
//! knows how the data is transported.
//!
//! ## Implementation Requirements
//!
//! - Each call yields a single result
//! - `load_children(&NodeKey::Root)` returns the top-level nodes
//! - Failures are reported as-is; callers neither retry nor swallow them

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::identifiers::{NodeId, NodeKey};
use crate::node::{NodeDto, NodeMetadata};

/// Failure reported by the remote tree service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The request could not be delivered
    #[error("Request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Status {
        /// Status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// The response could not be decoded
    #[error("Parse error: {0}")]
    Decode(String),
}

impl ServiceError {
    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create a status error.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }
}

/// Remote data client for the tree.
#[async_trait]
pub trait TreeService: Send + Sync {
    /// Fetch a node's current metadata; `None` when the node is unknown.
    async fn get_node(&self, id: &NodeId) -> Result<Option<NodeMetadata>, ServiceError>;

    /// Fetch the ordered children of `parent`.
    async fn load_children(&self, parent: &NodeKey) -> Result<Vec<NodeDto>, ServiceError>;
}

#[async_trait]
impl<T: TreeService + ?Sized> TreeService for Arc<T> {
    async fn get_node(&self, id: &NodeId) -> Result<Option<NodeMetadata>, ServiceError> {
        (**self).get_node(id).await
    }

    async fn load_children(&self, parent: &NodeKey) -> Result<Vec<NodeDto>, ServiceError> {
        (**self).load_children(parent).await
    }
}
