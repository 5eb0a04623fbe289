//! Mock remote tree service
//!
//! In-memory `TreeService` with deterministic behavior:
//! - Child lists seeded per parent key
//! - Every call recorded in order
//! - Per-key failure injection
//! - Gates that hold a `load_children` call until the test releases it

use async_trait::async_trait;
use cms_tree_core::{NodeDto, NodeId, NodeKey, NodeMetadata, ServiceError, TreeService};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::oneshot;

/// A call received by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    /// `get_node(id)`
    GetNode(NodeId),
    /// `load_children(parent)`
    LoadChildren(NodeKey),
}

/// In-memory tree service for tests.
///
/// Clones share state, so a test can keep a handle for assertions after
/// handing the service to the store.
#[derive(Debug, Clone, Default)]
pub struct MockTreeService {
    state: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    children: HashMap<NodeKey, Vec<NodeDto>>,
    metadata: HashMap<NodeId, NodeMetadata>,
    children_failures: HashMap<NodeKey, ServiceError>,
    metadata_failures: HashMap<NodeId, ServiceError>,
    gates: HashMap<NodeKey, PendingGate>,
    calls: Vec<ServiceCall>,
}

#[derive(Debug)]
struct PendingGate {
    reached: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

/// Handle on a held `load_children` call.
#[derive(Debug)]
pub struct FetchGate {
    reached: Option<oneshot::Receiver<()>>,
    release: Option<oneshot::Sender<()>>,
}

impl FetchGate {
    /// Wait until the held fetch has started.
    pub async fn reached(&mut self) {
        if let Some(reached) = self.reached.take() {
            let _ = reached.await;
        }
    }

    /// Let the held fetch complete.
    pub fn release(mut self) {
        if let Some(release) = self.release.take() {
            let _ = release.send(());
        }
    }
}

impl MockTreeService {
    /// Create an empty service (every parent has no children).
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the children of `parent`.
    #[must_use]
    pub fn with_children(self, parent: NodeKey, children: Vec<NodeDto>) -> Self {
        self.set_children(parent, children);
        self
    }

    /// Replace the children of `parent`.
    pub fn set_children(&self, parent: NodeKey, children: Vec<NodeDto>) {
        self.state.lock().children.insert(parent, children);
    }

    /// Override the metadata returned for a node.
    pub fn set_metadata(&self, metadata: NodeMetadata) {
        self.state
            .lock()
            .metadata
            .insert(metadata.id.clone(), metadata);
    }

    /// Make every `load_children(parent)` fail with `error`.
    pub fn fail_children(&self, parent: NodeKey, error: ServiceError) {
        self.state.lock().children_failures.insert(parent, error);
    }

    /// Make every `get_node(id)` fail with `error`.
    pub fn fail_metadata(&self, id: NodeId, error: ServiceError) {
        self.state.lock().metadata_failures.insert(id, error);
    }

    /// Remove injected failures.
    pub fn clear_failures(&self) {
        let mut state = self.state.lock();
        state.children_failures.clear();
        state.metadata_failures.clear();
    }

    /// Hold the next `load_children(parent)` call until the gate is released.
    pub fn hold_children(&self, parent: NodeKey) -> FetchGate {
        let (reached_tx, reached_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        self.state.lock().gates.insert(
            parent,
            PendingGate {
                reached: reached_tx,
                release: release_rx,
            },
        );
        FetchGate {
            reached: Some(reached_rx),
            release: Some(release_tx),
        }
    }

    /// All calls received so far, in order.
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.state.lock().calls.clone()
    }

    /// Parent keys of every `load_children` call, in order.
    pub fn children_requests(&self) -> Vec<NodeKey> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                ServiceCall::LoadChildren(parent) => Some(parent.clone()),
                ServiceCall::GetNode(_) => None,
            })
            .collect()
    }

    /// Number of `load_children(parent)` calls.
    pub fn children_request_count(&self, parent: &NodeKey) -> usize {
        self.children_requests()
            .iter()
            .filter(|requested| *requested == parent)
            .count()
    }

    /// Forget recorded calls.
    pub fn reset_calls(&self) {
        self.state.lock().calls.clear();
    }

    fn derived_metadata(state: &MockState, id: &NodeId) -> Option<NodeMetadata> {
        state
            .children
            .values()
            .flatten()
            .find(|dto| &dto.id == id)
            .map(|dto| NodeMetadata {
                id: dto.id.clone(),
                parent_id: dto.parent_id.clone(),
                has_children: dto.has_children,
            })
    }
}

#[async_trait]
impl TreeService for MockTreeService {
    async fn get_node(&self, id: &NodeId) -> Result<Option<NodeMetadata>, ServiceError> {
        let metadata = {
            let mut state = self.state.lock();
            state.calls.push(ServiceCall::GetNode(id.clone()));
            if let Some(error) = state.metadata_failures.get(id) {
                return Err(error.clone());
            }
            state
                .metadata
                .get(id)
                .cloned()
                .or_else(|| Self::derived_metadata(&state, id))
        };
        tracing::trace!(node_id = %id, found = metadata.is_some(), "mock get_node");
        Ok(metadata)
    }

    async fn load_children(&self, parent: &NodeKey) -> Result<Vec<NodeDto>, ServiceError> {
        let gate = {
            let mut state = self.state.lock();
            state.calls.push(ServiceCall::LoadChildren(parent.clone()));
            state.gates.remove(parent)
        };

        if let Some(gate) = gate {
            let _ = gate.reached.send(());
            let _ = gate.release.await;
        }

        let state = self.state.lock();
        if let Some(error) = state.children_failures.get(parent) {
            return Err(error.clone());
        }
        let children = state.children.get(parent).cloned().unwrap_or_default();
        tracing::trace!(parent = %parent, count = children.len(), "mock load_children");
        Ok(children)
    }
}
