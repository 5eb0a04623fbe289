//! # Tree Store
//!
//! Owns the node cache, the current selection and the broadcast channels,
//! and talks to the remote [`TreeService`].
//!
//! ## Flow
//!
//! ```text
//! load_nodes(k) ── cached? ──yes──► publish cache[k] on channel k
//!                      │
//!                      no ──► service.load_children(k) ──► cache[k] ──► publish
//! ```
//!
//! State sits behind a `parking_lot::Mutex` that is only held between
//! awaits, so fetches for unrelated parents interleave freely.

use cms_tree_core::{NodeKey, ServiceError, TreeNode, TreeService};
use parking_lot::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use crate::cache::NodeCache;
use crate::channels::{ChildrenChannels, ChildrenSubscription, TreeEventBus, TreeEventStream};
use crate::config::TreeStoreConfig;
use crate::errors::Result;

#[derive(Debug, Default)]
pub(crate) struct TreeState {
    pub(crate) cache: NodeCache,
    pub(crate) selected: Option<TreeNode>,
}

/// Client-side state manager for one tree widget.
pub struct TreeStore {
    pub(crate) service: Arc<dyn TreeService>,
    pub(crate) config: TreeStoreConfig,
    pub(crate) state: Mutex<TreeState>,
    pub(crate) children: ChildrenChannels,
    pub(crate) events: TreeEventBus,
    /// Bumped on every distinct selection; lets ancestor walks detect
    /// that they have been superseded.
    pub(crate) walk_generation: AtomicU64,
}

impl std::fmt::Debug for TreeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeStore")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

impl TreeStore {
    /// Create a store with the default configuration.
    pub fn new(service: Arc<dyn TreeService>) -> Self {
        Self::build(service, TreeStoreConfig::default())
    }

    /// Create a store with a validated configuration.
    pub fn with_config(service: Arc<dyn TreeService>, config: TreeStoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(service, config))
    }

    fn build(service: Arc<dyn TreeService>, config: TreeStoreConfig) -> Self {
        Self {
            service,
            children: ChildrenChannels::new(config.children_capacity),
            events: TreeEventBus::new(config.event_capacity),
            config,
            state: Mutex::new(TreeState::default()),
            walk_generation: AtomicU64::new(0),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &TreeStoreConfig {
        &self.config
    }

    // =========================================================================
    // Subscriptions and queries
    // =========================================================================

    /// Subscribe to the child list of `parent`.
    pub fn subscribe_children(&self, parent: &NodeKey) -> ChildrenSubscription {
        self.children.subscribe(parent)
    }

    /// Subscribe to structural events.
    pub fn subscribe_events(&self) -> TreeEventStream {
        self.events.subscribe()
    }

    /// The currently selected node.
    pub fn selected_node(&self) -> Option<TreeNode> {
        self.state.lock().selected.clone()
    }

    /// Snapshot of the cached children of `parent`.
    pub fn cached_children(&self, parent: &NodeKey) -> Option<Vec<TreeNode>> {
        self.state.lock().cache.children(parent).map(<[TreeNode]>::to_vec)
    }

    /// Whether the children of `parent` are cached.
    pub fn is_cached(&self, parent: &NodeKey) -> bool {
        self.state.lock().cache.contains(parent)
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Publish the children of `parent`, fetching them on a cache miss.
    ///
    /// A cached list is served as-is; use [`reload_node`](Self::reload_node)
    /// to force a refetch.
    pub async fn load_nodes(&self, parent: &NodeKey) -> Result<Vec<TreeNode>> {
        let cached = self.cached_children(parent);
        match cached {
            Some(children) => {
                tracing::trace!(parent = %parent, count = children.len(), "Children served from cache");
                self.children.publish(parent, Ok(children.clone()));
                Ok(children)
            }
            None => self.refresh_children(parent).await,
        }
    }

    /// Refetch a node's metadata and its children, bypassing the cache.
    ///
    /// The metadata refresh patches `has_children` on the node's entry in its
    /// parent's cached list; the children are replaced and re-published.
    /// The virtual root has no metadata, so only its children are refetched.
    pub async fn reload_node(&self, node: &NodeKey) -> Result<Vec<TreeNode>> {
        let (metadata, children) =
            futures::join!(self.refresh_metadata(node), self.refresh_children(node));
        metadata?;
        children
    }

    async fn refresh_metadata(&self, node: &NodeKey) -> Result<()> {
        let Some(id) = node.node_id() else {
            return Ok(());
        };
        let Some(metadata) = self.service.get_node(id).await? else {
            tracing::debug!(node = %id, "Reloaded node no longer exists");
            return Ok(());
        };

        let patched = self.state.lock().cache.set_has_children(
            &metadata.parent_id,
            node,
            metadata.has_children,
        );
        tracing::debug!(
            node = %id,
            has_children = metadata.has_children,
            patched,
            "Node metadata refreshed"
        );
        Ok(())
    }

    /// Fetch, cache (replacing) and publish the children of `parent`.
    async fn refresh_children(&self, parent: &NodeKey) -> Result<Vec<TreeNode>> {
        match self.fetch_children(parent).await {
            Ok(children) => {
                self.state.lock().cache.insert(parent.clone(), children.clone());
                tracing::debug!(parent = %parent, count = children.len(), "Children loaded");
                self.children.publish(parent, Ok(children.clone()));
                Ok(children)
            }
            Err(error) => {
                self.children.publish(parent, Err(error.clone()));
                Err(error.into())
            }
        }
    }

    /// Fetch the children of `parent` from the service without caching.
    pub(crate) async fn fetch_children(
        &self,
        parent: &NodeKey,
    ) -> std::result::Result<Vec<TreeNode>, ServiceError> {
        let rows = self.service.load_children(parent).await?;
        Ok(rows.into_iter().map(TreeNode::from).collect())
    }

    // =========================================================================
    // Inline creation placeholders
    // =========================================================================

    /// Append a placeholder child under `parent` for an inline create.
    ///
    /// `parent` is forced expanded with children; its entry in its own
    /// parent's list is patched to match and its updated child list is
    /// published. Returns the placeholder.
    pub fn show_inline_edit_node(&self, parent: &mut TreeNode) -> TreeNode {
        let placeholder = TreeNode::placeholder(&parent.id);
        parent.is_expanded = true;
        parent.has_children = true;

        let children = {
            let mut state = self.state.lock();
            let children = state.cache.entry_or_default(parent.id.clone());
            children.push(placeholder.clone());
            let children = children.clone();
            if !parent.is_virtual_root() {
                state.cache.sync_flags(parent);
            }
            children
        };

        tracing::debug!(parent = %parent.id, placeholder = %placeholder.id, "Inline placeholder added");
        self.children.publish(&parent.id, Ok(children));
        placeholder
    }

    /// Drop an abandoned placeholder (or any child) from its parent's list.
    ///
    /// When the list ends up empty, `parent` is collapsed and marked
    /// childless. A parent without a cached list is left untouched.
    /// Returns whether a cached list was found.
    pub fn remove_empty_node(&self, parent: &mut TreeNode, node: &TreeNode) -> bool {
        let key = node.parent_id.clone();
        let children = {
            let mut state = self.state.lock();
            let Some(remaining) = state.cache.remove_child(&key, &node.id) else {
                return false;
            };
            if remaining == 0 {
                parent.has_children = false;
                parent.is_expanded = false;
                if !parent.is_virtual_root() {
                    state.cache.sync_flags(parent);
                }
            }
            state.cache.children(&key).map(<[TreeNode]>::to_vec).unwrap_or_default()
        };

        tracing::debug!(parent = %key, node = %node.id, remaining = children.len(), "Child removed");
        self.children.publish(&key, Ok(children));
        true
    }
}
