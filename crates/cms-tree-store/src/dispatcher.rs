//! Action dispatcher and event publishers
//!
//! Maps a context-menu action onto its effect: every action except
//! `new-node-inline` publishes the matching event; `new-node-inline`
//! inserts a placeholder under the node instead.

use cms_tree_core::{NodeActionRequest, NodeMenuItemAction, TreeEventKind, TreeNode};
use std::sync::atomic::Ordering;

use crate::errors::Result;
use crate::store::TreeStore;

impl TreeStore {
    /// Dispatch a raw menu request.
    ///
    /// Fails with [`TreeStoreError::UnknownAction`](crate::TreeStoreError::UnknownAction)
    /// when the identifier is not a known action. Returns the node as it
    /// stands after dispatch.
    pub fn fire_node_actions(&self, request: NodeActionRequest) -> Result<TreeNode> {
        let action = request.parse_action()?;
        Ok(self.fire_node_action(action, request.node))
    }

    /// Dispatch a typed menu action.
    pub fn fire_node_action(&self, action: NodeMenuItemAction, mut node: TreeNode) -> TreeNode {
        match action.event_kind() {
            Some(kind) => {
                self.events.publish(kind, node.clone());
            }
            None => {
                self.show_inline_edit_node(&mut node);
            }
        }
        node
    }

    /// Make `node` the selection and publish `Selected`.
    ///
    /// Any ancestor walk still in flight counts as superseded.
    pub fn fire_node_selected(&self, node: TreeNode) {
        {
            let mut state = self.state.lock();
            state.selected = Some(node.clone());
            self.walk_generation.fetch_add(1, Ordering::SeqCst);
        }
        self.events.publish(TreeEventKind::Selected, node);
    }

    /// Publish `Created`.
    pub fn fire_node_created(&self, node: TreeNode) {
        self.events.publish(TreeEventKind::Created, node);
    }

    /// Publish `InlineCreated`.
    pub fn fire_node_inline_created(&self, node: TreeNode) {
        self.events.publish(TreeEventKind::InlineCreated, node);
    }

    /// Publish `Renamed`.
    pub fn fire_node_renamed(&self, node: TreeNode) {
        self.events.publish(TreeEventKind::Renamed, node);
    }

    /// Publish `Cut`.
    pub fn fire_node_cut(&self, node: TreeNode) {
        self.events.publish(TreeEventKind::Cut, node);
    }

    /// Publish `Copied`.
    pub fn fire_node_copied(&self, node: TreeNode) {
        self.events.publish(TreeEventKind::Copied, node);
    }

    /// Publish `Pasted`.
    pub fn fire_node_pasted(&self, node: TreeNode) {
        self.events.publish(TreeEventKind::Pasted, node);
    }

    /// Publish `Deleted`.
    pub fn fire_node_deleted(&self, node: TreeNode) {
        self.events.publish(TreeEventKind::Deleted, node);
    }
}
