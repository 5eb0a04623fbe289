//! # Node Cache
//!
//! Per-parent child lists. Once populated, the list under a key is the
//! authoritative ordered children of that parent until it is replaced by a
//! reload or mutated in place (placeholder insert/remove, flag patches).
//! Entries are never torn down; the cache lives as long as its store.

use cms_tree_core::{NodeKey, TreeNode};
use std::collections::HashMap;

/// Mapping from parent key to its ordered children.
#[derive(Debug, Clone, Default)]
pub struct NodeCache {
    entries: HashMap<NodeKey, Vec<TreeNode>>,
}

impl NodeCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether children of `parent` have been cached.
    pub fn contains(&self, parent: &NodeKey) -> bool {
        self.entries.contains_key(parent)
    }

    /// Cached children of `parent`.
    pub fn children(&self, parent: &NodeKey) -> Option<&[TreeNode]> {
        self.entries.get(parent).map(Vec::as_slice)
    }

    /// Replace the children of `parent`.
    pub fn insert(&mut self, parent: NodeKey, children: Vec<TreeNode>) {
        self.entries.insert(parent, children);
    }

    /// Store `children` only if `parent` has no entry yet.
    ///
    /// Returns whether the list was stored.
    pub fn insert_if_absent(&mut self, parent: NodeKey, children: Vec<TreeNode>) -> bool {
        if self.entries.contains_key(&parent) {
            return false;
        }
        self.entries.insert(parent, children);
        true
    }

    /// Children of `parent`, creating an empty entry when absent.
    pub fn entry_or_default(&mut self, parent: NodeKey) -> &mut Vec<TreeNode> {
        self.entries.entry(parent).or_default()
    }

    /// Mutable access to `node` inside the cached children of `parent`.
    pub fn find_mut(&mut self, parent: &NodeKey, node: &NodeKey) -> Option<&mut TreeNode> {
        self.entries
            .get_mut(parent)?
            .iter_mut()
            .find(|child| &child.id == node)
    }

    /// Mark `node` expanded inside the children of `parent`.
    ///
    /// Returns false when either the list or the node is not cached.
    pub fn mark_expanded(&mut self, parent: &NodeKey, node: &NodeKey) -> bool {
        match self.find_mut(parent, node) {
            Some(entry) => {
                entry.is_expanded = true;
                true
            }
            None => false,
        }
    }

    /// Set the has-children flag of `node` inside the children of `parent`.
    pub fn set_has_children(&mut self, parent: &NodeKey, node: &NodeKey, has_children: bool) -> bool {
        match self.find_mut(parent, node) {
            Some(entry) => {
                entry.has_children = has_children;
                true
            }
            None => false,
        }
    }

    /// Copy the UI flags of `node` onto its entry in its parent's list.
    pub fn sync_flags(&mut self, node: &TreeNode) -> bool {
        match self.find_mut(&node.parent_id, &node.id) {
            Some(entry) => {
                entry.has_children = node.has_children;
                entry.is_expanded = node.is_expanded;
                true
            }
            None => false,
        }
    }

    /// Remove `node` from the children of `parent`.
    ///
    /// Returns the number of remaining children, or `None` when `parent` has
    /// no cached list.
    pub fn remove_child(&mut self, parent: &NodeKey, node: &NodeKey) -> Option<usize> {
        let children = self.entries.get_mut(parent)?;
        if let Some(index) = children.iter().position(|child| &child.id == node) {
            children.remove(index);
        }
        Some(children.len())
    }

    /// Number of cached parents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
