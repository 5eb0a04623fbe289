//! Tree node entity and backend DTOs
//!
//! `TreeNode` is one row of the tree plus the transient UI flags the store
//! mutates (`is_expanded`, `is_new`). The DTOs mirror only the backend
//! fields the store consumes.

use serde::{Deserialize, Serialize};

use crate::identifiers::{NodeId, NodeKey};

// ============================================================================
// Backend DTOs
// ============================================================================

/// Child row as returned by `TreeService::load_children`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDto {
    /// Node identifier
    #[serde(rename = "_id")]
    pub id: NodeId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Whether the node has (possibly unloaded) children
    #[serde(default)]
    pub has_children: bool,
    /// Parent key (`null` for top-level nodes)
    #[serde(default)]
    pub parent_id: NodeKey,
    /// Delimited ancestor ids from the root to the immediate parent
    #[serde(default)]
    pub parent_path: Option<String>,
}

/// Node metadata as returned by `TreeService::get_node`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMetadata {
    /// Node identifier
    #[serde(rename = "_id")]
    pub id: NodeId,
    /// Parent key (`null` for top-level nodes)
    #[serde(default)]
    pub parent_id: NodeKey,
    /// Whether the node currently has children
    #[serde(default)]
    pub has_children: bool,
}

// ============================================================================
// Tree Node
// ============================================================================

/// One row of the tree.
///
/// Real nodes carry `NodeKey::Node`; the UI's virtual root carries
/// `NodeKey::Root`. The children of a node are cached under its `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// Key of this node
    pub id: NodeKey,
    /// Display label
    pub name: String,
    /// May be true before the children are loaded
    pub has_children: bool,
    /// Key of the parent (root for top-level nodes)
    pub parent_id: NodeKey,
    /// Delimited ancestor ids, absent for top-level nodes
    pub parent_path: Option<String>,
    /// UI-only: the node is shown expanded
    #[serde(default)]
    pub is_expanded: bool,
    /// UI-only: synthetic placeholder for an inline create in progress
    #[serde(default)]
    pub is_new: bool,
}

impl TreeNode {
    /// Create a collapsed, childless top-level node.
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: NodeKey::Node(id.into()),
            name: name.into(),
            has_children: false,
            parent_id: NodeKey::Root,
            parent_path: None,
            is_expanded: false,
            is_new: false,
        }
    }

    /// The virtual root the UI renders top-level nodes under.
    pub fn virtual_root() -> Self {
        Self {
            id: NodeKey::Root,
            name: String::new(),
            has_children: true,
            parent_id: NodeKey::Root,
            parent_path: None,
            is_expanded: false,
            is_new: false,
        }
    }

    /// Synthetic placeholder for an inline create under `parent`.
    pub fn placeholder(parent: &NodeKey) -> Self {
        Self {
            id: NodeKey::Node(NodeId::placeholder()),
            name: String::new(),
            has_children: false,
            parent_id: parent.clone(),
            parent_path: None,
            is_expanded: false,
            is_new: true,
        }
    }

    /// Set the parent key.
    #[must_use]
    pub fn with_parent(mut self, parent: NodeKey) -> Self {
        self.parent_id = parent;
        self
    }

    /// Set the parent path.
    #[must_use]
    pub fn with_parent_path(mut self, path: impl Into<String>) -> Self {
        self.parent_path = Some(path.into());
        self
    }

    /// Set the has-children flag.
    #[must_use]
    pub fn with_children(mut self, has_children: bool) -> Self {
        self.has_children = has_children;
        self
    }

    /// Whether this is the virtual root.
    pub fn is_virtual_root(&self) -> bool {
        self.id.is_root()
    }
}

impl From<NodeDto> for TreeNode {
    fn from(dto: NodeDto) -> Self {
        Self {
            id: NodeKey::Node(dto.id),
            name: dto.name,
            has_children: dto.has_children,
            parent_id: dto.parent_id,
            parent_path: dto.parent_path,
            is_expanded: false,
            is_new: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_deserializes_backend_shape() {
        let json = r#"{"_id":"5","name":"Images","hasChildren":true,"parentId":"2","parentPath":",2,"}"#;
        let dto: NodeDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.id, NodeId::new("5"));
        assert!(dto.has_children);
        assert_eq!(dto.parent_id, NodeKey::node("2"));
        assert_eq!(dto.parent_path.as_deref(), Some(",2,"));
    }

    #[test]
    fn test_dto_defaults_for_top_level_rows() {
        let dto: NodeDto = serde_json::from_str(r#"{"_id":"1","name":"Media","parentId":null}"#).unwrap();
        assert!(dto.parent_id.is_root());
        assert!(!dto.has_children);
        assert!(dto.parent_path.is_none());
    }

    #[test]
    fn test_dto_maps_to_collapsed_node() {
        let dto = NodeDto {
            id: NodeId::new("9"),
            name: "Docs".to_string(),
            has_children: true,
            parent_id: NodeKey::Root,
            parent_path: None,
        };
        let node = TreeNode::from(dto);
        assert_eq!(node.id, NodeKey::node("9"));
        assert!(node.has_children);
        assert!(!node.is_expanded);
        assert!(!node.is_new);
    }

    #[test]
    fn test_placeholder_is_new_under_parent() {
        let placeholder = TreeNode::placeholder(&NodeKey::node("3"));
        assert!(placeholder.is_new);
        assert_eq!(placeholder.parent_id, NodeKey::node("3"));
        assert!(!placeholder.id.is_root());

        let top = TreeNode::placeholder(&NodeKey::Root);
        assert!(top.parent_id.is_root());
    }

    #[test]
    fn test_metadata_deserializes() {
        let meta: NodeMetadata =
            serde_json::from_str(r#"{"_id":"4","parentId":"null","hasChildren":false}"#).unwrap();
        assert!(meta.parent_id.is_root());
        assert!(!meta.has_children);
    }
}
