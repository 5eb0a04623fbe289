//! Node identifiers and parent keys
//!
//! `NodeId` is the opaque identifier the backend assigns to a node.
//! `NodeKey` adds the virtual root so that "children of the root" and
//! "children of node X" share one key space without a sentinel string.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Wire spelling the backend historically used for the virtual root.
const LEGACY_ROOT_SPELLING: &str = "null";

/// Opaque identifier of a persisted tree node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh identifier for a not-yet-persisted placeholder.
    pub fn placeholder() -> Self {
        Self(format!("new-{}", uuid::Uuid::new_v4()))
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Key addressing a position in the tree: the virtual root or a real node.
///
/// Used as the cache index for "children of X" and as a node's `parent_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NodeKey {
    /// The virtual root; its children are the top-level nodes.
    #[default]
    Root,
    /// A persisted (or placeholder) node.
    Node(NodeId),
}

impl NodeKey {
    /// Key for a concrete node id.
    pub fn node(id: impl Into<NodeId>) -> Self {
        Self::Node(id.into())
    }

    /// Parse a raw wire value, mapping the empty string and the legacy
    /// `"null"` spelling onto [`NodeKey::Root`].
    pub fn parse_wire(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == LEGACY_ROOT_SPELLING {
            Self::Root
        } else {
            Self::Node(NodeId::new(trimmed))
        }
    }

    /// Whether this key is the virtual root.
    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    /// Identifier of the node, if this is not the root.
    pub fn node_id(&self) -> Option<&NodeId> {
        match self {
            Self::Root => None,
            Self::Node(id) => Some(id),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("<root>"),
            Self::Node(id) => write!(f, "{id}"),
        }
    }
}

impl From<NodeId> for NodeKey {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl Serialize for NodeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.node_id().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NodeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map_or(Self::Root, |raw| Self::parse_wire(&raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_root_spellings() {
        assert_eq!(NodeKey::parse_wire(""), NodeKey::Root);
        assert_eq!(NodeKey::parse_wire("null"), NodeKey::Root);
        assert_eq!(NodeKey::parse_wire("  "), NodeKey::Root);
        assert_eq!(NodeKey::parse_wire("42"), NodeKey::node("42"));
    }

    #[test]
    fn test_key_serde_uses_null_for_root() {
        assert_eq!(serde_json::to_string(&NodeKey::Root).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&NodeKey::node("abc")).unwrap(),
            "\"abc\""
        );

        let root: NodeKey = serde_json::from_str("null").unwrap();
        assert!(root.is_root());
        let legacy: NodeKey = serde_json::from_str("\"null\"").unwrap();
        assert!(legacy.is_root());
        let node: NodeKey = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(node.node_id(), Some(&NodeId::new("abc")));
    }

    #[test]
    fn test_placeholder_ids_are_unique() {
        let a = NodeId::placeholder();
        let b = NodeId::placeholder();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("new-"));
    }

    #[test]
    fn test_display() {
        assert_eq!(NodeKey::Root.to_string(), "<root>");
        assert_eq!(NodeKey::node("7").to_string(), "7");
    }
}
