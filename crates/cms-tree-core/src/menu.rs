//! Context menu actions
//!
//! The tree widget's context menu emits a raw action identifier plus the
//! node it was opened on. The identifier set is closed; anything outside it
//! is rejected when parsed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::events::TreeEventKind;
use crate::node::TreeNode;

/// Action identifier that is not part of the menu vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Chosen menu item doesn't exist: {0}")]
pub struct UnknownActionError(pub String);

/// Closed set of node menu actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeMenuItemAction {
    /// Create a node through the create dialog
    NewNode,
    /// Create a node in place, inside the tree
    NewNodeInline,
    /// Rename the node
    Rename,
    /// Cut the node
    Cut,
    /// Copy the node
    Copy,
    /// Paste under the node
    Paste,
    /// Delete the node
    Delete,
}

impl NodeMenuItemAction {
    /// Every action, in menu order.
    pub const ALL: [NodeMenuItemAction; 7] = [
        Self::NewNode,
        Self::NewNodeInline,
        Self::Rename,
        Self::Cut,
        Self::Copy,
        Self::Paste,
        Self::Delete,
    ];

    /// Wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewNode => "new-node",
            Self::NewNodeInline => "new-node-inline",
            Self::Rename => "rename",
            Self::Cut => "cut",
            Self::Copy => "copy",
            Self::Paste => "paste",
            Self::Delete => "delete",
        }
    }

    /// Default menu label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NewNode => "New",
            Self::NewNodeInline => "New Inline",
            Self::Rename => "Rename",
            Self::Cut => "Cut",
            Self::Copy => "Copy",
            Self::Paste => "Paste",
            Self::Delete => "Delete",
        }
    }

    /// Event broadcast for this action.
    ///
    /// `NewNodeInline` has none: it inserts a placeholder instead.
    pub fn event_kind(&self) -> Option<TreeEventKind> {
        match self {
            Self::NewNode => Some(TreeEventKind::Created),
            Self::NewNodeInline => None,
            Self::Rename => Some(TreeEventKind::Renamed),
            Self::Cut => Some(TreeEventKind::Cut),
            Self::Copy => Some(TreeEventKind::Copied),
            Self::Paste => Some(TreeEventKind::Pasted),
            Self::Delete => Some(TreeEventKind::Deleted),
        }
    }
}

impl fmt::Display for NodeMenuItemAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeMenuItemAction {
    type Err = UnknownActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownActionError(s.to_string()))
    }
}

/// One entry of a node's context menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeMenuItem {
    /// Action fired when the entry is chosen
    pub action: NodeMenuItemAction,
    /// Label shown to the user
    pub name: String,
}

impl TreeMenuItem {
    /// Create a menu entry.
    pub fn new(action: NodeMenuItemAction, name: impl Into<String>) -> Self {
        Self {
            action,
            name: name.into(),
        }
    }

    /// Menu listing every action once with its default label.
    pub fn default_context_menu() -> Vec<TreeMenuItem> {
        NodeMenuItemAction::ALL
            .into_iter()
            .map(|action| Self::new(action, action.label()))
            .collect()
    }
}

/// Raw action request as emitted by the context menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeActionRequest {
    /// Action identifier, validated on dispatch
    pub action: String,
    /// Node the menu was opened on
    pub node: TreeNode,
}

impl NodeActionRequest {
    /// Create a request from a raw identifier.
    pub fn new(action: impl Into<String>, node: TreeNode) -> Self {
        Self {
            action: action.into(),
            node,
        }
    }

    /// Parse the action identifier.
    pub fn parse_action(&self) -> Result<NodeMenuItemAction, UnknownActionError> {
        self.action.parse()
    }
}
