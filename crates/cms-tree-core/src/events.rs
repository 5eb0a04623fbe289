//! Structural tree events
//!
//! A single tagged event type replaces one stream per event kind, so
//! subscribers see every kind in publication order and filter locally.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::node::TreeNode;

/// Kind of structural event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TreeEventKind {
    /// A node became the current selection
    Selected,
    /// A node is to be created (dialog flow)
    Created,
    /// An inline create was committed
    InlineCreated,
    /// A node is to be renamed
    Renamed,
    /// A node was cut
    Cut,
    /// A node was copied
    Copied,
    /// Clipboard contents are to be pasted under a node
    Pasted,
    /// A node is to be deleted
    Deleted,
}

impl TreeEventKind {
    /// Every event kind, in declaration order.
    pub const ALL: [TreeEventKind; 8] = [
        Self::Selected,
        Self::Created,
        Self::InlineCreated,
        Self::Renamed,
        Self::Cut,
        Self::Copied,
        Self::Pasted,
        Self::Deleted,
    ];

    /// Stable label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Selected => "selected",
            Self::Created => "created",
            Self::InlineCreated => "inline-created",
            Self::Renamed => "renamed",
            Self::Cut => "cut",
            Self::Copied => "copied",
            Self::Pasted => "pasted",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for TreeEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A structural event and the node it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEvent {
    /// What happened
    pub kind: TreeEventKind,
    /// The affected node
    pub node: TreeNode,
}

impl TreeEvent {
    /// Create an event.
    pub fn new(kind: TreeEventKind, node: TreeNode) -> Self {
        Self { kind, node }
    }
}
