//! # CMS Tree Core
//!
//! Domain vocabulary shared by the tree state engine and its collaborators.
//!
//! # Architecture Constraints
//!
//! - YES Tree node types and parent keys
//! - YES Backend DTO shapes (only the fields the engine consumes)
//! - YES Parent-path parsing and the menu-action vocabulary
//! - YES The `TreeService` interface for the remote data client
//! - NO caching, broadcasting or selection state (that's `cms-tree-store`)
//! - NO network client implementations
//!
//! ## Core Concepts
//!
//! - **Node keys**: `NodeKey::Root` stands for the virtual root; every cache
//!   entry and every children channel is indexed by a `NodeKey`.
//! - **Parent path**: delimited list of ancestor ids from the root down to a
//!   node's immediate parent, parsed into an ancestor chain.
//! - **Events**: one tagged `TreeEvent` type covers every structural event.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Remote tree service interface
pub mod effects;

/// Structural tree events
pub mod events;

/// Node identifiers and parent keys
pub mod identifiers;

/// Context menu actions
pub mod menu;

/// Tree node entity and backend DTOs
pub mod node;

/// Parent-path parsing
pub mod path;

pub use effects::{ServiceError, TreeService};
pub use events::{TreeEvent, TreeEventKind};
pub use identifiers::{NodeId, NodeKey};
pub use menu::{NodeActionRequest, NodeMenuItemAction, TreeMenuItem, UnknownActionError};
pub use node::{NodeDto, NodeMetadata, TreeNode};
pub use path::{ancestor_chain, DEFAULT_PATH_DELIMITER};
