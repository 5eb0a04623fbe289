//! # CMS Tree Store
//!
//! Client-side state manager for a hierarchical tree widget (folder/media
//! navigator). It lazily loads nodes through a [`TreeService`], caches them
//! per parent, keeps a single selected node, reveals the ancestors of a
//! newly selected node and broadcasts structural events.
//!
//! ## Components
//!
//! - [`NodeCache`]: parent key → ordered children, the source of truth
//! - [`ChildrenChannels`]: lazily created per-parent children channels
//! - [`TreeEventBus`]: one channel of tagged `TreeEvent`s
//! - [`TreeStore`]: load/reload, placeholders, selection, ancestor reveal
//!   and the menu action dispatcher
//!
//! ## Example
//!
//! ```rust,ignore
//! let store = TreeStore::new(Arc::new(http_tree_service));
//! let mut top_level = store.subscribe_children(&NodeKey::Root);
//! store.load_nodes(&NodeKey::Root).await?;
//! let children = top_level.recv().await;
//! ```
//!
//! [`TreeService`]: cms_tree_core::TreeService

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Per-parent node cache
pub mod cache;

/// Children channels and the event bus
pub mod channels;

/// Store configuration
pub mod config;

/// Error types
pub mod errors;

mod dispatcher;
mod resolver;
mod store;

pub use cache::NodeCache;
pub use channels::{
    ChildrenChannels, ChildrenSubscription, ChildrenUpdate, TreeEventBus, TreeEventStream,
};
pub use config::{ConfigError, TreeStoreConfig};
pub use errors::{Result, TreeStoreError};
pub use resolver::LocateOutcome;
pub use store::TreeStore;
