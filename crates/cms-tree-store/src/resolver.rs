//! # Ancestor Resolver
//!
//! Reveals a newly selected node that may sit deep inside collapsed
//! folders. The node's parent path becomes a chain `[Root, a1, .., an]`
//! that is walked strictly in order: step *k* fetches (or reuses) the
//! children of `ak`, then marks `ak` expanded inside the children of
//! `a(k-1)`. A step never starts before the previous step's list is cached,
//! because that list is where the next expansion flag lives.

use cms_tree_core::{ancestor_chain, NodeKey, TreeEventKind, TreeNode};
use std::sync::atomic::Ordering;

use crate::errors::Result;
use crate::store::TreeStore;

/// How a call to [`TreeStore::locate_to_selected_node`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateOutcome {
    /// The node was already selected; nothing happened
    AlreadySelected,
    /// Selected, but the node has no ancestors to reveal
    NothingToReveal,
    /// Selected and every ancestor cached and expanded
    Revealed {
        /// Position of the last processed ancestor in the chain
        last_index: usize,
    },
    /// Selected, but a later selection stopped the walk
    Superseded {
        /// Position of the ancestor the walk stopped before
        at: usize,
    },
}

impl TreeStore {
    /// Select `node` and reveal its ancestor chain.
    ///
    /// Selecting the node that is already selected is a no-op. Otherwise
    /// the selection is updated and a `Selected` event is published before
    /// any ancestor is fetched, so the event goes out even if the walk
    /// later fails. Fetch failures end the walk; they are published on the
    /// failing ancestor's children channel and returned.
    pub async fn locate_to_selected_node(&self, node: TreeNode) -> Result<LocateOutcome> {
        let generation = {
            let mut state = self.state.lock();
            if state
                .selected
                .as_ref()
                .is_some_and(|selected| selected.id == node.id)
            {
                return Ok(LocateOutcome::AlreadySelected);
            }
            state.selected = Some(node.clone());
            self.walk_generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        let chain = ancestor_chain(node.parent_path.as_deref(), self.config.path_delimiter);
        self.events.publish(TreeEventKind::Selected, node);

        if chain.is_empty() {
            return Ok(LocateOutcome::NothingToReveal);
        }

        for (index, key) in chain.iter().enumerate() {
            if self.config.cancel_superseded_walks
                && self.walk_generation.load(Ordering::SeqCst) != generation
            {
                tracing::debug!(at = index, ancestor = %key, "Ancestor walk superseded");
                return Ok(LocateOutcome::Superseded { at: index });
            }

            self.reveal_step(index.checked_sub(1).map(|prev| &chain[prev]), key)
                .await?;
        }

        let last_index = chain.len() - 1;
        tracing::debug!(ancestor = %chain[last_index], depth = chain.len(), "Pointed to selected node");
        Ok(LocateOutcome::Revealed { last_index })
    }

    /// Ensure the children of `ancestor` are cached, then mark `ancestor`
    /// expanded inside the children of `previous`.
    async fn reveal_step(&self, previous: Option<&NodeKey>, ancestor: &NodeKey) -> Result<()> {
        let cached = self.is_cached(ancestor);
        if !cached {
            let children = match self.fetch_children(ancestor).await {
                Ok(children) => children,
                Err(error) => {
                    self.children.publish(ancestor, Err(error.clone()));
                    return Err(error.into());
                }
            };
            let stored = self
                .state
                .lock()
                .cache
                .insert_if_absent(ancestor.clone(), children);
            tracing::trace!(ancestor = %ancestor, stored, "Ancestor children fetched");
        }

        if let Some(previous) = previous {
            let expanded = self.state.lock().cache.mark_expanded(previous, ancestor);
            tracing::trace!(parent = %previous, ancestor = %ancestor, expanded, "Ancestor expanded");
        }
        Ok(())
    }
}
