//! Broadcast channels
//!
//! Two publish points feed the UI:
//! - [`ChildrenChannels`]: registry of per-parent channels carrying the
//!   current child list (or the fetch failure) for that parent
//! - [`TreeEventBus`]: one channel of tagged structural events
//!
//! Both use tokio `broadcast` semantics: only receivers subscribed at send
//! time observe a value; nothing is replayed to late subscribers.

use cms_tree_core::{NodeKey, ServiceError, TreeEvent, TreeEventKind, TreeNode};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

/// Value published on a children channel.
pub type ChildrenUpdate = Result<Vec<TreeNode>, ServiceError>;

// ─────────────────────────────────────────────────────────────────────────────
// Children channels
// ─────────────────────────────────────────────────────────────────────────────

/// Registry of per-parent children channels, created lazily on first use.
#[derive(Debug)]
pub struct ChildrenChannels {
    capacity: usize,
    channels: Mutex<HashMap<NodeKey, broadcast::Sender<ChildrenUpdate>>>,
}

impl ChildrenChannels {
    /// Create an empty registry whose channels buffer `capacity` updates.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            channels: Mutex::new(HashMap::new()),
        }
    }

    /// Sender for `parent`, creating the channel if absent.
    pub fn get_or_create(&self, parent: &NodeKey) -> broadcast::Sender<ChildrenUpdate> {
        self.channels
            .lock()
            .entry(parent.clone())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone()
    }

    /// Subscribe to the children of `parent`.
    pub fn subscribe(&self, parent: &NodeKey) -> ChildrenSubscription {
        ChildrenSubscription {
            parent: parent.clone(),
            receiver: self.get_or_create(parent).subscribe(),
        }
    }

    /// Publish an update for `parent`.
    ///
    /// Returns the number of receivers reached; a key nobody ever subscribed
    /// to has no channel and the update is dropped.
    pub fn publish(&self, parent: &NodeKey, update: ChildrenUpdate) -> usize {
        let sender = self.channels.lock().get(parent).cloned();
        match sender {
            Some(sender) => sender.send(update).unwrap_or(0),
            None => 0,
        }
    }

    /// Whether a channel exists for `parent`.
    pub fn contains(&self, parent: &NodeKey) -> bool {
        self.channels.lock().contains_key(parent)
    }

    /// Number of registered channels.
    pub fn len(&self) -> usize {
        self.channels.lock().len()
    }

    /// Whether no channel has been created yet.
    pub fn is_empty(&self) -> bool {
        self.channels.lock().is_empty()
    }
}

/// Live view of the child list of one parent.
#[derive(Debug)]
pub struct ChildrenSubscription {
    parent: NodeKey,
    receiver: broadcast::Receiver<ChildrenUpdate>,
}

impl ChildrenSubscription {
    /// Parent this subscription follows.
    pub fn parent(&self) -> &NodeKey {
        &self.parent
    }

    /// Wait for the next update; `None` once the store is gone.
    pub async fn recv(&mut self) -> Option<ChildrenUpdate> {
        loop {
            match self.receiver.recv().await {
                Ok(update) => return Some(update),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(parent = %self.parent, skipped, "Children subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next buffered update, if any.
    pub fn try_recv(&mut self) -> Option<ChildrenUpdate> {
        loop {
            match self.receiver.try_recv() {
                Ok(update) => return Some(update),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(parent = %self.parent, skipped, "Children subscriber lagged");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Structural events
// ─────────────────────────────────────────────────────────────────────────────

/// Single channel of structural tree events.
#[derive(Debug)]
pub struct TreeEventBus {
    sender: broadcast::Sender<TreeEvent>,
}

impl TreeEventBus {
    /// Create a bus buffering `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event; returns the number of receivers reached.
    pub fn publish(&self, kind: TreeEventKind, node: TreeNode) -> usize {
        tracing::trace!(kind = %kind, node = %node.id, "Tree event");
        self.sender.send(TreeEvent::new(kind, node)).unwrap_or(0)
    }

    /// Subscribe to every event kind.
    pub fn subscribe(&self) -> TreeEventStream {
        TreeEventStream {
            receiver: self.sender.subscribe(),
            kinds: None,
        }
    }

    /// Current number of subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Subscription to structural events, optionally filtered by kind.
#[derive(Debug)]
pub struct TreeEventStream {
    receiver: broadcast::Receiver<TreeEvent>,
    kinds: Option<HashSet<TreeEventKind>>,
}

impl TreeEventStream {
    /// Restrict the stream to the given kinds.
    #[must_use]
    pub fn only(mut self, kinds: impl IntoIterator<Item = TreeEventKind>) -> Self {
        self.kinds = Some(kinds.into_iter().collect());
        self
    }

    fn accepts(&self, event: &TreeEvent) -> bool {
        self.kinds
            .as_ref()
            .map_or(true, |kinds| kinds.contains(&event.kind))
    }

    /// Wait for the next matching event; `None` once the store is gone.
    pub async fn recv(&mut self) -> Option<TreeEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.accepts(&event) => return Some(event),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Tree event subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next buffered matching event, if any.
    pub fn try_recv(&mut self) -> Option<TreeEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.accepts(&event) => return Some(event),
                Ok(_) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Tree event subscriber lagged");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    /// Drain every buffered matching event.
    pub fn drain(&mut self) -> Vec<TreeEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}
