//! Thread-safe ring handle

use crate::ring::Ring;
use parking_lot::RwLock;
use shardring_common::{NodeId, Result, RingPosition};
use std::sync::Arc;

/// Cloneable, thread-safe handle to a [`Ring`].
///
/// Membership mutations serialize behind a write lock; lookups share a
/// read lock. The ring mutates atomically per operation, so no caller
/// can observe its position map and angular order diverged.
#[derive(Clone, Debug, Default)]
pub struct SharedRing {
    inner: Arc<RwLock<Ring>>,
}

impl SharedRing {
    /// Create a new empty shared ring
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-populated ring
    #[must_use]
    pub fn from_ring(ring: Ring) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ring)),
        }
    }

    /// Add a node to the ring, returning its position
    pub fn add_node(&self, node_id: impl Into<NodeId>) -> RingPosition {
        self.inner.write().add_node(node_id)
    }

    /// Remove a node by identifier, returning whether it was present
    pub fn remove_node(&self, node_id: &str) -> bool {
        self.inner.write().remove_node(node_id)
    }

    /// Resolve the node that owns `key`.
    ///
    /// # Errors
    /// [`shardring_common::Error::EmptyRing`] when the ring has no
    /// nodes.
    pub fn node_for_key(&self, key: &str) -> Result<NodeId> {
        self.inner.read().node_for_key(key).cloned()
    }

    /// All node identifiers currently on the ring
    #[must_use]
    pub fn nodes(&self) -> Vec<NodeId> {
        self.inner.read().nodes()
    }

    /// Number of nodes on the ring
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check whether the ring has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Data-migration hook; a no-op, see [`Ring::rebalance`]
    pub fn rebalance(&self) {
        self.inner.write().rebalance();
    }
}
