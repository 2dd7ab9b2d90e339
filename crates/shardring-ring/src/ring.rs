//! Consistent-hashing ring

use shardring_common::{Error, NodeId, Result, RingPosition};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Consistent-hashing ring mapping keys to node identifiers.
///
/// Nodes and keys share one hashing primitive ([`RingPosition::of`]),
/// so both live on the same ordered space. Positions are kept in a
/// `BTreeMap` whose key sequence is the ring's angular order, ascending
/// under the [`RingPosition`] comparator; the ordering invariant (the
/// ordered sequence is exactly the deduplicated, sorted set of occupied
/// positions) therefore holds after every operation with no transient
/// violation visible to callers.
#[derive(Clone, Debug, Default)]
pub struct Ring {
    /// Ring position -> node identifier.
    positions: BTreeMap<RingPosition, NodeId>,
}

impl Ring {
    /// Create a new empty ring
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the ring, returning its position.
    ///
    /// Insertion is an upsert by position: re-adding an identifier is an
    /// idempotent overwrite, never a duplicate slot. Two distinct
    /// identifiers that digest to the same position collide, and the
    /// later insertion takes the slot; the evicted node silently loses
    /// its place. The overwrite is deliberate, but it is logged so
    /// operators can see it happen.
    pub fn add_node(&mut self, node_id: impl Into<NodeId>) -> RingPosition {
        let node_id = node_id.into();
        let position = RingPosition::of(node_id.as_str());

        match self.positions.insert(position, node_id.clone()) {
            Some(previous) if previous != node_id => {
                warn!(%position, evicted = %previous, node = %node_id, "position collision, evicting prior node");
            }
            Some(_) => {
                debug!(%position, node = %node_id, "node re-added, no-op");
            }
            None => {
                debug!(%position, node = %node_id, "added node to ring");
            }
        }

        position
    }

    /// Remove a node from the ring by its identifier.
    ///
    /// Returns `true` if the node held a slot and was removed. Removing
    /// an absent node is a normal negative result, not an error; the
    /// ring is left unchanged.
    pub fn remove_node(&mut self, node_id: &str) -> bool {
        let Some(position) = self.position_of(node_id) else {
            return false;
        };

        self.positions.remove(&position);
        debug!(%position, node = node_id, "removed node from ring");
        true
    }

    /// Reverse lookup: the position currently held by `node_id`.
    ///
    /// Linear in ring size; identifiers are not indexed by name. A node
    /// evicted by a position collision no longer holds a slot and
    /// resolves to `None`.
    #[must_use]
    pub fn position_of(&self, node_id: &str) -> Option<RingPosition> {
        self.positions
            .iter()
            .find(|(_, node)| node.as_str() == node_id)
            .map(|(position, _)| *position)
    }

    /// Resolve the node that owns `key`.
    ///
    /// Successor rule: the owner is the first node whose position is at
    /// or past the key's position. A key past the largest position
    /// wraps around to the node at the smallest position.
    ///
    /// # Errors
    /// [`Error::EmptyRing`] when the ring has no nodes.
    pub fn node_for_key(&self, key: &str) -> Result<&NodeId> {
        let position = RingPosition::of(key);

        self.positions
            .range(position..)
            .next()
            .or_else(|| self.positions.iter().next())
            .map(|(_, node)| node)
            .ok_or(Error::EmptyRing)
    }

    /// All node identifiers currently on the ring.
    ///
    /// Ordering is unspecified by contract; callers must not depend on
    /// it.
    #[must_use]
    pub fn nodes(&self) -> Vec<NodeId> {
        self.positions.values().cloned().collect()
    }

    /// Iterate occupied positions in ring order (ascending)
    pub fn positions(&self) -> impl Iterator<Item = (&RingPosition, &NodeId)> {
        self.positions.iter()
    }

    /// Number of nodes on the ring
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check whether the ring has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Data-migration hook for membership changes.
    ///
    /// Deliberately a no-op: enumerating keys whose ownership changed
    /// between two ring states and moving their data is a deferred
    /// concern. The method is kept as a named extension point so
    /// callers have a stable place to hang that protocol later.
    pub fn rebalance(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    fn ring_of(nodes: usize) -> Ring {
        let mut ring = Ring::new();
        for i in 1..=nodes {
            ring.add_node(format!("node{i}"));
        }
        ring
    }

    fn sample_keys(count: usize) -> Vec<String> {
        let mut rng = StdRng::seed_from_u64(7);
        (0..count).map(|_| format!("key:{}", rng.next_u64())).collect()
    }

    #[test]
    fn test_add_node_returns_digest_position() {
        let mut ring = Ring::new();
        let position = ring.add_node("node1");
        assert_eq!(position, RingPosition::of("node1"));
        assert_eq!(ring.position_of("node1"), Some(position));
    }

    #[test]
    fn test_positions_stay_sorted_and_unique() {
        let mut ring = ring_of(10);
        ring.remove_node("node3");
        ring.remove_node("node7");
        ring.add_node("node11");
        ring.add_node("node3");

        let order: Vec<RingPosition> = ring.positions().map(|(p, _)| *p).collect();
        let mut sorted = order.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(order, sorted, "ring order must be sorted with no duplicates");
        assert_eq!(order.len(), ring.len());
    }

    #[test]
    fn test_empty_ring_error() {
        let ring = Ring::new();
        assert_eq!(ring.node_for_key("x"), Err(Error::EmptyRing));
    }

    #[test]
    fn test_single_node_owns_everything() {
        let ring = ring_of(1);
        for key in sample_keys(100) {
            assert_eq!(ring.node_for_key(&key).unwrap().as_str(), "node1");
        }
    }

    #[test]
    fn test_successor_rule() {
        let ring = ring_of(5);
        for key in sample_keys(1_000) {
            let owner = ring.node_for_key(&key).unwrap();
            let key_position = RingPosition::of(&key);

            // The owner must be the first position >= the key, or the
            // smallest position when the key is past the largest.
            let expected = ring
                .positions()
                .find(|(p, _)| **p >= key_position)
                .or_else(|| ring.positions().next())
                .map(|(_, node)| node)
                .unwrap();
            assert_eq!(owner, expected);
        }
    }

    #[test]
    fn test_wrap_around() {
        let ring = ring_of(3);
        let max_position = *ring.positions().last().unwrap().0;
        let first_node = ring.positions().next().unwrap().1.clone();

        // Find a key past the largest node position; with three nodes a
        // quarter of keys land there on average.
        let key = (0..10_000)
            .map(|i| format!("wrap:{i}"))
            .find(|k| RingPosition::of(k) > max_position)
            .expect("some key must land past the largest position");

        assert_eq!(ring.node_for_key(&key).unwrap(), &first_node);
    }

    #[test]
    fn test_every_key_resolves_on_non_empty_ring() {
        let ring = ring_of(7);
        let members = ring.nodes();
        for key in sample_keys(5_000) {
            let owner = ring.node_for_key(&key).unwrap();
            assert!(members.contains(owner));
        }
    }

    #[test]
    fn test_idempotent_add() {
        let mut ring = Ring::new();
        let first = ring.add_node("node1");
        let second = ring.add_node("node1");
        assert_eq!(first, second);
        assert_eq!(ring.len(), 1);
        assert_eq!(ring.nodes(), vec![NodeId::from("node1")]);
    }

    #[test]
    fn test_remove_absent_node_is_negative_not_error() {
        let mut ring = ring_of(3);
        assert!(!ring.remove_node("node9"));
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn test_removal_redistributes_only_owned_keys() {
        let mut ring = ring_of(5);
        let keys = sample_keys(5_000);
        let before: Vec<NodeId> = keys
            .iter()
            .map(|k| ring.node_for_key(k).unwrap().clone())
            .collect();

        assert!(ring.remove_node("node2"));

        for (key, old_owner) in keys.iter().zip(&before) {
            let new_owner = ring.node_for_key(key).unwrap();
            if old_owner.as_str() == "node2" {
                assert_ne!(new_owner, old_owner, "key {key} still resolves to the removed node");
            } else {
                assert_eq!(new_owner, old_owner, "key {key} moved although its owner stayed");
            }
        }
    }

    #[test]
    fn test_join_remaps_only_to_new_node() {
        let mut ring = ring_of(5);
        let keys = sample_keys(5_000);
        let before: Vec<NodeId> = keys
            .iter()
            .map(|k| ring.node_for_key(k).unwrap().clone())
            .collect();

        ring.add_node("node6");

        for (key, old_owner) in keys.iter().zip(&before) {
            let new_owner = ring.node_for_key(key).unwrap();
            if new_owner != old_owner {
                assert_eq!(
                    new_owner.as_str(),
                    "node6",
                    "key {key} moved to a pre-existing node"
                );
            }
        }
    }

    #[test]
    fn test_demo_scenario() {
        // node1..node5 added in order, then node1 removed.
        let mut ring = ring_of(5);
        assert!(ring.remove_node("node1"));

        let mut members: Vec<String> =
            ring.nodes().iter().map(|n| n.as_str().to_string()).collect();
        members.sort();
        assert_eq!(members, ["node2", "node3", "node4", "node5"]);

        for key in sample_keys(2_000) {
            assert_ne!(ring.node_for_key(&key).unwrap().as_str(), "node1");
        }
    }

    #[test]
    fn test_rebalance_is_a_no_op() {
        let mut ring = ring_of(3);
        let before: Vec<(RingPosition, NodeId)> = ring
            .positions()
            .map(|(p, n)| (*p, n.clone()))
            .collect();

        ring.rebalance();

        let after: Vec<(RingPosition, NodeId)> = ring
            .positions()
            .map(|(p, n)| (*p, n.clone()))
            .collect();
        assert_eq!(before, after);
    }
}
