//! In-memory neighbor relation.

use std::borrow::Cow;

use indexmap::{IndexMap, IndexSet};

use super::Environment;
use crate::graph::DependencyGraph;
use crate::model::NodeId;

/// A symmetric, mutable neighbor relation between nodes.
///
/// Adjacency is kept in insertion order so that every query, and every
/// graph update derived from it, is reproducible.
#[derive(Debug, Default, Clone)]
pub struct Topology {
    links: IndexMap<NodeId, IndexSet<NodeId>>,
}

impl Topology {
    /// Create an empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an isolated node. Does nothing if it is already known.
    pub fn add_node(&mut self, node: NodeId) {
        self.links.entry(node).or_default();
    }

    /// Make `a` and `b` neighbors. Returns `false` if they already were,
    /// or if `a == b`.
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            return false;
        }
        let added = self.links.entry(a).or_default().insert(b);
        self.links.entry(b).or_default().insert(a);
        added
    }

    /// Stop `a` and `b` from being neighbors. Returns `false` if they were not.
    pub fn disconnect(&mut self, a: NodeId, b: NodeId) -> bool {
        let removed = self
            .links
            .get_mut(&a)
            .is_some_and(|neighbors| neighbors.shift_remove(&b));
        if let Some(neighbors) = self.links.get_mut(&b) {
            neighbors.shift_remove(&a);
        }
        removed
    }

    /// Connect `a` and `b`, then let `graph` wire the edges the new
    /// neighborhood implies.
    pub fn link(&mut self, graph: &mut DependencyGraph, a: NodeId, b: NodeId) {
        if self.connect(a, b) {
            graph.add_neighbor(&*self, a, b);
        }
    }

    /// Disconnect `a` and `b`, then let `graph` drop the edges that relied on
    /// their neighborhood.
    pub fn unlink(&mut self, graph: &mut DependencyGraph, a: NodeId, b: NodeId) {
        if self.disconnect(a, b) {
            graph.remove_neighbor(&*self, a, b);
        }
    }

    /// Whether `a` and `b` are currently neighbors.
    pub fn are_neighbors(&self, a: NodeId, b: NodeId) -> bool {
        self.links.get(&a).is_some_and(|neighbors| neighbors.contains(&b))
    }

    /// All known nodes, in registration order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.links.keys().copied()
    }
}

impl Environment for Topology {
    fn neighbors(&self, node: NodeId) -> Cow<'_, IndexSet<NodeId>> {
        self.links
            .get(&node)
            .map_or_else(|| Cow::Owned(IndexSet::new()), Cow::Borrowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connections_are_symmetric() {
        let mut topology = Topology::new();
        let (a, b) = (NodeId::from(0), NodeId::from(1));

        assert!(topology.connect(a, b));
        assert!(!topology.connect(b, a));
        assert!(topology.are_neighbors(a, b));
        assert!(topology.are_neighbors(b, a));

        assert!(topology.disconnect(b, a));
        assert!(!topology.disconnect(a, b));
        assert!(!topology.are_neighbors(a, b));
    }

    #[test]
    fn nodes_are_never_their_own_neighbors() {
        let mut topology = Topology::new();
        let a = NodeId::from(0);
        assert!(!topology.connect(a, a));
        assert!(topology.neighbors(a).is_empty());
    }

    #[test]
    fn unknown_nodes_have_no_neighbors() {
        let topology = Topology::new();
        assert!(topology.neighbors(NodeId::from(42)).is_empty());
    }

    #[test]
    fn neighbors_keep_insertion_order() {
        let mut topology = Topology::new();
        let hub = NodeId::from(0);
        for raw in [3, 1, 2] {
            topology.connect(hub, NodeId::from(raw));
        }
        let order: Vec<u64> = topology.neighbors(hub).iter().map(NodeId::raw).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }
}
