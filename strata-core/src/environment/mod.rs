//! Environment
//!
//! The environment owns the spatial neighbor relation. The dependency graph
//! only reads it through [`Environment`] and reacts to transitions reported
//! by [`DependencyGraph::add_neighbor`] and
//! [`DependencyGraph::remove_neighbor`].
//!
//! [`DependencyGraph::add_neighbor`]: crate::graph::DependencyGraph::add_neighbor
//! [`DependencyGraph::remove_neighbor`]: crate::graph::DependencyGraph::remove_neighbor

mod topology;

use std::borrow::Cow;

use indexmap::IndexSet;

use crate::model::NodeId;

pub use topology::Topology;

/// Neighborhood queries over the spatial nodes of a simulation.
pub trait Environment {
    /// The current direct neighbors of `node`, never including `node` itself.
    fn neighbors(&self, node: NodeId) -> Cow<'_, IndexSet<NodeId>>;
}
