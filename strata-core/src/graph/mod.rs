//! Dependency Graph
//!
//! This module implements the reaction dependency graph: the structure that
//! tells the scheduler which reactions must be re-examined after one fires.
//!
//! # Overview
//!
//! The graph is a simple directed graph where:
//!
//! - Vertices are the reactions currently scheduled
//! - An edge from A to B means firing A may change whether or when B fires
//!
//! Re-checking every reaction after every firing costs O(N) per step. With
//! the graph, the cost is proportional to how far a firing can actually
//! reach.
//!
//! # Design Decisions
//!
//! 1. Candidates for new edges are drawn from the topology around the
//!    reaction's node, never from the whole graph, unless the reaction itself
//!    has a global context.
//!
//! 2. Reactions with a global input or output context live in side pools
//!    that are merged into every insertion's candidates, instead of being
//!    linked eagerly to every vertex.
//!
//! 3. Topology changes are applied incrementally through
//!    [`DependencyGraph::add_neighbor`] and [`DependencyGraph::remove_neighbor`].
//!
//! 4. Every collection is insertion ordered, so a given sequence of
//!    operations always yields the same graph and the same query results.

mod candidates;
mod dependency_graph;
mod report;

pub use dependency_graph::DependencyGraph;
pub use report::{BugKind, BugReport, GlobalPool, GraphSnapshot, VertexSnapshot};
