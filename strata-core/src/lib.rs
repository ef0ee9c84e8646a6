//! Strata Core
//!
//! This crate provides the reaction dependency graph at the heart of the
//! Strata discrete-event simulator. It implements:
//!
//! - The reaction model (read/write contexts and dependency descriptors)
//! - Construction of dependency edges for newly scheduled reactions
//! - Incremental edge maintenance as the spatial neighbor relation changes
//! - Invariant checks that halt with a full diagnostic report
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `model`: Reactions, contexts, dependency descriptors and identifiers
//! - `environment`: Neighborhood queries and an in-memory topology
//! - `graph`: The dependency graph and its diagnostic reports
//! - `config`: Graph tunables
//! - `error`: The crate's error type
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use strata_core::environment::Topology;
//! use strata_core::graph::DependencyGraph;
//! use strata_core::model::{Actionable, Context, Dependency, NodeId, Reaction, SimulationId};
//!
//! let (a, b) = (NodeId::from(0), NodeId::from(1));
//! let mut topology = Topology::new();
//! let mut graph = DependencyGraph::new(SimulationId::new());
//!
//! let producer = Reaction::on(a).writing(Context::Neighborhood, [Dependency::molecule("food")]);
//! let consumer = Reaction::on(b).reading(Context::Local, [Dependency::molecule("food")]);
//! let (p, c) = (producer.id(), consumer.id());
//! graph.create_dependencies(&topology, Arc::new(producer)).unwrap();
//! graph.create_dependencies(&topology, Arc::new(consumer)).unwrap();
//! assert!(!graph.has_edge(p, c));
//!
//! // Once the nodes are neighbors, the producer reaches the consumer
//! topology.link(&mut graph, a, b);
//! assert!(graph.has_edge(p, c));
//! ```

pub mod config;
pub mod environment;
pub mod error;
pub mod graph;
pub mod model;

pub use config::GraphConfig;
pub use error::GraphError;
pub use graph::DependencyGraph;
