//! Simulation Model
//!
//! The types the dependency graph reasons about: spatial nodes, schedulable
//! events ("reactions") and the scopes they read from and write to.
//!
//! # Overview
//!
//! Every event declares two things:
//!
//! - An input and an output [`Context`], the scope of state it may read and
//!   modify (its own node, its neighborhood, or the whole system)
//! - Lists of inbound and outbound [`Dependency`] descriptors, the kinds of
//!   state it reads and writes
//!
//! Together they let the graph decide, without running anything, whether
//! firing one event can change when another may fire.

mod context;
mod dependency;
mod id;
mod reaction;

pub use context::Context;
pub use dependency::Dependency;
pub use id::{NodeId, ReactionId, SimulationId};
pub use reaction::{Actionable, Reaction};
