//! Reactions
//!
//! [`Actionable`] is the interface the dependency graph consumes. It exposes
//! everything the graph needs to place an event (identity, owning node,
//! scopes, descriptors) so the graph never inspects concrete event types.
//!
//! [`Reaction`] is the stock implementation, built fluently:
//!
//! ```rust
//! use strata_core::model::{Context, Dependency, NodeId, Reaction};
//!
//! let reaction = Reaction::on(NodeId::from(3))
//!     .reading(Context::Neighborhood, [Dependency::molecule("food")])
//!     .writing(Context::Local, [Dependency::Movement]);
//! ```

use std::fmt::Debug;

use smallvec::SmallVec;

use super::context::Context;
use super::dependency::Dependency;
use super::id::{NodeId, ReactionId};

/// Descriptor lists are short, almost always one or two entries.
type Dependencies = SmallVec<[Dependency; 2]>;

/// A schedulable unit of simulated behavior with declared read/write scope.
pub trait Actionable: Debug + Send + Sync {
    /// Identity of this event. Stable for the event's whole lifetime.
    fn id(&self) -> ReactionId;

    /// The node owning this event, `None` for node-less global effects.
    fn node(&self) -> Option<NodeId>;

    /// Scope of the state this event reads.
    fn input_context(&self) -> Context;

    /// Scope of the state this event modifies.
    fn output_context(&self) -> Context;

    /// Descriptors of the state this event reads.
    fn inbound_dependencies(&self) -> &[Dependency];

    /// Descriptors of the state this event writes.
    fn outbound_dependencies(&self) -> &[Dependency];

    /// Whether firing `other` may change whether or when `self` can fire.
    fn depends_on(&self, other: &dyn Actionable) -> bool {
        influences(other.outbound_dependencies(), self.inbound_dependencies())
    }

    /// Whether firing `self` may change whether or when `other` can fire.
    fn makes_dependent(&self, other: &dyn Actionable) -> bool {
        influences(self.outbound_dependencies(), other.inbound_dependencies())
    }
}

fn influences(written: &[Dependency], read: &[Dependency]) -> bool {
    read.iter().any(|inbound| {
        written
            .iter()
            .any(|outbound| inbound.depends_on(outbound) || outbound.makes_dependent(inbound))
    })
}

/// The stock [`Actionable`] implementation.
#[derive(Debug, Clone)]
pub struct Reaction {
    id: ReactionId,
    node: Option<NodeId>,
    input_context: Context,
    output_context: Context,
    inbound: Dependencies,
    outbound: Dependencies,
}

impl Reaction {
    /// A reaction owned by `node`, with local scopes and no descriptors.
    pub fn on(node: NodeId) -> Self {
        Self {
            id: ReactionId::new(),
            node: Some(node),
            input_context: Context::Local,
            output_context: Context::Local,
            inbound: SmallVec::new(),
            outbound: SmallVec::new(),
        }
    }

    /// A node-less global effect: reads and writes the whole system.
    pub fn global() -> Self {
        Self {
            id: ReactionId::new(),
            node: None,
            input_context: Context::Global,
            output_context: Context::Global,
            inbound: SmallVec::new(),
            outbound: SmallVec::new(),
        }
    }

    /// Set the input scope and the descriptors read.
    pub fn reading(mut self, context: Context, dependencies: impl IntoIterator<Item = Dependency>) -> Self {
        self.input_context = context;
        self.inbound = dependencies.into_iter().collect();
        self
    }

    /// Set the output scope and the descriptors written.
    pub fn writing(mut self, context: Context, dependencies: impl IntoIterator<Item = Dependency>) -> Self {
        self.output_context = context;
        self.outbound = dependencies.into_iter().collect();
        self
    }
}

impl Actionable for Reaction {
    fn id(&self) -> ReactionId {
        self.id
    }

    fn node(&self) -> Option<NodeId> {
        self.node
    }

    fn input_context(&self) -> Context {
        self.input_context
    }

    fn output_context(&self) -> Context {
        self.output_context
    }

    fn inbound_dependencies(&self) -> &[Dependency] {
        &self.inbound
    }

    fn outbound_dependencies(&self) -> &[Dependency] {
        &self.outbound
    }
}
