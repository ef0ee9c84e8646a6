//! Candidate Pools
//!
//! When a reaction is inserted, only reactions close enough to it in the
//! topology (plus the global pools) can be wired to it. The pools below are
//! the building blocks of that neighborhood, each computed on first use:
//! most reactions have narrow contexts and never need the wider ones.
//!
//! | relevant context | candidates                                                          |
//! |------------------|---------------------------------------------------------------------|
//! | `LOCAL`          | opposite global pool, local, neighborhood with opposite `NEIGHBORHOOD` |
//! | `NEIGHBORHOOD`   | opposite global pool, local, neighborhood, extended neighborhood with opposite `NEIGHBORHOOD` |
//! | `GLOBAL`         | every vertex                                                        |
//!
//! The "opposite" context is the candidate's output when looking for
//! producers and its input when looking for consumers.

use std::cell::OnceCell;

use indexmap::IndexSet;

use super::DependencyGraph;
use crate::environment::Environment;
use crate::model::{Actionable, Context, NodeId, ReactionId};

pub(super) struct CandidatePools<'g, E: ?Sized> {
    graph: &'g DependencyGraph,
    env: &'g E,
    node: Option<NodeId>,
    neighborhood: OnceCell<IndexSet<NodeId>>,
    local: OnceCell<Vec<ReactionId>>,
    neighborhood_reactions: OnceCell<Vec<ReactionId>>,
    extended_reactions: OnceCell<Vec<ReactionId>>,
}

impl<'g, E: Environment + ?Sized> CandidatePools<'g, E> {
    pub(super) fn new(graph: &'g DependencyGraph, env: &'g E, node: Option<NodeId>) -> Self {
        Self {
            graph,
            env,
            node,
            neighborhood: OnceCell::new(),
            local: OnceCell::new(),
            neighborhood_reactions: OnceCell::new(),
            extended_reactions: OnceCell::new(),
        }
    }

    /// Reactions that may be linked to the new one through `context`.
    ///
    /// `opposite_global` is the global pool on the other side of the edge and
    /// `opposite` extracts the candidate's context on that side.
    pub(super) fn candidates(
        &self,
        context: Context,
        opposite_global: &IndexSet<ReactionId>,
        opposite: impl Fn(&dyn Actionable) -> Context,
    ) -> IndexSet<ReactionId> {
        let reaches_neighborhood = |id: &&ReactionId| {
            self.graph
                .reaction(**id)
                .is_some_and(|candidate| opposite(candidate) == Context::Neighborhood)
        };
        let mut candidates = IndexSet::new();
        match context {
            Context::Local => {
                candidates.extend(opposite_global);
                candidates.extend(self.local());
                candidates.extend(self.neighborhood_reactions().iter().filter(reaches_neighborhood));
            }
            Context::Neighborhood => {
                candidates.extend(opposite_global);
                candidates.extend(self.local());
                candidates.extend(self.neighborhood_reactions());
                candidates.extend(self.extended_reactions().iter().filter(reaches_neighborhood));
            }
            Context::Global => candidates.extend(self.graph.reaction_ids()),
        }
        candidates
    }

    fn neighborhood(&self) -> &IndexSet<NodeId> {
        self.neighborhood.get_or_init(|| {
            self.node
                .map(|node| self.env.neighbors(node).into_owned())
                .unwrap_or_default()
        })
    }

    /// Reactions already in the graph sharing the new reaction's node.
    fn local(&self) -> &[ReactionId] {
        self.local.get_or_init(|| {
            self.node
                .map(|node| self.graph.reactions_on(node).collect())
                .unwrap_or_default()
        })
    }

    /// Reactions on the direct neighbors.
    fn neighborhood_reactions(&self) -> &[ReactionId] {
        self.neighborhood_reactions.get_or_init(|| {
            self.neighborhood()
                .iter()
                .flat_map(|neighbor| self.graph.reactions_on(*neighbor))
                .collect()
        })
    }

    /// Reactions on neighbors of neighbors, excluding the node itself and its
    /// direct neighbors.
    fn extended_reactions(&self) -> &[ReactionId] {
        self.extended_reactions.get_or_init(|| {
            let neighborhood = self.neighborhood();
            let mut extended = IndexSet::new();
            for neighbor in neighborhood {
                for far in self.env.neighbors(*neighbor).iter() {
                    if Some(*far) != self.node && !neighborhood.contains(far) {
                        extended.insert(*far);
                    }
                }
            }
            extended
                .into_iter()
                .flat_map(|far| self.graph.reactions_on(far))
                .collect()
        })
    }
}
