//! Bug Reports
//!
//! A [`BugReport`] is produced when the graph detects that its caller broke
//! one of its invariants. It carries enough context to diagnose the
//! divergence offline: the reactions involved, the owning simulation and a
//! serializable snapshot of the whole graph.

use std::fmt;

use serde::Serialize;

use crate::model::{Context, NodeId, ReactionId, SimulationId};

/// Which global side pool an invariant refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GlobalPool {
    /// Reactions whose input context is global.
    Input,
    /// Reactions whose output context is global.
    Output,
}

impl fmt::Display for GlobalPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Input => "global input",
            Self::Output => "global output",
        })
    }
}

/// The invariant that was found broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BugKind {
    /// A reaction was inserted twice.
    AlreadyPresent,

    /// A reaction was removed but is not in the graph.
    MissingVertex,

    /// A reaction with a global context was not in the matching pool.
    MissingFromGlobalPool {
        /// The pool that should have held it.
        pool: GlobalPool,
    },

    /// A reaction was queried after vanishing from the graph without having
    /// been removed during the current step.
    VanishedReaction,
}

impl fmt::Display for BugKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyPresent => f.write_str("reaction was already in the dependency graph"),
            Self::MissingVertex => f.write_str("reaction does not exist in the dependency graph"),
            Self::MissingFromGlobalPool { pool } => {
                write!(f, "reaction was not in the {pool} pool")
            }
            Self::VanishedReaction => f.write_str(
                "reaction does not exist in the dependency graph, nor has it been scheduled for removal",
            ),
        }
    }
}

/// One vertex of a [`GraphSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VertexSnapshot {
    pub id: ReactionId,
    pub node: Option<NodeId>,
    pub input: Context,
    pub output: Context,
    /// Targets of this vertex's outgoing edges.
    pub outbound: Vec<ReactionId>,
}

/// Serializable picture of a dependency graph at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphSnapshot {
    pub vertices: Vec<VertexSnapshot>,
    pub global_inputs: Vec<ReactionId>,
    pub global_outputs: Vec<ReactionId>,
}

impl GraphSnapshot {
    /// Number of edges in the snapshot.
    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(|vertex| vertex.outbound.len()).sum()
    }

    /// Render as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Diagnostic payload of [`GraphError::Bug`](crate::error::GraphError::Bug).
#[derive(Debug, Clone, Serialize)]
pub struct BugReport {
    kind: BugKind,
    reactions: Vec<ReactionId>,
    simulation: SimulationId,
    snapshot: GraphSnapshot,
}

impl BugReport {
    pub(crate) fn new(
        kind: BugKind,
        reactions: Vec<ReactionId>,
        simulation: SimulationId,
        snapshot: GraphSnapshot,
    ) -> Self {
        Self {
            kind,
            reactions,
            simulation,
            snapshot,
        }
    }

    /// The broken invariant.
    pub fn kind(&self) -> BugKind {
        self.kind
    }

    /// The reactions involved.
    pub fn reactions(&self) -> &[ReactionId] {
        &self.reactions
    }

    /// The simulation owning the graph.
    pub fn simulation(&self) -> SimulationId {
        self.simulation
    }

    /// The graph as it was when the violation was detected.
    pub fn snapshot(&self) -> &GraphSnapshot {
        &self.snapshot
    }
}

impl fmt::Display for BugReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (in {}, reactions:", self.kind, self.simulation)?;
        for reaction in &self.reactions {
            write!(f, " {reaction}")?;
        }
        let graph = self.snapshot.to_json().map_err(|_| fmt::Error)?;
        write!(f, ", graph: {graph})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> GraphSnapshot {
        let (a, b) = (ReactionId::new(), ReactionId::new());
        GraphSnapshot {
            vertices: vec![
                VertexSnapshot {
                    id: a,
                    node: Some(NodeId::from(0)),
                    input: Context::Local,
                    output: Context::Neighborhood,
                    outbound: vec![b],
                },
                VertexSnapshot {
                    id: b,
                    node: None,
                    input: Context::Global,
                    output: Context::Global,
                    outbound: Vec::new(),
                },
            ],
            global_inputs: vec![b],
            global_outputs: vec![b],
        }
    }

    #[test]
    fn snapshot_counts_edges() {
        assert_eq!(snapshot().edge_count(), 1);
        assert_eq!(GraphSnapshot::default().edge_count(), 0);
    }

    #[test]
    fn report_renders_context() {
        let snapshot = snapshot();
        let culprit = snapshot.vertices[0].id;
        let report = BugReport::new(
            BugKind::MissingFromGlobalPool {
                pool: GlobalPool::Input,
            },
            vec![culprit],
            SimulationId::from(9),
            snapshot,
        );

        let rendered = report.to_string();
        assert!(rendered.contains("global input pool"));
        assert!(rendered.contains("simulation#9"));
        assert!(rendered.contains(&culprit.to_string()));
        assert!(rendered.contains("\"NEIGHBORHOOD\""));
    }
}
