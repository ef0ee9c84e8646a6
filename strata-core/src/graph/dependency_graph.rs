//! The reaction dependency graph.

use std::cell::OnceCell;
use std::fmt;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, error, trace, warn};

use super::candidates::CandidatePools;
use super::report::{BugKind, BugReport, GlobalPool, GraphSnapshot, VertexSnapshot};
use crate::config::GraphConfig;
use crate::environment::Environment;
use crate::error::GraphError;
use crate::model::{Actionable, Context, NodeId, ReactionId, SimulationId};

/// A reaction together with its incident edges.
#[derive(Debug)]
struct Vertex {
    reaction: Arc<dyn Actionable>,

    /// Reactions whose firing may affect this one.
    producers: IndexSet<ReactionId>,

    /// Reactions this one's firing may affect.
    consumers: IndexSet<ReactionId>,
}

/// Tracks which reactions can influence which, so that after a firing only
/// the affected reactions are re-examined.
///
/// An edge `a -> b` means "firing `a` may change whether or when `b` can
/// fire". Reactions with a global input or output context are additionally
/// kept in two side pools, so that inserting a narrow reaction never has to
/// scan the whole graph.
///
/// The graph has a single writer: the scheduler of the owning simulation
/// must serialize every structural operation.
#[derive(Debug)]
pub struct DependencyGraph {
    simulation: SimulationId,
    config: GraphConfig,
    vertices: IndexMap<ReactionId, Vertex>,
    by_node: IndexMap<NodeId, IndexSet<ReactionId>>,
    global_inputs: IndexSet<ReactionId>,
    global_outputs: IndexSet<ReactionId>,
    /// Reactions removed during the current step.
    pending_removals: IndexSet<ReactionId>,
}

impl DependencyGraph {
    /// Create an empty graph for `simulation` with the default configuration.
    pub fn new(simulation: SimulationId) -> Self {
        Self::with_config(simulation, GraphConfig::default())
    }

    /// Create an empty graph for `simulation`.
    pub fn with_config(simulation: SimulationId, config: GraphConfig) -> Self {
        Self {
            simulation,
            config,
            vertices: IndexMap::new(),
            by_node: IndexMap::new(),
            global_inputs: IndexSet::new(),
            global_outputs: IndexSet::new(),
            pending_removals: IndexSet::new(),
        }
    }

    /// Insert `reaction` and wire it to every reaction already in the graph
    /// that it may influence or be influenced by.
    ///
    /// Fails with [`BugKind::AlreadyPresent`] if the reaction is already in
    /// the graph, which is then left untouched.
    pub fn create_dependencies<E>(&mut self, env: &E, reaction: Arc<dyn Actionable>) -> Result<(), GraphError>
    where
        E: Environment + ?Sized,
    {
        let id = reaction.id();
        if self.vertices.contains_key(&id) {
            return Err(self.bug(BugKind::AlreadyPresent, vec![id]));
        }

        let (producers, consumers) = {
            let pools = CandidatePools::new(self, env, reaction.node());
            let inbound = pools.candidates(reaction.input_context(), &self.global_outputs, |candidate| {
                candidate.output_context()
            });
            let outbound = pools.candidates(reaction.output_context(), &self.global_inputs, |candidate| {
                candidate.input_context()
            });
            let producers: Vec<ReactionId> = inbound
                .into_iter()
                .filter(|candidate| {
                    self.reaction(*candidate)
                        .is_some_and(|producer| reaction.depends_on(producer))
                })
                .collect();
            let consumers: Vec<ReactionId> = outbound
                .into_iter()
                .filter(|candidate| {
                    self.reaction(*candidate)
                        .is_some_and(|consumer| consumer.depends_on(reaction.as_ref()))
                })
                .collect();
            (producers, consumers)
        };

        if let Some(node) = reaction.node() {
            self.by_node.entry(node).or_default().insert(id);
        }
        if reaction.input_context().is_global() {
            self.global_inputs.insert(id);
        }
        if reaction.output_context().is_global() {
            self.global_outputs.insert(id);
        }
        self.vertices.insert(
            id,
            Vertex {
                reaction,
                producers: IndexSet::new(),
                consumers: IndexSet::new(),
            },
        );
        for producer in &producers {
            self.link(*producer, id);
        }
        for consumer in &consumers {
            self.link(id, *consumer);
        }

        debug!(
            reaction = %id,
            producers = producers.len(),
            consumers = consumers.len(),
            "created dependencies"
        );
        Ok(())
    }

    /// Remove the reaction `id` and all of its edges.
    ///
    /// The removal is remembered until the end of the current step, so a
    /// racing [`outbound_dependencies`](Self::outbound_dependencies) query
    /// for it is tolerated.
    pub fn remove_dependencies(&mut self, id: ReactionId) -> Result<(), GraphError> {
        let Some(vertex) = self.vertices.get(&id) else {
            return Err(self.bug(BugKind::MissingVertex, vec![id]));
        };
        let reaction = Arc::clone(&vertex.reaction);
        if reaction.input_context().is_global() && !self.global_inputs.contains(&id) {
            let pool = GlobalPool::Input;
            return Err(self.bug(BugKind::MissingFromGlobalPool { pool }, vec![id]));
        }
        if reaction.output_context().is_global() && !self.global_outputs.contains(&id) {
            let pool = GlobalPool::Output;
            return Err(self.bug(BugKind::MissingFromGlobalPool { pool }, vec![id]));
        }

        let Some(vertex) = self.vertices.swap_remove(&id) else {
            return Err(self.bug(BugKind::MissingVertex, vec![id]));
        };
        for producer in &vertex.producers {
            if let Some(other) = self.vertices.get_mut(producer) {
                other.consumers.shift_remove(&id);
            }
        }
        for consumer in &vertex.consumers {
            if let Some(other) = self.vertices.get_mut(consumer) {
                other.producers.shift_remove(&id);
            }
        }
        if let Some(node) = reaction.node() {
            if let Some(local) = self.by_node.get_mut(&node) {
                local.shift_remove(&id);
                if local.is_empty() {
                    self.by_node.swap_remove(&node);
                }
            }
        }
        self.global_inputs.shift_remove(&id);
        self.global_outputs.shift_remove(&id);
        self.remember_removal(id);

        debug!(
            reaction = %id,
            producers = vertex.producers.len(),
            consumers = vertex.consumers.len(),
            "removed dependencies"
        );
        Ok(())
    }

    /// The reactions to re-examine after `id` fires.
    ///
    /// A reaction removed during the current step yields an empty result
    /// once; any other unknown reaction is a bug.
    pub fn outbound_dependencies(&mut self, id: ReactionId) -> Result<Vec<Arc<dyn Actionable>>, GraphError> {
        if let Some(vertex) = self.vertices.get(&id) {
            return Ok(vertex
                .consumers
                .iter()
                .filter_map(|consumer| self.vertices.get(consumer))
                .map(|consumer| Arc::clone(&consumer.reaction))
                .collect());
        }
        if self.pending_removals.shift_remove(&id) {
            debug!(reaction = %id, "queried a reaction removed during this step");
            return Ok(Vec::new());
        }
        Err(self.bug(BugKind::VanishedReaction, vec![id]))
    }

    /// Update edges after `n1` and `n2` became neighbors.
    ///
    /// `env` must already report them as neighbors.
    pub fn add_neighbor<E>(&mut self, env: &E, n1: NodeId, n2: NodeId)
    where
        E: Environment + ?Sized,
    {
        let added = self.add_neighbor_directed(env, n1, n2) + self.add_neighbor_directed(env, n2, n1);
        debug!(%n1, %n2, edges = added, "neighbor added");
    }

    /// Update edges after `n1` and `n2` stopped being neighbors.
    ///
    /// `env` must already report them as not neighbors.
    pub fn remove_neighbor<E>(&mut self, env: &E, n1: NodeId, n2: NodeId)
    where
        E: Environment + ?Sized,
    {
        let removed = self.remove_neighbor_directed(env, n1, n2) + self.remove_neighbor_directed(env, n2, n1);
        debug!(%n1, %n2, edges = removed, "neighbor removed");
    }

    /// Link the reactions of `n1` to the reactions that `n2` being a neighbor
    /// newly lets influence them. Returns the number of edges created.
    fn add_neighbor_directed<E>(&mut self, env: &E, n1: NodeId, n2: NodeId) -> usize
    where
        E: Environment + ?Sized,
    {
        let edges = {
            let n2_non_global: OnceCell<Vec<ReactionId>> = OnceCell::new();
            let non_global = || {
                n2_non_global.get_or_init(|| {
                    self.reactions_matching(self.reactions_on(n2), |r| !r.output_context().is_global())
                })
            };
            let neighborhood_writers: OnceCell<Vec<ReactionId>> = OnceCell::new();
            let influencers: OnceCell<Vec<ReactionId>> = OnceCell::new();

            let mut edges = Vec::new();
            for target in self.reactions_on(n1) {
                let Some(reaction) = self.reaction(target) else {
                    continue;
                };
                let candidates: &[ReactionId] = match reaction.input_context() {
                    // Local readers only see what the new neighbor writes to its neighborhood
                    Context::Local => neighborhood_writers.get_or_init(|| {
                        self.reactions_matching(non_global().iter().copied(), |r| {
                            r.output_context() == Context::Neighborhood
                        })
                    })
                    .as_slice(),
                    Context::Neighborhood => influencers.get_or_init(|| {
                        let n1_neighbors = env.neighbors(n1);
                        let reachable: Vec<NodeId> = env
                            .neighbors(n2)
                            .iter()
                            .copied()
                            .filter(|far| *far != n1 && !n1_neighbors.contains(far))
                            .collect();
                        let mut influencers = non_global().clone();
                        influencers.extend(self.reactions_matching(
                            reachable.into_iter().flat_map(|far| self.reactions_on(far)),
                            |r| r.output_context() == Context::Neighborhood,
                        ));
                        influencers
                    })
                    .as_slice(),
                    Context::Global => &[],
                };
                for candidate in candidates {
                    if self.reaction(*candidate).is_some_and(|producer| reaction.depends_on(producer)) {
                        edges.push((*candidate, target));
                    }
                }
            }
            edges
        };
        edges
            .into_iter()
            .filter(|(producer, consumer)| self.link(*producer, *consumer))
            .count()
    }

    /// Unlink the reactions of `n1` from the reactions of `n2` (and beyond)
    /// they can no longer influence. Returns the number of edges removed.
    ///
    /// Reactions of `n2`'s neighbors still reachable from `n1` through a
    /// neighbor of a neighbor keep their edges.
    fn remove_neighbor_directed<E>(&mut self, env: &E, n1: NodeId, n2: NodeId) -> usize
    where
        E: Environment + ?Sized,
    {
        let edges = {
            let n2_non_global: OnceCell<Vec<ReactionId>> = OnceCell::new();
            let non_global = || {
                n2_non_global.get_or_init(|| {
                    self.reactions_matching(self.reactions_on(n2), |r| !r.input_context().is_global())
                })
            };
            let neighborhood_readers: OnceCell<Vec<ReactionId>> = OnceCell::new();
            let influenced: OnceCell<Vec<ReactionId>> = OnceCell::new();

            let mut edges = Vec::new();
            for source in self.reactions_on(n1) {
                let Some(reaction) = self.reaction(source) else {
                    continue;
                };
                let candidates: &[ReactionId] = match reaction.output_context() {
                    // Local writers were only seen by the ex-neighbor's neighborhood readers
                    Context::Local => neighborhood_readers.get_or_init(|| {
                        self.reactions_matching(non_global().iter().copied(), |r| {
                            r.input_context() == Context::Neighborhood
                        })
                    })
                    .as_slice(),
                    Context::Neighborhood => influenced.get_or_init(|| {
                        let n1_neighbors = env.neighbors(n1);
                        let mut excluded: IndexSet<NodeId> = n1_neighbors.iter().copied().collect();
                        for neighbor in n1_neighbors.iter() {
                            excluded.extend(env.neighbors(*neighbor).iter().copied());
                        }
                        excluded.insert(n1);
                        let unreachable: Vec<NodeId> = env
                            .neighbors(n2)
                            .iter()
                            .copied()
                            .filter(|far| !excluded.contains(far))
                            .collect();
                        let mut influenced = non_global().clone();
                        influenced.extend(self.reactions_matching(
                            unreachable.into_iter().flat_map(|far| self.reactions_on(far)),
                            |r| r.input_context() == Context::Neighborhood,
                        ));
                        influenced
                    })
                    .as_slice(),
                    Context::Global => &[],
                };
                for candidate in candidates {
                    if self.reaction(*candidate).is_some_and(|consumer| consumer.depends_on(reaction)) {
                        edges.push((source, *candidate));
                    }
                }
            }
            edges
        };
        edges
            .into_iter()
            .filter(|(producer, consumer)| self.unlink(*producer, *consumer))
            .count()
    }

    /// Forget the reactions removed during the step that just ended.
    pub fn advance_step(&mut self) {
        if !self.pending_removals.is_empty() {
            trace!(forgotten = self.pending_removals.len(), "step advanced");
            self.pending_removals.clear();
        }
    }

    /// Reactions whose input context is global.
    pub fn global_input_context_reactions(&self) -> impl Iterator<Item = &Arc<dyn Actionable>> + '_ {
        self.pooled(&self.global_inputs)
    }

    /// Reactions whose output context is global.
    pub fn global_output_context_reactions(&self) -> impl Iterator<Item = &Arc<dyn Actionable>> + '_ {
        self.pooled(&self.global_outputs)
    }

    /// Whether `id` is in the graph.
    pub fn contains(&self, id: ReactionId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// Number of reactions in the graph.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the graph holds no reaction.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.vertices.values().map(|vertex| vertex.consumers.len()).sum()
    }

    /// Whether there is an edge `producer -> consumer`.
    pub fn has_edge(&self, producer: ReactionId, consumer: ReactionId) -> bool {
        self.vertices
            .get(&producer)
            .is_some_and(|vertex| vertex.consumers.contains(&consumer))
    }

    /// Reactions whose firing may affect `id`.
    pub fn producers_of(&self, id: ReactionId) -> impl Iterator<Item = ReactionId> + '_ {
        self.vertices
            .get(&id)
            .into_iter()
            .flat_map(|vertex| vertex.producers.iter().copied())
    }

    /// Reactions whose eligibility `id`'s firing may affect.
    pub fn consumers_of(&self, id: ReactionId) -> impl Iterator<Item = ReactionId> + '_ {
        self.vertices
            .get(&id)
            .into_iter()
            .flat_map(|vertex| vertex.consumers.iter().copied())
    }

    /// Every reaction id in the graph.
    pub fn reaction_ids(&self) -> impl Iterator<Item = ReactionId> + '_ {
        self.vertices.keys().copied()
    }

    /// Serializable picture of the graph.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            vertices: self
                .vertices
                .iter()
                .map(|(id, vertex)| VertexSnapshot {
                    id: *id,
                    node: vertex.reaction.node(),
                    input: vertex.reaction.input_context(),
                    output: vertex.reaction.output_context(),
                    outbound: vertex.consumers.iter().copied().collect(),
                })
                .collect(),
            global_inputs: self.global_inputs.iter().copied().collect(),
            global_outputs: self.global_outputs.iter().copied().collect(),
        }
    }

    pub(super) fn reaction(&self, id: ReactionId) -> Option<&dyn Actionable> {
        self.vertices.get(&id).map(|vertex| vertex.reaction.as_ref())
    }

    /// Reactions in the graph owned by `node`.
    pub(super) fn reactions_on(&self, node: NodeId) -> impl Iterator<Item = ReactionId> + '_ {
        self.by_node.get(&node).into_iter().flatten().copied()
    }

    fn reactions_matching(
        &self,
        ids: impl Iterator<Item = ReactionId>,
        predicate: impl Fn(&dyn Actionable) -> bool,
    ) -> Vec<ReactionId> {
        ids.filter(|id| self.reaction(*id).is_some_and(&predicate))
            .collect()
    }

    fn pooled<'a>(&'a self, pool: &'a IndexSet<ReactionId>) -> impl Iterator<Item = &'a Arc<dyn Actionable>> + 'a {
        pool.iter()
            .filter_map(|id| self.vertices.get(id))
            .map(|vertex| &vertex.reaction)
    }

    /// Add the edge `producer -> consumer`. Returns `false` if it was
    /// already there, or would be a self-loop.
    fn link(&mut self, producer: ReactionId, consumer: ReactionId) -> bool {
        if producer == consumer || !self.vertices.contains_key(&consumer) {
            return false;
        }
        let added = self
            .vertices
            .get_mut(&producer)
            .is_some_and(|vertex| vertex.consumers.insert(consumer));
        if added {
            if let Some(vertex) = self.vertices.get_mut(&consumer) {
                vertex.producers.insert(producer);
            }
            trace!(%producer, %consumer, "edge added");
        }
        added
    }

    /// Remove the edge `producer -> consumer`. Returns `false` if there was
    /// none.
    fn unlink(&mut self, producer: ReactionId, consumer: ReactionId) -> bool {
        let removed = self
            .vertices
            .get_mut(&producer)
            .is_some_and(|vertex| vertex.consumers.shift_remove(&consumer));
        if removed {
            if let Some(vertex) = self.vertices.get_mut(&consumer) {
                vertex.producers.shift_remove(&producer);
            }
            trace!(%producer, %consumer, "edge removed");
        }
        removed
    }

    fn remember_removal(&mut self, id: ReactionId) {
        self.pending_removals.insert(id);
        while self.pending_removals.len() > self.config.pending_removal_capacity {
            if let Some(evicted) = self.pending_removals.shift_remove_index(0) {
                warn!(reaction = %evicted, "pending removal cache full, forgetting oldest removal");
            }
        }
    }

    fn bug(&self, kind: BugKind, reactions: Vec<ReactionId>) -> GraphError {
        let snapshot = if self.config.snapshot_in_reports {
            self.snapshot()
        } else {
            GraphSnapshot::default()
        };
        let report = BugReport::new(kind, reactions, self.simulation, snapshot);
        error!(simulation = %self.simulation, %report, "dependency graph bug");
        GraphError::Bug(Box::new(report))
    }
}

impl fmt::Display for DependencyGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.simulation)?;
        for (index, (id, vertex)) in self.vertices.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} ->", id.raw())?;
            for consumer in &vertex.consumers {
                write!(f, " {}", consumer.raw())?;
            }
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::environment::Topology;
    use crate::model::{Dependency, Reaction};

    fn food() -> Dependency {
        Dependency::molecule("food")
    }

    fn insert(graph: &mut DependencyGraph, topology: &Topology, reaction: Reaction) -> ReactionId {
        let id = reaction.id();
        graph.create_dependencies(topology, Arc::new(reaction)).unwrap();
        id
    }

    /// A reaction whose contexts can be switched to global after insertion.
    #[derive(Debug)]
    struct ShapeShifter {
        id: ReactionId,
        global_input: AtomicBool,
        global_output: AtomicBool,
    }

    impl ShapeShifter {
        fn new() -> Self {
            Self {
                id: ReactionId::new(),
                global_input: AtomicBool::new(false),
                global_output: AtomicBool::new(false),
            }
        }
    }

    fn scope(global: &AtomicBool) -> Context {
        if global.load(Ordering::SeqCst) {
            Context::Global
        } else {
            Context::Local
        }
    }

    impl Actionable for ShapeShifter {
        fn id(&self) -> ReactionId {
            self.id
        }

        fn node(&self) -> Option<NodeId> {
            Some(NodeId::from(0))
        }

        fn input_context(&self) -> Context {
            scope(&self.global_input)
        }

        fn output_context(&self) -> Context {
            scope(&self.global_output)
        }

        fn inbound_dependencies(&self) -> &[Dependency] {
            &[]
        }

        fn outbound_dependencies(&self) -> &[Dependency] {
            &[]
        }
    }

    #[test]
    fn reactions_on_the_same_node_are_linked() {
        let topology = Topology::new();
        let mut graph = DependencyGraph::new(SimulationId::new());
        let node = NodeId::from(0);

        let writer = insert(&mut graph, &topology, Reaction::on(node).writing(Context::Local, [food()]));
        let reader = insert(&mut graph, &topology, Reaction::on(node).reading(Context::Local, [food()]));

        assert!(graph.has_edge(writer, reader));
        assert!(!graph.has_edge(reader, writer));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.producers_of(reader).collect::<Vec<_>>(), vec![writer]);
        assert_eq!(graph.consumers_of(writer).collect::<Vec<_>>(), vec![reader]);
    }

    #[test]
    fn self_dependent_reactions_get_no_loops() {
        let topology = Topology::new();
        let mut graph = DependencyGraph::new(SimulationId::new());
        let node = NodeId::from(0);
        let cyclic = || {
            Reaction::on(node)
                .reading(Context::Local, [food()])
                .writing(Context::Local, [food()])
        };

        let first = insert(&mut graph, &topology, cyclic());
        assert_eq!(graph.edge_count(), 0);

        let second = insert(&mut graph, &topology, cyclic());
        assert!(graph.has_edge(first, second));
        assert!(graph.has_edge(second, first));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn removal_record_is_consumed_by_a_query() {
        let topology = Topology::new();
        let mut graph = DependencyGraph::new(SimulationId::new());
        let id = insert(&mut graph, &topology, Reaction::on(NodeId::from(0)));

        graph.remove_dependencies(id).unwrap();
        assert!(graph.outbound_dependencies(id).unwrap().is_empty());

        let err = graph.outbound_dependencies(id).unwrap_err();
        assert_eq!(err.bug_report().map(BugReport::kind), Some(BugKind::VanishedReaction));
    }

    #[test]
    fn advance_step_forgets_removals() {
        let topology = Topology::new();
        let mut graph = DependencyGraph::new(SimulationId::new());
        let id = insert(&mut graph, &topology, Reaction::on(NodeId::from(0)));

        graph.remove_dependencies(id).unwrap();
        graph.advance_step();

        let err = graph.outbound_dependencies(id).unwrap_err();
        assert_eq!(err.bug_report().map(BugReport::kind), Some(BugKind::VanishedReaction));
    }

    #[test]
    fn pending_removals_are_bounded() {
        let topology = Topology::new();
        let config = GraphConfig {
            pending_removal_capacity: 2,
            ..GraphConfig::default()
        };
        let mut graph = DependencyGraph::with_config(SimulationId::new(), config);
        let ids: Vec<ReactionId> = (0..3)
            .map(|_| insert(&mut graph, &topology, Reaction::on(NodeId::from(0))))
            .collect();

        for id in &ids {
            graph.remove_dependencies(*id).unwrap();
        }

        assert!(graph.outbound_dependencies(ids[0]).is_err());
        assert!(graph.outbound_dependencies(ids[1]).unwrap().is_empty());
        assert!(graph.outbound_dependencies(ids[2]).unwrap().is_empty());
    }

    #[test]
    fn global_reader_outside_its_pool_is_a_bug() {
        let topology = Topology::new();
        let mut graph = DependencyGraph::new(SimulationId::from(5));
        let shifter = Arc::new(ShapeShifter::new());
        graph.create_dependencies(&topology, shifter.clone()).unwrap();
        shifter.global_input.store(true, Ordering::SeqCst);
        let before = graph.snapshot();

        let err = graph.remove_dependencies(shifter.id).unwrap_err();
        let report = err.bug_report().unwrap();
        assert_eq!(
            report.kind(),
            BugKind::MissingFromGlobalPool {
                pool: GlobalPool::Input
            }
        );
        assert_eq!(report.reactions(), &[shifter.id]);
        assert_eq!(report.simulation(), SimulationId::from(5));
        assert_eq!(report.snapshot(), &before);
        assert!(graph.contains(shifter.id));
        assert_eq!(graph.snapshot(), before);
    }

    #[test]
    fn global_writer_outside_its_pool_is_a_bug() {
        let topology = Topology::new();
        let mut graph = DependencyGraph::new(SimulationId::from(6));
        let shifter = Arc::new(ShapeShifter::new());
        graph.create_dependencies(&topology, shifter.clone()).unwrap();
        let bystander = insert(&mut graph, &topology, Reaction::on(NodeId::from(1)));
        shifter.global_output.store(true, Ordering::SeqCst);
        let before = graph.snapshot();

        let err = graph.remove_dependencies(shifter.id).unwrap_err();
        let report = err.bug_report().unwrap();
        assert_eq!(
            report.kind(),
            BugKind::MissingFromGlobalPool {
                pool: GlobalPool::Output
            }
        );
        assert_eq!(report.reactions(), &[shifter.id]);
        assert_eq!(report.simulation(), SimulationId::from(6));
        assert_eq!(report.snapshot(), &before);
        assert_eq!(report.snapshot().vertices.len(), 2);
        assert!(graph.contains(shifter.id));
        assert!(graph.contains(bystander));
        assert_eq!(graph.global_output_context_reactions().count(), 0);
        assert_eq!(graph.snapshot(), before);
    }

    #[test]
    fn bug_reports_can_omit_the_snapshot() {
        let topology = Topology::new();
        let config = GraphConfig {
            snapshot_in_reports: false,
            ..GraphConfig::default()
        };
        let mut graph = DependencyGraph::with_config(SimulationId::new(), config);
        let reaction: Arc<dyn Actionable> = Arc::new(Reaction::on(NodeId::from(0)));
        graph.create_dependencies(&topology, Arc::clone(&reaction)).unwrap();

        let err = graph.create_dependencies(&topology, reaction).unwrap_err();
        let report = err.bug_report().unwrap();
        assert_eq!(report.kind(), BugKind::AlreadyPresent);
        assert!(report.snapshot().vertices.is_empty());
    }

    #[test]
    fn display_lists_adjacency() {
        let topology = Topology::new();
        let mut graph = DependencyGraph::new(SimulationId::from(3));
        let node = NodeId::from(0);
        let writer = insert(&mut graph, &topology, Reaction::on(node).writing(Context::Local, [food()]));
        let reader = insert(&mut graph, &topology, Reaction::on(node).reading(Context::Local, [food()]));

        let rendered = graph.to_string();
        assert!(rendered.starts_with("simulation#3 ["));
        assert!(rendered.contains(&format!("{} -> {}", writer.raw(), reader.raw())));
    }
}
