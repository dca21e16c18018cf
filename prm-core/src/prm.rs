//! The roadmap planner: construction, queries, and reset.
//!
//! Provides the [`Prm`] entry point, which owns the roadmap graph, the
//! connectivity tracker, and the injected collaborators.

use tracing::{debug, info, instrument, warn};

use crate::{
    Result,
    builder::{PrmParams, SearchStrategy},
    collaborators::{Metric, NearestNeighbours, Sampler, Verifier},
    configuration::Configuration,
    connectivity::DisjointSet,
    error::{CollaboratorError, PrmError},
    insert::Connector,
    query::{QueryOutcome, QueryReport, endpoints_connected},
    roadmap::{RoadmapGraph, VertexId, VertexKind},
    search::{MetricHeuristic, SearchOutcome, ZeroHeuristic, best_first, reconstruct_path},
};

/// Summary of one call to [`Prm::construct`] or [`Prm::construct_while`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ConstructionReport {
    /// Sampling attempts made, including rejected samples.
    pub attempts: usize,
    /// Samples accepted as roadmap vertices.
    pub inserted: usize,
    /// Edges created while connecting the new vertices.
    pub edges_added: usize,
}

/// Probabilistic roadmap planner.
///
/// Grows a roadmap of feasible configurations with [`Prm::construct`] and
/// answers start/goal queries against it with [`Prm::solve`].
///
/// # Examples
/// ```
/// use prm_core::{
///     Configuration, EuclideanMetric, LinearNearestNeighbours, PrmBuilder,
///     SequentialVerifier, UniformSampler,
/// };
///
/// let sampler = UniformSampler::new(Configuration::from([0.0]), Configuration::from([1.0]), 7)?;
/// let verifier = SequentialVerifier::new(|_: &Configuration| true, EuclideanMetric, 0.05)?;
/// let mut prm = PrmBuilder::new().build(
///     sampler,
///     verifier,
///     EuclideanMetric,
///     LinearNearestNeighbours::new(EuclideanMetric),
/// )?;
///
/// let report = prm.construct(20)?;
/// assert_eq!(report.inserted, 20);
/// assert!(prm.solve(&Configuration::from([0.1]), &Configuration::from([0.9]))?);
/// let path = prm.path()?;
/// assert_eq!(path.first(), Some(&Configuration::from([0.1])));
/// assert_eq!(path.last(), Some(&Configuration::from([0.9])));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Prm<S, V, M, N> {
    params: PrmParams,
    sampler: S,
    verifier: V,
    metric: M,
    nearest: N,
    graph: RoadmapGraph,
    components: DisjointSet,
    path: Option<Vec<Configuration>>,
    last_query: Option<QueryReport>,
    /// Retracted vertices the index refused to drop. Their slots stay
    /// reserved until the index lets go of them.
    stale: Vec<VertexId>,
}

impl<S, V, M, N> Prm<S, V, M, N>
where
    S: Sampler,
    V: Verifier,
    M: Metric,
    N: NearestNeighbours,
{
    /// The index is cleared so that it mirrors the empty graph.
    pub(crate) fn new(
        params: PrmParams,
        sampler: S,
        verifier: V,
        metric: M,
        mut nearest: N,
    ) -> Self {
        nearest.clear();
        Self {
            params,
            sampler,
            verifier,
            metric,
            nearest,
            graph: RoadmapGraph::new(),
            components: DisjointSet::new(),
            path: None,
            last_query: None,
            stale: Vec::new(),
        }
    }

    /// Returns the planner name.
    #[must_use]
    #[rustfmt::skip]
    pub fn name(&self) -> &'static str { "Probabilistic Roadmaps" }

    /// Returns the active parameters.
    #[must_use]
    #[rustfmt::skip]
    pub fn params(&self) -> &PrmParams { &self.params }

    /// Replaces the parameters. Existing edges are kept even if they would no
    /// longer be created under the new limits.
    pub fn set_params(&mut self, params: PrmParams) {
        self.params = params;
    }

    /// Switches the search strategy used by later queries.
    pub fn set_search(&mut self, search: SearchStrategy) {
        self.params.set_search(search);
    }

    /// Read-only view of the roadmap.
    #[must_use]
    #[rustfmt::skip]
    pub fn graph(&self) -> &RoadmapGraph { &self.graph }

    /// Returns the number of roadmap vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.graph.vertex_count() }

    /// Returns the number of roadmap edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.graph.edge_count() }

    /// Returns the number of connected components among roadmap vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn component_count(&self) -> usize { self.components.component_count() }

    /// Returns whether two roadmap vertices are joined by a chain of edges.
    /// Ids that are not live roadmap vertices are never connected.
    pub fn same_component(&mut self, a: VertexId, b: VertexId) -> bool {
        let roadmap = |vertex| self.graph.kind(vertex) == Some(VertexKind::Roadmap);
        if !(roadmap(a) && roadmap(b)) {
            return false;
        }
        self.components.same_component(a, b)
    }

    /// Returns instrumentation for the most recent successful call to
    /// [`Prm::solve`] or [`Prm::solve_with_budget`].
    #[must_use]
    pub fn last_query(&self) -> Option<&QueryReport> {
        self.last_query.as_ref()
    }

    /// Mutable access to the sampler, e.g. to reseed it.
    #[rustfmt::skip]
    pub fn sampler_mut(&mut self) -> &mut S { &mut self.sampler }

    /// Returns the verifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn verifier(&self) -> &V { &self.verifier }

    /// Returns the metric.
    #[must_use]
    #[rustfmt::skip]
    pub fn metric(&self) -> &M { &self.metric }

    /// Returns the nearest-neighbour index.
    #[must_use]
    #[rustfmt::skip]
    pub fn nearest_neighbours(&self) -> &N { &self.nearest }

    /// Returns whether both endpoint configurations are feasible.
    ///
    /// # Errors
    /// Propagates verifier failures as [`PrmError::Collaborator`].
    pub fn verify(&self, start: &Configuration, goal: &Configuration) -> Result<bool> {
        let start_ok = self.verifier.is_valid(start).map_err(PrmError::verifier)?;
        Ok(start_ok && self.verifier.is_valid(goal).map_err(PrmError::verifier)?)
    }

    /// Performs exactly `steps` sampling attempts, adding every feasible
    /// sample as a roadmap vertex and connecting it to its neighbours.
    ///
    /// Rejected samples consume a step and are not errors. Repeated calls
    /// grow the same roadmap.
    ///
    /// # Errors
    /// Propagates collaborator failures as [`PrmError::Collaborator`] and
    /// malformed distances as [`PrmError::NonFiniteDistance`]. Vertices added
    /// before the failure stay in the roadmap.
    pub fn construct(&mut self, steps: usize) -> Result<ConstructionReport> {
        self.construct_while(steps, |_| true)
    }

    /// Like [`Prm::construct`], but evaluates `keep_going` before every step
    /// and stops early once it returns `false`.
    ///
    /// # Errors
    /// See [`Prm::construct`].
    #[instrument(
        name = "prm.construct",
        err,
        skip(self, keep_going),
        fields(steps = steps, vertices = self.graph.vertex_count()),
    )]
    pub fn construct_while<F>(
        &mut self,
        steps: usize,
        mut keep_going: F,
    ) -> Result<ConstructionReport>
    where
        F: FnMut(&ConstructionReport) -> bool,
    {
        let mut report = ConstructionReport::default();
        while report.attempts < steps && keep_going(&report) {
            report.attempts += 1;
            if let Some(edges) = self.construct_step()? {
                report.inserted += 1;
                report.edges_added += edges;
            }
        }
        info!(
            attempts = report.attempts,
            inserted = report.inserted,
            edges_added = report.edges_added,
            vertices = self.graph.vertex_count(),
            components = self.components.component_count(),
            "construction completed"
        );
        Ok(report)
    }

    /// Answers whether a feasible path joins `start` and `goal` through the
    /// current roadmap.
    ///
    /// Start and goal are spliced in as transient vertices using the same
    /// connection policy as roadmap vertices and are retracted before the
    /// call returns, whatever the outcome. When they end up in different
    /// components no search is run.
    ///
    /// # Errors
    /// Propagates collaborator failures as [`PrmError::Collaborator`]. An
    /// infeasible query is `Ok(false)`, not an error.
    pub fn solve(&mut self, start: &Configuration, goal: &Configuration) -> Result<bool> {
        self.solve_with_budget(start, goal, 0)
    }

    /// Like [`Prm::solve`], but while the endpoints are disconnected runs up
    /// to `construct_steps` further construction attempts, re-checking after
    /// each one.
    ///
    /// Roadmap vertices created this way persist after the query. They may
    /// also connect to the live endpoints; those edges do not count towards
    /// their `max_degree` and are retracted with the endpoints.
    ///
    /// # Errors
    /// See [`Prm::solve`].
    #[instrument(
        name = "prm.solve",
        err,
        skip(self, start, goal),
        fields(
            budget = construct_steps,
            strategy = ?self.params.search(),
            vertices = self.graph.vertex_count(),
        ),
    )]
    pub fn solve_with_budget(
        &mut self,
        start: &Configuration,
        goal: &Configuration,
        construct_steps: usize,
    ) -> Result<bool> {
        self.path = None;
        self.last_query = None;
        record_query();
        if self.graph.is_empty() && construct_steps == 0 {
            warn!("roadmap is empty, the query cannot succeed");
        }

        let mut transients = Vec::with_capacity(2);
        let result = self.run_query(start, goal, construct_steps, &mut transients);
        let retracted = self.retract(&transients);
        let report = match result.and_then(|report| retracted.map(|()| report)) {
            Ok(report) => report,
            Err(error) => {
                self.path = None;
                return Err(error);
            }
        };

        debug!(
            outcome = ?report.outcome,
            expanded = report.expanded,
            construct_steps = report.construct_steps,
            "query completed"
        );
        self.last_query = Some(report);
        Ok(report.outcome.is_found())
    }

    /// Returns the start-to-goal configurations found by the last query.
    ///
    /// # Errors
    /// Returns [`PrmError::PathUnavailable`] unless the most recent query
    /// succeeded.
    pub fn path(&self) -> Result<&[Configuration]> {
        self.path.as_deref().ok_or(PrmError::PathUnavailable)
    }

    /// Discards every vertex, edge, index entry, and component, together with
    /// the stored path and query report.
    pub fn reset(&mut self) {
        self.graph.clear();
        self.nearest.clear();
        self.components.clear();
        self.path = None;
        self.last_query = None;
        self.stale.clear();
        debug!("roadmap reset");
    }

    /// One sampling attempt. Returns the number of edges added, or `None`
    /// when the sample was rejected.
    fn construct_step(&mut self) -> Result<Option<usize>> {
        self.purge_stale()?;
        let configuration = self.sampler.generate().map_err(PrmError::sampler)?;
        if !self
            .verifier
            .is_valid(&configuration)
            .map_err(PrmError::verifier)?
        {
            record_sample_rejected();
            return Ok(None);
        }
        let vertex = self.add_indexed_vertex(configuration, VertexKind::Roadmap)?;
        self.components.make_set(vertex);
        record_vertex_inserted();
        self.connect(vertex).map(Some)
    }

    fn run_query(
        &mut self,
        start: &Configuration,
        goal: &Configuration,
        budget: usize,
        transients: &mut Vec<VertexId>,
    ) -> Result<QueryReport> {
        self.purge_stale()?;
        let start_vertex = self.add_indexed_vertex(start.clone(), VertexKind::Transient)?;
        transients.push(start_vertex);
        self.connect(start_vertex)?;
        let goal_vertex = self.add_indexed_vertex(goal.clone(), VertexKind::Transient)?;
        transients.push(goal_vertex);
        self.connect(goal_vertex)?;

        let strategy = self.params.search();
        let mut construct_steps = 0;
        while !endpoints_connected(&self.graph, &mut self.components, start_vertex, goal_vertex) {
            if construct_steps >= budget {
                debug!(construct_steps, "start and goal are disconnected");
                record_failed_fast();
                return Ok(QueryReport {
                    outcome: QueryOutcome::Disconnected,
                    expanded: 0,
                    construct_steps,
                    strategy,
                });
            }
            self.construct_step()?;
            construct_steps += 1;
        }

        let SearchOutcome {
            reached,
            expanded,
            cost,
        } = match strategy {
            SearchStrategy::AStar => {
                let heuristic = MetricHeuristic::new(&self.metric, goal.clone());
                best_first(&mut self.graph, start_vertex, goal_vertex, &heuristic)?
            }
            SearchStrategy::Dijkstra => {
                best_first(&mut self.graph, start_vertex, goal_vertex, &ZeroHeuristic)?
            }
        };
        record_expanded(expanded);

        let outcome = if reached {
            self.path = Some(reconstruct_path(&self.graph, start_vertex, goal_vertex)?);
            QueryOutcome::Found { cost }
        } else {
            warn!(
                expanded,
                "search exhausted a component the tracker reported as connected"
            );
            QueryOutcome::Exhausted
        };
        Ok(QueryReport {
            outcome,
            expanded,
            construct_steps,
            strategy,
        })
    }

    /// Adds a vertex to the graph and the index. The graph insertion is
    /// rolled back when the index refuses the vertex.
    fn add_indexed_vertex(
        &mut self,
        configuration: Configuration,
        kind: VertexKind,
    ) -> Result<VertexId> {
        let vertex = self.graph.add_vertex(configuration, kind);
        let inserted = match self.graph.configuration(vertex) {
            Some(configuration) => self.nearest.insert(vertex, configuration),
            None => return Err(PrmError::missing_vertex(vertex, "indexing")),
        };
        if let Err(error) = inserted {
            self.graph.remove_vertex(vertex)?;
            return Err(PrmError::nearest(error));
        }
        Ok(vertex)
    }

    fn connect(&mut self, vertex: VertexId) -> Result<usize> {
        Connector {
            params: &self.params,
            verifier: &self.verifier,
            metric: &self.metric,
            nearest: &self.nearest,
            graph: &mut self.graph,
            components: &mut self.components,
        }
        .connect(vertex)
    }

    /// Removes transient vertices from the index and the graph. Every vertex
    /// is attempted; the first failure is returned.
    ///
    /// A vertex the index refuses to drop still leaves the graph, but its
    /// slot is parked in `stale` so no later vertex can reuse an id the index
    /// still reports.
    fn retract(&mut self, transients: &[VertexId]) -> Result<()> {
        let mut first_error = None;
        for &vertex in transients {
            if !self.graph.contains(vertex) {
                continue;
            }
            let removed = match self.nearest.remove(vertex) {
                Ok(()) => self.graph.remove_vertex(vertex).map(drop),
                Err(error) => {
                    self.stale.push(vertex);
                    self.graph
                        .detach_vertex(vertex)
                        .map(drop)
                        .and(Err(PrmError::nearest(error)))
                }
            };
            if let Err(error) = removed {
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Retries index removals refused by an earlier retraction. Must succeed
    /// before the index is queried or a new vertex is allocated.
    fn purge_stale(&mut self) -> Result<()> {
        while let Some(&vertex) = self.stale.last() {
            match self.nearest.remove(vertex) {
                Ok(()) | Err(CollaboratorError::UnknownVertex { .. }) => {}
                Err(error) => return Err(PrmError::nearest(error)),
            }
            self.stale.pop();
            self.graph.release_slot(vertex);
            debug!(%vertex, "stale index entry removed");
        }
        Ok(())
    }
}

#[cfg(feature = "metrics")]
fn record_query() {
    metrics::counter!("prm_queries").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_query() {}

#[cfg(feature = "metrics")]
fn record_failed_fast() {
    metrics::counter!("prm_queries_failed_fast").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_failed_fast() {}

#[cfg(feature = "metrics")]
fn record_sample_rejected() {
    metrics::counter!("prm_samples_rejected").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_sample_rejected() {}

#[cfg(feature = "metrics")]
fn record_vertex_inserted() {
    metrics::counter!("prm_vertices_inserted").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_vertex_inserted() {}

#[cfg(feature = "metrics")]
fn record_expanded(expanded: usize) {
    metrics::histogram!("prm_search_expanded_vertices").record(expanded as f64);
}

#[cfg(not(feature = "metrics"))]
fn record_expanded(_expanded: usize) {}
