//! Connection policy run for every vertex entering the roadmap.
//!
//! The policy walks the nearest candidates in ascending distance, skips those
//! that would break the degree cap or simplicity of the graph, and adds an
//! edge for every candidate whose straight motion the verifier accepts.

use tracing::trace;

use crate::{
    builder::PrmParams,
    collaborators::{Metric, NearestNeighbours, Verifier},
    connectivity::DisjointSet,
    error::{PrmError, Result},
    roadmap::{RoadmapGraph, VertexId, VertexKind},
    validate::validate_distance,
};

/// Borrowed view over the planner state touched while connecting a vertex.
pub(crate) struct Connector<'a, V, M, N> {
    pub(crate) params: &'a PrmParams,
    pub(crate) verifier: &'a V,
    pub(crate) metric: &'a M,
    pub(crate) nearest: &'a N,
    pub(crate) graph: &'a mut RoadmapGraph,
    pub(crate) components: &'a mut DisjointSet,
}

impl<V, M, N> Connector<'_, V, M, N>
where
    V: Verifier,
    M: Metric,
    N: NearestNeighbours,
{
    /// Connects `vertex`, which must already be live in the graph and present
    /// in the index, to its eligible neighbours. Returns the number of edges
    /// added.
    ///
    /// Edges between two roadmap vertices are recorded in the connectivity
    /// tracker. Edges touching a transient vertex are not, so retracting the
    /// transient vertex leaves the tracker exact.
    ///
    /// The degree cap of a roadmap vertex counts roadmap edges only. Edges to
    /// live query endpoints are retracted with them, so they never crowd out
    /// the permanent edges of a vertex grown during a budgeted query. While
    /// endpoints are live a roadmap vertex may therefore exceed `max_degree`.
    pub(crate) fn connect(&mut self, vertex: VertexId) -> Result<usize> {
        let configuration = self
            .graph
            .configuration(vertex)
            .cloned()
            .ok_or_else(|| PrmError::missing_vertex(vertex, "connection"))?;
        let kind = self
            .graph
            .kind(vertex)
            .ok_or_else(|| PrmError::missing_vertex(vertex, "connection"))?;
        let candidates = self
            .nearest
            .nearest(
                &configuration,
                self.params.max_neighbours(),
                self.params.max_radius(),
            )
            .map_err(PrmError::nearest)?;

        let max_degree = self.params.max_degree();
        let mut added = 0;
        for candidate in candidates {
            if self.load(vertex, kind) >= max_degree {
                break;
            }
            let other = candidate.vertex;
            if other == vertex {
                continue;
            }
            let other_kind = self
                .graph
                .kind(other)
                .ok_or_else(|| PrmError::missing_vertex(other, "neighbour lookup"))?;
            if kind == VertexKind::Transient && other_kind == VertexKind::Transient {
                continue;
            }
            if self.load(other, other_kind) >= max_degree || self.graph.has_edge(vertex, other) {
                continue;
            }
            if !self.params.same_component_edges() && self.already_connected(vertex, other) {
                continue;
            }
            let other_configuration = self
                .graph
                .configuration(other)
                .cloned()
                .ok_or_else(|| PrmError::missing_vertex(other, "neighbour lookup"))?;
            let feasible = self
                .verifier
                .is_valid_motion(&configuration, &other_configuration)
                .map_err(PrmError::verifier)?;
            if !feasible {
                trace!(%vertex, %other, "motion rejected");
                continue;
            }
            let weight = validate_distance(self.metric, &configuration, &other_configuration)?;
            if self.graph.add_edge(vertex, other, weight)? {
                added += 1;
                if kind == VertexKind::Roadmap && other_kind == VertexKind::Roadmap {
                    self.components.union(vertex, other);
                }
            }
        }
        Ok(added)
    }

    /// Degree counted against the cap.
    fn load(&self, vertex: VertexId, kind: VertexKind) -> usize {
        match kind {
            VertexKind::Roadmap => self
                .graph
                .neighbours(vertex)
                .filter(|(neighbour, _)| self.graph.kind(*neighbour) == Some(VertexKind::Roadmap))
                .count(),
            VertexKind::Transient => self.graph.degree(vertex),
        }
    }

    fn already_connected(&mut self, a: VertexId, b: VertexId) -> bool {
        let left = component_roots(self.graph, self.components, a);
        let right = component_roots(self.graph, self.components, b);
        left.iter().any(|root| right.contains(root))
    }
}

/// Returns the tracker roots a vertex belongs to. A roadmap vertex has exactly
/// one; a transient vertex inherits those of its roadmap neighbours.
pub(crate) fn component_roots(
    graph: &RoadmapGraph,
    components: &mut DisjointSet,
    vertex: VertexId,
) -> Vec<usize> {
    match graph.kind(vertex) {
        Some(VertexKind::Roadmap) => vec![components.find(vertex)],
        Some(VertexKind::Transient) => {
            let mut roots: Vec<usize> = graph
                .neighbours(vertex)
                .filter(|(neighbour, _)| graph.kind(*neighbour) == Some(VertexKind::Roadmap))
                .map(|(neighbour, _)| components.find(neighbour))
                .collect();
            roots.sort_unstable();
            roots.dedup();
            roots
        }
        None => Vec::new(),
    }
}
