//! Undirected roadmap storage.
//!
//! Vertices live in slots addressed by [`VertexId`]. Removing a vertex empties
//! its slot and pushes it on a free list; no other slot moves, so ids held by
//! the nearest-neighbour index and the connectivity tracker stay valid.
//! Adjacency is stored on both endpoints.

mod marks;

use std::fmt;

use crate::{
    configuration::Configuration,
    error::{PrmError, Result},
};

pub(crate) use self::marks::{Colour, SearchMarks};

/// Stable handle to a roadmap vertex.
///
/// Ids of removed vertices may be handed out again to later vertices.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VertexId(usize);

impl VertexId {
    /// Wraps a raw slot index.
    #[must_use]
    #[rustfmt::skip]
    pub const fn new(index: usize) -> Self { Self(index) }

    /// Returns the raw slot index.
    #[must_use]
    #[rustfmt::skip]
    pub const fn index(self) -> usize { self.0 }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifetime class of a vertex.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VertexKind {
    /// Created by construction; persists across queries.
    Roadmap,
    /// Start or goal of a single query; retracted when the query ends.
    Transient,
}

/// Read-only view of an undirected edge with `source < target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    /// Endpoint with the smaller id.
    pub source: VertexId,
    /// Endpoint with the larger id.
    pub target: VertexId,
    /// Metric distance between the endpoints when the edge was created.
    pub weight: f64,
}

#[derive(Clone, Copy, Debug)]
struct Adjacency {
    target: VertexId,
    weight: f64,
}

#[derive(Clone, Debug)]
struct VertexRecord {
    configuration: Configuration,
    kind: VertexKind,
    adjacency: Vec<Adjacency>,
    marks: SearchMarks,
}

/// Simple undirected graph of roadmap vertices and validated local motions.
#[derive(Clone, Debug, Default)]
pub struct RoadmapGraph {
    slots: Vec<Option<VertexRecord>>,
    free: Vec<usize>,
    vertex_count: usize,
    edge_count: usize,
}

impl RoadmapGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.vertex_count }

    /// Returns the number of edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edge_count }

    /// Returns whether the graph holds no vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.vertex_count == 0 }

    /// Returns whether `vertex` is live.
    #[must_use]
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.record(vertex).is_some()
    }

    /// Returns the configuration of a live vertex.
    #[must_use]
    pub fn configuration(&self, vertex: VertexId) -> Option<&Configuration> {
        self.record(vertex).map(|record| &record.configuration)
    }

    /// Returns the kind of a live vertex.
    #[must_use]
    pub fn kind(&self, vertex: VertexId) -> Option<VertexKind> {
        self.record(vertex).map(|record| record.kind)
    }

    /// Returns the number of edges incident to `vertex`, or zero when it is
    /// not live.
    #[must_use]
    pub fn degree(&self, vertex: VertexId) -> usize {
        self.record(vertex).map_or(0, |record| record.adjacency.len())
    }

    /// Returns whether an edge joins `a` and `b`.
    #[must_use]
    pub fn has_edge(&self, a: VertexId, b: VertexId) -> bool {
        self.weight(a, b).is_some()
    }

    /// Returns the weight of the edge joining `a` and `b`.
    #[must_use]
    pub fn weight(&self, a: VertexId, b: VertexId) -> Option<f64> {
        self.record(a)?
            .adjacency
            .iter()
            .find(|adjacent| adjacent.target == b)
            .map(|adjacent| adjacent.weight)
    }

    /// Iterates over the neighbours of `vertex` with the connecting weights.
    pub fn neighbours(&self, vertex: VertexId) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.record(vertex)
            .into_iter()
            .flat_map(|record| record.adjacency.iter())
            .map(|adjacent| (adjacent.target, adjacent.weight))
    }

    /// Iterates over live vertices in id order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Configuration)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.as_ref()
                .map(|record| (VertexId(index), &record.configuration))
        })
    }

    /// Iterates over every edge exactly once.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|record| (VertexId(index), record)))
            .flat_map(|(source, record)| {
                record
                    .adjacency
                    .iter()
                    .filter(move |adjacent| source < adjacent.target)
                    .map(move |adjacent| Edge {
                        source,
                        target: adjacent.target,
                        weight: adjacent.weight,
                    })
            })
    }

    pub(crate) fn add_vertex(&mut self, configuration: Configuration, kind: VertexKind) -> VertexId {
        let record = VertexRecord {
            configuration,
            kind,
            adjacency: Vec::new(),
            marks: SearchMarks::default(),
        };
        self.vertex_count += 1;
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(index) {
                *slot = Some(record);
                return VertexId(index);
            }
        }
        self.slots.push(Some(record));
        VertexId(self.slots.len() - 1)
    }

    /// Removes `vertex` and its incident edges, returning the number of edges
    /// removed. The slot becomes available to later vertices.
    pub(crate) fn remove_vertex(&mut self, vertex: VertexId) -> Result<usize> {
        let removed = self.detach_vertex(vertex)?;
        self.free.push(vertex.0);
        Ok(removed)
    }

    /// Like [`RoadmapGraph::remove_vertex`], but keeps the slot out of
    /// circulation until [`RoadmapGraph::release_slot`] is called.
    pub(crate) fn detach_vertex(&mut self, vertex: VertexId) -> Result<usize> {
        let record = self
            .slots
            .get_mut(vertex.0)
            .and_then(Option::take)
            .ok_or_else(|| PrmError::missing_vertex(vertex, "vertex removal"))?;
        for adjacent in &record.adjacency {
            if let Some(other) = self.record_mut(adjacent.target) {
                other.adjacency.retain(|back| back.target != vertex);
            }
        }
        let removed = record.adjacency.len();
        self.edge_count -= removed;
        self.vertex_count -= 1;
        Ok(removed)
    }

    /// Returns a detached slot to the free list. Live or already free slots
    /// are left alone.
    pub(crate) fn release_slot(&mut self, vertex: VertexId) {
        let vacant = matches!(self.slots.get(vertex.0), Some(None));
        if vacant && !self.free.contains(&vertex.0) {
            self.free.push(vertex.0);
        }
    }

    /// Adds an edge between two distinct live vertices. Returns `false`
    /// without changes when the edge already exists.
    pub(crate) fn add_edge(&mut self, a: VertexId, b: VertexId, weight: f64) -> Result<bool> {
        if a == b {
            return Err(PrmError::GraphInvariantViolation {
                message: format!("self-loop requested on vertex {a}"),
            });
        }
        if !self.contains(b) {
            return Err(PrmError::missing_vertex(b, "edge insertion"));
        }
        let record = self
            .record_mut(a)
            .ok_or_else(|| PrmError::missing_vertex(a, "edge insertion"))?;
        if record.adjacency.iter().any(|adjacent| adjacent.target == b) {
            return Ok(false);
        }
        record.adjacency.push(Adjacency { target: b, weight });
        if let Some(other) = self.record_mut(b) {
            other.adjacency.push(Adjacency { target: a, weight });
        }
        self.edge_count += 1;
        Ok(true)
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.vertex_count = 0;
        self.edge_count = 0;
    }

    pub(crate) fn marks(&self, vertex: VertexId) -> Option<&SearchMarks> {
        self.record(vertex).map(|record| &record.marks)
    }

    pub(crate) fn marks_mut(&mut self, vertex: VertexId) -> Option<&mut SearchMarks> {
        self.record_mut(vertex).map(|record| &mut record.marks)
    }

    pub(crate) fn reset_marks(&mut self) {
        for record in self.slots.iter_mut().flatten() {
            record.marks = SearchMarks::default();
        }
    }

    fn record(&self, vertex: VertexId) -> Option<&VertexRecord> {
        self.slots.get(vertex.0).and_then(Option::as_ref)
    }

    fn record_mut(&mut self, vertex: VertexId) -> Option<&mut VertexRecord> {
        self.slots.get_mut(vertex.0).and_then(Option::as_mut)
    }
}

#[cfg(test)]
mod tests;
