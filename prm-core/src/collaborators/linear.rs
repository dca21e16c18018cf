//! Brute-force nearest-neighbour index.
//!
//! Scans every entry on each query and keeps the `k` closest in a bounded
//! max-heap; the furthest retained neighbour sits on top and is evicted first.

use std::collections::BinaryHeap;

use crate::{
    collaborators::{Metric, NearestNeighbours, Neighbour},
    configuration::Configuration,
    error::CollaboratorError,
    roadmap::VertexId,
};

/// Linear-scan [`NearestNeighbours`] implementation parameterised by the
/// metric used to rank entries.
///
/// # Examples
/// ```
/// use prm_core::{Configuration, EuclideanMetric, LinearNearestNeighbours, NearestNeighbours, VertexId};
///
/// let mut index = LinearNearestNeighbours::new(EuclideanMetric);
/// index.insert(VertexId::new(0), &Configuration::from([0.0]))?;
/// index.insert(VertexId::new(1), &Configuration::from([5.0]))?;
/// let found = index.nearest(&Configuration::from([1.0]), 1, f64::INFINITY)?;
/// assert_eq!(found[0].vertex, VertexId::new(0));
/// # Ok::<(), prm_core::CollaboratorError>(())
/// ```
#[derive(Clone, Debug)]
pub struct LinearNearestNeighbours<M> {
    metric: M,
    entries: Vec<(VertexId, Configuration)>,
}

impl<M: Metric> LinearNearestNeighbours<M> {
    /// Creates an empty index ranked by `metric`.
    #[must_use]
    pub fn new(metric: M) -> Self {
        Self {
            metric,
            entries: Vec::new(),
        }
    }

    /// Returns the metric used to rank entries.
    #[must_use]
    #[rustfmt::skip]
    pub fn metric(&self) -> &M { &self.metric }

    fn position(&self, vertex: VertexId) -> Option<usize> {
        self.entries.iter().position(|(id, _)| *id == vertex)
    }
}

impl<M: Metric> NearestNeighbours for LinearNearestNeighbours<M> {
    fn insert(
        &mut self,
        vertex: VertexId,
        configuration: &Configuration,
    ) -> Result<(), CollaboratorError> {
        if self.position(vertex).is_some() {
            return Err(CollaboratorError::DuplicateVertex { vertex });
        }
        self.entries.push((vertex, configuration.clone()));
        Ok(())
    }

    fn remove(&mut self, vertex: VertexId) -> Result<(), CollaboratorError> {
        let position = self
            .position(vertex)
            .ok_or(CollaboratorError::UnknownVertex { vertex })?;
        self.entries.swap_remove(position);
        Ok(())
    }

    fn nearest(
        &self,
        query: &Configuration,
        k: usize,
        radius: f64,
    ) -> Result<Vec<Neighbour>, CollaboratorError> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let mut best: BinaryHeap<Neighbour> =
            BinaryHeap::with_capacity(k.min(self.entries.len()) + 1);
        for (vertex, configuration) in &self.entries {
            let distance = self.metric.distance(query, configuration)?;
            let within = distance < radius;
            if !within {
                continue;
            }
            let candidate = Neighbour {
                vertex: *vertex,
                distance,
            };
            if best.len() >= k && best.peek().is_some_and(|furthest| candidate >= *furthest) {
                continue;
            }
            best.push(candidate);
            if best.len() > k {
                best.pop();
            }
        }
        Ok(best.into_sorted_vec())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}
