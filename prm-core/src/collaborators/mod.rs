//! Interfaces the roadmap consumes, plus reference implementations.
//!
//! The planner never samples, checks collisions, or measures distances
//! itself. It delegates to the four traits defined here, injected when the
//! planner is built, so tests can substitute deterministic fakes.

mod linear;
mod metric;
#[cfg(feature = "sampling")]
mod sampler;
mod verifier;

use std::cmp::Ordering;

use crate::{configuration::Configuration, error::CollaboratorError, roadmap::VertexId};

pub use self::{
    linear::LinearNearestNeighbours,
    metric::{EuclideanMetric, WeightedEuclideanMetric},
    verifier::{RecursiveVerifier, SequentialVerifier},
};

#[cfg(feature = "sampling")]
pub use self::sampler::UniformSampler;

/// Produces candidate configurations.
pub trait Sampler {
    /// Draws the next candidate configuration.
    ///
    /// # Errors
    /// Implementations report failures as [`CollaboratorError`]s; the planner
    /// propagates them without retrying.
    fn generate(&mut self) -> Result<Configuration, CollaboratorError>;
}

/// Judges whether configurations and straight-line motions are feasible.
pub trait Verifier {
    /// Returns whether `configuration` is feasible (e.g. collision free).
    ///
    /// # Errors
    /// Implementations report failures as [`CollaboratorError`]s.
    fn is_valid(&self, configuration: &Configuration) -> Result<bool, CollaboratorError>;

    /// Returns whether the direct motion from `from` to `to` is feasible.
    ///
    /// # Errors
    /// Implementations report failures as [`CollaboratorError`]s.
    fn is_valid_motion(
        &self,
        from: &Configuration,
        to: &Configuration,
    ) -> Result<bool, CollaboratorError>;
}

/// Measures distances between configurations.
///
/// Distances must be non-negative and symmetric. They double as edge weights
/// and as the A* heuristic, so a metric that overestimates roadmap path cost
/// forfeits A* optimality.
pub trait Metric {
    /// Computes the distance between `a` and `b`.
    ///
    /// # Errors
    /// Implementations report failures as [`CollaboratorError`]s.
    fn distance(&self, a: &Configuration, b: &Configuration) -> Result<f64, CollaboratorError>;
}

/// Predicate over single configurations, used by the reference verifiers.
///
/// Implemented for any `Fn(&Configuration) -> bool`.
///
/// # Examples
/// ```
/// use prm_core::{Configuration, ValidityChecker};
///
/// let free = |q: &Configuration| q[0] >= 0.0;
/// assert!(free.check(&Configuration::from([1.0]))?);
/// assert!(!free.check(&Configuration::from([-1.0]))?);
/// # Ok::<(), prm_core::CollaboratorError>(())
/// ```
pub trait ValidityChecker {
    /// Returns whether `configuration` is feasible.
    ///
    /// # Errors
    /// Implementations report failures as [`CollaboratorError`]s.
    fn check(&self, configuration: &Configuration) -> Result<bool, CollaboratorError>;
}

impl<F> ValidityChecker for F
where
    F: Fn(&Configuration) -> bool,
{
    fn check(&self, configuration: &Configuration) -> Result<bool, CollaboratorError> {
        Ok(self(configuration))
    }
}

/// Roadmap vertex returned by a nearest-neighbour query.
///
/// Orders by distance, then by vertex id, so equal distances resolve
/// deterministically.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbour {
    /// Vertex held by the index.
    pub vertex: VertexId,
    /// Distance between the query configuration and the vertex.
    pub distance: f64,
}

impl Eq for Neighbour {}

impl Ord for Neighbour {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.vertex.cmp(&other.vertex))
    }
}

impl PartialOrd for Neighbour {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Spatial index over the configurations of live roadmap vertices.
pub trait NearestNeighbours {
    /// Adds `vertex` located at `configuration`.
    ///
    /// # Errors
    /// Implementations should return [`CollaboratorError::DuplicateVertex`]
    /// when the vertex is already indexed.
    fn insert(
        &mut self,
        vertex: VertexId,
        configuration: &Configuration,
    ) -> Result<(), CollaboratorError>;

    /// Removes `vertex`.
    ///
    /// # Errors
    /// Implementations should return [`CollaboratorError::UnknownVertex`]
    /// when the vertex is not indexed.
    fn remove(&mut self, vertex: VertexId) -> Result<(), CollaboratorError>;

    /// Returns up to `k` vertices strictly closer than `radius` to `query`,
    /// sorted by ascending distance.
    ///
    /// # Errors
    /// Implementations report failures as [`CollaboratorError`]s.
    fn nearest(
        &self,
        query: &Configuration,
        k: usize,
        radius: f64,
    ) -> Result<Vec<Neighbour>, CollaboratorError>;

    /// Returns the number of indexed vertices.
    fn len(&self) -> usize;

    /// Returns whether the index holds no vertices.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every indexed vertex.
    fn clear(&mut self);
}
