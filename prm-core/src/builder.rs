//! Builder utilities for configuring [`Prm`] planners.
//!
//! Exposes the search strategy selection surface and the parameter validation
//! applied before a planner is constructed.

use crate::{
    Result,
    collaborators::{Metric, NearestNeighbours, Sampler, Verifier},
    error::PrmError,
    prm::Prm,
};

/// Shortest-path procedure run over the roadmap when answering a query.
///
/// Both strategies return minimum-cost paths. Dijkstra is A* with a heuristic
/// that always returns zero; A* uses the metric distance to the goal and
/// usually expands fewer vertices.
///
/// # Examples
/// ```
/// use prm_core::SearchStrategy;
///
/// assert_eq!(SearchStrategy::default(), SearchStrategy::AStar);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SearchStrategy {
    /// Informed search guided by the metric distance to the goal.
    #[default]
    AStar,
    /// Uninformed uniform-cost search.
    Dijkstra,
}

/// Validated tunables controlling roadmap density and query behaviour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrmParams {
    max_degree: usize,
    max_neighbours: usize,
    max_radius: f64,
    search: SearchStrategy,
    same_component_edges: bool,
}

impl PrmParams {
    /// Returns the maximum number of edges incident to any vertex.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_degree(&self) -> usize { self.max_degree }

    /// Returns the maximum number of candidates examined per insertion.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_neighbours(&self) -> usize { self.max_neighbours }

    /// Returns the exclusive upper bound on connection distance.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_radius(&self) -> f64 { self.max_radius }

    /// Returns the configured search strategy.
    #[must_use]
    #[rustfmt::skip]
    pub fn search(&self) -> SearchStrategy { self.search }

    /// Returns whether vertices already in the same component may be joined
    /// by an additional edge.
    #[must_use]
    #[rustfmt::skip]
    pub fn same_component_edges(&self) -> bool { self.same_component_edges }

    pub(crate) fn set_search(&mut self, search: SearchStrategy) {
        self.search = search;
    }
}

impl Default for PrmParams {
    fn default() -> Self {
        Self {
            max_degree: usize::MAX,
            max_neighbours: 30,
            max_radius: f64::INFINITY,
            search: SearchStrategy::AStar,
            same_component_edges: true,
        }
    }
}

/// Configures and constructs [`Prm`] instances.
///
/// # Examples
/// ```
/// use prm_core::{
///     Configuration, EuclideanMetric, LinearNearestNeighbours, PrmBuilder, SearchStrategy,
///     SequentialVerifier, UniformSampler,
/// };
///
/// let sampler = UniformSampler::new(
///     Configuration::from([0.0, 0.0]),
///     Configuration::from([1.0, 1.0]),
///     42,
/// )?;
/// let verifier = SequentialVerifier::new(|_: &Configuration| true, EuclideanMetric, 0.01)?;
/// let prm = PrmBuilder::new()
///     .with_max_degree(8)
///     .with_max_neighbours(12)
///     .with_max_radius(0.5)
///     .with_search(SearchStrategy::Dijkstra)
///     .build(sampler, verifier, EuclideanMetric, LinearNearestNeighbours::new(EuclideanMetric))?;
/// assert_eq!(prm.params().max_degree(), 8);
/// assert_eq!(prm.params().search(), SearchStrategy::Dijkstra);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct PrmBuilder {
    max_degree: usize,
    max_neighbours: usize,
    max_radius: f64,
    search: SearchStrategy,
    same_component_edges: bool,
}

impl Default for PrmBuilder {
    fn default() -> Self {
        let defaults = PrmParams::default();
        Self {
            max_degree: defaults.max_degree,
            max_neighbours: defaults.max_neighbours,
            max_radius: defaults.max_radius,
            search: defaults.search,
            same_component_edges: defaults.same_component_edges,
        }
    }
}

impl PrmBuilder {
    /// Creates a builder populated with default parameters: unbounded degree,
    /// 30 candidate neighbours, unbounded radius, A* search, redundant edges
    /// allowed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of edges incident to any vertex.
    #[must_use]
    pub fn with_max_degree(mut self, degree: usize) -> Self {
        self.max_degree = degree;
        self
    }

    /// Caps the number of candidates examined per insertion.
    #[must_use]
    pub fn with_max_neighbours(mut self, k: usize) -> Self {
        self.max_neighbours = k;
        self
    }

    /// Only candidates strictly closer than `radius` are considered.
    #[must_use]
    pub fn with_max_radius(mut self, radius: f64) -> Self {
        self.max_radius = radius;
        self
    }

    /// Selects the shortest-path procedure.
    #[must_use]
    pub fn with_search(mut self, search: SearchStrategy) -> Self {
        self.search = search;
        self
    }

    /// Allows or forbids edges between vertices already in one component.
    #[must_use]
    pub fn with_same_component_edges(mut self, allowed: bool) -> Self {
        self.same_component_edges = allowed;
        self
    }

    /// Validates the configuration into a [`PrmParams`].
    ///
    /// # Errors
    /// Returns [`PrmError::InvalidParameters`] when `max_degree` or
    /// `max_neighbours` is zero, or `max_radius` is NaN or not positive.
    ///
    /// # Examples
    /// ```
    /// use prm_core::PrmBuilder;
    ///
    /// assert!(PrmBuilder::new().with_max_neighbours(0).params().is_err());
    /// assert!(PrmBuilder::new().with_max_radius(f64::NAN).params().is_err());
    /// ```
    pub fn params(&self) -> Result<PrmParams> {
        if self.max_degree == 0 {
            return Err(PrmError::InvalidParameters {
                reason: "max_degree must be greater than zero".into(),
            });
        }
        if self.max_neighbours == 0 {
            return Err(PrmError::InvalidParameters {
                reason: "max_neighbours must be greater than zero".into(),
            });
        }
        if self.max_radius.is_nan() || self.max_radius <= 0.0 {
            return Err(PrmError::InvalidParameters {
                reason: format!("max_radius must be positive (got {})", self.max_radius),
            });
        }
        Ok(PrmParams {
            max_degree: self.max_degree,
            max_neighbours: self.max_neighbours,
            max_radius: self.max_radius,
            search: self.search,
            same_component_edges: self.same_component_edges,
        })
    }

    /// Validates the configuration and constructs a [`Prm`] owning the given
    /// collaborators.
    ///
    /// # Errors
    /// Propagates the validation errors of [`PrmBuilder::params`].
    pub fn build<S, V, M, N>(
        self,
        sampler: S,
        verifier: V,
        metric: M,
        nearest: N,
    ) -> Result<Prm<S, V, M, N>>
    where
        S: Sampler,
        V: Verifier,
        M: Metric,
        N: NearestNeighbours,
    {
        let params = self.params()?;
        Ok(Prm::new(params, sampler, verifier, metric, nearest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[test]
    fn defaults_match_the_documented_values() {
        let params = PrmBuilder::new().params().expect("defaults are valid");
        assert_eq!(params, PrmParams::default());
        assert_eq!(params.max_degree(), usize::MAX);
        assert_eq!(params.max_neighbours(), 30);
        assert!(params.max_radius().is_infinite());
        assert!(params.same_component_edges());
    }

    #[rstest]
    #[case::zero_degree(PrmBuilder::new().with_max_degree(0))]
    #[case::zero_neighbours(PrmBuilder::new().with_max_neighbours(0))]
    #[case::zero_radius(PrmBuilder::new().with_max_radius(0.0))]
    #[case::negative_radius(PrmBuilder::new().with_max_radius(-1.0))]
    #[case::nan_radius(PrmBuilder::new().with_max_radius(f64::NAN))]
    fn invalid_parameters_are_rejected(#[case] builder: PrmBuilder) {
        let err = builder.params().expect_err("parameters are invalid");
        assert!(matches!(err, PrmError::InvalidParameters { .. }));
    }

    #[test]
    fn setters_are_applied() {
        let params = PrmBuilder::new()
            .with_max_degree(3)
            .with_max_neighbours(7)
            .with_max_radius(0.25)
            .with_search(SearchStrategy::Dijkstra)
            .with_same_component_edges(false)
            .params()
            .expect("parameters are valid");
        assert_eq!(params.max_degree(), 3);
        assert_eq!(params.max_neighbours(), 7);
        assert_eq!(params.max_radius(), 0.25);
        assert_eq!(params.search(), SearchStrategy::Dijkstra);
        assert!(!params.same_component_edges());
    }
}
