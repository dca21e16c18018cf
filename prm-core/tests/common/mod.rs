//! Shared fixtures for the integration suites.
#![allow(dead_code, reason = "each suite uses a different subset")]

use std::cell::Cell;

use prm_core::{
    CollaboratorError, Configuration, EuclideanMetric, LinearNearestNeighbours, NearestNeighbours,
    Neighbour, Prm, PrmBuilder, Sampler, SequentialVerifier, UniformSampler, VertexId,
};
use prm_test_support::property::PropertyProfile;
use proptest::test_runner::Config as ProptestConfig;

/// Free-space predicate for the unit square: a vertical wall at
/// `0.45 <= x <= 0.55` with a gap above `y = 0.8`.
pub fn walled(q: &Configuration) -> bool {
    let in_wall = (0.45..=0.55).contains(&q[0]) && q[1] < 0.8;
    !in_wall
}

pub type Checker = fn(&Configuration) -> bool;

pub type SquarePrm = Prm<
    UniformSampler,
    SequentialVerifier<Checker, EuclideanMetric>,
    EuclideanMetric,
    LinearNearestNeighbours<EuclideanMetric>,
>;

/// Planner sampling the unit square against `checker`.
pub fn square_prm(builder: PrmBuilder, checker: Checker, seed: u64) -> SquarePrm {
    let sampler = UniformSampler::new(
        Configuration::from([0.0, 0.0]),
        Configuration::from([1.0, 1.0]),
        seed,
    )
    .expect("unit square bounds are valid");
    let verifier =
        SequentialVerifier::new(checker, EuclideanMetric, 0.01).expect("resolution is valid");
    builder
        .build(
            sampler,
            verifier,
            EuclideanMetric,
            LinearNearestNeighbours::new(EuclideanMetric),
        )
        .expect("parameters are valid")
}

pub fn proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = PropertyProfile::from_env(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Sampler replaying a fixed list of configurations, then failing.
pub struct Script(pub Vec<Configuration>);

impl Script {
    pub fn line(points: &[f64]) -> Self {
        Self(points.iter().rev().map(|x| Configuration::from([*x])).collect())
    }
}

impl Sampler for Script {
    fn generate(&mut self) -> Result<Configuration, CollaboratorError> {
        self.0.pop().ok_or_else(|| CollaboratorError::Failed {
            reason: "script exhausted".into(),
        })
    }
}

/// Index wrapper that refuses insertions or removals once armed.
pub struct FlakyIndex {
    inner: LinearNearestNeighbours<EuclideanMetric>,
    pub fail_inserts: Cell<bool>,
    pub fail_removals: Cell<bool>,
}

impl Default for FlakyIndex {
    fn default() -> Self {
        Self {
            inner: LinearNearestNeighbours::new(EuclideanMetric),
            fail_inserts: Cell::new(false),
            fail_removals: Cell::new(false),
        }
    }
}

impl NearestNeighbours for FlakyIndex {
    fn insert(
        &mut self,
        vertex: VertexId,
        configuration: &Configuration,
    ) -> Result<(), CollaboratorError> {
        if self.fail_inserts.get() {
            return Err(CollaboratorError::Failed {
                reason: "insertion refused".into(),
            });
        }
        self.inner.insert(vertex, configuration)
    }

    fn remove(&mut self, vertex: VertexId) -> Result<(), CollaboratorError> {
        if self.fail_removals.get() {
            return Err(CollaboratorError::Failed {
                reason: "removal refused".into(),
            });
        }
        self.inner.remove(vertex)
    }

    fn nearest(
        &self,
        query: &Configuration,
        k: usize,
        radius: f64,
    ) -> Result<Vec<Neighbour>, CollaboratorError> {
        self.inner.nearest(query, k, radius)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn clear(&mut self) {
        self.inner.clear();
    }
}
