//! Seeded planar world of disc obstacles inside the unit square.

use prm_core::{
    CollaboratorError, Configuration, EuclideanMetric, LinearNearestNeighbours, Prm, PrmBuilder,
    RecursiveVerifier, UniformSampler, ValidityChecker,
};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{error::BenchSetupError, params::RoadmapBenchParams};

/// Query start, near the lower-left corner.
pub const START: [f64; 2] = [0.05, 0.05];
/// Query goal, near the upper-right corner.
pub const GOAL: [f64; 2] = [0.95, 0.95];

/// Resolution used by the motion verifier.
pub const MOTION_RESOLUTION: f64 = 0.005;

const PLACEMENT_ATTEMPTS_PER_DISC: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Disc {
    centre: [f64; 2],
    radius: f64,
}

impl Disc {
    fn contains(&self, point: [f64; 2]) -> bool {
        let dx = point[0] - self.centre[0];
        let dy = point[1] - self.centre[1];
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// Unit square with non-overlapping-corner disc obstacles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiscWorld {
    discs: Vec<Disc>,
}

impl DiscWorld {
    /// Scatters `count` discs of `radius` uniformly, rejecting placements
    /// that would cover [`START`] or [`GOAL`].
    ///
    /// # Errors
    /// Returns [`BenchSetupError::Crowded`] when the discs cannot be placed.
    pub fn random(count: usize, radius: f64, seed: u64) -> Result<Self, BenchSetupError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut discs = Vec::with_capacity(count);
        let mut attempts = 0;
        while discs.len() < count {
            attempts += 1;
            if attempts > count.saturating_mul(PLACEMENT_ATTEMPTS_PER_DISC) {
                return Err(BenchSetupError::Crowded {
                    requested: count,
                    radius,
                });
            }
            let disc = Disc {
                centre: [rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)],
                radius,
            };
            if !disc.contains(START) && !disc.contains(GOAL) {
                discs.push(disc);
            }
        }
        Ok(Self { discs })
    }

    /// Returns the number of obstacles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.discs.len()
    }

    /// Returns whether the world has no obstacles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.discs.is_empty()
    }
}

impl ValidityChecker for DiscWorld {
    fn check(&self, configuration: &Configuration) -> Result<bool, CollaboratorError> {
        let &[x, y] = configuration.as_slice() else {
            return Err(CollaboratorError::DimensionMismatch {
                left: 2,
                right: configuration.dimension(),
            });
        };
        Ok(self.discs.iter().all(|disc| !disc.contains([x, y])))
    }
}

/// Planner type used by the benchmarks.
pub type DiscPrm = Prm<
    UniformSampler,
    RecursiveVerifier<DiscWorld, EuclideanMetric>,
    EuclideanMetric,
    LinearNearestNeighbours<EuclideanMetric>,
>;

/// Builds a planner over `world` sampling the unit square.
///
/// # Errors
/// Propagates sampler, verifier, and builder validation failures.
pub fn planner(
    world: DiscWorld,
    params: RoadmapBenchParams,
    seed: u64,
) -> Result<DiscPrm, BenchSetupError> {
    let sampler = UniformSampler::new(
        Configuration::from([0.0, 0.0]),
        Configuration::from([1.0, 1.0]),
        seed,
    )?;
    let verifier = RecursiveVerifier::new(world, EuclideanMetric, MOTION_RESOLUTION)?;
    Ok(PrmBuilder::new()
        .with_max_neighbours(params.max_neighbours)
        .with_max_radius(0.3)
        .build(
            sampler,
            verifier,
            EuclideanMetric,
            LinearNearestNeighbours::new(EuclideanMetric),
        )?)
}
