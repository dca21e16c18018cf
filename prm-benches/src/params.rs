//! Benchmark parameter types.

use std::fmt;

/// Parameters for a roadmap benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct RoadmapBenchParams {
    /// Construction attempts.
    pub samples: usize,
    /// Candidate neighbours examined per insertion.
    pub max_neighbours: usize,
}

impl fmt::Display for RoadmapBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},k={}", self.samples, self.max_neighbours)
    }
}
