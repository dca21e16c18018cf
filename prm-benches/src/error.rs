//! Benchmark setup error type.
//!
//! Lets setup helpers propagate failures with `?` instead of panicking
//! inside Criterion closures.

use prm_core::{CollaboratorError, PrmError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Planner construction or a planner operation failed.
    #[error("planner operation failed: {0}")]
    Prm(#[from] PrmError),
    /// A reference collaborator rejected its configuration.
    #[error("collaborator setup failed: {0}")]
    Collaborator(#[from] CollaboratorError),
    /// The world could not place the requested obstacles.
    #[error("could not place {requested} discs of radius {radius} with free corners")]
    Crowded {
        /// Number of discs requested.
        requested: usize,
        /// Radius of every disc.
        radius: f64,
    },
}
