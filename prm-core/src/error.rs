//! Error types for the roadmap core.
//!
//! Collaborators report [`CollaboratorError`]s; the planner wraps them in
//! [`PrmError::Collaborator`] together with the role that failed so callers
//! can tell a broken sampler from a broken index.

use std::fmt;

use thiserror::Error;

use crate::roadmap::VertexId;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error reported by a sampler, verifier, metric, or nearest-neighbour
/// index.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CollaboratorError {
    /// Two configurations had different dimensions.
    #[error("dimension mismatch: left={left}, right={right}")]
    DimensionMismatch {
        /// Dimension of the left-hand configuration.
        left: usize,
        /// Dimension of the right-hand configuration.
        right: usize,
    },
    /// A configuration contained NaN or an infinity.
    #[error("configuration contains a non-finite value at index {index}: {value}")]
    NonFinite {
        /// Coordinate index of the offending value.
        index: usize,
        /// The offending value.
        value: f64,
    },
    /// The index was asked to remove a vertex it does not hold.
    #[error("vertex {vertex} is not present in the index")]
    UnknownVertex {
        /// Vertex that could not be found.
        vertex: VertexId,
    },
    /// The index was asked to insert a vertex it already holds.
    #[error("vertex {vertex} is already present in the index")]
    DuplicateVertex {
        /// Vertex that was inserted twice.
        vertex: VertexId,
    },
    /// Sampling bounds or weights were malformed.
    #[error("invalid bounds: {reason}")]
    InvalidBounds {
        /// Description of the malformed input.
        reason: String,
    },
    /// Any other failure raised by a caller-supplied collaborator.
    #[error("{reason}")]
    Failed {
        /// Free-form failure description.
        reason: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`CollaboratorError`] variants.
    enum CollaboratorErrorCode for CollaboratorError {
        /// Two configurations had different dimensions.
        DimensionMismatch => DimensionMismatch { .. } => "COLLABORATOR_DIMENSION_MISMATCH",
        /// A configuration contained NaN or an infinity.
        NonFinite => NonFinite { .. } => "COLLABORATOR_NON_FINITE",
        /// The index was asked to remove a vertex it does not hold.
        UnknownVertex => UnknownVertex { .. } => "COLLABORATOR_UNKNOWN_VERTEX",
        /// The index was asked to insert a vertex it already holds.
        DuplicateVertex => DuplicateVertex { .. } => "COLLABORATOR_DUPLICATE_VERTEX",
        /// Sampling bounds or weights were malformed.
        InvalidBounds => InvalidBounds { .. } => "COLLABORATOR_INVALID_BOUNDS",
        /// Any other failure raised by a caller-supplied collaborator.
        Failed => Failed { .. } => "COLLABORATOR_FAILED",
    }
}

/// Identifies which collaborator produced a [`CollaboratorError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CollaboratorRole {
    /// The configuration sampler.
    Sampler,
    /// The configuration and motion verifier.
    Verifier,
    /// The distance metric.
    Metric,
    /// The spatial nearest-neighbour index.
    NearestNeighbours,
}

impl fmt::Display for CollaboratorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sampler => f.write_str("sampler"),
            Self::Verifier => f.write_str("verifier"),
            Self::Metric => f.write_str("metric"),
            Self::NearestNeighbours => f.write_str("nearest-neighbour index"),
        }
    }
}

/// Error type produced when configuring or running [`crate::Prm`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PrmError {
    /// Builder parameters were rejected.
    #[error("invalid roadmap parameter: {reason}")]
    InvalidParameters {
        /// Why the parameter set was rejected.
        reason: String,
    },
    /// A path was requested without a preceding successful query.
    #[error("no path is available; the last query did not succeed")]
    PathUnavailable,
    /// A collaborator failed; the failure is propagated unchanged.
    #[error("{role} failed: {error}")]
    Collaborator {
        /// Collaborator that reported the failure.
        role: CollaboratorRole,
        #[source]
        /// Underlying collaborator error.
        error: CollaboratorError,
    },
    /// The metric returned NaN or an infinity.
    #[error("metric returned a non-finite distance: {value}")]
    NonFiniteDistance {
        /// The offending distance.
        value: f64,
    },
    /// Internal state referenced a vertex that is not live.
    #[error("roadmap invariant violated: {message}")]
    GraphInvariantViolation {
        /// Description of the violated invariant.
        message: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`PrmError`] variants.
    enum PrmErrorCode for PrmError {
        /// Builder parameters were rejected.
        InvalidParameters => InvalidParameters { .. } => "PRM_INVALID_PARAMETERS",
        /// A path was requested without a preceding successful query.
        PathUnavailable => PathUnavailable => "PRM_PATH_UNAVAILABLE",
        /// A collaborator failed.
        CollaboratorFailure => Collaborator { .. } => "PRM_COLLABORATOR_FAILURE",
        /// The metric returned NaN or an infinity.
        NonFiniteDistance => NonFiniteDistance { .. } => "PRM_NON_FINITE_DISTANCE",
        /// Internal state referenced a vertex that is not live.
        GraphInvariantViolation => GraphInvariantViolation { .. } => "PRM_GRAPH_INVARIANT_VIOLATION",
    }
}

impl PrmError {
    /// Retrieve the inner [`CollaboratorErrorCode`] when a collaborator failed.
    #[must_use]
    pub const fn collaborator_code(&self) -> Option<CollaboratorErrorCode> {
        match self {
            Self::Collaborator { error, .. } => Some(error.code()),
            _ => None,
        }
    }

    pub(crate) fn sampler(error: CollaboratorError) -> Self {
        Self::Collaborator {
            role: CollaboratorRole::Sampler,
            error,
        }
    }

    pub(crate) fn verifier(error: CollaboratorError) -> Self {
        Self::Collaborator {
            role: CollaboratorRole::Verifier,
            error,
        }
    }

    pub(crate) fn metric(error: CollaboratorError) -> Self {
        Self::Collaborator {
            role: CollaboratorRole::Metric,
            error,
        }
    }

    pub(crate) fn nearest(error: CollaboratorError) -> Self {
        Self::Collaborator {
            role: CollaboratorRole::NearestNeighbours,
            error,
        }
    }

    pub(crate) fn missing_vertex(vertex: VertexId, context: &str) -> Self {
        Self::GraphInvariantViolation {
            message: format!("vertex {vertex} missing during {context}"),
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, PrmError>;
