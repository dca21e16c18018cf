//! Probabilistic roadmap core.
//!
//! Builds a sparse graph of sampled, feasible configurations joined by
//! verified local motions, and answers start/goal queries against it with A*
//! or Dijkstra. Sampling, feasibility checks, distances, and spatial lookups
//! are delegated to caller-supplied collaborators.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod collaborators;
mod configuration;
mod connectivity;
mod error;
mod insert;
mod prm;
mod query;
mod roadmap;
mod search;
#[cfg(test)]
mod test_utils;
mod validate;

#[cfg(feature = "sampling")]
#[cfg_attr(docsrs, doc(cfg(feature = "sampling")))]
pub use crate::collaborators::UniformSampler;
pub use crate::{
    builder::{PrmBuilder, PrmParams, SearchStrategy},
    collaborators::{
        EuclideanMetric, LinearNearestNeighbours, Metric, NearestNeighbours, Neighbour,
        RecursiveVerifier, Sampler, SequentialVerifier, ValidityChecker, Verifier,
        WeightedEuclideanMetric,
    },
    configuration::Configuration,
    error::{
        CollaboratorError, CollaboratorErrorCode, CollaboratorRole, PrmError, PrmErrorCode,
        Result,
    },
    prm::{ConstructionReport, Prm},
    query::{QueryOutcome, QueryReport},
    roadmap::{Edge, RoadmapGraph, VertexId, VertexKind},
};
