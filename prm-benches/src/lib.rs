//! Benchmark support crate for the roadmap planner.
//!
//! Provides a seeded two-dimensional world of disc obstacles and the planner
//! configuration used by the Criterion benchmarks for roadmap construction
//! and query answering.

pub mod error;
pub mod params;
pub mod world;
