//! Shared test utilities used across the roadmap crates.
//!
//! Kept independent of `prm-core` so the core can list it as a
//! dev-dependency.

pub mod property;
pub mod trace;
