//! Motion verifiers built on a per-configuration validity check.
//!
//! Both verifiers discretise the straight motion so that consecutive checked
//! configurations are at most `delta` apart under the metric. They differ only
//! in the order points are visited: [`SequentialVerifier`] sweeps from the
//! start, [`RecursiveVerifier`] bisects, which tends to find collisions in
//! the middle of long motions sooner.

use std::collections::VecDeque;

use crate::{
    collaborators::{Metric, ValidityChecker, Verifier},
    configuration::Configuration,
    error::CollaboratorError,
};

fn validate_delta(delta: f64) -> Result<f64, CollaboratorError> {
    if delta.is_finite() && delta > 0.0 {
        Ok(delta)
    } else {
        Err(CollaboratorError::InvalidBounds {
            reason: format!("resolution must be finite and positive (got {delta})"),
        })
    }
}

/// Upper bound on the checks spent on a single motion.
pub(crate) const MAX_MOTION_STEPS: usize = 1 << 24;

fn segment_count(distance: f64, delta: f64) -> Result<usize, CollaboratorError> {
    let steps = (distance / delta).ceil();
    if !(steps.is_finite() && steps <= MAX_MOTION_STEPS as f64) {
        return Err(CollaboratorError::Failed {
            reason: format!(
                "cannot discretise a motion of length {distance} at resolution {delta} \
                 within {MAX_MOTION_STEPS} steps"
            ),
        });
    }
    Ok((steps as usize).max(1))
}

/// Checks a motion at evenly spaced points from start to end.
#[derive(Clone, Debug)]
pub struct SequentialVerifier<C, M> {
    checker: C,
    metric: M,
    delta: f64,
}

impl<C: ValidityChecker, M: Metric> SequentialVerifier<C, M> {
    /// Creates a verifier checking every `delta` along each motion.
    ///
    /// # Errors
    /// Returns [`CollaboratorError::InvalidBounds`] when `delta` is not a
    /// finite positive number.
    ///
    /// # Examples
    /// ```
    /// use prm_core::{Configuration, EuclideanMetric, SequentialVerifier, Verifier};
    ///
    /// // A wall occupies 0.4 < x < 0.6.
    /// let free = |q: &Configuration| !(0.4 < q[0] && q[0] < 0.6);
    /// let verifier = SequentialVerifier::new(free, EuclideanMetric, 0.05)?;
    /// let left = Configuration::from([0.0]);
    /// let right = Configuration::from([1.0]);
    /// assert!(verifier.is_valid(&left)?);
    /// assert!(!verifier.is_valid_motion(&left, &right)?);
    /// # Ok::<(), prm_core::CollaboratorError>(())
    /// ```
    pub fn new(checker: C, metric: M, delta: f64) -> Result<Self, CollaboratorError> {
        Ok(Self {
            checker,
            metric,
            delta: validate_delta(delta)?,
        })
    }

    /// Returns the discretisation resolution.
    #[must_use]
    #[rustfmt::skip]
    pub fn delta(&self) -> f64 { self.delta }
}

impl<C: ValidityChecker, M: Metric> Verifier for SequentialVerifier<C, M> {
    fn is_valid(&self, configuration: &Configuration) -> Result<bool, CollaboratorError> {
        self.checker.check(configuration)
    }

    fn is_valid_motion(
        &self,
        from: &Configuration,
        to: &Configuration,
    ) -> Result<bool, CollaboratorError> {
        let steps = segment_count(self.metric.distance(from, to)?, self.delta)?;
        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            if !self.checker.check(&from.interpolate(to, t)?)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Checks a motion by repeated bisection.
///
/// Endpoints are checked first, then midpoints of ever smaller segments in
/// breadth-first order until every segment is no longer than `delta`.
#[derive(Clone, Debug)]
pub struct RecursiveVerifier<C, M> {
    checker: C,
    metric: M,
    delta: f64,
}

impl<C: ValidityChecker, M: Metric> RecursiveVerifier<C, M> {
    /// Creates a verifier bisecting motions down to `delta`.
    ///
    /// # Errors
    /// Returns [`CollaboratorError::InvalidBounds`] when `delta` is not a
    /// finite positive number.
    pub fn new(checker: C, metric: M, delta: f64) -> Result<Self, CollaboratorError> {
        Ok(Self {
            checker,
            metric,
            delta: validate_delta(delta)?,
        })
    }

    /// Returns the discretisation resolution.
    #[must_use]
    #[rustfmt::skip]
    pub fn delta(&self) -> f64 { self.delta }
}

impl<C: ValidityChecker, M: Metric> Verifier for RecursiveVerifier<C, M> {
    fn is_valid(&self, configuration: &Configuration) -> Result<bool, CollaboratorError> {
        self.checker.check(configuration)
    }

    fn is_valid_motion(
        &self,
        from: &Configuration,
        to: &Configuration,
    ) -> Result<bool, CollaboratorError> {
        segment_count(self.metric.distance(from, to)?, self.delta)?;
        if !self.checker.check(from)? || !self.checker.check(to)? {
            return Ok(false);
        }
        let mut pending = VecDeque::new();
        pending.push_back((from.clone(), to.clone()));
        while let Some((start, end)) = pending.pop_front() {
            if self.metric.distance(&start, &end)? <= self.delta {
                continue;
            }
            let middle = start.interpolate(&end, 0.5)?;
            if !self.checker.check(&middle)? {
                return Ok(false);
            }
            pending.push_back((start, middle.clone()));
            pending.push_back((middle, end));
        }
        Ok(true)
    }
}
