//! Built-in distance metrics.

use crate::{collaborators::Metric, configuration::Configuration, error::CollaboratorError};

/// Straight-line (L2) distance in configuration space.
///
/// # Examples
/// ```
/// use prm_core::{Configuration, EuclideanMetric, Metric};
///
/// let d = EuclideanMetric.distance(
///     &Configuration::from([0.0, 0.0]),
///     &Configuration::from([3.0, 4.0]),
/// )?;
/// assert_eq!(d, 5.0);
/// # Ok::<(), prm_core::CollaboratorError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EuclideanMetric;

impl Metric for EuclideanMetric {
    fn distance(&self, a: &Configuration, b: &Configuration) -> Result<f64, CollaboratorError> {
        a.check_dimension(b)?;
        let sum: f64 = a
            .iter()
            .zip(b.iter())
            .map(|(left, right)| {
                let diff = left - right;
                diff * diff
            })
            .sum();
        Ok(sum.sqrt())
    }
}

/// L2 distance with a non-negative weight per coordinate, e.g. to make
/// proximal joints of an arm count more than distal ones.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedEuclideanMetric {
    weights: Vec<f64>,
}

impl WeightedEuclideanMetric {
    /// Creates a metric with the given coordinate weights.
    ///
    /// # Errors
    /// Returns [`CollaboratorError::InvalidBounds`] when `weights` is empty or
    /// any weight is negative or non-finite.
    pub fn new(weights: Vec<f64>) -> Result<Self, CollaboratorError> {
        if weights.is_empty() {
            return Err(CollaboratorError::InvalidBounds {
                reason: "at least one weight is required".into(),
            });
        }
        if let Some((index, weight)) = weights
            .iter()
            .enumerate()
            .find(|(_, weight)| !weight.is_finite() || **weight < 0.0)
        {
            return Err(CollaboratorError::InvalidBounds {
                reason: format!("weight {index} must be finite and non-negative (got {weight})"),
            });
        }
        Ok(Self { weights })
    }

    /// Returns the configured weights.
    #[must_use]
    #[rustfmt::skip]
    pub fn weights(&self) -> &[f64] { &self.weights }
}

impl Metric for WeightedEuclideanMetric {
    fn distance(&self, a: &Configuration, b: &Configuration) -> Result<f64, CollaboratorError> {
        a.check_dimension(b)?;
        if a.dimension() != self.weights.len() {
            return Err(CollaboratorError::DimensionMismatch {
                left: a.dimension(),
                right: self.weights.len(),
            });
        }
        let sum: f64 = a
            .iter()
            .zip(b.iter())
            .zip(self.weights.iter())
            .map(|((left, right), weight)| {
                let diff = left - right;
                weight * diff * diff
            })
            .sum();
        Ok(sum.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(&[0.0], &[1.0], 1.0)]
    #[case(&[1.0, 1.0], &[4.0, 5.0], 5.0)]
    #[case(&[2.0, -2.0, 0.5], &[2.0, -2.0, 0.5], 0.0)]
    fn euclidean_matches_hand_computed_values(
        #[case] a: &[f64],
        #[case] b: &[f64],
        #[case] expected: f64,
    ) {
        let d = EuclideanMetric
            .distance(&Configuration::from(a), &Configuration::from(b))
            .expect("dimensions match");
        assert!((d - expected).abs() < 1e-12, "expected {expected}, got {d}");
    }

    #[test]
    fn euclidean_rejects_dimension_mismatch() {
        let err = EuclideanMetric
            .distance(&Configuration::from([0.0]), &Configuration::from([0.0, 0.0]))
            .expect_err("dimensions differ");
        assert_eq!(
            err,
            CollaboratorError::DimensionMismatch { left: 1, right: 2 }
        );
    }

    #[test]
    fn weighted_metric_scales_each_coordinate() {
        let metric = WeightedEuclideanMetric::new(vec![4.0, 0.0]).expect("weights are valid");
        let d = metric
            .distance(
                &Configuration::from([0.0, 0.0]),
                &Configuration::from([1.0, 100.0]),
            )
            .expect("dimensions match");
        assert!((d - 2.0).abs() < 1e-12);
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![1.0, -0.5])]
    #[case(vec![f64::NAN])]
    fn weighted_metric_rejects_bad_weights(#[case] weights: Vec<f64>) {
        let err = WeightedEuclideanMetric::new(weights).expect_err("weights are invalid");
        assert!(matches!(err, CollaboratorError::InvalidBounds { .. }));
    }

    #[test]
    fn weighted_metric_rejects_configurations_of_other_dimension() {
        let metric = WeightedEuclideanMetric::new(vec![1.0]).expect("weights are valid");
        let err = metric
            .distance(&Configuration::from([0.0, 0.0]), &Configuration::from([1.0, 1.0]))
            .expect_err("weights do not cover the dimension");
        assert!(matches!(err, CollaboratorError::DimensionMismatch { .. }));
    }
}
