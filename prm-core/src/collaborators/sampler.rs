//! Seeded uniform sampling inside an axis-aligned box.

use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{collaborators::Sampler, configuration::Configuration, error::CollaboratorError};

/// Draws each coordinate uniformly from `[lower[i], upper[i]]`.
///
/// Sequences are reproducible for a fixed seed.
///
/// # Examples
/// ```
/// use prm_core::{Configuration, Sampler, UniformSampler};
///
/// let mut sampler = UniformSampler::new(
///     Configuration::from([0.0, -1.0]),
///     Configuration::from([1.0, 1.0]),
///     7,
/// )?;
/// let q = sampler.generate()?;
/// assert!((0.0..=1.0).contains(&q[0]));
/// assert!((-1.0..=1.0).contains(&q[1]));
/// # Ok::<(), prm_core::CollaboratorError>(())
/// ```
#[derive(Clone, Debug)]
pub struct UniformSampler {
    lower: Configuration,
    upper: Configuration,
    rng: SmallRng,
}

impl UniformSampler {
    /// Creates a sampler over the box spanned by `lower` and `upper`.
    ///
    /// # Errors
    /// Returns [`CollaboratorError::DimensionMismatch`] when the bounds differ
    /// in dimension, [`CollaboratorError::NonFinite`] when a bound is not
    /// finite, and [`CollaboratorError::InvalidBounds`] when the box is empty
    /// or zero-dimensional.
    pub fn new(
        lower: Configuration,
        upper: Configuration,
        seed: u64,
    ) -> Result<Self, CollaboratorError> {
        lower.check_dimension(&upper)?;
        lower.check_finite()?;
        upper.check_finite()?;
        if lower.dimension() == 0 {
            return Err(CollaboratorError::InvalidBounds {
                reason: "bounds must have positive dimension".into(),
            });
        }
        if let Some(index) = lower
            .iter()
            .zip(upper.iter())
            .position(|(low, high)| low > high)
        {
            return Err(CollaboratorError::InvalidBounds {
                reason: format!("lower bound exceeds upper bound at index {index}"),
            });
        }
        Ok(Self {
            lower,
            upper,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// Returns the lower corner of the sampling box.
    #[must_use]
    #[rustfmt::skip]
    pub fn lower(&self) -> &Configuration { &self.lower }

    /// Returns the upper corner of the sampling box.
    #[must_use]
    #[rustfmt::skip]
    pub fn upper(&self) -> &Configuration { &self.upper }
}

impl Sampler for UniformSampler {
    fn generate(&mut self) -> Result<Configuration, CollaboratorError> {
        let rng = &mut self.rng;
        Ok(self
            .lower
            .iter()
            .zip(self.upper.iter())
            .map(|(&low, &high)| rng.gen_range(low..=high))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_stay_inside_bounds() {
        let mut sampler = UniformSampler::new(
            Configuration::from([-2.0, 0.0, 5.0]),
            Configuration::from([2.0, 0.0, 6.0]),
            11,
        )
        .expect("bounds are valid");
        for _ in 0..200 {
            let q = sampler.generate().expect("sampling never fails");
            assert!((-2.0..=2.0).contains(&q[0]));
            assert_eq!(q[1], 0.0);
            assert!((5.0..=6.0).contains(&q[2]));
        }
    }

    #[test]
    fn equal_seeds_produce_equal_sequences() {
        let bounds = (Configuration::from([0.0, 0.0]), Configuration::from([1.0, 1.0]));
        let mut a = UniformSampler::new(bounds.0.clone(), bounds.1.clone(), 3).expect("valid");
        let mut b = UniformSampler::new(bounds.0, bounds.1, 3).expect("valid");
        for _ in 0..16 {
            assert_eq!(a.generate().expect("sample"), b.generate().expect("sample"));
        }
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let err = UniformSampler::new(Configuration::from([1.0]), Configuration::from([0.0]), 0)
            .expect_err("lower exceeds upper");
        assert!(matches!(err, CollaboratorError::InvalidBounds { .. }));
    }

    #[test]
    fn infinite_bounds_are_rejected() {
        let err = UniformSampler::new(
            Configuration::from([0.0]),
            Configuration::from([f64::INFINITY]),
            0,
        )
        .expect_err("bounds must be finite");
        assert!(matches!(err, CollaboratorError::NonFinite { index: 0, .. }));
    }
}
