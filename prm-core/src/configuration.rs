//! Configuration vectors describing one state of the planned system.

use std::{ops::Deref, sync::Arc};

use crate::error::CollaboratorError;

/// An immutable point in configuration space.
///
/// Storage is reference counted, so cloning a configuration to hand it to the
/// nearest-neighbour index or to a returned path does not copy coordinates.
///
/// # Examples
/// ```
/// use prm_core::Configuration;
///
/// let q = Configuration::from([0.0, 1.5]);
/// assert_eq!(q.dimension(), 2);
/// assert_eq!(q[1], 1.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration(Arc<[f64]>);

impl Configuration {
    /// Wraps the provided coordinates.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self(values.into())
    }

    /// Returns the number of coordinates.
    #[must_use]
    #[rustfmt::skip]
    pub fn dimension(&self) -> usize { self.0.len() }

    /// Returns the coordinates as a slice.
    #[must_use]
    #[rustfmt::skip]
    pub fn as_slice(&self) -> &[f64] { &self.0 }

    /// Ensures `other` has the same dimension as `self`.
    ///
    /// # Errors
    /// Returns [`CollaboratorError::DimensionMismatch`] when the dimensions
    /// differ.
    pub fn check_dimension(&self, other: &Self) -> Result<(), CollaboratorError> {
        if self.dimension() == other.dimension() {
            Ok(())
        } else {
            Err(CollaboratorError::DimensionMismatch {
                left: self.dimension(),
                right: other.dimension(),
            })
        }
    }

    /// Ensures every coordinate is finite.
    ///
    /// # Errors
    /// Returns [`CollaboratorError::NonFinite`] for the first NaN or infinity.
    pub fn check_finite(&self) -> Result<(), CollaboratorError> {
        match self.0.iter().enumerate().find(|(_, value)| !value.is_finite()) {
            Some((index, value)) => Err(CollaboratorError::NonFinite {
                index,
                value: *value,
            }),
            None => Ok(()),
        }
    }

    /// Linearly interpolates towards `other`; `t = 0` yields `self` and
    /// `t = 1` yields `other`.
    ///
    /// # Errors
    /// Returns [`CollaboratorError::DimensionMismatch`] when the dimensions
    /// differ.
    ///
    /// # Examples
    /// ```
    /// use prm_core::Configuration;
    ///
    /// let a = Configuration::from([0.0, 0.0]);
    /// let b = Configuration::from([2.0, 4.0]);
    /// let mid = a.interpolate(&b, 0.5)?;
    /// assert_eq!(mid.as_slice(), &[1.0, 2.0]);
    /// # Ok::<(), prm_core::CollaboratorError>(())
    /// ```
    pub fn interpolate(&self, other: &Self, t: f64) -> Result<Self, CollaboratorError> {
        self.check_dimension(other)?;
        Ok(self
            .0
            .iter()
            .zip(other.0.iter())
            .map(|(from, to)| from + (to - from) * t)
            .collect())
    }
}

impl Deref for Configuration {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[f64]> for Configuration {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for Configuration {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl<const N: usize> From<[f64; N]> for Configuration {
    fn from(values: [f64; N]) -> Self {
        Self(Arc::from(values.as_slice()))
    }
}

impl From<&[f64]> for Configuration {
    fn from(values: &[f64]) -> Self {
        Self(Arc::from(values))
    }
}

impl FromIterator<f64> for Configuration {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
