//! Guards applied to values returned by collaborators.

use crate::{
    collaborators::Metric,
    configuration::Configuration,
    error::{PrmError, Result},
};

/// Measures `a` to `b` and rejects NaN, infinite, or negative distances.
pub(crate) fn validate_distance<M: Metric>(
    metric: &M,
    a: &Configuration,
    b: &Configuration,
) -> Result<f64> {
    let value = metric.distance(a, b).map_err(PrmError::metric)?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(PrmError::NonFiniteDistance { value })
    }
}
