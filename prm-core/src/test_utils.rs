//! Shared test utilities for `prm-core`.

use std::{cell::Cell, collections::VecDeque, rc::Rc};

use prm_test_support::property::PropertyProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{
    Configuration, EuclideanMetric, LinearNearestNeighbours, Prm, PrmBuilder, Sampler, Verifier,
    error::CollaboratorError,
};

/// Builds a proptest configuration from the shared property profile.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = PropertyProfile::from_env(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Sampler replaying a fixed script, then failing.
#[derive(Clone, Debug, Default)]
pub(crate) struct ScriptedSampler {
    script: VecDeque<Configuration>,
    calls: Rc<Cell<usize>>,
}

impl ScriptedSampler {
    /// Replays one-dimensional configurations at the given coordinates.
    pub(crate) fn line(points: impl IntoIterator<Item = f64>) -> Self {
        Self::new(points.into_iter().map(|x| Configuration::from([x])))
    }

    pub(crate) fn new(script: impl IntoIterator<Item = Configuration>) -> Self {
        Self {
            script: script.into_iter().collect(),
            calls: Rc::default(),
        }
    }

    /// Shared counter of `generate` calls.
    pub(crate) fn calls(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.calls)
    }
}

impl Sampler for ScriptedSampler {
    fn generate(&mut self) -> Result<Configuration, CollaboratorError> {
        self.calls.set(self.calls.get() + 1);
        self.script.pop_front().ok_or_else(|| CollaboratorError::Failed {
            reason: "script exhausted".into(),
        })
    }
}

/// Verifier backed by a point predicate; motions are checked at 65 evenly
/// spaced points.
pub(crate) struct PredicateVerifier {
    predicate: Box<dyn Fn(&Configuration) -> bool>,
}

impl PredicateVerifier {
    const MOTION_STEPS: u32 = 64;

    pub(crate) fn new(predicate: impl Fn(&Configuration) -> bool + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
        }
    }

    /// Accepts every configuration and motion.
    pub(crate) fn free() -> Self {
        Self::new(|_| true)
    }
}

impl Verifier for PredicateVerifier {
    fn is_valid(&self, configuration: &Configuration) -> Result<bool, CollaboratorError> {
        Ok((self.predicate)(configuration))
    }

    fn is_valid_motion(
        &self,
        from: &Configuration,
        to: &Configuration,
    ) -> Result<bool, CollaboratorError> {
        for step in 0..=Self::MOTION_STEPS {
            let t = f64::from(step) / f64::from(Self::MOTION_STEPS);
            if !(self.predicate)(&from.interpolate(to, t)?) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

pub(crate) type LinePrm = Prm<
    ScriptedSampler,
    PredicateVerifier,
    EuclideanMetric,
    LinearNearestNeighbours<EuclideanMetric>,
>;

/// Planner over one-dimensional scripted samples.
pub(crate) fn line_prm(
    builder: PrmBuilder,
    sampler: ScriptedSampler,
    verifier: PredicateVerifier,
) -> LinePrm {
    builder
        .build(
            sampler,
            verifier,
            EuclideanMetric,
            LinearNearestNeighbours::new(EuclideanMetric),
        )
        .expect("parameters are valid")
}
