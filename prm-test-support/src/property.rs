//! Environment-driven sizing for property-based test suites.
//!
//! `PRM_PBT_CASES` overrides the number of cases per property and
//! `PRM_PBT_FORK` toggles running each case in a forked process. Malformed
//! overrides are reported with a warning and ignored.

use std::env;

/// Variable overriding the number of cases per property.
pub const CASES_ENV: &str = "PRM_PBT_CASES";
/// Variable toggling forked execution.
pub const FORK_ENV: &str = "PRM_PBT_FORK";

/// Case count and fork mode for a property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyProfile {
    cases: u32,
    fork: bool,
}

impl PropertyProfile {
    /// Builds a profile from the environment, falling back to the given
    /// defaults.
    ///
    /// # Examples
    /// ```
    /// use prm_test_support::property::PropertyProfile;
    ///
    /// let profile = PropertyProfile::from_env(32, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn from_env(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(CASES_ENV, default_cases, parse_cases),
            fork: override_or(FORK_ENV, default_fork, parse_switch),
        }
    }

    /// Number of cases per property.
    #[must_use]
    #[rustfmt::skip]
    pub fn cases(&self) -> u32 { self.cases }

    /// Whether cases run in forked processes.
    #[must_use]
    #[rustfmt::skip]
    pub fn fork(&self) -> bool { self.fork }
}

fn override_or<T>(key: &'static str, default: T, parse: fn(&str) -> Option<T>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|| {
        tracing::warn!(env = key, raw = %raw, "ignoring malformed property-test override");
        default
    })
}

fn parse_cases(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|cases| *cases > 0)
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
