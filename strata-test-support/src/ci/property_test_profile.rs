//! Property-test run profile read from the environment.
//!
//! Every proptest suite in the workspace derives its case count and fork
//! mode from one [`ProptestRunProfile`], so CI can scale all suites at once:
//!
//! - `PROGTEST_CASES`: positive case count per property.
//! - `STRATA_PBT_FORK`: run cases in forked subprocesses
//!   (`true`/`false`/`1`/`0`/`yes`/`no`/`on`/`off`).
//!
//! Malformed overrides are logged and ignored.

use std::{env, fmt};

/// Environment variable controlling proptest case counts.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable controlling proptest process forking.
pub const STRATA_PBT_FORK_ENV_KEY: &str = "STRATA_PBT_FORK";

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Loads a profile from the process environment, falling back to the
    /// given defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self::load_from(|key| env::var(key).ok(), default_cases, default_fork)
    }

    /// Loads a profile through `lookup`, which maps variable names to raw
    /// values.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load_from(
    ///     |key| (key == "PROGTEST_CASES").then(|| "12".to_owned()),
    ///     64,
    ///     false,
    /// );
    /// assert_eq!(profile.cases(), 12);
    /// assert!(!profile.fork());
    /// ```
    #[must_use]
    pub fn load_from<F>(lookup: F, default_cases: u32, default_fork: bool) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            cases: read_override(&lookup, PROGTEST_CASES_ENV_KEY, parse_cases)
                .unwrap_or(default_cases),
            fork: read_override(&lookup, STRATA_PBT_FORK_ENV_KEY, parse_switch)
                .unwrap_or(default_fork),
        }
    }

    /// Number of cases to run per property.
    #[rustfmt::skip]
    #[must_use]
    pub fn cases(&self) -> u32 { self.cases }

    /// Whether to run proptest cases in forked subprocesses.
    #[rustfmt::skip]
    #[must_use]
    pub fn fork(&self) -> bool { self.fork }
}

/// Why an override was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
enum InvalidOverride {
    NotANumber(String),
    ZeroCases,
    NotASwitch,
}

impl fmt::Display for InvalidOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber(reason) => write!(f, "parse error: {reason}"),
            Self::ZeroCases => f.write_str("cases must be > 0"),
            Self::NotASwitch => f.write_str("expected one of: true/false/1/0/yes/no/on/off"),
        }
    }
}

fn read_override<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    parse: fn(&str) -> Result<T, InvalidOverride>,
) -> Option<T> {
    let raw = lookup(key)?;
    parse(&raw)
        .inspect_err(|reason| {
            tracing::warn!(
                env = key,
                raw = %raw,
                reason = %reason,
                "invalid property-test profile override; using default",
            );
        })
        .ok()
}

fn parse_cases(raw: &str) -> Result<u32, InvalidOverride> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(InvalidOverride::ZeroCases),
        Ok(cases) => Ok(cases),
        Err(error) => Err(InvalidOverride::NotANumber(error.to_string())),
    }
}

fn parse_switch(raw: &str) -> Result<bool, InvalidOverride> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(InvalidOverride::NotASwitch),
    }
}
