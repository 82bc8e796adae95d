//! Join configuration from environment variables.
//!
//! # Environment Variables
//!
//! - `SJ_CAPACITY`: expected keys per source (default: 10000)
//! - `SJ_FPR`: target false positive rate (default: 0.01)
//! - `SJ_PARALLEL_THRESHOLD`: minimum keys per side before the fill and
//!   verification phases run on the rayon pool (default: 1024)
//! - `SJ_SOURCE_TIMEOUT_SECS`: bound on each source call (default: 30)
//! - `SJ_FETCH_CONCURRENCY`: matched keys whose values are fetched at once
//!   (default: 16)
//!
//! Unparseable values fall back to the default with a warning. The resulting
//! configuration is validated as a whole.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::domain::JoinConfig;
use sj_01_probabilistic_filter::FilterError;

impl JoinConfig {
    /// Load the configuration from `SJ_*` environment variables
    pub fn from_env() -> Result<Self, FilterError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FilterError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(capacity) = parse_var(&lookup, "SJ_CAPACITY") {
            config.filter.capacity = capacity;
        }
        if let Some(fpr) = parse_var(&lookup, "SJ_FPR") {
            config.filter.false_positive_rate = fpr;
        }
        if let Some(threshold) = parse_var(&lookup, "SJ_PARALLEL_THRESHOLD") {
            config.parallel_threshold = threshold;
        }
        if let Some(secs) = parse_var(&lookup, "SJ_SOURCE_TIMEOUT_SECS") {
            config.source_timeout = Duration::from_secs(secs);
        }
        if let Some(limit) = parse_var(&lookup, "SJ_FETCH_CONCURRENCY") {
            config.fetch_concurrency = limit;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = name, value = %raw, "Ignoring unparseable value, using default");
            None
        }
    }
}
