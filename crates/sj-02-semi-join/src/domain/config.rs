//! Join configuration
//!
//! Loading from the environment lives in the crate-level `config` module.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use sj_01_probabilistic_filter::{FilterConfig, FilterError, DEFAULT_FALSE_POSITIVE_RATE};

/// Default expected keys per source
pub const DEFAULT_CAPACITY: usize = 10_000;
/// Default size at which the rayon pool takes over
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;
/// Default bound on each source call
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(30);
/// Default number of matched keys whose values are fetched at once
pub const DEFAULT_FETCH_CONCURRENCY: usize = 16;

/// Configuration for one semi-join
///
/// `filter.capacity` should be close to the larger key set. A capacity far
/// below the real key counts does not fail; it raises the false positive
/// rate, which only costs extra verification work.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JoinConfig {
    /// Shape shared by the left and right filters
    pub filter: FilterConfig,
    /// Both sides must hold at least this many keys to go parallel
    pub parallel_threshold: usize,
    /// Bound on each call to a key-value source
    pub source_timeout: Duration,
    /// Matched keys fetched concurrently; each key costs one call per side
    pub fetch_concurrency: usize,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            filter: FilterConfig {
                capacity: DEFAULT_CAPACITY,
                false_positive_rate: DEFAULT_FALSE_POSITIVE_RATE,
            },
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            source_timeout: DEFAULT_SOURCE_TIMEOUT,
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
        }
    }
}

impl JoinConfig {
    /// Create a validated configuration with default tuning
    pub fn new(capacity: usize, false_positive_rate: f64) -> Result<Self, FilterError> {
        Ok(Self {
            filter: FilterConfig::new(capacity, false_positive_rate)?,
            ..Default::default()
        })
    }

    /// Validate the filter part of the configuration
    pub fn validate(&self) -> Result<(), FilterError> {
        self.filter.validate()
    }

    /// Never use the rayon pool
    pub fn sequential(mut self) -> Self {
        self.parallel_threshold = usize::MAX;
        self
    }

    /// Whether inputs of these sizes take the parallel path
    pub fn is_parallel_for(&self, left_keys: usize, right_keys: usize) -> bool {
        left_keys >= self.parallel_threshold && right_keys >= self.parallel_threshold
    }

    /// Fetch limit actually applied; zero means one at a time
    pub fn fetch_limit(&self) -> usize {
        self.fetch_concurrency.max(1)
    }
}

/// Builder for JoinConfig with validation
#[derive(Debug, Default)]
pub struct JoinConfigBuilder {
    capacity: Option<usize>,
    false_positive_rate: Option<f64>,
    parallel_threshold: Option<usize>,
    source_timeout: Option<Duration>,
    fetch_concurrency: Option<usize>,
}

impl JoinConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set expected keys per source
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Set target false positive rate
    pub fn false_positive_rate(mut self, fpr: f64) -> Self {
        self.false_positive_rate = Some(fpr);
        self
    }

    /// Set the size at which the rayon pool takes over
    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = Some(threshold);
        self
    }

    /// Set the bound on each source call
    pub fn source_timeout(mut self, timeout: Duration) -> Self {
        self.source_timeout = Some(timeout);
        self
    }

    /// Set how many matched keys are fetched at once
    pub fn fetch_concurrency(mut self, limit: usize) -> Self {
        self.fetch_concurrency = Some(limit);
        self
    }

    /// Build the JoinConfig, validating the filter parameters
    pub fn build(self) -> Result<JoinConfig, FilterError> {
        let defaults = JoinConfig::default();

        let config = JoinConfig {
            filter: FilterConfig {
                capacity: self.capacity.unwrap_or(defaults.filter.capacity),
                false_positive_rate: self
                    .false_positive_rate
                    .unwrap_or(defaults.filter.false_positive_rate),
            },
            parallel_threshold: self.parallel_threshold.unwrap_or(defaults.parallel_threshold),
            source_timeout: self.source_timeout.unwrap_or(defaults.source_timeout),
            fetch_concurrency: self.fetch_concurrency.unwrap_or(defaults.fetch_concurrency),
        };

        config.validate()?;
        Ok(config)
    }
}
