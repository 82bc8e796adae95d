//! Filter configuration and validation
//!
//! # Example
//!
//! ```
//! use sj_01_probabilistic_filter::FilterConfigBuilder;
//!
//! let config = FilterConfigBuilder::new()
//!     .capacity(10_000)
//!     .false_positive_rate(0.02)
//!     .build()
//!     .expect("valid config");
//! assert_eq!(config.capacity, 10_000);
//! ```

use serde::{Deserialize, Serialize};

use super::parameters::{calculate_optimal_parameters, FilterParams};
use crate::error::FilterError;

/// False positive rate used when the caller does not provide one
pub const DEFAULT_FALSE_POSITIVE_RATE: f64 = 0.01;

/// Configuration shared by every filter taking part in one join
///
/// Two filters built from equal configurations always have equal shapes,
/// which is what makes them combinable.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Expected number of distinct elements (n)
    pub capacity: usize,
    /// Target false positive rate at `capacity` elements, in (0, 1)
    pub false_positive_rate: f64,
}

impl FilterConfig {
    /// Create a new configuration with validation
    pub fn new(capacity: usize, false_positive_rate: f64) -> Result<Self, FilterError> {
        let config = Self {
            capacity,
            false_positive_rate,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a configuration with the default 1% false positive rate
    pub fn with_capacity(capacity: usize) -> Result<Self, FilterError> {
        Self::new(capacity, DEFAULT_FALSE_POSITIVE_RATE)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), FilterError> {
        self.params().map(|_| ())
    }

    /// Derive the bit-array size and hash count for this configuration
    pub fn params(&self) -> Result<FilterParams, FilterError> {
        calculate_optimal_parameters(self.capacity, self.false_positive_rate)
    }
}

/// Builder for FilterConfig with validation
#[derive(Debug, Default)]
pub struct FilterConfigBuilder {
    capacity: Option<usize>,
    false_positive_rate: Option<f64>,
}

impl FilterConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expected number of distinct elements (required)
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Set the target false positive rate (defaults to 0.01)
    pub fn false_positive_rate(mut self, fpr: f64) -> Self {
        self.false_positive_rate = Some(fpr);
        self
    }

    /// Build the FilterConfig, validating all parameters
    pub fn build(self) -> Result<FilterConfig, FilterError> {
        let capacity = self
            .capacity
            .ok_or_else(|| FilterError::invalid("capacity is required"))?;

        FilterConfig::new(
            capacity,
            self.false_positive_rate
                .unwrap_or(DEFAULT_FALSE_POSITIVE_RATE),
        )
    }
}
