//! Exact reference filter
//!
//! Stores every key, so it answers membership without error. It stands in for
//! the Bloom filter when comparing join results or measuring what the
//! probabilistic pruning costs and saves.

use std::collections::HashSet;

use super::config::FilterConfig;
use crate::error::FilterError;
use crate::ports::MembershipFilter;

/// HashSet-backed membership filter with a 0% false positive rate
#[derive(Clone, Debug)]
pub struct ExactSetFilter {
    keys: HashSet<String>,
    config: FilterConfig,
}

impl ExactSetFilter {
    /// Create an empty filter; the config is validated like a Bloom filter's
    pub fn new(config: FilterConfig) -> Result<Self, FilterError> {
        config.validate()?;
        Ok(Self {
            keys: HashSet::with_capacity(config.capacity),
            config,
        })
    }

    /// Number of distinct keys held
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check whether no key is held
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl MembershipFilter for ExactSetFilter {
    const KIND: &'static str = "exact";

    fn from_config(config: &FilterConfig) -> Result<Self, FilterError> {
        Self::new(*config)
    }

    fn config(&self) -> &FilterConfig {
        &self.config
    }

    fn insert(&mut self, key: &str) {
        if !self.keys.contains(key) {
            self.keys.insert(key.to_owned());
        }
    }

    fn may_contain(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Same-shape rule as the Bloom filter: configurations must match
    fn combine_and(&mut self, other: &Self) -> Result<(), FilterError> {
        if self.config != other.config {
            let left = self.config.params()?;
            let right = other.config.params()?;
            return Err(FilterError::IncompatibleFilters {
                left_bits: left.size_bits,
                right_bits: right.size_bits,
                left_hashes: left.hash_count,
                right_hashes: right.hash_count,
            });
        }

        self.keys.retain(|key| other.keys.contains(key));
        Ok(())
    }

    fn estimated_len(&self) -> f64 {
        self.keys.len() as f64
    }
}
