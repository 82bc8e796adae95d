//! Core Bloom filter implementation
//!
//! INVARIANTS:
//! - Size (m) and hash count (k) are derived once from the configuration
//! - No false negatives: once inserted, `may_contain` returns true, also
//!   after AND-combination with a filter that holds the same key
//! - Bits are only ever set; there is no removal

use bitvec::prelude::*;
use std::fmt;

use super::config::FilterConfig;
use super::hash_functions::hash_positions;
use super::parameters::calculate_fpr;
use crate::error::FilterError;
use crate::ports::MembershipFilter;

/// Bloom filter for probabilistic membership testing
///
/// Built from a [`FilterConfig`], filled with the keys of one data source and
/// AND-combined with the filter of the other source to approximate the
/// intersection of both key sets.
///
/// ```
/// use sj_01_probabilistic_filter::{MembershipFilter, ProbabilisticFilter};
///
/// let mut left = ProbabilisticFilter::with_capacity(100, 0.01).unwrap();
/// let mut right = ProbabilisticFilter::with_capacity(100, 0.01).unwrap();
/// left.insert_all(["a", "b", "c"]);
/// right.insert_all(["b", "c", "d"]);
///
/// let combined = left.intersection(&right).unwrap();
/// assert!(combined.may_contain("b"));
/// assert!(combined.may_contain("c"));
/// ```
#[derive(Clone)]
pub struct ProbabilisticFilter {
    /// Bit array storing the filter state
    bits: BitVec<u8, Lsb0>,
    /// Configuration the shape was derived from
    config: FilterConfig,
    /// Number of hash functions (k)
    k: usize,
    /// Size in bits (m)
    m: usize,
    /// Number of insert calls (n)
    n: usize,
}

impl ProbabilisticFilter {
    /// Create an empty filter sized for `config`
    pub fn new(config: FilterConfig) -> Result<Self, FilterError> {
        let params = config.params()?;

        Ok(Self {
            bits: bitvec![u8, Lsb0; 0; params.size_bits],
            config,
            k: params.hash_count,
            m: params.size_bits,
            n: 0,
        })
    }

    /// Create an empty filter for `capacity` elements at `false_positive_rate`
    pub fn with_capacity(capacity: usize, false_positive_rate: f64) -> Result<Self, FilterError> {
        Self::new(FilterConfig {
            capacity,
            false_positive_rate,
        })
    }

    /// Expected number of distinct elements
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Target false positive rate at capacity
    pub fn false_positive_rate(&self) -> f64 {
        self.config.false_positive_rate
    }

    /// Get the filter size in bits
    pub fn size_bits(&self) -> usize {
        self.m
    }

    /// Get the number of hash functions
    pub fn hash_count(&self) -> usize {
        self.k
    }

    /// Number of insert calls, duplicates included
    ///
    /// After `combine_and` this is the smaller of both operands' counts, an
    /// upper bound for the size of the intersection.
    pub fn elements_inserted(&self) -> usize {
        self.n
    }

    /// Get the number of bits set in the filter
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Share of bits that are set
    pub fn fill_ratio(&self) -> f64 {
        self.bits_set() as f64 / self.m as f64
    }

    /// Check whether no bit is set
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Estimate the number of distinct elements from the fill ratio
    ///
    /// Formula: n ≈ -(m/k) * ln(1 - X/m), X = bits set. Infinite once every
    /// bit is set. On a combined filter this estimates the intersection size
    /// plus AND-induced noise.
    pub fn estimated_cardinality(&self) -> f64 {
        let m = self.m as f64;
        let k = self.k as f64;
        let x = self.bits_set() as f64;

        -m / k * (1.0 - x / m).ln()
    }

    /// False positive rate given the number of inserts so far
    ///
    /// Formula: FPR = (1 - e^(-kn/m))^k. Exceeds the configured rate once
    /// more than `capacity` distinct keys went in.
    pub fn current_false_positive_rate(&self) -> f64 {
        calculate_fpr(self.m, self.n, self.k)
    }

    fn check_compatible(&self, other: &Self) -> Result<(), FilterError> {
        if self.m != other.m || self.k != other.k {
            return Err(FilterError::IncompatibleFilters {
                left_bits: self.m,
                right_bits: other.m,
                left_hashes: self.k,
                right_hashes: other.k,
            });
        }
        Ok(())
    }
}

impl MembershipFilter for ProbabilisticFilter {
    const KIND: &'static str = "bloom";

    fn from_config(config: &FilterConfig) -> Result<Self, FilterError> {
        Self::new(*config)
    }

    fn config(&self) -> &FilterConfig {
        &self.config
    }

    fn insert(&mut self, key: &str) {
        for pos in hash_positions(key.as_bytes(), self.k, self.m) {
            self.bits.set(pos, true);
        }
        self.n += 1;
    }

    fn may_contain(&self, key: &str) -> bool {
        hash_positions(key.as_bytes(), self.k, self.m).all(|pos| self.bits[pos])
    }

    /// AND the underlying byte slices: O(m/8) operations
    fn combine_and(&mut self, other: &Self) -> Result<(), FilterError> {
        self.check_compatible(other)?;

        let self_raw = self.bits.as_raw_mut_slice();
        let other_raw = other.bits.as_raw_slice();
        for (s, o) in self_raw.iter_mut().zip(other_raw.iter()) {
            *s &= *o;
        }
        self.n = self.n.min(other.n);
        Ok(())
    }

    fn estimated_len(&self) -> f64 {
        self.estimated_cardinality()
    }
}

impl<'a> Extend<&'a str> for ProbabilisticFilter {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl fmt::Debug for ProbabilisticFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbabilisticFilter")
            .field("m", &self.m)
            .field("k", &self.k)
            .field("n", &self.n)
            .field("bits_set", &self.bits_set())
            .finish()
    }
}
