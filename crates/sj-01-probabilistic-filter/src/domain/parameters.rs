//! Optimal Bloom filter parameter calculation
//!
//! Formulas:
//! - m = ceil(-n*ln(fpr) / (ln(2)^2))  -- optimal bits
//! - k = round((m/n) * ln(2))          -- optimal hash functions, at least 1
//! - FPR = (1 - e^(-kn/m))^k           -- rate after n distinct inserts

use bitvec::prelude::{BitSlice, Lsb0};
use serde::{Deserialize, Serialize};
use std::f64::consts::LN_2;

use crate::error::FilterError;

/// Largest bit count a filter's bit array can hold
pub const MAX_SIZE_BITS: usize = BitSlice::<u8, Lsb0>::MAX_BITS;

/// Bloom filter parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    /// Number of bits in the filter (m)
    pub size_bits: usize,
    /// Number of hash functions (k)
    pub hash_count: usize,
    /// Expected false positive rate once `capacity` elements are inserted
    pub expected_fpr: f64,
}

/// Calculate optimal Bloom filter parameters for given constraints
///
/// # Arguments
/// * `capacity` - Expected number of distinct elements (n), must be `> 0`
/// * `target_fpr` - Target false positive rate, must lie in `(0, 1)`
///
/// # Errors
/// `FilterError::InvalidConfiguration` when either argument is out of range,
/// or when the derived bit count exceeds [`MAX_SIZE_BITS`].
pub fn calculate_optimal_parameters(
    capacity: usize,
    target_fpr: f64,
) -> Result<FilterParams, FilterError> {
    if capacity == 0 {
        return Err(FilterError::invalid("capacity must be greater than 0"));
    }
    if !(target_fpr > 0.0 && target_fpr < 1.0) {
        return Err(FilterError::invalid(format!(
            "false positive rate ({target_fpr}) must be greater than 0 and smaller than 1"
        )));
    }

    let n = capacity as f64;
    let ln2_squared = LN_2 * LN_2;

    let m = (-n * target_fpr.ln() / ln2_squared).ceil();
    if !m.is_finite() || m >= MAX_SIZE_BITS as f64 {
        return Err(FilterError::invalid(format!(
            "capacity {capacity} with rate {target_fpr} needs {m} bits, more than {MAX_SIZE_BITS}"
        )));
    }
    let size_bits = (m as usize).max(1);

    let hash_count = optimal_k(size_bits, capacity);
    let expected_fpr = calculate_fpr(size_bits, capacity, hash_count);

    Ok(FilterParams {
        size_bits,
        hash_count,
        expected_fpr,
    })
}

/// Calculate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}

/// Calculate optimal k for given m and n, never below 1
pub fn optimal_k(m: usize, n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    (((m as f64 / n as f64) * LN_2).round() as usize).max(1)
}

/// Calculate minimum m for given n and target FPR
pub fn minimum_bits(n: usize, target_fpr: f64) -> usize {
    let ln2_squared = LN_2 * LN_2;
    (-(n as f64) * target_fpr.ln() / ln2_squared).ceil() as usize
}
