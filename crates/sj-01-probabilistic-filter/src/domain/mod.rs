//! Domain Layer - Pure business logic
//!
//! This layer contains:
//! - The Bloom filter used for pruning
//! - Hash functions (MurmurHash3 + double hashing)
//! - Parameter calculations
//! - Configuration
//! - An exact reference filter
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - No logging; callers observe results

pub mod bloom_filter;
pub mod config;
pub mod exact_set;
pub mod hash_functions;
pub mod parameters;

pub use bloom_filter::ProbabilisticFilter;
pub use config::{FilterConfig, FilterConfigBuilder, DEFAULT_FALSE_POSITIVE_RATE};
pub use exact_set::ExactSetFilter;
pub use hash_functions::{hash_positions, murmur_hash, HashPositions};
pub use parameters::{
    calculate_fpr, calculate_optimal_parameters, minimum_bits, optimal_k, FilterParams,
    MAX_SIZE_BITS,
};
