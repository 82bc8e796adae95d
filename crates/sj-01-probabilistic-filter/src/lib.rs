//! # SJ-01 Probabilistic Filter
//!
//! Bloom filter used by the semi-join to prune candidate keys before exact
//! verification.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `ProbabilisticFilter`: bit array + double-hashed positions
//!   - `ExactSetFilter`: zero-error reference with the same interface
//!   - `FilterConfig`, `FilterConfigBuilder`: validated capacity and rate
//!   - `parameters`: sizing and false positive rate math
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `MembershipFilter`: insert / may_contain / combine_and
//!
//! ## Invariants
//!
//! - m and k are pure functions of (capacity, false positive rate)
//! - No false negatives: if inserted, `may_contain()` returns true
//! - `combine_and` only accepts filters of identical m and k
//!
//! ## Usage Example
//!
//! ```
//! use sj_01_probabilistic_filter::{FilterConfig, MembershipFilter, ProbabilisticFilter};
//!
//! let config = FilterConfig::with_capacity(1_000)?;
//! let mut left = ProbabilisticFilter::new(config)?;
//! let mut right = ProbabilisticFilter::new(config)?;
//!
//! left.insert("user:1");
//! right.insert("user:1");
//! right.insert("user:2");
//!
//! left.combine_and(&right)?;
//! assert!(left.may_contain("user:1"));
//! # Ok::<(), sj_01_probabilistic_filter::FilterError>(())
//! ```

pub mod domain;
pub mod error;
pub mod ports;

pub use domain::{
    calculate_fpr, calculate_optimal_parameters, ExactSetFilter, FilterConfig,
    FilterConfigBuilder, FilterParams, ProbabilisticFilter, DEFAULT_FALSE_POSITIVE_RATE,
    MAX_SIZE_BITS,
};
pub use error::FilterError;
pub use ports::MembershipFilter;
