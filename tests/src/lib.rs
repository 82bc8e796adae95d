//! # Semi-Join Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-crate flows
//!     ├── join_flows.rs # Engine and service end to end
//!     └── properties.rs # proptest invariants
//!
//! tests/benches/
//! └── semi_join_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sj-tests
//!
//! # By category
//! cargo test -p sj-tests integration::join_flows::
//! cargo test -p sj-tests integration::properties::
//!
//! # Benchmarks
//! cargo bench -p sj-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]
