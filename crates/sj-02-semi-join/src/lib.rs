//! # SJ-02 Semi-Join
//!
//! Probabilistic semi-join of two key-value collections: Bloom filters prune
//! the keys that cannot be shared, exact comparison verifies the rest.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure join logic, no I/O
//!   - `SemiJoinEngine`: build, combine, prune, verify
//!   - `JoinConfig`, `JoinConfigBuilder`: filter shape plus tuning
//!   - `JoinResult`, `KeyJoin`, `JoinStats`: outputs and diagnostics
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `SemiJoinApi`: Driving port (inbound API)
//!   - `KeyValueSource`: Driven port (where keys and values live)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `SemiJoinService`: Implements `SemiJoinApi` over two sources
//!
//! - **Configuration** (`config`): `JoinConfig::from_env` for `SJ_*` variables
//!
//! - **Events Layer** (`events/`): Domain events and their observers
//!
//! - **Adapters Layer** (`adapters/`): `InMemorySource`, `JsonFileSource`
//!
//! ## Invariants
//!
//! - No false negatives: every key present on both sides is reported
//! - No false positives in the output: every reported key was compared exactly
//! - Output order follows the left input
//! - Parallel and sequential runs return identical results
//!
//! ## Usage Example
//!
//! ```
//! use sj_02_semi_join::probabilistic_semi_join;
//!
//! let left = vec![("a".to_string(), 1), ("b".to_string(), 2), ("c".to_string(), 3)];
//! let right = vec![("b".to_string(), 20), ("c".to_string(), 30), ("d".to_string(), 40)];
//!
//! let result = probabilistic_semi_join(&left, &right, 10, 0.01)?;
//! assert_eq!(result.count, 2);
//! assert_eq!(result.keys().collect::<Vec<_>>(), vec!["b", "c"]);
//! # Ok::<(), sj_01_probabilistic_filter::FilterError>(())
//! ```
//!
//! ## Wiring to Sources
//!
//! ```ignore
//! use sj_02_semi_join::{JoinConfig, JsonFileSource, SemiJoinApi, SemiJoinService, TracingObserver};
//! use std::sync::Arc;
//!
//! let left = Arc::new(JsonFileSource::load("orders", "orders.json").await?);
//! let right = Arc::new(JsonFileSource::load("customers", "customers.json").await?);
//!
//! let service = SemiJoinService::new(left, right, JoinConfig::from_env()?)
//!     .with_observer(Arc::new(TracingObserver));
//! let result = service.run().await?;
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod metrics;
pub mod ports;
pub mod service;


pub use adapters::{InMemorySource, JsonFileSource};
pub use domain::{
    probabilistic_semi_join, JoinConfig, JoinConfigBuilder, JoinMatch, JoinResult, JoinStats,
    KeyJoin, KeyMatch, SemiJoinEngine, DEFAULT_CAPACITY, DEFAULT_PARALLEL_THRESHOLD,
    DEFAULT_FETCH_CONCURRENCY, DEFAULT_SOURCE_TIMEOUT,
};
pub use error::{JoinError, SourceError};
pub use events::{
    FanoutObserver, JoinEvent, JoinObserver, NoOpObserver, RecordingObserver, Side,
    TracingObserver,
};
pub use metrics::{JoinMetrics, JoinMetricsSnapshot};
pub use ports::{KeyValueSource, SemiJoinApi};
pub use service::SemiJoinService;

pub use sj_01_probabilistic_filter::{
    ExactSetFilter, FilterConfig, FilterError, MembershipFilter, ProbabilisticFilter,
};
